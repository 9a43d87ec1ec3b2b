use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::{Profile, Recommendation};
use crate::results::EMPTY_PLACEHOLDER;

#[derive(Debug, Clone, PartialEq)]
pub struct TopicSummary {
    pub topic: String,
    pub count: usize,
    pub avg_percent: f64,
}

/// Counts how often each tag appears across the recommendations, most
/// frequent first, ties by name.
pub fn summarize_topics(recommendations: &[Recommendation]) -> Vec<TopicSummary> {
    let mut map: std::collections::HashMap<String, (usize, u32)> =
        std::collections::HashMap::new();

    for rec in recommendations {
        for tag in &rec.tags {
            let entry = map.entry(tag.clone()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += rec.match_percent();
        }
    }

    let mut summaries: Vec<TopicSummary> = map
        .into_iter()
        .map(|(topic, (count, total_percent))| TopicSummary {
            topic,
            count,
            avg_percent: if count == 0 {
                0.0
            } else {
                total_percent as f64 / count as f64
            },
        })
        .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.topic.cmp(&b.topic)));
    summaries
}

pub fn build_report(
    profile: &Profile,
    recommendations: &[Recommendation],
    generated_at: DateTime<Utc>,
) -> String {
    let topics = summarize_topics(recommendations);
    let mut output = String::new();

    let _ = writeln!(output, "# Study Program Recommendations");
    let _ = writeln!(
        output,
        "Generated for {} ({}) on {}",
        profile.name,
        profile.email,
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Profile");
    let _ = writeln!(output, "- Field: {}", profile.field.label());
    let _ = writeln!(output, "- Average grade: {:.1}", profile.gpa);
    let _ = writeln!(output, "- Interests: {}", profile.interests.join(", "));

    if !profile.grades.is_empty() {
        let grades: Vec<String> = profile
            .grades
            .iter()
            .map(|(subject, grade)| format!("{subject} {grade}"))
            .collect();
        let _ = writeln!(output, "- Grades: {}", grades.join(", "));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Programs");

    if recommendations.is_empty() {
        let _ = writeln!(output, "{EMPTY_PLACEHOLDER}");
    } else {
        for (index, rec) in recommendations.iter().enumerate() {
            let _ = writeln!(
                output,
                "{}. **{}** ({}% match): {}",
                index + 1,
                rec.program_name,
                rec.match_percent(),
                rec.explanation
            );
            if let Some(description) = &rec.program_description {
                let _ = writeln!(output, "   {description}");
            }
            if !rec.skills.is_empty() {
                let _ = writeln!(output, "   Skills: {}", rec.skills.join(", "));
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Topic Mix");

    if topics.is_empty() {
        let _ = writeln!(output, "No topics listed for these programs.");
    } else {
        for summary in topics.iter() {
            let _ = writeln!(
                output,
                "- {}: {} programs (avg match {:.0}%)",
                summary.topic, summary.count, summary.avg_percent
            );
        }
    }

    output
}

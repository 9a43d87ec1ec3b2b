use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::models::{Profile, StudyField};

pub const AVAILABLE_INTERESTS: &[&str] = &[
    "art",
    "biology",
    "business",
    "chemistry",
    "computers",
    "design",
    "drawing",
    "engineering",
    "environment",
    "fashion",
    "health",
    "history",
    "math",
    "music",
    "nature",
    "people",
    "physics",
    "programming",
    "psychology",
    "science",
    "technology",
    "writing",
];

pub const SUBJECTS: &[&str] = &[
    "math",
    "physics",
    "chemistry",
    "biology",
    "english",
    "history",
    "geography",
    "art",
    "music",
    "computer science",
];

/// What a single grade entry did to the stored grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeEntry {
    Set,
    Cleared,
    Rejected,
}

/// Form state before submission. Nothing here is checked until `finish`,
/// except grade entries, which are filtered as they arrive.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub field: Option<StudyField>,
    interests: Vec<String>,
    grades: BTreeMap<String, f64>,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn grades(&self) -> &BTreeMap<String, f64> {
        &self.grades
    }

    /// Adds the interest if absent, removes it if present.
    pub fn toggle_interest(&mut self, interest: &str) {
        if let Some(pos) = self.interests.iter().position(|i| i == interest) {
            self.interests.remove(pos);
        } else {
            self.interests.push(interest.to_string());
        }
    }

    /// Applies raw grade input for a subject. Empty input removes the subject;
    /// anything non-numeric or outside 0..=100 leaves the grades untouched.
    pub fn set_grade(&mut self, subject: &str, input: &str) -> GradeEntry {
        if input.is_empty() {
            self.grades.remove(subject);
            return GradeEntry::Cleared;
        }

        match input.trim().parse::<f64>() {
            Ok(value) if (0.0..=100.0).contains(&value) => {
                self.grades.insert(subject.to_string(), value);
                GradeEntry::Set
            }
            _ => {
                debug!(subject, input, "ignoring grade entry");
                GradeEntry::Rejected
            }
        }
    }

    pub fn average_grade(&self) -> f64 {
        average(&self.grades)
    }

    pub fn finish(&self) -> Result<Profile, ValidationError> {
        let field = match self.field {
            Some(field) => field,
            None => return Err(ValidationError::MissingRequired),
        };
        if self.name.is_empty() || self.email.is_empty() || self.interests.is_empty() {
            return Err(ValidationError::MissingRequired);
        }

        Ok(Profile {
            name: self.name.clone(),
            email: self.email.clone(),
            field,
            gpa: self.average_grade(),
            interests: self.interests.clone(),
            grades: self.grades.clone(),
        })
    }
}

pub fn average(grades: &BTreeMap<String, f64>) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    grades.values().sum::<f64>() / grades.len() as f64
}

/// Splits a `subject=value` flag. A missing `=` is treated as an empty value.
pub fn parse_grade_arg(arg: &str) -> (&str, &str) {
    match arg.split_once('=') {
        Some((subject, value)) => (subject.trim(), value),
        None => (arg.trim(), ""),
    }
}

/// Feeds every `subject,grade` row of a CSV file through `set_grade`.
/// Returns how many rows were stored.
pub fn import_grades_csv(form: &mut ProfileForm, csv_path: &Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        subject: String,
        grade: String,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open grades file {}", csv_path.display()))?;
    let mut stored = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        match form.set_grade(row.subject.trim(), row.grade.trim()) {
            GradeEntry::Set => stored += 1,
            GradeEntry::Cleared => {}
            GradeEntry::Rejected => {
                warn!(subject = %row.subject, grade = %row.grade, "grade out of range, skipped");
            }
        }
    }

    Ok(stored)
}

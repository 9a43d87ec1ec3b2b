use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields of study offered by the form. Serialized with the labels the
/// scoring service filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum StudyField {
    #[serde(rename = "Business")]
    Business,
    #[serde(rename = "Technology & CS")]
    #[value(name = "technology")]
    Technology,
    #[serde(rename = "Health & Medicine")]
    #[value(name = "health")]
    Health,
    #[serde(rename = "Arts & Humanities")]
    #[value(name = "arts")]
    Arts,
    #[serde(rename = "Science & Engineering")]
    #[value(name = "science")]
    Science,
    #[serde(rename = "Social Sciences")]
    SocialSciences,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Personal Development")]
    PersonalDevelopment,
}

impl StudyField {
    pub fn label(self) -> &'static str {
        match self {
            StudyField::Business => "Business",
            StudyField::Technology => "Technology & CS",
            StudyField::Health => "Health & Medicine",
            StudyField::Arts => "Arts & Humanities",
            StudyField::Science => "Science & Engineering",
            StudyField::SocialSciences => "Social Sciences",
            StudyField::DataScience => "Data Science",
            StudyField::PersonalDevelopment => "Personal Development",
        }
    }
}

/// Finished profile, only produced by `ProfileForm::finish`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub field: StudyField,
    pub gpa: f64,
    pub interests: Vec<String>,
    pub grades: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub program_id: String,
    pub program_name: String,
    pub program_description: Option<String>,
    pub score: f64,
    pub explanation: String,
    pub tags: Vec<String>,
    pub skills: Vec<String>,
}

impl Recommendation {
    /// Rounded match percentage. The stored score is left as received; only
    /// the displayed value is held to 0..=100.
    pub fn match_percent(&self) -> u32 {
        if !self.score.is_finite() {
            return 0;
        }
        (self.score.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Clicked,
    Accepted,
}

impl FeedbackKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackKind::Clicked => "clicked",
            FeedbackKind::Accepted => "accepted",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackEvent {
    pub id: Uuid,
    pub program_id: String,
    pub kind: FeedbackKind,
    pub recorded_at: DateTime<Utc>,
}

impl FeedbackEvent {
    pub fn new(program_id: &str, kind: FeedbackKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            program_id: program_id.to_string(),
            kind,
            recorded_at: Utc::now(),
        }
    }
}

/// Body of the scoring service's root endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    #[serde(default)]
    pub courses_available: u64,
}

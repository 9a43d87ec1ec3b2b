//! Reshapes the scoring service's loosely-keyed records into `Recommendation`.
//!
//! The service echoes catalogue rows back with whatever columns the catalogue
//! had, so every lookup goes through an ordered list of candidate keys and
//! "present" means present and truthy (non-null, non-empty, non-zero).

use serde_json::{Map, Value};

use crate::models::Recommendation;

pub const DEFAULT_EXPLANATION: &str = "Matches your profile";

/// Shape of a `Tags`/`Skills` field as it arrives on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum ListField {
    Sequence(Vec<String>),
    /// List-like text such as `"['math', 'physics']"`.
    ScalarText(String),
    Absent,
}

impl ListField {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Array(items)) => ListField::Sequence(items.iter().map(value_text).collect()),
            Some(Value::String(text)) if !text.is_empty() => ListField::ScalarText(text.clone()),
            _ => ListField::Absent,
        }
    }

    pub fn into_list(self) -> Vec<String> {
        match self {
            ListField::Sequence(items) => items,
            ListField::ScalarText(text) => parse_quoted_list(&text),
            ListField::Absent => Vec::new(),
        }
    }
}

pub fn parse_list(value: Option<&Value>) -> Vec<String> {
    ListField::from_value(value).into_list()
}

/// Single quotes are swapped for double quotes before parsing; anything that
/// still isn't a JSON array yields an empty list.
fn parse_quoted_list(text: &str) -> Vec<String> {
    let swapped = text.replace('\'', "\"");
    match serde_json::from_str::<Vec<Value>>(&swapped) {
        Ok(items) => items.iter().map(value_text).collect(),
        Err(_) => Vec::new(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn first_present<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| is_truthy(value))
}

fn first_text(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_present(record, keys).map(value_text)
}

fn score_of(record: &Map<String, Value>) -> f64 {
    match first_present(record, &["final_score"]) {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

pub fn normalize_record(raw: &Value) -> Recommendation {
    let empty = Map::new();
    let record = raw.as_object().unwrap_or(&empty);

    Recommendation {
        program_id: first_text(record, &["id", "Course_Name"]).unwrap_or_default(),
        program_name: first_text(record, &["Course_Name", "name"]).unwrap_or_default(),
        program_description: first_text(record, &["Description", "description"]),
        score: score_of(record),
        explanation: first_text(record, &["explanation"])
            .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string()),
        tags: parse_list(first_present(record, &["Tags"])),
        skills: parse_list(first_present(record, &["Skills"])),
    }
}

/// Normalizes records in the order the service returned them.
pub fn normalize_all(raw: &[Value]) -> Vec<Recommendation> {
    raw.iter().map(normalize_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quoted_text_becomes_sequence() {
        let value = json!("['math','physics']");
        assert_eq!(parse_list(Some(&value)), vec!["math", "physics"]);
    }

    #[test]
    fn non_list_values_become_empty() {
        assert!(parse_list(Some(&json!(42))).is_empty());
        assert!(parse_list(Some(&Value::Null)).is_empty());
        assert!(parse_list(None).is_empty());
        assert!(parse_list(Some(&json!(""))).is_empty());
        assert!(parse_list(Some(&json!({"a": 1}))).is_empty());
    }

    #[test]
    fn proper_sequence_is_unchanged() {
        let value = json!(["a", "b"]);
        assert_eq!(parse_list(Some(&value)), vec!["a", "b"]);
    }

    #[test]
    fn unparseable_text_becomes_empty() {
        assert!(parse_list(Some(&json!("math, physics"))).is_empty());
        assert!(parse_list(Some(&json!("['it's broken']"))).is_empty());
        assert!(parse_list(Some(&json!("'just text'"))).is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            json!("['data analysis', 'python']"),
            json!(["a", "b"]),
            json!(7),
            Value::Null,
        ];
        for input in inputs {
            let once = parse_list(Some(&input));
            let twice = parse_list(Some(&json!(once.clone())));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn decodes_wire_shapes() {
        assert_eq!(
            ListField::from_value(Some(&json!(["x"]))),
            ListField::Sequence(vec!["x".to_string()])
        );
        assert_eq!(
            ListField::from_value(Some(&json!("['x']"))),
            ListField::ScalarText("['x']".to_string())
        );
        assert_eq!(ListField::from_value(Some(&json!(false))), ListField::Absent);
    }

    #[test]
    fn minimal_record_gets_defaults() {
        let raw = json!({"id": "p1", "Course_Name": "Intro", "final_score": 0.87});
        let rec = normalize_record(&raw);

        assert_eq!(rec.program_id, "p1");
        assert_eq!(rec.program_name, "Intro");
        assert_eq!(rec.score, 0.87);
        assert_eq!(rec.explanation, DEFAULT_EXPLANATION);
        assert!(rec.tags.is_empty());
        assert!(rec.skills.is_empty());
        assert_eq!(rec.program_description, None);
    }

    #[test]
    fn id_falls_back_to_course_name() {
        let rec = normalize_record(&json!({"Course_Name": "X"}));
        assert_eq!(rec.program_id, "X");
        assert_eq!(rec.program_name, "X");
        assert_eq!(rec.score, 0.0);
    }

    #[test]
    fn lowercase_keys_are_second_choice() {
        let raw = json!({
            "id": "c-9",
            "name": "Applied Statistics",
            "description": "Sampling and inference",
            "explanation": "Matches your field & interests",
            "Skills": "['R', 'regression']",
            "Tags": ["stats"]
        });
        let rec = normalize_record(&raw);

        assert_eq!(rec.program_name, "Applied Statistics");
        assert_eq!(rec.program_description.as_deref(), Some("Sampling and inference"));
        assert_eq!(rec.explanation, "Matches your field & interests");
        assert_eq!(rec.skills, vec!["R", "regression"]);
        assert_eq!(rec.tags, vec!["stats"]);
    }

    #[test]
    fn empty_strings_do_not_count_as_present() {
        let rec = normalize_record(&json!({"id": "", "Course_Name": "Fallback", "explanation": ""}));
        assert_eq!(rec.program_id, "Fallback");
        assert_eq!(rec.explanation, DEFAULT_EXPLANATION);
    }

    #[test]
    fn numeric_ids_and_string_scores_are_accepted() {
        let rec = normalize_record(&json!({"id": 12, "final_score": "0.5"}));
        assert_eq!(rec.program_id, "12");
        assert_eq!(rec.score, 0.5);
    }

    #[test]
    fn non_object_records_are_degenerate() {
        let rec = normalize_record(&json!("oops"));
        assert_eq!(rec.program_id, "");
        assert_eq!(rec.program_name, "");
        assert_eq!(rec.explanation, DEFAULT_EXPLANATION);
    }

    #[test]
    fn order_is_preserved() {
        let raw = vec![
            json!({"id": "b", "final_score": 0.2}),
            json!({"id": "a", "final_score": 0.9}),
            json!({"id": "b", "final_score": 0.2}),
        ];
        let ids: Vec<String> = normalize_all(&raw).into_iter().map(|r| r.program_id).collect();
        assert_eq!(ids, vec!["b", "a", "b"]);
    }
}

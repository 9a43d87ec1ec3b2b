use std::collections::HashSet;

use tracing::info;

use crate::models::{FeedbackEvent, FeedbackKind, Recommendation};

pub const EMPTY_PLACEHOLDER: &str = "No recommendations found. Try updating your profile.";
const MAX_SKILLS: usize = 4;
const MAX_TAGS: usize = 6;

/// Where interaction events go. Rendering never depends on what the sink does.
pub trait FeedbackSink {
    fn record(&self, event: &FeedbackEvent);
}

/// Acknowledges events in the log and nothing else.
pub struct LoggingFeedback;

impl FeedbackSink for LoggingFeedback {
    fn record(&self, event: &FeedbackEvent) {
        info!(
            event_id = %event.id,
            program_id = %event.program_id,
            kind = event.kind.as_str(),
            "feedback noted"
        );
    }
}

/// Display model for one recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub program_name: String,
    pub match_percent: u32,
    pub explanation: String,
    pub skills: Vec<String>,
    pub tags: Vec<String>,
    pub accepted: bool,
}

/// One visit to the results screen. The accepted set lives and dies with it.
pub struct ResultsView<'a, F: FeedbackSink + ?Sized> {
    recommendations: &'a [Recommendation],
    accepted: HashSet<String>,
    feedback: &'a F,
}

impl<'a, F: FeedbackSink + ?Sized> ResultsView<'a, F> {
    pub fn new(recommendations: &'a [Recommendation], feedback: &'a F) -> Self {
        Self {
            recommendations,
            accepted: HashSet::new(),
            feedback,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    pub fn cards(&self) -> Vec<Card> {
        self.recommendations
            .iter()
            .map(|rec| Card {
                program_name: rec.program_name.clone(),
                match_percent: rec.match_percent(),
                explanation: rec.explanation.clone(),
                skills: rec.skills.iter().take(MAX_SKILLS).cloned().collect(),
                tags: rec.tags.iter().take(MAX_TAGS).cloned().collect(),
                accepted: self.accepted.contains(&rec.program_id),
            })
            .collect()
    }

    pub fn program_id_at(&self, index: usize) -> Option<&'a str> {
        self.recommendations
            .get(index)
            .map(|rec| rec.program_id.as_str())
    }

    pub fn is_accepted(&self, program_id: &str) -> bool {
        self.accepted.contains(program_id)
    }

    /// Marks the program accepted and reports it. Every call reports, even
    /// when the program was already accepted.
    pub fn accept(&mut self, program_id: &str) {
        self.accepted.insert(program_id.to_string());
        self.feedback
            .record(&FeedbackEvent::new(program_id, FeedbackKind::Accepted));
    }

    pub fn click(&self, program_id: &str) {
        self.feedback
            .record(&FeedbackEvent::new(program_id, FeedbackKind::Clicked));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingFeedback {
        events: RefCell<Vec<(String, FeedbackKind)>>,
    }

    impl FeedbackSink for RecordingFeedback {
        fn record(&self, event: &FeedbackEvent) {
            self.events
                .borrow_mut()
                .push((event.program_id.clone(), event.kind));
        }
    }

    fn rec(id: &str, score: f64, skills: usize, tags: usize) -> Recommendation {
        Recommendation {
            program_id: id.to_string(),
            program_name: format!("Program {id}"),
            program_description: None,
            score,
            explanation: "Matches your field & interests".to_string(),
            tags: (0..tags).map(|i| format!("tag{i}")).collect(),
            skills: (0..skills).map(|i| format!("skill{i}")).collect(),
        }
    }

    #[test]
    fn cards_cap_skills_and_tags() {
        let recs = vec![rec("p1", 0.87, 7, 9)];
        let sink = RecordingFeedback::default();
        let view = ResultsView::new(&recs, &sink);

        let cards = view.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].match_percent, 87);
        assert_eq!(cards[0].skills, vec!["skill0", "skill1", "skill2", "skill3"]);
        assert_eq!(cards[0].tags.len(), 6);
        assert_eq!(cards[0].tags[5], "tag5");
        assert!(!cards[0].accepted);
    }

    #[test]
    fn short_lists_are_shown_whole() {
        let recs = vec![rec("p1", 0.5, 2, 0)];
        let sink = RecordingFeedback::default();
        let view = ResultsView::new(&recs, &sink);

        let card = &view.cards()[0];
        assert_eq!(card.skills.len(), 2);
        assert!(card.tags.is_empty());
    }

    #[test]
    fn accepting_twice_keeps_state_and_reports_both() {
        let recs = vec![rec("p1", 0.9, 0, 0), rec("p2", 0.7, 0, 0)];
        let sink = RecordingFeedback::default();
        let mut view = ResultsView::new(&recs, &sink);

        assert!(!view.is_accepted("p1"));
        view.accept("p1");
        assert!(view.is_accepted("p1"));
        view.accept("p1");
        assert!(view.is_accepted("p1"));
        assert!(!view.is_accepted("p2"));

        let events = sink.events.borrow();
        assert_eq!(
            *events,
            vec![
                ("p1".to_string(), FeedbackKind::Accepted),
                ("p1".to_string(), FeedbackKind::Accepted),
            ]
        );
        drop(events);

        let cards = view.cards();
        assert!(cards[0].accepted);
        assert!(!cards[1].accepted);
    }

    #[test]
    fn click_reports_without_accepting() {
        let recs = vec![rec("p1", 0.9, 0, 0)];
        let sink = RecordingFeedback::default();
        let view = ResultsView::new(&recs, &sink);

        view.click("p1");

        assert!(!view.is_accepted("p1"));
        assert_eq!(
            *sink.events.borrow(),
            vec![("p1".to_string(), FeedbackKind::Clicked)]
        );
    }

    #[test]
    fn new_view_starts_with_nothing_accepted() {
        let recs = vec![rec("p1", 0.9, 0, 0)];
        let sink = RecordingFeedback::default();
        {
            let mut view = ResultsView::new(&recs, &sink);
            view.accept("p1");
        }
        let view = ResultsView::new(&recs, &sink);
        assert!(!view.is_accepted("p1"));
    }

    #[test]
    fn empty_view_has_no_cards() {
        let sink = RecordingFeedback::default();
        let view = ResultsView::new(&[], &sink);
        assert!(view.is_empty());
        assert!(view.cards().is_empty());
        assert_eq!(view.program_id_at(0), None);
    }
}

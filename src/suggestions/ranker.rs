use super::types::{FeedbackMemory, Suggestion};

/// Most suggestions returned for one thought.
pub const MAX_SUGGESTIONS: usize = 7;

/// Drop ignored candidates, order by priority (highest first) and cap the list.
///
/// The sort is stable, so equal priorities keep rule order.
pub fn rank(candidates: &[Suggestion], feedback: &FeedbackMemory) -> Vec<Suggestion> {
    let mut ranked: Vec<Suggestion> = candidates
        .iter()
        .filter(|s| !feedback.is_ignored(&s.id))
        .cloned()
        .collect();

    ranked.sort_by(|a, b| b.priority.cmp(&a.priority));
    ranked.truncate(MAX_SUGGESTIONS);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestions::types::{Priority, SuggestionAction, SuggestionCategory};

    fn suggestion(id: &str, priority: u8) -> Suggestion {
        Suggestion {
            id: id.to_string(),
            title: id.to_string(),
            why: String::new(),
            action: SuggestionAction::AddChecklist {
                thought_id: "t1".to_string(),
                task: "task".to_string(),
            },
            priority: Priority::new(priority).unwrap(),
            category: SuggestionCategory::Verification,
        }
    }

    fn ids(list: &[Suggestion]) -> Vec<&str> {
        list.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let candidates = vec![
            suggestion("a", 3),
            suggestion("b", 5),
            suggestion("c", 3),
            suggestion("d", 4),
            suggestion("e", 5),
        ];
        let ranked = rank(&candidates, &FeedbackMemory::default());
        assert_eq!(ids(&ranked), vec!["b", "e", "d", "a", "c"]);
    }

    #[test]
    fn test_caps_at_seven() {
        let candidates: Vec<_> = (0..10)
            .map(|i| suggestion(&format!("s{}", i), (i % 5 + 1) as u8))
            .collect();
        let ranked = rank(&candidates, &FeedbackMemory::default());
        assert_eq!(ranked.len(), MAX_SUGGESTIONS);
        assert!(ranked.windows(2).all(|w| w[0].priority >= w[1].priority));
    }

    #[test]
    fn test_ignored_ids_are_removed_before_truncation() {
        let mut candidates: Vec<_> = (0..8).map(|i| suggestion(&format!("s{}", i), 3)).collect();
        candidates.push(suggestion("late", 1));
        let feedback = FeedbackMemory::default().with_ignored("s0").with_ignored("s1");

        let ranked = rank(&candidates, &feedback);
        assert_eq!(ranked.len(), 7);
        assert!(!ids(&ranked).contains(&"s0"));
        assert!(ids(&ranked).contains(&"late"));
    }

    #[test]
    fn test_inputs_untouched() {
        let candidates = vec![suggestion("a", 1), suggestion("b", 5)];
        let before = candidates.clone();
        let _ = rank(&candidates, &FeedbackMemory::default().with_ignored("a"));
        assert_eq!(candidates, before);
    }
}

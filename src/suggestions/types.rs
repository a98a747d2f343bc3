use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::storage::{ConnectionType, EvidenceRelation, ThoughtType};

/// Urgency of a suggestion, 1 (lowest) to 5 (most urgent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Priority 1.
    pub const LOWEST: Priority = Priority(1);
    /// Priority 2.
    pub const LOW: Priority = Priority(2);
    /// Priority 3.
    pub const MEDIUM: Priority = Priority(3);
    /// Priority 4.
    pub const HIGH: Priority = Priority(4);
    /// Priority 5.
    pub const URGENT: Priority = Priority(5);

    /// Build a priority, rejecting values outside 1..=5.
    pub fn new(value: u8) -> Option<Self> {
        (1..=5).contains(&value).then_some(Priority(value))
    }

    /// Numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Priority::new(value).ok_or_else(|| format!("Priority must be 1-5, got {}", value))
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

/// What kind of gap a suggestion addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionCategory {
    /// Missing or weak evidence.
    EvidenceGap,
    /// Evidence that argues against the thought.
    Contradiction,
    /// An explanation not yet considered.
    Alternative,
    /// An entity worth checking with an external tool.
    Verification,
    /// Board-level hygiene such as overconfidence.
    BoardHealth,
}

/// External tool a `RUN_TOOL` suggestion asks the investigator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// WHOIS and DNS profile of a domain.
    DomainProfiler,
    /// Hosting and geolocation profile of an IP address.
    IpProfiler,
    /// Reverse lookup of a phone number.
    PhoneSearch,
}

/// The concrete action behind a suggestion, one variant per action type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "action_type",
    content = "action_payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum SuggestionAction {
    /// Run an external analysis tool against an entity.
    RunTool {
        /// Tool to run.
        tool: ToolKind,
        /// Entity value to run it on.
        target: String,
    },
    /// Create a new thought linked to an existing one.
    CreateThought {
        /// Type of the new thought.
        thought_type: ThoughtType,
        /// Thought the new one should connect to.
        linked_to: String,
    },
    /// Attach evidence to a thought with the given relation.
    AddEvidence {
        /// Thought that needs the evidence.
        thought_id: String,
        /// Relation the new evidence should have.
        relation: EvidenceRelation,
    },
    /// Add a checklist task for a thought.
    AddChecklist {
        /// Thought the task belongs to.
        thought_id: String,
        /// Task text.
        task: String,
    },
    /// Connect two thoughts.
    LinkThought {
        /// Thought the connection starts at.
        source_id: String,
        /// Thought the connection points to.
        target_id: String,
        /// Kind of connection to create.
        connection_type: ConnectionType,
    },
    /// Revisit a thought's confidence.
    AdjustConfidence {
        /// Thought to revisit.
        thought_id: String,
        /// Suggested confidence percentage.
        recommended_confidence: u8,
        /// Why the current value looks off.
        reason: String,
    },
}

/// A ranked, categorized next step for the investigator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// `rule-<tag>-<thought id>`; stable across evaluations.
    pub id: String,
    /// Short imperative title.
    pub title: String,
    /// What in the board triggered the suggestion.
    pub why: String,
    /// Action to take, serialized as `action_type` and `action_payload`.
    #[serde(flatten)]
    pub action: SuggestionAction,
    /// Urgency used for ranking.
    pub priority: Priority,
    /// Kind of gap addressed.
    pub category: SuggestionCategory,
}

impl Suggestion {
    /// Everything except the id, for comparing evaluations.
    pub fn content(&self) -> (&str, &str, &SuggestionAction, Priority, SuggestionCategory) {
        (
            &self.title,
            &self.why,
            &self.action,
            self.priority,
            self.category,
        )
    }
}

/// Suggestion ids the user has already reacted to.
///
/// Supplied by the caller on every request; only `ignored_suggestion_ids`
/// affects the output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackMemory {
    /// Suggestions the user acted on.
    pub accepted_suggestion_ids: HashSet<String>,
    /// Suggestions the user dismissed; filtered out of every result.
    pub ignored_suggestion_ids: HashSet<String>,
    /// Suggestions the user marked done.
    pub completed_suggestion_ids: HashSet<String>,
}

impl FeedbackMemory {
    /// Whether the user dismissed this suggestion id.
    pub fn is_ignored(&self, id: &str) -> bool {
        self.ignored_suggestion_ids.contains(id)
    }

    /// Record an ignored suggestion id
    pub fn with_ignored(mut self, id: impl Into<String>) -> Self {
        self.ignored_suggestion_ids.insert(id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_bounds() {
        assert!(Priority::new(0).is_none());
        assert!(Priority::new(6).is_none());
        assert_eq!(Priority::new(5), Some(Priority::URGENT));
        assert!(Priority::URGENT > Priority::HIGH);
        assert!(serde_json::from_value::<Priority>(json!(9)).is_err());
    }

    #[test]
    fn test_suggestion_wire_shape() {
        let suggestion = Suggestion {
            id: "rule-phone-search-t1".to_string(),
            title: "Search".to_string(),
            why: "Because".to_string(),
            action: SuggestionAction::RunTool {
                tool: ToolKind::PhoneSearch,
                target: "+1 555 0100".to_string(),
            },
            priority: Priority::HIGH,
            category: SuggestionCategory::Verification,
        };

        let value = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(value["action_type"], "RUN_TOOL");
        assert_eq!(value["action_payload"]["tool"], "phone_search");
        assert_eq!(value["priority"], 4);
        assert_eq!(value["category"], "VERIFICATION");

        let back: Suggestion = serde_json::from_value(value).unwrap();
        assert_eq!(back, suggestion);
    }

    #[test]
    fn test_feedback_memory_defaults_missing_sets() {
        let memory: FeedbackMemory =
            serde_json::from_value(json!({ "ignored_suggestion_ids": ["a"] })).unwrap();
        assert!(memory.is_ignored("a"));
        assert!(memory.accepted_suggestion_ids.is_empty());
    }
}

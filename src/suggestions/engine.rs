use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info};

use super::ranker::rank;
use super::rules::RuleSet;
use super::snapshot::{build_snapshot, InvestigationSnapshot};
use super::types::{FeedbackMemory, Suggestion};
use crate::error::StorageResult;
use crate::storage::Storage;

/// Second-pass source of suggestions, run after the rules.
///
/// Enriched candidates are ranked together with the rule output, so they are
/// subject to the same ignore list and cap.
#[async_trait]
pub trait SuggestionEnricher: Send + Sync {
    /// Extra candidates for the snapshot, given what the rules produced.
    async fn enrich(
        &self,
        snapshot: &InvestigationSnapshot,
        rule_suggestions: &[Suggestion],
    ) -> Vec<Suggestion>;
}

/// Enricher that adds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnricher;

#[async_trait]
impl SuggestionEnricher for NoopEnricher {
    async fn enrich(&self, _: &InvestigationSnapshot, _: &[Suggestion]) -> Vec<Suggestion> {
        Vec::new()
    }
}

/// Produces ranked suggestions for one thought on one board.
pub struct SuggestionEngine<S: Storage> {
    storage: S,
    rules: RuleSet,
    enricher: Box<dyn SuggestionEnricher>,
}

impl<S: Storage> SuggestionEngine<S> {
    /// Engine with the builtin rules and no enrichment.
    pub fn new(storage: S) -> Self {
        Self::with_rules(storage, RuleSet::builtin())
    }

    /// Engine with a custom rule set.
    pub fn with_rules(storage: S, rules: RuleSet) -> Self {
        Self {
            storage,
            rules,
            enricher: Box::new(NoopEnricher),
        }
    }

    /// Replace the enricher.
    pub fn with_enricher(mut self, enricher: impl SuggestionEnricher + 'static) -> Self {
        self.enricher = Box::new(enricher);
        self
    }

    /// The active rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Generate suggestions for a thought.
    ///
    /// An unknown board or thought yields an empty list; callers that need to
    /// report a missing record must check for it first. Storage failures are
    /// returned unchanged.
    pub async fn generate(
        &self,
        board_id: &str,
        thought_id: &str,
        feedback: &FeedbackMemory,
    ) -> StorageResult<Vec<Suggestion>> {
        let start = Instant::now();

        let Some(records) = self.storage.load_board(board_id).await? else {
            debug!(board_id = %board_id, "Board not found, no suggestions");
            return Ok(Vec::new());
        };

        let selected = records.thought(thought_id);
        let Some(snapshot) = build_snapshot(
            &records.board,
            selected,
            &records.thoughts,
            &records.evidence,
            &records.evidence_links,
            &records.connections,
            feedback,
        ) else {
            debug!(board_id = %board_id, thought_id = %thought_id, "Thought not found, no suggestions");
            return Ok(Vec::new());
        };

        let suggestions = self.suggest(&snapshot, feedback).await;

        info!(
            board_id = %board_id,
            thought_id = %thought_id,
            count = suggestions.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Suggestions generated"
        );

        Ok(suggestions)
    }

    /// Evaluate rules and enrichment over an already built snapshot.
    pub async fn suggest(
        &self,
        snapshot: &InvestigationSnapshot,
        feedback: &FeedbackMemory,
    ) -> Vec<Suggestion> {
        let mut candidates = self.rules.evaluate(snapshot);
        let extra = self.enricher.enrich(snapshot, &candidates).await;
        if !extra.is_empty() {
            debug!(count = extra.len(), "Enricher added suggestions");
            candidates.extend(extra);
        }
        rank(&candidates, feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Board, SqliteStorage, Thought, ThoughtType};
    use crate::suggestions::types::{Priority, SuggestionAction, SuggestionCategory};

    struct FixedEnricher;

    #[async_trait]
    impl SuggestionEnricher for FixedEnricher {
        async fn enrich(&self, snapshot: &InvestigationSnapshot, _: &[Suggestion]) -> Vec<Suggestion> {
            vec![Suggestion {
                id: format!("model-review-{}", snapshot.thought.id),
                title: "Review timeline".to_string(),
                why: "Extra".to_string(),
                action: SuggestionAction::AddChecklist {
                    thought_id: snapshot.thought.id.clone(),
                    task: "Review timeline".to_string(),
                },
                priority: Priority::LOWEST,
                category: SuggestionCategory::BoardHealth,
            }]
        }
    }

    async fn storage_with_hypothesis() -> SqliteStorage {
        let storage = SqliteStorage::new_in_memory().await.unwrap();
        storage
            .create_board(&Board::new("Board", "user-1").with_id("b1"))
            .await
            .unwrap();
        storage
            .create_thought(&Thought::new("b1", ThoughtType::Hypothesis, "Scam").with_id("t1"))
            .await
            .unwrap();
        storage
    }

    #[tokio::test]
    async fn test_unknown_board_or_thought_is_empty() {
        let engine = SuggestionEngine::new(storage_with_hypothesis().await);
        let feedback = FeedbackMemory::default();

        assert!(engine.generate("nope", "t1", &feedback).await.unwrap().is_empty());
        assert!(engine.generate("b1", "nope", &feedback).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_enricher_output_is_ranked_with_rules() {
        let engine = SuggestionEngine::new(storage_with_hypothesis().await).with_enricher(FixedEnricher);
        let out = engine
            .generate("b1", "t1", &FeedbackMemory::default())
            .await
            .unwrap();

        let ids: Vec<_> = out.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["rule-no-support-t1", "model-review-t1"]);
    }

    #[tokio::test]
    async fn test_ignored_enriched_suggestion_is_dropped() {
        let engine = SuggestionEngine::new(storage_with_hypothesis().await).with_enricher(FixedEnricher);
        let feedback = FeedbackMemory::default().with_ignored("model-review-t1");
        let out = engine.generate("b1", "t1", &feedback).await.unwrap();
        assert_eq!(out.len(), 1);
    }
}

//! Proactive suggestion engine.
//!
//! Given one selected thought on a board, the engine:
//! - builds a denormalized [`InvestigationSnapshot`] of the thought and its evidence
//! - runs the ordered [`RuleSet`] over it, each rule proposing at most one suggestion
//! - drops ignored suggestions, sorts by priority and keeps the top [`MAX_SUGGESTIONS`]
//!
//! Everything except the initial storage read is pure.

mod engine;
mod ranker;
mod rules;
mod snapshot;
mod types;

pub use engine::{NoopEnricher, SuggestionEngine, SuggestionEnricher};
pub use ranker::{rank, MAX_SUGGESTIONS};
pub use rules::{suggestion_id, FnRule, Proposal, Rule, RuleSet};
pub use snapshot::{
    build_snapshot, BoardSummary, ContextEvidence, ContradictingEvidence, EvidenceSummary,
    ExtractedEntities, InvestigationSnapshot, LinkedThought, SupportingEvidence, ThoughtSummary,
};
pub use types::{
    FeedbackMemory, Priority, Suggestion, SuggestionAction, SuggestionCategory, ToolKind,
};

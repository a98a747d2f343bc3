//! Integration tests for the suggestion engine
//!
//! Builds boards in an in-memory store and checks the ranked suggestions the
//! engine returns for a selected thought.

use pretty_assertions::assert_eq;

use mcp_osint_board::seed::{seed_demo_board, DEMO_BOARD_ID};
use mcp_osint_board::storage::{
    Board, Connection, ConnectionType, EntityKind, Evidence, EvidenceLink, EvidenceRelation,
    EvidenceSourceType, Reliability, SqliteStorage, Storage, Thought, ThoughtStatus, ThoughtType,
};
use mcp_osint_board::suggestions::{
    FeedbackMemory, Priority, Suggestion, SuggestionAction, SuggestionCategory, SuggestionEngine,
    ToolKind, MAX_SUGGESTIONS,
};

async fn board_store() -> SqliteStorage {
    let storage = SqliteStorage::new_in_memory()
        .await
        .expect("Failed to create in-memory storage");
    storage
        .create_board(&Board::new("Test investigation", "u1").with_id("b1"))
        .await
        .unwrap();
    storage
}

async fn add_evidence(storage: &SqliteStorage, evidence: Evidence) {
    storage.create_evidence(&evidence).await.unwrap();
}

async fn link(
    storage: &SqliteStorage,
    thought: &str,
    evidence: &str,
    relation: EvidenceRelation,
    is_key: bool,
) {
    storage
        .create_evidence_link(&EvidenceLink::new(thought, evidence, relation).with_key(is_key))
        .await
        .unwrap();
}

async fn suggestions_for(storage: SqliteStorage, thought_id: &str) -> Vec<Suggestion> {
    SuggestionEngine::new(storage)
        .generate("b1", thought_id, &FeedbackMemory::default())
        .await
        .unwrap()
}

fn ids(suggestions: &[Suggestion]) -> Vec<&str> {
    suggestions.iter().map(|s| s.id.as_str()).collect()
}

#[tokio::test]
async fn test_contradicted_confident_claim() {
    let storage = board_store().await;
    storage
        .create_thought(
            &Thought::new("b1", ThoughtType::Claim, "Site is a scam")
                .with_id("t1")
                .with_confidence(85),
        )
        .await
        .unwrap();
    add_evidence(
        &storage,
        Evidence::new("b1", EvidenceSourceType::Url, "Payment page")
            .with_id("e1")
            .with_reliability(Reliability::High),
    )
    .await;
    add_evidence(
        &storage,
        Evidence::new("b1", EvidenceSourceType::Note, "Vendor statement")
            .with_id("e2")
            .with_reliability(Reliability::Medium),
    )
    .await;
    link(&storage, "t1", "e1", EvidenceRelation::Supports, true).await;
    link(&storage, "t1", "e2", EvidenceRelation::Contradicts, false).await;

    let suggestions = suggestions_for(storage, "t1").await;

    let contradiction = suggestions
        .iter()
        .find(|s| s.category == SuggestionCategory::Contradiction)
        .expect("contradiction suggestion");
    assert_eq!(contradiction.title, "Resolve contradiction in evidence");
    assert_eq!(contradiction.priority, Priority::URGENT);
    assert_eq!(
        contradiction.why,
        "This thought has 1 supporting and 1 contradicting evidence. Address this conflict before proceeding."
    );

    assert!(!ids(&suggestions).contains(&"rule-no-support-t1"));
    assert!(!ids(&suggestions).contains(&"rule-no-key-t1"));
}

#[tokio::test]
async fn test_bare_hypothesis_without_confidence() {
    let storage = board_store().await;
    storage
        .create_thought(
            &Thought::new("b1", ThoughtType::Hypothesis, "Operator is a reseller").with_id("t1"),
        )
        .await
        .unwrap();

    let suggestions = suggestions_for(storage, "t1").await;

    assert_eq!(ids(&suggestions), vec!["rule-no-support-t1"]);
    assert_eq!(suggestions[0].priority, Priority::URGENT);
    assert_eq!(suggestions[0].category, SuggestionCategory::EvidenceGap);
    assert_eq!(
        suggestions[0].action,
        SuggestionAction::AddEvidence {
            thought_id: "t1".to_string(),
            relation: EvidenceRelation::Supports,
        }
    );
}

#[tokio::test]
async fn test_question_with_single_connection() {
    let storage = board_store().await;
    for thought in [
        Thought::new("b1", ThoughtType::Question, "Who runs the site?").with_id("q1"),
        Thought::new("b1", ThoughtType::Hypothesis, "A known crew").with_id("h1"),
        Thought::new("b1", ThoughtType::Hypothesis, "A first-time actor").with_id("h2"),
    ] {
        storage.create_thought(&thought).await.unwrap();
    }
    storage
        .create_connection(&Connection::new("b1", "q1", "h1", ConnectionType::Related))
        .await
        .unwrap();

    let engine = SuggestionEngine::new(storage.clone());
    let feedback = FeedbackMemory::default();

    let first = engine.generate("b1", "q1", &feedback).await.unwrap();
    assert_eq!(ids(&first), vec!["rule-alt-hypothesis-q1"]);
    assert_eq!(first[0].category, SuggestionCategory::Alternative);

    storage
        .create_connection(&Connection::new("b1", "h2", "q1", ConnectionType::Related))
        .await
        .unwrap();

    let second = engine.generate("b1", "q1", &feedback).await.unwrap();
    assert!(second.is_empty());
}

#[tokio::test]
async fn test_domain_profiler_uses_first_domain() {
    let storage = board_store().await;
    storage
        .create_thought(&Thought::new("b1", ThoughtType::Observation, "Two lookalike domains").with_id("t1"))
        .await
        .unwrap();
    add_evidence(
        &storage,
        Evidence::new("b1", EvidenceSourceType::Url, "Homepage capture")
            .with_id("e1")
            .with_entity(EntityKind::Domain, "first-example.com")
            .with_entity(EntityKind::Domain, "second-example.com"),
    )
    .await;
    link(&storage, "t1", "e1", EvidenceRelation::Context, false).await;

    let suggestions = suggestions_for(storage, "t1").await;

    let profiles: Vec<_> = suggestions
        .iter()
        .filter(|s| matches!(s.action, SuggestionAction::RunTool { tool: ToolKind::DomainProfiler, .. }))
        .collect();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].title, "Run domain profiler on first-example.com");
}

#[tokio::test]
async fn test_domain_profiler_skipped_after_whois() {
    let storage = board_store().await;
    storage
        .create_thought(&Thought::new("b1", ThoughtType::Observation, "Lookalike domain").with_id("t1"))
        .await
        .unwrap();
    add_evidence(
        &storage,
        Evidence::new("b1", EvidenceSourceType::Profiler, "WHOIS Lookup")
            .with_id("e1")
            .with_entity(EntityKind::Domain, "lookalike.com"),
    )
    .await;
    link(&storage, "t1", "e1", EvidenceRelation::Supports, false).await;

    let suggestions = suggestions_for(storage, "t1").await;
    assert!(suggestions.is_empty(), "{:?}", ids(&suggestions));
}

#[tokio::test]
async fn test_contradiction_and_supported_without_key_co_fire() {
    let storage = board_store().await;
    storage
        .create_thought(
            &Thought::new("b1", ThoughtType::Claim, "Same operator")
                .with_id("t1")
                .with_status(ThoughtStatus::Supported),
        )
        .await
        .unwrap();
    add_evidence(&storage, Evidence::new("b1", EvidenceSourceType::Note, "Shared wallet").with_id("e1")).await;
    add_evidence(&storage, Evidence::new("b1", EvidenceSourceType::Note, "Different language").with_id("e2")).await;
    link(&storage, "t1", "e1", EvidenceRelation::Supports, false).await;
    link(&storage, "t1", "e2", EvidenceRelation::Contradicts, false).await;

    let suggestions = suggestions_for(storage, "t1").await;

    assert_eq!(
        ids(&suggestions),
        vec!["rule-contradiction-t1", "rule-supported-no-key-t1"]
    );
}

/// A claim that trips eight rules at once.
async fn overloaded_claim() -> SqliteStorage {
    let storage = board_store().await;
    storage
        .create_thought(
            &Thought::new("b1", ThoughtType::Claim, "Linked to prior case")
                .with_id("t1")
                .with_confidence(90)
                .with_status(ThoughtStatus::Supported),
        )
        .await
        .unwrap();
    add_evidence(
        &storage,
        Evidence::new("b1", EvidenceSourceType::Note, "Forum post")
            .with_id("e1")
            .with_reliability(Reliability::Low)
            .with_entity(EntityKind::Domain, "refund-desk.net")
            .with_entity(EntityKind::Ip, "203.0.113.7")
            .with_entity(EntityKind::Phone, "+1-555-0199"),
    )
    .await;
    add_evidence(&storage, Evidence::new("b1", EvidenceSourceType::Note, "Reseller note").with_id("e2")).await;
    link(&storage, "t1", "e1", EvidenceRelation::Supports, false).await;
    link(&storage, "t1", "e2", EvidenceRelation::Contradicts, false).await;
    storage
}

#[tokio::test]
async fn test_ranking_caps_and_orders() {
    let storage = overloaded_claim().await;
    let suggestions = suggestions_for(storage, "t1").await;

    assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
    assert!(suggestions
        .windows(2)
        .all(|w| w[0].priority >= w[1].priority));
    assert_eq!(suggestions[0].priority.value(), 5);
    assert_eq!(suggestions[MAX_SUGGESTIONS - 1].priority.value(), 3);
    assert_eq!(
        ids(&suggestions),
        vec![
            "rule-contradiction-t1",
            "rule-supported-no-key-t1",
            "rule-no-key-t1",
            "rule-weak-evidence-t1",
            "rule-phone-search-t1",
            "rule-domain-profile-t1",
            "rule-ip-profile-t1",
        ]
    );
}

#[tokio::test]
async fn test_ignored_suggestions_are_removed() {
    let storage = overloaded_claim().await;
    let engine = SuggestionEngine::new(storage);

    let feedback = FeedbackMemory::default()
        .with_ignored("rule-contradiction-t1")
        .with_ignored("rule-phone-search-t1");
    let suggestions = engine.generate("b1", "t1", &feedback).await.unwrap();

    assert_eq!(suggestions.len(), 6);
    assert!(!ids(&suggestions).contains(&"rule-contradiction-t1"));
    assert!(!ids(&suggestions).contains(&"rule-phone-search-t1"));
    // The cap now leaves room for the lowest-ranked rule
    assert!(ids(&suggestions).contains(&"rule-high-conf-limited-t1"));
}

#[tokio::test]
async fn test_generation_is_idempotent() {
    let storage = overloaded_claim().await;
    let engine = SuggestionEngine::new(storage);
    let feedback = FeedbackMemory::default();

    let first = engine.generate("b1", "t1", &feedback).await.unwrap();
    let second = engine.generate("b1", "t1", &feedback).await.unwrap();

    assert_eq!(first, second);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.content(), b.content());
    }
}

#[tokio::test]
async fn test_unknown_ids_fail_soft() {
    let storage = board_store().await;
    let engine = SuggestionEngine::new(storage);
    let feedback = FeedbackMemory::default();

    assert!(engine.generate("missing", "t1", &feedback).await.unwrap().is_empty());
    assert!(engine.generate("b1", "missing", &feedback).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_thought_from_other_board_is_not_analysed() {
    let storage = board_store().await;
    storage
        .create_board(&Board::new("Other", "u1").with_id("b2"))
        .await
        .unwrap();
    storage
        .create_thought(&Thought::new("b2", ThoughtType::Claim, "Elsewhere").with_id("t9"))
        .await
        .unwrap();

    let suggestions = suggestions_for(storage, "t9").await;
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn test_demo_board_phone_claim() {
    let storage = SqliteStorage::new_in_memory().await.unwrap();
    assert!(seed_demo_board(&storage).await.unwrap());
    assert!(!seed_demo_board(&storage).await.unwrap(), "seeding twice is a no-op");

    let suggestions = SuggestionEngine::new(storage)
        .generate(DEMO_BOARD_ID, "thought-3", &FeedbackMemory::default())
        .await
        .unwrap();

    assert_eq!(
        ids(&suggestions),
        vec![
            "rule-contradiction-thought-3",
            "rule-phone-search-thought-3",
            "rule-ip-profile-thought-3",
            "rule-high-conf-limited-thought-3",
        ]
    );
    assert_eq!(
        suggestions[1].title,
        "Search for phone number +1-555-0123 across cases"
    );
    assert_eq!(suggestions[2].title, "Analyze IP address 192.168.1.100");
}

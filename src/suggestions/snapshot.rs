//! Denormalized view of one selected thought, built from a board's raw records.

use std::collections::HashMap;

use serde::Serialize;

use super::FeedbackMemory;
use crate::storage::{
    Board, Connection, ConnectionType, EntityKind, Evidence, EvidenceLink, EvidenceRelation,
    Reliability, Thought, ThoughtStatus, ThoughtType,
};

/// Board-level aggregates, computed over every thought on the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSummary {
    /// Board ID.
    pub id: String,
    /// Board title.
    pub title: String,
    /// Thoughts that are open or under investigation.
    pub unresolved_thought_count: usize,
    /// Thoughts with at least one supporting and one contradicting link.
    pub conflicted_thought_count: usize,
}

/// Unique entity values found in the selected thought's evidence, by type.
///
/// Values keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedEntities {
    /// Domain names.
    pub domains: Vec<String>,
    /// IP addresses.
    pub ips: Vec<String>,
    /// Phone numbers.
    pub phones: Vec<String>,
    /// Email addresses.
    pub emails: Vec<String>,
    /// Social media or forum handles.
    pub handles: Vec<String>,
}

impl ExtractedEntities {
    fn insert(&mut self, kind: EntityKind, value: &str) {
        let bucket = match kind {
            EntityKind::Domain => &mut self.domains,
            EntityKind::Ip => &mut self.ips,
            EntityKind::Phone => &mut self.phones,
            EntityKind::Email => &mut self.emails,
            EntityKind::Handle => &mut self.handles,
        };
        if !bucket.iter().any(|v| v == value) {
            bucket.push(value.to_string());
        }
    }

    /// Whether no entity of any type was found.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
            && self.ips.is_empty()
            && self.phones.is_empty()
            && self.emails.is_empty()
            && self.handles.is_empty()
    }
}

/// A thought connected to the selected one, in either direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedThought {
    /// ID of the other thought.
    pub id: String,
    /// Type of the connecting edge.
    pub relation_type: ConnectionType,
    /// Title of the other thought.
    pub title: String,
}

/// The selected thought and what hangs off it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThoughtSummary {
    /// Thought ID.
    pub id: String,
    /// Kind of thought.
    pub thought_type: ThoughtType,
    /// Thought title.
    pub title: String,
    /// Thought body.
    pub body: String,
    /// Investigation status.
    pub status: ThoughtStatus,
    /// Confidence percentage, if set.
    pub confidence: Option<u8>,
    /// Entities from evidence linked under any relation.
    pub extracted_entities: ExtractedEntities,
    /// Thoughts connected in either direction.
    pub linked_thoughts: Vec<LinkedThought>,
}

/// A supporting evidence item as seen through its link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupportingEvidence {
    /// Evidence ID.
    pub id: String,
    /// Evidence title.
    pub title: String,
    /// Source reliability.
    pub reliability: Reliability,
    /// Whether the link is marked as key.
    pub is_key: bool,
}

/// A contradicting evidence item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContradictingEvidence {
    /// Evidence ID.
    pub id: String,
    /// Evidence title.
    pub title: String,
    /// Source reliability.
    pub reliability: Reliability,
}

/// A context evidence item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextEvidence {
    /// Evidence ID.
    pub id: String,
    /// Evidence title.
    pub title: String,
}

/// The selected thought's evidence, grouped by relation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvidenceSummary {
    /// Linked as supporting.
    pub supporting: Vec<SupportingEvidence>,
    /// Linked as contradicting.
    pub contradicting: Vec<ContradictingEvidence>,
    /// Linked as context.
    pub context: Vec<ContextEvidence>,
}

impl EvidenceSummary {
    /// Titles of supporting and context evidence, the items that count as
    /// analysis already attached to the thought.
    pub fn attached_titles(&self) -> impl Iterator<Item = &str> {
        self.supporting
            .iter()
            .map(|e| e.title.as_str())
            .chain(self.context.iter().map(|e| e.title.as_str()))
    }
}

/// Read-only input to rule evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestigationSnapshot {
    /// Board-level aggregates.
    pub board: BoardSummary,
    /// The selected thought.
    pub thought: ThoughtSummary,
    /// The selected thought's evidence.
    pub evidence: EvidenceSummary,
    /// Caller-supplied feedback.
    pub feedback: FeedbackMemory,
}

impl InvestigationSnapshot {
    /// Number of supporting items.
    pub fn supporting_count(&self) -> usize {
        self.evidence.supporting.len()
    }

    /// Number of contradicting items.
    pub fn contradicting_count(&self) -> usize {
        self.evidence.contradicting.len()
    }

    /// Number of context items.
    pub fn context_count(&self) -> usize {
        self.evidence.context.len()
    }

    /// Number of supporting items marked as key.
    pub fn key_supporting_count(&self) -> usize {
        self.evidence.supporting.iter().filter(|e| e.is_key).count()
    }
}

/// Project a board's records into a snapshot centred on `selected`.
///
/// Returns `None` when no thought is selected. Links whose evidence is gone
/// and connections whose other endpoint is gone are skipped. Inputs are only
/// read.
pub fn build_snapshot(
    board: &Board,
    selected: Option<&Thought>,
    thoughts: &[Thought],
    evidence: &[Evidence],
    links: &[EvidenceLink],
    connections: &[Connection],
    feedback: &FeedbackMemory,
) -> Option<InvestigationSnapshot> {
    let selected = selected?;

    let evidence_by_id: HashMap<&str, &Evidence> =
        evidence.iter().map(|e| (e.id.as_str(), e)).collect();
    let thoughts_by_id: HashMap<&str, &Thought> =
        thoughts.iter().map(|t| (t.id.as_str(), t)).collect();

    let mut summary = EvidenceSummary::default();
    let mut entities = ExtractedEntities::default();

    for link in links.iter().filter(|l| l.node_id == selected.id) {
        let Some(item) = evidence_by_id.get(link.evidence_id.as_str()) else {
            continue;
        };

        match link.relation {
            EvidenceRelation::Supports => summary.supporting.push(SupportingEvidence {
                id: item.id.clone(),
                title: item.title.clone(),
                reliability: item.reliability,
                is_key: link.is_key,
            }),
            EvidenceRelation::Contradicts => summary.contradicting.push(ContradictingEvidence {
                id: item.id.clone(),
                title: item.title.clone(),
                reliability: item.reliability,
            }),
            EvidenceRelation::Context => summary.context.push(ContextEvidence {
                id: item.id.clone(),
                title: item.title.clone(),
            }),
        }

        for entity in &item.extracted_entities {
            entities.insert(entity.kind, &entity.value);
        }
    }

    let linked_thoughts = connections
        .iter()
        .filter_map(|c| {
            let other = thoughts_by_id.get(c.other_endpoint(&selected.id)?)?;
            Some(LinkedThought {
                id: other.id.clone(),
                relation_type: c.connection_type,
                title: other.title.clone(),
            })
        })
        .collect();

    Some(InvestigationSnapshot {
        board: BoardSummary {
            id: board.id.clone(),
            title: board.title.clone(),
            unresolved_thought_count: thoughts.iter().filter(|t| t.status.is_unresolved()).count(),
            conflicted_thought_count: count_conflicted(thoughts, links),
        },
        thought: ThoughtSummary {
            id: selected.id.clone(),
            thought_type: selected.thought_type,
            title: selected.title.clone(),
            body: selected.body.clone(),
            status: selected.status,
            confidence: selected.confidence,
            extracted_entities: entities,
            linked_thoughts,
        },
        evidence: summary,
        feedback: feedback.clone(),
    })
}

/// Thoughts that carry both a supporting and a contradicting link of their own.
fn count_conflicted(thoughts: &[Thought], links: &[EvidenceLink]) -> usize {
    let mut relations: HashMap<&str, (bool, bool)> = HashMap::new();
    for link in links {
        let entry = relations.entry(link.node_id.as_str()).or_default();
        match link.relation {
            EvidenceRelation::Supports => entry.0 = true,
            EvidenceRelation::Contradicts => entry.1 = true,
            EvidenceRelation::Context => {}
        }
    }

    thoughts
        .iter()
        .filter(|t| matches!(relations.get(t.id.as_str()), Some((true, true))))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{EvidenceSourceType, ThoughtType};
    use pretty_assertions::assert_eq;

    fn board() -> Board {
        Board::new("Refund scam", "user-1").with_id("board-1")
    }

    fn thought(id: &str, thought_type: ThoughtType) -> Thought {
        Thought::new("board-1", thought_type, format!("Thought {}", id)).with_id(id)
    }

    fn evidence(id: &str, title: &str) -> Evidence {
        Evidence::new("board-1", EvidenceSourceType::Note, title).with_id(id)
    }

    #[test]
    fn test_no_selection_yields_none() {
        let snapshot = build_snapshot(
            &board(),
            None,
            &[],
            &[],
            &[],
            &[],
            &FeedbackMemory::default(),
        );
        assert!(snapshot.is_none());
    }

    #[test]
    fn test_partitions_links_by_relation() {
        let selected = thought("t1", ThoughtType::Claim);
        let items = vec![
            evidence("e1", "WHOIS record").with_reliability(Reliability::High),
            evidence("e2", "User report"),
            evidence("e3", "Archive capture"),
        ];
        let links = vec![
            EvidenceLink::new("t1", "e1", EvidenceRelation::Supports).with_key(true),
            EvidenceLink::new("t1", "e2", EvidenceRelation::Contradicts),
            EvidenceLink::new("t1", "e3", EvidenceRelation::Context),
            EvidenceLink::new("t2", "e3", EvidenceRelation::Supports),
        ];

        let snapshot = build_snapshot(
            &board(),
            Some(&selected),
            &[selected.clone()],
            &items,
            &links,
            &[],
            &FeedbackMemory::default(),
        )
        .unwrap();

        assert_eq!(snapshot.supporting_count(), 1);
        assert_eq!(snapshot.contradicting_count(), 1);
        assert_eq!(snapshot.context_count(), 1);
        assert_eq!(snapshot.key_supporting_count(), 1);
        assert_eq!(snapshot.evidence.supporting[0].reliability, Reliability::High);
    }

    #[test]
    fn test_dangling_evidence_link_is_dropped() {
        let selected = thought("t1", ThoughtType::Hypothesis);
        let links = vec![
            EvidenceLink::new("t1", "missing", EvidenceRelation::Supports),
            EvidenceLink::new("t1", "also-missing", EvidenceRelation::Contradicts),
        ];

        let snapshot = build_snapshot(
            &board(),
            Some(&selected),
            &[selected.clone()],
            &[],
            &links,
            &[],
            &FeedbackMemory::default(),
        )
        .unwrap();

        assert_eq!(snapshot.evidence, EvidenceSummary::default());
    }

    #[test]
    fn test_entities_are_deduplicated_in_first_seen_order() {
        let selected = thought("t1", ThoughtType::Claim);
        let items = vec![
            evidence("e1", "Scrape")
                .with_entity(EntityKind::Domain, "b.example")
                .with_entity(EntityKind::Domain, "a.example")
                .with_entity(EntityKind::Ip, "203.0.113.7"),
            evidence("e2", "Second scrape")
                .with_entity(EntityKind::Domain, "a.example")
                .with_entity(EntityKind::Phone, "+1 555 0100"),
        ];
        let links = vec![
            EvidenceLink::new("t1", "e1", EvidenceRelation::Context),
            EvidenceLink::new("t1", "e2", EvidenceRelation::Contradicts),
        ];

        let snapshot = build_snapshot(
            &board(),
            Some(&selected),
            &[selected.clone()],
            &items,
            &links,
            &[],
            &FeedbackMemory::default(),
        )
        .unwrap();

        let entities = &snapshot.thought.extracted_entities;
        assert_eq!(entities.domains, vec!["b.example", "a.example"]);
        assert_eq!(entities.ips, vec!["203.0.113.7"]);
        assert_eq!(entities.phones, vec!["+1 555 0100"]);
        assert!(entities.emails.is_empty());
    }

    #[test]
    fn test_linked_thoughts_are_undirected_and_skip_missing() {
        let selected = thought("t1", ThoughtType::Question);
        let others = vec![
            selected.clone(),
            thought("t2", ThoughtType::Hypothesis),
            thought("t3", ThoughtType::Hypothesis),
        ];
        let connections = vec![
            Connection::new("board-1", "t1", "t2", ConnectionType::Related),
            Connection::new("board-1", "t3", "t1", ConnectionType::Supports),
            Connection::new("board-1", "t1", "gone", ConnectionType::Related),
            Connection::new("board-1", "t2", "t3", ConnectionType::Related),
        ];

        let snapshot = build_snapshot(
            &board(),
            Some(&selected),
            &others,
            &[],
            &[],
            &connections,
            &FeedbackMemory::default(),
        )
        .unwrap();

        let linked: Vec<_> = snapshot
            .thought
            .linked_thoughts
            .iter()
            .map(|l| (l.id.as_str(), l.relation_type))
            .collect();
        assert_eq!(
            linked,
            vec![
                ("t2", ConnectionType::Related),
                ("t3", ConnectionType::Supports)
            ]
        );
    }

    #[test]
    fn test_board_aggregates_cover_every_thought() {
        let selected = thought("t1", ThoughtType::Question).with_status(ThoughtStatus::Open);
        let thoughts = vec![
            selected.clone(),
            thought("t2", ThoughtType::Claim).with_status(ThoughtStatus::Investigating),
            thought("t3", ThoughtType::Claim).with_status(ThoughtStatus::Supported),
        ];
        let links = vec![
            EvidenceLink::new("t2", "e1", EvidenceRelation::Supports),
            EvidenceLink::new("t2", "e2", EvidenceRelation::Contradicts),
            EvidenceLink::new("t3", "e1", EvidenceRelation::Supports),
            EvidenceLink::new("t3", "e2", EvidenceRelation::Context),
        ];

        let snapshot = build_snapshot(
            &board(),
            Some(&selected),
            &thoughts,
            &[],
            &links,
            &[],
            &FeedbackMemory::default(),
        )
        .unwrap();

        assert_eq!(snapshot.board.unresolved_thought_count, 2);
        assert_eq!(snapshot.board.conflicted_thought_count, 1);
    }
}

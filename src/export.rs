//! Case draft export.
//!
//! Turns a board into a short case report: a summary line, every claim with
//! its key supporting evidence, the questions still open and the board dates.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::storage::{BoardRecords, EvidenceRelation, ThoughtStatus, ThoughtType};

/// A claim as it appears in the case draft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    /// Claim thought ID.
    pub thought_id: String,
    /// Claim title.
    pub title: String,
    /// Claim status at export time.
    pub status: ThoughtStatus,
    /// Claim confidence, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    /// Titles of evidence linked as key support.
    pub key_evidence: Vec<String>,
}

/// Case draft for one board.
#[derive(Debug, Clone, Serialize)]
pub struct CaseExport {
    /// Exported board ID.
    pub board_id: String,
    /// Board title.
    pub title: String,
    /// One-sentence overview.
    pub summary: String,
    /// Every claim on the board.
    pub findings: Vec<Finding>,
    /// Titles of questions still open.
    pub open_questions: Vec<String>,
    /// When the board was created.
    pub started: DateTime<Utc>,
    /// When the board was last updated.
    pub last_updated: DateTime<Utc>,
}

impl CaseExport {
    /// Build the draft from a board read.
    pub fn from_records(records: &BoardRecords) -> Self {
        let supported = records
            .thoughts
            .iter()
            .filter(|t| t.status == ThoughtStatus::Supported)
            .count();

        let summary = format!(
            "Investigation into {}. Analysis includes {} thoughts with {} supported findings.",
            records.board.title.to_lowercase(),
            records.thoughts.len(),
            supported
        );

        let findings = records
            .thoughts
            .iter()
            .filter(|t| t.thought_type == ThoughtType::Claim)
            .map(|claim| Finding {
                thought_id: claim.id.clone(),
                title: claim.title.clone(),
                status: claim.status,
                confidence: claim.confidence,
                key_evidence: records
                    .links_for(&claim.id)
                    .filter(|l| l.is_key && l.relation == EvidenceRelation::Supports)
                    .filter_map(|l| records.evidence_item(&l.evidence_id))
                    .map(|e| e.title.clone())
                    .collect(),
            })
            .collect();

        let open_questions = records
            .thoughts
            .iter()
            .filter(|t| t.thought_type == ThoughtType::Question && t.status == ThoughtStatus::Open)
            .map(|t| t.title.clone())
            .collect();

        Self {
            board_id: records.board.id.clone(),
            title: records.board.title.clone(),
            summary,
            findings,
            open_questions,
            started: records.board.created_at,
            last_updated: records.board.updated_at,
        }
    }

    /// Render the draft as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n## Summary\n\n{}\n\n## Key Findings\n", self.title, self.summary);

        if self.findings.is_empty() {
            out.push_str("\nNo claims recorded.\n");
        }
        for finding in &self.findings {
            out.push_str(&format!("\n### {} ({})\n", finding.title, finding.status));
            if let Some(confidence) = finding.confidence {
                out.push_str(&format!("\nConfidence: {}%\n", confidence));
            }
            if !finding.key_evidence.is_empty() {
                out.push_str("\nKey Evidence:\n");
                for title in &finding.key_evidence {
                    out.push_str(&format!("- {}\n", title));
                }
            }
        }

        if !self.open_questions.is_empty() {
            out.push_str("\n## Open Questions\n\n");
            for question in &self.open_questions {
                out.push_str(&format!("- {}\n", question));
            }
        }

        out.push_str(&format!(
            "\n## Investigation Timeline\n\nStarted: {}\nLast Updated: {}\n",
            self.started.format("%B %-d, %Y"),
            self.last_updated.format("%B %-d, %Y")
        ));
        out
    }
}

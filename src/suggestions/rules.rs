//! Rule registry and the builtin rule battery.
//!
//! Each rule inspects an [`InvestigationSnapshot`] and proposes at most one
//! suggestion. Rules never see each other's output and never fail: a rule
//! whose inputs are missing (for example a thought without a confidence)
//! simply does not fire.

use tracing::{error, trace};

use super::snapshot::InvestigationSnapshot;
use super::types::{Priority, Suggestion, SuggestionAction, SuggestionCategory, ToolKind};
use crate::storage::{EvidenceRelation, ThoughtStatus, ThoughtType};

/// Confidence above which at least one key supporting item is expected.
pub const KEY_EVIDENCE_CONFIDENCE: u8 = 70;
/// Confidence above which weak supporting evidence is flagged.
pub const WEAK_EVIDENCE_CONFIDENCE: u8 = 60;
/// Confidence above which a small evidence base is flagged.
pub const OVERCONFIDENCE_THRESHOLD: u8 = 75;
/// Supporting items needed before a high confidence is left alone.
pub const MIN_SUPPORT_FOR_HIGH_CONFIDENCE: usize = 3;
/// Confidence recommended when the evidence base is too thin.
pub const RECOMMENDED_CONFIDENCE: u8 = 65;

const DOMAIN_ANALYSIS_MARKERS: &[&str] = &["profiler", "whois", "dns"];
// "ip" also matches words like "shipping"; accepted as a known false negative.
const IP_ANALYSIS_MARKERS: &[&str] = &["ip", "hosting"];

/// What a rule proposes. The registry turns it into a [`Suggestion`] by
/// stamping a stable id.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    /// Short imperative title.
    pub title: String,
    /// What triggered the rule.
    pub why: String,
    /// Action to take.
    pub action: SuggestionAction,
    /// Urgency.
    pub priority: Priority,
    /// Kind of gap addressed.
    pub category: SuggestionCategory,
}

/// A single independent suggestion rule.
pub trait Rule: Send + Sync {
    /// Stable tag, unique within a [`RuleSet`]. Part of every suggestion id.
    fn tag(&self) -> &str;

    /// Inspect the snapshot and propose at most one suggestion.
    fn evaluate(&self, snapshot: &InvestigationSnapshot) -> Option<Proposal>;
}

/// A rule backed by a plain function.
pub struct FnRule {
    tag: &'static str,
    check: fn(&InvestigationSnapshot) -> Option<Proposal>,
}

impl FnRule {
    /// Wrap `check` as a rule tagged `tag`.
    pub const fn new(tag: &'static str, check: fn(&InvestigationSnapshot) -> Option<Proposal>) -> Self {
        Self { tag, check }
    }
}

impl Rule for FnRule {
    fn tag(&self) -> &str {
        self.tag
    }

    fn evaluate(&self, snapshot: &InvestigationSnapshot) -> Option<Proposal> {
        (self.check)(snapshot)
    }
}

/// Ordered collection of rules, evaluated in registration order.
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    /// An empty rule set.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The ten builtin rules in their declared order.
    pub fn builtin() -> Self {
        let mut set = Self::empty();
        let builtins = [
            FnRule::new("no-support", no_supporting_evidence),
            FnRule::new("no-key", confident_without_key_evidence),
            FnRule::new("contradiction", contradiction),
            FnRule::new("domain-profile", domain_profile),
            FnRule::new("ip-profile", ip_profile),
            FnRule::new("alt-hypothesis", alternative_hypothesis),
            FnRule::new("weak-evidence", weak_evidence),
            FnRule::new("phone-search", phone_search),
            FnRule::new("supported-no-key", supported_without_key_evidence),
            FnRule::new("high-conf-limited", high_confidence_limited_evidence),
        ];

        for rule in builtins {
            let tag = rule.tag;
            if let Err(e) = set.register(Box::new(rule)) {
                error!(
                    rule = tag,
                    error = %e,
                    "Failed to register builtin rule - this indicates a programming error"
                );
            }
        }
        set
    }

    /// Append a rule after the existing ones.
    ///
    /// # Errors
    /// Returns error if the tag is empty or already registered.
    pub fn register(&mut self, rule: Box<dyn Rule>) -> Result<(), String> {
        let tag = rule.tag();
        if tag.is_empty() {
            return Err("Rule tag is required".to_string());
        }
        if self.rules.iter().any(|r| r.tag() == tag) {
            return Err(format!("Rule '{}' already exists", tag));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Registered tags in evaluation order.
    pub fn tags(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.tag()).collect()
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against the snapshot, in order.
    ///
    /// Suggestion ids are `rule-<tag>-<thought id>`, so unchanged input yields
    /// identical output across calls.
    pub fn evaluate(&self, snapshot: &InvestigationSnapshot) -> Vec<Suggestion> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let proposal = rule.evaluate(snapshot)?;
                trace!(rule = rule.tag(), thought_id = %snapshot.thought.id, "Rule fired");
                Some(Suggestion {
                    id: suggestion_id(rule.tag(), &snapshot.thought.id),
                    title: proposal.title,
                    why: proposal.why,
                    action: proposal.action,
                    priority: proposal.priority,
                    category: proposal.category,
                })
            })
            .collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Stable id for a rule firing on a thought.
pub fn suggestion_id(tag: &str, thought_id: &str) -> String {
    format!("rule-{}-{}", tag, thought_id)
}

fn confidence_above(snapshot: &InvestigationSnapshot, threshold: u8) -> Option<u8> {
    snapshot.thought.confidence.filter(|c| *c > threshold)
}

fn checklist(snapshot: &InvestigationSnapshot, task: &str) -> SuggestionAction {
    SuggestionAction::AddChecklist {
        thought_id: snapshot.thought.id.clone(),
        task: task.to_string(),
    }
}

fn has_attached_title(snapshot: &InvestigationSnapshot, markers: &[&str]) -> bool {
    snapshot.evidence.attached_titles().any(|title| {
        let title = title.to_lowercase();
        markers.iter().any(|m| title.contains(m))
    })
}

fn no_supporting_evidence(s: &InvestigationSnapshot) -> Option<Proposal> {
    let kind = s.thought.thought_type;
    if !matches!(kind, ThoughtType::Hypothesis | ThoughtType::Claim) || s.supporting_count() > 0 {
        return None;
    }

    Some(Proposal {
        title: format!("Add supporting evidence for this {}", kind),
        why: format!("A {} requires supporting evidence to be validated.", kind),
        action: SuggestionAction::AddEvidence {
            thought_id: s.thought.id.clone(),
            relation: EvidenceRelation::Supports,
        },
        priority: Priority::URGENT,
        category: SuggestionCategory::EvidenceGap,
    })
}

fn confident_without_key_evidence(s: &InvestigationSnapshot) -> Option<Proposal> {
    let confidence = confidence_above(s, KEY_EVIDENCE_CONFIDENCE)?;
    if s.key_supporting_count() > 0 {
        return None;
    }

    Some(Proposal {
        title: "Mark key supporting evidence".to_string(),
        why: format!(
            "Confidence is {}% but no evidence is marked as key. Key evidence strengthens your claim.",
            confidence
        ),
        action: checklist(s, "Review and mark the strongest supporting evidence as key"),
        priority: Priority::HIGH,
        category: SuggestionCategory::Verification,
    })
}

fn contradiction(s: &InvestigationSnapshot) -> Option<Proposal> {
    if s.supporting_count() == 0 || s.contradicting_count() == 0 {
        return None;
    }

    Some(Proposal {
        title: "Resolve contradiction in evidence".to_string(),
        why: format!(
            "This thought has {} supporting and {} contradicting evidence. Address this conflict before proceeding.",
            s.supporting_count(),
            s.contradicting_count()
        ),
        action: checklist(
            s,
            "Review contradicting evidence and adjust reasoning or confidence",
        ),
        priority: Priority::URGENT,
        category: SuggestionCategory::Contradiction,
    })
}

fn domain_profile(s: &InvestigationSnapshot) -> Option<Proposal> {
    let domain = s.thought.extracted_entities.domains.first()?;
    if has_attached_title(s, DOMAIN_ANALYSIS_MARKERS) {
        return None;
    }

    Some(Proposal {
        title: format!("Run domain profiler on {}", domain),
        why: "Domain entities detected but no profiler analysis found. Technical analysis can reveal infrastructure patterns.".to_string(),
        action: SuggestionAction::RunTool {
            tool: ToolKind::DomainProfiler,
            target: domain.clone(),
        },
        priority: Priority::MEDIUM,
        category: SuggestionCategory::Verification,
    })
}

fn ip_profile(s: &InvestigationSnapshot) -> Option<Proposal> {
    let ip = s.thought.extracted_entities.ips.first()?;
    if has_attached_title(s, IP_ANALYSIS_MARKERS) {
        return None;
    }

    Some(Proposal {
        title: format!("Analyze IP address {}", ip),
        why: "IP address detected. Infrastructure analysis can reveal shared hosting or attribution clues.".to_string(),
        action: SuggestionAction::RunTool {
            tool: ToolKind::IpProfiler,
            target: ip.clone(),
        },
        priority: Priority::MEDIUM,
        category: SuggestionCategory::Verification,
    })
}

fn alternative_hypothesis(s: &InvestigationSnapshot) -> Option<Proposal> {
    if s.thought.thought_type != ThoughtType::Question || s.thought.linked_thoughts.len() != 1 {
        return None;
    }

    Some(Proposal {
        title: "Create alternative hypothesis".to_string(),
        why: "Only one hypothesis exists. Consider alternative explanations to strengthen your analysis.".to_string(),
        action: SuggestionAction::CreateThought {
            thought_type: ThoughtType::Hypothesis,
            linked_to: s.thought.id.clone(),
        },
        priority: Priority::MEDIUM,
        category: SuggestionCategory::Alternative,
    })
}

fn weak_evidence(s: &InvestigationSnapshot) -> Option<Proposal> {
    let weak = s
        .evidence
        .supporting
        .iter()
        .filter(|e| e.reliability.is_weak())
        .count();
    if weak == 0 {
        return None;
    }
    let confidence = confidence_above(s, WEAK_EVIDENCE_CONFIDENCE)?;

    Some(Proposal {
        title: "Verify evidence reliability".to_string(),
        why: format!(
            "{} supporting evidence items have low/unknown reliability. This may not justify {}% confidence.",
            weak, confidence
        ),
        action: checklist(s, "Review and update reliability ratings for supporting evidence"),
        priority: Priority::HIGH,
        category: SuggestionCategory::Verification,
    })
}

fn phone_search(s: &InvestigationSnapshot) -> Option<Proposal> {
    let phone = s.thought.extracted_entities.phones.first()?;

    Some(Proposal {
        title: format!("Search for phone number {} across cases", phone),
        why: "Phone number reuse is a strong attribution signal. Cross-referencing can reveal patterns.".to_string(),
        action: SuggestionAction::RunTool {
            tool: ToolKind::PhoneSearch,
            target: phone.clone(),
        },
        priority: Priority::HIGH,
        category: SuggestionCategory::Verification,
    })
}

fn supported_without_key_evidence(s: &InvestigationSnapshot) -> Option<Proposal> {
    if s.thought.status != ThoughtStatus::Supported || s.key_supporting_count() > 0 {
        return None;
    }

    Some(Proposal {
        title: "Mark key evidence for supported claim".to_string(),
        why: "This claim is marked as Supported but has no key evidence. Key evidence is required for export.".to_string(),
        action: checklist(s, "Identify and mark the strongest evidence as key"),
        priority: Priority::URGENT,
        category: SuggestionCategory::EvidenceGap,
    })
}

fn high_confidence_limited_evidence(s: &InvestigationSnapshot) -> Option<Proposal> {
    let confidence = confidence_above(s, OVERCONFIDENCE_THRESHOLD)?;
    if s.supporting_count() >= MIN_SUPPORT_FOR_HIGH_CONFIDENCE {
        return None;
    }

    Some(Proposal {
        title: "Consider lowering confidence or adding more evidence".to_string(),
        why: format!(
            "{}% confidence with only {} supporting evidence items may be overconfident.",
            confidence,
            s.supporting_count()
        ),
        action: SuggestionAction::AdjustConfidence {
            thought_id: s.thought.id.clone(),
            recommended_confidence: RECOMMENDED_CONFIDENCE,
            reason: "Limited evidence quantity".to_string(),
        },
        priority: Priority::MEDIUM,
        category: SuggestionCategory::Verification,
    })
}

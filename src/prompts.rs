//! System prompts for the investigation chat assistant.

use crate::chat::ThoughtContext;

/// Opening of every chat system prompt.
pub const INVESTIGATION_ASSISTANT_PROMPT: &str = "You are an AI assistant helping with OSINT (Open Source Intelligence) investigations.

Context: You are analyzing an investigation board where investigators create Thoughts (Questions, Hypotheses, Claims, Observations) and attach Evidence that either Supports, Contradicts, or provides Context.";

/// Role and response guidance appended after the thought context.
pub const ASSISTANT_ROLE_PROMPT: &str = "Your role:
- Help investigators think critically about their analysis
- Suggest next investigation steps
- Identify gaps, contradictions, and patterns
- Recommend confidence adjustments based on evidence strength
- Propose new thoughts or evidence to gather
- Be cautious and analytical, not definitive

Always structure your responses to be actionable and specific to OSINT investigations.";

/// Build the system prompt, embedding the selected thought when there is one.
pub fn investigation_system_prompt(context: Option<&ThoughtContext>) -> String {
    let mut prompt = String::from(INVESTIGATION_ASSISTANT_PROMPT);
    prompt.push_str("\n\n");

    if let Some(ctx) = context {
        let confidence = ctx
            .confidence
            .map(|c| format!("{}%", c))
            .unwrap_or_else(|| "not set".to_string());
        prompt.push_str(&format!(
            "Current Thought: {}\nType: {}\nDescription: {}\nConfidence: {}\n\nEvidence Summary:\n{}\n\n",
            ctx.title, ctx.thought_type, ctx.body, confidence, ctx.evidence_summary
        ));
    }

    prompt.push_str(ASSISTANT_ROLE_PROMPT);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ThoughtType;

    #[test]
    fn test_prompt_without_context() {
        let prompt = investigation_system_prompt(None);
        assert!(prompt.starts_with("You are an AI assistant helping with OSINT"));
        assert!(prompt.ends_with("specific to OSINT investigations."));
        assert!(!prompt.contains("Current Thought"));
    }

    #[test]
    fn test_prompt_embeds_context() {
        let context = ThoughtContext {
            title: "Brand impersonation".to_string(),
            thought_type: ThoughtType::Hypothesis,
            body: "Lookalike domain".to_string(),
            confidence: None,
            evidence_summary: "No evidence attached.".to_string(),
        };
        let prompt = investigation_system_prompt(Some(&context));
        assert!(prompt.contains("Current Thought: Brand impersonation\nType: hypothesis"));
        assert!(prompt.contains("Confidence: not set"));
        assert!(prompt.contains("Evidence Summary:\nNo evidence attached."));
    }
}

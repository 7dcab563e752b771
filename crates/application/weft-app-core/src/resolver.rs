use weft_core::{chains, sources, EventKind, PipelineSpec, StageDefinition};

use crate::ports::IntentResolver;

/// Fixed demo resolver: every intent maps to the same four-stage DAO
/// proposal walkthrough. A real deployment would parse and route intents
/// here.
pub struct DemoIntentResolver {
    instant: bool,
}

impl DemoIntentResolver {
    pub fn new() -> Self {
        Self { instant: false }
    }

    /// Demo pipeline with all stage delays zeroed; used by tests and the
    /// CLI's `--instant` flag.
    pub fn instant() -> Self {
        Self { instant: true }
    }

    fn delay(&self, ms: u64) -> u64 {
        if self.instant {
            0
        } else {
            ms
        }
    }
}

impl Default for DemoIntentResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentResolver for DemoIntentResolver {
    fn resolve(&self, _intent: &str) -> anyhow::Result<PipelineSpec> {
        Ok(PipelineSpec {
            stages: vec![
                StageDefinition {
                    delay_ms: 0,
                    source: sources::ORCHESTRATOR.to_string(),
                    message: "Receiving intent...".to_string(),
                    kind: EventKind::Info,
                    detail: None,
                    focus: None,
                },
                StageDefinition {
                    delay_ms: self.delay(weft_config::DEMO_PARSE_DELAY_MS),
                    source: sources::AI_PARSER.to_string(),
                    message: "Intent parsed: { action: 'MINT_DAO_PROPOSAL', target: 'DAO-GOV' }"
                        .to_string(),
                    kind: EventKind::Success,
                    detail: None,
                    focus: Some(chains::AGENT_01.to_string()),
                },
                StageDefinition {
                    delay_ms: self.delay(weft_config::DEMO_BUILD_DELAY_MS),
                    source: sources::AGENT_01.to_string(),
                    message: "Constructing multi-chain transaction...".to_string(),
                    kind: EventKind::Warning,
                    detail: None,
                    focus: Some(chains::DAO_GOV.to_string()),
                },
                StageDefinition {
                    delay_ms: self.delay(weft_config::DEMO_COMMIT_DELAY_MS),
                    source: sources::DAO_GOV.to_string(),
                    message: "Proposal Created: 'Upgrade Protocol v2'".to_string(),
                    kind: EventKind::Success,
                    detail: Some("TxHash: 0x992...aa".to_string()),
                    focus: None,
                },
            ],
            terminal_focus: Some(chains::USER_MAIN.to_string()),
        })
    }
}

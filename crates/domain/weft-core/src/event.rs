use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stage::StageDefinition;

/// Label of the actor a feed entry is attributed to.
///
/// Kept as an open alias rather than a closed enum: pipelines introduce new
/// labels at runtime (parsers, freshly spawned agents). The canonical set
/// lives in [`sources`].
pub type Source = String;

/// Identifier of a microchain that can hold visual focus.
pub type ChainId = String;

/// Canonical source labels used by the built-in pipelines.
pub mod sources {
    pub const SYSTEM: &str = "SYSTEM";
    pub const ORCHESTRATOR: &str = "ORCHESTRATOR";
    pub const AI_PARSER: &str = "AI-PARSER";
    pub const AGENT_01: &str = "AGENT-01";
    pub const AGENT_02: &str = "AGENT-02";
    pub const WALLET: &str = "WALLET";
    pub const DAO_GOV: &str = "DAO-GOV";
}

/// Canonical microchain ids of the demo topology.
pub mod chains {
    pub const USER_MAIN: &str = "USER-MAIN";
    pub const AGENT_01: &str = "AGENT-01";
    pub const AGENT_02: &str = "AGENT-02";
    pub const DAO_GOV: &str = "DAO-GOV";
    pub const NFT_STORE: &str = "NFT-STORE";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Info,
    Success,
    Warning,
    Error,
}

/// One emitted feed entry. Built by the runner at emission time and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub source: Source,
    pub message: String,
    pub kind: EventKind,
    pub detail: Option<String>,
    pub focus: Option<ChainId>,
}

impl Event {
    /// Stamps a stage description into a concrete event. The id and
    /// timestamp are assigned here, not when the stage was scheduled, so the
    /// feed reflects wall-clock emission order.
    pub fn from_stage(stage: &StageDefinition) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: stage.source.clone(),
            message: stage.message.clone(),
            kind: stage.kind,
            detail: stage.detail.clone(),
            focus: stage.focus.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EventKind::Warning).unwrap(), "\"warning\"");
        assert_eq!(
            serde_json::from_str::<EventKind>("\"success\"").unwrap(),
            EventKind::Success
        );
    }

    #[test]
    fn from_stage_assigns_fresh_identity() {
        let stage = StageDefinition {
            delay_ms: 0,
            source: sources::ORCHESTRATOR.to_string(),
            message: "Receiving intent...".to_string(),
            kind: EventKind::Info,
            detail: None,
            focus: None,
        };

        let a = Event::from_stage(&stage);
        let b = Event::from_stage(&stage);
        assert_ne!(a.id, b.id);
        assert_eq!(a.source, stage.source);
        assert_eq!(a.kind, EventKind::Info);
    }
}

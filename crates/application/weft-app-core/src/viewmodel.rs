use weft_core::{chains, ChainId, Event, EventKind};

use crate::domain::ConsoleState;

fn format_timestamp(event: &Event) -> String {
    event
        .timestamp
        .format(weft_config::FEED_TIME_FORMAT)
        .to_string()
}

fn kind_marker(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Info => "·",
        EventKind::Success => "✓",
        EventKind::Warning => "…",
        EventKind::Error => "✗",
    }
}

// --- Feed VMs ---

#[derive(Debug, Clone)]
pub struct FeedEntryVm {
    pub timestamp: String,
    pub marker: &'static str,
    pub source: String,
    pub message: String,
    pub detail: Option<String>,
}

impl From<&Event> for FeedEntryVm {
    fn from(event: &Event) -> Self {
        Self {
            timestamp: format_timestamp(event),
            marker: kind_marker(event.kind),
            source: event.source.clone(),
            message: event.message.clone(),
            detail: event.detail.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedVm {
    pub entries: Vec<FeedEntryVm>,
    /// Shown instead of entries while the log is empty.
    pub placeholder: Option<&'static str>,
}

pub fn feed_vm(state: &ConsoleState) -> FeedVm {
    let entries: Vec<FeedEntryVm> = state.log.iter().map(FeedEntryVm::from).collect();
    let placeholder = if entries.is_empty() {
        Some("Awaiting system events...")
    } else {
        None
    };
    FeedVm {
        entries,
        placeholder,
    }
}

/// Single-line rendering of one event, used by terminal feed consumers.
pub fn format_feed_line(event: &Event) -> String {
    let entry = FeedEntryVm::from(event);
    let mut line = format!(
        "{} {} [{}] {}",
        entry.timestamp, entry.marker, entry.source, entry.message
    );
    if let Some(detail) = entry.detail {
        line.push_str("\n             ");
        line.push_str(&detail);
    }
    line
}

// --- Visualizer VMs ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainRole {
    User,
    Agent,
    Dao,
    App,
}

#[derive(Debug, Clone)]
pub struct ChainNodeVm {
    pub id: ChainId,
    pub role: ChainRole,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct VisualizerVm {
    pub chains: Vec<ChainNodeVm>,
}

const TOPOLOGY: &[(&str, ChainRole)] = &[
    (chains::USER_MAIN, ChainRole::User),
    (chains::AGENT_01, ChainRole::Agent),
    (chains::AGENT_02, ChainRole::Agent),
    (chains::DAO_GOV, ChainRole::Dao),
    (chains::NFT_STORE, ChainRole::App),
];

/// Marks the focused chain active; with no focus nothing is highlighted.
pub fn visualizer_vm(state: &ConsoleState) -> VisualizerVm {
    VisualizerVm {
        chains: TOPOLOGY
            .iter()
            .map(|(id, role)| ChainNodeVm {
                id: (*id).to_string(),
                role: *role,
                active: state.focus.as_deref() == Some(*id),
            })
            .collect(),
    }
}

// --- Intent input VM ---

#[derive(Debug, Clone)]
pub struct IntentInputVm {
    pub can_submit: bool,
    pub processing: bool,
    pub placeholder: &'static str,
}

pub fn intent_input_vm(state: &ConsoleState) -> IntentInputVm {
    let processing = state.is_processing();
    IntentInputVm {
        can_submit: !processing,
        processing,
        placeholder:
            "Describe your intent naturally (e.g., 'Deploy a DAO on microchain #4 and mint 100 tokens')...",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::{RunStatus, StageDefinition};

    fn event(kind: EventKind, detail: Option<&str>) -> Event {
        Event::from_stage(&StageDefinition {
            delay_ms: 0,
            source: "ORCHESTRATOR".to_string(),
            message: "Receiving intent...".to_string(),
            kind,
            detail: detail.map(str::to_string),
            focus: None,
        })
    }

    #[test]
    fn empty_feed_shows_placeholder() {
        let vm = feed_vm(&ConsoleState::default());
        assert!(vm.entries.is_empty());
        assert_eq!(vm.placeholder, Some("Awaiting system events..."));
    }

    #[test]
    fn feed_entries_carry_kind_markers() {
        let mut state = ConsoleState::default();
        state.log.push(event(EventKind::Info, None));
        state.log.push(event(EventKind::Error, None));

        let vm = feed_vm(&state);
        assert!(vm.placeholder.is_none());
        assert_eq!(vm.entries[0].marker, "·");
        assert_eq!(vm.entries[1].marker, "✗");
    }

    #[test]
    fn feed_line_appends_detail_block() {
        let line = format_feed_line(&event(EventKind::Success, Some("TxHash: 0x992...aa")));
        assert!(line.contains("[ORCHESTRATOR]"));
        assert!(line.contains("\n             TxHash: 0x992...aa"));
    }

    #[test]
    fn visualizer_highlights_only_the_focused_chain() {
        let mut state = ConsoleState::default();
        state.focus = Some(chains::DAO_GOV.to_string());

        let vm = visualizer_vm(&state);
        let active: Vec<&str> = vm
            .chains
            .iter()
            .filter(|c| c.active)
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(active, vec![chains::DAO_GOV]);
    }

    #[test]
    fn visualizer_highlights_nothing_without_focus() {
        let mut state = ConsoleState::default();
        state.focus = None;

        let vm = visualizer_vm(&state);
        assert!(vm.chains.iter().all(|c| !c.active));
        assert_eq!(vm.chains.len(), 5);
    }

    #[test]
    fn intent_input_is_gated_while_processing() {
        let mut state = ConsoleState::default();
        assert!(intent_input_vm(&state).can_submit);

        state.run_status = RunStatus::Running;
        let vm = intent_input_vm(&state);
        assert!(!vm.can_submit);
        assert!(vm.processing);
    }
}

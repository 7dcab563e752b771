use weft_core::RunStatus;

use crate::domain::ConsoleState;

use super::events::DomainEvent;

pub fn reduce(mut state: ConsoleState, ev: DomainEvent) -> ConsoleState {
    match ev {
        DomainEvent::IntentAccepted { run_id, intent } => {
            state.active_run = Some(run_id);
            state.run_status = RunStatus::Running;
            state.last_intent = Some(intent);
            state.last_error = None;
        }

        DomainEvent::StageEmitted(event) => state.log.push(event),

        DomainEvent::FocusShifted(focus) => state.focus = focus,

        // Staleness is filtered in the kernel tick before this applies.
        DomainEvent::RunFinished { run_id: _, status } => state.run_status = status,

        DomainEvent::UserError(message) => state.last_error = Some(message),
    }
    state
}

use weft_core::{ChainId, PipelineSpec};

/// Maps a raw intent string to an executable pipeline description. A real
/// deployment would parse and route here; the demo resolver returns one
/// fixed spec.
pub trait IntentResolver: Send + Sync + 'static {
    fn resolve(&self, intent: &str) -> anyhow::Result<PipelineSpec>;
}

/// Receives focus-change notifications as stages claim and release chains.
/// Called synchronously from the emission path.
pub trait FocusObserver: Send + Sync + 'static {
    fn focus_changed(&self, focus: Option<&ChainId>);
}

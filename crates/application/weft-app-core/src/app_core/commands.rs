#[derive(Debug, Clone)]
pub enum AppCommand {
    // Intent input
    SubmitIntent(String),

    // Run control
    CancelRun,
}

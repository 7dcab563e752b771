pub mod app_core;
mod async_runtime;
pub mod bus;
pub mod dispatcher;
pub mod domain;
pub mod kernel;
pub mod ports;
pub mod resolver;
pub mod runner;
pub mod viewmodel;

pub use app_core::*;
pub use bus::{EventBus, SubscriptionId};
pub use dispatcher::{IntentDispatcher, RunHandle};
pub use domain::ConsoleState;
pub use kernel::ConsoleKernel;
pub use ports::{FocusObserver, IntentResolver};
pub use resolver::DemoIntentResolver;
pub use runner::PipelineRunner;
pub use viewmodel::*;

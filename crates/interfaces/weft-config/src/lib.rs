//! Central configuration constants for runtime limits and defaults.

/// Capacity of the kernel's domain-event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Timestamp format used by the feed view (24h wall clock).
pub const FEED_TIME_FORMAT: &str = "%H:%M:%S";

/// Interval between kernel ticks while a frontend polls for progress
/// (milliseconds).
pub const TICK_INTERVAL_MS: u64 = 10;

/// Delay before the demo pipeline's parse stage fires (milliseconds).
pub const DEMO_PARSE_DELAY_MS: u64 = 800;

/// Delay before the demo pipeline's transaction-construction stage fires.
pub const DEMO_BUILD_DELAY_MS: u64 = 1200;

/// Delay before the demo pipeline's proposal-commit stage fires.
pub const DEMO_COMMIT_DELAY_MS: u64 = 1500;

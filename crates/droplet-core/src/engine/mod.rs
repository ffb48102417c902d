//! The scheduling and archival engine.
//!
//! Decision logic is pure ([`evaluator`]); mutation is split between the
//! day-boundary archival ([`rollover`]) and reminder firing ([`reminder`]);
//! the periodic [`driver`] wires them to the store and the notifier.

pub mod driver;
pub mod evaluator;
pub mod intake;
pub mod reminder;
pub mod rollover;

pub use driver::{dispatch_events, TickDriver, TickSummary, DEFAULT_TICK_INTERVAL};
pub use evaluator::{evaluate, TickDecision};
pub use intake::record_intake;
pub use reminder::{apply_reminder, delivered_quantity, WAKING_MINUTES};
pub use rollover::apply_rollover;

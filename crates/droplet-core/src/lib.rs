//! # Droplet Core Library
//!
//! This library provides the core scheduling and archival engine for the
//! Droplet hydration reminder service. Many independent users, each with a
//! personal reminder cadence and their own local day boundary, are driven
//! from a single periodic tick with exactly-once semantics per cadence
//! window and per calendar day, durable across process restarts.
//!
//! ## Architecture
//!
//! - **Engine**: a pure due-check evaluator plus two mutators (day-boundary
//!   archival and reminder firing), orchestrated by a tick driver that the
//!   host runs on a fixed interval
//! - **Storage**: a keyed profile-store contract with an in-memory
//!   reference implementation and a SQLite-backed one
//! - **Notification**: an opaque-destination delivery contract; the engine
//!   never talks to a chat platform directly
//! - **Clock**: timezone identifier resolution with non-destructive
//!   fallback to a default zone
//!
//! ## Key Components
//!
//! - [`TickDriver`]: the periodic scheduler over all profiles
//! - [`HydrationProfile`]: per-user state and settings
//! - [`ProfileStore`]: persistence contract
//! - [`Notifier`]: delivery contract

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod notify;
pub mod profile;
pub mod store;

pub use clock::ZoneResolver;
pub use config::AppConfig;
pub use engine::{
    dispatch_events, evaluate, record_intake, TickDecision, TickDriver, TickSummary,
    DEFAULT_TICK_INTERVAL,
};
pub use error::{ConfigError, CoreError, NotifyError, StoreError, ValidationError};
pub use events::Event;
pub use notify::{ConsoleNotifier, Notifier};
pub use profile::{
    Destination, HydrationProfile, IntakeEntry, IntakeKind, QuantityMode, Unit,
};
pub use store::{MemoryStore, ProfileStore, SqliteStore};

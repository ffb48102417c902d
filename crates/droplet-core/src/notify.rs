//! Notification delivery contract.
//!
//! The engine never talks to a chat platform directly; it hands rendered
//! text and an opaque destination to a [`Notifier`]. Delivery failures are
//! reported back and logged by the driver, never fatal to a tick, and
//! never retried (a retry could duplicate a later, already-due reminder).

use crate::error::NotifyError;
use crate::profile::Destination;

/// Delivers a rendered event to a destination.
pub trait Notifier: Send + Sync {
    fn deliver(&self, destination: &Destination, text: &str) -> Result<(), NotifyError>;
}

/// Stdout-backed notifier, the CLI host's transport stand-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn deliver(&self, destination: &Destination, text: &str) -> Result<(), NotifyError> {
        match destination {
            Destination::Channel { id } => println!("[#{id}] {text}"),
            Destination::Direct { user_id } => println!("[@{user_id}] {text}"),
        }
        Ok(())
    }
}

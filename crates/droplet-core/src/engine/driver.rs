//! The periodic tick driver.
//!
//! On a fixed interval, loads every profile, evaluates it, applies the
//! rollover then the reminder mutator, persists the full mutated profile
//! in one write, and only then dispatches the resulting events. Dispatch
//! after persist means a crash between the two loses the notification
//! rather than duplicating it on restart -- at-most-once delivery, chosen
//! deliberately for low-stakes, frequent reminders. The same reasoning
//! skips dispatch when a persist fails: the mutation is recomputed from
//! the unchanged stored state on the next tick.
//!
//! `run` awaits each pass to completion before the next interval fires,
//! so ticks never overlap and per-user read-modify-write is serialized by
//! construction.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::clock::ZoneResolver;
use crate::error::NotifyError;
use crate::events::Event;
use crate::notify::Notifier;
use crate::profile::{Destination, HydrationProfile};
use crate::store::ProfileStore;

use super::evaluator;
use super::reminder::apply_reminder;
use super::rollover::apply_rollover;

/// Reference tick interval.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Counters for one tick pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub evaluated: usize,
    pub rollovers: usize,
    pub reminders: usize,
    pub store_failures: usize,
    pub delivery_failures: usize,
}

/// Periodic scheduler over all tracked profiles.
pub struct TickDriver<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
    zones: ZoneResolver,
    interval: Duration,
}

impl<S: ProfileStore, N: Notifier> TickDriver<S, N> {
    pub fn new(store: Arc<S>, notifier: Arc<N>, zones: ZoneResolver, interval: Duration) -> Self {
        Self { store, notifier, zones, interval }
    }

    /// One pass over every profile.
    ///
    /// A store failure for one profile is logged and skipped; that profile
    /// is re-evaluated from its last persisted state on the next tick.
    /// Delivery failures drop the event and never fail the pass.
    pub fn run_tick(&self, now: DateTime<Utc>) -> TickSummary {
        let profiles = match self.store.list_all() {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::error!(error = %e, "profile listing failed, skipping tick");
                return TickSummary { store_failures: 1, ..TickSummary::default() };
            }
        };

        let mut summary = TickSummary { evaluated: profiles.len(), ..TickSummary::default() };
        for (user_id, mut profile) in profiles {
            let decision = evaluator::evaluate(&profile, now, &self.zones);
            if decision.is_noop() {
                continue;
            }
            let local_date = self.zones.local_date(&profile.timezone_id, now);

            let mut events = Vec::new();
            if decision.rollover {
                summary.rollovers += 1;
                events.extend(apply_rollover(&mut profile, &user_id, local_date, now));
            }
            if decision.reminder_due {
                // Applied to the already-rolled profile: the reminder
                // increments the freshly-reset accumulator.
                let fired = apply_reminder(&mut profile, &user_id, now, local_date);
                if !fired.is_empty() {
                    summary.reminders += 1;
                }
                events.extend(fired);
            }

            if let Err(e) = self.store.upsert(&user_id, &profile) {
                tracing::warn!(user = user_id.as_str(), error = %e, "profile write failed, retrying next tick");
                summary.store_failures += 1;
                continue;
            }
            summary.delivery_failures += dispatch_events(self.notifier.as_ref(), &profile, &events);
        }
        summary
    }

    /// Run the driver until `shutdown` fires, ticking every `interval`.
    ///
    /// The in-flight pass completes before the loop exits.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tracing::info!(interval_secs = self.interval.as_secs(), "tick driver started");
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let summary = self.run_tick(Utc::now());
                    tracing::debug!(
                        evaluated = summary.evaluated,
                        rollovers = summary.rollovers,
                        reminders = summary.reminders,
                        store_failures = summary.store_failures,
                        delivery_failures = summary.delivery_failures,
                        "tick complete"
                    );
                }
                _ = shutdown.changed() => break,
            }
        }
        tracing::info!("tick driver stopped");
    }
}

/// Route rendered events to the profile's destinations.
///
/// Reminders go to `reminder_target`, falling back to direct-to-user when
/// no target is set or the target resolves to no live destination. Log
/// echoes and daily summaries go to `log_target` (silently dropped when
/// absent); echoes are copied to `coach_target` when the profile asks for
/// it. Returns the number of failed deliveries.
pub fn dispatch_events<N: Notifier>(notifier: &N, profile: &HydrationProfile, events: &[Event]) -> usize {
    let mut failures = 0;
    for event in events {
        match event {
            Event::ReminderFired { user_id, .. } => {
                let text = if profile.self_mention {
                    format!("@{user_id} {}", event.render())
                } else {
                    event.render()
                };
                let direct = Destination::Direct { user_id: user_id.clone() };
                let primary = profile.reminder_target.as_ref().unwrap_or(&direct);
                match notifier.deliver(primary, &text) {
                    Ok(()) => {}
                    Err(NotifyError::UnknownDestination(_)) if *primary != direct => {
                        // Dead channel: the reminder still reaches the user.
                        if let Err(e) = notifier.deliver(&direct, &text) {
                            tracing::warn!(user = user_id.as_str(), error = %e, "reminder fallback delivery failed");
                            failures += 1;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(user = user_id.as_str(), error = %e, "reminder delivery failed");
                        failures += 1;
                    }
                }
            }
            Event::DailySummary { user_id, .. } => {
                if let Some(target) = &profile.log_target {
                    if let Err(e) = notifier.deliver(target, &event.render()) {
                        tracing::warn!(user = user_id.as_str(), error = %e, "summary delivery failed");
                        failures += 1;
                    }
                }
            }
            Event::IntakeLogged { user_id, .. } => {
                let text = event.render();
                if let Some(target) = &profile.log_target {
                    if let Err(e) = notifier.deliver(target, &text) {
                        tracing::warn!(user = user_id.as_str(), error = %e, "log echo delivery failed");
                        failures += 1;
                    }
                }
                if profile.coach_notify_on_log {
                    if let Some(coach) = &profile.coach_target {
                        if let Err(e) = notifier.deliver(coach, &text) {
                            tracing::warn!(user = user_id.as_str(), error = %e, "coach echo delivery failed");
                            failures += 1;
                        }
                    }
                }
            }
        }
    }
    failures
}

use clap::Subcommand;
use droplet_core::profile::{validate_amount, validate_cadence};
use droplet_core::{
    AppConfig, Destination, ProfileStore, QuantityMode, Unit, ZoneResolver,
};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create or update a user's reminder settings
    Set {
        #[arg(long)]
        user: String,
        /// Fixed quantity per reminder, in the profile's unit
        #[arg(long)]
        increment: Option<f64>,
        /// ml or oz
        #[arg(long)]
        unit: Option<String>,
        /// Minutes between reminders
        #[arg(long)]
        cadence: Option<u32>,
        /// Daily intake target
        #[arg(long)]
        goal: Option<f64>,
        /// fixed or goal
        #[arg(long)]
        mode: Option<String>,
        /// e.g. UTC, UTC+9, -08:00
        #[arg(long)]
        timezone: Option<String>,
        /// Channel reminders are posted to
        #[arg(long)]
        reminder_channel: Option<String>,
        /// Deliver reminders directly instead of to a channel
        #[arg(long)]
        reminder_dm: bool,
        /// Channel log echoes and daily summaries are posted to
        #[arg(long)]
        log_channel: Option<String>,
        /// User who receives copies of log echoes
        #[arg(long)]
        coach_user: Option<String>,
        /// Mention the user in reminders
        #[arg(long)]
        self_mention: Option<bool>,
        /// Copy log echoes to the coach
        #[arg(long)]
        coach_notify_on_log: Option<bool>,
    },
    /// Print a user's profile as JSON
    Show {
        #[arg(long)]
        user: String,
    },
    /// Drop reminder settings; history is kept
    Clear {
        #[arg(long)]
        user: String,
    },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let store = super::open_store(&config)?;

    match action {
        ProfileAction::Set {
            user,
            increment,
            unit,
            cadence,
            goal,
            mode,
            timezone,
            reminder_channel,
            reminder_dm,
            log_channel,
            coach_user,
            self_mention,
            coach_notify_on_log,
        } => {
            let mut profile = store.get(&user)?.unwrap_or_default();
            // Everything is validated before the store sees it.
            if let Some(v) = increment {
                profile.increment = Some(validate_amount(v)?);
            }
            if let Some(v) = unit {
                profile.unit = Unit::parse(&v)?;
            }
            if let Some(v) = cadence {
                profile.cadence_minutes = Some(validate_cadence(v)?);
            }
            if let Some(v) = goal {
                profile.daily_goal = Some(validate_amount(v)?);
            }
            if let Some(v) = mode {
                profile.quantity_mode = QuantityMode::parse(&v)?;
            }
            if let Some(v) = timezone {
                ZoneResolver::validate(&v)?;
                profile.timezone_id = v;
            }
            if let Some(id) = reminder_channel {
                profile.reminder_target = Some(Destination::Channel { id });
            }
            if reminder_dm {
                profile.reminder_target = Some(Destination::Direct { user_id: user.clone() });
            }
            if let Some(id) = log_channel {
                profile.log_target = Some(Destination::Channel { id });
            }
            if let Some(coach) = coach_user {
                profile.coach_target = Some(Destination::Direct { user_id: coach });
            }
            if let Some(v) = self_mention {
                profile.self_mention = v;
            }
            if let Some(v) = coach_notify_on_log {
                profile.coach_notify_on_log = v;
            }

            store.upsert(&user, &profile)?;
            let state = if profile.is_configured() { "configured" } else { "dormant" };
            println!("Profile for {user} saved ({state}).");
        }
        ProfileAction::Show { user } => match store.get(&user)? {
            Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
            None => println!("No profile for {user}."),
        },
        ProfileAction::Clear { user } => {
            let mut profile = store.get(&user)?.unwrap_or_default();
            profile.increment = None;
            profile.cadence_minutes = None;
            profile.daily_goal = None;
            store.upsert(&user, &profile)?;
            println!("Reminder settings cleared for {user}; history kept.");
        }
    }
    Ok(())
}

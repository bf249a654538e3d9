//! Administrative CLI for the waitlist registry.
//!
//! # Usage
//!
//! ```bash
//! # Create the tables
//! waitlist migrate
//!
//! # Create the next scheduled event (or an explicit date)
//! waitlist create-event --external-ref 12345
//! waitlist create-event --date 2024-01-07 --external-ref 12345
//!
//! # Mutate and inspect a list
//! waitlist join --date 2024-01-07 --user-id 42 --handle alice
//! waitlist leave --date 2024-01-07 --user-id 42
//! waitlist show --date 2024-01-07
//! ```
//!
//! Settings come from `waitlist.toml` and `WAITLIST__*` variables; see
//! [`waitlist::config`].
//!
//! Invocations may run concurrently. Each process has its own registry
//! locks, so the database serializes list changes per event; a join that
//! raced another process fails with a duplicate error and can be rerun.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing::info;
use waitlist::application::services::{ParticipantRegistry, ScheduleConfig};
use waitlist::config::AppConfig;
use waitlist::domain::entities::UserProfile;
use waitlist::domain::value_objects::{EventDate, ExternalRef, UserId};
use waitlist::infrastructure::logging::init_tracing;
use waitlist::infrastructure::persistence::postgres::{
    self, PostgresEventRepository, PostgresParticipantRepository,
};

/// Waitlist registry administration.
#[derive(Debug, Parser)]
#[command(name = "waitlist", version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the database tables if they do not exist
    Migrate,

    /// Create an event, or repoint the external reference of an existing one
    CreateEvent {
        /// Event date; defaults to the next scheduled date
        #[arg(long)]
        date: Option<EventDate>,

        /// Identifier of the announcement that carries the list
        #[arg(long)]
        external_ref: String,
    },

    /// Add a user to an event's list
    Join(JoinArgs),

    /// Remove a user from an event's list
    Leave {
        /// Event date
        #[arg(long)]
        date: EventDate,

        /// User identifier
        #[arg(long)]
        user_id: i64,
    },

    /// Print an event's list
    Show {
        /// Event date
        #[arg(long)]
        date: EventDate,
    },
}

#[derive(Debug, Args)]
struct JoinArgs {
    /// Event date
    #[arg(long)]
    date: EventDate,

    /// User identifier
    #[arg(long)]
    user_id: i64,

    /// Handle without the leading `@`
    #[arg(long)]
    handle: Option<String>,

    /// Given name
    #[arg(long)]
    given_name: Option<String>,

    /// Family name
    #[arg(long)]
    family_name: Option<String>,
}

impl JoinArgs {
    fn profile(&self) -> anyhow::Result<UserProfile> {
        let mut profile = UserProfile::new(UserId::new(self.user_id)?);
        if let Some(handle) = &self.handle {
            profile = profile.with_handle(handle.trim_start_matches('@'));
        }
        if let Some(name) = &self.given_name {
            profile = profile.with_given_name(name.as_str());
        }
        if let Some(name) = &self.family_name {
            profile = profile.with_family_name(name.as_str());
        }
        Ok(profile)
    }
}

fn default_event_date(schedule: &ScheduleConfig) -> anyhow::Result<EventDate> {
    let today = chrono::Local::now().date_naive();
    schedule
        .next_event_date(today)
        .context("no scheduled date after today")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.logging)?;

    let pool = postgres::connect(&config.database)
        .await
        .context("connecting to the database")?;

    if let Command::Migrate = cli.command {
        postgres::migrate(&pool).await?;
        info!("schema is up to date");
        return Ok(());
    }

    let registry = ParticipantRegistry::new(
        Arc::new(PostgresEventRepository::new(pool.clone())),
        Arc::new(PostgresParticipantRepository::new(pool)),
        config.registry,
    )?;

    match cli.command {
        Command::Migrate => {}
        Command::CreateEvent { date, external_ref } => {
            let date = match date {
                Some(date) => date,
                None => default_event_date(&config.schedule)?,
            };
            let event = registry
                .create_event(date, ExternalRef::new(external_ref))
                .await?;
            println!("{event}");
        }
        Command::Join(args) => {
            let profile = args.profile()?;
            let event = registry.require_event(args.date).await?;
            let outcome = registry.join(event.id(), &profile).await?;
            println!("{outcome}");
        }
        Command::Leave { date, user_id } => {
            let user_id = UserId::new(user_id)?;
            let event = registry.require_event(date).await?;
            let outcome = registry.leave(event.id(), user_id).await?;
            println!("{outcome}");
        }
        Command::Show { date } => {
            let event = registry.require_event(date).await?;
            println!("{}", registry.roster(&event).await?);
        }
    }

    Ok(())
}

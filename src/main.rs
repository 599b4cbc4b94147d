use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use volunteer_rota::application::calendar::{CalendarState, CalendarView};
use volunteer_rota::application::commands;
use volunteer_rota::application::render::render_page;
use volunteer_rota::config::AppConfig;
use volunteer_rota::domain::date_range::DateRange;
use volunteer_rota::domain::shift_model::{NewEvent, NewShift, PresetSlot, ShiftStatus, ShiftTime};
use volunteer_rota::AppServices;

#[derive(Parser)]
#[command(name = "rota")]
#[command(version)]
#[command(about = "Volunteer rota: see who is on, what is still needed, and sign people up", long_about = None)]
struct Cli {
    /// TOML settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured database URL
    #[arg(long, global = true)]
    database: Option<String>,

    /// Act as an admin (past days, events, cancellations)
    #[arg(long, global = true)]
    admin: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    List,
    Week,
    Month,
}

impl From<ViewArg> for CalendarView {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::List => CalendarView::List,
            ViewArg::Week => CalendarView::Week,
            ViewArg::Month => CalendarView::Month,
        }
    }
}

#[derive(Args)]
struct ShiftArgs {
    /// Day of the shift (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,

    /// Preset slot: 12-3, 3-6, 6-9 or 9-11
    #[arg(long, conflicts_with_all = ["start", "end"])]
    slot: Option<String>,

    /// Custom start (HH:MM)
    #[arg(long, requires = "end")]
    start: Option<NaiveTime>,

    /// Custom end (HH:MM)
    #[arg(long, requires = "start")]
    end: Option<NaiveTime>,

    #[arg(long)]
    role: Option<String>,

    /// Who is covering it; leave out for an open shift
    #[arg(long, conflicts_with = "cancelled")]
    volunteer: Option<String>,

    /// Store the shift as cancelled
    #[arg(long)]
    cancelled: bool,
}

impl ShiftArgs {
    fn to_new_shift(&self) -> Result<NewShift> {
        let time = match (&self.slot, self.start, self.end) {
            (Some(code), None, None) => ShiftTime::Preset(
                PresetSlot::from_code(code).with_context(|| format!("unknown slot '{}'", code))?,
            ),
            (None, Some(start), Some(end)) => ShiftTime::Custom { start, end },
            _ => bail!("give either --slot or both --start and --end"),
        };
        let status = match (&self.volunteer, self.cancelled) {
            (_, true) => ShiftStatus::Cancelled,
            (Some(name), false) => ShiftStatus::Filled(name.trim().to_string()),
            (None, false) => ShiftStatus::Unfilled,
        };
        Ok(NewShift {
            date: self.date,
            status,
            role: self.role.as_ref().map(|r| r.trim().to_string()).filter(|r| !r.is_empty()),
            time,
        })
    }
}

#[derive(Args)]
struct EventArgs {
    #[arg(long)]
    title: String,

    #[arg(long)]
    date: NaiveDate,

    #[arg(long)]
    start: NaiveTime,

    #[arg(long)]
    end: NaiveTime,
}

impl EventArgs {
    fn to_new_event(&self) -> NewEvent {
        NewEvent {
            title: self.title.clone(),
            date: self.date,
            start_time: self.start,
            end_time: self.end,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the calendar
    Show {
        #[arg(long, value_enum, default_value = "month")]
        view: ViewArg,

        /// Any day in the month or week to show (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// First day for the list view
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,

        /// Last day for the list view
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },
    /// Sign someone up, or open one or more empty shifts
    AddShift {
        #[command(flatten)]
        shift: ShiftArgs,

        /// Number of open shifts to create (1-10)
        #[arg(long, default_value_t = 1)]
        quantity: usize,
    },
    UpdateShift {
        id: i64,

        #[command(flatten)]
        shift: ShiftArgs,
    },
    DeleteShift {
        id: i64,
    },
    /// Cancel a regular shift for one day
    Cancel {
        #[arg(long)]
        date: NaiveDate,

        #[arg(long)]
        slot: String,

        #[arg(long, default_value = "Bar Staff")]
        role: String,
    },
    AddEvent {
        #[command(flatten)]
        event: EventArgs,
    },
    UpdateEvent {
        id: i64,

        #[command(flatten)]
        event: EventArgs,
    },
    DeleteEvent {
        id: i64,
    },
    /// Message listing the month's unfilled shifts
    Digest {
        #[arg(long)]
        year: Option<i32>,

        /// 1-12
        #[arg(long)]
        month: Option<u32>,
    },
}

fn require_admin(admin: bool, action: &str) -> Result<()> {
    if !admin {
        bail!("{} needs --admin", action);
    }
    Ok(())
}

fn require_open_day(admin: bool, date: NaiveDate, today: NaiveDate) -> Result<()> {
    if date < today && !admin {
        bail!("{} is in the past; changing it needs --admin", date);
    }
    Ok(())
}

fn print_ids(json: bool, label: &str, ids: &[i64]) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(ids)?);
    } else {
        let ids: Vec<String> = ids.iter().map(|id| format!("#{}", id)).collect();
        println!("{} {}", label, ids.join(", "));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // logs go to stderr so stdout stays clean for --json
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "volunteer_rota=info,rota=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(url) = &cli.database {
        config.database_url = url.clone();
    }
    let services = AppServices::connect(&config)
        .await
        .with_context(|| format!("failed to open {}", config.database_url))?;

    let today = Local::now().date_naive();
    debug!(%today, admin = cli.admin, "starting");

    match &cli.command {
        Commands::Show { view, date, from, to } => {
            let mut state = CalendarState::new((*view).into(), date.unwrap_or(today), cli.admin);
            if let (Some(from), Some(to)) = (from, to) {
                state.set_list_range(DateRange::new(*from, *to));
            }
            let page = commands::load_calendar(&services, &state, today).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print!("{}", render_page(&page));
            }
        }
        Commands::AddShift { shift, quantity } => {
            let new = shift.to_new_shift()?;
            require_open_day(cli.admin, new.date, today)?;
            let ids = commands::add_shift(&services, new, *quantity).await?;
            print_ids(cli.json, "added", &ids)?;
        }
        Commands::UpdateShift { id, shift } => {
            let new = shift.to_new_shift()?;
            require_open_day(cli.admin, new.date, today)?;
            commands::update_shift(&services, *id, new).await?;
            print_ids(cli.json, "updated", &[*id])?;
        }
        Commands::DeleteShift { id } => {
            let existing = services
                .shifts
                .get(*id)
                .await?
                .with_context(|| format!("shift #{} not found", id))?;
            require_open_day(cli.admin, existing.date, today)?;
            commands::delete_shift(&services, *id).await?;
            print_ids(cli.json, "deleted", &[*id])?;
        }
        Commands::Cancel { date, slot, role } => {
            require_admin(cli.admin, "cancelling a regular shift")?;
            let slot = PresetSlot::from_code(slot).with_context(|| format!("unknown slot '{}'", slot))?;
            let id = commands::cancel_requirement(&services, *date, slot, role).await?;
            print_ids(cli.json, "cancelled with", &[id])?;
        }
        Commands::AddEvent { event } => {
            require_admin(cli.admin, "adding events")?;
            let id = commands::add_event(&services, event.to_new_event()).await?;
            print_ids(cli.json, "added event", &[id])?;
        }
        Commands::UpdateEvent { id, event } => {
            require_admin(cli.admin, "editing events")?;
            commands::update_event(&services, *id, event.to_new_event()).await?;
            print_ids(cli.json, "updated event", &[*id])?;
        }
        Commands::DeleteEvent { id } => {
            require_admin(cli.admin, "deleting events")?;
            commands::delete_event(&services, *id).await?;
            print_ids(cli.json, "deleted event", &[*id])?;
        }
        Commands::Digest { year, month } => {
            let year = year.unwrap_or(today.year());
            let month = month.unwrap_or(today.month());
            let digest = commands::month_digest(&services, year, month, today).await?;
            match (digest, cli.json) {
                (digest, true) => println!("{}", serde_json::to_string(&digest)?),
                (Some(message), false) => println!("{}", message),
                (None, false) => println!("No upcoming unfilled shifts this month."),
            }
        }
    }

    Ok(())
}

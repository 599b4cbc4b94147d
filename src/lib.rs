use sqlx::SqlitePool;

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

use config::AppConfig;
use domain::opening_hours::OpeningHours;
use error::Result;
use infrastructure::database;
use infrastructure::event_repo::EventRepository;
use infrastructure::shift_repo::ShiftRepository;

// Everything a command needs: the repositories plus venue settings.
pub struct AppServices {
    pub shifts: ShiftRepository,
    pub events: EventRepository,
    pub hours: OpeningHours,
    pub venue_name: String,
}

impl AppServices {
    pub fn new(pool: SqlitePool, hours: OpeningHours, venue_name: impl Into<String>) -> Self {
        Self {
            // the pool is reference counted, cloning it is cheap
            shifts: ShiftRepository::new(pool.clone()),
            events: EventRepository::new(pool),
            hours,
            venue_name: venue_name.into(),
        }
    }

    /// Open the configured database and build the services around it.
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let hours = config.opening_hours()?;
        let pool = database::connect(config).await?;
        Ok(Self::new(pool, hours, config.venue_name.clone()))
    }
}

mod config;
mod mail;
mod repos;
mod system;

pub use config::{Config, SmtpConfig};
pub use mail::{Email, IMailer, InMemoryMailer, MailReceipt, SmtpMailer, TransportError, UnconfiguredMailer};
use repos::Repos;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::{info, warn};

#[derive(Clone)]
pub struct KeepsakeContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailer>,
}

impl KeepsakeContext {
    /// Context backed entirely by in-process stores, used by tests
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            mailer: Arc::new(InMemoryMailer::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> KeepsakeContext {
    let config = Config::new();
    let mailer = create_mailer(&config);
    let repos = match std::env::var("DATABASE_URL") {
        Ok(connection_string) => Repos::create_postgres(&connection_string)
            .await
            .expect("Postgres credentials must be set and valid"),
        Err(_) => {
            info!("Did not find DATABASE_URL environment variable. Going to use an in-memory data store, all data is lost on shutdown.");
            Repos::create_inmemory()
        }
    };
    KeepsakeContext {
        repos,
        config,
        sys: Arc::new(RealSys {}),
        mailer,
    }
}

fn create_mailer(config: &Config) -> Arc<dyn IMailer> {
    match &config.smtp {
        Some(smtp) => match SmtpMailer::new(smtp) {
            Ok(mailer) => Arc::new(mailer),
            Err(e) => {
                warn!("Unable to create the SMTP mailer: {}. Reminder emails will not be delivered.", e);
                Arc::new(UnconfiguredMailer {})
            }
        },
        None => Arc::new(UnconfiguredMailer {}),
    }
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL env var to be present when running migrations.");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}

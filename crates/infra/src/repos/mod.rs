mod admin;
mod member;
mod reminder_log;
mod shared;
mod special_date;

use admin::{IAdminRepo, InMemoryAdminRepo, PostgresAdminRepo};
use member::{IMemberRepo, InMemoryMemberRepo, PostgresMemberRepo};
use reminder_log::{IReminderLogRepo, InMemoryReminderLogRepo, PostgresReminderLogRepo};
use special_date::{InMemorySpecialDateRepo, ISpecialDateRepo, PostgresSpecialDateRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub members: Arc<dyn IMemberRepo>,
    pub admins: Arc<dyn IAdminRepo>,
    pub special_dates: Arc<dyn ISpecialDateRepo>,
    pub reminder_logs: Arc<dyn IReminderLogRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            members: Arc::new(PostgresMemberRepo::new(pool.clone())),
            admins: Arc::new(PostgresAdminRepo::new(pool.clone())),
            special_dates: Arc::new(PostgresSpecialDateRepo::new(pool.clone())),
            reminder_logs: Arc::new(PostgresReminderLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            members: Arc::new(InMemoryMemberRepo::new()),
            admins: Arc::new(InMemoryAdminRepo::new()),
            special_dates: Arc::new(InMemorySpecialDateRepo::new()),
            reminder_logs: Arc::new(InMemoryReminderLogRepo::new()),
        }
    }
}

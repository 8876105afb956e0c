mod inmemory;
mod postgres;

pub use inmemory::InMemorySpecialDateRepo;
use keepsake_domain::{SpecialDate, ID};
pub use postgres::PostgresSpecialDateRepo;

#[async_trait::async_trait]
pub trait ISpecialDateRepo: Send + Sync {
    async fn insert(&self, special_date: &SpecialDate) -> anyhow::Result<()>;
    async fn save(&self, special_date: &SpecialDate) -> anyhow::Result<()>;
    async fn find(&self, special_date_id: &ID) -> Option<SpecialDate>;
    async fn find_by_member(&self, member_id: &ID) -> Vec<SpecialDate>;
    /// All candidates for the reminder pipeline: active records that have
    /// reminders enabled
    async fn find_active_remindable(&self) -> Vec<SpecialDate>;
}

use super::ISpecialDateRepo;
use crate::repos::shared::inmemory_repo::*;
use keepsake_domain::{SpecialDate, ID};

pub struct InMemorySpecialDateRepo {
    special_dates: std::sync::Mutex<Vec<SpecialDate>>,
}

impl InMemorySpecialDateRepo {
    pub fn new() -> Self {
        Self {
            special_dates: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ISpecialDateRepo for InMemorySpecialDateRepo {
    async fn insert(&self, special_date: &SpecialDate) -> anyhow::Result<()> {
        insert(special_date, &self.special_dates);
        Ok(())
    }

    async fn save(&self, special_date: &SpecialDate) -> anyhow::Result<()> {
        save(special_date, &self.special_dates);
        Ok(())
    }

    async fn find(&self, special_date_id: &ID) -> Option<SpecialDate> {
        find(special_date_id, &self.special_dates)
    }

    async fn find_by_member(&self, member_id: &ID) -> Vec<SpecialDate> {
        find_by(&self.special_dates, |d| d.member_id == *member_id)
    }

    async fn find_active_remindable(&self) -> Vec<SpecialDate> {
        find_by(&self.special_dates, |d| d.is_active && d.send_reminder)
    }
}

use super::IReminderLogRepo;
use crate::repos::shared::inmemory_repo::*;
use keepsake_domain::{ReminderLog, ID};

pub struct InMemoryReminderLogRepo {
    logs: std::sync::Mutex<Vec<ReminderLog>>,
}

impl InMemoryReminderLogRepo {
    pub fn new() -> Self {
        Self {
            logs: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderLogRepo for InMemoryReminderLogRepo {
    async fn insert(&self, log: &ReminderLog) -> anyhow::Result<()> {
        insert(log, &self.logs);
        Ok(())
    }

    async fn save(&self, log: &ReminderLog) -> anyhow::Result<()> {
        save(log, &self.logs);
        Ok(())
    }

    async fn find(&self, log_id: &ID) -> Option<ReminderLog> {
        find(log_id, &self.logs)
    }

    async fn find_by_occurrence_day(
        &self,
        special_date_id: &ID,
        day_start: i64,
        day_end: i64,
    ) -> Option<ReminderLog> {
        let mut logs = find_by(&self.logs, |l| {
            l.special_date_id == *special_date_id
                && l.sent_at >= day_start
                && l.sent_at < day_end
        });
        if logs.is_empty() {
            return None;
        }
        Some(logs.remove(0))
    }

    async fn find_retry_due(&self, now: i64) -> Vec<ReminderLog> {
        find_by(&self.logs, |l| l.retry_due(now))
    }

    async fn find_recent(&self, limit: i64) -> Vec<ReminderLog> {
        let mut logs = find_by(&self.logs, |_| true);
        logs.sort_by_key(|l| std::cmp::Reverse(l.sent_at));
        logs.truncate(limit.max(0) as usize);
        logs
    }
}

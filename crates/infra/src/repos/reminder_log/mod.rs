mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderLogRepo;
use keepsake_domain::{ReminderLog, ID};
pub use postgres::PostgresReminderLogRepo;

#[async_trait::async_trait]
pub trait IReminderLogRepo: Send + Sync {
    async fn insert(&self, log: &ReminderLog) -> anyhow::Result<()>;
    async fn save(&self, log: &ReminderLog) -> anyhow::Result<()>;
    async fn find(&self, log_id: &ID) -> Option<ReminderLog>;
    /// The log dispatched for a special date within `[day_start, day_end)`,
    /// if one exists. At most one log is ever written per special date and
    /// calendar day.
    async fn find_by_occurrence_day(
        &self,
        special_date_id: &ID,
        day_start: i64,
        day_end: i64,
    ) -> Option<ReminderLog>;
    /// Logs whose scheduled retry instant has passed
    async fn find_retry_due(&self, now: i64) -> Vec<ReminderLog>;
    /// Most recently dispatched logs, newest first
    async fn find_recent(&self, limit: i64) -> Vec<ReminderLog>;
}

#[cfg(test)]
mod tests {
    use crate::KeepsakeContext;
    use chrono::NaiveDate;
    use keepsake_domain::{
        DeliveryStatus, EventLabel, RecipientClass, ReminderLog, ReminderRecipient, SpecialDate,
    };

    fn special_date() -> SpecialDate {
        SpecialDate {
            id: Default::default(),
            member_id: Default::default(),
            event_label: EventLabel::Birthday,
            custom_label: None,
            event_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            is_recurring: true,
            send_reminder: true,
            reminder_recipients: vec![RecipientClass::Member],
            reminder_hours_before: 24,
            notes: None,
            is_active: true,
            created: 0,
            updated: 0,
        }
    }

    fn log_sent_at(special_date: &SpecialDate, sent_at: i64) -> ReminderLog {
        ReminderLog::new(
            special_date,
            NaiveDate::from_ymd_opt(2026, 5, 17).unwrap(),
            vec![ReminderRecipient::pending(
                "amina@psn.org".into(),
                RecipientClass::Member,
            )],
            "Today: Amina Bello's Birthday!".into(),
            sent_at,
        )
    }

    #[tokio::test]
    async fn finds_log_within_day_bounds() {
        let ctx = KeepsakeContext::create_inmemory();

        let date = special_date();
        let log = log_sent_at(&date, 5_000);
        assert!(ctx.repos.reminder_logs.insert(&log).await.is_ok());

        let found = ctx
            .repos
            .reminder_logs
            .find_by_occurrence_day(&date.id, 0, 10_000)
            .await;
        assert_eq!(found.expect("To find log").id, log.id);

        // Outside the day window or for another record there is no match
        assert!(ctx
            .repos
            .reminder_logs
            .find_by_occurrence_day(&date.id, 10_000, 20_000)
            .await
            .is_none());
        assert!(ctx
            .repos
            .reminder_logs
            .find_by_occurrence_day(&Default::default(), 0, 10_000)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn finds_logs_due_for_retry() {
        let ctx = KeepsakeContext::create_inmemory();

        let date = special_date();
        let mut failed = log_sent_at(&date, 5_000);
        failed.recipients[0].mark_failed("Connection refused".into());
        failed.finalize_attempt(5_000);
        assert!(failed.will_retry);
        let retry_at = failed.next_retry_at.expect("retry scheduled");

        let mut sent = log_sent_at(&special_date(), 5_000);
        sent.recipients[0].mark_sent(5_000);
        sent.finalize_attempt(5_000);

        for log in [&failed, &sent] {
            assert!(ctx.repos.reminder_logs.insert(log).await.is_ok());
        }

        assert!(ctx
            .repos
            .reminder_logs
            .find_retry_due(retry_at - 1)
            .await
            .is_empty());
        let due = ctx.repos.reminder_logs.find_retry_due(retry_at).await;
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, failed.id);
    }

    #[tokio::test]
    async fn recent_logs_are_newest_first() {
        let ctx = KeepsakeContext::create_inmemory();

        let old = log_sent_at(&special_date(), 1_000);
        let newer = log_sent_at(&special_date(), 2_000);
        let newest = log_sent_at(&special_date(), 3_000);
        for log in [&old, &newer, &newest] {
            assert!(ctx.repos.reminder_logs.insert(log).await.is_ok());
        }

        let recent = ctx.repos.reminder_logs.find_recent(2).await;
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, newest.id);
        assert_eq!(recent[1].id, newer.id);
    }

    #[tokio::test]
    async fn save_replaces_recipient_outcomes() {
        let ctx = KeepsakeContext::create_inmemory();

        let date = special_date();
        let mut log = log_sent_at(&date, 5_000);
        log.recipients[0].mark_failed("Connection refused".into());
        log.finalize_attempt(5_000);
        assert!(ctx.repos.reminder_logs.insert(&log).await.is_ok());

        log.record_retry(6_000);
        log.recipients[0].mark_sent(6_000);
        log.finalize_attempt(6_000);
        assert!(ctx.repos.reminder_logs.save(&log).await.is_ok());

        let stored = ctx
            .repos
            .reminder_logs
            .find(&log.id)
            .await
            .expect("To find log");
        assert_eq!(stored.attempt_count, 2);
        assert_eq!(stored.recipients[0].status, DeliveryStatus::Sent);
        assert!(!stored.will_retry);
    }
}

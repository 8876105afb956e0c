use super::IReminderLogRepo;
use chrono::NaiveDate;
use keepsake_domain::{ReminderLog, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresReminderLogRepo {
    pool: PgPool,
}

impl PostgresReminderLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderLogRaw {
    reminder_log_uid: Uuid,
    special_date_uid: Uuid,
    member_uid: Uuid,
    event_label: String,
    event_date: NaiveDate,
    sent_at: i64,
    recipients: serde_json::Value,
    overall_status: String,
    email_subject: String,
    attempt_count: i64,
    last_attempt_at: i64,
    will_retry: bool,
    next_retry_at: Option<i64>,
    max_retries: i64,
}

impl From<ReminderLogRaw> for ReminderLog {
    fn from(e: ReminderLogRaw) -> Self {
        Self {
            id: e.reminder_log_uid.into(),
            special_date_id: e.special_date_uid.into(),
            member_id: e.member_uid.into(),
            event_label: e.event_label,
            event_date: e.event_date,
            sent_at: e.sent_at,
            recipients: serde_json::from_value(e.recipients).unwrap(),
            overall_status: e.overall_status.parse().unwrap(),
            email_subject: e.email_subject,
            attempt_count: e.attempt_count,
            last_attempt_at: e.last_attempt_at,
            will_retry: e.will_retry,
            next_retry_at: e.next_retry_at,
            max_retries: e.max_retries,
        }
    }
}

#[async_trait::async_trait]
impl IReminderLogRepo for PostgresReminderLogRepo {
    async fn insert(&self, log: &ReminderLog) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_logs(
                reminder_log_uid,
                special_date_uid,
                member_uid,
                event_label,
                event_date,
                sent_at,
                recipients,
                overall_status,
                email_subject,
                attempt_count,
                last_attempt_at,
                will_retry,
                next_retry_at,
                max_retries
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(log.id.inner_ref())
        .bind(log.special_date_id.inner_ref())
        .bind(log.member_id.inner_ref())
        .bind(&log.event_label)
        .bind(log.event_date)
        .bind(log.sent_at)
        .bind(Json(&log.recipients))
        .bind(log.overall_status.as_str())
        .bind(&log.email_subject)
        .bind(log.attempt_count)
        .bind(log.last_attempt_at)
        .bind(log.will_retry)
        .bind(log.next_retry_at)
        .bind(log.max_retries)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert reminder log: {:?}. DB returned error: {:?}",
                log, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, log: &ReminderLog) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminder_logs
            SET recipients = $2,
                overall_status = $3,
                attempt_count = $4,
                last_attempt_at = $5,
                will_retry = $6,
                next_retry_at = $7
            WHERE reminder_log_uid = $1
            "#,
        )
        .bind(log.id.inner_ref())
        .bind(Json(&log.recipients))
        .bind(log.overall_status.as_str())
        .bind(log.attempt_count)
        .bind(log.last_attempt_at)
        .bind(log.will_retry)
        .bind(log.next_retry_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save reminder log: {:?}. DB returned error: {:?}",
                log, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, log_id: &ID) -> Option<ReminderLog> {
        match sqlx::query_as::<_, ReminderLogRaw>(
            r#"
            SELECT * FROM reminder_logs
            WHERE reminder_log_uid = $1
            "#,
        )
        .bind(log_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(log) => log.map(|l| l.into()),
            Err(e) => {
                error!(
                    "Find reminder log with id: {} failed. DB returned error: {:?}",
                    log_id, e
                );
                None
            }
        }
    }

    async fn find_by_occurrence_day(
        &self,
        special_date_id: &ID,
        day_start: i64,
        day_end: i64,
    ) -> Option<ReminderLog> {
        match sqlx::query_as::<_, ReminderLogRaw>(
            r#"
            SELECT * FROM reminder_logs
            WHERE special_date_uid = $1 AND sent_at >= $2 AND sent_at < $3
            ORDER BY sent_at DESC
            LIMIT 1
            "#,
        )
        .bind(special_date_id.inner_ref())
        .bind(day_start)
        .bind(day_end)
        .fetch_optional(&self.pool)
        .await
        {
            Ok(log) => log.map(|l| l.into()),
            Err(e) => {
                error!(
                    "Find reminder log for special date: {} failed. DB returned error: {:?}",
                    special_date_id, e
                );
                None
            }
        }
    }

    async fn find_retry_due(&self, now: i64) -> Vec<ReminderLog> {
        match sqlx::query_as::<_, ReminderLogRaw>(
            r#"
            SELECT * FROM reminder_logs
            WHERE will_retry = TRUE AND next_retry_at IS NOT NULL AND next_retry_at <= $1
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        {
            Ok(logs) => logs.into_iter().map(|l| l.into()).collect(),
            Err(e) => {
                error!(
                    "Find reminder logs due for retry failed. DB returned error: {:?}",
                    e
                );
                vec![]
            }
        }
    }

    async fn find_recent(&self, limit: i64) -> Vec<ReminderLog> {
        match sqlx::query_as::<_, ReminderLogRaw>(
            r#"
            SELECT * FROM reminder_logs
            ORDER BY sent_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        {
            Ok(logs) => logs.into_iter().map(|l| l.into()).collect(),
            Err(e) => {
                error!(
                    "Find recent reminder logs failed. DB returned error: {:?}",
                    e
                );
                vec![]
            }
        }
    }
}

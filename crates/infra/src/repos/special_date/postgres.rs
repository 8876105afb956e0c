use super::ISpecialDateRepo;
use chrono::NaiveDate;
use keepsake_domain::{SpecialDate, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresSpecialDateRepo {
    pool: PgPool,
}

impl PostgresSpecialDateRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SpecialDateRaw {
    special_date_uid: Uuid,
    member_uid: Uuid,
    event_label: String,
    custom_label: Option<String>,
    event_date: NaiveDate,
    is_recurring: bool,
    send_reminder: bool,
    reminder_recipients: serde_json::Value,
    reminder_hours_before: i64,
    notes: Option<String>,
    is_active: bool,
    created: i64,
    updated: i64,
}

impl From<SpecialDateRaw> for SpecialDate {
    fn from(e: SpecialDateRaw) -> Self {
        Self {
            id: e.special_date_uid.into(),
            member_id: e.member_uid.into(),
            event_label: e.event_label.parse().unwrap(),
            custom_label: e.custom_label,
            event_date: e.event_date,
            is_recurring: e.is_recurring,
            send_reminder: e.send_reminder,
            reminder_recipients: serde_json::from_value(e.reminder_recipients).unwrap(),
            reminder_hours_before: e.reminder_hours_before,
            notes: e.notes,
            is_active: e.is_active,
            created: e.created,
            updated: e.updated,
        }
    }
}

#[async_trait::async_trait]
impl ISpecialDateRepo for PostgresSpecialDateRepo {
    async fn insert(&self, special_date: &SpecialDate) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO special_dates(
                special_date_uid,
                member_uid,
                event_label,
                custom_label,
                event_date,
                is_recurring,
                send_reminder,
                reminder_recipients,
                reminder_hours_before,
                notes,
                is_active,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(special_date.id.inner_ref())
        .bind(special_date.member_id.inner_ref())
        .bind(special_date.event_label.as_str())
        .bind(&special_date.custom_label)
        .bind(special_date.event_date)
        .bind(special_date.is_recurring)
        .bind(special_date.send_reminder)
        .bind(Json(&special_date.reminder_recipients))
        .bind(special_date.reminder_hours_before)
        .bind(&special_date.notes)
        .bind(special_date.is_active)
        .bind(special_date.created)
        .bind(special_date.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert special date: {:?}. DB returned error: {:?}",
                special_date, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, special_date: &SpecialDate) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE special_dates
            SET event_label = $2,
                custom_label = $3,
                event_date = $4,
                is_recurring = $5,
                send_reminder = $6,
                reminder_recipients = $7,
                reminder_hours_before = $8,
                notes = $9,
                is_active = $10,
                updated = $11
            WHERE special_date_uid = $1
            "#,
        )
        .bind(special_date.id.inner_ref())
        .bind(special_date.event_label.as_str())
        .bind(&special_date.custom_label)
        .bind(special_date.event_date)
        .bind(special_date.is_recurring)
        .bind(special_date.send_reminder)
        .bind(Json(&special_date.reminder_recipients))
        .bind(special_date.reminder_hours_before)
        .bind(&special_date.notes)
        .bind(special_date.is_active)
        .bind(special_date.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save special date: {:?}. DB returned error: {:?}",
                special_date, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, special_date_id: &ID) -> Option<SpecialDate> {
        match sqlx::query_as::<_, SpecialDateRaw>(
            r#"
            SELECT * FROM special_dates
            WHERE special_date_uid = $1
            "#,
        )
        .bind(special_date_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(special_date) => special_date.map(|d| d.into()),
            Err(e) => {
                error!(
                    "Find special date with id: {} failed. DB returned error: {:?}",
                    special_date_id, e
                );
                None
            }
        }
    }

    async fn find_by_member(&self, member_id: &ID) -> Vec<SpecialDate> {
        match sqlx::query_as::<_, SpecialDateRaw>(
            r#"
            SELECT * FROM special_dates
            WHERE member_uid = $1
            "#,
        )
        .bind(member_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        {
            Ok(special_dates) => special_dates.into_iter().map(|d| d.into()).collect(),
            Err(e) => {
                error!(
                    "Find special dates for member: {} failed. DB returned error: {:?}",
                    member_id, e
                );
                vec![]
            }
        }
    }

    async fn find_active_remindable(&self) -> Vec<SpecialDate> {
        match sqlx::query_as::<_, SpecialDateRaw>(
            r#"
            SELECT * FROM special_dates
            WHERE is_active = TRUE AND send_reminder = TRUE
            "#,
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(special_dates) => special_dates.into_iter().map(|d| d.into()).collect(),
            Err(e) => {
                error!(
                    "Find remindable special dates failed. DB returned error: {:?}",
                    e
                );
                vec![]
            }
        }
    }
}

use chrono::NaiveDate;
use keepsake_domain::{EventLabel, RecipientClass, SpecialDate, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDateDTO {
    pub id: ID,
    pub member_id: ID,
    pub event_label: EventLabel,
    pub custom_label: Option<String>,
    pub event_date: NaiveDate,
    pub is_recurring: bool,
    pub send_reminder: bool,
    pub reminder_recipients: Vec<RecipientClass>,
    pub reminder_hours_before: i64,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created: i64,
    pub updated: i64,
}

impl SpecialDateDTO {
    pub fn new(special_date: SpecialDate) -> Self {
        Self {
            id: special_date.id,
            member_id: special_date.member_id,
            event_label: special_date.event_label,
            custom_label: special_date.custom_label,
            event_date: special_date.event_date,
            is_recurring: special_date.is_recurring,
            send_reminder: special_date.send_reminder,
            reminder_recipients: special_date.reminder_recipients,
            reminder_hours_before: special_date.reminder_hours_before,
            notes: special_date.notes,
            is_active: special_date.is_active,
            created: special_date.created,
            updated: special_date.updated,
        }
    }
}

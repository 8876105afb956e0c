use chrono::NaiveDate;
use keepsake_domain::{Member, ReminderLog, ReminderRecipient, ReminderStatus, SpecialDate, ID};
use serde::{Deserialize, Serialize};

use crate::dtos::{MemberDTO, SpecialDateDTO};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderLogDTO {
    pub id: ID,
    pub special_date_id: ID,
    pub member_id: ID,
    pub event_label: String,
    pub event_date: NaiveDate,
    pub sent_at: i64,
    pub recipients: Vec<ReminderRecipient>,
    pub overall_status: ReminderStatus,
    pub email_subject: String,
    pub attempt_count: i64,
    pub last_attempt_at: i64,
    pub will_retry: bool,
    pub next_retry_at: Option<i64>,
    pub max_retries: i64,
}

impl ReminderLogDTO {
    pub fn new(log: ReminderLog) -> Self {
        Self {
            id: log.id,
            special_date_id: log.special_date_id,
            member_id: log.member_id,
            event_label: log.event_label,
            event_date: log.event_date,
            sent_at: log.sent_at,
            recipients: log.recipients,
            overall_status: log.overall_status,
            email_subject: log.email_subject,
            attempt_count: log.attempt_count,
            last_attempt_at: log.last_attempt_at,
            will_retry: log.will_retry,
            next_retry_at: log.next_retry_at,
            max_retries: log.max_retries,
        }
    }
}

/// A special date currently inside its reminder window. `is_retry` marks
/// entries that already have a failed log for today and are waiting on a
/// retry attempt rather than a first dispatch.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingReminderDTO {
    pub special_date: SpecialDateDTO,
    pub member: MemberDTO,
    pub days_until: i64,
    pub is_retry: bool,
}

impl UpcomingReminderDTO {
    pub fn new(special_date: SpecialDate, member: Member, days_until: i64, is_retry: bool) -> Self {
        Self {
            special_date: SpecialDateDTO::new(special_date),
            member: MemberDTO::new(member),
            days_until,
            is_retry,
        }
    }
}

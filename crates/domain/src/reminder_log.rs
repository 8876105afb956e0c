use crate::shared::entity::{Entity, ID};
use crate::special_date::{RecipientClass, SpecialDate};
use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub const DEFAULT_MAX_RETRIES: i64 = 3;
pub const RETRY_DELAY_MILLIS: i64 = 60 * 60 * 1000;

/// Delivery record for one occurrence of a special date. Exactly one log
/// exists per special date and calendar day, so its presence is what makes
/// a reminder run idempotent. Failed runs keep the same log and mutate it
/// on every retry attempt.
#[derive(Debug, Clone)]
pub struct ReminderLog {
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

/// One concrete address targeted by a reminder, with its own delivery outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRecipient {
    pub email: String,
    pub recipient_type: RecipientClass,
    pub status: DeliveryStatus,
    pub sent_at: Option<i64>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Failed,
    Bounced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderStatus {
    Pending,
    Sent,
    #[serde(rename = "Partially Sent")]
    PartiallySent,
    Failed,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderStatus::Pending => "Pending",
            ReminderStatus::Sent => "Sent",
            ReminderStatus::PartiallySent => "Partially Sent",
            ReminderStatus::Failed => "Failed",
        }
    }
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidReminderStatusError {
    #[error("Reminder status: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for ReminderStatus {
    type Err = InvalidReminderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ReminderStatus::Pending),
            "Sent" => Ok(ReminderStatus::Sent),
            "Partially Sent" => Ok(ReminderStatus::PartiallySent),
            "Failed" => Ok(ReminderStatus::Failed),
            _ => Err(InvalidReminderStatusError::Unrecognized(s.to_string())),
        }
    }
}

impl ReminderRecipient {
    pub fn pending(email: String, recipient_type: RecipientClass) -> Self {
        Self {
            email,
            recipient_type,
            status: DeliveryStatus::Pending,
            sent_at: None,
            error: None,
        }
    }

    pub fn mark_sent(&mut self, now: i64) {
        self.status = DeliveryStatus::Sent;
        self.sent_at = Some(now);
        self.error = None;
    }

    pub fn mark_failed(&mut self, error: String) {
        self.status = DeliveryStatus::Failed;
        self.error = Some(error);
    }
}

/// Collapses recipients sharing an address into one entry. The first class
/// that produced the address wins, so a member never receives the same
/// reminder twice through an overlapping officer or broadcast list.
pub fn dedup_recipients(recipients: Vec<ReminderRecipient>) -> Vec<ReminderRecipient> {
    recipients
        .into_iter()
        .unique_by(|recipient| recipient.email.clone())
        .collect()
}

impl ReminderLog {
    pub fn new(
        special_date: &SpecialDate,
        occurrence: NaiveDate,
        recipients: Vec<ReminderRecipient>,
        email_subject: String,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            special_date_id: special_date.id.clone(),
            member_id: special_date.member_id.clone(),
            event_label: special_date.display_label().to_string(),
            event_date: occurrence,
            sent_at: now,
            recipients,
            overall_status: ReminderStatus::Pending,
            email_subject,
            attempt_count: 1,
            last_attempt_at: now,
            will_retry: false,
            next_retry_at: None,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Derives the overall status from the per-recipient outcomes and
    /// schedules the next retry while attempts remain. An empty recipient
    /// list counts as fully sent.
    pub fn finalize_attempt(&mut self, now: i64) {
        let sent_count = self
            .recipients
            .iter()
            .filter(|r| r.status == DeliveryStatus::Sent)
            .count();
        self.overall_status = if sent_count == self.recipients.len() {
            ReminderStatus::Sent
        } else if sent_count > 0 {
            ReminderStatus::PartiallySent
        } else {
            ReminderStatus::Failed
        };

        if self.overall_status == ReminderStatus::Sent {
            self.will_retry = false;
            self.next_retry_at = None;
        } else if self.attempt_count < self.max_retries {
            self.will_retry = true;
            self.next_retry_at = Some(now + RETRY_DELAY_MILLIS);
        } else {
            self.will_retry = false;
            self.next_retry_at = None;
        }
    }

    /// Registers the start of a retry attempt
    pub fn record_retry(&mut self, now: i64) {
        self.attempt_count += 1;
        self.last_attempt_at = now;
        if self.attempt_count >= self.max_retries {
            self.will_retry = false;
        }
    }

    pub fn retry_due(&self, now: i64) -> bool {
        self.will_retry && self.next_retry_at.map(|at| at <= now).unwrap_or(false)
    }
}

impl Entity for ReminderLog {
    fn id(&self) -> &ID {
        &self.id
    }
}

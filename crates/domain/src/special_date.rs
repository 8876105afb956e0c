use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// A celebration tracked for a member, normally recurring yearly. When
/// `send_reminder` is set the dispatch pipeline emails the configured
/// recipient classes once per occurrence, inside the window that opens
/// `reminder_hours_before` hours ahead of the occurrence.
#[derive(Debug, Clone)]
pub struct SpecialDate {
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventLabel {
    Birthday,
    #[serde(rename = "Wedding Anniversary")]
    WeddingAnniversary,
    #[serde(rename = "Work Anniversary")]
    WorkAnniversary,
    #[serde(rename = "Induction Anniversary")]
    InductionAnniversary,
    Other,
}

/// A named recipient group, expanded to concrete addresses at dispatch time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecipientClass {
    Member,
    #[serde(rename = "Welfare Officers")]
    WelfareOfficers,
    #[serde(rename = "All Members")]
    AllMembers,
}

impl EventLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventLabel::Birthday => "Birthday",
            EventLabel::WeddingAnniversary => "Wedding Anniversary",
            EventLabel::WorkAnniversary => "Work Anniversary",
            EventLabel::InductionAnniversary => "Induction Anniversary",
            EventLabel::Other => "Other",
        }
    }
}

impl Display for EventLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidEventLabelError {
    #[error("Event label: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for EventLabel {
    type Err = InvalidEventLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Birthday" => Ok(EventLabel::Birthday),
            "Wedding Anniversary" => Ok(EventLabel::WeddingAnniversary),
            "Work Anniversary" => Ok(EventLabel::WorkAnniversary),
            "Induction Anniversary" => Ok(EventLabel::InductionAnniversary),
            "Other" => Ok(EventLabel::Other),
            _ => Err(InvalidEventLabelError::Unrecognized(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidSpecialDateError {
    #[error("A custom label is required exactly when the event label is Other")]
    CustomLabelMismatch,
    #[error("At least one recipient class is required when reminders are enabled")]
    EmptyRecipients,
    #[error("Reminder window of {0} hours is outside the allowed range of 1 to 168")]
    ReminderWindowOutOfRange(i64),
    #[error("Notes cannot exceed 500 characters")]
    NotesTooLong,
}

impl SpecialDate {
    pub const MIN_REMINDER_HOURS: i64 = 1;
    // 7 days
    pub const MAX_REMINDER_HOURS: i64 = 168;
    pub const MAX_NOTES_LEN: usize = 500;

    /// The label rendered into subjects and reminder bodies
    pub fn display_label(&self) -> &str {
        match (&self.event_label, &self.custom_label) {
            (EventLabel::Other, Some(custom_label)) => custom_label,
            (event_label, _) => event_label.as_str(),
        }
    }

    pub fn validate(&self) -> Result<(), InvalidSpecialDateError> {
        let has_custom_label = self
            .custom_label
            .as_ref()
            .map(|l| !l.trim().is_empty())
            .unwrap_or(false);
        if has_custom_label != (self.event_label == EventLabel::Other) {
            return Err(InvalidSpecialDateError::CustomLabelMismatch);
        }
        if self.send_reminder && self.reminder_recipients.is_empty() {
            return Err(InvalidSpecialDateError::EmptyRecipients);
        }
        if !(Self::MIN_REMINDER_HOURS..=Self::MAX_REMINDER_HOURS)
            .contains(&self.reminder_hours_before)
        {
            return Err(InvalidSpecialDateError::ReminderWindowOutOfRange(
                self.reminder_hours_before,
            ));
        }
        if let Some(notes) = &self.notes {
            if notes.chars().count() > Self::MAX_NOTES_LEN {
                return Err(InvalidSpecialDateError::NotesTooLong);
            }
        }
        Ok(())
    }
}

impl Entity for SpecialDate {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn valid_special_date() -> SpecialDate {
        SpecialDate {
            id: Default::default(),
            member_id: Default::default(),
            event_label: EventLabel::Birthday,
            custom_label: None,
            event_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            is_recurring: true,
            send_reminder: true,
            reminder_recipients: vec![RecipientClass::Member, RecipientClass::WelfareOfficers],
            reminder_hours_before: 24,
            notes: None,
            is_active: true,
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn it_accepts_a_valid_record() {
        assert!(valid_special_date().validate().is_ok());
    }

    #[test]
    fn custom_label_is_tied_to_other() {
        let mut special_date = valid_special_date();
        special_date.custom_label = Some("Graduation".into());
        assert_eq!(
            special_date.validate(),
            Err(InvalidSpecialDateError::CustomLabelMismatch)
        );

        special_date.event_label = EventLabel::Other;
        assert!(special_date.validate().is_ok());
        assert_eq!(special_date.display_label(), "Graduation");

        special_date.custom_label = None;
        assert_eq!(
            special_date.validate(),
            Err(InvalidSpecialDateError::CustomLabelMismatch)
        );
    }

    #[test]
    fn reminders_require_recipients() {
        let mut special_date = valid_special_date();
        special_date.reminder_recipients = Vec::new();
        assert_eq!(
            special_date.validate(),
            Err(InvalidSpecialDateError::EmptyRecipients)
        );

        // without reminders an empty recipient list is fine
        special_date.send_reminder = false;
        assert!(special_date.validate().is_ok());
    }

    #[test]
    fn reminder_window_is_bounded() {
        let mut special_date = valid_special_date();
        for hours in [0, -5, 169] {
            special_date.reminder_hours_before = hours;
            assert_eq!(
                special_date.validate(),
                Err(InvalidSpecialDateError::ReminderWindowOutOfRange(hours))
            );
        }
        for hours in [1, 24, 168] {
            special_date.reminder_hours_before = hours;
            assert!(special_date.validate().is_ok());
        }
    }

    #[test]
    fn notes_are_bounded() {
        let mut special_date = valid_special_date();
        special_date.notes = Some("n".repeat(501));
        assert_eq!(
            special_date.validate(),
            Err(InvalidSpecialDateError::NotesTooLong)
        );
        special_date.notes = Some("n".repeat(500));
        assert!(special_date.validate().is_ok());
    }

    #[test]
    fn labels_roundtrip_through_strings() {
        for label in [
            EventLabel::Birthday,
            EventLabel::WeddingAnniversary,
            EventLabel::WorkAnniversary,
            EventLabel::InductionAnniversary,
            EventLabel::Other,
        ] {
            assert_eq!(label.to_string().parse::<EventLabel>().unwrap(), label);
        }
    }
}

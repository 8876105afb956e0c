use chrono::NaiveDate;
use keepsake_domain::{EventLabel, RecipientClass, SpecialDate, ID};
use serde::{Deserialize, Serialize};

use crate::dtos::SpecialDateDTO;

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDateResponse {
    pub special_date: SpecialDateDTO,
}

impl SpecialDateResponse {
    pub fn new(special_date: SpecialDate) -> Self {
        Self {
            special_date: SpecialDateDTO::new(special_date),
        }
    }
}

pub mod create_special_date {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub member_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub event_label: EventLabel,
        #[serde(default)]
        pub custom_label: Option<String>,
        pub event_date: NaiveDate,
        #[serde(default)]
        pub is_recurring: Option<bool>,
        #[serde(default)]
        pub send_reminder: Option<bool>,
        #[serde(default)]
        pub reminder_recipients: Option<Vec<RecipientClass>>,
        #[serde(default)]
        pub reminder_hours_before: Option<i64>,
        #[serde(default)]
        pub notes: Option<String>,
    }

    pub type APIResponse = SpecialDateResponse;
}

pub mod get_member_special_dates {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub member_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub special_dates: Vec<SpecialDateDTO>,
    }

    impl APIResponse {
        pub fn new(special_dates: Vec<SpecialDate>) -> Self {
            Self {
                special_dates: special_dates.into_iter().map(SpecialDateDTO::new).collect(),
            }
        }
    }
}

pub mod update_special_date {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub special_date_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub event_label: Option<EventLabel>,
        #[serde(default)]
        pub custom_label: Option<String>,
        #[serde(default)]
        pub event_date: Option<NaiveDate>,
        #[serde(default)]
        pub is_recurring: Option<bool>,
        #[serde(default)]
        pub send_reminder: Option<bool>,
        #[serde(default)]
        pub reminder_recipients: Option<Vec<RecipientClass>>,
        #[serde(default)]
        pub reminder_hours_before: Option<i64>,
        #[serde(default)]
        pub notes: Option<String>,
    }

    pub type APIResponse = SpecialDateResponse;
}

pub mod delete_special_date {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub special_date_id: ID,
    }

    pub type APIResponse = SpecialDateResponse;
}

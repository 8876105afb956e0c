use keepsake_domain::ReminderLog;
use serde::{Deserialize, Serialize};

use crate::dtos::{ReminderLogDTO, UpcomingReminderDTO};

pub mod trigger_reminders {
    use super::*;

    #[derive(Debug, Clone, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub processed: u64,
        pub sent: u64,
        pub failed: u64,
        pub skipped: u64,
    }
}

pub mod get_upcoming_reminders {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub upcoming: Vec<UpcomingReminderDTO>,
    }

    impl APIResponse {
        pub fn new(upcoming: Vec<UpcomingReminderDTO>) -> Self {
            Self { upcoming }
        }
    }
}

pub mod get_reminder_logs {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub limit: Option<i64>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub logs: Vec<ReminderLogDTO>,
    }

    impl APIResponse {
        pub fn new(logs: Vec<ReminderLog>) -> Self {
            Self {
                logs: logs.into_iter().map(ReminderLogDTO::new).collect(),
            }
        }
    }
}

use actix_web::web;

mod dispatch;
mod get_due_special_dates;
mod get_reminder_logs;
pub mod process_reminders;
mod recipients;
pub mod retry_failed_reminders;
mod template;
mod trigger_reminders;

use get_due_special_dates::get_upcoming_reminders_controller;
use get_reminder_logs::get_reminder_logs_controller;
use trigger_reminders::trigger_reminders_controller;

#[cfg(test)]
pub(crate) mod test_helpers {
    use chrono::{NaiveDate, TimeZone, Utc};
    use keepsake_infra::ISys;

    /// Clock pinned to a fixed instant so runs can be replayed at exact
    /// wall-clock times
    pub struct StaticTimeSys(pub i64);

    impl StaticTimeSys {
        /// The given UTC wall-clock hour on the given day
        pub fn at(year: i32, month: u32, day: u32, hour: u32) -> Self {
            let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            let instant = Utc.from_utc_datetime(&date.and_hms_opt(hour, 0, 0).unwrap());
            Self(instant.timestamp_millis())
        }
    }

    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Run the reminder pipeline now instead of waiting for the daily job
    cfg.route(
        "/reminders/trigger",
        web::post().to(trigger_reminders_controller),
    );
    // Special dates currently inside their reminder window
    cfg.route(
        "/reminders/upcoming",
        web::get().to(get_upcoming_reminders_controller),
    );
    // The delivery ledger, newest first
    cfg.route(
        "/reminders/logs",
        web::get().to(get_reminder_logs_controller),
    );
}

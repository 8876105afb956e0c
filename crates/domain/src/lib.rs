mod admin;
mod date;
mod member;
mod occurrence;
mod reminder_log;
mod shared;
mod special_date;

pub use admin::{Admin, AdminRole, InvalidAdminRoleError, Permission};
pub use date::{get_month_length, is_leap_year};
pub use member::Member;
pub use occurrence::{
    day_bounds_millis, days_until, local_day, local_instant_millis, next_occurrence,
    occurrence_in_year,
};
pub use reminder_log::{
    dedup_recipients, DeliveryStatus, InvalidReminderStatusError, ReminderLog, ReminderRecipient,
    ReminderStatus, DEFAULT_MAX_RETRIES, RETRY_DELAY_MILLIS,
};
pub use shared::entity::{Entity, ID};
pub use special_date::{
    EventLabel, InvalidEventLabelError, InvalidSpecialDateError, RecipientClass, SpecialDate,
};

use crate::{
    error::KeepsakeError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute_with_permissions, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use keepsake_api_structs::dtos::UpcomingReminderDTO;
use keepsake_api_structs::get_upcoming_reminders::APIResponse;
use keepsake_domain::{
    day_bounds_millis, days_until, local_day, Member, Permission, ReminderLog, SpecialDate,
};
use keepsake_infra::KeepsakeContext;
use tracing::warn;

/// A special date due for dispatch right now. When a failed log from today
/// is attached the reminder is a retry, otherwise it is a first attempt.
pub struct DueReminder {
    pub special_date: SpecialDate,
    pub member: Member,
    pub days_until: i64,
    pub existing_log: Option<ReminderLog>,
}

pub struct DueSet {
    pub due: Vec<DueReminder>,
    pub skipped: u64,
}

/// Selects the special dates whose next occurrence falls inside their
/// reminder window and that have not been handled today. The ledger makes
/// the selection idempotent: a log for today excludes the special date
/// unless that log is waiting on a due retry.
pub(crate) async fn find_due_reminders(ctx: &KeepsakeContext) -> DueSet {
    let now = ctx.sys.get_timestamp_millis();
    let today = local_day(now, &ctx.config.timezone);
    let (day_start, day_end) = day_bounds_millis(today, &ctx.config.timezone);

    let mut due = Vec::new();
    let mut skipped = 0;
    for special_date in ctx.repos.special_dates.find_active_remindable().await {
        let days = days_until(special_date.event_date, special_date.is_recurring, today);
        let hours_until = days * 24;
        if hours_until < 0 || hours_until > special_date.reminder_hours_before {
            continue;
        }

        let member = match ctx.repos.members.find(&special_date.member_id).await {
            Some(member) if member.is_active => member,
            _ => {
                warn!(
                    "Skipping the reminder for special date: {} because its member: {} is missing or inactive",
                    special_date.id, special_date.member_id
                );
                skipped += 1;
                continue;
            }
        };

        let existing_log = ctx
            .repos
            .reminder_logs
            .find_by_occurrence_day(&special_date.id, day_start, day_end)
            .await;
        match existing_log {
            Some(log) if log.retry_due(now) => due.push(DueReminder {
                special_date,
                member,
                days_until: days,
                existing_log: Some(log),
            }),
            // already handled today
            Some(_) => continue,
            None => due.push(DueReminder {
                special_date,
                member,
                days_until: days,
                existing_log: None,
            }),
        }
    }
    DueSet { due, skipped }
}

pub async fn get_upcoming_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<KeepsakeContext>,
) -> Result<HttpResponse, KeepsakeError> {
    let admin = protect_admin_route(&http_req, &ctx).await?;

    execute_with_permissions(GetUpcomingRemindersUseCase {}, &admin, &ctx)
        .await
        .map(|due_set| {
            let upcoming = due_set
                .due
                .into_iter()
                .map(|d| {
                    let is_retry = d.existing_log.is_some();
                    UpcomingReminderDTO::new(d.special_date, d.member, d.days_until, is_retry)
                })
                .collect();
            HttpResponse::Ok().json(APIResponse::new(upcoming))
        })
        .map_err(KeepsakeError::from)
}

/// Read-only preview of what a reminder run started right now would handle
#[derive(Debug)]
pub struct GetUpcomingRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for KeepsakeError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUpcomingRemindersUseCase {
    type Response = DueSet;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUpcomingReminders";

    async fn execute(&mut self, ctx: &KeepsakeContext) -> Result<Self::Response, Self::Error> {
        Ok(find_due_reminders(ctx).await)
    }
}

impl PermissionBoundary for GetUpcomingRemindersUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ViewMembers]
    }
}

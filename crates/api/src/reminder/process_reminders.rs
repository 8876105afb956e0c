use super::{
    dispatch::{dispatch_new, redispatch_log},
    get_due_special_dates::find_due_reminders,
};
use crate::{
    error::KeepsakeError,
    shared::usecase::{PermissionBoundary, UseCase},
};
use keepsake_domain::Permission;
use keepsake_infra::KeepsakeContext;
use tracing::info;

/// Outcome counts for one reminder run. `processed` counts reminders while
/// `sent` and `failed` count individual deliveries, so one reminder with
/// three recipients can contribute three to `sent`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderRunSummary {
    pub processed: u64,
    pub sent: u64,
    pub failed: u64,
    pub skipped: u64,
}

/// One sweep of the reminder pipeline: select the due special dates, deliver
/// to their recipients one at a time and record every attempt in the ledger
#[derive(Debug)]
pub struct ProcessRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for KeepsakeError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ProcessRemindersUseCase {
    type Response = ReminderRunSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "ProcessReminders";

    async fn execute(&mut self, ctx: &KeepsakeContext) -> Result<Self::Response, Self::Error> {
        let due_set = find_due_reminders(ctx).await;
        let mut summary = ReminderRunSummary {
            skipped: due_set.skipped,
            ..Default::default()
        };

        for reminder in due_set.due {
            summary.processed += 1;
            let (sent, failed) = match reminder.existing_log {
                Some(mut log) => {
                    redispatch_log(&mut log, &reminder.special_date, &reminder.member, ctx).await
                }
                None => {
                    dispatch_new(
                        &reminder.special_date,
                        &reminder.member,
                        reminder.days_until,
                        ctx,
                    )
                    .await
                }
            };
            summary.sent += sent;
            summary.failed += failed;
        }

        info!(
            "Reminder run finished. Processed: {}, sent: {}, failed: {}, skipped: {}",
            summary.processed, summary.sent, summary.failed, summary.skipped
        );
        Ok(summary)
    }
}

impl PermissionBoundary for ProcessRemindersUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::SendReminders]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::test_helpers::StaticTimeSys;
    use crate::shared::usecase::execute;
    use chrono::NaiveDate;
    use keepsake_domain::{
        Admin, AdminRole, DeliveryStatus, EventLabel, Member, RecipientClass, ReminderStatus,
        SpecialDate, RETRY_DELAY_MILLIS,
    };
    use keepsake_infra::InMemoryMailer;
    use std::sync::Arc;

    struct Scenario {
        ctx: KeepsakeContext,
        mailer: Arc<InMemoryMailer>,
        member: Member,
    }

    /// Amina's birthday falls on 2026-05-16 and the clock starts at 08:00
    /// that morning, with one welfare officer on file
    async fn birthday_this_morning() -> Scenario {
        let mut ctx = KeepsakeContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys::at(2026, 5, 16, 8));
        let mailer = Arc::new(InMemoryMailer::new());
        ctx.mailer = mailer.clone();

        let member = Member::new("Amina Bello", "amina@psn.org", 0);
        ctx.repos.members.insert(&member).await.unwrap();
        let officer = Admin::new("Ngozi Okafor", "ngozi@psn.org", AdminRole::WelfareSecretary);
        ctx.repos.admins.insert(&officer).await.unwrap();

        let special_date = SpecialDate {
            id: Default::default(),
            member_id: member.id.clone(),
            event_label: EventLabel::Birthday,
            custom_label: None,
            event_date: NaiveDate::from_ymd_opt(1990, 5, 16).unwrap(),
            is_recurring: true,
            send_reminder: true,
            reminder_recipients: vec![RecipientClass::Member, RecipientClass::WelfareOfficers],
            reminder_hours_before: 24,
            notes: None,
            is_active: true,
            created: 0,
            updated: 0,
        };
        ctx.repos.special_dates.insert(&special_date).await.unwrap();

        Scenario { ctx, mailer, member }
    }

    #[actix_web::main]
    #[test]
    async fn a_run_delivers_and_records_the_attempt() {
        let scenario = birthday_this_morning().await;

        let summary = execute(ProcessRemindersUseCase {}, &scenario.ctx)
            .await
            .expect("To run the reminder pipeline");
        assert_eq!(
            summary,
            ReminderRunSummary {
                processed: 1,
                sent: 2,
                failed: 0,
                skipped: 0,
            }
        );
        assert_eq!(scenario.mailer.deliveries_to("amina@psn.org"), 1);
        assert_eq!(scenario.mailer.deliveries_to("ngozi@psn.org"), 1);

        let logs = scenario.ctx.repos.reminder_logs.find_recent(10).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].overall_status, ReminderStatus::Sent);
        assert_eq!(logs[0].member_id, scenario.member.id);
        assert_eq!(logs[0].email_subject, "Today: Amina Bello's Birthday!");
    }

    #[actix_web::main]
    #[test]
    async fn a_second_run_the_same_day_delivers_nothing() {
        let scenario = birthday_this_morning().await;

        execute(ProcessRemindersUseCase {}, &scenario.ctx)
            .await
            .expect("To run the reminder pipeline");
        let summary = execute(ProcessRemindersUseCase {}, &scenario.ctx)
            .await
            .expect("To run the reminder pipeline again");
        assert_eq!(summary, ReminderRunSummary::default());
        assert_eq!(scenario.mailer.deliveries_to("amina@psn.org"), 1);
        assert_eq!(scenario.ctx.repos.reminder_logs.find_recent(10).await.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn failed_deliveries_come_back_in_a_later_run() {
        let mut scenario = birthday_this_morning().await;
        scenario.mailer.fail_address("amina@psn.org");

        let summary = execute(ProcessRemindersUseCase {}, &scenario.ctx)
            .await
            .expect("To run the reminder pipeline");
        assert_eq!(summary.sent, 1);
        assert_eq!(summary.failed, 1);

        let log = scenario
            .ctx
            .repos
            .reminder_logs
            .find_recent(10)
            .await
            .remove(0);
        assert_eq!(log.overall_status, ReminderStatus::PartiallySent);
        assert!(log.will_retry);
        assert_eq!(
            log.next_retry_at,
            Some(StaticTimeSys::at(2026, 5, 16, 8).0 + RETRY_DELAY_MILLIS)
        );

        // an immediate rerun leaves the log alone, the retry is not due yet
        let summary = execute(ProcessRemindersUseCase {}, &scenario.ctx)
            .await
            .expect("To rerun the reminder pipeline");
        assert_eq!(summary.processed, 0);

        // an hour later only the failed recipient is retried
        scenario.ctx.sys = Arc::new(StaticTimeSys::at(2026, 5, 16, 9));
        scenario.mailer.clear_failures();
        let summary = execute(ProcessRemindersUseCase {}, &scenario.ctx)
            .await
            .expect("To rerun the reminder pipeline");
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.sent, 1);
        assert_eq!(scenario.mailer.deliveries_to("amina@psn.org"), 1);
        assert_eq!(scenario.mailer.deliveries_to("ngozi@psn.org"), 1);

        let log = scenario
            .ctx
            .repos
            .reminder_logs
            .find_recent(10)
            .await
            .remove(0);
        assert_eq!(log.overall_status, ReminderStatus::Sent);
        assert_eq!(log.attempt_count, 2);
        assert!(!log.will_retry);
        assert!(log
            .recipients
            .iter()
            .all(|r| r.status == DeliveryStatus::Sent));
    }

    #[actix_web::main]
    #[test]
    async fn reminders_without_a_reachable_member_are_skipped() {
        let scenario = birthday_this_morning().await;

        let mut member = scenario.member.clone();
        member.is_active = false;
        scenario.ctx.repos.members.save(&member).await.unwrap();

        let summary = execute(ProcessRemindersUseCase {}, &scenario.ctx)
            .await
            .expect("To run the reminder pipeline");
        assert_eq!(
            summary,
            ReminderRunSummary {
                skipped: 1,
                ..Default::default()
            }
        );
        assert_eq!(scenario.mailer.deliveries_to("amina@psn.org"), 0);
    }
}

use super::{dispatch::redispatch_log, process_reminders::ReminderRunSummary};
use crate::{error::KeepsakeError, shared::usecase::UseCase};
use keepsake_infra::KeepsakeContext;
use tracing::{error, info, warn};

/// Sweeps the ledger for logs whose scheduled retry has come due and
/// re-delivers them. Logs whose special date or member has gone missing or
/// inactive since the first attempt have their retry cleared instead.
#[derive(Debug)]
pub struct RetryFailedRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for KeepsakeError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RetryFailedRemindersUseCase {
    type Response = ReminderRunSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "RetryFailedReminders";

    async fn execute(&mut self, ctx: &KeepsakeContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let logs = ctx.repos.reminder_logs.find_retry_due(now).await;

        let mut summary = ReminderRunSummary::default();
        for mut log in logs {
            let special_date = ctx.repos.special_dates.find(&log.special_date_id).await;
            let member = ctx.repos.members.find(&log.member_id).await;
            let (special_date, member) = match (special_date, member) {
                (Some(special_date), Some(member))
                    if special_date.is_active && member.is_active =>
                {
                    (special_date, member)
                }
                _ => {
                    warn!(
                        "Dropping the retry for reminder log: {} because its special date or member is missing or inactive",
                        log.id
                    );
                    log.will_retry = false;
                    log.next_retry_at = None;
                    if let Err(e) = ctx.repos.reminder_logs.save(&log).await {
                        error!(
                            "Unable to clear the retry on reminder log: {}. Error: {:?}",
                            log.id, e
                        );
                    }
                    summary.skipped += 1;
                    continue;
                }
            };

            summary.processed += 1;
            let (sent, failed) = redispatch_log(&mut log, &special_date, &member, ctx).await;
            summary.sent += sent;
            summary.failed += failed;
        }

        if summary != ReminderRunSummary::default() {
            info!(
                "Retry sweep finished. Processed: {}, sent: {}, failed: {}, skipped: {}",
                summary.processed, summary.sent, summary.failed, summary.skipped
            );
        }
        Ok(summary)
    }
}

use super::{recipients::resolve_recipients, template::render_reminder, template::RenderedReminder};
use actix_web::rt::time::sleep;
use keepsake_domain::{local_day, next_occurrence, DeliveryStatus, Member, ReminderLog, SpecialDate};
use keepsake_infra::{Email, KeepsakeContext};
use std::time::Duration;
use tracing::{error, info, warn};

/// Pause between consecutive sends so the relay is not hammered
pub(crate) const INTER_SEND_DELAY_MILLIS: u64 = 100;

/// Delivers the rendered reminder to every recipient that has not already
/// received it, marking each with its outcome. Returns the sent and failed
/// counts of this attempt.
pub(crate) async fn send_to_recipients(
    rendered: &RenderedReminder,
    recipients: &mut [keepsake_domain::ReminderRecipient],
    ctx: &KeepsakeContext,
) -> (u64, u64) {
    let (mut sent, mut failed) = (0, 0);
    for recipient in recipients.iter_mut() {
        if recipient.status == DeliveryStatus::Sent {
            continue;
        }
        if sent + failed > 0 {
            sleep(Duration::from_millis(INTER_SEND_DELAY_MILLIS)).await;
        }
        let email = Email {
            to: recipient.email.clone(),
            subject: rendered.subject.clone(),
            html: rendered.html.clone(),
            text: rendered.text.clone(),
        };
        match ctx.mailer.send(&email).await {
            Ok(receipt) => {
                info!(
                    "Reminder email to: {} was accepted with message id: {}",
                    recipient.email, receipt.message_id
                );
                recipient.mark_sent(ctx.sys.get_timestamp_millis());
                sent += 1;
            }
            Err(e) => {
                warn!("Reminder email to: {} failed to send: {}", recipient.email, e);
                recipient.mark_failed(e.to_string());
                failed += 1;
            }
        }
    }
    (sent, failed)
}

/// Renders, resolves and delivers the reminder for a fresh occurrence, then
/// records the attempt in the ledger. A ledger write failure is logged and
/// swallowed so one bad record cannot halt a run.
pub(crate) async fn dispatch_new(
    special_date: &SpecialDate,
    member: &Member,
    days_until: i64,
    ctx: &KeepsakeContext,
) -> (u64, u64) {
    let now = ctx.sys.get_timestamp_millis();
    let today = local_day(now, &ctx.config.timezone);
    let occurrence = next_occurrence(special_date.event_date, special_date.is_recurring, today);
    let rendered = render_reminder(special_date, member, occurrence, days_until);
    let mut recipients = resolve_recipients(special_date, member, ctx).await;

    let (sent, failed) = send_to_recipients(&rendered, &mut recipients, ctx).await;

    let mut log = ReminderLog::new(special_date, occurrence, recipients, rendered.subject, now);
    log.finalize_attempt(ctx.sys.get_timestamp_millis());
    if let Err(e) = ctx.repos.reminder_logs.insert(&log).await {
        error!(
            "Unable to record the reminder for special date: {} in the ledger. Error: {:?}",
            special_date.id, e
        );
    }
    (sent, failed)
}

/// Re-delivers a logged reminder to the recipients that never received it.
/// The body is rendered fresh so the day words stay correct when a retry
/// crosses midnight.
pub(crate) async fn redispatch_log(
    log: &mut ReminderLog,
    special_date: &SpecialDate,
    member: &Member,
    ctx: &KeepsakeContext,
) -> (u64, u64) {
    let now = ctx.sys.get_timestamp_millis();
    let today = local_day(now, &ctx.config.timezone);
    // the occurrence may have just slipped behind today between attempts
    let days_until = (log.event_date - today).num_days().max(0);
    let rendered = render_reminder(special_date, member, log.event_date, days_until);

    log.record_retry(now);
    let (sent, failed) = send_to_recipients(&rendered, &mut log.recipients, ctx).await;
    log.finalize_attempt(ctx.sys.get_timestamp_millis());
    if let Err(e) = ctx.repos.reminder_logs.save(log).await {
        error!(
            "Unable to record the retry for reminder log: {} in the ledger. Error: {:?}",
            log.id, e
        );
    }
    (sent, failed)
}

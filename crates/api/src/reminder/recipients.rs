use keepsake_domain::{
    dedup_recipients, Member, Permission, RecipientClass, ReminderRecipient, SpecialDate,
};
use keepsake_infra::KeepsakeContext;

/// Expands the configured recipient classes into concrete addresses. An
/// address reached through several classes is kept once, under the first
/// class that produced it.
pub(crate) async fn resolve_recipients(
    special_date: &SpecialDate,
    member: &Member,
    ctx: &KeepsakeContext,
) -> Vec<ReminderRecipient> {
    let mut recipients = Vec::new();
    for class in &special_date.reminder_recipients {
        match class {
            RecipientClass::Member => {
                recipients.push(ReminderRecipient::pending(
                    member.email.clone(),
                    RecipientClass::Member,
                ));
            }
            RecipientClass::WelfareOfficers => {
                let officers = ctx
                    .repos
                    .admins
                    .find_active_with_permission(Permission::ViewMembers)
                    .await;
                for officer in officers {
                    recipients.push(ReminderRecipient::pending(
                        officer.email,
                        RecipientClass::WelfareOfficers,
                    ));
                }
            }
            RecipientClass::AllMembers => {
                for other in ctx.repos.members.find_active().await {
                    recipients.push(ReminderRecipient::pending(
                        other.email,
                        RecipientClass::AllMembers,
                    ));
                }
            }
        }
    }
    dedup_recipients(recipients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use keepsake_domain::{Admin, AdminRole, EventLabel};

    fn special_date_with(member_id: keepsake_domain::ID, classes: Vec<RecipientClass>) -> SpecialDate {
        SpecialDate {
            id: Default::default(),
            member_id,
            event_label: EventLabel::Birthday,
            custom_label: None,
            event_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            is_recurring: true,
            send_reminder: true,
            reminder_recipients: classes,
            reminder_hours_before: 24,
            notes: None,
            is_active: true,
            created: 0,
            updated: 0,
        }
    }

    #[actix_web::main]
    #[test]
    async fn expands_member_and_officers() {
        let ctx = KeepsakeContext::create_inmemory();

        let member = Member::new("Amina Bello", "amina@psn.org", 0);
        ctx.repos.members.insert(&member).await.unwrap();
        let officer = Admin::new("Ngozi Okafor", "ngozi@psn.org", AdminRole::WelfareSecretary);
        let mut retired = Admin::new("Gone", "gone@psn.org", AdminRole::WelfareSecretary);
        retired.is_active = false;
        for admin in [&officer, &retired] {
            ctx.repos.admins.insert(admin).await.unwrap();
        }

        let special_date = special_date_with(
            member.id.clone(),
            vec![RecipientClass::Member, RecipientClass::WelfareOfficers],
        );
        let recipients = resolve_recipients(&special_date, &member, &ctx).await;
        let emails = recipients.iter().map(|r| r.email.as_str()).collect::<Vec<_>>();
        assert_eq!(emails, vec!["amina@psn.org", "ngozi@psn.org"]);
    }

    #[actix_web::main]
    #[test]
    async fn an_address_is_kept_once_across_classes() {
        let ctx = KeepsakeContext::create_inmemory();

        let member = Member::new("Amina Bello", "amina@psn.org", 0);
        let other = Member::new("Chidi Eze", "chidi@psn.org", 0);
        let mut inactive = Member::new("Left", "left@psn.org", 0);
        inactive.is_active = false;
        for m in [&member, &other, &inactive] {
            ctx.repos.members.insert(m).await.unwrap();
        }

        let special_date = special_date_with(
            member.id.clone(),
            vec![RecipientClass::Member, RecipientClass::AllMembers],
        );
        let recipients = resolve_recipients(&special_date, &member, &ctx).await;
        let emails = recipients.iter().map(|r| r.email.as_str()).collect::<Vec<_>>();
        // the owner is listed once and inactive members are left out
        assert_eq!(emails, vec!["amina@psn.org", "chidi@psn.org"]);
        assert_eq!(recipients[0].recipient_type, RecipientClass::Member);
    }
}

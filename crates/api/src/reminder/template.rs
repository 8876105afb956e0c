use chrono::NaiveDate;
use keepsake_domain::{Member, SpecialDate};

pub(crate) struct RenderedReminder {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Renders the reminder for one occurrence. The day words are relative to
/// when rendering happens, so retries render fresh instead of reusing the
/// wording of the first attempt.
pub(crate) fn render_reminder(
    special_date: &SpecialDate,
    member: &Member,
    occurrence: NaiveDate,
    days_until: i64,
) -> RenderedReminder {
    let label = special_date.display_label();
    let subject = match days_until {
        0 => format!("Today: {}'s {}!", member.full_name, label),
        1 => format!("Tomorrow: {}'s {}!", member.full_name, label),
        n => format!("Upcoming: {}'s {} in {} days", member.full_name, label, n),
    };
    let when = match days_until {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {} days", n),
    };
    let date_line = occurrence.format("%A, %B %-d, %Y").to_string();

    let mut text = format!(
        "{}'s {} is {}, on {}.",
        member.full_name, label, when, date_line
    );
    if let Some(notes) = &special_date.notes {
        text.push_str("\n\nNotes: ");
        text.push_str(notes);
    }
    text.push_str("\n\nSent by Keepsake on behalf of the welfare desk.");

    let mut html = format!(
        "<div style=\"font-family:sans-serif\">\
         <h2>{} reminder</h2>\
         <p><strong>{}</strong>'s {} is {}, on <strong>{}</strong>.</p>",
        label, member.full_name, label, when, date_line
    );
    if let Some(notes) = &special_date.notes {
        html.push_str(&format!("<p>Notes: {}</p>", notes));
    }
    html.push_str("<p style=\"color:#777\">Sent by Keepsake on behalf of the welfare desk.</p></div>");

    RenderedReminder {
        subject,
        html,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_domain::{EventLabel, RecipientClass};

    fn member() -> Member {
        Member::new("Amina Bello", "amina@psn.org", 0)
    }

    fn special_date() -> SpecialDate {
        SpecialDate {
            id: Default::default(),
            member_id: Default::default(),
            event_label: EventLabel::Birthday,
            custom_label: None,
            event_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            is_recurring: true,
            send_reminder: true,
            reminder_recipients: vec![RecipientClass::Member],
            reminder_hours_before: 24,
            notes: None,
            is_active: true,
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn subject_counts_down_to_the_day() {
        let member = member();
        let special_date = special_date();
        let occurrence = NaiveDate::from_ymd_opt(2026, 5, 17).unwrap();

        let cases = [
            (0, "Today: Amina Bello's Birthday!"),
            (1, "Tomorrow: Amina Bello's Birthday!"),
            (5, "Upcoming: Amina Bello's Birthday in 5 days"),
        ];
        for (days_until, expected) in cases {
            let rendered = render_reminder(&special_date, &member, occurrence, days_until);
            assert_eq!(rendered.subject, expected);
        }
    }

    #[test]
    fn custom_label_replaces_the_event_label() {
        let member = member();
        let mut special_date = special_date();
        special_date.event_label = EventLabel::Other;
        special_date.custom_label = Some("Graduation".into());
        let occurrence = NaiveDate::from_ymd_opt(2026, 5, 17).unwrap();

        let rendered = render_reminder(&special_date, &member, occurrence, 0);
        assert_eq!(rendered.subject, "Today: Amina Bello's Graduation!");
        assert!(rendered.html.contains("Graduation reminder"));
    }

    #[test]
    fn body_spells_out_the_occurrence_and_notes() {
        let member = member();
        let mut special_date = special_date();
        special_date.notes = Some("Loves yellow roses".into());
        let occurrence = NaiveDate::from_ymd_opt(2026, 5, 17).unwrap();

        let rendered = render_reminder(&special_date, &member, occurrence, 1);
        assert!(rendered.text.contains("tomorrow, on Sunday, May 17, 2026."));
        assert!(rendered.text.contains("Notes: Loves yellow roses"));
        assert!(rendered.html.contains("<strong>Sunday, May 17, 2026</strong>"));
        assert!(rendered.html.contains("Loves yellow roses"));
    }
}

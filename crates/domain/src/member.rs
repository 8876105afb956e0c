use crate::shared::entity::{Entity, ID};

/// A registered member of the organization. Members own `SpecialDate`s and
/// are the primary recipients of celebration reminders.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: ID,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub created: i64,
    pub updated: i64,
}

impl Member {
    pub fn new(full_name: &str, email: &str, now: i64) -> Self {
        Self {
            id: Default::default(),
            full_name: full_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone_number: None,
            is_active: true,
            created: now,
            updated: now,
        }
    }
}

impl Entity for Member {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_normalizes_contact_fields() {
        let member = Member::new("  Amina Bello ", " Amina.Bello@Example.COM ", 0);
        assert_eq!(member.full_name, "Amina Bello");
        assert_eq!(member.email, "amina.bello@example.com");
        assert!(member.is_active);
    }
}

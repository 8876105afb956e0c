use super::IMemberRepo;
use crate::repos::shared::inmemory_repo::*;
use keepsake_domain::{Member, ID};

pub struct InMemoryMemberRepo {
    members: std::sync::Mutex<Vec<Member>>,
}

impl InMemoryMemberRepo {
    pub fn new() -> Self {
        Self {
            members: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IMemberRepo for InMemoryMemberRepo {
    async fn insert(&self, member: &Member) -> anyhow::Result<()> {
        insert(member, &self.members);
        Ok(())
    }

    async fn save(&self, member: &Member) -> anyhow::Result<()> {
        save(member, &self.members);
        Ok(())
    }

    async fn find(&self, member_id: &ID) -> Option<Member> {
        find(member_id, &self.members)
    }

    async fn find_by_email(&self, email: &str) -> Option<Member> {
        let mut members = find_by(&self.members, |m| m.email == email);
        if members.is_empty() {
            return None;
        }
        Some(members.remove(0))
    }

    async fn find_active(&self) -> Vec<Member> {
        find_by(&self.members, |m| m.is_active)
    }
}

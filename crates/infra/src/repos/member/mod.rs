mod inmemory;
mod postgres;

pub use inmemory::InMemoryMemberRepo;
use keepsake_domain::{Member, ID};
pub use postgres::PostgresMemberRepo;

#[async_trait::async_trait]
pub trait IMemberRepo: Send + Sync {
    async fn insert(&self, member: &Member) -> anyhow::Result<()>;
    async fn save(&self, member: &Member) -> anyhow::Result<()>;
    async fn find(&self, member_id: &ID) -> Option<Member>;
    async fn find_by_email(&self, email: &str) -> Option<Member>;
    async fn find_active(&self) -> Vec<Member>;
}

#[cfg(test)]
mod tests {
    use crate::KeepsakeContext;
    use keepsake_domain::Member;

    #[tokio::test]
    async fn create_and_find() {
        let ctx = KeepsakeContext::create_inmemory();

        let mut member = Member::new("Amina Bello", "amina@psn.org", 100);
        assert!(ctx.repos.members.insert(&member).await.is_ok());

        let res = ctx.repos.members.find(&member.id).await.expect("To find member");
        assert_eq!(res.id, member.id);
        assert_eq!(res.email, "amina@psn.org");

        let res = ctx
            .repos
            .members
            .find_by_email("amina@psn.org")
            .await
            .expect("To find member by email");
        assert_eq!(res.id, member.id);

        // Deactivated members drop out of the active listing
        assert_eq!(ctx.repos.members.find_active().await.len(), 1);
        member.is_active = false;
        assert!(ctx.repos.members.save(&member).await.is_ok());
        assert!(ctx.repos.members.find_active().await.is_empty());
        assert!(ctx.repos.members.find(&member.id).await.is_some());
    }
}

mod inmemory;
mod postgres;

pub use inmemory::InMemoryAdminRepo;
use keepsake_domain::{Admin, Permission, ID};
pub use postgres::PostgresAdminRepo;

#[async_trait::async_trait]
pub trait IAdminRepo: Send + Sync {
    async fn insert(&self, admin: &Admin) -> anyhow::Result<()>;
    async fn save(&self, admin: &Admin) -> anyhow::Result<()>;
    async fn find(&self, admin_id: &ID) -> Option<Admin>;
    async fn find_by_email(&self, email: &str) -> Option<Admin>;
    async fn find_by_api_key(&self, api_key: &str) -> Option<Admin>;
    /// Active admins holding the given permission. Used to expand the
    /// welfare officer recipient class into concrete addresses.
    async fn find_active_with_permission(&self, permission: Permission) -> Vec<Admin>;
}

#[cfg(test)]
mod tests {
    use crate::KeepsakeContext;
    use keepsake_domain::{Admin, AdminRole, Permission};

    #[tokio::test]
    async fn create_and_find_by_api_key() {
        let ctx = KeepsakeContext::create_inmemory();

        let admin = Admin::new("Ngozi Okafor", "ngozi@psn.org", AdminRole::WelfareSecretary);
        assert!(ctx.repos.admins.insert(&admin).await.is_ok());

        let res = ctx
            .repos
            .admins
            .find_by_api_key(&admin.api_key)
            .await
            .expect("To find admin by api key");
        assert_eq!(res.id, admin.id);
        assert!(ctx.repos.admins.find_by_api_key("ak_bogus").await.is_none());
    }

    #[tokio::test]
    async fn filters_admins_by_permission() {
        let ctx = KeepsakeContext::create_inmemory();

        let secretary = Admin::new("Secretary", "sec@psn.org", AdminRole::WelfareSecretary);
        let viewer = Admin::new("Viewer", "view@psn.org", AdminRole::Viewer);
        let mut inactive = Admin::new("Gone", "gone@psn.org", AdminRole::WelfareSecretary);
        inactive.is_active = false;
        for admin in [&secretary, &viewer, &inactive] {
            assert!(ctx.repos.admins.insert(admin).await.is_ok());
        }

        let officers = ctx
            .repos
            .admins
            .find_active_with_permission(Permission::ViewMembers)
            .await;
        assert_eq!(officers.len(), 2);

        let senders = ctx
            .repos
            .admins
            .find_active_with_permission(Permission::SendReminders)
            .await;
        assert_eq!(senders.len(), 1);
        assert_eq!(senders[0].id, secretary.id);
    }
}

use super::IAdminRepo;
use crate::repos::shared::inmemory_repo::*;
use keepsake_domain::{Admin, Permission, ID};

pub struct InMemoryAdminRepo {
    admins: std::sync::Mutex<Vec<Admin>>,
}

impl InMemoryAdminRepo {
    pub fn new() -> Self {
        Self {
            admins: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IAdminRepo for InMemoryAdminRepo {
    async fn insert(&self, admin: &Admin) -> anyhow::Result<()> {
        insert(admin, &self.admins);
        Ok(())
    }

    async fn save(&self, admin: &Admin) -> anyhow::Result<()> {
        save(admin, &self.admins);
        Ok(())
    }

    async fn find(&self, admin_id: &ID) -> Option<Admin> {
        find(admin_id, &self.admins)
    }

    async fn find_by_email(&self, email: &str) -> Option<Admin> {
        let mut admins = find_by(&self.admins, |a| a.email == email);
        if admins.is_empty() {
            return None;
        }
        Some(admins.remove(0))
    }

    async fn find_by_api_key(&self, api_key: &str) -> Option<Admin> {
        let mut admins = find_by(&self.admins, |a| a.api_key == api_key);
        if admins.is_empty() {
            return None;
        }
        Some(admins.remove(0))
    }

    async fn find_active_with_permission(&self, permission: Permission) -> Vec<Admin> {
        find_by(&self.admins, |a| {
            a.is_active && a.permissions.contains(&permission)
        })
    }
}

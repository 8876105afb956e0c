use keepsake_domain::{Admin, AdminRole, Permission, ID};
use serde::{Deserialize, Serialize};

/// The admin's api key is only revealed in the response that created it
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDTO {
    pub id: ID,
    pub full_name: String,
    pub email: String,
    pub role: AdminRole,
    pub permissions: Vec<Permission>,
    pub is_active: bool,
}

impl AdminDTO {
    pub fn new(admin: Admin) -> Self {
        Self {
            id: admin.id,
            full_name: admin.full_name,
            email: admin.email,
            role: admin.role,
            permissions: admin.permissions,
            is_active: admin.is_active,
        }
    }
}

use keepsake_domain::{Admin, AdminRole};
use serde::{Deserialize, Serialize};

use crate::dtos::AdminDTO;

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub admin: AdminDTO,
}

impl AdminResponse {
    pub fn new(admin: Admin) -> Self {
        Self {
            admin: AdminDTO::new(admin),
        }
    }
}

pub mod create_admin {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub code: String,
        pub full_name: String,
        pub email: String,
        #[serde(default)]
        pub role: Option<AdminRole>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub admin: AdminDTO,
        pub api_key: String,
    }

    impl APIResponse {
        pub fn new(admin: Admin) -> Self {
            Self {
                api_key: admin.api_key.clone(),
                admin: AdminDTO::new(admin),
            }
        }
    }
}

pub mod get_me {
    use super::*;

    pub type APIResponse = AdminResponse;
}

use crate::shared::entity::{Entity, ID};
use keepsake_utils::create_random_secret;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

const API_KEY_LEN: usize = 30;

/// An administrative account for the registry. Admins authenticate with an
/// api key and carry a set of `Permission`s derived from their role.
/// Active admins holding `ViewMembers` double as the welfare officers that
/// receive copies of celebration reminders.
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: ID,
    pub full_name: String,
    pub email: String,
    pub api_key: String,
    pub role: AdminRole,
    pub permissions: Vec<Permission>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminRole {
    #[serde(rename = "Super Admin")]
    SuperAdmin,
    #[serde(rename = "Welfare Secretary")]
    WelfareSecretary,
    #[serde(rename = "Assistant Welfare")]
    AssistantWelfare,
    Viewer,
}

/// Actions an `Admin` can be granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewMembers,
    EditMembers,
    SendReminders,
    ManageAdmins,
}

impl AdminRole {
    pub fn default_permissions(&self) -> Vec<Permission> {
        match self {
            AdminRole::SuperAdmin => vec![
                Permission::ViewMembers,
                Permission::EditMembers,
                Permission::SendReminders,
                Permission::ManageAdmins,
            ],
            AdminRole::WelfareSecretary => vec![
                Permission::ViewMembers,
                Permission::EditMembers,
                Permission::SendReminders,
            ],
            AdminRole::AssistantWelfare => {
                vec![Permission::ViewMembers, Permission::SendReminders]
            }
            AdminRole::Viewer => vec![Permission::ViewMembers],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "SuperAdmin",
            AdminRole::WelfareSecretary => "WelfareSecretary",
            AdminRole::AssistantWelfare => "AssistantWelfare",
            AdminRole::Viewer => "Viewer",
        }
    }
}

impl Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidAdminRoleError {
    #[error("Admin role: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for AdminRole {
    type Err = InvalidAdminRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SuperAdmin" => Ok(AdminRole::SuperAdmin),
            "WelfareSecretary" => Ok(AdminRole::WelfareSecretary),
            "AssistantWelfare" => Ok(AdminRole::AssistantWelfare),
            "Viewer" => Ok(AdminRole::Viewer),
            _ => Err(InvalidAdminRoleError::Unrecognized(s.to_string())),
        }
    }
}

impl Admin {
    pub fn new(full_name: &str, email: &str, role: AdminRole) -> Self {
        Self {
            id: Default::default(),
            full_name: full_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            api_key: Self::generate_api_key(),
            permissions: role.default_permissions(),
            role,
            is_active: true,
        }
    }

    pub fn generate_api_key() -> String {
        let rand_secret = create_random_secret(API_KEY_LEN);
        format!("ak_{}", rand_secret)
    }

    /// Checks whether this admin may perform all of the given actions.
    /// Super admins bypass the permission list entirely.
    pub fn authorize(&self, permissions: &[Permission]) -> bool {
        if self.role == AdminRole::SuperAdmin {
            return true;
        }
        permissions.iter().all(|p| self.permissions.contains(p))
    }
}

impl Entity for Admin {
    fn id(&self) -> &ID {
        &self.id
    }
}

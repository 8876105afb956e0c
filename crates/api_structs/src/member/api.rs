use keepsake_domain::{Member, ID};
use serde::{Deserialize, Serialize};

use crate::dtos::MemberDTO;

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub member: MemberDTO,
}

impl MemberResponse {
    pub fn new(member: Member) -> Self {
        Self {
            member: MemberDTO::new(member),
        }
    }
}

pub mod create_member {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub full_name: String,
        pub email: String,
        #[serde(default)]
        pub phone_number: Option<String>,
    }

    pub type APIResponse = MemberResponse;
}

pub mod get_member {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub member_id: ID,
    }

    pub type APIResponse = MemberResponse;
}

pub mod get_members {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub members: Vec<MemberDTO>,
    }

    impl APIResponse {
        pub fn new(members: Vec<Member>) -> Self {
            Self {
                members: members.into_iter().map(MemberDTO::new).collect(),
            }
        }
    }
}

pub mod update_member {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub member_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub full_name: Option<String>,
        #[serde(default)]
        pub email: Option<String>,
        #[serde(default)]
        pub phone_number: Option<String>,
        #[serde(default)]
        pub is_active: Option<bool>,
    }

    pub type APIResponse = MemberResponse;
}

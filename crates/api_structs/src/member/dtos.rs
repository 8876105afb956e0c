use keepsake_domain::{Member, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDTO {
    pub id: ID,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub created: i64,
    pub updated: i64,
}

impl MemberDTO {
    pub fn new(member: Member) -> Self {
        Self {
            id: member.id,
            full_name: member.full_name,
            email: member.email,
            phone_number: member.phone_number,
            is_active: member.is_active,
            created: member.created,
            updated: member.updated,
        }
    }
}

use super::IMemberRepo;
use keepsake_domain::{Member, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresMemberRepo {
    pool: PgPool,
}

impl PostgresMemberRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MemberRaw {
    member_uid: Uuid,
    full_name: String,
    email: String,
    phone_number: Option<String>,
    is_active: bool,
    created: i64,
    updated: i64,
}

impl From<MemberRaw> for Member {
    fn from(e: MemberRaw) -> Self {
        Self {
            id: e.member_uid.into(),
            full_name: e.full_name,
            email: e.email,
            phone_number: e.phone_number,
            is_active: e.is_active,
            created: e.created,
            updated: e.updated,
        }
    }
}

#[async_trait::async_trait]
impl IMemberRepo for PostgresMemberRepo {
    async fn insert(&self, member: &Member) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO members(member_uid, full_name, email, phone_number, is_active, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(member.id.inner_ref())
        .bind(&member.full_name)
        .bind(&member.email)
        .bind(&member.phone_number)
        .bind(member.is_active)
        .bind(member.created)
        .bind(member.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert member: {:?}. DB returned error: {:?}",
                member, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, member: &Member) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE members
            SET full_name = $2,
                email = $3,
                phone_number = $4,
                is_active = $5,
                updated = $6
            WHERE member_uid = $1
            "#,
        )
        .bind(member.id.inner_ref())
        .bind(&member.full_name)
        .bind(&member.email)
        .bind(&member.phone_number)
        .bind(member.is_active)
        .bind(member.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save member: {:?}. DB returned error: {:?}",
                member, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, member_id: &ID) -> Option<Member> {
        match sqlx::query_as::<_, MemberRaw>(
            r#"
            SELECT * FROM members
            WHERE member_uid = $1
            "#,
        )
        .bind(member_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(member) => member.map(|m| m.into()),
            Err(e) => {
                error!(
                    "Find member with id: {} failed. DB returned error: {:?}",
                    member_id, e
                );
                None
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Option<Member> {
        match sqlx::query_as::<_, MemberRaw>(
            r#"
            SELECT * FROM members
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        {
            Ok(member) => member.map(|m| m.into()),
            Err(e) => {
                error!(
                    "Find member with email: {} failed. DB returned error: {:?}",
                    email, e
                );
                None
            }
        }
    }

    async fn find_active(&self) -> Vec<Member> {
        match sqlx::query_as::<_, MemberRaw>(
            r#"
            SELECT * FROM members
            WHERE is_active = TRUE
            "#,
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(members) => members.into_iter().map(|m| m.into()).collect(),
            Err(e) => {
                error!("Find active members failed. DB returned error: {:?}", e);
                vec![]
            }
        }
    }
}

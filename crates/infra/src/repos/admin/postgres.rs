use super::IAdminRepo;
use keepsake_domain::{Admin, Permission, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresAdminRepo {
    pool: PgPool,
}

impl PostgresAdminRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AdminRaw {
    admin_uid: Uuid,
    full_name: String,
    email: String,
    api_key: String,
    role: String,
    permissions: serde_json::Value,
    is_active: bool,
}

impl From<AdminRaw> for Admin {
    fn from(e: AdminRaw) -> Self {
        Self {
            id: e.admin_uid.into(),
            full_name: e.full_name,
            email: e.email,
            api_key: e.api_key,
            role: e.role.parse().unwrap(),
            permissions: serde_json::from_value(e.permissions).unwrap(),
            is_active: e.is_active,
        }
    }
}

#[async_trait::async_trait]
impl IAdminRepo for PostgresAdminRepo {
    async fn insert(&self, admin: &Admin) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO admins(admin_uid, full_name, email, api_key, role, permissions, is_active)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(admin.id.inner_ref())
        .bind(&admin.full_name)
        .bind(&admin.email)
        .bind(&admin.api_key)
        .bind(admin.role.as_str())
        .bind(Json(&admin.permissions))
        .bind(admin.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert admin: {:?}. DB returned error: {:?}",
                admin, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, admin: &Admin) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE admins
            SET full_name = $2,
                email = $3,
                api_key = $4,
                role = $5,
                permissions = $6,
                is_active = $7
            WHERE admin_uid = $1
            "#,
        )
        .bind(admin.id.inner_ref())
        .bind(&admin.full_name)
        .bind(&admin.email)
        .bind(&admin.api_key)
        .bind(admin.role.as_str())
        .bind(Json(&admin.permissions))
        .bind(admin.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save admin: {:?}. DB returned error: {:?}",
                admin, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, admin_id: &ID) -> Option<Admin> {
        match sqlx::query_as::<_, AdminRaw>(
            r#"
            SELECT * FROM admins
            WHERE admin_uid = $1
            "#,
        )
        .bind(admin_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(admin) => admin.map(|a| a.into()),
            Err(e) => {
                error!(
                    "Find admin with id: {} failed. DB returned error: {:?}",
                    admin_id, e
                );
                None
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Option<Admin> {
        match sqlx::query_as::<_, AdminRaw>(
            r#"
            SELECT * FROM admins
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        {
            Ok(admin) => admin.map(|a| a.into()),
            Err(e) => {
                error!(
                    "Find admin with email: {} failed. DB returned error: {:?}",
                    email, e
                );
                None
            }
        }
    }

    async fn find_by_api_key(&self, api_key: &str) -> Option<Admin> {
        match sqlx::query_as::<_, AdminRaw>(
            r#"
            SELECT * FROM admins
            WHERE api_key = $1
            "#,
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
        {
            Ok(admin) => admin.map(|a| a.into()),
            Err(e) => {
                error!("Find admin by api key failed. DB returned error: {:?}", e);
                None
            }
        }
    }

    async fn find_active_with_permission(&self, permission: Permission) -> Vec<Admin> {
        match sqlx::query_as::<_, AdminRaw>(
            r#"
            SELECT * FROM admins
            WHERE is_active = TRUE AND permissions @> $1
            "#,
        )
        .bind(Json(vec![permission]))
        .fetch_all(&self.pool)
        .await
        {
            Ok(admins) => admins.into_iter().map(|a| a.into()).collect(),
            Err(e) => {
                error!(
                    "Find active admins with permission: {:?} failed. DB returned error: {:?}",
                    permission, e
                );
                vec![]
            }
        }
    }
}

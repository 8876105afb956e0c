use crate::{
    error::KeepsakeError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute_with_permissions, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use keepsake_api_structs::update_member::{APIResponse, PathParams, RequestBody};
use keepsake_domain::{Member, Permission, ID};
use keepsake_infra::KeepsakeContext;

pub async fn update_member_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<KeepsakeContext>,
) -> Result<HttpResponse, KeepsakeError> {
    let admin = protect_admin_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateMemberUseCase {
        member_id: path_params.member_id.clone(),
        full_name: body.full_name,
        email: body.email,
        phone_number: body.phone_number,
        is_active: body.is_active,
    };

    execute_with_permissions(usecase, &admin, &ctx)
        .await
        .map(|member| HttpResponse::Ok().json(APIResponse::new(member)))
        .map_err(KeepsakeError::from)
}

#[derive(Debug)]
pub struct UpdateMemberUseCase {
    pub member_id: ID,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidEmail(String),
    EmailTaken(String),
    StorageError,
}

impl From<UseCaseError> for KeepsakeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(member_id) => Self::NotFound(format!(
                "The member with id: {}, was not found.",
                member_id
            )),
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("The email address: {} is not valid", email))
            }
            UseCaseError::EmailTaken(email) => Self::Conflict(format!(
                "A member with the email address: {} already exists",
                email
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateMemberUseCase {
    type Response = Member;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateMember";

    async fn execute(&mut self, ctx: &KeepsakeContext) -> Result<Self::Response, Self::Error> {
        let mut member = ctx
            .repos
            .members
            .find(&self.member_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.member_id.clone()))?;

        if let Some(full_name) = &self.full_name {
            member.full_name = full_name.trim().to_string();
        }
        if let Some(email) = &self.email {
            let email = email.trim().to_lowercase();
            if !email.contains('@') {
                return Err(UseCaseError::InvalidEmail(email));
            }
            if email != member.email {
                if ctx.repos.members.find_by_email(&email).await.is_some() {
                    return Err(UseCaseError::EmailTaken(email));
                }
                member.email = email;
            }
        }
        if let Some(phone_number) = &self.phone_number {
            member.phone_number = Some(phone_number.clone());
        }
        if let Some(is_active) = self.is_active {
            member.is_active = is_active;
        }
        member.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .members
            .save(&member)
            .await
            .map(|_| member)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for UpdateMemberUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::EditMembers]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;

    #[actix_web::main]
    #[test]
    async fn updates_fields_and_deactivates() {
        let ctx = KeepsakeContext::create_inmemory();

        let member = Member::new("Amina Bello", "amina@psn.org", 0);
        ctx.repos
            .members
            .insert(&member)
            .await
            .expect("To insert member");

        let usecase = UpdateMemberUseCase {
            member_id: member.id.clone(),
            full_name: None,
            email: Some("amina.bello@psn.org".into()),
            phone_number: Some("+2348012345678".into()),
            is_active: Some(false),
        };
        let updated = execute(usecase, &ctx).await.expect("To update member");
        assert_eq!(updated.email, "amina.bello@psn.org");
        assert!(!updated.is_active);

        let stored = ctx.repos.members.find(&member.id).await.unwrap();
        assert_eq!(stored.phone_number, Some("+2348012345678".into()));
        assert!(!stored.is_active);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_email_collisions() {
        let ctx = KeepsakeContext::create_inmemory();

        let amina = Member::new("Amina Bello", "amina@psn.org", 0);
        let ngozi = Member::new("Ngozi Okafor", "ngozi@psn.org", 0);
        for member in [&amina, &ngozi] {
            ctx.repos
                .members
                .insert(member)
                .await
                .expect("To insert member");
        }

        let usecase = UpdateMemberUseCase {
            member_id: ngozi.id.clone(),
            full_name: None,
            email: Some("amina@psn.org".into()),
            phone_number: None,
            is_active: None,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::EmailTaken(_))
        ));
    }

    #[actix_web::main]
    #[test]
    async fn unknown_member_is_not_found() {
        let ctx = KeepsakeContext::create_inmemory();

        let usecase = UpdateMemberUseCase {
            member_id: Default::default(),
            full_name: Some("Ghost".into()),
            email: None,
            phone_number: None,
            is_active: None,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}

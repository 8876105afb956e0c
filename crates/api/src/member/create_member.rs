use crate::{
    error::KeepsakeError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute_with_permissions, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use keepsake_api_structs::create_member::{APIResponse, RequestBody};
use keepsake_domain::{Member, Permission};
use keepsake_infra::KeepsakeContext;

pub async fn create_member_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<KeepsakeContext>,
) -> Result<HttpResponse, KeepsakeError> {
    let admin = protect_admin_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateMemberUseCase {
        full_name: body.full_name,
        email: body.email,
        phone_number: body.phone_number,
    };

    execute_with_permissions(usecase, &admin, &ctx)
        .await
        .map(|member| HttpResponse::Created().json(APIResponse::new(member)))
        .map_err(KeepsakeError::from)
}

#[derive(Debug)]
pub struct CreateMemberUseCase {
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidName,
    InvalidEmail(String),
    EmailTaken(String),
    StorageError,
}

impl From<UseCaseError> for KeepsakeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidName => {
                Self::BadClientData("A member needs a non-empty full name".into())
            }
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
impl UseCase for CreateMemberUseCase {
    type Response = Member;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateMember";

    async fn execute(&mut self, ctx: &KeepsakeContext) -> Result<Self::Response, Self::Error> {
        if self.full_name.trim().is_empty() {
            return Err(UseCaseError::InvalidName);
        }
        let email = self.email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(UseCaseError::InvalidEmail(email));
        }
        if ctx.repos.members.find_by_email(&email).await.is_some() {
            return Err(UseCaseError::EmailTaken(email));
        }

        let now = ctx.sys.get_timestamp_millis();
        let mut member = Member::new(&self.full_name, &email, now);
        member.phone_number = self.phone_number.clone();

        ctx.repos
            .members
            .insert(&member)
            .await
            .map(|_| member)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for CreateMemberUseCase {
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
    async fn creates_member_with_normalized_email() {
        let ctx = KeepsakeContext::create_inmemory();

        let mut usecase = CreateMemberUseCase {
            full_name: "Amina Bello".into(),
            email: " Amina.Bello@PSN.org ".into(),
            phone_number: Some("+2348012345678".into()),
        };
        let member = usecase.execute(&ctx).await.expect("To create member");
        assert_eq!(member.email, "amina.bello@psn.org");
        assert!(ctx.repos.members.find(&member.id).await.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_duplicate_email() {
        let ctx = KeepsakeContext::create_inmemory();

        let usecase = CreateMemberUseCase {
            full_name: "Amina Bello".into(),
            email: "amina@psn.org".into(),
            phone_number: None,
        };
        assert!(execute(usecase, &ctx).await.is_ok());

        let usecase = CreateMemberUseCase {
            full_name: "Impostor".into(),
            email: "AMINA@psn.org".into(),
            phone_number: None,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::EmailTaken(_))
        ));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_bad_fields() {
        let ctx = KeepsakeContext::create_inmemory();

        let usecase = CreateMemberUseCase {
            full_name: "  ".into(),
            email: "amina@psn.org".into(),
            phone_number: None,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidName)
        ));

        let usecase = CreateMemberUseCase {
            full_name: "Amina Bello".into(),
            email: "not-an-email".into(),
            phone_number: None,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidEmail(_))
        ));
    }
}

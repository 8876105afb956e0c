use crate::{
    error::KeepsakeError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use keepsake_api_structs::create_admin::{APIResponse, RequestBody};
use keepsake_domain::{Admin, AdminRole};
use keepsake_infra::KeepsakeContext;

pub async fn create_admin_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<KeepsakeContext>,
) -> Result<HttpResponse, KeepsakeError> {
    let body = body.0;
    let usecase = CreateAdminUseCase {
        code: body.code,
        full_name: body.full_name,
        email: body.email,
        role: body.role,
    };

    execute(usecase, &ctx)
        .await
        .map(|admin| HttpResponse::Created().json(APIResponse::new(admin)))
        .map_err(KeepsakeError::from)
}

#[derive(Debug)]
pub struct CreateAdminUseCase {
    pub code: String,
    pub full_name: String,
    pub email: String,
    pub role: Option<AdminRole>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidCreateAdminCode,
    InvalidEmail(String),
    EmailTaken(String),
    StorageError,
}

impl From<UseCaseError> for KeepsakeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCreateAdminCode => {
                Self::Unauthorized("Invalid code provided".into())
            }
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("The email address: {} is not valid", email))
            }
            UseCaseError::EmailTaken(email) => Self::Conflict(format!(
                "An admin with the email address: {} already exists",
                email
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAdminUseCase {
    type Response = Admin;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateAdmin";

    async fn execute(&mut self, ctx: &KeepsakeContext) -> Result<Self::Response, Self::Error> {
        if self.code != ctx.config.create_admin_secret_code {
            return Err(UseCaseError::InvalidCreateAdminCode);
        }

        let email = self.email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(UseCaseError::InvalidEmail(email));
        }
        if ctx.repos.admins.find_by_email(&email).await.is_some() {
            return Err(UseCaseError::EmailTaken(email));
        }

        let role = self.role.unwrap_or(AdminRole::SuperAdmin);
        let admin = Admin::new(self.full_name.trim(), &email, role);
        ctx.repos
            .admins
            .insert(&admin)
            .await
            .map(|_| admin)
            .map_err(|_| UseCaseError::StorageError)
    }
}

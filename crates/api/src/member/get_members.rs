use crate::{
    error::KeepsakeError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute_with_permissions, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use keepsake_api_structs::get_members::APIResponse;
use keepsake_domain::{Member, Permission};
use keepsake_infra::KeepsakeContext;

pub async fn get_members_controller(
    http_req: HttpRequest,
    ctx: web::Data<KeepsakeContext>,
) -> Result<HttpResponse, KeepsakeError> {
    let admin = protect_admin_route(&http_req, &ctx).await?;

    let usecase = GetMembersUseCase {};

    execute_with_permissions(usecase, &admin, &ctx)
        .await
        .map(|members| HttpResponse::Ok().json(APIResponse::new(members)))
        .map_err(KeepsakeError::from)
}

#[derive(Debug)]
pub struct GetMembersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for KeepsakeError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMembersUseCase {
    type Response = Vec<Member>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetMembers";

    async fn execute(&mut self, ctx: &KeepsakeContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.members.find_active().await)
    }
}

impl PermissionBoundary for GetMembersUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ViewMembers]
    }
}

use crate::{
    error::KeepsakeError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute_with_permissions, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use keepsake_api_structs::get_member::{APIResponse, PathParams};
use keepsake_domain::{Member, Permission, ID};
use keepsake_infra::KeepsakeContext;

pub async fn get_member_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<KeepsakeContext>,
) -> Result<HttpResponse, KeepsakeError> {
    let admin = protect_admin_route(&http_req, &ctx).await?;

    let usecase = GetMemberUseCase {
        member_id: path_params.member_id.clone(),
    };

    execute_with_permissions(usecase, &admin, &ctx)
        .await
        .map(|member| HttpResponse::Ok().json(APIResponse::new(member)))
        .map_err(KeepsakeError::from)
}

#[derive(Debug)]
pub struct GetMemberUseCase {
    pub member_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for KeepsakeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(member_id) => Self::NotFound(format!(
                "The member with id: {}, was not found.",
                member_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMemberUseCase {
    type Response = Member;

    type Error = UseCaseError;

    const NAME: &'static str = "GetMember";

    async fn execute(&mut self, ctx: &KeepsakeContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .members
            .find(&self.member_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.member_id.clone()))
    }
}

impl PermissionBoundary for GetMemberUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ViewMembers]
    }
}

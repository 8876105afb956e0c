use crate::{
    error::KeepsakeError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute_with_permissions, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use keepsake_api_structs::get_reminder_logs::{APIResponse, QueryParams};
use keepsake_domain::{Permission, ReminderLog};
use keepsake_infra::KeepsakeContext;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

pub async fn get_reminder_logs_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<KeepsakeContext>,
) -> Result<HttpResponse, KeepsakeError> {
    let admin = protect_admin_route(&http_req, &ctx).await?;

    let usecase = GetReminderLogsUseCase {
        limit: query_params.limit,
    };

    execute_with_permissions(usecase, &admin, &ctx)
        .await
        .map(|logs| HttpResponse::Ok().json(APIResponse::new(logs)))
        .map_err(KeepsakeError::from)
}

#[derive(Debug)]
pub struct GetReminderLogsUseCase {
    pub limit: Option<i64>,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for KeepsakeError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderLogsUseCase {
    type Response = Vec<ReminderLog>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminderLogs";

    async fn execute(&mut self, ctx: &KeepsakeContext) -> Result<Self::Response, Self::Error> {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Ok(ctx.repos.reminder_logs.find_recent(limit).await)
    }
}

impl PermissionBoundary for GetReminderLogsUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ViewMembers]
    }
}

use super::process_reminders::ProcessRemindersUseCase;
use crate::{
    error::KeepsakeError,
    job_schedulers::PipelineGate,
    shared::{auth::protect_admin_route, usecase::execute_with_permissions},
};
use actix_web::{web, HttpRequest, HttpResponse};
use keepsake_api_structs::trigger_reminders::APIResponse;
use keepsake_infra::KeepsakeContext;

/// Runs the reminder pipeline now. The gate is shared with the scheduled
/// jobs, so a trigger while any run is in flight is rejected rather than
/// queued, and the permit is held until the run finishes.
pub async fn trigger_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<KeepsakeContext>,
    gate: web::Data<PipelineGate>,
) -> Result<HttpResponse, KeepsakeError> {
    let admin = protect_admin_route(&http_req, &ctx).await?;

    let _permit = gate
        .try_acquire()
        .ok_or_else(|| KeepsakeError::Conflict("A reminder run is already in progress".into()))?;

    execute_with_permissions(ProcessRemindersUseCase {}, &admin, &ctx)
        .await
        .map(|summary| {
            HttpResponse::Ok().json(APIResponse {
                processed: summary.processed,
                sent: summary.sent,
                failed: summary.failed,
                skipped: summary.skipped,
            })
        })
        .map_err(KeepsakeError::from)
}

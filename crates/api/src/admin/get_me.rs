use crate::{error::KeepsakeError, shared::auth::protect_admin_route};
use actix_web::{web, HttpRequest, HttpResponse};
use keepsake_api_structs::get_me::APIResponse;
use keepsake_infra::KeepsakeContext;

pub async fn get_me_controller(
    http_req: HttpRequest,
    ctx: web::Data<KeepsakeContext>,
) -> Result<HttpResponse, KeepsakeError> {
    let admin = protect_admin_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(admin)))
}

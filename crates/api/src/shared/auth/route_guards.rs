use crate::error::KeepsakeError;
use actix_web::HttpRequest;
use keepsake_domain::Admin;
use keepsake_infra::KeepsakeContext;

/// Resolves the `Admin` behind the `x-api-key` header. Requests without a
/// valid key for an active admin are rejected.
pub async fn protect_admin_route(
    req: &HttpRequest,
    ctx: &KeepsakeContext,
) -> Result<Admin, KeepsakeError> {
    let api_key = match req.headers().get("x-api-key") {
        Some(api_key) => match api_key.to_str() {
            Ok(api_key) => api_key,
            Err(_) => {
                return Err(KeepsakeError::Unauthorized(
                    "Malformed api key provided".to_string(),
                ))
            }
        },
        None => {
            return Err(KeepsakeError::Unauthorized(
                "Unable to find api-key in x-api-key header".to_string(),
            ))
        }
    };

    match ctx.repos.admins.find_by_api_key(api_key).await {
        Some(admin) if admin.is_active => Ok(admin),
        Some(_) => Err(KeepsakeError::Unauthorized(
            "The admin account is deactivated".to_string(),
        )),
        None => Err(KeepsakeError::Unauthorized(
            "Invalid api-key provided in x-api-key header".to_string(),
        )),
    }
}

use actix_web::web;

mod create_admin;
mod get_me;

use create_admin::create_admin_controller;
use get_me::get_me_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Enroll an admin, guarded by the shared secret code
    cfg.route("/admin", web::post().to(create_admin_controller));
    // The admin behind the presented api key
    cfg.route("/me", web::get().to(get_me_controller));
}

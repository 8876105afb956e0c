use actix_web::web;

mod create_special_date;
mod delete_special_date;
mod get_special_dates;
mod update_special_date;

use create_special_date::create_special_date_controller;
use delete_special_date::delete_special_date_controller;
use get_special_dates::get_special_dates_controller;
use update_special_date::update_special_date_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Register a special date for a member
    cfg.route(
        "/members/{member_id}/special-dates",
        web::post().to(create_special_date_controller),
    );
    // List the special dates registered for a member
    cfg.route(
        "/members/{member_id}/special-dates",
        web::get().to(get_special_dates_controller),
    );
    // Update a special date
    cfg.route(
        "/special-dates/{special_date_id}",
        web::put().to(update_special_date_controller),
    );
    // Retire a special date
    cfg.route(
        "/special-dates/{special_date_id}",
        web::delete().to(delete_special_date_controller),
    );
}

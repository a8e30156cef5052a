use actix_web::web;

use crate::connection::{audience_ws, narrator_ws};
use crate::handlers::admin::configure_admin_handlers;

mod admin;

pub fn root(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/narrator/ws").route(web::get().to(narrator_ws)))
        .service(web::resource("/narrator/ws/{session_id}").route(web::get().to(narrator_ws)))
        .service(web::resource("/audience/ws").route(web::get().to(audience_ws)))
        .service(web::resource("/audience/ws/{session_id}").route(web::get().to(audience_ws)));

    configure_admin_handlers(cfg);
}

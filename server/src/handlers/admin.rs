use actix_web::error;
use actix_web::web;
use actix_web::Responder;
use actix_web::Result;
use askama_actix::Template;
use tokio::sync::oneshot;

use crate::admin::{AdminCommand, SessionDescription};
use crate::server::{ServerCommand, ServerTx};

#[derive(Template)]
#[template(path = "admin-index.html")]
pub struct SessionListTemplate {
    sessions: Vec<SessionDescription>,
}

pub fn configure_admin_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/admin/").route(web::get().to(admin_index)));
}

pub async fn admin_index(srv_tx: web::Data<ServerTx>) -> Result<impl Responder> {
    let (tx, rx) = oneshot::channel();
    let mut srv_tx = srv_tx.get_ref().clone();
    srv_tx
        .send(ServerCommand::Admin(AdminCommand::DescribeSessions { tx }))
        .await
        .map_err(|_| error::ErrorInternalServerError("server loop is gone"))?;
    let sessions = rx
        .await
        .map_err(|_| error::ErrorInternalServerError("server loop dropped the query"))?;
    Ok(SessionListTemplate { sessions })
}

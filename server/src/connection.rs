use actix::{Actor, ActorContext, AsyncContext, Handler, Message, Running, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use bytes::Bytes;

use system::{ConnectionId, Role, SessionId};

use crate::connection_tx_storage::ConnectionTx;
use crate::server::{ServerCommand, ServerTx};

/// Session joined by the bare `/narrator/ws` / `/audience/ws` paths.
pub const DEFAULT_SESSION_ID: SessionId = 0;

/// One unit of the narrator's stream, forwarded to the audience verbatim.
#[derive(Debug, Clone)]
pub enum Payload {
    Text(String),
    Binary(Bytes),
}

#[derive(Debug)]
pub enum ConnectionCommand {
    Connect {
        role: Role,
        session_id: SessionId,
        tx: ConnectionTx,
    },
    Disconnect {
        from: ConnectionId,
    },
    Publish {
        from: ConnectionId,
        payload: Payload,
    },
}

#[derive(Debug)]
pub enum ConnectionEvent {
    Connected { connection_id: ConnectionId },
    Forward(Payload),
}

#[derive(Message)]
#[rtype(result = "()")]
struct ConnectionActorMessage(ConnectionEvent);

enum ConnectionState {
    Idle,
    Connected(ConnectionId),
}

struct ConnectionActor {
    role: Role,
    session_id: SessionId,
    state: ConnectionState,
    srv_tx: ServerTx,
}

impl Actor for ConnectionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<ConnectionEvent>(32);

        self.srv_tx
            .try_send(ServerCommand::Connection(ConnectionCommand::Connect {
                role: self.role,
                session_id: self.session_id,
                tx,
            }))
            .expect("server must not be closed yet");

        let addr = ctx.address().recipient();

        tokio::spawn(async move {
            let addr = addr;
            log::debug!("connection green thread - started");
            while let Some(event) = rx.recv().await {
                addr.try_send(ConnectionActorMessage(event))
                    .expect("should have enough buffer");
            }
            log::debug!("connection green thread - terminated");
        });
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        if let ConnectionState::Connected(id) = self.state {
            self.srv_tx
                .try_send(ServerCommand::Connection(ConnectionCommand::Disconnect {
                    from: id,
                }))
                .expect("should have enough buffer");
        }

        Running::Stop
    }
}

/// Ingress. Narrator frames become publishes in arrival order; audience
/// connections are receive-only, so their frames are dropped here.
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ConnectionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Text(text)) => self.publish(Payload::Text(text)),
            Ok(ws::Message::Binary(bin)) => self.publish(Payload::Binary(bin)),
            Ok(ws::Message::Close(_)) => {
                if let ConnectionState::Connected(id) = self.state {
                    self.srv_tx
                        .try_send(ServerCommand::Connection(ConnectionCommand::Disconnect {
                            from: id,
                        }))
                        .expect("should have enough buffer");
                }
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl ConnectionActor {
    fn publish(&mut self, payload: Payload) {
        match self.role {
            Role::Narrator => {
                if let ConnectionState::Connected(from) = self.state {
                    self.srv_tx
                        .try_send(ServerCommand::Connection(ConnectionCommand::Publish {
                            from,
                            payload,
                        }))
                        .expect("should have enough buffer");
                }
            }
            Role::Audience => {
                log::debug!("dropping frame from audience connection");
            }
        }
    }
}

/// Egress.
impl Handler<ConnectionActorMessage> for ConnectionActor {
    type Result = ();

    fn handle(
        &mut self,
        msg: ConnectionActorMessage,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Self::Result {
        match msg.0 {
            ConnectionEvent::Connected { connection_id } => {
                self.state = ConnectionState::Connected(connection_id);
            }
            ConnectionEvent::Forward(Payload::Text(text)) => ctx.text(text),
            ConnectionEvent::Forward(Payload::Binary(bin)) => ctx.binary(bin),
        }
    }
}

pub async fn narrator_ws(
    req: HttpRequest,
    stream: web::Payload,
    srv_tx: web::Data<ServerTx>,
) -> Result<HttpResponse, Error> {
    ws_upgrade(Role::Narrator, req, stream, srv_tx).await
}

pub async fn audience_ws(
    req: HttpRequest,
    stream: web::Payload,
    srv_tx: web::Data<ServerTx>,
) -> Result<HttpResponse, Error> {
    ws_upgrade(Role::Audience, req, stream, srv_tx).await
}

/// Upgrade a recognized subscribe path. A malformed session id never
/// upgrades at all; unknown paths never reach this handler.
async fn ws_upgrade(
    role: Role,
    req: HttpRequest,
    stream: web::Payload,
    srv_tx: web::Data<ServerTx>,
) -> Result<HttpResponse, Error> {
    let session_id = match req.match_info().get("session_id") {
        Some(raw) => match raw.parse::<SessionId>() {
            Ok(id) => id,
            Err(_) => {
                log::warn!("rejecting subscribe with bad session id {:?}", raw);
                return Ok(HttpResponse::NotFound().finish());
            }
        },
        None => DEFAULT_SESSION_ID,
    };

    ws::start(
        ConnectionActor {
            role,
            session_id,
            state: ConnectionState::Idle,
            srv_tx: srv_tx.get_ref().clone(),
        },
        &req,
        stream,
    )
}

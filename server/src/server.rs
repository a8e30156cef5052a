use tokio::sync::mpsc::{channel, Sender};

use system::Role;

use crate::admin::AdminCommand;
use crate::connection::{ConnectionCommand, ConnectionEvent};
use crate::connection_tx_storage::ConnectionTxStorage;
use crate::server_state::SessionRegistry;

pub type ServerTx = Sender<ServerCommand>;

#[derive(Debug)]
pub enum ServerCommand {
    Connection(ConnectionCommand),
    Admin(AdminCommand),
}

struct Server {
    registry: SessionRegistry,
    connections: ConnectionTxStorage,
}

impl Server {
    fn new() -> Self {
        Self {
            registry: SessionRegistry::new(),
            connections: ConnectionTxStorage::new(),
        }
    }

    async fn handle_command(&mut self, command: ServerCommand) {
        match command {
            ServerCommand::Connection(command) => self.handle_connection_command(command).await,
            ServerCommand::Admin(command) => self.handle_admin_command(command),
        }
    }

    async fn handle_connection_command(&mut self, command: ConnectionCommand) {
        match command {
            ConnectionCommand::Connect {
                role,
                session_id,
                tx,
            } => {
                let connection_id = self.registry.join(session_id, role);
                self.connections.insert(connection_id, tx);
                self.connections
                    .send(&connection_id, ConnectionEvent::Connected { connection_id })
                    .await;
            }
            ConnectionCommand::Disconnect { from } => {
                if self.registry.leave(&from).is_none() {
                    log::debug!("connection {} already left", from);
                }
                self.connections.remove(&from);
            }
            ConnectionCommand::Publish { from, payload } => match self.registry.location_of(&from)
            {
                Some((session_id, Role::Narrator)) => {
                    let audience = self.registry.audience_in_session(&session_id).to_vec();
                    for connection_id in audience {
                        self.connections
                            .send(&connection_id, ConnectionEvent::Forward(payload.clone()))
                            .await;
                    }
                }
                Some((_, Role::Audience)) => {
                    log::debug!("ignoring publish from audience connection {}", from);
                }
                None => {
                    log::warn!("publish from unregistered connection {}", from);
                }
            },
        }
    }

    fn handle_admin_command(&mut self, command: AdminCommand) {
        match command {
            AdminCommand::DescribeSessions { tx } => {
                if tx.send(self.registry.describe()).is_err() {
                    log::warn!("admin query dropped before the reply");
                }
            }
        }
    }
}

pub fn spawn_server() -> ServerTx {
    let (srv_tx, mut srv_rx) = channel::<ServerCommand>(16);

    tokio::spawn(async move {
        let mut server = Box::new(Server::new());

        while let Some(command) = srv_rx.recv().await {
            server.handle_command(command).await;
        }
    });

    srv_tx
}

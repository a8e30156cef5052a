use std::collections::HashMap;
use std::num::Wrapping;

use system::{ConnectionId, Role, SessionId};

use crate::admin::SessionDescription;
use crate::session::Session;

/// Who is connected where. Sessions exist exactly as long as they have
/// members: created on first join, evicted when the last connection
/// leaves. Owned by the server loop; nothing else touches it.
pub struct SessionRegistry {
    connection_id_source: Wrapping<ConnectionId>,
    connection_locations: HashMap<ConnectionId, (SessionId, Role)>,
    sessions: HashMap<SessionId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            connection_id_source: Wrapping(0),
            connection_locations: HashMap::new(),
            sessions: HashMap::new(),
        }
    }

    pub fn join(&mut self, session_id: SessionId, role: Role) -> ConnectionId {
        let connection_id = self.new_connection_id();
        let session = self.sessions.entry(session_id).or_insert_with(Session::new);
        session.members_mut(role).push(connection_id);
        self.connection_locations
            .insert(connection_id, (session_id, role));
        log::info!(
            "connection {} joined session {} as {:?}",
            connection_id,
            session_id,
            role
        );
        connection_id
    }

    pub fn leave(&mut self, connection_id: &ConnectionId) -> Option<SessionId> {
        let (session_id, role) = self.connection_locations.remove(connection_id)?;
        if let Some(session) = self.sessions.get_mut(&session_id) {
            session.members_mut(role).retain(|id| id != connection_id);
            if session.is_empty() {
                self.sessions.remove(&session_id);
                log::info!("session {} is empty, evicting", session_id);
            }
        }
        Some(session_id)
    }

    pub fn location_of(&self, connection_id: &ConnectionId) -> Option<(SessionId, Role)> {
        self.connection_locations.get(connection_id).copied()
    }

    pub fn audience_in_session(&self, session_id: &SessionId) -> &[ConnectionId] {
        self.sessions
            .get(session_id)
            .map(|session| session.audience.as_slice())
            .unwrap_or(&[])
    }

    pub fn describe(&self) -> Vec<SessionDescription> {
        let mut descriptions = self
            .sessions
            .iter()
            .map(|(session_id, session)| SessionDescription {
                session_id: *session_id,
                narrator_count: session.narrators.len(),
                audience_count: session.audience.len(),
            })
            .collect::<Vec<_>>();
        descriptions.sort_by_key(|description| description.session_id);
        descriptions
    }

    fn new_connection_id(&mut self) -> ConnectionId {
        self.connection_id_source += Wrapping(1);
        self.connection_id_source.0
    }
}

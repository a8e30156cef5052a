use system::{ConnectionId, Role};

/// One live session: a narrator side and an audience side, each a list of
/// connection ids in join order.
pub struct Session {
    pub narrators: Vec<ConnectionId>,
    pub audience: Vec<ConnectionId>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            narrators: Vec::new(),
            audience: Vec::new(),
        }
    }

    pub fn members_mut(&mut self, role: Role) -> &mut Vec<ConnectionId> {
        match role {
            Role::Narrator => &mut self.narrators,
            Role::Audience => &mut self.audience,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.narrators.is_empty() && self.audience.is_empty()
    }
}

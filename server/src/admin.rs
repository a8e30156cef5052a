use serde::Serialize;
use tokio::sync::oneshot::Sender;

use system::SessionId;

#[derive(Debug)]
pub enum AdminCommand {
    DescribeSessions {
        tx: Sender<Vec<SessionDescription>>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionDescription {
    pub session_id: SessionId,
    pub narrator_count: usize,
    pub audience_count: usize,
}

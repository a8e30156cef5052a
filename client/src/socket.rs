use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use thiserror::Error;
use tokio::sync::mpsc;

use system::Frame;

/// How long to wait after a close before dialing the same URL again.
pub const RECONNECT_TIME_MILLIS: u64 = 3000;

#[derive(Debug, Error)]
pub enum DialError {
    #[error("could not connect: {0}")]
    Connect(String),
}

#[derive(Debug, Clone)]
pub enum SocketEvent {
    Open,
    Close,
    Error(String),
    Message(Frame),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EventKind {
    Open,
    Close,
    Error,
    Message,
}

impl SocketEvent {
    fn kind(&self) -> EventKind {
        match self {
            SocketEvent::Open => EventKind::Open,
            SocketEvent::Close => EventKind::Close,
            SocketEvent::Error(_) => EventKind::Error,
            SocketEvent::Message(_) => EventKind::Message,
        }
    }
}

/// A live connection as produced by a dialer: the outbound sink and the
/// inbound event stream. The stream ending is the close signal.
pub struct Connection {
    pub tx: mpsc::Sender<Frame>,
    pub rx: mpsc::Receiver<SocketEvent>,
}

/// The seam between reconnect bookkeeping and an actual transport, so the
/// retry logic is testable without a network.
pub trait Dialer {
    fn dial(&self, url: &str) -> LocalBoxFuture<'static, Result<Connection, DialError>>;
}

type HandlerFn = Box<dyn FnMut(&SocketEvent)>;

#[derive(Default)]
struct Handlers {
    open: Vec<HandlerFn>,
    close: Vec<HandlerFn>,
    error: Vec<HandlerFn>,
    message: Vec<HandlerFn>,
}

impl Handlers {
    fn list_mut(&mut self, kind: EventKind) -> &mut Vec<HandlerFn> {
        match kind {
            EventKind::Open => &mut self.open,
            EventKind::Close => &mut self.close,
            EventKind::Error => &mut self.error,
            EventKind::Message => &mut self.message,
        }
    }
}

struct Inner {
    online: bool,
    conn_tx: Option<mpsc::Sender<Frame>>,
}

/// A socket that keeps itself connected: on close it flips offline, fires
/// the close handlers and, after a fixed delay, dials the same URL again —
/// indefinitely, with no backoff growth and no retry cap. Sends while
/// offline are dropped silently; nothing is buffered or replayed.
#[derive(Clone)]
pub struct ReconnectingSocket {
    url: String,
    inner: Rc<RefCell<Inner>>,
    handlers: Rc<RefCell<Handlers>>,
}

impl ReconnectingSocket {
    pub fn start(url: impl Into<String>, dialer: Rc<dyn Dialer>) -> Self {
        Self::with_retry_delay(url, dialer, Duration::from_millis(RECONNECT_TIME_MILLIS))
    }

    pub fn with_retry_delay(
        url: impl Into<String>,
        dialer: Rc<dyn Dialer>,
        retry_delay: Duration,
    ) -> Self {
        let socket = Self {
            url: url.into(),
            inner: Rc::new(RefCell::new(Inner {
                online: false,
                conn_tx: None,
            })),
            handlers: Rc::new(RefCell::new(Handlers::default())),
        };
        actix_rt::spawn(supervise(
            socket.url.clone(),
            socket.inner.clone(),
            socket.handlers.clone(),
            dialer,
            retry_delay,
        ));
        socket
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_online(&self) -> bool {
        self.inner.borrow().online
    }

    pub fn on<F>(&self, kind: EventKind, handler: F)
    where
        F: FnMut(&SocketEvent) + 'static,
    {
        self.handlers
            .borrow_mut()
            .list_mut(kind)
            .push(Box::new(handler));
    }

    /// Hand a frame to the live connection, or drop it silently while
    /// offline. The caller is never told which happened.
    pub fn send(&self, frame: Frame) {
        let mut inner = self.inner.borrow_mut();
        if !inner.online {
            return;
        }
        if let Some(tx) = inner.conn_tx.as_mut() {
            if tx.try_send(frame).is_err() {
                log::warn!("outbound buffer unavailable, dropping frame");
            }
        }
    }
}

async fn supervise(
    url: String,
    inner: Rc<RefCell<Inner>>,
    handlers: Rc<RefCell<Handlers>>,
    dialer: Rc<dyn Dialer>,
    retry_delay: Duration,
) {
    loop {
        match dialer.dial(&url).await {
            Ok(Connection { tx, mut rx }) => {
                {
                    let mut inner = inner.borrow_mut();
                    inner.online = true;
                    inner.conn_tx = Some(tx);
                }
                fire(&handlers, &SocketEvent::Open);

                while let Some(event) = rx.recv().await {
                    fire(&handlers, &event);
                }

                {
                    let mut inner = inner.borrow_mut();
                    inner.online = false;
                    inner.conn_tx = None;
                }
                fire(&handlers, &SocketEvent::Close);
            }
            Err(err) => {
                log::debug!("dial failed: {}", err);
                fire(&handlers, &SocketEvent::Error(err.to_string()));
                fire(&handlers, &SocketEvent::Close);
            }
        }

        tokio::time::delay_for(retry_delay).await;
    }
}

/// Run the handlers for an event. The list is swapped out for the
/// duration so a handler may register further handlers or send on the
/// socket without tripping over a live borrow.
fn fire(handlers: &Rc<RefCell<Handlers>>, event: &SocketEvent) {
    let kind = event.kind();
    let mut current = std::mem::take(handlers.borrow_mut().list_mut(kind));
    for handler in current.iter_mut() {
        handler(event);
    }
    let mut slot = handlers.borrow_mut();
    let added = std::mem::replace(slot.list_mut(kind), current);
    slot.list_mut(kind).extend(added);
}

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use tokio::sync::mpsc;
use tokio::time::delay_for;

use client::{Connection, DialError, Dialer, EventKind, ReconnectingSocket, SocketEvent};
use system::Frame;

type EventTxSlot = Rc<RefCell<Option<mpsc::Sender<SocketEvent>>>>;
type OutRxSlot = Rc<RefCell<Option<mpsc::Receiver<Frame>>>>;

enum DialOutcome {
    Fail,
    Succeed {
        event_tx_slot: EventTxSlot,
        out_rx_slot: OutRxSlot,
    },
}

/// Plays back a script of dial outcomes and records every dialed URL.
/// Once the script runs out, every further dial fails.
struct ScriptedDialer {
    dialed: Rc<RefCell<Vec<String>>>,
    script: RefCell<Vec<DialOutcome>>,
}

impl Dialer for ScriptedDialer {
    fn dial(&self, url: &str) -> LocalBoxFuture<'static, Result<Connection, DialError>> {
        self.dialed.borrow_mut().push(url.to_owned());
        let outcome = {
            let mut script = self.script.borrow_mut();
            if script.is_empty() {
                DialOutcome::Fail
            } else {
                script.remove(0)
            }
        };
        Box::pin(async move {
            match outcome {
                DialOutcome::Fail => Err(DialError::Connect("scripted failure".into())),
                DialOutcome::Succeed {
                    event_tx_slot,
                    out_rx_slot,
                } => {
                    let (event_tx, event_rx) = mpsc::channel(32);
                    let (out_tx, out_rx) = mpsc::channel(32);
                    *event_tx_slot.borrow_mut() = Some(event_tx);
                    *out_rx_slot.borrow_mut() = Some(out_rx);
                    Ok(Connection {
                        tx: out_tx,
                        rx: event_rx,
                    })
                }
            }
        })
    }
}

fn succeed(event_tx_slot: &EventTxSlot, out_rx_slot: &OutRxSlot) -> DialOutcome {
    DialOutcome::Succeed {
        event_tx_slot: event_tx_slot.clone(),
        out_rx_slot: out_rx_slot.clone(),
    }
}

#[actix_rt::test]
async fn close_flips_offline_and_redials_the_same_url() {
    let event_slot: EventTxSlot = Rc::new(RefCell::new(None));
    let out_slot: OutRxSlot = Rc::new(RefCell::new(None));
    let dialed = Rc::new(RefCell::new(Vec::new()));
    let dialer = Rc::new(ScriptedDialer {
        dialed: dialed.clone(),
        script: RefCell::new(vec![
            succeed(&event_slot, &out_slot),
            succeed(&event_slot, &out_slot),
        ]),
    });

    let opened = Rc::new(RefCell::new(0u32));
    let closed = Rc::new(RefCell::new(0u32));
    let socket =
        ReconnectingSocket::with_retry_delay("/narrator/ws/1", dialer, Duration::from_millis(20));
    {
        let opened = opened.clone();
        socket.on(EventKind::Open, move |_| *opened.borrow_mut() += 1);
    }
    {
        let closed = closed.clone();
        socket.on(EventKind::Close, move |_| *closed.borrow_mut() += 1);
    }

    delay_for(Duration::from_millis(5)).await;
    assert!(socket.is_online());
    assert_eq!(*opened.borrow(), 1);

    // The server side goes away.
    event_slot.borrow_mut().take();
    delay_for(Duration::from_millis(5)).await;
    assert!(!socket.is_online());
    assert_eq!(*closed.borrow(), 1);

    // After the fixed delay the same URL is dialed again.
    delay_for(Duration::from_millis(40)).await;
    assert!(socket.is_online());
    assert_eq!(*opened.borrow(), 2);
    assert_eq!(dialed.borrow().len(), 2);
    assert!(dialed.borrow().iter().all(|url| url == "/narrator/ws/1"));
}

#[actix_rt::test]
async fn sends_vanish_offline_and_arrive_online() {
    let event_slot: EventTxSlot = Rc::new(RefCell::new(None));
    let out_slot: OutRxSlot = Rc::new(RefCell::new(None));
    let dialed = Rc::new(RefCell::new(Vec::new()));
    let dialer = Rc::new(ScriptedDialer {
        dialed: dialed.clone(),
        script: RefCell::new(vec![DialOutcome::Fail, succeed(&event_slot, &out_slot)]),
    });

    let socket =
        ReconnectingSocket::with_retry_delay("/narrator/ws/2", dialer, Duration::from_millis(10));

    delay_for(Duration::from_millis(5)).await;
    assert!(!socket.is_online());
    // Dropped without an error; the caller is not told.
    socket.send(Frame::Text("lost".to_owned()));

    delay_for(Duration::from_millis(20)).await;
    assert!(socket.is_online());
    socket.send(Frame::Text("kept".to_owned()));

    let mut out_rx = out_slot.borrow_mut().take().unwrap();
    match out_rx.recv().await {
        Some(Frame::Text(text)) => assert_eq!(text, "kept"),
        other => panic!("expected the online frame only, got {:?}", other),
    }
}

#[actix_rt::test]
async fn inbound_frames_reach_message_handlers() {
    let event_slot: EventTxSlot = Rc::new(RefCell::new(None));
    let out_slot: OutRxSlot = Rc::new(RefCell::new(None));
    let dialer = Rc::new(ScriptedDialer {
        dialed: Rc::new(RefCell::new(Vec::new())),
        script: RefCell::new(vec![succeed(&event_slot, &out_slot)]),
    });

    let socket =
        ReconnectingSocket::with_retry_delay("/audience/ws/2", dialer, Duration::from_millis(10));
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = seen.clone();
        socket.on(EventKind::Message, move |event| {
            if let SocketEvent::Message(Frame::Text(text)) = event {
                seen.borrow_mut().push(text.clone());
            }
        });
    }

    delay_for(Duration::from_millis(5)).await;
    let mut event_tx = event_slot.borrow_mut().take().unwrap();
    event_tx
        .send(SocketEvent::Message(Frame::Text("hello".to_owned())))
        .await
        .unwrap();

    delay_for(Duration::from_millis(5)).await;
    assert_eq!(*seen.borrow(), vec!["hello".to_owned()]);
    assert!(socket.is_online());
}

#[actix_rt::test]
async fn failed_dials_retry_forever() {
    let dialed = Rc::new(RefCell::new(Vec::new()));
    let dialer = Rc::new(ScriptedDialer {
        dialed: dialed.clone(),
        script: RefCell::new(Vec::new()),
    });

    let errors = Rc::new(RefCell::new(0u32));
    let socket =
        ReconnectingSocket::with_retry_delay("/narrator/ws/3", dialer, Duration::from_millis(10));
    {
        let errors = errors.clone();
        socket.on(EventKind::Error, move |_| *errors.borrow_mut() += 1);
    }

    delay_for(Duration::from_millis(55)).await;
    assert!(!socket.is_online());
    assert!(dialed.borrow().len() >= 3);
    assert!(*errors.borrow() >= 2);
}

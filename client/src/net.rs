use awc::ws;
use futures::future::LocalBoxFuture;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use system::Frame;

use crate::socket::{Connection, DialError, Dialer, SocketEvent};

/// Dials real WebSocket connections with `awc` and bridges the framed
/// transport onto the socket's channels with a pump task per direction.
pub struct AwcDialer;

impl Dialer for AwcDialer {
    fn dial(&self, url: &str) -> LocalBoxFuture<'static, Result<Connection, DialError>> {
        let url = url.to_owned();
        Box::pin(async move {
            let (_response, framed) = awc::Client::new()
                .ws(&url)
                .connect()
                .await
                .map_err(|err| DialError::Connect(err.to_string()))?;

            let (mut sink, mut stream) = framed.split();
            let (out_tx, mut out_rx) = mpsc::channel::<Frame>(32);
            let (mut event_tx, event_rx) = mpsc::channel::<SocketEvent>(32);

            // Outbound pump.
            actix_rt::spawn(async move {
                while let Some(frame) = out_rx.recv().await {
                    let message = match frame {
                        Frame::Text(text) => ws::Message::Text(text),
                        Frame::Binary(bytes) => ws::Message::Binary(bytes.into()),
                    };
                    if sink.send(message).await.is_err() {
                        break;
                    }
                }
            });

            // Inbound pump. Dropping `event_tx` ends the supervisor's
            // receive loop, which is how a close is observed.
            actix_rt::spawn(async move {
                while let Some(next) = stream.next().await {
                    let event = match next {
                        Ok(ws::Frame::Text(text)) => SocketEvent::Message(Frame::Text(
                            String::from_utf8_lossy(&text).into_owned(),
                        )),
                        Ok(ws::Frame::Binary(bytes)) => {
                            SocketEvent::Message(Frame::Binary(bytes.to_vec()))
                        }
                        Ok(ws::Frame::Ping(_)) | Ok(ws::Frame::Pong(_)) => continue,
                        Ok(ws::Frame::Continuation(_)) => continue,
                        Ok(ws::Frame::Close(_)) => break,
                        Err(err) => {
                            let _ = event_tx.send(SocketEvent::Error(err.to_string())).await;
                            break;
                        }
                    };
                    if event_tx.send(event).await.is_err() {
                        break;
                    }
                }
            });

            Ok(Connection {
                tx: out_tx,
                rx: event_rx,
            })
        })
    }
}

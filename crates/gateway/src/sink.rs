//! SSE-backed [`EventSink`].
//!
//! Bridges the agent loop to the response stream through a bounded channel.
//! `done` and `error` are terminal: the first one wins and later emissions
//! are dropped, so the run task and the timeout wrapper can both try to
//! terminate without producing duplicate terminal events.

use async_trait::async_trait;
use carebridge_core::{EventSink, SinkError, SinkEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

pub struct SseSink {
    tx: mpsc::Sender<SinkEvent>,
    terminal: AtomicBool,
}

impl SseSink {
    pub fn new(tx: mpsc::Sender<SinkEvent>) -> Self {
        Self {
            tx,
            terminal: AtomicBool::new(false),
        }
    }

    /// Claim the terminal slot. False means a terminal event already went out.
    fn enter_terminal(&self) -> bool {
        !self.terminal.swap(true, Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSink for SseSink {
    async fn chunk(&self, text: &str) -> Result<(), SinkError> {
        if self.terminal.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.tx
            .send(SinkEvent::Chunk { text: text.into() })
            .await
            .map_err(|_| SinkError("client disconnected".into()))
    }

    async fn done(&self) {
        if self.enter_terminal() {
            let _ = self.tx.send(SinkEvent::Done {}).await;
        }
    }

    async fn error(&self, message: &str) {
        if self.enter_terminal() {
            let _ = self
                .tx
                .send(SinkEvent::Error {
                    message: message.into(),
                })
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn forwards_chunks_then_done() {
        let (tx, mut rx) = mpsc::channel(8);
        let sink = SseSink::new(tx);

        sink.chunk("Hello").await.unwrap();
        sink.done().await;

        assert_eq!(rx.recv().await, Some(SinkEvent::Chunk { text: "Hello".into() }));
        assert_eq!(rx.recv().await, Some(SinkEvent::Done {}));
    }

    #[tokio::test]
    async fn emissions_after_terminal_are_dropped() {
        let (tx, mut rx) = mpsc::channel(8);
        let sink = SseSink::new(tx);

        sink.done().await;
        sink.error("late failure").await;
        sink.done().await;
        sink.chunk("late chunk").await.unwrap();
        drop(sink);

        assert_eq!(rx.recv().await, Some(SinkEvent::Done {}));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn error_is_terminal_too() {
        let (tx, mut rx) = mpsc::channel(8);
        let sink = SseSink::new(tx);

        sink.error("upstream failed").await;
        sink.done().await;
        drop(sink);

        assert_eq!(
            rx.recv().await,
            Some(SinkEvent::Error { message: "upstream failed".into() })
        );
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn chunk_reports_disconnect() {
        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        let sink = SseSink::new(tx);
        assert!(sink.chunk("text").await.is_err());
    }
}

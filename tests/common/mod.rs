//! tests/common/mod.rs
use async_trait::async_trait;
use mqtt_timer::bus::{BusGateway, BusMessage, QoS};
use mqtt_timer::error::Result;
use mqtt_timer::intent::unix_now;
use bytes::Bytes;
use std::sync::{Mutex, Once};
use tokio::sync::mpsc;

/// Initializes tracing for tests, ensuring it's only done once.
pub fn init_tracing() {
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        let filter =
            std::env::var("RUST_LOG").unwrap_or_else(|_| "mqtt_timer=debug".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// An in-memory bus gateway for integration tests.
///
/// Accepted publishes are appended to an in-memory log and forwarded over an
/// unbounded channel so tests can await the service's side effects.
pub struct MemoryBus {
    publish_tx: mpsc::UnboundedSender<BusMessage>,
    published: Mutex<Vec<BusMessage>>,
    subscriptions: Mutex<Vec<(String, QoS)>>,
}

impl MemoryBus {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BusMessage>) {
        init_tracing();
        let (publish_tx, publish_rx) = mpsc::unbounded_channel();
        let bus = Self {
            publish_tx,
            published: Mutex::new(Vec::new()),
            subscriptions: Mutex::new(Vec::new()),
        };
        (bus, publish_rx)
    }

    pub fn published(&self) -> Vec<BusMessage> {
        self.published.lock().unwrap().clone()
    }

    pub fn subscriptions(&self) -> Vec<(String, QoS)> {
        self.subscriptions.lock().unwrap().clone()
    }
}

#[async_trait]
impl BusGateway for MemoryBus {
    async fn publish(&self, message: BusMessage) -> Result<()> {
        self.published.lock().unwrap().push(message.clone());
        let _ = self.publish_tx.send(message);
        Ok(())
    }

    async fn subscribe(&self, filter: &str, qos: QoS) -> Result<()> {
        self.subscriptions
            .lock()
            .unwrap()
            .push((filter.to_string(), qos));
        Ok(())
    }
}

/// A Start payload whose trigger time is `delay_secs` from now.
pub fn start_payload(delay_secs: i64, response: &str) -> Bytes {
    Bytes::from(format!(
        r#"{{"triggerTimeSeconds": {}, "responsePayload": "{}"}}"#,
        unix_now() + delay_secs,
        response
    ))
}

/// A minimal Stop payload; `responsePayload` is omitted on purpose.
pub fn stop_payload() -> Bytes {
    Bytes::from_static(br#"{"triggerTimeSeconds": 0}"#)
}

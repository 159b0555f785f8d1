//! 测试辅助工具模块
//! Test utilities module

#![cfg(test)]

use crate::bus::{BusGateway, BusMessage, QoS};
use crate::error::Result;
use async_trait::async_trait;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// A recording gateway double for driving the service in tests.
///
/// Every accepted publish is both appended to an in-memory log and forwarded
/// over an unbounded channel, so tests can either await the next publish or
/// inspect the full history after the fact.
///
/// 用于在测试中驱动服务的记录型网关替身。
///
/// 每次被接受的发布既追加到内存日志，也转发到一个无界通道，
/// 因此测试既可以等待下一次发布,也可以事后检查完整历史。
pub struct RecordingBus {
    publish_tx: mpsc::UnboundedSender<BusMessage>,
    published: Mutex<Vec<BusMessage>>,
    subscriptions: Mutex<Vec<(String, QoS)>>,
    fail_publish: AtomicBool,
    fail_subscribe: AtomicBool,
}

impl RecordingBus {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BusMessage>) {
        let (publish_tx, publish_rx) = mpsc::unbounded_channel();
        let bus = Self {
            publish_tx,
            published: Mutex::new(Vec::new()),
            subscriptions: Mutex::new(Vec::new()),
            fail_publish: AtomicBool::new(false),
            fail_subscribe: AtomicBool::new(false),
        };
        (bus, publish_rx)
    }

    /// All publishes accepted so far, in order.
    pub fn published(&self) -> Vec<BusMessage> {
        self.published.lock().unwrap().clone()
    }

    /// All subscriptions accepted so far, in order.
    pub fn subscriptions(&self) -> Vec<(String, QoS)> {
        self.subscriptions.lock().unwrap().clone()
    }

    /// Makes every subsequent publish fail with a broken-pipe I/O error.
    pub fn fail_publishes(&self, fail: bool) {
        self.fail_publish.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent subscribe fail with a broken-pipe I/O error.
    pub fn fail_subscribes(&self, fail: bool) {
        self.fail_subscribe.store(fail, Ordering::SeqCst);
    }

    fn broken_pipe() -> crate::error::Error {
        io::Error::new(io::ErrorKind::BrokenPipe, "bus connection lost").into()
    }
}

#[async_trait]
impl BusGateway for RecordingBus {
    async fn publish(&self, message: BusMessage) -> Result<()> {
        if self.fail_publish.load(Ordering::SeqCst) {
            return Err(Self::broken_pipe());
        }
        self.published.lock().unwrap().push(message.clone());
        let _ = self.publish_tx.send(message);
        Ok(())
    }

    async fn subscribe(&self, filter: &str, qos: QoS) -> Result<()> {
        if self.fail_subscribe.load(Ordering::SeqCst) {
            return Err(Self::broken_pipe());
        }
        self.subscriptions
            .lock()
            .unwrap()
            .push((filter.to_string(), qos));
        Ok(())
    }
}

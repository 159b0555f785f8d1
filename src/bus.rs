//! The publish/subscribe bus seam.
//!
//! The core never talks to a broker directly. It publishes through the
//! `BusGateway` trait, and the hosting shell supplies an implementation
//! bound to a real transport (or an in-memory one for tests).
//!
//! 发布/订阅总线的接缝。
//!
//! 核心从不直接与broker通信。它通过 `BusGateway` trait 发布消息，
//! 由宿主外壳提供绑定到真实传输（或测试用内存传输）的实现。

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Bus delivery guarantee levels, mirroring the MQTT QoS values.
/// 总线投递保证级别，对应MQTT的QoS值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QoS {
    /// Fire and forget.
    /// 发后即忘。
    AtMostOnce,
    /// Delivered one or more times, never zero.
    /// 投递一次或多次，绝不为零次。
    AtLeastOnce,
    /// Delivered exactly once.
    /// 恰好投递一次。
    ExactlyOnce,
}

/// A single outbound publish.
///
/// 一次出站发布。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusMessage {
    pub topic: String,
    pub payload: Bytes,
    pub qos: QoS,
    pub retain: bool,
}

impl BusMessage {
    /// Builds the fired-timer notification for `name`: the armed payload,
    /// retained so that late subscribers still observe the last fired value.
    ///
    /// 构建 `name` 的定时器触发通知：武装时的载荷，带保留标志，
    /// 使晚到的订阅者仍能观察到最后一次触发的值。
    pub fn notification(prefix: &str, name: &str, payload: Bytes) -> Self {
        Self {
            topic: notification_topic(prefix, name),
            payload,
            qos: QoS::AtLeastOnce,
            retain: true,
        }
    }

    /// Builds the empty retained publish that clears a previously retained
    /// notification for `name` from the bus.
    ///
    /// 构建清除 `name` 先前保留通知的空保留发布。
    pub fn retained_clear(prefix: &str, name: &str) -> Self {
        Self {
            topic: notification_topic(prefix, name),
            payload: Bytes::new(),
            qos: QoS::AtLeastOnce,
            retain: true,
        }
    }
}

/// The topic a fired timer's notification is published to.
/// 定时器触发通知所发布到的主题。
pub fn notification_topic(prefix: &str, name: &str) -> String {
    format!("{prefix}/{name}")
}

/// The two wildcard filters the service subscribes to:
/// `{prefix}/+/start` and `{prefix}/+/stop`.
///
/// 服务订阅的两个通配符过滤器：`{prefix}/+/start` 和 `{prefix}/+/stop`。
pub fn control_filters(prefix: &str) -> [String; 2] {
    [format!("{prefix}/+/start"), format!("{prefix}/+/stop")]
}

/// An asynchronous publish/subscribe gateway interface.
///
/// This trait abstracts over the underlying bus client. Connection
/// management, reconnects, and transport-level retries all belong to the
/// implementor; the core surfaces I/O failures to its caller and never
/// retries internally.
///
/// 异步发布/订阅网关接口。
///
/// 此trait对底层总线客户端进行抽象。连接管理、重连和传输层重试
/// 都属于实现方；核心将I/O故障上报给调用者，绝不在内部重试。
#[async_trait]
pub trait BusGateway: Send + Sync + 'static {
    /// Publishes a single message on the bus.
    async fn publish(&self, message: BusMessage) -> Result<()>;

    /// Subscribes to a topic filter at the given QoS.
    async fn subscribe(&self, filter: &str, qos: QoS) -> Result<()>;
}

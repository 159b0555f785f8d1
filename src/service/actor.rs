//! The implementation of the `TimerServiceActor`.
//!
//! `TimerServiceActor` 的实现。

use super::{
    command::{ServiceCommand, TimerElapsed},
    registry::TimerRegistry,
};
use crate::{
    bus::{BusGateway, BusMessage},
    config::Config,
    intent::{CommandType, TimerIntent},
};
use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The actor that owns the timer registry and performs all bus side effects.
///
/// This actor runs in a dedicated task and processes commands from the public
/// `TimerService` handle and elapsed events from the registry's sleeper
/// tasks. Because one task performs every routing and firing step, the
/// clear-before-arm and cancel-before-replace orderings need no locking.
///
/// 拥有定时器注册表并执行所有总线副作用的actor。
///
/// 此actor在专用任务中运行，处理来自公共 `TimerService` 句柄的命令和
/// 来自注册表休眠任务的到期事件。由于每个路由和触发步骤都由同一个任务执行，
/// 先清除再武装、先取消再替换这两个顺序保证无需加锁。
pub(crate) struct TimerServiceActor<G: BusGateway> {
    pub(crate) gateway: Arc<G>,
    pub(crate) config: Arc<Config>,
    pub(crate) registry: TimerRegistry,
    pub(crate) command_rx: mpsc::Receiver<ServiceCommand>,
    pub(crate) fire_rx: mpsc::Receiver<TimerElapsed>,
}

impl<G: BusGateway> TimerServiceActor<G> {
    /// Runs the actor's main event loop.
    ///
    /// 运行 actor 的主事件循环。
    pub(crate) async fn run(&mut self) {
        loop {
            tokio::select! {
                // 1. Handle commands from the public handle.
                // 1. 处理来自公共句柄的命令。
                command = self.command_rx.recv() => {
                    match command {
                        Some(ServiceCommand::InboundMessage { topic, payload }) => {
                            self.route_message(&topic, &payload).await;
                        }
                        Some(ServiceCommand::Shutdown { response_tx }) => {
                            let cancelled = self.registry.cancel_all();
                            info!(cancelled, "Timer service actor shutting down");
                            let _ = response_tx.send(());
                            break;
                        }
                        // Every handle dropped: the registry's own fire
                        // sender would keep this loop alive, so treat the
                        // closed command channel as shutdown.
                        // 所有句柄已丢弃：注册表自身持有的触发发送端会让
                        // 此循环一直存活，因此将命令通道关闭视为关闭服务。
                        None => {
                            let cancelled = self.registry.cancel_all();
                            info!(cancelled, "All service handles dropped, actor shutting down");
                            break;
                        }
                    }
                }
                // 2. Handle elapsed timers from sleeper tasks.
                // 2. 处理来自休眠任务的已到期定时器。
                Some(event) = self.fire_rx.recv() => {
                    self.handle_elapsed(event).await;
                }
                else => break,
            }
        }
    }

    /// Routes one inbound bus message.
    ///
    /// Per-message errors (bad topic, bad payload, bad command) are logged
    /// and dropped without touching the registry; one bad message must never
    /// affect the processing of the next one.
    ///
    /// 路由一条入站总线消息。
    ///
    /// 单消息错误（坏主题、坏载荷、坏命令）在不触及注册表的情况下记录并丢弃；
    /// 一条坏消息绝不能影响下一条的处理。
    async fn route_message(&mut self, topic: &str, payload: &[u8]) {
        debug!(topic = %topic, payload_len = payload.len(), "Received control message");

        let intent = match TimerIntent::parse(&self.config.topic_prefix, topic, payload) {
            Ok(intent) => intent,
            Err(e) if e.is_per_message() => {
                warn!(topic = %topic, "Dropping control message: {}", e);
                return;
            }
            Err(e) => {
                error!(topic = %topic, "Dropping control message: {}", e);
                return;
            }
        };

        info!(
            name = %intent.name,
            command = ?intent.command,
            "{:?} command received for {} timer", intent.command, intent.name
        );

        match intent.command {
            CommandType::Start => {
                // Clear the previously retained notification before arming,
                // so no subscriber can observe a stale fired value once the
                // new timer is scheduled.
                // 在武装之前清除先前保留的通知，这样一旦新定时器被调度，
                // 任何订阅者都不会观察到过期的触发值。
                let clear =
                    BusMessage::retained_clear(&self.config.topic_prefix, &intent.name);
                if let Err(e) = self.gateway.publish(clear).await {
                    error!(
                        name = %intent.name,
                        "Failed to clear retained notification, not arming: {}", e
                    );
                    return;
                }
                self.registry.arm(intent);
            }
            CommandType::Stop => {
                if !self.registry.cancel(&intent.name) {
                    debug!(name = %intent.name, "Stop for a timer that is not armed, nothing to do");
                }
            }
        }
    }

    /// Handles one elapsed timer: publishes its retained notification unless
    /// the arm cycle was cancelled or replaced in the meantime.
    ///
    /// 处理一个已到期的定时器：发布其保留通知，除非该武装周期在此期间
    /// 已被取消或替换。
    async fn handle_elapsed(&mut self, event: TimerElapsed) {
        let Some(intent) = self.registry.take_fired(&event) else {
            return;
        };

        let message = BusMessage::notification(
            &self.config.topic_prefix,
            &intent.name,
            Bytes::clone(&intent.response_payload),
        );
        info!(
            name = %intent.name,
            topic = %message.topic,
            payload_len = message.payload.len(),
            "Timer fired, publishing notification"
        );

        // No internal retry: reconnect/redelivery is the gateway's concern.
        // 不做内部重试：重连/重投递是网关的职责。
        if let Err(e) = self.gateway.publish(message).await {
            error!(name = %intent.name, "Failed to publish notification: {}", e);
        }
    }
}

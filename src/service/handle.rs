//! The user-facing API of the timer service.
//!
//! 定时器服务的面向用户的API。

use super::{actor::TimerServiceActor, command::ServiceCommand, registry::TimerRegistry};
use crate::{
    bus::{control_filters, BusGateway},
    config::Config,
    error::{Error, Result},
};
use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::info;

/// A handle to a running `TimerServiceActor`.
///
/// The handle is cheap to clone; all clones feed the same actor. Dropping
/// every handle closes the command channel and stops the actor.
///
/// 指向一个正在运行的 `TimerServiceActor` 的句柄。
///
/// 句柄克隆代价很低；所有克隆都喂给同一个actor。丢弃所有句柄会关闭
/// 命令通道并停止actor。
#[derive(Clone)]
pub struct TimerService {
    command_tx: mpsc::Sender<ServiceCommand>,
}

impl TimerService {
    /// Subscribes to both control filters and spawns the service actor.
    ///
    /// Subscription failure is fatal to startup and is returned to the
    /// caller; a service that cannot see its control topics is not running.
    ///
    /// 订阅两个控制过滤器并生成服务actor。
    ///
    /// 订阅失败对启动是致命的，会返回给调用者；看不到自己控制主题的服务
    /// 不算在运行。
    pub async fn spawn<G: BusGateway>(config: Config, gateway: Arc<G>) -> Result<Self> {
        info!(prefix = %config.topic_prefix, "Timer service is starting");

        for filter in control_filters(&config.topic_prefix) {
            info!(filter = %filter, "Subscribing to control topic");
            gateway.subscribe(&filter, config.subscription_qos).await?;
        }

        let (command_tx, command_rx) = mpsc::channel(config.command_channel_capacity);
        let (fire_tx, fire_rx) = mpsc::channel(config.fire_channel_capacity);

        let mut actor = TimerServiceActor {
            gateway,
            config: Arc::new(config),
            registry: TimerRegistry::new(fire_tx),
            command_rx,
            fire_rx,
        };

        tokio::spawn(async move {
            actor.run().await;
        });

        Ok(Self { command_tx })
    }

    /// Enqueues one inbound bus message for routing.
    ///
    /// The gateway (or the hosting shell's receive loop) calls this once per
    /// delivered message. Routing itself happens on the actor task.
    ///
    /// 将一条入站总线消息入队以供路由。
    ///
    /// 网关（或宿主外壳的接收循环）对每条投递的消息调用一次。
    /// 路由本身发生在actor任务上。
    pub async fn handle_message(&self, topic: impl Into<String>, payload: Bytes) -> Result<()> {
        self.command_tx
            .send(ServiceCommand::InboundMessage {
                topic: topic.into(),
                payload,
            })
            .await
            .map_err(|_| Error::ChannelClosed)
    }

    /// Stops the service, cancelling every armed timer.
    ///
    /// Returns once the actor has drained its state and exited.
    ///
    /// 停止服务，取消每一个已武装的定时器。actor清空状态并退出后返回。
    pub async fn shutdown(&self) -> Result<()> {
        info!("Timer service is stopping");

        let (response_tx, response_rx) = oneshot::channel();
        self.command_tx
            .send(ServiceCommand::Shutdown { response_tx })
            .await
            .map_err(|_| Error::ChannelClosed)?;
        response_rx.await.map_err(|_| Error::ChannelClosed)
    }
}

//! Commands and events processed by the timer service actor.
//!
//! 定时器服务actor处理的命令与事件。

use bytes::Bytes;
use tokio::sync::oneshot;

/// Commands sent to the `TimerServiceActor`.
///
/// This enum encapsulates all operations that can be performed on the
/// service: delivering an inbound bus message and shutting the service down.
///
/// 发送到 `TimerServiceActor` 的命令。
///
/// 此枚举封装了可在服务上执行的所有操作：投递一条入站总线消息和关闭服务。
#[derive(Debug)]
pub enum ServiceCommand {
    /// One inbound bus message, exactly as the gateway delivered it.
    /// 一条入站总线消息，与网关投递时完全一致。
    InboundMessage { topic: String, payload: Bytes },

    /// Command from the public API to stop the service. All armed timers are
    /// cancelled before the reply is sent.
    /// 来自公共API的停止服务命令。回复发送之前会取消所有已武装的定时器。
    Shutdown {
        response_tx: oneshot::Sender<()>,
    },
}

/// Event from a sleeper task back to the actor: the delay for an armed timer
/// has elapsed.
///
/// The generation identifies one arm cycle; the actor ignores the event if
/// the registry entry for `name` has since been cancelled or replaced.
///
/// 从休眠任务回传给actor的事件：某个已武装定时器的延迟已经到期。
///
/// generation标识一次武装周期；如果 `name` 的注册表条目此后已被取消或替换，
/// actor会忽略该事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerElapsed {
    pub name: String,
    pub generation: u64,
}

//! 定义了定时器服务的可配置参数。
//! Defines configurable parameters for the timer service.

use crate::bus::QoS;

/// A structure containing all configurable parameters for the service.
///
/// 包含服务所有可配置参数的结构体。
#[derive(Debug, Clone)]
pub struct Config {
    /// The fixed first segment of every control and notification topic.
    /// Control messages arrive on `{topic_prefix}/{name}/{command}` and
    /// notifications are published to `{topic_prefix}/{name}`.
    ///
    /// 每个控制和通知主题的固定首段。控制消息到达
    /// `{topic_prefix}/{name}/{command}`，通知发布到 `{topic_prefix}/{name}`。
    pub topic_prefix: String,

    /// The QoS used for the two control-topic subscriptions.
    /// 两个控制主题订阅所使用的QoS。
    pub subscription_qos: QoS,

    /// The capacity of the channel carrying commands from the public handle
    /// to the service actor.
    /// 从公共句柄到服务actor的命令通道的容量。
    pub command_channel_capacity: usize,

    /// The capacity of the channel carrying elapsed-timer events from sleeper
    /// tasks back to the service actor.
    /// 从休眠任务回传已到期定时器事件到服务actor的通道容量。
    pub fire_channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topic_prefix: "mqtttimer".to_string(),
            subscription_qos: QoS::AtLeastOnce,
            command_channel_capacity: 128,
            fire_channel_capacity: 128,
        }
    }
}

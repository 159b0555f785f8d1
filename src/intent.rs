//! 定时器意图：单条控制消息解析后的不可变表示。
//! Timer intent: the parsed, immutable representation of one control message.

use crate::error::{Error, Result};
use bytes::Bytes;
use serde::Deserialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// The command carried by the final segment of a control topic.
/// 控制主题末段携带的命令。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    /// Arm (or re-arm) the named timer.
    /// 武装（或重新武装）指定名称的定时器。
    Start,
    /// Cancel the named timer.
    /// 取消指定名称的定时器。
    Stop,
}

impl CommandType {
    /// Parses the command segment, case-insensitively.
    ///
    /// Anything other than `start` or `stop` is rejected rather than
    /// defaulted: a misspelled command must never silently arm a timer.
    ///
    /// 不区分大小写地解析命令段。
    ///
    /// 除 `start` 和 `stop` 之外的任何值都会被拒绝而不是取默认值：
    /// 拼错的命令绝不能悄悄武装一个定时器。
    pub fn parse(segment: &str) -> Result<Self> {
        if segment.eq_ignore_ascii_case("start") {
            Ok(CommandType::Start)
        } else if segment.eq_ignore_ascii_case("stop") {
            Ok(CommandType::Stop)
        } else {
            Err(Error::UnrecognizedCommand(segment.to_string()))
        }
    }
}

/// The JSON body of a control message.
/// 控制消息的JSON载荷。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ControlPayload {
    /// Absolute unix epoch time, in seconds, at which the timer should fire.
    /// 定时器应触发的绝对unix纪元时间（秒）。
    trigger_time_seconds: i64,
    /// The bytes to publish when the timer fires. Stop commands may omit it.
    /// 定时器触发时要发布的字节。Stop命令可以省略。
    #[serde(default)]
    response_payload: String,
}

/// The parsed, immutable representation of one control message.
///
/// A `TimerIntent` is read-only input to the registry and the fire path;
/// nothing mutates it after parsing.
///
/// 单条控制消息解析后的不可变表示。
///
/// `TimerIntent` 是注册表和触发路径的只读输入；解析之后没有任何东西会修改它。
#[derive(Debug, Clone)]
pub struct TimerIntent {
    /// Logical timer identity, the unique key into the registry.
    /// 定时器的逻辑标识，注册表的唯一键。
    pub name: String,
    /// The parsed command.
    /// 解析出的命令。
    pub command: CommandType,
    /// Absolute unix epoch time, in seconds, at which the timer should fire.
    /// 定时器应触发的绝对unix纪元时间（秒）。
    pub trigger_time_unix_secs: i64,
    /// The exact bytes to publish on fire.
    /// 触发时要发布的确切字节。
    pub response_payload: Bytes,
}

impl TimerIntent {
    /// Parses one inbound control message into an intent.
    ///
    /// The topic must be exactly `{prefix}/{name}/{command}`; any other
    /// shape is a [`Error::MalformedTopic`]. The payload must be the JSON
    /// object described by the control contract; parse failures are
    /// [`Error::MalformedPayload`].
    ///
    /// 将一条入站控制消息解析为意图。
    ///
    /// 主题必须恰好是 `{prefix}/{name}/{command}`；任何其他形状都是
    /// [`Error::MalformedTopic`]。载荷必须是控制契约描述的JSON对象；
    /// 解析失败为 [`Error::MalformedPayload`]。
    pub fn parse(prefix: &str, topic: &str, payload: &[u8]) -> Result<Self> {
        if topic.trim().is_empty() {
            return Err(Error::MalformedTopic(topic.to_string()));
        }

        let segments: Vec<&str> = topic.split('/').collect();
        let [topic_prefix, name, command] = segments.as_slice() else {
            return Err(Error::MalformedTopic(topic.to_string()));
        };
        if *topic_prefix != prefix || name.is_empty() {
            return Err(Error::MalformedTopic(topic.to_string()));
        }

        let command = CommandType::parse(command)?;
        let body: ControlPayload = serde_json::from_slice(payload)?;

        Ok(Self {
            name: name.to_string(),
            command,
            trigger_time_unix_secs: body.trigger_time_seconds,
            response_payload: Bytes::from(body.response_payload),
        })
    }

    /// The delay until the trigger time, measured from `now_unix_secs`.
    ///
    /// A trigger time at or before `now` yields [`Duration::ZERO`]: past
    /// trigger times fire immediately, never negatively and never never.
    ///
    /// 从 `now_unix_secs` 到触发时间的延迟。
    ///
    /// 不晚于 `now` 的触发时间产生 [`Duration::ZERO`]：过去的触发时间
    /// 立即触发，绝不为负，也绝不永不触发。
    pub fn delay_from(&self, now_unix_secs: i64) -> Duration {
        let delta = self.trigger_time_unix_secs.saturating_sub(now_unix_secs);
        Duration::from_secs(delta.max(0) as u64)
    }
}

/// The current wall-clock time as unix epoch seconds.
/// 当前壁钟时间，以unix纪元秒表示。
pub fn unix_now() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        // Clock before 1970; only reachable on a badly misconfigured host.
        // 时钟早于1970；只有在主机配置严重错误时才会到达。
        Err(e) => -(e.duration().as_secs() as i64),
    }
}

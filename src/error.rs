//! 定义了库中所有可能的错误类型。
//! Defines all possible error types in the library.

use thiserror::Error;

/// The primary error type for the timer service library.
/// 定时器服务库的主要错误类型。
#[derive(Debug, Error)]
pub enum Error {
    /// The control topic was empty, had the wrong number of segments, or did
    /// not carry the configured prefix.
    /// 控制主题为空、段数错误或不带配置的前缀。
    #[error("Malformed control topic: {0:?}")]
    MalformedTopic(String),

    /// The control payload was not valid JSON or was missing a required field.
    /// 控制载荷不是有效的JSON或缺少必需字段。
    #[error("Malformed control payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The command segment of the control topic was neither `start` nor `stop`.
    /// 控制主题的命令段既不是 `start` 也不是 `stop`。
    #[error("Unrecognized command: {0:?}")]
    UnrecognizedCommand(String),

    /// An underlying I/O error occurred while talking to the bus.
    /// 与总线通信时发生了底层的I/O错误。
    #[error("Bus I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal channel for communication between tasks was closed unexpectedly.
    /// 用于任务间通信的内部通道意外关闭。
    #[error("Internal channel is broken")]
    ChannelClosed,
}

impl Error {
    /// Whether the error is local to a single control message.
    ///
    /// Per-message errors are logged and dropped by the router; they must
    /// never stop the service from processing subsequent messages.
    ///
    /// 错误是否仅限于单条控制消息。
    ///
    /// 单消息错误由路由器记录日志后丢弃，绝不能阻止服务处理后续消息。
    pub fn is_per_message(&self) -> bool {
        matches!(
            self,
            Error::MalformedTopic(_) | Error::MalformedPayload(_) | Error::UnrecognizedCommand(_)
        )
    }
}

/// A specialized `Result` type for this library.
/// 本库专用的 `Result` 类型。
pub type Result<T> = std::result::Result<T, Error>;

#![deny(clippy::expect_used, clippy::unwrap_used)]

//! The root of the MQTT-addressable one-shot timer service library.
//! MQTT可寻址的一次性定时器服务库的根。

pub mod bus;
pub mod config;
pub mod error;
pub mod intent;
pub mod service;

#[cfg(test)]
mod testing;

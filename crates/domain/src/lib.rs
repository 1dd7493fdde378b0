//! BIND statistics domain layer
pub mod config;
pub mod errors;
pub mod group;
pub mod statistics;

pub use config::{ClientConfig, Config, ConfigError, LoggingConfig};
pub use errors::{BoxError, ErrorKind, StatsError, TransportError};
pub use group::StatisticGroup;
pub use statistics::{
    Counter, Gauge, Server, Statistics, Task, TaskManager, ThreadModel, View, ZoneCounter,
    ZoneView, QRY_RTT,
};

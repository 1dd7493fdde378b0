pub mod stats_client;
pub mod stats_transport;

pub use stats_client::StatsClient;
pub use stats_transport::{StatsTransport, XmlDocument};

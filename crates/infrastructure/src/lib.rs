//! BIND statistics infrastructure layer
pub mod http;

pub use http::HttpXmlTransport;

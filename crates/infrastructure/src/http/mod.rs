pub mod endpoint;
pub mod xml_transport;

pub use endpoint::resolve_endpoint;
pub use xml_transport::HttpXmlTransport;

#![allow(dead_code)]

pub use fixtures::TestDocuments;
pub use test_server::{TestServer, TestServerBuilder};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

//! Auth transport adapter.

mod http_transport;

pub use http_transport::HttpAuthTransport;

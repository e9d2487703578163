//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the session pipeline and external
//! systems. Each port is a trait implemented by an adapter in the
//! infrastructure layer.

mod clock;
mod storage;
mod transport;

pub use clock::Clock;
pub use storage::{SessionStorage, StorageError};
pub use transport::{AuthTransport, TransportError};

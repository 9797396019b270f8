//! Wire pipeline: request construction, transport, response decoding

pub mod codec;
pub mod router;
pub mod transport;

pub use router::{Operation, WireRequest};
pub use transport::{HttpTransport, Transport, WireResponse};

/*
[INPUT]:  Transport configuration and resource requests
[OUTPUT]: HTTP responses as JSON values or structured errors
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding transports or changing client behavior
*/

pub mod client;
pub mod error;
pub mod transport;

pub use error::{ApiErrorBody, FloatError, Result};

pub use client::{ClientConfig, HttpTransport};
pub use transport::{ApiRequest, MockReply, MockTransport, Transport};

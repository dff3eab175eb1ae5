//! Mock implementations for testing.

pub mod api;
pub mod transport;

pub use api::{ApiCall, ApiOperation, MockSendPostApi};
pub use transport::{MockResponse, MockTransport, RecordedRequest};

//! Infrastructure adapters: HTTP transport, the session gateway and the clock.

pub mod clock;
pub mod dto_converters;
pub mod http_client;
pub mod session_gateway;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use clock::SystemClock;
pub use http_client::ApiAdapter;
pub use session_gateway::HttpSessionGateway;

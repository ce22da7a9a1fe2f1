//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to talk to the session server and the system
//! clock without depending on concrete implementations.

pub mod api_error;
pub mod clock_port;
pub mod raw_api_port;
pub mod session_gateway_port;

pub use api_error::ApiError;
pub use clock_port::ClockPort;
pub use raw_api_port::RawApiPort;
pub use session_gateway_port::SessionGatewayPort;

#[cfg(any(test, feature = "testing"))]
pub use clock_port::MockClockPort;
#[cfg(any(test, feature = "testing"))]
pub use raw_api_port::MockRawApiPort;
#[cfg(any(test, feature = "testing"))]
pub use session_gateway_port::MockSessionGatewayPort;

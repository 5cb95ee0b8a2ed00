//! Relay client used by the booking form to deliver accepted requests

mod http;
mod traits;

pub use http::{RelayClient, RelayClientError};
pub use traits::RelayClientTrait;

#[cfg(test)]
pub use traits::MockRelayClientTrait;

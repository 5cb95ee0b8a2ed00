//! Submission relay: posted booking form in, notification mail out

mod mail;
mod outcome;
mod payload;
mod server;
mod transport;

pub use outcome::RelayOutcome;
pub use payload::SubmissionPayload;
pub use server::serve;

#[cfg(test)]
pub use server::{router, RelayState, RELAY_PATH};
#[cfg(test)]
pub use transport::{MockMailTransport, TransportError};

//! SweeperKeeper Networking - HTTP client adapter and authenticated sessions

pub mod http;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use http::{LoginOutcome, Session, SweeperClient};

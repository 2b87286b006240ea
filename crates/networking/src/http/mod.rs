//! HTTP transport: the unauthenticated client and the session it produces

mod client;
mod session;


pub use client::{LoginOutcome, SweeperClient};
pub use session::Session;

//! Data models for SweeperKeeper entities

mod account;
mod auth;
mod casino;
mod claim;

pub use account::*;
pub use auth::*;
pub use casino::*;
pub use claim::*;

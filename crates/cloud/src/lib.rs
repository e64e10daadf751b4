//! Cloud side of history sync for legalguard
//!
//! Remote Store (hosted table service) and Session Identity Provider
//! (hosted password auth), each behind a trait so the synchronizer can run
//! against fakes.

mod auth;
mod config;
mod error;
mod remote;
mod rows;
mod session;
mod tables;

#[cfg(test)]
mod auth_tests;

pub use auth::{PasswordAuth, SignUpOutcome};
pub use config::CloudConfig;
pub use error::{AuthError, CloudError};
pub use remote::{DisabledRemote, RemoteStore};
pub use session::{SessionProvider, StaticSession};
pub use tables::TableClient;

//! Vote-casting coordination.
//!
//! The node crate wires the ledger and the anonymous tally into one
//! vote-cast operation, behind the boundaries the polling-station stack
//! plugs into:
//! - biometric authentication (returns a voter reference or nothing)
//! - the eligibility lookup (voter registry / authorization status)
//! - the camera-based fraud monitor (notified, fire-and-forget)

pub mod boundary;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod logging;

pub use boundary::{
    Authenticator, BoundaryError, EligibilityCheck, FraudMonitor, NoopFraudMonitor,
    MIN_AUTH_CONFIDENCE,
};
pub use config::{NodeConfig, PartyInfo};
pub use coordinator::{Receipt, VoteCoordinator, VoteStats};
pub use error::{NodeError, VoteError};
pub use logging::{init_logging, LogFormat};

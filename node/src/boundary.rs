//! Boundaries to external collaborators.
//!
//! The core treats biometric recognition, the voter registry, and the
//! fraud monitor as black boxes behind these traits. Production wiring
//! plugs in service clients; tests plug in fakes.

use std::fmt;

use ballot_types::VoterRef;
use thiserror::Error;

/// Minimum recognizer confidence accepted for a biometric match.
pub const MIN_AUTH_CONFIDENCE: f32 = 0.6;

/// An error reported by an external collaborator, opaque to the core.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct BoundaryError(pub String);

impl BoundaryError {
    pub fn new(msg: impl fmt::Display) -> Self {
        Self(msg.to_string())
    }
}

/// Biometric authentication: maps a captured sample to a voter reference
/// and a confidence score, or to nothing when no voter matches.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, sample: &[u8]) -> Result<Option<(VoterRef, f32)>, BoundaryError>;
}

/// The voter registry's authorization lookup (status == approved).
pub trait EligibilityCheck: Send + Sync {
    fn is_eligible(&self, voter_ref: &VoterRef) -> Result<bool, BoundaryError>;
}

/// The camera-based fraud monitor, notified around a cast attempt.
///
/// Notification is fire-and-forget: callers log failures and carry on, a
/// monitoring outage must never block a vote.
pub trait FraudMonitor: Send + Sync {
    fn start_monitoring(&self, voter_ref: &VoterRef) -> Result<(), BoundaryError>;
    fn stop_monitoring(&self, voter_ref: &VoterRef) -> Result<(), BoundaryError>;
}

/// Fraud monitor that does nothing — for deployments without cameras.
pub struct NoopFraudMonitor;

impl FraudMonitor for NoopFraudMonitor {
    fn start_monitoring(&self, _voter_ref: &VoterRef) -> Result<(), BoundaryError> {
        Ok(())
    }

    fn stop_monitoring(&self, _voter_ref: &VoterRef) -> Result<(), BoundaryError> {
        Ok(())
    }
}

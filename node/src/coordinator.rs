//! The vote coordinator — one full cast as a single logical operation.
//!
//! A cast spans two independently persisted stores with no shared
//! transaction: the participation chain and the anonymous tally. The
//! ordering is strictly ledger-before-tally, so the only possible
//! inconsistency is a recorded participation without a counted ballot —
//! an undercount that is detectable and surfaced for reconciliation,
//! never an undetectable overcount.

use std::collections::BTreeMap;
use std::sync::Arc;

use ballot_ledger::{AnonymousTally, VoteLedger};
use ballot_store::StoreError;
use ballot_types::{BlockHash, PartyCode, VoterRef};

use crate::boundary::{Authenticator, EligibilityCheck, FraudMonitor, MIN_AUTH_CONFIDENCE};
use crate::{BoundaryError, VoteError};

/// Handed to the voter after a successful cast. Proves a participation was
/// recorded without revealing the ballot selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Hash of the chain block holding the participation record.
    pub block_hash: BlockHash,
    /// 1-based position of the participation across the election.
    pub position: u64,
}

/// Public voting statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteStats {
    pub total_votes: u64,
    pub by_party: BTreeMap<PartyCode, u64>,
}

/// Orchestrates a cast attempt across the ledger, the tally, and the
/// external collaborators.
pub struct VoteCoordinator {
    ledger: Arc<VoteLedger>,
    tally: AnonymousTally,
    authenticator: Box<dyn Authenticator>,
    eligibility: Box<dyn EligibilityCheck>,
    fraud: Box<dyn FraudMonitor>,
}

impl VoteCoordinator {
    pub fn new(
        ledger: Arc<VoteLedger>,
        tally: AnonymousTally,
        authenticator: Box<dyn Authenticator>,
        eligibility: Box<dyn EligibilityCheck>,
        fraud: Box<dyn FraudMonitor>,
    ) -> Self {
        Self {
            ledger,
            tally,
            authenticator,
            eligibility,
            fraud,
        }
    }

    /// Resolve a biometric sample to a voter reference.
    ///
    /// Matches below [`MIN_AUTH_CONFIDENCE`] are treated as no match.
    pub fn identify(&self, sample: &[u8]) -> Result<Option<VoterRef>, BoundaryError> {
        let Some((voter_ref, confidence)) = self.authenticator.authenticate(sample)? else {
            return Ok(None);
        };
        if confidence < MIN_AUTH_CONFIDENCE {
            tracing::debug!(confidence, "biometric match below confidence threshold");
            return Ok(None);
        }
        Ok(Some(voter_ref))
    }

    /// Cast one vote: eligibility check, ledger append, tally write.
    ///
    /// The fraud monitor is notified around the attempt; its failures are
    /// logged and ignored. Terminal outcomes map to [`VoteError`]:
    /// `NotEligible` and `AlreadyVoted` are expected; `Ledger` means nothing
    /// was recorded; `Tally` means the participation in `block_hash` needs
    /// operator reconciliation.
    pub fn cast_vote(&self, voter_ref: &VoterRef, party: &PartyCode) -> Result<Receipt, VoteError> {
        match self.eligibility.is_eligible(voter_ref) {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!("cast rejected, voter not approved");
                return Err(VoteError::NotEligible);
            }
            Err(e) => return Err(VoteError::Eligibility(e)),
        }

        if let Err(e) = self.fraud.start_monitoring(voter_ref) {
            tracing::warn!(error = %e, "fraud monitor start failed");
        }

        let result = self.record_and_tally(voter_ref, party);

        if let Err(e) = self.fraud.stop_monitoring(voter_ref) {
            tracing::warn!(error = %e, "fraud monitor stop failed");
        }

        result
    }

    fn record_and_tally(
        &self,
        voter_ref: &VoterRef,
        party: &PartyCode,
    ) -> Result<Receipt, VoteError> {
        let participation = self
            .ledger
            .record_participation(voter_ref)
            .map_err(VoteError::Ledger)?;

        let Some(participation) = participation else {
            tracing::info!("cast rejected, voter has already voted");
            return Err(VoteError::AlreadyVoted);
        };

        match self.tally.record(party, &participation.block_hash) {
            Ok(_) => Ok(Receipt {
                block_hash: participation.block_hash,
                position: participation.position,
            }),
            Err(source) => {
                tracing::error!(
                    block = %participation.block_hash,
                    error = %source,
                    "participation recorded but ballot not tallied, reconciliation required"
                );
                Err(VoteError::Tally {
                    block_hash: participation.block_hash,
                    source,
                })
            }
        }
    }

    /// Whether this voter already has a participation record.
    pub fn has_voted(&self, voter_ref: &VoterRef) -> bool {
        self.ledger.has_voted(voter_ref)
    }

    /// Public statistics: total participation and per-party ballot counts.
    pub fn stats(&self) -> Result<VoteStats, StoreError> {
        Ok(VoteStats {
            total_votes: self.ledger.count(),
            by_party: self.tally.count_by_party()?,
        })
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    pub fn tally(&self) -> &AnonymousTally {
        &self.tally
    }
}

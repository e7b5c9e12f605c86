//! Integration tests exercising the full cast pipeline:
//! eligibility → ledger append → tally write → receipt, on real file
//! stores, plus the fault paths the unit tests cannot reach end-to-end.

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ballot_ledger::{AnonymousTally, VoteLedger};
use ballot_node::{
    Authenticator, BoundaryError, EligibilityCheck, FraudMonitor, NoopFraudMonitor, Receipt,
    VoteCoordinator, VoteError,
};
use ballot_store::{ChainStore, MemoryChainStore, MemoryTallyStore, StoreError, TallyStore};
use ballot_store_file::{FileChainStore, FileTallyStore};
use ballot_types::{PartyCode, VoterRef};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Recognizer fake: samples look like "NIC123:0.91".
struct FakeRecognizer;

impl Authenticator for FakeRecognizer {
    fn authenticate(&self, sample: &[u8]) -> Result<Option<(VoterRef, f32)>, BoundaryError> {
        let s = std::str::from_utf8(sample).map_err(BoundaryError::new)?;
        match s.split_once(':') {
            Some((nic, conf)) => {
                let confidence: f32 = conf.parse().map_err(BoundaryError::new)?;
                Ok(Some((VoterRef::new(nic), confidence)))
            }
            None => Ok(None),
        }
    }
}

struct ApprovedList(HashSet<VoterRef>);

impl ApprovedList {
    fn of(nics: &[&str]) -> Box<Self> {
        Box::new(Self(nics.iter().map(|n| VoterRef::new(*n)).collect()))
    }
}

impl EligibilityCheck for ApprovedList {
    fn is_eligible(&self, voter_ref: &VoterRef) -> Result<bool, BoundaryError> {
        Ok(self.0.contains(voter_ref))
    }
}

#[derive(Default)]
struct MonitorCalls {
    starts: AtomicUsize,
    stops: AtomicUsize,
    failing: bool,
}

struct CountingMonitor(Arc<MonitorCalls>);

impl FraudMonitor for CountingMonitor {
    fn start_monitoring(&self, _voter_ref: &VoterRef) -> Result<(), BoundaryError> {
        self.0.starts.fetch_add(1, Ordering::SeqCst);
        if self.0.failing {
            return Err(BoundaryError::new("camera service unreachable"));
        }
        Ok(())
    }

    fn stop_monitoring(&self, _voter_ref: &VoterRef) -> Result<(), BoundaryError> {
        self.0.stops.fetch_add(1, Ordering::SeqCst);
        if self.0.failing {
            return Err(BoundaryError::new("camera service unreachable"));
        }
        Ok(())
    }
}

fn file_coordinator(dir: &Path, approved: &[&str]) -> VoteCoordinator {
    let ledger = VoteLedger::open(
        Box::new(FileChainStore::new(dir.join("vote_chain.json"))),
        10,
    )
    .expect("open ledger");
    let tally = AnonymousTally::new(Box::new(FileTallyStore::new(
        dir.join("anonymous_votes.json"),
    )));
    VoteCoordinator::new(
        Arc::new(ledger),
        tally,
        Box::new(FakeRecognizer),
        ApprovedList::of(approved),
        Box::new(NoopFraudMonitor),
    )
}

fn party(code: &str) -> PartyCode {
    PartyCode::new(code)
}

fn voter(nic: &str) -> VoterRef {
    VoterRef::new(nic)
}

// ---------------------------------------------------------------------------
// 1. Full cast pipeline on file stores
// ---------------------------------------------------------------------------

#[test]
fn cast_vote_yields_receipt_and_consistent_counts() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = file_coordinator(dir.path(), &["NIC1"]);

    let receipt = coordinator.cast_vote(&voter("NIC1"), &party("2")).unwrap();
    assert_eq!(receipt.position, 1);
    assert_eq!(receipt.block_hash, coordinator.ledger().latest_hash());

    let stats = coordinator.stats().unwrap();
    assert_eq!(stats.total_votes, 1);
    assert_eq!(stats.by_party[&party("2")], 1);
    assert_eq!(
        coordinator.ledger().count(),
        coordinator.tally().total().unwrap()
    );
}

#[test]
fn second_cast_is_rejected_with_already_voted() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = file_coordinator(dir.path(), &["NIC1"]);

    coordinator.cast_vote(&voter("NIC1"), &party("2")).unwrap();
    let second = coordinator.cast_vote(&voter("NIC1"), &party("3"));
    assert!(matches!(second, Err(VoteError::AlreadyVoted)));

    // The second attempt must not leave a tally entry for party 3.
    let stats = coordinator.stats().unwrap();
    assert_eq!(stats.by_party[&party("2")], 1);
    assert!(!stats.by_party.contains_key(&party("3")));
    assert_eq!(stats.total_votes, 1);
}

#[test]
fn unapproved_voter_is_rejected_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = file_coordinator(dir.path(), &["NIC1"]);

    let result = coordinator.cast_vote(&voter("NIC2"), &party("2"));
    assert!(matches!(result, Err(VoteError::NotEligible)));
    assert!(!coordinator.has_voted(&voter("NIC2")));
    assert_eq!(coordinator.stats().unwrap().total_votes, 0);
}

#[test]
fn eleventh_cast_crosses_the_block_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let approved: Vec<String> = (1..=11).map(|n| format!("NIC{n}")).collect();
    let approved_refs: Vec<&str> = approved.iter().map(String::as_str).collect();
    let coordinator = file_coordinator(dir.path(), &approved_refs);

    let mut receipts: Vec<Receipt> = Vec::new();
    for (i, nic) in approved.iter().enumerate() {
        let code = if i % 2 == 0 { "2" } else { "5" };
        receipts.push(coordinator.cast_vote(&voter(nic), &party(code)).unwrap());
    }

    assert_eq!(coordinator.ledger().block_count(), 2);
    // The 11th receipt points at the freshly opened block, not block 0.
    assert_ne!(receipts[10].block_hash, receipts[9].block_hash);
    assert_eq!(receipts[10].position, 11);

    let stats = coordinator.stats().unwrap();
    assert_eq!(stats.total_votes, 11);
    assert_eq!(stats.by_party[&party("2")], 6);
    assert_eq!(stats.by_party[&party("5")], 5);
    assert_eq!(stats.total_votes, coordinator.tally().total().unwrap());
}

// ---------------------------------------------------------------------------
// 2. Restart behaviour
// ---------------------------------------------------------------------------

#[test]
fn restart_reopens_the_same_chain_and_tally() {
    let dir = tempfile::tempdir().unwrap();
    {
        let coordinator = file_coordinator(dir.path(), &["NIC1", "NIC2", "NIC3"]);
        coordinator.cast_vote(&voter("NIC1"), &party("2")).unwrap();
        coordinator.cast_vote(&voter("NIC2"), &party("5")).unwrap();
    }

    let coordinator = file_coordinator(dir.path(), &["NIC1", "NIC2", "NIC3"]);
    assert!(coordinator.has_voted(&voter("NIC1")));
    assert!(coordinator.has_voted(&voter("NIC2")));
    assert!(!coordinator.has_voted(&voter("NIC3")));

    // A retry after restart is still a duplicate.
    assert!(matches!(
        coordinator.cast_vote(&voter("NIC1"), &party("2")),
        Err(VoteError::AlreadyVoted)
    ));

    coordinator.cast_vote(&voter("NIC3"), &party("2")).unwrap();
    let stats = coordinator.stats().unwrap();
    assert_eq!(stats.total_votes, 3);
    assert_eq!(stats.by_party[&party("2")], 2);
    assert_eq!(stats.by_party[&party("5")], 1);
}

// ---------------------------------------------------------------------------
// 3. Fault paths
// ---------------------------------------------------------------------------

fn memory_coordinator(
    approved: &[&str],
) -> (Arc<MemoryChainStore>, Arc<MemoryTallyStore>, VoteCoordinator) {
    struct SharedChain(Arc<MemoryChainStore>);
    impl ChainStore for SharedChain {
        fn load(&self) -> Result<Option<Vec<ballot_chain::Block>>, StoreError> {
            self.0.load()
        }
        fn save(&self, blocks: &[ballot_chain::Block]) -> Result<(), StoreError> {
            self.0.save(blocks)
        }
    }
    struct SharedTally(Arc<MemoryTallyStore>);
    impl TallyStore for SharedTally {
        fn record(
            &self,
            p: &PartyCode,
            h: &ballot_types::BlockHash,
        ) -> Result<ballot_store::TallyId, StoreError> {
            self.0.record(p, h)
        }
        fn count_by_party(
            &self,
        ) -> Result<std::collections::BTreeMap<PartyCode, u64>, StoreError> {
            self.0.count_by_party()
        }
        fn total(&self) -> Result<u64, StoreError> {
            self.0.total()
        }
    }

    let chain_store = Arc::new(MemoryChainStore::new());
    let tally_store = Arc::new(MemoryTallyStore::new());
    let ledger = VoteLedger::open(Box::new(SharedChain(chain_store.clone())), 10).unwrap();
    let coordinator = VoteCoordinator::new(
        Arc::new(ledger),
        AnonymousTally::new(Box::new(SharedTally(tally_store.clone()))),
        Box::new(FakeRecognizer),
        ApprovedList::of(approved),
        Box::new(NoopFraudMonitor),
    );
    (chain_store, tally_store, coordinator)
}

#[test]
fn ledger_save_failure_records_nothing() {
    let (chain_store, tally_store, coordinator) = memory_coordinator(&["NIC1"]);

    chain_store.fail_next_save();
    let result = coordinator.cast_vote(&voter("NIC1"), &party("2"));
    assert!(matches!(result, Err(VoteError::Ledger(_))));

    // Atomic failure: no participation, no ballot.
    assert!(!coordinator.has_voted(&voter("NIC1")));
    assert_eq!(tally_store.total().unwrap(), 0);

    // The voter is not burned by the outage.
    assert!(coordinator.cast_vote(&voter("NIC1"), &party("2")).is_ok());
}

#[test]
fn tally_failure_surfaces_reconciliation_case() {
    let (_chain_store, tally_store, coordinator) = memory_coordinator(&["NIC1"]);

    tally_store.fail_next_record();
    let result = coordinator.cast_vote(&voter("NIC1"), &party("2"));
    let Err(VoteError::Tally { block_hash, .. }) = result else {
        panic!("expected tally reconciliation error");
    };

    // Participation is durably recorded in the named block, ballot is not.
    assert!(coordinator.has_voted(&voter("NIC1")));
    assert_eq!(block_hash, coordinator.ledger().latest_hash());
    assert_eq!(tally_store.total().unwrap(), 0);

    // A blind retry is a duplicate, not a second ballot.
    assert!(matches!(
        coordinator.cast_vote(&voter("NIC1"), &party("2")),
        Err(VoteError::AlreadyVoted)
    ));
}

#[test]
fn fraud_monitor_outage_does_not_block_the_cast() {
    let calls = Arc::new(MonitorCalls {
        failing: true,
        ..Default::default()
    });
    let dir = tempfile::tempdir().unwrap();
    let ledger = VoteLedger::open(
        Box::new(FileChainStore::new(dir.path().join("vote_chain.json"))),
        10,
    )
    .unwrap();
    let coordinator = VoteCoordinator::new(
        Arc::new(ledger),
        AnonymousTally::new(Box::new(MemoryTallyStore::new())),
        Box::new(FakeRecognizer),
        ApprovedList::of(&["NIC1"]),
        Box::new(CountingMonitor(calls.clone())),
    );

    coordinator.cast_vote(&voter("NIC1"), &party("2")).unwrap();
    assert_eq!(calls.starts.load(Ordering::SeqCst), 1);
    assert_eq!(calls.stops.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------------
// 4. Biometric boundary
// ---------------------------------------------------------------------------

#[test]
fn identify_applies_the_confidence_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = file_coordinator(dir.path(), &["NIC1"]);

    let strong = coordinator.identify(b"NIC1:0.91").unwrap();
    assert_eq!(strong, Some(voter("NIC1")));

    let weak = coordinator.identify(b"NIC1:0.40").unwrap();
    assert_eq!(weak, None);

    let unknown = coordinator.identify(b"no-match").unwrap();
    assert_eq!(unknown, None);
}

// ---------------------------------------------------------------------------
// 5. Concurrency through the coordinator
// ---------------------------------------------------------------------------

#[test]
fn concurrent_casts_for_one_voter_count_once() {
    let (_chain_store, tally_store, coordinator) = memory_coordinator(&["NIC-RACE"]);
    let coordinator = Arc::new(coordinator);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let coordinator = coordinator.clone();
            std::thread::spawn(move || coordinator.cast_vote(&voter("NIC-RACE"), &party("2")))
        })
        .collect();

    let mut ok = 0;
    let mut already = 0;
    for handle in handles {
        match handle.join().expect("thread panicked") {
            Ok(_) => ok += 1,
            Err(VoteError::AlreadyVoted) => already += 1,
            Err(e) => panic!("unexpected outcome: {e}"),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(already, 7);
    assert_eq!(coordinator.ledger().count(), 1);
    assert_eq!(tally_store.total().unwrap(), 1);
}

use proptest::prelude::*;

use cohort_access::{Role, RoleTable};
use cohort_governance::{
    majority_threshold, GovernanceEngine, GovernanceError, ProposalPhase,
};
use cohort_types::{Address, CohortId, Timestamp, MAX_COHORTS};

fn account(seed: u8) -> Address {
    Address::new([seed; 20])
}

const DEPLOYER: u8 = 0xD0;
const CANDIDATE: u8 = 0xCA;

/// Engine with `n` cohorts; cohort `i` is run by `account(i + 1)`.
fn engine_with(n: usize) -> GovernanceEngine {
    let mut engine = GovernanceEngine::new(RoleTable::with_admin(account(DEPLOYER)), None);
    for i in 0..n {
        engine
            .setup_cohort(&account(DEPLOYER), CohortId(i as u32), "c", account(i as u8 + 1))
            .unwrap();
    }
    engine
}

proptest! {
    /// Ids at or above the capacity are rejected whatever the registry holds.
    #[test]
    fn out_of_range_ids_always_invalid(id in (MAX_COHORTS as u32).., existing in 0..=MAX_COHORTS) {
        let mut engine = engine_with(existing);
        let result = engine.setup_cohort(&account(DEPLOYER), CohortId(id), "x", account(0x99));
        prop_assert_eq!(result.unwrap_err(), GovernanceError::InvalidId(CohortId(id)));
        prop_assert_eq!(engine.total_cohorts(), existing);
    }

    /// Re-setup of a taken id is a duplicate however full the registry is.
    #[test]
    fn resetup_always_already_set(existing in 1..=MAX_COHORTS, pick in 0usize..MAX_COHORTS) {
        let id = CohortId((pick % existing) as u32);
        let mut engine = engine_with(existing);
        let result = engine.setup_cohort(&account(DEPLOYER), id, "again", account(0x99));
        prop_assert_eq!(result.unwrap_err(), GovernanceError::AlreadySet(id));
        prop_assert_eq!(engine.cohort(id).unwrap().admin, account(id.0 as u8 + 1));
        prop_assert_eq!(engine.total_cohorts(), existing);
    }

    /// The registry count never exceeds capacity, whatever ids are attempted.
    #[test]
    fn registry_never_overflows(ids in prop::collection::vec(0u32..8, 0..20)) {
        let mut engine = engine_with(0);
        for id in ids {
            let _ = engine.setup_cohort(&account(DEPLOYER), CohortId(id), "c", account(0x42));
            prop_assert!(engine.total_cohorts() <= MAX_COHORTS);
        }
    }

    /// At every instant exactly one of vote and result is available.
    #[test]
    fn vote_and_result_windows_complement(
        start in 0u64..1_000_000,
        timeframe in 0u64..10_000,
        offset in 0u64..20_000,
    ) {
        let mut engine = engine_with(2);
        let id = engine
            .make_proposal(&account(1), CohortId(0), "obj", timeframe, Timestamp::new(start))
            .unwrap();
        let at = Timestamp::new(start + offset);

        let vote = engine.vote(&account(2), id, CohortId(1), at);
        let result = engine.result_of_proposal(id, at);
        prop_assert!(vote.is_ok() != result.is_ok());
        if offset < timeframe {
            prop_assert_eq!(engine.proposal_phase(id, at), ProposalPhase::Open);
            prop_assert_eq!(result.unwrap_err(), GovernanceError::VotingStillActive(id));
        } else {
            prop_assert_eq!(engine.proposal_phase(id, at), ProposalPhase::Closed);
            prop_assert_eq!(vote.unwrap_err(), GovernanceError::VotingNotActive(id));
        }
    }

    /// The yes count equals the number of distinct cohorts that voted.
    #[test]
    fn yes_count_counts_distinct_voters(voters in prop::collection::vec(0u32..5, 0..25)) {
        let mut engine = engine_with(MAX_COHORTS);
        let id = engine
            .make_proposal(&account(1), CohortId(0), "obj", 100, Timestamp::new(0))
            .unwrap();
        for v in &voters {
            engine.vote(&account(*v as u8 + 1), id, CohortId(*v), Timestamp::new(1)).unwrap();
        }
        let mut distinct = voters.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(
            engine.result_of_proposal(id, Timestamp::new(100)).unwrap(),
            distinct.len() as u32
        );
    }

    /// Promotion happens exactly when distinct voters reach the majority.
    #[test]
    fn default_admin_executes_at_majority(
        n in 1usize..=MAX_COHORTS,
        order in Just((0..MAX_COHORTS as u32).collect::<Vec<u32>>()).prop_shuffle(),
    ) {
        let mut engine = engine_with(n);
        let threshold = majority_threshold(n);
        let voters: Vec<u32> = order.into_iter().filter(|id| (*id as usize) < n).collect();

        for (cast, id) in voters.iter().enumerate() {
            let outcome = engine
                .change_default_admin(&account(*id as u8 + 1), account(CANDIDATE), CohortId(*id))
                .unwrap();
            let promoted = engine.has_role(Role::DefaultAdmin, &account(CANDIDATE));
            if cast + 1 < threshold {
                prop_assert!(!outcome.is_executed());
                prop_assert!(!promoted);
            } else if cast + 1 == threshold {
                prop_assert!(outcome.is_executed());
                prop_assert!(promoted);
                prop_assert_eq!(engine.default_admin_votes(&account(CANDIDATE)), 0);
            } else {
                // A fresh round after clearing.
                prop_assert!(!outcome.is_executed() || threshold == 1);
            }
        }
    }

    /// A cohort voting only for its own replacement never changes its admin.
    #[test]
    fn self_votes_never_replace(n in 1usize..=MAX_COHORTS, target in 0u32..5, tries in 1usize..6) {
        prop_assume!((target as usize) < n);
        let mut engine = engine_with(n);
        for _ in 0..tries {
            let err = engine
                .change_cohort_admin(&account(target as u8 + 1), account(CANDIDATE), CohortId(target), CohortId(target))
                .unwrap_err();
            prop_assert_eq!(err, GovernanceError::SelfVoteForbidden(CohortId(target)));
        }
        prop_assert_eq!(engine.cohort(CohortId(target)).unwrap().admin, account(target as u8 + 1));
        prop_assert_eq!(engine.cohort_admin_votes(CohortId(target), &account(CANDIDATE)), 0);
    }
}

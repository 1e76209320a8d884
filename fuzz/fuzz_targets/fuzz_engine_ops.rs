#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use cohort_access::{Role, RoleTable};
use cohort_governance::GovernanceEngine;
use cohort_types::{Address, CohortId, Digest, ProposalId, Timestamp, MAX_COHORTS};

#[derive(Arbitrary, Debug)]
enum Op {
    Setup { caller: u8, id: u32, admin: u8 },
    SetRoot { caller: u8, cohort: u32, root: [u8; 32] },
    Propose { caller: u8, cohort: u32, timeframe: u16 },
    Vote { caller: u8, proposal: u8, voter: u32 },
    Result { proposal: u8 },
    DefaultAdmin { caller: u8, candidate: u8, voter: u32 },
    CohortAdmin { caller: u8, candidate: u8, target: u32, voter: u32 },
    Tick { secs: u16 },
}

fn account(seed: u8) -> Address {
    Address::new([seed; 20])
}

// Drive the engine with an arbitrary operation sequence drawn from a small
// address space. No operation may panic and the registry never overflows.
fuzz_target!(|ops: Vec<Op>| {
    let mut engine = GovernanceEngine::new(RoleTable::with_admin(account(0)), Some(account(0xFF)));
    let mut now = Timestamp::new(0);

    for op in ops.into_iter().take(512) {
        match op {
            Op::Setup { caller, id, admin } => {
                let _ = engine.setup_cohort(&account(caller % 4), CohortId(id), "c", account(admin));
            }
            Op::SetRoot { caller, cohort, root } => {
                let _ = engine.set_membership_root(&account(caller), CohortId(cohort), Digest::new(root));
            }
            Op::Propose { caller, cohort, timeframe } => {
                let _ = engine.make_proposal(&account(caller), CohortId(cohort), "obj", timeframe.into(), now);
            }
            Op::Vote { caller, proposal, voter } => {
                let _ = engine.vote(&account(caller), ProposalId(proposal.into()), CohortId(voter), now);
            }
            Op::Result { proposal } => {
                let _ = engine.result_of_proposal(ProposalId(proposal.into()), now);
            }
            Op::DefaultAdmin { caller, candidate, voter } => {
                let _ = engine.change_default_admin(&account(caller), account(candidate), CohortId(voter));
            }
            Op::CohortAdmin { caller, candidate, target, voter } => {
                let _ = engine.change_cohort_admin(
                    &account(caller),
                    account(candidate),
                    CohortId(target),
                    CohortId(voter),
                );
            }
            Op::Tick { secs } => now = now.plus_secs(secs.into()),
        }
        assert!(engine.total_cohorts() <= MAX_COHORTS);
        assert!(engine.has_role(Role::DefaultAdmin, &account(0)));
    }
});

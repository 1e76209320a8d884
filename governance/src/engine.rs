//! Governance engine: the single owner of cohort, proposal and tally state.
//!
//! Every operation takes `&mut self` (or `&self` for reads), so calls are
//! serialized by construction. Each mutating operation evaluates all of its
//! checks before its first write: a returned error means nothing changed.

use crate::cohort::{Cohort, CohortRegistry};
use crate::config::GovernanceConfig;
use crate::error::GovernanceError;
use crate::event::{EventLog, GovernanceEvent};
use crate::membership;
use crate::proposal::{Proposal, ProposalBook, ProposalPhase};
use crate::quorum::{majority_threshold, QuorumOutcome, QuorumTally};
use cohort_access::{require_role, AccessControl, Role, RoleTable};
use cohort_types::{Address, CohortId, Digest, ProposalId, Timestamp};
use cohort_utils::format_duration;
use tracing::{debug, info};

/// The cohort governance engine.
///
/// `A` is the injected role capability; [`RoleTable`] is the in-memory default.
pub struct GovernanceEngine<A = RoleTable> {
    roles: A,
    /// Token contract reference, used only to validate admin addresses.
    token_contract: Option<Address>,
    cohorts: CohortRegistry,
    proposals: ProposalBook,
    /// candidate → cohorts voting to make them global admin.
    default_admin_votes: QuorumTally<Address>,
    /// (target cohort, candidate) → cohorts voting for the replacement.
    cohort_admin_votes: QuorumTally<(CohortId, Address)>,
    events: EventLog,
}

impl GovernanceEngine<RoleTable> {
    /// Build an engine with an in-memory role table seeded from `config`.
    pub fn from_config(config: &GovernanceConfig) -> Result<Self, GovernanceError> {
        config.validate()?;
        let mut roles = RoleTable::new();
        roles.grant_role(Role::DefaultAdmin, &config.default_admin);
        roles.grant_role(Role::TechAdmin, &config.tech_admin());
        Ok(Self::new(roles, config.token_contract))
    }
}

impl<A: AccessControl> GovernanceEngine<A> {
    pub fn new(roles: A, token_contract: Option<Address>) -> Self {
        Self {
            roles,
            token_contract,
            cohorts: CohortRegistry::new(),
            proposals: ProposalBook::new(),
            default_admin_votes: QuorumTally::new(),
            cohort_admin_votes: QuorumTally::new(),
            events: EventLog::new(),
        }
    }

    // ── Roles ──────────────────────────────────────────────────────────

    pub fn roles(&self) -> &A {
        &self.roles
    }

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.roles.has_role(role, account)
    }

    /// Grant `role` to `account`. The caller must hold the role's admin role.
    ///
    /// Returns `false` (and emits nothing) if the account already held it.
    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: &Address,
    ) -> Result<bool, GovernanceError> {
        require_role(&self.roles, role.admin_role(), caller)?;
        let granted = self.roles.grant_role(role, account);
        if granted {
            info!(%role, %account, sender = %caller, "role granted");
            self.events.push(GovernanceEvent::RoleGranted {
                role,
                account: *account,
                sender: *caller,
            });
        }
        Ok(granted)
    }

    /// Revoke `role` from `account`. The caller must hold the role's admin role.
    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: &Address,
    ) -> Result<bool, GovernanceError> {
        require_role(&self.roles, role.admin_role(), caller)?;
        Ok(self.revoke(role, account, caller))
    }

    /// Drop one of the caller's own roles.
    pub fn renounce_role(&mut self, caller: &Address, role: Role) -> bool {
        self.revoke(role, caller, caller)
    }

    fn revoke(&mut self, role: Role, account: &Address, sender: &Address) -> bool {
        let revoked = self.roles.revoke_role(role, account);
        if revoked {
            info!(%role, %account, %sender, "role revoked");
            self.events.push(GovernanceEvent::RoleRevoked {
                role,
                account: *account,
                sender: *sender,
            });
        }
        revoked
    }

    // ── Cohort registry ────────────────────────────────────────────────

    /// Create cohort `id` administered by `admin`. Requires `TechAdmin`.
    pub fn setup_cohort(
        &mut self,
        caller: &Address,
        id: CohortId,
        name: &str,
        admin: Address,
    ) -> Result<(), GovernanceError> {
        require_role(&self.roles, Role::TechAdmin, caller)?;
        self.validate_admin_address(&admin)?;
        self.cohorts.setup(id, name, admin)?;

        info!(cohort = %id, name, %admin, total = self.cohorts.total(), "cohort created");
        self.events.push(GovernanceEvent::CohortCreated {
            cohort: id,
            name: name.to_string(),
            admin,
        });
        Ok(())
    }

    /// Replace the membership root of `cohort`. Caller must be its admin.
    pub fn set_membership_root(
        &mut self,
        caller: &Address,
        cohort: CohortId,
        root: Digest,
    ) -> Result<(), GovernanceError> {
        self.cohorts.require_admin(cohort, caller)?;
        self.cohorts.set_membership_root(cohort, root)?;

        info!(%cohort, %root, "membership root set");
        self.events
            .push(GovernanceEvent::MembershipRootSet { cohort, root });
        Ok(())
    }

    pub fn total_cohorts(&self) -> usize {
        self.cohorts.total()
    }

    pub fn cohort(&self, id: CohortId) -> Option<&Cohort> {
        self.cohorts.get(id)
    }

    pub fn cohorts(&self) -> &CohortRegistry {
        &self.cohorts
    }

    /// Whether `proof` places `address` in `cohort`'s membership tree.
    pub fn is_member(&self, address: &Address, cohort: CohortId, proof: &[Digest]) -> bool {
        membership::is_member(&self.cohorts, address, cohort, proof)
    }

    // ── Proposals ──────────────────────────────────────────────────────

    /// Open a proposal scoped to `cohort`. Caller must be its current admin.
    pub fn make_proposal(
        &mut self,
        caller: &Address,
        cohort: CohortId,
        objective: &str,
        timeframe_secs: u64,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        self.cohorts.require_admin(cohort, caller)?;
        let proposal = self.proposals.open(cohort, objective, timeframe_secs, now)?;
        let (id, deadline) = (proposal.id, proposal.deadline);

        info!(
            proposal = %id,
            %cohort,
            window = %format_duration(timeframe_secs),
            %deadline,
            "proposal created"
        );
        self.events.push(GovernanceEvent::ProposalCreated {
            proposal: id,
            cohort,
            objective: objective.to_string(),
            deadline,
        });
        Ok(id)
    }

    /// Vote yes on `proposal` on behalf of `voter`. Caller must be its admin.
    ///
    /// Returns `false` if `voter` had already voted; the tally is unchanged.
    pub fn vote(
        &mut self,
        caller: &Address,
        proposal: ProposalId,
        voter: CohortId,
        now: Timestamp,
    ) -> Result<bool, GovernanceError> {
        self.proposals.require_open(proposal, now)?;
        self.cohorts.require_admin(voter, caller)?;

        if !self.proposals.record_vote(proposal, voter)? {
            debug!(%proposal, cohort = %voter, "repeat vote ignored");
            return Ok(false);
        }
        let yes_count = self
            .proposals
            .get(proposal)
            .map_or(0, |p| p.yes_count);

        info!(%proposal, cohort = %voter, yes_count, "vote cast");
        self.events.push(GovernanceEvent::VoteCast {
            proposal,
            cohort: voter,
            yes_count,
        });
        Ok(true)
    }

    /// Yes count of a closed proposal. Callable by anyone.
    pub fn result_of_proposal(
        &self,
        proposal: ProposalId,
        now: Timestamp,
    ) -> Result<u32, GovernanceError> {
        self.proposals.result(proposal, now)
    }

    pub fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    pub fn proposal_phase(&self, id: ProposalId, now: Timestamp) -> ProposalPhase {
        self.proposals.phase(id, now)
    }

    pub fn has_voted(&self, proposal: ProposalId, cohort: CohortId) -> bool {
        self.proposals.has_voted(proposal, cohort)
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    // ── Admin quorum ───────────────────────────────────────────────────

    /// Votes currently needed to execute an admin change.
    pub fn threshold(&self) -> usize {
        majority_threshold(self.cohorts.total())
    }

    /// Vote, as the admin of `voter`, to make `candidate` a global admin.
    ///
    /// On reaching the threshold the candidate is granted `DefaultAdmin` and
    /// every vote for them is wiped.
    pub fn change_default_admin(
        &mut self,
        caller: &Address,
        candidate: Address,
        voter: CohortId,
    ) -> Result<QuorumOutcome, GovernanceError> {
        self.cohorts.require_admin(voter, caller)?;
        if candidate.is_zero() {
            return Err(GovernanceError::InvalidAddress(
                "candidate must not be the zero address".to_string(),
            ));
        }

        let newly_cast = self.default_admin_votes.cast(candidate, voter);
        let votes = self.default_admin_votes.count(&candidate);
        let threshold = self.threshold();
        if votes < threshold {
            debug!(%candidate, cohort = %voter, votes, threshold, newly_cast, "default admin vote pending");
            return Ok(QuorumOutcome::Pending {
                votes,
                threshold,
                newly_cast,
            });
        }

        self.roles.grant_role(Role::DefaultAdmin, &candidate);
        self.default_admin_votes.clear(&candidate);

        info!(%candidate, votes, threshold, "default admin changed by quorum");
        self.events
            .push(GovernanceEvent::DefaultAdminChanged { candidate, votes });
        Ok(QuorumOutcome::Executed { votes })
    }

    /// Vote, as the admin of `voter`, to make `candidate` the admin of `target`.
    ///
    /// The target cohort cannot vote on its own replacement.
    pub fn change_cohort_admin(
        &mut self,
        caller: &Address,
        candidate: Address,
        target: CohortId,
        voter: CohortId,
    ) -> Result<QuorumOutcome, GovernanceError> {
        self.cohorts.require_admin(voter, caller)?;
        if voter == target {
            return Err(GovernanceError::SelfVoteForbidden(target));
        }
        if !self.cohorts.exists(target) {
            return Err(GovernanceError::CohortNotFound(target));
        }
        self.validate_admin_address(&candidate)?;

        let key = (target, candidate);
        let newly_cast = self.cohort_admin_votes.cast(key, voter);
        let votes = self.cohort_admin_votes.count(&key);
        let threshold = self.threshold();
        if votes < threshold {
            debug!(cohort = %target, %candidate, voter = %voter, votes, threshold, newly_cast, "cohort admin vote pending");
            return Ok(QuorumOutcome::Pending {
                votes,
                threshold,
                newly_cast,
            });
        }

        let previous = self.cohorts.replace_admin(target, candidate)?;
        self.cohort_admin_votes.clear(&key);

        info!(cohort = %target, %previous, %candidate, votes, threshold, "cohort admin changed by quorum");
        self.events.push(GovernanceEvent::CohortAdminChanged {
            cohort: target,
            previous,
            candidate,
            votes,
        });
        Ok(QuorumOutcome::Executed { votes })
    }

    /// Whether `voter` has an outstanding vote for `candidate` as global admin.
    pub fn default_admin_vote(&self, candidate: &Address, voter: CohortId) -> bool {
        self.default_admin_votes.has_voted(candidate, voter)
    }

    pub fn default_admin_votes(&self, candidate: &Address) -> usize {
        self.default_admin_votes.count(candidate)
    }

    /// Whether `voter` has an outstanding vote for `candidate` to administer `target`.
    pub fn cohort_admin_vote(&self, target: CohortId, candidate: &Address, voter: CohortId) -> bool {
        self.cohort_admin_votes.has_voted(&(target, *candidate), voter)
    }

    pub fn cohort_admin_votes(&self, target: CohortId, candidate: &Address) -> usize {
        self.cohort_admin_votes.count(&(target, *candidate))
    }

    /// Outstanding (default-admin, cohort-admin) rounds that have not executed.
    pub fn open_quorum_rounds(&self) -> (usize, usize) {
        (
            self.default_admin_votes.open_rounds(),
            self.cohort_admin_votes.open_rounds(),
        )
    }

    // ── Events ─────────────────────────────────────────────────────────

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GovernanceEvent> {
        self.events.drain()
    }

    /// A cohort admin must be a real account and not the token contract.
    fn validate_admin_address(&self, admin: &Address) -> Result<(), GovernanceError> {
        if admin.is_zero() {
            return Err(GovernanceError::InvalidAddress(
                "admin must not be the zero address".to_string(),
            ));
        }
        if self.token_contract.as_ref() == Some(admin) {
            return Err(GovernanceError::InvalidAddress(format!(
                "admin {admin} is the token contract"
            )));
        }
        Ok(())
    }
}

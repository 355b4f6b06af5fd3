//! Rounds and their per-round state: proposals and participants.

use plenum_types::{MemberAddress, SessionPhase};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifies a round. Ids are allocated sequentially from 0 and are the
/// position of the round in the engine's append-only round list.
pub type RoundId = u64;

/// Text of the placeholder proposal seeded at index 0 of every round when
/// proposal submission opens. It is not a real option: it starts with zero
/// votes and wins only if no real proposal received any vote.
pub const PLACEHOLDER_PROPOSAL_TEXT: &str = "<placeholder>";

/// One votable option within a round, identified by its index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// The submitted text.
    pub text: String,
    /// Number of ballots cast for this proposal. Only ever increments,
    /// and never after the round is tallied.
    pub votes: u32,
}

impl Proposal {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            votes: 0,
        }
    }

    /// The placeholder seeded at index 0 when submission opens.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_PROPOSAL_TEXT)
    }
}

/// Admission and voting status of one member within one round.
///
/// The default value is the never-admitted record; lookups for unknown
/// members return it rather than failing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Whether the authority admitted this member into the round.
    pub admitted: bool,
    /// Whether the member has cast their ballot.
    pub has_voted: bool,
    /// The proposal index the member voted for. Meaningful only when
    /// `has_voted` is true; fixed once set.
    pub ballot: u32,
}

/// One complete, isolated instance of the admission → proposal → vote →
/// tally workflow.
///
/// Rounds are never deleted; participant and proposal state from one round
/// is never visible in another.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    /// Human-readable name, `"Session {ordinal}"` when none was given.
    pub name: String,
    /// Current workflow phase. Only ever advances via `SessionPhase::next`.
    pub phase: SessionPhase,
    /// Ordered proposal sequence. Index 0 is the placeholder once the round
    /// has reached `ProposalSubmissionOpen`.
    pub proposals: Vec<Proposal>,
    /// Index of the winning proposal. `Some` only once the round is tallied.
    pub winner: Option<u32>,
    /// Per-member admission and voting status, keyed by address.
    pub participants: HashMap<MemberAddress, Participant>,
    /// Cached count of ballots cast, equal to the number of participants
    /// with `has_voted` set. Maintained incrementally on every vote.
    pub ballots_cast: u32,
}

impl Round {
    /// Create a round in the `AdmittingParticipants` phase.
    ///
    /// An empty or absent name falls back to `"Session {ordinal}"`, where
    /// the ordinal is `id + 1`.
    pub fn new(id: RoundId, name: Option<&str>) -> Self {
        let name = match name {
            Some(given) if !given.is_empty() => given.to_string(),
            _ => format!("Session {}", id + 1),
        };
        Self {
            id,
            name,
            phase: SessionPhase::AdmittingParticipants,
            proposals: Vec::new(),
            winner: None,
            participants: HashMap::new(),
            ballots_cast: 0,
        }
    }

    /// Admission and voting status for a member, the default record if the
    /// member was never admitted to this round.
    pub fn participant(&self, member: &MemberAddress) -> Participant {
        self.participants.get(member).copied().unwrap_or_default()
    }

    /// Whether a member is an admitted participant of this round.
    pub fn is_participant(&self, member: &MemberAddress) -> bool {
        self.participants
            .get(member)
            .map(|p| p.admitted)
            .unwrap_or(false)
    }

    /// Number of members admitted to this round.
    pub fn admitted_count(&self) -> usize {
        self.participants.len()
    }

    /// Index of the proposal with the most votes, ties resolved to the
    /// earliest index. `None` only while the round has no proposals (before
    /// submission opened).
    ///
    /// Single linear pass in index order; a proposal displaces the running
    /// leader only when its votes strictly exceed the leader's.
    pub fn leading_proposal(&self) -> Option<u32> {
        let first = self.proposals.first()?;
        let mut leader = 0u32;
        let mut leader_votes = first.votes;
        for (index, proposal) in self.proposals.iter().enumerate().skip(1) {
            if proposal.votes > leader_votes {
                leader = index as u32;
                leader_votes = proposal.votes;
            }
        }
        Some(leader)
    }
}

/// Read-only projection of the active round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundView {
    pub id: RoundId,
    pub name: String,
    pub phase: SessionPhase,
    pub proposal_count: usize,
    pub winner: Option<u32>,
}

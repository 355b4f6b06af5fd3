//! Core session engine — drives rounds through the 6-phase workflow.
//!
//! The engine owns the whole store: the append-only round list, the active
//! round pointer, and the authority address. Every mutating operation takes
//! the current caller's address, checks authorization and the active
//! round's phase, and either commits its full effect or returns an error
//! with no state change. The hosting environment serializes calls; `&mut
//! self` on every mutation makes partial visibility impossible.

use crate::error::SessionError;
use crate::events::{EventBus, SessionEvent};
use crate::round::{Participant, Proposal, Round, RoundId, RoundView};
use plenum_types::{MemberAddress, SessionParams, SessionPhase};

/// The session engine — admits participants, collects proposals and
/// ballots, and tallies each round.
pub struct SessionEngine {
    /// The single address allowed to admit participants and drive phase
    /// transitions. Replaced only via [`set_authority`](Self::set_authority).
    authority: MemberAddress,
    params: SessionParams,
    /// All rounds ever created. A round's id is its position here.
    rounds: Vec<Round>,
    /// Position of the active round in `rounds`. Always valid.
    active: usize,
    events: EventBus,
}

impl SessionEngine {
    /// Create an engine with the default parameters.
    ///
    /// Round 0, named `"Session 1"`, is created in the
    /// `AdmittingParticipants` phase and made active.
    pub fn new(authority: MemberAddress) -> Self {
        Self::with_params(authority, SessionParams::default())
    }

    /// Create an engine with explicit parameters.
    pub fn with_params(authority: MemberAddress, params: SessionParams) -> Self {
        let first = Round::new(0, None);
        tracing::info!(round = first.id, name = %first.name, "round created");
        let mut engine = Self {
            authority,
            params,
            rounds: vec![first],
            active: 0,
            events: EventBus::new(),
        };
        engine.emit_round_created(0);
        engine
    }

    /// Register an observer for session events.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&SessionEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Round registry ───────────────────────────────────────────────────

    /// Create the next round and make it active.
    ///
    /// Requires the active round to be tallied. An empty or absent name
    /// falls back to `"Session {ordinal}"`.
    pub fn create_next_round(
        &mut self,
        caller: &MemberAddress,
        name: Option<&str>,
    ) -> Result<RoundId, SessionError> {
        self.ensure_authority(caller)?;
        if !self.active_round().phase.is_terminal() {
            return Err(SessionError::RoundNotFinished);
        }
        let id = self.rounds.len() as RoundId;
        let round = Round::new(id, name);
        tracing::info!(round = id, name = %round.name, "round created");
        self.rounds.push(round);
        self.active = self.rounds.len() - 1;
        self.emit_round_created(self.active);
        Ok(id)
    }

    /// Read-only projection of the active round.
    pub fn current_round_view(&self) -> RoundView {
        let round = self.active_round();
        RoundView {
            id: round.id,
            name: round.name.clone(),
            phase: round.phase,
            proposal_count: round.proposals.len(),
            winner: round.winner,
        }
    }

    /// The active round.
    pub fn active_round(&self) -> &Round {
        &self.rounds[self.active]
    }

    /// Id of the active round.
    pub fn active_round_id(&self) -> RoundId {
        self.active_round().id
    }

    /// Any round ever created, by id.
    pub fn round(&self, id: RoundId) -> Option<&Round> {
        self.rounds.get(id as usize)
    }

    /// Total number of rounds created so far.
    pub fn round_count(&self) -> u64 {
        self.rounds.len() as u64
    }

    /// Current phase of the active round.
    pub fn current_phase(&self) -> SessionPhase {
        self.active_round().phase
    }

    /// Winning proposal index of the active round, `Some` once tallied.
    pub fn winning_proposal_index(&self) -> Option<u32> {
        self.active_round().winner
    }

    /// The current authority address.
    pub fn authority(&self) -> &MemberAddress {
        &self.authority
    }

    /// Replace the authority address.
    ///
    /// Invoked by the hosting environment's ownership-transfer mechanism,
    /// which owns the policy for who may do this; the engine itself does
    /// not gate it.
    pub fn set_authority(&mut self, new_authority: MemberAddress) {
        tracing::info!(authority = %new_authority, "authority transferred");
        self.authority = new_authority;
    }

    // ── Workflow state machine ───────────────────────────────────────────

    /// Close admission and open proposal submission.
    ///
    /// Seeds the placeholder proposal at index 0.
    pub fn open_proposal_submission(
        &mut self,
        caller: &MemberAddress,
    ) -> Result<(), SessionError> {
        self.transition(
            caller,
            SessionPhase::AdmittingParticipants,
            SessionPhase::ProposalSubmissionOpen,
            SessionError::AdmissionNotOpen,
        )?;
        self.rounds[self.active].proposals.push(Proposal::placeholder());
        Ok(())
    }

    /// Freeze the proposal sequence.
    pub fn close_proposal_submission(
        &mut self,
        caller: &MemberAddress,
    ) -> Result<(), SessionError> {
        self.transition(
            caller,
            SessionPhase::ProposalSubmissionOpen,
            SessionPhase::ProposalSubmissionClosed,
            SessionError::ProposalSubmissionNotOpen,
        )
    }

    /// Open the ballot.
    pub fn open_voting(&mut self, caller: &MemberAddress) -> Result<(), SessionError> {
        self.transition(
            caller,
            SessionPhase::ProposalSubmissionClosed,
            SessionPhase::VotingOpen,
            SessionError::ProposalSubmissionNotClosed,
        )
    }

    /// Close the ballot.
    pub fn close_voting(&mut self, caller: &MemberAddress) -> Result<(), SessionError> {
        self.transition(
            caller,
            SessionPhase::VotingOpen,
            SessionPhase::VotingClosed,
            SessionError::VotingNotOpen,
        )
    }

    /// Compute the winner and finish the round.
    ///
    /// The winner is the proposal with the most votes, ties resolved to the
    /// earliest index. The placeholder at index 0 wins when no real
    /// proposal received any vote.
    pub fn tally(&mut self, caller: &MemberAddress) -> Result<(), SessionError> {
        self.transition(
            caller,
            SessionPhase::VotingClosed,
            SessionPhase::Tallied,
            SessionError::VotingNotClosed,
        )?;
        let round = &mut self.rounds[self.active];
        let winner = round.leading_proposal();
        round.winner = winner;
        tracing::info!(round = round.id, winner = ?winner, ballots = round.ballots_cast, "round tallied");
        Ok(())
    }

    // ── Participant registry ─────────────────────────────────────────────

    /// Admit a member into the active round.
    pub fn admit(
        &mut self,
        caller: &MemberAddress,
        member: MemberAddress,
    ) -> Result<(), SessionError> {
        self.ensure_authority(caller)?;
        let round = &mut self.rounds[self.active];
        if round.phase != SessionPhase::AdmittingParticipants {
            return Err(SessionError::AdmissionNotOpen);
        }
        if round.is_participant(&member) {
            return Err(SessionError::AlreadyAdmitted);
        }
        round.participants.insert(
            member.clone(),
            Participant {
                admitted: true,
                has_voted: false,
                ballot: 0,
            },
        );
        let id = round.id;
        tracing::debug!(round = id, member = %member, "participant admitted");
        self.events
            .emit(&SessionEvent::ParticipantAdmitted { round: id, member });
        Ok(())
    }

    /// Admission and voting status of a member in the active round.
    ///
    /// Returns the default record for members never admitted; never fails.
    pub fn participant(&self, member: &MemberAddress) -> Participant {
        self.active_round().participant(member)
    }

    // ── Proposal registry ────────────────────────────────────────────────

    /// Submit a proposal to the active round. Returns its index.
    pub fn submit(
        &mut self,
        caller: &MemberAddress,
        text: &str,
    ) -> Result<u32, SessionError> {
        let max_proposals = self.params.max_proposals;
        let max_text_len = self.params.max_proposal_text_len;
        let round = &mut self.rounds[self.active];
        if !round.is_participant(caller) {
            return Err(SessionError::NotAParticipant);
        }
        if round.phase != SessionPhase::ProposalSubmissionOpen {
            return Err(SessionError::ProposalSubmissionNotOpen);
        }
        if text.is_empty() {
            return Err(SessionError::EmptyProposalText);
        }
        if round.proposals.len() >= max_proposals {
            return Err(SessionError::TooManyProposals { max: max_proposals });
        }
        if text.len() > max_text_len {
            return Err(SessionError::ProposalTextTooLong {
                len: text.len(),
                max: max_text_len,
            });
        }
        let index = round.proposals.len() as u32;
        round.proposals.push(Proposal::new(text));
        let id = round.id;
        tracing::debug!(round = id, index, "proposal submitted");
        self.events
            .emit(&SessionEvent::ProposalSubmitted { round: id, index });
        Ok(index)
    }

    /// A proposal of the active round, by index.
    pub fn proposal(&self, index: u32) -> Result<&Proposal, SessionError> {
        self.active_round()
            .proposals
            .get(index as usize)
            .ok_or(SessionError::ProposalNotFound(index))
    }

    // ── Voting ───────────────────────────────────────────────────────────

    /// Cast the caller's single ballot for a proposal of the active round.
    ///
    /// Irreversible: the recorded ballot is fixed and the target proposal's
    /// vote count increments by exactly 1. This is the sole point where the
    /// sum-of-votes = ballots-cast invariant is established.
    pub fn vote(&mut self, caller: &MemberAddress, index: u32) -> Result<(), SessionError> {
        let round = &mut self.rounds[self.active];
        if !round.is_participant(caller) {
            return Err(SessionError::NotAParticipant);
        }
        if round.phase != SessionPhase::VotingOpen {
            return Err(SessionError::VotingNotOpen);
        }
        if round.participant(caller).has_voted {
            return Err(SessionError::AlreadyVoted);
        }
        if (index as usize) >= round.proposals.len() {
            return Err(SessionError::ProposalNotFound(index));
        }
        if let Some(record) = round.participants.get_mut(caller) {
            record.has_voted = true;
            record.ballot = index;
        }
        round.proposals[index as usize].votes += 1;
        round.ballots_cast += 1;
        let id = round.id;
        tracing::debug!(round = id, member = %caller, index, "ballot cast");
        self.events.emit(&SessionEvent::VoteCast {
            round: id,
            member: caller.clone(),
            index,
        });
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn ensure_authority(&self, caller: &MemberAddress) -> Result<(), SessionError> {
        if *caller != self.authority {
            return Err(SessionError::Unauthorized {
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    /// Advance the active round from `from` to `to`.
    ///
    /// All five public transitions funnel through here: authority check,
    /// exact-predecessor check, then the phase write and the notification.
    /// `to` must be `from.next()`.
    fn transition(
        &mut self,
        caller: &MemberAddress,
        from: SessionPhase,
        to: SessionPhase,
        wrong_phase: SessionError,
    ) -> Result<(), SessionError> {
        self.ensure_authority(caller)?;
        let round = &mut self.rounds[self.active];
        if round.phase != from {
            return Err(wrong_phase);
        }
        debug_assert_eq!(from.next(), Some(to));
        round.phase = to;
        let id = round.id;
        tracing::info!(round = id, from = %from, to = %to, "phase advanced");
        self.events
            .emit(&SessionEvent::PhaseChanged { round: id, from, to });
        Ok(())
    }

    fn emit_round_created(&self, position: usize) {
        let round = &self.rounds[position];
        self.events.emit(&SessionEvent::RoundCreated {
            id: round.id,
            name: round.name.clone(),
        });
    }
}

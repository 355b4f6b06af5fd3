use proptest::prelude::*;

use plenum_session::{SessionEngine, SessionError};
use plenum_types::{MemberAddress, SessionPhase};

fn authority() -> MemberAddress {
    MemberAddress::new("plnm_authority")
}

fn member(i: usize) -> MemberAddress {
    MemberAddress::new(format!("plnm_member{i}"))
}

/// Engine with `voters` members admitted and `proposal_count` real
/// proposals, voting open.
fn engine_at_voting(voters: usize, proposal_count: usize) -> SessionEngine {
    let auth = authority();
    let mut engine = SessionEngine::new(auth.clone());
    for i in 0..voters.max(1) {
        engine.admit(&auth, member(i)).unwrap();
    }
    engine.open_proposal_submission(&auth).unwrap();
    for p in 0..proposal_count {
        engine.submit(&member(0), &format!("option {p}")).unwrap();
    }
    engine.close_proposal_submission(&auth).unwrap();
    engine.open_voting(&auth).unwrap();
    engine
}

/// One attempted operation against the engine, possibly out of order.
#[derive(Clone, Debug)]
enum Op {
    Admit(u8),
    OpenSubmission,
    CloseSubmission,
    OpenVoting,
    CloseVoting,
    Tally,
    Submit(u8),
    Vote(u8, u32),
    NextRound,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..6).prop_map(Op::Admit),
        Just(Op::OpenSubmission),
        Just(Op::CloseSubmission),
        Just(Op::OpenVoting),
        Just(Op::CloseVoting),
        Just(Op::Tally),
        (0u8..6).prop_map(Op::Submit),
        ((0u8..6), (0u32..4)).prop_map(|(m, i)| Op::Vote(m, i)),
        Just(Op::NextRound),
    ]
}

proptest! {
    /// The sum of proposal vote counts always equals the number of ballots
    /// cast, after every successful vote.
    #[test]
    fn vote_counts_sum_to_ballots_cast(
        proposal_count in 1usize..8,
        ballots in proptest::collection::vec(proptest::option::of(0u32..12), 1..40),
    ) {
        let mut engine = engine_at_voting(ballots.len(), proposal_count);
        let mut expected = 0u32;

        for (i, ballot) in ballots.iter().enumerate() {
            let Some(index) = ballot else { continue };
            match engine.vote(&member(i), *index) {
                Ok(()) => expected += 1,
                Err(SessionError::ProposalNotFound(_)) => {}
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
            let round = engine.active_round();
            let sum: u32 = round.proposals.iter().map(|p| p.votes).sum();
            prop_assert_eq!(sum, round.ballots_cast);
        }

        let round = engine.active_round();
        prop_assert_eq!(round.ballots_cast, expected);
        let voted = round.participants.values().filter(|p| p.has_voted).count();
        prop_assert_eq!(voted as u32, expected);
    }

    /// The winner is always the lowest index among the proposals with the
    /// maximal vote count, the placeholder at index 0 included.
    #[test]
    fn winner_is_lowest_index_with_max_votes(
        votes_per_proposal in proptest::collection::vec(0u32..5, 1..8),
    ) {
        let auth = authority();
        let total: u32 = votes_per_proposal.iter().sum();
        let mut engine = engine_at_voting(total as usize, votes_per_proposal.len());

        let mut voter = 0usize;
        for (i, &count) in votes_per_proposal.iter().enumerate() {
            for _ in 0..count {
                engine.vote(&member(voter), (i + 1) as u32).unwrap();
                voter += 1;
            }
        }
        engine.close_voting(&auth).unwrap();
        engine.tally(&auth).unwrap();

        // Reference scan: index 0 holds the voteless placeholder.
        let mut counts = vec![0u32];
        counts.extend_from_slice(&votes_per_proposal);
        let mut expected = 0usize;
        let mut max_votes = counts[0];
        for (i, &v) in counts.iter().enumerate().skip(1) {
            if v > max_votes {
                expected = i;
                max_votes = v;
            }
        }

        prop_assert_eq!(engine.winning_proposal_index(), Some(expected as u32));
    }

    /// Under any interleaving of attempted operations, the observed phase
    /// sequence of every round moves strictly along the transition table,
    /// and round ids only ever step forward from a tallied round.
    #[test]
    fn phases_advance_monotonically_without_skips(
        ops in proptest::collection::vec(op_strategy(), 1..120),
    ) {
        let auth = authority();
        let mut engine = SessionEngine::new(auth.clone());
        let mut last = (engine.active_round_id(), engine.current_phase());
        prop_assert_eq!(last, (0, SessionPhase::AdmittingParticipants));

        for op in ops {
            match op {
                Op::Admit(m) => { let _ = engine.admit(&auth, member(m as usize)); }
                Op::OpenSubmission => { let _ = engine.open_proposal_submission(&auth); }
                Op::CloseSubmission => { let _ = engine.close_proposal_submission(&auth); }
                Op::OpenVoting => { let _ = engine.open_voting(&auth); }
                Op::CloseVoting => { let _ = engine.close_voting(&auth); }
                Op::Tally => { let _ = engine.tally(&auth); }
                Op::Submit(m) => { let _ = engine.submit(&member(m as usize), "option"); }
                Op::Vote(m, i) => { let _ = engine.vote(&member(m as usize), i); }
                Op::NextRound => { let _ = engine.create_next_round(&auth, None); }
            }

            let observed = (engine.active_round_id(), engine.current_phase());
            if observed.0 == last.0 {
                prop_assert!(
                    observed.1 == last.1 || last.1.next() == Some(observed.1),
                    "phase jumped from {} to {}",
                    last.1,
                    observed.1
                );
            } else {
                prop_assert_eq!(observed.0, last.0 + 1, "round id must step by one");
                prop_assert!(last.1.is_terminal(), "previous round must be tallied");
                prop_assert_eq!(observed.1, SessionPhase::AdmittingParticipants);
            }
            last = observed;
        }
    }
}

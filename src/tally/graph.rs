use std::collections::HashMap;

use tracing::debug;

use crate::vote::{Vote, VoterId};

/// Index of a candidate in the arena owned by the counter. The arena is
/// populated once during admission and never reallocated afterwards, so
/// ids stay valid for the counter's whole lifetime.
pub(crate) type CandidateId = usize;

pub(crate) struct Candidate {
    /// The ballot this candidate was admitted from.
    pub(crate) vote: Vote,
    /// Resolved delegation edge. Unset on self-votes and unknown targets.
    pub(crate) vote_for: Option<CandidateId>,
    /// Transitive vote total accumulated by the delegation pass.
    pub(crate) total_indirect_votes: u64,
    /// Candidates whose delegation edge resolved to this one, in arena
    /// order.
    pub(crate) voted_for_me: Vec<CandidateId>,
    pub(crate) willing_candidate: bool,
    /// Link in the descending-by-total chain over willing candidates.
    pub(crate) next_by_total: Option<CandidateId>,
}

/// Admits votes into the arena and resolves delegation edges.
///
/// Admission runs as two stable passes, willing candidates first, so the
/// arena starts with a willing prefix whose length is the returned count.
/// A vote whose id was already admitted is dropped. Edges resolve after
/// both passes: a self-vote or an id nobody was admitted under leaves the
/// edge unset.
pub(crate) fn build_candidates(votes: Vec<Vote>, verbose: bool) -> (Vec<Candidate>, usize) {
    let mut slot_by_id: HashMap<VoterId, CandidateId> = HashMap::new();
    let mut candidates: Vec<Candidate> = Vec::with_capacity(votes.len());
    let mut total_willing = 0;
    for willing in [true, false] {
        for vote in &votes {
            if vote.willing_candidate != willing {
                continue;
            }
            if slot_by_id.contains_key(&vote.voter_id) {
                if verbose {
                    debug!(voter = %vote.voter_id, "duplicate voter, vote dropped");
                }
                continue;
            }
            if willing {
                total_willing += 1;
            }
            slot_by_id.insert(vote.voter_id.clone(), candidates.len());
            candidates.push(Candidate {
                total_indirect_votes: vote.number_of_votes,
                vote: vote.clone(),
                vote_for: None,
                voted_for_me: Vec::new(),
                willing_candidate: willing,
                next_by_total: None,
            });
        }
    }
    for slot in 0..candidates.len() {
        let vote = &candidates[slot].vote;
        if vote.vote_for == vote.voter_id {
            if verbose {
                debug!(voter = %vote.voter_id, "voted for themselves");
            }
            continue;
        }
        let target = slot_by_id.get(&vote.vote_for).copied();
        if verbose {
            match target {
                Some(target) => {
                    debug!(
                        voter = %vote.voter_id,
                        delegate = %candidates[target].vote.voter_id,
                        "delegation edge resolved"
                    );
                }
                None => {
                    debug!(
                        voter = %vote.voter_id,
                        target = %vote.vote_for,
                        "voted for an unknown candidate"
                    );
                }
            }
        }
        candidates[slot].vote_for = target;
    }
    (candidates, total_willing)
}

/// Walks every candidate's delegation chain, crediting the candidate's own
/// weight to each node reached and recording the back-reference on its
/// direct delegate.
///
/// Each walk keeps its own path and stops on re-entry, so circular
/// delegation credits every ring member at most once and a source is never
/// credited by its own walk. Totals wrap on overflow, as peer
/// implementations of this count do.
pub(crate) fn delegate_votes(candidates: &mut [Candidate], verbose: bool) {
    let mut path: Vec<CandidateId> = Vec::new();
    for source in 0..candidates.len() {
        let weight = candidates[source].vote.number_of_votes;
        if verbose {
            debug!(voter = %candidates[source].vote.voter_id, weight, "delegating");
        }
        match candidates[source].vote_for {
            Some(target) => candidates[target].voted_for_me.push(source),
            None if verbose => {
                debug!(voter = %candidates[source].vote.voter_id, "did not vote for anyone");
            }
            None => {}
        }
        path.clear();
        path.push(source);
        let mut next = candidates[source].vote_for;
        while let Some(current) = next {
            if path.contains(&current) {
                if verbose {
                    debug!(
                        voter = %candidates[current].vote.voter_id,
                        "delegation ring reached, walk stopped"
                    );
                }
                break;
            }
            path.push(current);
            candidates[current].total_indirect_votes =
                candidates[current].total_indirect_votes.wrapping_add(weight);
            if verbose {
                debug!(
                    voter = %candidates[current].vote.voter_id,
                    total = candidates[current].total_indirect_votes,
                    "credited"
                );
            }
            next = candidates[current].vote_for;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus;
    use proptest::prelude::*;
    use test_strategy::proptest;

    fn vote(voter_id: &str, vote_for: &str, number_of_votes: u64, willing: bool) -> Vote {
        Vote {
            voter_id: voter_id.into(),
            vote_for: vote_for.into(),
            number_of_votes,
            willing_candidate: willing,
        }
    }

    fn build(votes: Vec<Vote>) -> (Vec<Candidate>, usize) {
        build_candidates(votes, false)
    }

    #[test]
    fn willing_candidates_form_the_arena_prefix() {
        let (candidates, total_willing) = build(vec![
            vote("a", "", 1, false),
            vote("b", "", 1, true),
            vote("c", "", 1, false),
            vote("d", "", 1, true),
        ]);
        assert_eq!(total_willing, 2);
        assert!(candidates[..2].iter().all(|c| c.willing_candidate));
        assert!(candidates[2..].iter().all(|c| !c.willing_candidate));
        // both passes are stable over the input order
        assert_eq!(candidates[0].vote.voter_id, "b");
        assert_eq!(candidates[1].vote.voter_id, "d");
        assert_eq!(candidates[2].vote.voter_id, "a");
        assert_eq!(candidates[3].vote.voter_id, "c");
    }

    #[test]
    fn duplicate_voters_keep_the_first_admitted_ballot() {
        let (candidates, total_willing) = build(vec![
            vote("a", "", 1, true),
            vote("a", "", 100, true),
            vote("a", "", 7, false),
        ]);
        assert_eq!(candidates.len(), 1);
        assert_eq!(total_willing, 1);
        assert_eq!(candidates[0].vote.number_of_votes, 1);
    }

    #[test]
    fn a_willing_duplicate_outranks_an_earlier_unwilling_ballot() {
        // the willing pass runs first, so the willing ballot is the one
        // admitted even though the unwilling one comes earlier
        let (candidates, total_willing) =
            build(vec![vote("a", "", 7, false), vote("a", "", 3, true)]);
        assert_eq!(candidates.len(), 1);
        assert_eq!(total_willing, 1);
        assert!(candidates[0].willing_candidate);
        assert_eq!(candidates[0].vote.number_of_votes, 3);
    }

    #[test]
    fn self_votes_and_unknown_targets_leave_the_edge_unset() {
        let (candidates, _) = build(vec![
            vote("a", "a", 1, true),
            vote("b", "nobody", 1, true),
            vote("c", "a", 1, true),
        ]);
        assert_eq!(candidates[0].vote_for, None);
        assert_eq!(candidates[1].vote_for, None);
        assert_eq!(candidates[2].vote_for, Some(0));
    }

    #[test]
    fn votes_for_a_duplicate_rejected_id_resolve_to_the_admitted_ballot() {
        let (candidates, _) = build(vec![
            vote("a", "", 1, true),
            vote("a", "", 9, false),
            vote("b", "a", 1, false),
        ]);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].vote.voter_id, "b");
        assert_eq!(candidates[1].vote_for, Some(0));
    }

    #[test]
    fn the_empty_string_is_an_ordinary_identity() {
        let (candidates, _) = build(vec![vote("", "", 1, true), vote("b", "", 1, false)]);
        // "" voting for "" is a self-vote; "b" voting for "" resolves
        assert_eq!(candidates[0].vote_for, None);
        assert_eq!(candidates[1].vote_for, Some(0));
    }

    #[test]
    fn empty_input_builds_an_empty_arena() {
        let (candidates, total_willing) = build(Vec::new());
        assert!(candidates.is_empty());
        assert_eq!(total_willing, 0);
    }

    #[test]
    fn delegation_credits_every_node_down_the_chain() {
        let (mut candidates, _) = build(vec![
            vote("a", "b", 6, true),
            vote("b", "c", 3, true),
            vote("c", "", 2, true),
        ]);
        delegate_votes(&mut candidates, false);
        assert_eq!(candidates[0].total_indirect_votes, 6);
        assert_eq!(candidates[1].total_indirect_votes, 9);
        assert_eq!(candidates[2].total_indirect_votes, 11);
        assert_eq!(candidates[1].voted_for_me, vec![0]);
        assert_eq!(candidates[2].voted_for_me, vec![1]);
    }

    #[test]
    fn rings_are_credited_once_and_never_credit_the_source() {
        let (mut candidates, _) = build(vec![vote("a", "b", 10, true), vote("b", "a", 10, true)]);
        delegate_votes(&mut candidates, false);
        assert_eq!(candidates[0].total_indirect_votes, 20);
        assert_eq!(candidates[1].total_indirect_votes, 20);
    }

    #[test]
    fn totals_wrap_on_overflow() {
        let (mut candidates, _) = build(vec![
            vote("a", "c", u64::MAX, false),
            vote("b", "c", 3, false),
            vote("c", "", 0, true),
        ]);
        delegate_votes(&mut candidates, false);
        assert_eq!(candidates[0].total_indirect_votes, 2);
    }

    #[proptest]
    fn totals_dominate_first_party_weight(
        #[strategy(proptest::collection::vec(any::<u8>(), 0..256))] data: Vec<u8>,
    ) {
        let (mut candidates, _) = build_candidates(corpus::decode_votes(&data), false);
        delegate_votes(&mut candidates, false);
        for candidate in &candidates {
            prop_assert!(candidate.total_indirect_votes >= candidate.vote.number_of_votes);
        }
    }

    #[proptest]
    fn back_references_mirror_resolved_edges(
        #[strategy(proptest::collection::vec(any::<u8>(), 0..256))] data: Vec<u8>,
    ) {
        let (mut candidates, _) = build_candidates(corpus::decode_votes(&data), false);
        delegate_votes(&mut candidates, false);
        for (id, candidate) in candidates.iter().enumerate() {
            for &backer in &candidate.voted_for_me {
                prop_assert_eq!(candidates[backer].vote_for, Some(id));
            }
            if let Some(target) = candidate.vote_for {
                prop_assert!(candidates[target].voted_for_me.contains(&id));
            }
        }
    }
}

use super::graph::{Candidate, CandidateId};

/// Threads the `next_by_total` chain through the willing prefix of the
/// arena and returns its head: the willing candidate with the highest
/// transitive total, or `None` when nobody is willing.
///
/// The sort is stable and ascending; walking it while pointing each
/// element at the previously visited one leaves the chain descending.
pub(crate) fn rank_by_total(
    candidates: &mut [Candidate],
    total_willing: usize,
) -> Option<CandidateId> {
    let mut order: Vec<CandidateId> = (0..total_willing).collect();
    for &id in &order {
        assert!(
            candidates[id].willing_candidate,
            "non-willing candidate in the willing prefix"
        );
    }
    order.sort_by_key(|&id| candidates[id].total_indirect_votes);
    let mut last = None;
    for id in order {
        candidates[id].next_by_total = last;
        last = Some(id);
    }
    last
}

#[cfg(test)]
mod tests {
    use super::super::graph::{build_candidates, delegate_votes, Candidate};
    use super::*;
    use crate::vote::Vote;

    fn vote(voter_id: &str, vote_for: &str, number_of_votes: u64, willing: bool) -> Vote {
        Vote {
            voter_id: voter_id.into(),
            vote_for: vote_for.into(),
            number_of_votes,
            willing_candidate: willing,
        }
    }

    fn ranked_ids(votes: Vec<Vote>) -> Vec<String> {
        let (mut candidates, total_willing) = build_candidates(votes, false);
        delegate_votes(&mut candidates, false);
        let best = rank_by_total(&mut candidates, total_willing);
        let mut out = Vec::new();
        let mut next = best;
        while let Some(id) = next {
            out.push(candidates[id].vote.voter_id.clone());
            next = candidates[id].next_by_total;
        }
        out
    }

    #[test]
    fn chain_descends_over_exactly_the_willing_candidates() {
        let ids = ranked_ids(vec![
            vote("a", "", 3, true),
            vote("b", "", 9, true),
            vote("c", "", 5, true),
            vote("d", "b", 100, false),
        ]);
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn no_willing_candidates_yield_an_empty_chain() {
        assert!(ranked_ids(vec![vote("a", "b", 3, false), vote("b", "a", 3, false)]).is_empty());
    }

    #[test]
    #[should_panic(expected = "non-willing candidate in the willing prefix")]
    fn a_corrupt_willing_prefix_is_a_programmer_error() {
        let mut candidates = vec![Candidate {
            vote: vote("a", "", 1, false),
            vote_for: None,
            total_indirect_votes: 1,
            voted_for_me: Vec::new(),
            willing_candidate: false,
            next_by_total: None,
        }];
        rank_by_total(&mut candidates, 1);
    }
}

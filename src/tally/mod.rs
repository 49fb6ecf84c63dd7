//! The vote counter.
//!
//! Counting runs in five phases over an arena of candidate nodes: graph
//! construction and delegation-edge resolution, transitive delegation of
//! vote weight (with cycle cut-off), ranking of willing candidates into a
//! descending chain, analysis of the top-scoring ring, and resolution by
//! patron promotion and deterministic tie-break. Construction runs the
//! first three phases eagerly; [`VoteCounter::find_winner`] runs the rest
//! on the frozen graph.

mod graph;
mod patron;
mod ranking;
mod rings;
mod tie_break;

use tracing::debug;

use crate::vote::Vote;
use graph::{Candidate, CandidateId};

/// Tallies one election over an owned delegation graph.
pub struct VoteCounter {
    candidates: Vec<Candidate>,
    best: Option<CandidateId>,
    verbose: bool,
}

impl VoteCounter {
    /// Builds the delegation graph for `votes` and computes every
    /// candidate's transitive vote total. Duplicate voter ids beyond the
    /// first admitted one are dropped. With `verbose` set, a
    /// human-readable account of the count is emitted through `tracing`;
    /// its content is not part of the API and tests must not rely on it.
    pub fn new(votes: Vec<Vote>, verbose: bool) -> Self {
        let (mut candidates, total_willing) = graph::build_candidates(votes, verbose);
        graph::delegate_votes(&mut candidates, verbose);
        let best = ranking::rank_by_total(&mut candidates, total_willing);
        VoteCounter {
            candidates,
            best,
            verbose,
        }
    }

    /// The winning vote, or `None` when no willing candidate exists.
    /// Idempotent: the graph is never mutated past construction, so
    /// repeated queries agree.
    pub fn find_winner(&self) -> Option<&Vote> {
        let best = match self.best {
            Some(best) => best,
            None => {
                if self.verbose {
                    debug!("no willing candidates, no winner");
                }
                return None;
            }
        };
        if self.verbose {
            let mut next = Some(best);
            while let Some(id) = next {
                let candidate = &self.candidates[id];
                debug!(
                    voter = %candidate.vote.voter_id,
                    total = candidate.total_indirect_votes,
                    "ranked"
                );
                next = candidate.next_by_total;
            }
        }
        let tier = rings::top_tier(&self.candidates, best);
        let ring_count = rings::connected_rings(&self.candidates, &tier, self.verbose).len();
        let mut tentative = rings::best_of_ring(&self.candidates, &tier, self.verbose);
        if ring_count < 2 {
            tentative = patron::promote_single(&self.candidates, tentative, &tier, self.verbose);
        } else if self.verbose {
            debug!(ring_count, "split top tier, patron promotion skipped");
        }
        let winner = tie_break::break_tie(&self.candidates, &tentative, self.verbose)?;
        Some(&self.candidates[winner].vote)
    }

    /// Every willing candidate's vote, highest transitive total first.
    pub fn ranking(&self) -> impl Iterator<Item = &Vote> + '_ {
        std::iter::successors(self.best, move |&id| self.candidates[id].next_by_total)
            .map(move |id| &self.candidates[id].vote)
    }
}

use tracing::debug;

use super::graph::{Candidate, CandidateId};

/// Replaces a sole tentative winner with the strongest valid patron above
/// it, when one exists. Tied tentative winners pass through untouched.
pub(crate) fn promote_single(
    candidates: &[Candidate],
    tentative: Vec<CandidateId>,
    tier: &[CandidateId],
    verbose: bool,
) -> Vec<CandidateId> {
    if tentative.len() != 1 {
        return tentative;
    }
    let winner = tentative[0];
    vec![find_patron(candidates, winner, tier, verbose).unwrap_or(winner)]
}

/// Climbs the chain of patrons above `winner`: while the strongest outside
/// backer of the current node is a valid patron, it becomes the node to
/// climb from. The last valid patron found wins the climb.
///
/// The mark to beat is fixed at half the original winner's total for the
/// whole climb, so each accepted patron holds strictly more than that mark
/// and the climb is finite.
fn find_patron(
    candidates: &[Candidate],
    winner: CandidateId,
    tier: &[CandidateId],
    verbose: bool,
) -> Option<CandidateId> {
    let mut runner_up = runner_up(candidates, winner, tier);
    if verbose {
        debug!(
            voter = %candidates[winner].vote.voter_id,
            total = candidates[winner].total_indirect_votes,
            "tentative winner"
        );
    }
    let mut probe = potential_patron(candidates, winner, tier, verbose)?;
    let mut patron = None;
    loop {
        if runner_up == Some(probe) {
            runner_up = candidates[probe].next_by_total;
        }
        if !is_valid_patron(candidates, winner, probe, runner_up, verbose) {
            break;
        }
        patron = Some(probe);
        probe = match potential_patron(candidates, probe, tier, verbose) {
            Some(next) => next,
            None => break,
        };
    }
    patron
}

/// First candidate in the descending chain past `winner` that is not part
/// of the top tier.
fn runner_up(
    candidates: &[Candidate],
    winner: CandidateId,
    tier: &[CandidateId],
) -> Option<CandidateId> {
    let mut next = candidates[winner].next_by_total;
    while let Some(id) = next {
        if !tier.contains(&id) {
            return Some(id);
        }
        next = candidates[id].next_by_total;
    }
    None
}

/// The backer of `of` holding the highest transitive total, ignoring tier
/// members. Zero-total backers never qualify; on equal totals the earliest
/// backer in arena order is kept.
fn potential_patron(
    candidates: &[Candidate],
    of: CandidateId,
    tier: &[CandidateId],
    verbose: bool,
) -> Option<CandidateId> {
    let mut best_score = 0u64;
    let mut best = None;
    for &backer in &candidates[of].voted_for_me {
        if tier.contains(&backer) {
            if verbose {
                debug!(
                    voter = %candidates[backer].vote.voter_id,
                    "backer is part of the top tier, ignored"
                );
            }
        } else if candidates[backer].total_indirect_votes > best_score {
            best_score = candidates[backer].total_indirect_votes;
            best = Some(backer);
        }
    }
    best
}

/// A valid patron is willing, holds strictly more than half the tentative
/// winner's total, and beats the runner-up outright.
fn is_valid_patron(
    candidates: &[Candidate],
    winner: CandidateId,
    patron: CandidateId,
    runner_up: Option<CandidateId>,
    verbose: bool,
) -> bool {
    let mark = candidates[winner].total_indirect_votes / 2;
    let total = candidates[patron].total_indirect_votes;
    if !candidates[patron].willing_candidate {
        if verbose {
            debug!(
                voter = %candidates[patron].vote.voter_id,
                "potential patron is not a willing candidate"
            );
        }
        return false;
    }
    if total <= mark {
        if verbose {
            debug!(
                voter = %candidates[patron].vote.voter_id,
                total,
                mark,
                "potential patron does not clear the half mark"
            );
        }
        return false;
    }
    match runner_up {
        Some(runner_up) => {
            let beats = total > candidates[runner_up].total_indirect_votes;
            if verbose {
                debug!(
                    voter = %candidates[patron].vote.voter_id,
                    runner_up = %candidates[runner_up].vote.voter_id,
                    beats,
                    "potential patron measured against the runner-up"
                );
            }
            beats
        }
        None => {
            if verbose {
                debug!(
                    voter = %candidates[patron].vote.voter_id,
                    "no runner-up, potential patron stands"
                );
            }
            true
        }
    }
}

use tracing::debug;

use super::graph::{Candidate, CandidateId};

/// Every candidate tied with `best` on the highest transitive total, in
/// chain order.
pub(crate) fn top_tier(candidates: &[Candidate], best: CandidateId) -> Vec<CandidateId> {
    let top_score = candidates[best].total_indirect_votes;
    let mut tier = Vec::new();
    let mut next = Some(best);
    while let Some(id) = next {
        if candidates[id].total_indirect_votes != top_score {
            break;
        }
        tier.push(id);
        next = candidates[id].next_by_total;
    }
    tier
}

/// Partitions the top tier into connected components under the undirected
/// closure of the delegation relation, restricted to the tier.
///
/// Members are claimed out of a pool as they are reached, so every query
/// starts from a fresh pool and candidates outside the tier are never
/// expanded.
pub(crate) fn connected_rings(
    candidates: &[Candidate],
    tier: &[CandidateId],
    verbose: bool,
) -> Vec<Vec<CandidateId>> {
    let mut pool: Vec<CandidateId> = tier.to_vec();
    let mut rings: Vec<Vec<CandidateId>> = Vec::new();
    while let Some(&seed) = pool.first() {
        let mut ring = Vec::new();
        let mut work = vec![seed];
        while let Some(id) = work.pop() {
            if !claim(&mut pool, id) {
                continue;
            }
            ring.push(id);
            if let Some(forward) = candidates[id].vote_for {
                work.push(forward);
            }
            work.extend_from_slice(&candidates[id].voted_for_me);
        }
        rings.push(ring);
    }
    if verbose {
        debug!(rings = rings.len(), "top tier decomposed");
        for (n, ring) in rings.iter().enumerate() {
            for &id in ring {
                debug!(ring = n, voter = %candidates[id].vote.voter_id, "ring member");
            }
        }
    }
    rings
}

/// Swap-removes `id` from the pool; false when an earlier expansion
/// already claimed it or it was never part of the tier.
fn claim(pool: &mut Vec<CandidateId>, id: CandidateId) -> bool {
    match pool.iter().position(|&pooled| pooled == id) {
        Some(at) => {
            pool.swap_remove(at);
            true
        }
        None => false,
    }
}

/// External score of every tier member: its own first-party weight plus
/// the transitive totals of backers outside the tier. Within the tier the
/// indirect totals are inflated by circular delegation, so only outside
/// support tells members apart. Returns all members tied on the maximum
/// score, in tier order.
pub(crate) fn best_of_ring(
    candidates: &[Candidate],
    tier: &[CandidateId],
    verbose: bool,
) -> Vec<CandidateId> {
    let mut winning_score = 0u64;
    let mut winners: Vec<CandidateId> = Vec::new();
    for &id in tier {
        let mut score = candidates[id].vote.number_of_votes;
        for &backer in &candidates[id].voted_for_me {
            if !tier.contains(&backer) {
                score = score.wrapping_add(candidates[backer].total_indirect_votes);
            }
        }
        if verbose {
            debug!(voter = %candidates[id].vote.voter_id, score, "external score");
        }
        if score >= winning_score {
            if score > winning_score {
                winners.clear();
                winning_score = score;
            }
            winners.push(id);
        }
    }
    winners
}

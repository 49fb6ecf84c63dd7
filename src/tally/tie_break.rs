use blake2::{Blake2b512, Digest};
use itertools::Itertools;
use tracing::debug;

use super::graph::{Candidate, CandidateId};

/// Tie-break key: the full Blake2b-512 digest of the candidate's raw id
/// bytes followed by its transitive total as a little-endian u64. The
/// identity bytes are part of the wire contract; peers counting the same
/// ballots derive the same digests.
pub(crate) fn tie_break_digest(voter_id: &[u8], total_indirect_votes: u64) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    hasher.update(voter_id);
    hasher.update(total_indirect_votes.to_le_bytes());
    let mut digest = [0u8; 64];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

/// The tied candidate with the lexicographically smallest digest wins.
/// Empty and singleton winner sets pass through without hashing.
pub(crate) fn break_tie(
    candidates: &[Candidate],
    winners: &[CandidateId],
    verbose: bool,
) -> Option<CandidateId> {
    match winners {
        [] => None,
        &[winner] => Some(winner),
        _ => {
            if verbose {
                debug!(tied = winners.len(), "deterministic tie break");
            }
            winners
                .iter()
                .map(|&id| {
                    let candidate = &candidates[id];
                    let digest = tie_break_digest(
                        candidate.vote.voter_id.as_bytes(),
                        candidate.total_indirect_votes,
                    );
                    if verbose {
                        debug!(
                            voter = %candidate.vote.voter_id,
                            prefix = ?&digest[..4],
                            "tie break digest"
                        );
                    }
                    (digest, id)
                })
                .sorted()
                .next()
                .map(|(_, id)| id)
        }
    }
}

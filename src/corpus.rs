//! Compact byte encoding for vote lists.
//!
//! Differential test drivers feed the same arbitrary byte string to
//! independent implementations of the counter and compare winners. The
//! format packs one vote per [`VOTE_WIDTH`] bytes,
//! `[flags][voter_tag][vote_for_tag][weight]`: bit 0 of `flags` is the
//! willingness opt-in, the weight byte widens to `u64`, and the two tag
//! bytes select from a fixed table of 256 distinct voter names. A trailing
//! partial record is discarded.

use crate::vote::{Vote, VoterId};

/// Bytes per encoded vote.
pub const VOTE_WIDTH: usize = 4;

const GIVEN: [&str; 16] = [
    "Alice", "Bruno", "Carol", "Dario", "Erin", "Felix", "Grace", "Henry", "Iris", "Jonas",
    "Karen", "Liam", "Mona", "Nadia", "Oscar", "Petra",
];

const FAMILY: [&str; 16] = [
    "Abbot", "Birch", "Cole", "Dunn", "Estes", "Finch", "Gray", "Hale", "Ives", "Joyce", "Kerr",
    "Lowe", "Marsh", "Nash", "Orr", "Pike",
];

/// The voter name a tag byte selects. Injective over the whole byte range,
/// so two encoded records share an identity only by reusing a tag.
pub fn voter_name(tag: u8) -> VoterId {
    format!(
        "{} {}",
        GIVEN[usize::from(tag >> 4)],
        FAMILY[usize::from(tag & 0x0f)]
    )
}

/// Decodes as many whole votes as `data` holds.
pub fn decode_votes(data: &[u8]) -> Vec<Vote> {
    data.chunks_exact(VOTE_WIDTH).map(decode_vote).collect()
}

fn decode_vote(record: &[u8]) -> Vote {
    Vote {
        voter_id: voter_name(record[1]),
        vote_for: voter_name(record[2]),
        number_of_votes: u64::from(record[3]),
        willing_candidate: record[0] & 1 == 1,
    }
}

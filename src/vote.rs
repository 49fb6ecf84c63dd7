use serde::{Deserialize, Serialize};

pub type VoterId = String;

/// A single weighted ballot. The voter's id doubles as their candidate
/// identity, so a voter becomes electable simply by setting
/// `willing_candidate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// The unique id of the voter/candidate.
    pub voter_id: VoterId,
    /// The id of the candidate this voter delegates to. May be empty or
    /// refer to an id nobody registered under, in which case the vote
    /// delegates to no one.
    #[serde(default)]
    pub vote_for: VoterId,
    /// How many votes this voter holds. One per head in a national
    /// election, number of shares in a stock company.
    #[serde(default)]
    pub number_of_votes: u64,
    /// Whether this voter is willing to win the election themselves.
    #[serde(default)]
    pub willing_candidate: bool,
}

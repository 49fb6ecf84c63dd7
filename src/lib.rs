//! Delegative vote counting.
//!
//! Each participant casts a weighted vote for another participant, or opts
//! in as a willing candidate and potentially receives votes themselves.
//! Weights flow transitively along the chain of delegations until they
//! accumulate on a willing candidate; [`VoteCounter`] then selects a single
//! winner (or none) with deterministic handling of delegation cycles, ties
//! on accumulated support and patron promotion.
//!
//! You can roughly read the model as "`voter_id` hands `number_of_votes`
//! votes to `vote_for`, and is itself electable iff `willing_candidate`".

pub mod corpus;
pub mod tally;
mod vote;

pub use tally::VoteCounter;
pub use vote::{Vote, VoterId};

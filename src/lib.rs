pub mod election;
pub mod elections;
pub mod regions;
pub mod tally;
pub mod validate;

pub use election::{Candidate, Election, Standing, Vote, VoteError, Voter};
pub use regions::{count_votes_in_regions, Region};
pub use tally::{tally_pure, Tally};
pub use validate::{create_vote_validator, Validation, VoterRules, DEFAULT_RULES};

use std::{cmp::Ordering, collections::HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::validate::DEFAULT_RULES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub party: String,
}

impl Candidate {
    pub fn new(id: &str, name: &str, party: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            party: party.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voter {
    pub id: String,
    pub name: String,
    pub age: f64,
}

impl Voter {
    /// Reads a voter out of a loosely typed record. `None` unless the record is
    /// an object with string `id` and `name` and a numeric `age`.
    pub fn from_record(record: &Value) -> Option<Voter> {
        let record = record.as_object()?;
        let id = record.get("id")?.as_str()?;
        let name = record.get("name")?.as_str()?;
        let age = record.get("age")?.as_f64()?;
        Some(Voter {
            id: id.to_owned(),
            name: name.to_owned(),
            age,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub voter_id: String,
    pub candidate_id: String,
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub id: String,
    pub name: String,
    pub party: String,
    pub votes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteError {
    #[error("Voter is not registered")]
    NotRegistered,
    #[error("Candidate does not exist")]
    UnknownCandidate,
    #[error("Voter has already voted")]
    AlreadyVoted,
}

/// A single election over a fixed candidate list.
///
/// Voter and ballot bookkeeping is private; it changes only through
/// [`Election::register_voter`] and [`Election::cast_vote`].
#[derive(Debug, Clone, Default)]
pub struct Election {
    candidates: Vec<Candidate>,
    registered: HashSet<String>,
    voted: HashSet<String>,
    votes: Vec<Vote>,
}

impl Election {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    pub fn votes_cast(&self) -> usize {
        self.votes.len()
    }

    /// Registers the voter described by `record`. Returns `false` for malformed
    /// records, underage voters and repeat registrations.
    pub fn register_voter(&mut self, record: &Value) -> bool {
        match Voter::from_record(record) {
            Some(voter) => self.register(&voter),
            None => {
                tracing::debug!("Rejected voter record {record}");
                false
            }
        }
    }

    pub fn register(&mut self, voter: &Voter) -> bool {
        if voter.id.is_empty() || voter.name.is_empty() {
            tracing::debug!("Rejected voter with empty id or name");
            return false;
        }
        if voter.age < DEFAULT_RULES.min_age {
            tracing::debug!("Rejected voter {}: age {}", voter.id, voter.age);
            return false;
        }
        if !self.registered.insert(voter.id.clone()) {
            tracing::debug!("Voter {} already registered", voter.id);
            return false;
        }
        tracing::debug!("Registered voter {}", voter.id);
        true
    }

    pub fn try_cast_vote(&mut self, voter_id: &str, candidate_id: &str) -> Result<Vote, VoteError> {
        if !self.registered.contains(voter_id) {
            return Err(VoteError::NotRegistered);
        }
        if !self.candidates.iter().any(|c| c.id == candidate_id) {
            return Err(VoteError::UnknownCandidate);
        }
        if !self.voted.insert(voter_id.to_owned()) {
            return Err(VoteError::AlreadyVoted);
        }
        let vote = Vote {
            voter_id: voter_id.to_owned(),
            candidate_id: candidate_id.to_owned(),
        };
        self.votes.push(vote.clone());
        tracing::info!("Vote recorded for {candidate_id}");
        Ok(vote)
    }

    /// Casts a vote and hands the outcome to exactly one of the callbacks,
    /// returning whatever that callback returns.
    pub fn cast_vote<R>(
        &mut self,
        voter_id: &str,
        candidate_id: &str,
        on_success: impl FnOnce(Vote) -> R,
        on_error: impl FnOnce(&str) -> R,
    ) -> R {
        match self.try_cast_vote(voter_id, candidate_id) {
            Ok(vote) => on_success(vote),
            Err(e) => {
                tracing::debug!("Vote by {voter_id} for {candidate_id} rejected: {e}");
                on_error(&e.to_string())
            }
        }
    }

    /// Standings ordered by votes, highest first. Equal counts keep candidate order.
    pub fn results(&self) -> Vec<Standing> {
        self.results_by(|a, b| b.votes.cmp(&a.votes))
    }

    pub fn results_by<F>(&self, compare: F) -> Vec<Standing>
    where
        F: FnMut(&Standing, &Standing) -> Ordering,
    {
        let mut standings = self
            .candidates
            .iter()
            .map(|c| Standing {
                id: c.id.clone(),
                name: c.name.clone(),
                party: c.party.clone(),
                votes: self.votes.iter().filter(|v| v.candidate_id == c.id).count() as u64,
            })
            .collect::<Vec<_>>();
        standings.sort_by(compare);
        standings
    }

    /// The candidate with the most votes, or `None` before any vote is cast.
    ///
    /// Ties go to the candidate who received a vote first, not to the one
    /// listed first.
    pub fn winner(&self) -> Option<&Candidate> {
        // counts in order of first vote received
        let mut counts: Vec<(&str, u64)> = vec![];
        for vote in self.votes.iter() {
            match counts.iter_mut().find(|(id, _)| *id == vote.candidate_id) {
                Some((_, n)) => *n += 1,
                None => counts.push((vote.candidate_id.as_str(), 1)),
            }
        }

        let mut top: Option<(&str, u64)> = None;
        for (id, n) in counts {
            if top.map_or(true, |(_, max)| n > max) {
                top = Some((id, n));
            }
        }
        let (id, _) = top?;
        self.candidates.iter().find(|c| c.id == id)
    }
}

use std::collections::BTreeMap;

/// Vote counts keyed by candidate id.
pub type Tally = BTreeMap<String, u64>;

/// Returns a copy of `current` with one more vote for `candidate_id`.
pub fn tally_pure(current: &Tally, candidate_id: &str) -> Tally {
    let mut next = current.clone();
    *next.entry(candidate_id.to_owned()).or_insert(0) += 1;
    next
}

use panchayat_election::{
    count_votes_in_regions, create_vote_validator, tally_pure, Candidate, Election, Region, Tally,
    Validation, VoterRules,
};
use serde_json::json;

fn rampur() -> Election {
    Election::new(vec![
        Candidate::new("C1", "Sarpanch Ram", "Janata"),
        Candidate::new("C2", "Pradhan Sita", "Lok"),
    ])
}

#[test]
fn village_election_end_to_end() {
    let mut election = rampur();
    assert!(election.register_voter(&json!({"id": "V1", "name": "Mohan", "age": 25})));
    assert!(election.register_voter(&json!({"id": "V2", "name": "Geeta", "age": 30})));

    let first = election.cast_vote("V1", "C1", |_| "voted!".to_owned(), |e| format!("error: {e}"));
    assert_eq!(first, "voted!");
    let second = election.cast_vote("V2", "C1", |_| "voted!".to_owned(), |e| format!("error: {e}"));
    assert_eq!(second, "voted!");

    let results = election.results();
    assert_eq!(results[0].id, "C1");
    assert_eq!(results[0].votes, 2);
    assert_eq!(results[1].id, "C2");
    assert_eq!(results[1].votes, 0);
    assert_eq!(election.winner(), Some(&Candidate::new("C1", "Sarpanch Ram", "Janata")));
}

#[test]
fn results_serialise_like_the_table() {
    let mut election = rampur();
    election.register_voter(&json!({"id": "V1", "name": "Mohan", "age": 25}));
    election.try_cast_vote("V1", "C2").unwrap();
    assert_eq!(
        serde_json::to_value(election.results()).unwrap(),
        json!([
            {"id": "C2", "name": "Pradhan Sita", "party": "Lok", "votes": 1},
            {"id": "C1", "name": "Sarpanch Ram", "party": "Janata", "votes": 0}
        ])
    );
}

#[test]
fn validator_and_registry_agree_on_default_rules() {
    let rules: VoterRules =
        serde_json::from_value(json!({"minAge": 18, "requiredFields": ["id", "name", "age"]}))
            .unwrap();
    let validate = create_vote_validator(rules);
    let mut election = rampur();
    for (voter, expected) in [
        (json!({"id": "V1", "name": "A"}), Validation::invalid("Missing field: age")),
        (json!({"id": "V2", "name": "A", "age": 16}), Validation::invalid("Voter under min age")),
        (json!({"id": "V3", "name": "A", "age": 20}), Validation::ok()),
    ] {
        let validation = validate(&voter);
        assert_eq!(validation, expected);
        assert_eq!(election.register_voter(&voter), validation.valid);
    }
}

#[test]
fn regional_counts_feed_a_tally() {
    let tree: Region = serde_json::from_value(json!({
        "name": "R",
        "votes": 3,
        "subRegions": [{"name": "S", "votes": 2, "subRegions": []}]
    }))
    .unwrap();
    assert_eq!(count_votes_in_regions(Some(&tree)), 5);
    assert_eq!(count_votes_in_regions(None), 0);

    let empty = Tally::new();
    let once = tally_pure(&empty, "C1");
    let twice = tally_pure(&once, "C1");
    assert!(empty.is_empty());
    assert_eq!(once["C1"], 1);
    assert_eq!(twice["C1"], 2);
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declarative voter eligibility rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterRules {
    pub min_age: f64,
    pub required_fields: Vec<String>,
}

lazy_static::lazy_static! {
    pub static ref DEFAULT_RULES: VoterRules = VoterRules {
        min_age: 18.0,
        required_fields: vec!["id".to_owned(), "name".to_owned(), "age".to_owned()],
    };
}

/// Outcome of a validator call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Validation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Builds a voter check from `rules`. The returned closure is pure.
pub fn create_vote_validator(rules: VoterRules) -> impl Fn(&Value) -> Validation {
    move |voter| {
        // arrays pass as records that carry none of the named fields
        let record = match voter {
            Value::Object(record) => Some(record),
            Value::Array(_) => None,
            _ => return Validation::invalid("Invalid voter object"),
        };
        let has = |field: &str| record.is_some_and(|r| r.contains_key(field));
        if let Some(field) = rules.required_fields.iter().find(|f| !has(f.as_str())) {
            return Validation::invalid(format!("Missing field: {field}"));
        }
        match record.and_then(|r| r.get("age")).and_then(Value::as_f64) {
            Some(age) if age >= rules.min_age => Validation::ok(),
            _ => Validation::invalid("Voter under min age"),
        }
    }
}

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};

/// A region and the regions nested under it, each with its own vote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub votes: u64,
    #[serde(default, rename = "subRegions", deserialize_with = "null_as_default")]
    pub sub_regions: Vec<Region>,
}

// An explicit `null` reads the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Region {
    pub fn new(name: &str, votes: u64, sub_regions: Vec<Region>) -> Self {
        Self {
            name: name.to_owned(),
            votes,
            sub_regions,
        }
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let region = serde_json::from_str::<Region>(s)?;
        Ok(region)
    }
}

/// Total votes in `tree` and all of its sub-regions. A missing tree counts as zero.
///
/// The total saturates at `u64::MAX`.
pub fn count_votes_in_regions(tree: Option<&Region>) -> u64 {
    match tree {
        None => 0,
        Some(region) => region.sub_regions.iter().fold(region.votes, |total, sub| {
            total.saturating_add(count_votes_in_regions(Some(sub)))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_nested_regions() {
        let tree = Region::new("R", 3, vec![Region::new("S", 2, vec![])]);
        assert_eq!(count_votes_in_regions(Some(&tree)), 5);
    }

    #[test]
    fn missing_tree_is_zero() {
        assert_eq!(count_votes_in_regions(None), 0);
    }

    #[test]
    fn walks_every_level() {
        let tree = Region::new(
            "District",
            1,
            vec![
                Region::new(
                    "Block A",
                    10,
                    vec![Region::new("Village 1", 4, vec![]), Region::new("Village 2", 6, vec![])],
                ),
                Region::new("Block B", 0, vec![Region::new("Village 3", 7, vec![])]),
            ],
        );
        assert_eq!(count_votes_in_regions(Some(&tree)), 28);
    }

    #[test]
    fn absent_fields_default_to_empty() {
        let tree = Region::from_json(r#"{"name":"R","subRegions":[{"name":"S","votes":4}]}"#).unwrap();
        assert_eq!(tree.votes, 0);
        assert!(tree.sub_regions[0].sub_regions.is_empty());
        assert_eq!(count_votes_in_regions(Some(&tree)), 4);
    }

    #[test]
    fn null_fields_read_as_absent() {
        let tree = Region::from_json(r#"{"name":"R","votes":null,"subRegions":null}"#).unwrap();
        assert_eq!(tree, Region::new("R", 0, vec![]));
        assert_eq!(count_votes_in_regions(Some(&tree)), 0);
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let tree = Region::new("R", u64::MAX, vec![Region::new("S", 1, vec![])]);
        assert_eq!(count_votes_in_regions(Some(&tree)), u64::MAX);
        let deep = Region::new("R", 1, vec![Region::new("S", u64::MAX - 1, vec![Region::new("T", 5, vec![])])]);
        assert_eq!(count_votes_in_regions(Some(&deep)), u64::MAX);
    }
}

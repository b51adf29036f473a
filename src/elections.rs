use anyhow::{bail, Context, Result};
use std::{collections::HashMap, collections::HashSet, fs, path::Path};

use crate::election::{Candidate, Election};

pub const ELECTION_EXT: &str = "election";

/// Reads a JSON array of candidates. Repeated candidate ids are an error.
pub fn load_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let file = fs::File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let candidates = serde_json::from_reader::<_, Vec<Candidate>>(file)
        .with_context(|| format!("Invalid candidate list in {}", path.display()))?;
    let mut ids = HashSet::new();
    for c in candidates.iter() {
        if !ids.insert(c.id.as_str()) {
            bail!("Duplicate candidate {} in {}", c.id, path.display());
        }
    }
    Ok(candidates)
}

/// Opens one election per `*.election` file in `dir`, keyed by file stem.
pub fn init_elections(dir: &Path) -> Result<HashMap<String, Election>> {
    let mut elections = HashMap::<String, Election>::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(ELECTION_EXT) {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let candidates = load_candidates(&path)?;
        tracing::info!("Election {} loaded with {} candidates", name, candidates.len());
        elections.insert(name.to_owned(), Election::new(candidates));
    }

    Ok(elections)
}

use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use clap_repl::reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory};
use clap_repl::ClapEditor;
use console::style;
use panchayat_election::elections::{init_elections, load_candidates};
use panchayat_election::{
    count_votes_in_regions, create_vote_validator, tally_pure, Election, Region, Standing, Tally,
    Voter, DEFAULT_RULES,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    cli_main()?;

    Ok(())
}

#[derive(Parser, Clone, Debug)]
#[command(name = "")]
pub enum Command {
    /// Load a candidate file, or every *.election file in a directory
    Load { path: PathBuf },
    /// Switch to a loaded election
    Use { name: String },
    Register {
        id: String,
        name: String,
        age: f64,
    },
    Vote { voter: String, candidate: String },
    Results {
        #[arg(long)]
        by_name: bool,
    },
    Winner,
    /// Check a voter record (JSON) against the default rules
    Validate { voter: String },
    /// Sum the votes in a region tree file
    Regions { path: PathBuf },
    /// Add one vote to a tally (JSON object) without touching the input
    Tally { tally: String, candidate: String },
}

#[derive(Default)]
struct Session {
    elections: HashMap<String, Election>,
    current: Option<String>,
}

impl Session {
    fn election(&mut self) -> Result<&mut Election> {
        let name = self.current.as_ref().ok_or(anyhow!("No election selected"))?;
        self.elections
            .get_mut(name)
            .ok_or(anyhow!("Unknown election {name}"))
    }
}

fn process_command(session: &mut Session, command: Command) -> Result<()> {
    match command {
        Command::Load { path } => {
            let loaded = if path.is_dir() {
                init_elections(&path)?
            } else {
                let name = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .ok_or(anyhow!("Bad file name {}", path.display()))?
                    .to_owned();
                HashMap::from([(name, Election::new(load_candidates(&path)?))])
            };
            let mut names = loaded.keys().cloned().collect::<Vec<_>>();
            names.sort();
            if session.current.is_none() {
                session.current = names.first().cloned();
            }
            session.elections.extend(loaded);
            println!("Loaded: {}", names.join(", "));
        }
        Command::Use { name } => {
            if !session.elections.contains_key(&name) {
                anyhow::bail!("Unknown election {name}");
            }
            session.current = Some(name);
        }
        Command::Register { id, name, age } => {
            let registered = session.election()?.register(&Voter { id, name, age });
            println!("{}", if registered { "Registered" } else { "Rejected" });
        }
        Command::Vote { voter, candidate } => {
            let message = session.election()?.cast_vote(
                &voter,
                &candidate,
                |v| style(format!("{} voted for {}", v.voter_id, v.candidate_id)).green(),
                |e| style(e.to_owned()).red(),
            );
            println!("{message}");
        }
        Command::Results { by_name } => {
            let election = session.election()?;
            let results = if by_name {
                election.results_by(|a, b| a.name.cmp(&b.name))
            } else {
                election.results()
            };
            print_results(&results);
        }
        Command::Winner => match session.election()?.winner() {
            Some(c) => println!("{} ({}) [{}]", style(&c.name).bold(), c.party, c.id),
            None => println!("No votes cast"),
        },
        Command::Validate { voter } => {
            let voter = serde_json::from_str::<serde_json::Value>(&voter).context("Voter must be JSON")?;
            let validate = create_vote_validator(DEFAULT_RULES.clone());
            println!("{}", serde_json::to_string(&validate(&voter))?);
        }
        Command::Regions { path } => {
            let s = fs::read_to_string(&path)
                .with_context(|| format!("Cannot read {}", path.display()))?;
            let tree = Region::from_json(&s)?;
            println!("{}: {}", tree.name, count_votes_in_regions(Some(&tree)));
        }
        Command::Tally { tally, candidate } => {
            let current = serde_json::from_str::<Tally>(&tally).context("Tally must be a JSON object")?;
            let next = tally_pure(&current, &candidate);
            println!("{}", serde_json::to_string(&next)?);
        }
    }
    Ok(())
}

fn print_results(results: &[Standing]) {
    for s in results.iter() {
        println!("{:>4}  {:<6} {:<24} {}", s.votes, s.id, s.name, s.party);
    }
    let total: u64 = results.iter().map(|s| s.votes).sum();
    println!("{:>4}  total", style(total).bold());
}

pub fn cli_main() -> Result<()> {
    let prompt = DefaultPrompt {
        left_prompt: DefaultPromptSegment::Basic("election-cli".to_owned()),
        ..DefaultPrompt::default()
    };
    let rl = ClapEditor::<Command>::builder()
        .with_prompt(Box::new(prompt))
        .with_editor_hook(|reed| {
            reed.with_history(Box::new(
                FileBackedHistory::with_file(10000, std::env::temp_dir().join("election-cli-history"))
                    .expect("history file should be writable"),
            ))
        })
        .build();
    let mut session = Session::default();
    rl.repl(|command| {
        if let Err(e) = process_command(&mut session, command) {
            tracing::error!("{e:#}");
        }
    });

    Ok(())
}

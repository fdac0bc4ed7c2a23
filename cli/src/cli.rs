//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `plan`: Generate an assignment cycle for a roster file
//! - `check`: Validate a roster file and report eligibility per participant
//!
//! # Roster file
//!
//! ```json
//! {"participants": [{"id": "alice", "exclusions": ["bob"]}, {"id": "bob"}]}
//! ```
//!
//! # Example
//!
//! ```bash
//! secret-santa plan --roster party.json --seed 42
//! secret-santa --json plan --roster party.json > assignment.json
//! secret-santa check --roster party.json --directional
//! ```

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use secret_santa_core::{
    fresh_seed, AssignmentPlan, AssignmentPlanner, AssignmentRecord, ExclusionGraph,
    ExclusionSemantics, OutcomeSink, ParticipantId, PlannerConfig, Roster,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Secret Santa - random gift-exchange assignments that respect blacklists
#[derive(Parser, Debug)]
#[command(name = "secret-santa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate a gift-giving cycle
    ///
    /// Exclusions are relaxed one at a time if no cycle satisfies all of them;
    /// every relaxed entry is reported.
    Plan(PlanArgs),

    /// Validate a roster and show who each participant may give to
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Roster JSON file
    #[arg(long, short)]
    pub roster: PathBuf,

    /// RNG seed (random when omitted; printed so the run can be repeated)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exclusions only block the excluding participant's own giving
    #[arg(long)]
    pub directional: bool,

    /// Abort a single cycle search after this many steps
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_search_steps: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Roster JSON file
    #[arg(long, short)]
    pub roster: PathBuf,

    /// Exclusions only block the excluding participant's own giving
    #[arg(long)]
    pub directional: bool,
}

impl Cli {
    pub fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Plan(args) => execute_plan(args, self.json),
            Commands::Check(args) => execute_check(args, self.json),
        }
    }
}

fn semantics(directional: bool) -> ExclusionSemantics {
    if directional {
        ExclusionSemantics::Directional
    } else {
        ExclusionSemantics::Symmetric
    }
}

fn load_roster(path: &Path) -> Result<Roster> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid roster file {}", path.display()))
}

/// Terminal outcome captured from the planner
enum Outcome {
    Found(Box<AssignmentPlan>),
    NotPossible(Vec<ParticipantId>),
}

#[derive(Default)]
struct CapturingSink {
    outcome: Option<Outcome>,
}

impl OutcomeSink for CapturingSink {
    fn assignment_found(&mut self, plan: &AssignmentPlan) {
        self.outcome = Some(Outcome::Found(Box::new(plan.clone())));
    }

    fn assignments_not_possible(&mut self, participants: &[ParticipantId]) {
        self.outcome = Some(Outcome::NotPossible(participants.to_vec()));
    }
}

fn execute_plan(args: &PlanArgs, json: bool) -> Result<()> {
    let roster = load_roster(&args.roster)?;
    let config = PlannerConfig {
        rng_seed: args.seed.unwrap_or_else(fresh_seed),
        exclusion_semantics: semantics(args.directional),
        max_search_steps: args.max_search_steps,
    };
    let seed = config.rng_seed;

    let mut planner = AssignmentPlanner::from_config(config)?;
    let mut sink = CapturingSink::default();
    planner.plan_into(&roster, &mut sink)?;

    match sink.outcome {
        Some(Outcome::Found(plan)) => {
            if json {
                let record = AssignmentRecord::from_plan(&plan, &roster)?;
                println!("{}", record.to_json()?);
            } else {
                println!("Seed: {}", seed);
                for (giver, receiver) in plan.cycle().pairs() {
                    println!("{} -> {}", giver, receiver);
                }
                for relaxed in plan.relaxations() {
                    println!(
                        "Relaxed: {} no longer excludes {} (attempt {})",
                        relaxed.participant, relaxed.excluded, relaxed.attempt
                    );
                }
            }
            Ok(())
        }
        Some(Outcome::NotPossible(participants)) => bail!(
            "Assignments could not be generated for {} participant(s); at least two are needed",
            participants.len()
        ),
        None => bail!("Planner finished without an outcome"),
    }
}

fn execute_check(args: &CheckArgs, json: bool) -> Result<()> {
    let roster = load_roster(&args.roster)?;
    let graph = ExclusionGraph::build(&roster, semantics(args.directional));

    if json {
        let eligibility: serde_json::Map<String, serde_json::Value> = roster
            .ids()
            .map(|id| {
                let receivers: Vec<&str> = graph
                    .successors(id.as_str())
                    .iter()
                    .map(|r| r.as_str())
                    .collect();
                (id.to_string(), serde_json::json!(receivers))
            })
            .collect();
        let report = serde_json::json!({
            "participants": graph.participant_count(),
            "edges": graph.edge_count(),
            "exclusions": roster.total_exclusions(),
            "eligible_receivers": eligibility,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} participants, {} exclusions, {} eligible pairs",
        graph.participant_count(),
        roster.total_exclusions(),
        graph.edge_count()
    );
    for id in roster.ids() {
        let receivers = graph.successors(id.as_str());
        if receivers.is_empty() {
            println!("{}: no eligible receivers", id);
        } else {
            let names: Vec<&str> = receivers.iter().map(|r| r.as_str()).collect();
            println!("{}: {}", id, names.join(", "));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_defaults() {
        let cli = Cli::try_parse_from(["secret-santa", "plan", "--roster", "party.json"]).unwrap();
        assert!(!cli.json);
        match cli.command {
            Commands::Plan(args) => {
                assert_eq!(args.roster, PathBuf::from("party.json"));
                assert_eq!(args.seed, None);
                assert!(!args.directional);
                assert_eq!(args.max_search_steps, None);
            }
            other => panic!("Expected plan command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_plan_all_flags() {
        let cli = Cli::try_parse_from([
            "secret-santa",
            "plan",
            "-r",
            "party.json",
            "--seed",
            "42",
            "--directional",
            "--max-search-steps",
            "1000",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Plan(args) => {
                assert_eq!(args.seed, Some(42));
                assert!(args.directional);
                assert_eq!(args.max_search_steps, Some(1000));
            }
            other => panic!("Expected plan command, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_search_steps_rejected() {
        let result = Cli::try_parse_from([
            "secret-santa",
            "plan",
            "--roster",
            "party.json",
            "--max-search-steps",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_roster_required() {
        assert!(Cli::try_parse_from(["secret-santa", "check"]).is_err());
    }

    #[test]
    fn test_semantics_flag() {
        assert_eq!(semantics(false), ExclusionSemantics::Symmetric);
        assert_eq!(semantics(true), ExclusionSemantics::Directional);
    }

    #[test]
    fn test_missing_roster_file_reports_path() {
        let err = load_roster(Path::new("/nonexistent/party.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/party.json"));
    }

    #[test]
    fn test_capturing_sink_records_not_possible() {
        let roster = Roster::from_entries([("solo", Vec::<&str>::new())]).unwrap();
        let mut planner = AssignmentPlanner::from_config(PlannerConfig::default()).unwrap();
        let mut sink = CapturingSink::default();

        planner.plan_into(&roster, &mut sink).unwrap();

        match sink.outcome {
            Some(Outcome::NotPossible(ids)) => assert_eq!(ids, vec![ParticipantId::from("solo")]),
            _ => panic!("Expected NotPossible outcome"),
        }
    }
}

use crate::commands::{run_enrich, run_score, EnrichArgs, ScoreArgs};
use clap::{Parser, Subcommand};
use lead_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "lead-engine",
    about = "Score and enrich B2B leads against an ideal customer profile",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pass 1: score every company in a lead table
    Score(ScoreArgs),
    /// Pass 2: enrich the top Pass 1 results with web search and LLM signals
    Enrich(EnrichArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    match Cli::parse().command {
        Command::Score(args) => run_score(args),
        Command::Enrich(args) => run_enrich(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn enrich_accepts_a_quota_override() {
        let cli = Cli::try_parse_from([
            "lead-engine",
            "enrich",
            "--config",
            "icp.yaml",
            "--input",
            "scored.csv",
            "--top-n",
            "5",
        ])
        .expect("arguments parse");

        match cli.command {
            Command::Enrich(args) => {
                assert_eq!(args.config, PathBuf::from("icp.yaml"));
                assert_eq!(args.top_n, Some(5));
                assert_eq!(args.output, None);
            }
            other => panic!("expected enrich command, got {other:?}"),
        }
    }

    #[test]
    fn score_requires_an_input() {
        assert!(Cli::try_parse_from(["lead-engine", "score", "--config", "icp.yaml"]).is_err());
    }
}

use crate::render::render_summary;
use chrono::Local;
use clap::Args;
use lead_engine::config::{AppConfig, CollaboratorConfig, IcpConfig};
use lead_engine::error::AppError;
use lead_engine::telemetry;
use lead_engine::workflows::enrichment::{AnthropicExtractor, DuckDuckGoSearch, EnrichmentEngine};
use lead_engine::workflows::leads::LeadImporter;
use lead_engine::workflows::report::{ResultWriter, RunSummary, ScoredResultReader};
use lead_engine::workflows::scoring::ScoringEngine;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// ICP definition (YAML)
    #[arg(long)]
    pub(crate) config: PathBuf,
    /// Lead table to score (CSV)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Where to write results. Defaults to `output.file_name` beside the input.
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct EnrichArgs {
    /// ICP definition (YAML) with an `enrichment` section
    #[arg(long)]
    pub(crate) config: PathBuf,
    /// Pass 1 results table (CSV) written by `score`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Where to write results. Defaults to `output.enriched_file_name` beside the input.
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Override `enrichment.top_n`
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        config,
        input,
        output,
    } = args;

    bootstrap()?;
    let icp = IcpConfig::load(&config)?;
    let output = resolve_output(output, &input, &icp.output.file_name);

    let companies = LeadImporter::from_path(&input, &icp.input)?;
    println!("Read {} companies from {}", companies.len(), input.display());

    let results = ScoringEngine::new(&icp).score_all(companies);
    ResultWriter::new(&icp.output).write_scored_to_path(&output, &results)?;

    let summary = RunSummary::for_pass1(&results, &icp.tiers);
    print!("{}", render_summary(&summary, "Scored"));
    println!("\nResults written to {}", output.display());
    Ok(())
}

pub(crate) fn run_enrich(args: EnrichArgs) -> Result<(), AppError> {
    let EnrichArgs {
        config,
        input,
        output,
        top_n,
    } = args;

    bootstrap()?;
    let icp = IcpConfig::load(&config)?;
    let settings = icp.enrichment()?;
    let output = resolve_output(output, &input, &icp.output.enriched_file_name);

    let collaborators = CollaboratorConfig::from_env()?;
    let search = DuckDuckGoSearch::new(
        collaborators.search_url.as_str(),
        settings.search_query_template.as_str(),
        settings.search_max_results,
        collaborators.http_timeout,
    );
    let extractor = AnthropicExtractor::new(
        collaborators.anthropic_url.as_str(),
        collaborators.anthropic_api_key()?,
        settings.llm_model.as_str(),
        collaborators.http_timeout,
    );
    let engine = EnrichmentEngine::new(&icp, Box::new(search), Box::new(extractor))?;

    let pass1 = ScoredResultReader::from_path(&input)?;
    println!("Read {} Pass 1 results from {}", pass1.len(), input.display());

    let results = engine.enrich_top(pass1, top_n.unwrap_or(settings.top_n));
    ResultWriter::new(&icp.output).write_enriched_to_path(&output, &results)?;

    let summary = RunSummary::for_pass2(&results, &icp.tiers);
    print!("{}", render_summary(&summary, "Enriched"));
    println!("\nResults written to {}", output.display());
    Ok(())
}

fn bootstrap() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    tracing::info!(
        environment = ?config.environment,
        started_at = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        "lead engine starting"
    );
    Ok(config)
}

fn resolve_output(explicit: Option<PathBuf>, input: &Path, file_name: &str) -> PathBuf {
    explicit.unwrap_or_else(|| {
        input
            .parent()
            .map(|dir| dir.join(file_name))
            .unwrap_or_else(|| PathBuf::from(file_name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_defaults_beside_the_input() {
        assert_eq!(
            resolve_output(None, Path::new("/data/leads.csv"), "leads_scored.csv"),
            PathBuf::from("/data/leads_scored.csv")
        );
        assert_eq!(
            resolve_output(None, Path::new("leads.csv"), "leads_scored.csv"),
            PathBuf::from("leads_scored.csv")
        );
    }

    #[test]
    fn explicit_output_wins() {
        assert_eq!(
            resolve_output(
                Some(PathBuf::from("/tmp/out.csv")),
                Path::new("/data/leads.csv"),
                "leads_scored.csv"
            ),
            PathBuf::from("/tmp/out.csv")
        );
    }
}

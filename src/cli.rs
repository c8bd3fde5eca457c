use crate::adapters::enrichment::CommandEnricher;
use crate::app::analyzer::RunReport;
use crate::app::config::AnalyzerOptions;
use crate::domain::ports::Enricher;
use crate::domain::result::AnalysisResult;
use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Summary,
}

#[derive(Parser, Debug)]
#[command(
    name = "sgtool",
    version,
    about = "Go struct dependency graph analyzer",
    long_about = "Maps the structs a Go struct depends on through fields, initializations, \
                  constructor calls and interface implementations, up to a bounded depth."
)]
pub struct Cli {
    /// Root directory of the Go project
    #[arg(short, long, default_value = ".")]
    pub project: PathBuf,

    /// Struct to start from (`Name` or `pkg.Name`)
    #[arg(short, long)]
    pub start: String,

    /// Maximum traversal depth
    #[arg(short, long, default_value_t = crate::app::config::DEFAULT_MAX_DEPTH)]
    pub depth: usize,

    /// YAML blacklist with `types` and `packages` lists
    #[arg(short, long, value_name = "FILE")]
    pub blacklist: Option<PathBuf>,

    /// Extra blacklisted types, comma separated
    #[arg(long, value_delimiter = ',')]
    pub blacklist_types: Vec<String>,

    /// Extra blacklisted packages, comma separated
    #[arg(long, value_delimiter = ',')]
    pub blacklist_packages: Vec<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    /// Write the report here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Do not read or write the enrichment cache
    #[arg(long)]
    pub no_cache: bool,

    /// Describe nodes by piping a prompt to this command
    #[arg(long, value_name = "PROGRAM")]
    pub enrich_command: Option<String>,

    /// Argument for the enrichment command (repeatable)
    #[arg(long = "enrich-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub enrich_args: Vec<String>,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn options(&self) -> AnalyzerOptions {
        AnalyzerOptions {
            blacklist_file: self.blacklist.clone(),
            blacklist_types: self.blacklist_types.clone(),
            blacklist_packages: self.blacklist_packages.clone(),
            max_depth: self.depth,
            enable_cache: !self.no_cache,
            ..AnalyzerOptions::new(&self.project, &self.start)
        }
    }

    pub fn enricher(&self) -> Option<Arc<dyn Enricher>> {
        self.enrich_command.as_ref().map(|program| {
            Arc::new(CommandEnricher::new(program).with_args(self.enrich_args.iter().cloned()))
                as Arc<dyn Enricher>
        })
    }
}

/// Human-readable report: nodes grouped by depth, their edges, then cycles.
pub fn render_summary(report: &RunReport) -> String {
    let result = &report.result;
    let mut out = String::new();

    let _ = writeln!(out, "Struct dependencies of {} (depth {})", result.seed, result.max_depth);
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "  Project:  {}", result.project_path);
    let _ = writeln!(out, "  Structs:  {}", result.total_nodes());
    let _ = writeln!(out, "  Edges:    {}", result.total_edges);
    let _ = writeln!(out, "  Cycles:   {}", result.cycles.len());
    if !result.blacklist.is_empty() {
        let _ = writeln!(out, "  Excluded: {}", result.blacklist.join(", "));
    }
    if let Some(stats) = &report.enrichment {
        let _ = writeln!(
            out,
            "  Described: {} ({} from cache, {} failed)",
            stats.enriched + stats.cache_hits,
            stats.cache_hits,
            stats.failed
        );
    }

    for depth in 0..=result.max_depth {
        let nodes = result.nodes_at_depth(depth);
        if nodes.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\nDepth {}", depth);
        let _ = writeln!(out, "{}", "-".repeat(40));
        for node in nodes {
            let _ = writeln!(out, "  {}.{}", node.package, node.name);
            if node.is_enriched() {
                let _ = writeln!(out, "    {}", node.description);
            }
            for edge in &node.edges {
                let _ = writeln!(out, "    -> {} [{}] {}", edge.to, edge.kind, edge.context);
            }
        }
    }

    if result.has_cycles() {
        let _ = writeln!(out, "\nCycles");
        let _ = writeln!(out, "{}", "-".repeat(40));
        for cycle in &result.cycles {
            let _ = writeln!(out, "  {}", cycle.join(" -> "));
        }
    }
    out
}

pub fn render_json(result: &AnalysisResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize analysis result")
}

/// Render `report` in `format` and write it to `output`, or stdout when `None`.
pub fn display_report(
    report: &RunReport,
    format: OutputFormat,
    output: Option<&PathBuf>,
) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => render_json(&report.result)?,
        OutputFormat::Summary => render_summary(report),
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use structseek::alphafold::AlphaFoldHttpClient;
use structseek::cache::ResolutionCache;
use structseek::config::{ConfigLoader, DEFAULT_PROBE_BUDGET_SECS, ResolvedConfig};
use structseek::domain::{GeneQuery, GeneSymbol, HUMAN_TAXON, TaxonId};
use structseek::error::SeekError;
use structseek::output::{JsonOutput, OutputMode, TextOutput};
use structseek::resolver::{ResolveOptions, Resolver};
use structseek::uniprot::UniprotHttpClient;

#[derive(Parser)]
#[command(name = "structseek")]
#[command(about = "Find predicted and solved protein structures for a gene")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    non_interactive: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Resolve structures for a gene (or a config of genes)")]
    Resolve(ResolveArgs),
}

#[derive(Args)]
struct ResolveArgs {
    /// Gene symbol, e.g. BRCA1. Omit to resolve from a config file.
    gene: Option<String>,

    /// Organism taxon id (default: human, 9606)
    #[arg(long)]
    taxon: Option<String>,

    /// Path to a structseek.json config listing genes to resolve
    #[arg(long)]
    config: Option<String>,

    /// Overall model-probe time budget in seconds
    #[arg(long)]
    probe_budget: Option<u64>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(seek) = report.downcast_ref::<SeekError>() {
            return ExitCode::from(map_exit_code(seek));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &SeekError) -> u8 {
    match error {
        SeekError::GeneNotFound(_) | SeekError::MissingConfig => 2,
        SeekError::UniprotHttp(_)
        | SeekError::UniprotStatus { .. }
        | SeekError::AlphaFoldHttp(_)
        | SeekError::MalformedResponse(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.non_interactive {
        OutputMode::NonInteractive
    } else {
        OutputMode::Interactive
    };

    match cli.command {
        Commands::Resolve(args) => run_resolve(args, output_mode),
    }
}

fn run_resolve(args: ResolveArgs, output_mode: OutputMode) -> miette::Result<()> {
    let uniprot = UniprotHttpClient::new().into_diagnostic()?;
    let alphafold = AlphaFoldHttpClient::new().into_diagnostic()?;

    if let Some(gene) = args.gene {
        let symbol: GeneSymbol = gene.parse().into_diagnostic()?;
        let taxon = match args.taxon.as_deref() {
            Some(value) => value.parse::<TaxonId>().into_diagnostic()?,
            None => HUMAN_TAXON,
        };
        let options = ResolveOptions {
            probe_budget: Duration::from_secs(
                args.probe_budget.unwrap_or(DEFAULT_PROBE_BUDGET_SECS),
            ),
        };
        let resolver = Resolver::with_options(uniprot, alphafold, options);
        let result = resolver.resolve(&GeneQuery::new(symbol, taxon)).into_diagnostic()?;
        print_single(&result, output_mode).into_diagnostic()?;
        return Ok(());
    }

    let resolved = ConfigLoader::resolve(args.config.as_deref()).into_diagnostic()?;
    run_batch(resolved, args.probe_budget, uniprot, alphafold, output_mode)
}

fn run_batch(
    config: ResolvedConfig,
    probe_budget_override: Option<u64>,
    uniprot: UniprotHttpClient,
    alphafold: AlphaFoldHttpClient,
    output_mode: OutputMode,
) -> miette::Result<()> {
    let options = ResolveOptions {
        probe_budget: probe_budget_override
            .map(Duration::from_secs)
            .unwrap_or(config.probe_budget),
    };
    let resolver = Resolver::with_options(uniprot, alphafold, options);
    let mut cache = ResolutionCache::new(config.cache_ttl);

    let mut results = Vec::with_capacity(config.queries.len());
    for query in &config.queries {
        results.push(resolver.resolve_cached(&mut cache, query).into_diagnostic()?);
    }

    match output_mode {
        OutputMode::NonInteractive => JsonOutput::print_batch(&results).into_diagnostic()?,
        OutputMode::Interactive => {
            for result in &results {
                TextOutput::print_resolution(result).into_diagnostic()?;
            }
        }
    }
    Ok(())
}

fn print_single(
    result: &structseek::domain::ResolvedStructureSet,
    output_mode: OutputMode,
) -> std::io::Result<()> {
    match output_mode {
        OutputMode::NonInteractive => JsonOutput::print_resolution(result),
        OutputMode::Interactive => TextOutput::print_resolution(result),
    }
}

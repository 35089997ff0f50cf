use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use slog::{debug, o, Drain, Level, LevelFilter, Logger};

use goat_cli::output::safe_stdout;
use goat_cli::parser::compiler::DEFAULT_MAX_LENGTH;
use goat_cli::parser::{Compiler, IndexType, Registry};
use goat_cli::tax_ranks::{display_ranks_from, parse_tax_ranks};
use goat_cli::url::{lookup_url, Api, FieldBuilder, UrlBuilder};
use goat_cli::variables::parse_variables;
use goat_cli::{input, GOAT_URL};

/// Build Genomes on a Tree API requests from a compact filter language
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root of the GoaT API
    #[arg(long, global = true, default_value = GOAT_URL)]
    api_url: String,

    /// Log debug records to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the search URLs for a query
    Search(QueryArgs),
    /// Print the count URLs for a query
    Count(QueryArgs),
    /// Print name lookup URLs
    Lookup(LookupArgs),
    /// List the variables of an index
    Variables(VariablesArgs),
}

#[derive(Args, Debug)]
struct TaxaArgs {
    /// Taxon names or NCBI ids, comma separated
    #[arg(short, long, conflicts_with = "file")]
    taxon: Option<String>,

    /// File with one taxon name or id per line
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// Index to query
    #[arg(short, long, value_enum, default_value_t = IndexType::Taxon)]
    index: IndexType,

    #[command(flatten)]
    taxa: TaxaArgs,

    /// Include all descendants of the taxon
    #[arg(short, long)]
    descendants: bool,

    /// Filter expression, e.g. "tax_rank(genus) AND assembly_span>1000000"
    #[arg(short, long)]
    expression: Option<String>,

    /// Longest filter expression accepted
    #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Variables to return, comma separated
    #[arg(short, long)]
    variables: Option<String>,

    /// Variables to drop from the selection, comma separated
    #[arg(long, value_delimiter = ',')]
    exclude_fields: Vec<String>,

    /// Exclude ancestral and missing values
    #[arg(short = 'x', long)]
    exclude: bool,

    /// Restrict results to these taxonomic ranks, comma separated
    #[arg(long)]
    tax_rank: Option<String>,

    /// Add lineage columns from this rank upwards
    #[arg(long, default_value = "none")]
    ranks: String,

    /// Number of results per request
    #[arg(short, long, default_value_t = 50)]
    size: u64,

    /// Include values estimated from relatives
    #[arg(long)]
    include_estimates: bool,

    /// Include raw values (implies --tidy)
    #[arg(short, long)]
    raw: bool,

    /// Print the output column names before the URLs
    #[arg(long)]
    header: bool,

    #[command(flatten)]
    fields: FieldBuilder,
}

#[derive(Args, Debug)]
struct LookupArgs {
    /// Index to look names up in
    #[arg(short, long, value_enum, default_value_t = IndexType::Taxon)]
    index: IndexType,

    #[command(flatten)]
    taxa: TaxaArgs,

    /// Number of matches per name
    #[arg(short, long, default_value_t = 10)]
    size: u64,
}

#[derive(Args, Debug)]
struct VariablesArgs {
    /// Index whose variables to list
    #[arg(short, long, value_enum, default_value_t = IndexType::Taxon)]
    index: IndexType,

    /// Print JSON instead of a table
    #[cfg(feature = "json")]
    #[arg(long)]
    json: bool,
}

fn build_logger(debug: bool) -> Logger {
    let level = if debug { Level::Debug } else { Level::Warning };
    let decorator = slog_term::PlainSyncDecorator::new(std::io::stderr());
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    Logger::root(LevelFilter::new(drain, level).fuse(), o!())
}

#[tokio::main]
pub async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    let logger = build_logger(cli.debug);
    debug!(logger, "starting"; "command" => ?cli.command);

    match cli.command {
        Command::Search(args) => query(&logger, &cli.api_url, Api::Search, args).await,
        Command::Count(args) => query(&logger, &cli.api_url, Api::Count, args).await,
        Command::Lookup(args) => lookup(&logger, &cli.api_url, args).await,
        Command::Variables(args) => variables(args),
    }
}

async fn query(logger: &Logger, api_url: &str, api: Api, args: QueryArgs) -> miette::Result<()> {
    args.fields.check_index(args.index)?;
    let registry = Registry::new(args.index);

    let expression = match args.expression.as_deref() {
        Some(text) => Some(
            Compiler::new(&registry)
                .with_max_length(args.max_length)
                .compile(logger, text)?,
        ),
        None => None,
    };

    let taxa = input::taxa(args.taxa.taxon.as_deref(), args.taxa.file.as_deref()).await?;

    let mut builder = UrlBuilder::new(api_url, api, args.index)?;
    builder.descendants = args.descendants;
    builder.include_estimates = args.include_estimates;
    builder.include_raw_values = args.raw;
    builder.exclude = args.exclude;
    builder.size = args.size;
    builder.ranks = display_ranks_from(&args.ranks)?;
    builder.fields = args.fields;
    // raw values only come back in tidy form
    builder.fields.tidy |= args.raw;
    if let Some(variables) = args.variables.as_deref() {
        builder.variables = parse_variables(&registry, variables)?;
    }
    builder.exclude_fields = args.exclude_fields;
    if let Some(ranks) = args.tax_rank.as_deref() {
        builder.tax_ranks = parse_tax_ranks(ranks)?;
    }
    builder.expression = expression.as_ref();

    let urls = builder.urls(logger, &taxa)?;

    let mut out = safe_stdout();
    if args.header {
        out.write_header(&builder.col_header()).into_diagnostic()?;
    }
    out.write_urls(&urls).into_diagnostic()?;
    Ok(())
}

async fn lookup(logger: &Logger, api_url: &str, args: LookupArgs) -> miette::Result<()> {
    let taxa = input::taxa(args.taxa.taxon.as_deref(), args.taxa.file.as_deref()).await?;
    let urls = taxa
        .iter()
        .map(|term| lookup_url(api_url, term, args.size, args.index))
        .collect::<goat_cli::Result<Vec<_>>>()?;
    debug!(logger, "built lookup urls"; "count" => urls.len());

    safe_stdout().write_urls(&urls).into_diagnostic()
}

fn variables(args: VariablesArgs) -> miette::Result<()> {
    let registry = Registry::new(args.index);
    let mut out = safe_stdout();

    #[cfg(feature = "json")]
    {
        if args.json {
            let json = goat_cli::output::variables_json(&registry).into_diagnostic()?;
            return out.writeln(&json).into_diagnostic();
        }
    }

    out.write_table(&registry).into_diagnostic()
}

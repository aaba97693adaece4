use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use matriz_tools::reference::PlaceList;
use matriz_tools::sync;
use matriz_tools::{Result, ToolError};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;
    match cli.command {
        Command::Routes(args) => execute_routes(args),
        Command::Records(args) => execute_records(args),
        Command::Dump(args) => execute_dump(args),
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn execute_routes(args: RoutesArgs) -> Result<()> {
    ensure_input_exists(&args.input)?;

    let places = match &args.places {
        Some(path) => PlaceList::from_path(path)?,
        None => PlaceList::builtin(),
    };

    let summary = sync::routes_to_json(&args.input, &args.output, args.sheet.as_deref(), &places)?;
    if summary.is_empty() {
        warn!(input = %args.input.display(), "no routes found in the workbook");
    }
    Ok(())
}

fn execute_records(args: RecordsArgs) -> Result<()> {
    ensure_input_exists(&args.input)?;
    sync::sheet_to_json(&args.input, &args.output, args.sheet.as_deref())?;
    Ok(())
}

fn execute_dump(args: DumpArgs) -> Result<()> {
    ensure_input_exists(&args.input)?;
    sync::workbook_to_text(&args.input, &args.output)?;
    Ok(())
}

fn ensure_input_exists(input: &Path) -> Result<()> {
    if !input.exists() {
        return Err(ToolError::MissingInput(input.to_path_buf()));
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Extract route records and tabular JSON data sets from Excel workbooks."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyse cell comments and emit origin/destination route records.
    Routes(RoutesArgs),
    /// Convert one sheet into a JSON array of row records.
    Records(RecordsArgs),
    /// Dump every sheet's row records into a plain-text JSON file.
    Dump(DumpArgs),
}

#[derive(clap::Args)]
struct RoutesArgs {
    /// Input workbook path.
    #[arg(long)]
    input: PathBuf,

    /// Output JSON file path.
    #[arg(long)]
    output: PathBuf,

    /// Sheet to analyse; defaults to the workbook's first sheet.
    #[arg(long)]
    sheet: Option<String>,

    /// Optional JSON file (array of strings) replacing the built-in
    /// place-name reference list.
    #[arg(long)]
    places: Option<PathBuf>,
}

#[derive(clap::Args)]
struct RecordsArgs {
    /// Input workbook path.
    #[arg(long)]
    input: PathBuf,

    /// Output JSON file path.
    #[arg(long)]
    output: PathBuf,

    /// Sheet to convert; defaults to the workbook's first sheet.
    #[arg(long)]
    sheet: Option<String>,
}

#[derive(clap::Args)]
struct DumpArgs {
    /// Input workbook path.
    #[arg(long)]
    input: PathBuf,

    /// Output text file path.
    #[arg(long)]
    output: PathBuf,
}

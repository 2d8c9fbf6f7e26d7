use crate::server;
use clap::{Args, Parser, Subcommand};
use receipt_points::error::AppError;
use receipt_points::receipts::{validate_receipt, PointsBreakdown, PointsEngine, Receipt};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "receipt-points",
    about = "Score purchase receipts with loyalty points over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Validate a receipt JSON file and print its points breakdown
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a receipt in the same JSON shape accepted by POST /receipts/process
    pub(crate) receipt: PathBuf,
    /// Print the breakdown as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
    }
}

fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.receipt)?;
    let breakdown = score_receipt(&raw)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        print!("{}", render_breakdown(&breakdown));
    }
    Ok(())
}

fn score_receipt(raw: &str) -> Result<PointsBreakdown, AppError> {
    let receipt: Receipt = serde_json::from_str(raw)?;
    validate_receipt(&receipt).map_err(receipt_points::receipts::ReceiptServiceError::from)?;
    Ok(PointsEngine::new().score(&receipt))
}

fn render_breakdown(breakdown: &PointsBreakdown) -> String {
    let mut out = String::new();
    for component in &breakdown.components {
        out.push_str(&format!("{:>4}  {}\n", component.points, component.rule));
    }
    out.push_str(&format!("{:>4}  total\n", breakdown.total));
    out
}

use anyhow::Result;
use backend::shared::data::generator::{self, GeneratorOptions};
use backend::shared::format::format_count;
use clap::Parser;
use std::path::PathBuf;

/// Generate the synthetic sales dataset used by the dashboard
#[derive(Debug, Parser)]
#[command(name = "generate_sales_data", version, about)]
struct Args {
    /// Output CSV path
    #[arg(long, short, default_value = "data/sales_data.csv")]
    output: PathBuf,

    /// Number of transactions to generate
    #[arg(long, default_value_t = 30_000)]
    rows: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let options = GeneratorOptions {
        rows: args.rows,
        seed: args.seed,
        ..GeneratorOptions::default()
    };

    let rows = generator::generate(&options)?;
    generator::write_csv(&args.output, &rows)?;

    tracing::info!(
        "Generated {} sales rows (seed {}) into {}",
        format_count(rows.len()),
        options.seed,
        args.output.display()
    );
    Ok(())
}

//! pairwise-corr benchmark CLI
//!
//! ```bash
//! pairwise-corr <ny> <nx> [threads] [--tier vectorized] [--grain 16] [--schedule dynamic]
//! ```
//!
//! Generates a reproducible `ny × nx` matrix, times one correlate call and,
//! for matrices up to 512 × 512, checks the first rows against a naive
//! double-precision reference. `RUST_LOG=debug` shows the resolved configuration.

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use pairwise_corr::utilities::matrix_gen::lcg_matrix;
use pairwise_corr::verify::{verify_lower_triangle, DEFAULT_CHECK_ROWS, DEFAULT_TOLERANCE};
use pairwise_corr::{CorrelateBuilder, Schedule, Tier, DEFAULT_GRAIN};

const VERIFY_LIMIT: usize = 512;
const RULE: &str = "──────────────────────────────────────────";

#[derive(Parser)]
#[command(name = "pairwise-corr")]
#[command(about = "Pairwise Pearson correlation of matrix rows")]
#[command(version)]
struct Cli {
    /// Number of rows (vectors)
    #[arg(value_parser = parse_positive)]
    ny: usize,

    /// Number of columns (elements per vector)
    #[arg(value_parser = parse_positive)]
    nx: usize,

    /// Worker threads (default: all available cores)
    #[arg(value_parser = parse_positive)]
    threads: Option<usize>,

    /// Performance tier
    #[arg(long, value_enum, default_value_t = TierArg::Vectorized)]
    tier: TierArg,

    /// Rows per unit of work in the pair loop
    #[arg(long, default_value_t = DEFAULT_GRAIN, value_parser = parse_positive)]
    grain: usize,

    /// Distribution policy of the pair loop
    #[arg(long, value_enum, default_value_t = ScheduleArg::Dynamic)]
    schedule: ScheduleArg,

    /// Skip the reference check
    #[arg(long)]
    no_verify: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TierArg {
    Sequential,
    Threaded,
    Vectorized,
}

impl From<TierArg> for Tier {
    fn from(t: TierArg) -> Self {
        match t {
            TierArg::Sequential => Tier::Sequential,
            TierArg::Threaded => Tier::Threaded,
            TierArg::Vectorized => Tier::Vectorized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScheduleArg {
    Dynamic,
    Interleaved,
    Contiguous,
}

impl ScheduleArg {
    fn with_grain(self, grain: usize) -> Schedule {
        match self {
            ScheduleArg::Dynamic => Schedule::Dynamic { grain },
            ScheduleArg::Interleaved => Schedule::Interleaved { grain },
            ScheduleArg::Contiguous => Schedule::Contiguous,
        }
    }
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("must be a positive integer".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
        Err(err) => {
            let rendered = err.render().to_string();
            eprint!("{rendered}");
            if !rendered.contains("Usage:") {
                eprintln!("\n{}", Cli::command().render_usage());
            }
            return ExitCode::from(1);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let (ny, nx) = (cli.ny, cli.nx);
    let mut builder = CorrelateBuilder::new()
        .tier(cli.tier.into())
        .grain(cli.grain)
        .schedule(cli.schedule.with_grain(cli.grain));
    if let Some(threads) = cli.threads {
        builder = builder.threads(threads);
    }
    let engine = builder.into_correlator()?;

    println!("{RULE}");
    println!(" Matrix correlation benchmark");
    println!("{RULE}");
    println!(" ny           = {ny}");
    println!(" nx           = {nx}");
    println!(" num_threads  = {}", engine.threads());
    println!(" tier         = {}", engine.tier().name());
    println!(" kernel       = {}", engine.kernel().name());
    println!(" result cells = {}", ny as u128 * (ny as u128 + 1) / 2);
    println!("{RULE}");

    ny.checked_mul(nx).context("ny * nx overflows usize")?;
    let cells = ny.checked_mul(ny).context("ny * ny overflows usize")?;
    let data = lcg_matrix(ny, nx);
    let mut result = vec![0.0f32; cells];
    tracing::debug!(bytes = result.len() * std::mem::size_of::<f32>(), "result buffer allocated");

    let t0 = Instant::now();
    engine.correlate_into(ny, nx, &data, &mut result)?;
    let elapsed = t0.elapsed();
    println!(" correlate() wall time: {:.3} ms", elapsed.as_secs_f64() * 1e3);

    if cli.no_verify {
        println!(" Verification: skipped (--no-verify)");
    } else if ny <= VERIFY_LIMIT && nx <= VERIFY_LIMIT {
        match verify_lower_triangle(ny, nx, &data, &result, DEFAULT_CHECK_ROWS, DEFAULT_TOLERANCE) {
            Ok(report) => {
                tracing::debug!(cells = report.cells, max_abs_diff = report.max_abs_diff, "verified");
                println!(" Verification: PASSED");
            }
            Err(err) => {
                tracing::warn!("{err}");
                println!(" Verification: FAILED");
            }
        }
    } else {
        println!(" Verification: skipped (matrix too large)");
    }

    println!(" result[0,0] (should be 1.0) = {}", result[0]);
    if ny > 1 {
        println!(" result[1,0]               = {}", result[1]);
    }
    if ny > 2 {
        println!(" result[2,1]               = {}", result[2 + ny]);
    }
    println!("{RULE}");
    Ok(())
}

//! `fuzzy-tip` computes a tip percentage from food and service quality.
//!
//! **Usage:**
//! ```text
//! fuzzy-tip [--food <0-10>] [--service <0-10>] [--verbose] [--format text|json] [--defuzz <method>]
//! fuzzy-tip --interactive
//! ```

use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use fuzzy_tip::{DefuzzificationOp, JsonPresenter, MamdaniInference, Presenter, TextPresenter, TipSystem};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Fuzzy logic tipping: rates food and service on 0-10 and suggests a tip on 0-30%.
#[derive(Parser)]
#[command(name = "fuzzy-tip", version, about)]
struct Args {
    /// Food quality, 0 (rancid) to 10 (delicious).
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    food: f64,

    /// Service quality, 0 (poor) to 10 (excellent).
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    service: f64,

    /// Draw every membership curve, rule output and the aggregate.
    #[arg(short, long)]
    verbose: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Defuzzification method: centroid, bisector, mom, som or lom.
    #[arg(long, default_value = "centroid")]
    defuzz: String,

    /// Read `food service` pairs from stdin, redrawing after each line, until `exit`.
    #[arg(short, long)]
    interactive: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let defuzz_op: DefuzzificationOp = args.defuzz.parse().context("invalid --defuzz")?;
    let system = TipSystem::with_model(MamdaniInference::default().with_defuzzification(defuzz_op))?;

    let stdout = io::stdout().lock();
    let mut presenter: Box<dyn Presenter> = match args.format {
        Format::Text => Box::new(TextPresenter::new(stdout, args.verbose).clear_screen(args.interactive)),
        Format::Json => Box::new(JsonPresenter::new(stdout, args.verbose)),
    };

    if !args.interactive {
        return run(&system, presenter.as_mut(), args.food, args.service);
    }

    info!(method = %defuzz_op, "reading `food service` pairs from stdin");

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim();

        match line {
            "" => continue,
            "exit" | "quit" => break,
            _ => {},
        }

        // Bad input is reported and the previous drawing stays on screen
        let result = parse_pair(line).and_then(|(food, service)| run(&system, presenter.as_mut(), food, service));

        if let Err(err) = result {
            eprintln!("error: {err:#}");
        }
    }

    Ok(())
}

fn run(system: &TipSystem, presenter: &mut dyn Presenter, food: f64, service: f64) -> Result<()> {
    let report = system.compute_tip_verbose(food, service).context("failed to compute the tip")?;

    presenter.clear()?;
    presenter.present(&report)?;

    Ok(())
}

fn parse_pair(line: &str) -> Result<(f64, f64)> {
    let mut parts = line.split(|c: char| c == ',' || c.is_whitespace()).filter(|p| !p.is_empty());

    let (Some(food), Some(service), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected `<food> <service>`, got `{line}`");
    };

    let food = food.parse().with_context(|| format!("invalid food quality `{food}`"))?;
    let service = service.parse().with_context(|| format!("invalid service quality `{service}`"))?;

    Ok((food, service))
}

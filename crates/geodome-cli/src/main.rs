//! geodome CLI - geodesic sphere convergence checks
//!
//! Builds subdivided polyhedra projected onto a sphere, measures them, and
//! reports how fast surface area and volume approach the ideal sphere.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use geodome_analyze::{
    verify_convergence, AnalysisError, AnalysisSettings, Analyzer, ConvergenceReport,
    ConvergenceSample,
};
use geodome_measure::{edge_stats, measure, strut_classes};
use geodome_mesh::{build_with_seed, Seed};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod output;

use config::{parse_range, FileConfig, Overrides, RunConfig};
use output::{format_record, header, Format};

#[derive(Parser)]
#[command(name = "geodome")]
#[command(about = "Geodesic sphere builder and convergence analyzer", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure the sphere at several frequencies and compare with the ideal sphere
    Analyze {
        /// Sphere radius
        #[arg(short, long)]
        radius: Option<f64>,
        /// Comma-separated frequencies, e.g. 1,2,4,8
        #[arg(short, long, value_delimiter = ',', conflicts_with = "range")]
        frequencies: Option<Vec<u32>>,
        /// Inclusive frequency range, e.g. 1..16
        #[arg(long)]
        range: Option<String>,
        /// Seed polyhedron
        #[arg(short, long)]
        seed: Option<Seed>,
        /// Largest frequency that will be built
        #[arg(long)]
        max_frequency: Option<u32>,
        /// Build frequencies concurrently
        #[arg(long)]
        parallel: bool,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<Format>,
        /// Check monotonic convergence and report the observed order on stderr
        #[arg(long)]
        verify: bool,
        /// TOML file with default values for the options above
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Build one geodesic sphere and describe its mesh and struts
    Build {
        /// Subdivision frequency
        #[arg(short, long)]
        frequency: u32,
        /// Sphere radius
        #[arg(short, long)]
        radius: f64,
        /// Seed polyhedron
        #[arg(short, long, default_value_t = Seed::Icosahedron)]
        seed: Seed,
        /// Tolerance for grouping struts of equal length, as a fraction of the radius
        #[arg(short, long, default_value_t = 1e-6)]
        tolerance: f64,
    },
    /// Find the smallest frequency whose surface area is within a relative tolerance
    Converge {
        /// Sphere radius
        #[arg(short, long)]
        radius: f64,
        /// Relative surface area tolerance, e.g. 0.001 for 0.1%
        #[arg(short, long)]
        tolerance: f64,
        /// Seed polyhedron
        #[arg(short, long, default_value_t = Seed::Icosahedron)]
        seed: Seed,
        /// Largest frequency to try
        #[arg(long, default_value_t = geodome_analyze::DEFAULT_MAX_FREQUENCY)]
        max_frequency: u32,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            radius,
            frequencies,
            range,
            seed,
            max_frequency,
            parallel,
            format,
            verify,
            config,
        } => {
            let file = match config {
                Some(path) => FileConfig::load(&path)?,
                None => FileConfig::default(),
            };
            let frequencies = match range {
                Some(range) => Some(parse_range(&range)?),
                None => frequencies,
            };
            let run = RunConfig::resolve(
                file,
                Overrides {
                    radius,
                    frequencies,
                    seed,
                    max_frequency,
                    parallel,
                    format,
                },
            )?;
            run_analyze(&run, verify)
        }
        Commands::Build {
            frequency,
            radius,
            seed,
            tolerance,
        } => run_build(seed, frequency, radius, tolerance),
        Commands::Converge {
            radius,
            tolerance,
            seed,
            max_frequency,
        } => run_converge(seed, radius, tolerance, max_frequency),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "geodome=error",
        1 => "geodome=debug",
        _ => "geodome=trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run_analyze(run: &RunConfig, verify: bool) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let ok = analyze_to(run, verify, &mut out, &mut io::stderr())?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Write one record per successful frequency to `out` and one line per
/// failure to `err`. Returns whether every frequency succeeded (and, with
/// `verify`, whether convergence was monotonic).
fn analyze_to(
    run: &RunConfig,
    verify: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<bool> {
    let analyzer = Analyzer::new(run.settings)?;
    info!(radius = run.radius, frequencies = run.frequencies.len(), "analyzing");

    let results: Vec<geodome_analyze::Result<ConvergenceSample>> = if run.parallel {
        analyzer.analyze_parallel(run.radius, run.frequencies.iter().copied())?
    } else {
        analyzer
            .analyze(run.radius, run.frequencies.iter().copied())?
            .collect()
    };

    if let Some(line) = header(run.format) {
        writeln!(out, "{line}")?;
    }

    let mut samples = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for result in results {
        match result {
            Ok(sample) => {
                writeln!(out, "{}", format_record(&sample, run.format))?;
                samples.push(sample);
            }
            Err(e) => {
                failures += 1;
                report_failure(err, &e)?;
            }
        }
    }
    out.flush()?;

    let mut ok = failures == 0;
    if verify {
        let report = verify_convergence(&samples, 1e-9 * run.radius * run.radius);
        print_report(&report);
        ok &= report.is_monotonic();
    }
    Ok(ok)
}

fn report_failure(w: &mut impl Write, err: &AnalysisError) -> io::Result<()> {
    match err.frequency() {
        Some(frequency) => writeln!(w, "error (nu={frequency}): {err}"),
        None => writeln!(w, "error: {err}"),
    }
}

fn print_report(report: &ConvergenceReport) {
    let order = |p: Option<f64>| p.map_or_else(|| "n/a".to_string(), |p| format!("{p:.3}"));
    eprintln!("samples:                {}", report.samples);
    eprintln!("area monotonic:         {}", report.area_monotonic);
    eprintln!("volume monotonic:       {}", report.volume_monotonic);
    eprintln!("approaches from below:  {}", report.approaches_from_below);
    eprintln!("observed area order:    {}", order(report.area_order));
    eprintln!("observed volume order:  {}", order(report.volume_order));
    for v in &report.violations {
        eprintln!(
            "violation: {:?} error grew from {:e} (nu={}) to {:e} (nu={})",
            v.quantity, v.from_error, v.from_frequency, v.to_error, v.to_frequency
        );
    }
}

fn run_build(seed: Seed, frequency: u32, radius: f64, tolerance: f64) -> Result<ExitCode> {
    let mesh = build_with_seed(seed, frequency, radius)
        .with_context(|| format!("failed to build {seed} at frequency {frequency}"))?;
    let m = measure(&mesh).context("failed to measure mesh")?;

    println!("seed:              {seed}");
    println!("frequency:         {frequency}");
    println!("radius:            {radius}");
    println!("vertices:          {}", mesh.num_vertices());
    println!("edges:             {}", mesh.num_edges());
    println!("faces:             {}", mesh.num_faces());
    println!("euler:             {}", mesh.euler_characteristic());
    println!("radial deviation:  {:e}", mesh.max_radial_deviation(radius));
    println!("surface area:      {:.10}", m.surface_area);
    println!("volume:            {:.10}", m.volume);
    println!("isoperimetric Q:   {:.6}", m.isoperimetric_quotient());

    if let Some(stats) = edge_stats(&mesh) {
        println!(
            "struts:            {} (min {:.6}, max {:.6}, mean {:.6}, spread {:.4})",
            stats.count,
            stats.min,
            stats.max,
            stats.mean,
            stats.spread()
        );
    }
    let classes = strut_classes(&mesh, tolerance * radius);
    println!("strut classes:     {}", classes.len());
    for class in &classes {
        println!("  {:>14.8} x {}", class.length, class.count);
    }

    Ok(ExitCode::SUCCESS)
}

fn run_converge(seed: Seed, radius: f64, tolerance: f64, max_frequency: u32) -> Result<ExitCode> {
    let analyzer = Analyzer::new(AnalysisSettings {
        seed,
        max_frequency,
    })?;
    match analyzer.frequency_for_tolerance(radius, tolerance) {
        Ok(sample) => {
            println!(
                "{seed} sphere of radius {radius}: frequency {} gives relative area error {:.4e} ({} faces)",
                sample.frequency,
                sample.relative_area_error(),
                sample.faces
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ AnalysisError::NotConverged { .. }) => {
            eprintln!("error: {err}");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

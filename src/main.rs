use anyhow::Context;
use clap::{CommandFactory, Parser};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

mod log;
mod model;
mod render;
mod topology;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "measlog-kpi")]
#[command(about = "KPI and CPU usage reports from a measurement log dump", long_about = None)]
struct Cli {
    /// Measurement log file.
    log: Option<String>,

    /// Hosts for the overall CPU usage report (comma separated).
    #[arg(long, value_delimiter = ',', default_value = "0-0-1,0-0-9,0-0-2,0-0-10,0-0-5")]
    hosts: Vec<String>,

    /// Process for the process CPU usage report.
    #[arg(long, default_value = "MHRPROC")]
    process: String,

    /// SPA name prefix for the KPI report.
    #[arg(long, default_value = "EPAY")]
    tracked_prefix: String,

    /// JSON role table replacing the built-in topology.
    #[arg(long)]
    topology: Option<String>,

    #[arg(long, value_enum, default_value_t = render::OutputFormat::Table)]
    format: render::OutputFormat,

    /// Write the report here instead of stdout.
    #[arg(short = 'o', long)]
    out: Option<String>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Errors only.
    #[arg(short, long)]
    quiet: bool,
}

/// Logs go to stderr so they never mix with a report on stdout.
/// `RUST_LOG` takes precedence over the flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("measlog_kpi={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let Some(log_path) = cli.log else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // 1) Topology.
    let registry = match &cli.topology {
        Some(path) => topology::load_topology_file(path)?,
        None => topology::HostRoleRegistry::default(),
    };

    // 2) Parse log.
    info!("Measurement log file: {}", log_path);
    let meas = log::parse_log_file(&log_path)?;

    // 3) Aggregate.
    let opts = model::ReportOptions {
        host_ids: cli.hosts,
        process_name: cli.process,
        kpi: model::KpiOptions {
            tracked_prefix: cli.tracked_prefix,
            ..model::KpiOptions::default()
        },
    };
    let data = model::build_report_data(&meas, &registry, &opts)?;

    // 4) Render.
    let report = render::render_report(&data, cli.format)?;
    match cli.out {
        Some(out) => {
            std::fs::write(&out, report).with_context(|| format!("write report {}", out))?;
            info!("Wrote {}", out);
        }
        None => print!("{}", report),
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use pl_analysis::{StabilityAnalyzer, StabilityTracker};
use pl_sim::Simulator;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "pl-cli")]
#[command(about = "plantlab CLI - headless process-control simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a process configuration (and optionally a layout file)
    Validate {
        /// Path to the process config YAML file
        config_path: PathBuf,
        /// Dashboard layout YAML file to check alongside
        #[arg(long)]
        layout: Option<PathBuf>,
    },
    /// List channels declared in a process configuration
    Channels {
        /// Path to the process config YAML file
        config_path: PathBuf,
    },
    /// Run a simulation and emit CSV
    Run {
        /// Path to the process config YAML file
        config_path: PathBuf,
        /// Fixed time step in seconds
        #[arg(long, default_value_t = 0.1)]
        dt: f64,
        /// End time in seconds
        #[arg(long, default_value_t = 10.0)]
        t_end: f64,
        /// Seed for noise sources (omit for entropy seeding)
        #[arg(long)]
        seed: Option<u64>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Sim(#[from] pl_sim::SimError),

    #[error(transparent)]
    Project(#[from] pl_project::ProjectError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Validate {
            config_path,
            layout,
        } => cmd_validate(&config_path, layout.as_deref()),
        Commands::Channels { config_path } => cmd_channels(&config_path),
        Commands::Run {
            config_path,
            dt,
            t_end,
            seed,
            output,
        } => cmd_run(&config_path, dt, t_end, seed, output.as_deref()),
    }
}

fn cmd_validate(config_path: &Path, layout: Option<&Path>) -> CliResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = pl_project::load_yaml(config_path)?;
    // Builds the channels too, so unknown model tags surface here.
    Simulator::from_config(&config)?;
    println!("✓ Config is valid ({} channels)", config.processes.len());

    if let Some(layout_path) = layout {
        let layout = pl_project::load_layout(layout_path)?;
        for element in &layout.grid.elements {
            if !config.processes.iter().any(|c| c.name == element.id) {
                println!(
                    "⚠ Layout element '{}' has no matching channel",
                    element.id
                );
            }
        }
        println!(
            "✓ Layout is valid ({} elements)",
            layout.grid.elements.len()
        );
    }
    Ok(())
}

fn cmd_channels(config_path: &Path) -> CliResult<()> {
    let config = pl_project::load_yaml(config_path)?;
    if config.processes.is_empty() {
        println!("No channels in config");
        return Ok(());
    }
    println!("Channels in config:");
    for channel in &config.processes {
        let mut attachments = Vec::new();
        if channel.controller.is_some() {
            attachments.push("controller");
        }
        if channel.signal.is_some() {
            attachments.push("signal");
        }
        if channel.alarm.is_some() {
            attachments.push("alarm");
        }
        let detail = if attachments.is_empty() {
            "bare".to_string()
        } else {
            attachments.join("+")
        };
        println!(
            "  {} - {} (initial {}, {})",
            channel.name, channel.model, channel.initial_value, detail
        );
    }
    Ok(())
}

fn cmd_run(
    config_path: &Path,
    dt: f64,
    t_end: f64,
    seed: Option<u64>,
    output: Option<&Path>,
) -> CliResult<()> {
    if !(dt > 0.0) {
        return Err(CliError::InvalidArg {
            what: "dt must be positive",
        });
    }
    if t_end < 0.0 {
        return Err(CliError::InvalidArg {
            what: "t_end must be non-negative",
        });
    }

    let config = pl_project::load_yaml(config_path)?;
    let mut sim = match seed {
        Some(s) => Simulator::from_config_with_seed(&config, s)?,
        None => Simulator::from_config(&config)?,
    };
    let names: Vec<String> = sim.channel_names().map(str::to_string).collect();
    info!(channels = names.len(), dt, t_end, "starting run");

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    // Header: time, one value column per channel, one alarm column per
    // alarmed channel.
    let alarmed: Vec<String> = names
        .iter()
        .filter(|n| sim.alarm_active(n).is_some())
        .cloned()
        .collect();
    write!(writer, "time")?;
    for name in &names {
        write!(writer, ",{name}")?;
    }
    for name in &alarmed {
        write!(writer, ",{name}_alarm")?;
    }
    writeln!(writer)?;

    let mut analyzers: Vec<(StabilityAnalyzer, StabilityTracker)> = names
        .iter()
        .map(|_| (StabilityAnalyzer::default(), StabilityTracker::default()))
        .collect();

    let steps = (t_end / dt).ceil() as u64;
    for _ in 0..steps {
        let outputs = sim.step(Some(dt));
        write!(writer, "{:.6}", sim.elapsed())?;
        for (name, (analyzer, tracker)) in names.iter().zip(analyzers.iter_mut()) {
            let value = outputs[name];
            write!(writer, ",{value:.6}")?;
            analyzer.update(value);
            tracker.add(value);
        }
        for name in &alarmed {
            let flag = sim.alarm_active(name) == Some(true);
            write!(writer, ",{}", u8::from(flag))?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;

    // Keep the report out of the CSV stream when writing to stdout.
    let mut report: Box<dyn Write> = match output {
        Some(_) => Box::new(io::stdout().lock()),
        None => Box::new(io::stderr().lock()),
    };
    writeln!(report, "Stability after {:.2}s:", sim.elapsed())?;
    for (name, (analyzer, tracker)) in names.iter().zip(analyzers.iter()) {
        writeln!(
            report,
            "  {} - {} (trend: {})",
            name,
            analyzer.classify(),
            tracker.status()
        )?;
    }
    Ok(())
}

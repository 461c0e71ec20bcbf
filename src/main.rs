use anyhow::{bail, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use colorbot::calibration::{CalibrationSource, ConfigCalibration};
use colorbot::capture::ImageSequenceSource;
use colorbot::input::{InputInjector, LoggingInjector};
use colorbot::memory::{MemoryReader, ScriptedMemoryReader};
use colorbot::{spawn_signal_handlers, ColorbotConfig, ControlLoop};

#[derive(Parser, Debug)]
#[command(name = "colorbot")]
#[command(about = "Color-keyed target tracking and auto-engagement bot")]
#[command(version)]
#[command(long_about = "Watches a region of the screen for a calibrated target color, \
steers the character toward the nearest match with directional key presses, holds the \
attack modifier when the target is in reach, and sits down to regenerate when health \
read from the game process runs low.")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "colorbot.toml", help = "Path to TOML configuration file")]
    config: String,

    /// Enable debug logging (most verbose)
    #[arg(short, long, help = "Enable debug level logging")]
    debug: bool,

    /// Enable verbose logging (info level)
    #[arg(short, long, help = "Enable verbose info level logging")]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, help = "Enable quiet mode - only log errors")]
    quiet: bool,

    /// Validate configuration and exit
    #[arg(long, help = "Validate configuration file and exit without starting the bot")]
    validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    print_config: bool,

    /// Dry run mode - log key actions instead of sending them
    #[arg(long, help = "Log key actions instead of sending them and assume full health")]
    dry_run: bool,

    /// Override log format (json, pretty, compact)
    #[arg(long, value_name = "FORMAT", help = "Log output format: json, pretty, or compact")]
    log_format: Option<String>,

    /// Stop after this many ticks
    #[arg(long, value_name = "N", help = "Stop after N control loop ticks")]
    max_ticks: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print_default_config()?;
        return Ok(());
    }

    // Logging needs the event log path, so read the config before initializing it
    let loaded = ColorbotConfig::load_from_file(&args.config);
    let event_log = loaded
        .as_ref()
        .ok()
        .and_then(|config| config.logging.event_log_path().map(|path| path.to_path_buf()));
    let _guard = init_logging(&args, event_log.as_deref())?;

    info!("Starting colorbot v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration file: {}", args.config);

    let config = match loaded {
        Ok(config) => {
            info!("Configuration loaded successfully from: {}", args.config);
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        if args.validate_config {
            eprintln!("✗ Configuration validation failed: {}", e);
            std::process::exit(1);
        }
        return Err(e.into());
    }

    if args.validate_config {
        info!("Configuration validation successful");
        println!("✓ Configuration is valid");
        return Ok(());
    }

    let calibration = ConfigCalibration::new(config.capture.clone(), config.calibration.clone())
        .calibrate()
        .map_err(|e| {
            error!("Calibration failed: {}", e);
            e
        })?;

    let source = ImageSequenceSource::open(&config.capture.source_dir).map_err(|e| {
        error!("Failed to open frame source: {}", e);
        e
    })?;
    let memory = create_memory_reader(&config, args.dry_run)?;
    let input = create_injector(&config, args.dry_run)?;

    let mut control = ControlLoop::new(&config, calibration, source, memory, input);

    let cancel = CancellationToken::new();
    let mut signal = spawn_signal_handlers(cancel.clone());

    let summary = control
        .run(cancel, args.max_ticks)
        .await
        .map_err(|e| {
            error!("Control loop error: {}", e);
            e
        })?
        .with_signal(&mut signal);

    info!(
        "colorbot exited after {} tick(s): {:?}",
        summary.ticks, summary.reason
    );
    Ok(())
}

fn create_memory_reader(config: &ColorbotConfig, dry_run: bool) -> Result<Box<dyn MemoryReader>> {
    if dry_run {
        info!(
            "Dry run mode - reporting constant health {}",
            config.health.high_threshold
        );
        return Ok(Box::new(ScriptedMemoryReader::constant(
            config.health.high_threshold,
        )));
    }

    #[cfg(target_os = "linux")]
    {
        let reader = colorbot::memory::ProcMemoryReader::attach(&config.health.process_name)?;
        Ok(Box::new(reader))
    }

    #[cfg(not(target_os = "linux"))]
    {
        bail!(
            "Reading memory of {} is only supported on Linux; use --dry-run",
            config.health.process_name
        )
    }
}

fn create_injector(config: &ColorbotConfig, dry_run: bool) -> Result<Box<dyn InputInjector>> {
    if dry_run {
        info!("Dry run mode - key actions will only be logged");
        return Ok(Box::new(LoggingInjector::new()));
    }

    #[cfg(all(target_os = "linux", feature = "uinput"))]
    {
        let injector = colorbot::input::UinputInjector::new(config.input.press_duration())?;
        Ok(Box::new(injector))
    }

    #[cfg(not(all(target_os = "linux", feature = "uinput")))]
    {
        warn!(
            "No input backend for press duration {:?}",
            config.input.press_duration()
        );
        bail!("Built without the `uinput` feature; rebuild with it or use --dry-run")
    }
}

fn init_logging(args: &Args, event_log: Option<&std::path::Path>) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

    // Determine log level based on flags
    let log_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("colorbot={}", log_level)));

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let fmt_layer = match args.log_format.as_deref() {
        Some("json") => fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        Some("compact") => fmt::layer()
            .compact()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        Some("pretty") | None => fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(args.debug)
            .with_line_number(args.debug)
            .boxed(),
        Some(format) => {
            eprintln!("Warning: Unknown log format '{}', using default", format);
            fmt::layer()
                .with_target(true)
                .with_file(args.debug)
                .with_line_number(args.debug)
                .boxed()
        }
    };
    layers.push(fmt_layer.with_filter(env_filter).boxed());

    // Event log gets every info line regardless of console verbosity
    let mut guard = None;
    if let Some(path) = event_log {
        let directory = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        let Some(file_name) = path.file_name() else {
            bail!("Event log path {} has no file name", path.display());
        };

        let appender = tracing_appender::rolling::never(directory, file_name);
        let (writer, worker_guard) = tracing_appender::non_blocking(appender);
        layers.push(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_filter(EnvFilter::new("colorbot=info"))
                .boxed(),
        );
        guard = Some(worker_guard);
    }

    tracing_subscriber::registry().with(layers).init();

    Ok(guard)
}

/// Print default configuration in TOML format
fn print_default_config() -> Result<()> {
    println!("# colorbot configuration file");
    println!("# Defaults for every option; calibration must be filled in before running");
    println!();
    println!("{}", toml::to_string_pretty(&ColorbotConfig::default())?);
    println!(
        r#"# Calibration example:
# [capture]
# region = [0, 0, 800, 600]
#
# [calibration]
# center = [400, 300]
# color_lower = [0, 150, 150]
# color_upper = [10, 255, 255]
# or derive the range from a sampled pixel:
# sample_rgb = [220, 30, 30]"#
    );
    Ok(())
}

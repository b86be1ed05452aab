use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use ringtap::config::{ProcessorConfig, ProcessorKind, TapList};
use ringtap::output::{OutputFormat, ProcessingReport, create_formatter, peak};
use ringtap::processing::Processor;
use ringtap::signal_processing::FirFilter;
use ringtap::wav::{load_mono_wav, save_wav};

#[derive(Parser, Debug)]
#[command(name = "ringtap")]
#[command(about = "Run a mono WAV file through a delay line or FIR filter", long_about = None)]
struct Args {
    /// Input WAV file (mono)
    input: PathBuf,

    /// Output WAV file (mono, 32-bit float)
    output: PathBuf,

    /// Processor: delay, fir
    #[arg(short = 'm', long, value_enum)]
    mode: Option<ProcessorKind>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Circular buffer capacity in samples
    #[arg(long)]
    capacity: Option<usize>,

    /// Require a power-of-two capacity
    #[arg(long)]
    pow2: bool,

    /// Delay in samples (delay mode)
    #[arg(short = 'd', long)]
    delay: Option<usize>,

    /// Comma-separated FIR taps, most recent sample first (e.g., "0.5,0.5")
    #[arg(short = 't', long, conflicts_with = "average")]
    taps: Option<TapList>,

    /// Use a moving average of N samples as the FIR taps
    #[arg(long)]
    average: Option<usize>,

    /// Report format: text, json, csv
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;
    let kind = match args.mode {
        Some(kind) => kind,
        None if args.taps.is_some() || args.average.is_some() => ProcessorKind::Fir,
        None => config.kind,
    };

    let mut processor =
        Processor::from_config(kind, &config).context("Failed to build processor")?;

    let wav = load_mono_wav(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let mut block: Vec<f64> = wav.samples.iter().map(|&s| s as f64).collect();
    processor
        .process_block(&mut block)
        .context("Processing failed")?;
    let processed: Vec<f32> = block.iter().map(|&s| s as f32).collect();

    save_wav(&args.output, &processed, wav.sample_rate)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let report = ProcessingReport {
        input: args.input.display().to_string(),
        output: args.output.display().to_string(),
        kind,
        capacity: config.buffer.capacity,
        sample_rate: wav.sample_rate,
        samples: processor.samples_processed(),
        latency_samples: processor.latency_samples(),
        input_peak: peak(&wav.samples),
        output_peak: peak(&processed),
    };

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    println!("{}", formatter.format(&report));

    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<ProcessorConfig> {
    let mut config = match &args.config {
        Some(path) => ProcessorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ProcessorConfig::default(),
    };

    if let Some(capacity) = args.capacity {
        config.buffer.capacity = capacity;
    }
    if args.pow2 {
        config.buffer.require_power_of_two = true;
    }
    if let Some(delay) = args.delay {
        config.delay.delay_samples = delay;
    }
    if let Some(taps) = &args.taps {
        config.fir.taps = taps.0.clone();
    }
    if let Some(window) = args.average {
        let average = FirFilter::<f64>::moving_average(window, config.buffer.capacity)
            .context("Invalid moving average window")?;
        config.fir.taps = average.taps().to_vec();
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringtap::BufferError;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["ringtap", "in.wav", "out.wav"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_average_sets_boxcar_taps() {
        let config = build_config(&parse(&["--average", "4"])).unwrap();
        assert_eq!(config.fir.taps, vec![0.25; 4]);
    }

    #[test]
    fn test_average_zero_window_rejected() {
        let err = build_config(&parse(&["--average", "0"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BufferError>(),
            Some(BufferError::EmptyTaps)
        ));
    }

    #[test]
    fn test_average_must_fit_capacity() {
        let err = build_config(&parse(&["--capacity", "4", "--average", "4"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BufferError>(),
            Some(BufferError::TooManyTaps { taps: 4, capacity: 4 })
        ));
    }

    #[test]
    fn test_maximum_delay_from_flags() {
        let args = parse(&["--delay", "255"]);
        let config = build_config(&args).unwrap();
        let mut processor = Processor::from_config(ProcessorKind::Delay, &config).unwrap();
        let mut block = [1.0, 2.0, 3.0];
        processor.process_block(&mut block).unwrap();
        assert_eq!(block, [0.0, 0.0, 0.0]);
    }
}

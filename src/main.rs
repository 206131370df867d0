use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use adpcm2wav_core::cli::Cli;
use adpcm2wav_core::config::{self, Options};
use adpcm2wav_core::logging;
use adpcm2wav_core::sound::pcm_writer::PCM_HEADER_SIZE;
use adpcm2wav_core::sound::{probe_file, transcode_file, ProgressSink, WavInfo};
use anyhow::{Context, Result};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            if log::max_level() == log::LevelFilter::Off {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = config::load_config(&cli.configdir).context("Failed to load configuration")?;
    let options = cli.merge_into_options(options)?;

    logging::init(options.log_level(), options.log_file.as_deref().map(Path::new))?;
    log::debug!("Options: {:?}", options);

    if cli.probe {
        let info = probe_file(&cli.input)
            .with_context(|| format!("Failed to read {}", cli.input.display()))?;
        print_info(&cli.input, &info);
        return Ok(());
    }

    let output = cli.output_path();
    if options.skip_existing.unwrap_or(false) && already_decoded(&output) {
        log::info!("Reusing existing output {}", output.display());
        println!("{}: already decoded", output.display());
        return Ok(());
    }

    decode(&cli.input, &output, &options)
}

fn decode(input: &Path, output: &Path, options: &Options) -> Result<()> {
    let show_progress = options.show_progress.unwrap_or(true);
    let mut print_progress = |percent: u8| {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "\rDecoding: {:3}%", percent);
        let _ = stderr.flush();
    };
    let progress = if show_progress {
        Some(&mut print_progress as &mut dyn ProgressSink)
    } else {
        None
    };

    let result = transcode_file(input, output, progress, &options.transcode_options());
    if show_progress {
        eprintln!();
    }

    match result {
        Ok(report) => {
            if report.truncated() {
                log::warn!(
                    "Input data ended early: {} of {} bytes",
                    report.bytes_consumed,
                    report.info.data_size
                );
            }
            println!(
                "{} -> {}: {} frames, {} bytes of PCM",
                input.display(),
                output.display(),
                report.frames_written,
                report.data_size
            );
            Ok(())
        }
        Err(e) => {
            if !options.keep_partial.unwrap_or(false) {
                remove_partial(output);
            }
            Err(e).with_context(|| format!("Failed to decode {}", input.display()))
        }
    }
}

/// An output longer than a bare header counts as a finished decode
fn already_decoded(output: &Path) -> bool {
    fs::metadata(output)
        .map(|m| m.is_file() && m.len() > PCM_HEADER_SIZE as u64)
        .unwrap_or(false)
}

fn remove_partial(output: &Path) {
    match fs::remove_file(output) {
        Ok(()) => log::debug!("Removed partial output {}", output.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("Failed to remove {}: {}", output.display(), e),
    }
}

fn print_info(path: &Path, info: &WavInfo) {
    let format = &info.format;
    println!("{}", path.display());
    println!("  Channels:          {}", format.channels());
    println!("  Sample rate:       {} Hz", format.sample_rate());
    println!("  Block align:       {}", format.block_align());
    println!("  Samples per block: {}", format.samples_per_block());
    println!("  Data size:         {} bytes", info.data_size);
    match info.fact.samples_per_channel {
        Some(n) => println!("  Fact samples:      {}", n),
        None => println!("  Fact samples:      none"),
    }
    println!("  Total samples:     {}", info.total_samples());
    println!("  Duration:          {:.3} s", info.duration_secs());
}

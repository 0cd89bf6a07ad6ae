//! audiosprite command line front end.
//!
//! Usage:
//!   audiosprite [options] file1.mp3 file2.wav ...
//!
//! Writes `<output>.json` plus one `<output>.<format>` per exported format.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use tracing::info;

use sprite_core::config::{ConfigManager, ConfigSection, Settings};
use sprite_core::logging::{init_tracing, LogLevel};
use sprite_core::models::RunSpec;
use sprite_core::orchestrator::{SpriteRunner, StepError};

/// Build an audio sprite and its JSON manifest from a list of clips
#[derive(Parser, Debug)]
#[command(name = "audiosprite", version, disable_help_flag = true)]
#[command(override_usage = "audiosprite [options] file1.mp3 file2.mp3 *.wav")]
struct Args {
    /// Name for the output files
    #[arg(short, long, default_value = "output")]
    output: String,

    /// Limit exported file types. Comma separated extension list
    #[arg(short, long, value_name = "FORMATS")]
    export: Option<String>,

    /// Log level (trace, debug, info, notice, warn, warning, error)
    #[arg(short, long, value_name = "LEVEL")]
    log: Option<String>,

    /// Autoplay sprite name
    #[arg(short, long, value_name = "NAME")]
    autoplay: Option<String>,

    /// Add a looping silence track of this many seconds at the start
    #[arg(short, long, value_name = "SECONDS", default_value_t = 0.0)]
    silence: f64,

    /// Sample rate
    #[arg(short = 'r', long, value_name = "HZ")]
    samplerate: Option<u32>,

    /// Number of channels (1 = mono, 2 = stereo)
    #[arg(short, long)]
    channels: Option<u16>,

    /// Also export every clip on its own in these formats. Comma separated
    #[arg(short = 'p', long, value_name = "FORMATS")]
    rawparts: Option<String>,

    /// Settings file (created with defaults if missing)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Save the audio and export options back to the settings file
    #[arg(long)]
    remember: bool,

    /// Show this help
    #[arg(short, long)]
    help: bool,

    /// Source audio files
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if args.help || args.files.is_empty() {
        let _ = Args::command().print_help();
        if !args.help {
            eprintln!("\n{}", StepError::MissingInput);
        }
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    // Settings-file messages go to stderr at the command line level; the
    // file's own level applies to the run logger.
    init_tracing(cli_level(&args)?.unwrap_or_default());

    let mut config = match &args.config {
        Some(path) => {
            let mut manager = ConfigManager::new(path);
            manager
                .load_or_create()
                .with_context(|| format!("Failed to load settings from {}", path.display()))?;
            Some(manager)
        }
        None => None,
    };

    let mut settings = config
        .as_ref()
        .map(|m| m.settings().clone())
        .unwrap_or_default();
    apply_overrides(&args, &mut settings)?;

    if args.remember {
        let Some(manager) = config.as_mut() else {
            bail!("--remember needs a settings file (--config <FILE>)");
        };
        *manager.settings_mut() = settings.clone();
        manager.update_section(ConfigSection::Audio)?;
        manager.update_section(ConfigSection::Export)?;
        info!("Saved audio and export options to {}", manager.path().display());
    }

    let spec = build_spec(&args, &settings);
    let report = SpriteRunner::new(settings).run(spec)?;

    info!(
        "Exported json OK: {} ({} file(s), {} sprite(s))",
        report.manifest_path.display(),
        report.urls.len(),
        report.sprite.len()
    );
    info!("All done");
    Ok(())
}

/// Level given with `--log`, if any.
fn cli_level(args: &Args) -> Result<Option<LogLevel>> {
    args.log
        .as_deref()
        .map(|level| level.parse::<LogLevel>().map_err(|e| anyhow::anyhow!("{}", e)))
        .transpose()
}

/// Command line flags take precedence over the settings file.
fn apply_overrides(args: &Args, settings: &mut Settings) -> Result<()> {
    if let Some(level) = cli_level(args)? {
        settings.logging.level = level;
    }
    if let Some(rate) = args.samplerate {
        settings.audio.sample_rate = rate;
    }
    if let Some(channels) = args.channels {
        settings.audio.channels = channels;
    }
    if let Some(formats) = &args.export {
        settings.export.formats = formats.clone();
    }
    if let Some(parts) = &args.rawparts {
        settings.export.raw_parts = parts.clone();
    }
    Ok(())
}

fn build_spec(args: &Args, settings: &Settings) -> RunSpec {
    RunSpec::new(args.files.iter().cloned(), args.output.clone())
        .with_formats(&settings.export.formats)
        .with_raw_parts(&settings.export.raw_parts)
        .with_autoplay(args.autoplay.clone())
        .with_silence(args.silence)
        .with_pcm(settings.audio.pcm())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&["audiosprite", "beep.mp3"]);
        assert_eq!(args.output, "output");
        assert_eq!(args.silence, 0.0);
        assert!(args.log.is_none());
        assert!(!args.help);
        assert_eq!(args.files, vec![PathBuf::from("beep.mp3")]);
    }

    #[test]
    fn short_flags() {
        let args = parse(&[
            "audiosprite", "-o", "sfx", "-e", "ogg,mp3", "-l", "debug", "-a", "boop", "-s", "3",
            "-r", "22050", "-c", "2", "-p", "mp3", "beep.mp3", "boop.wav",
        ]);
        assert_eq!(args.output, "sfx");
        assert_eq!(args.export.as_deref(), Some("ogg,mp3"));
        assert_eq!(args.autoplay.as_deref(), Some("boop"));
        assert_eq!(args.silence, 3.0);
        assert_eq!(args.samplerate, Some(22050));
        assert_eq!(args.channels, Some(2));
        assert_eq!(args.rawparts.as_deref(), Some("mp3"));
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn help_is_a_plain_flag() {
        let args = parse(&["audiosprite", "-h"]);
        assert!(args.help);
        assert!(args.files.is_empty());
    }

    #[test]
    fn flags_override_settings() {
        let args = parse(&[
            "audiosprite", "--rawparts=ogg", "-r", "48000", "-l", "warning", "a.wav",
        ]);
        let mut settings = Settings::default();
        settings.export.formats = "mp3".to_string();

        apply_overrides(&args, &mut settings).unwrap();

        assert_eq!(settings.audio.sample_rate, 48000);
        assert_eq!(settings.audio.channels, 1);
        assert_eq!(settings.export.formats, "mp3");
        assert_eq!(settings.export.raw_parts, "ogg");
        assert_eq!(settings.logging.level, LogLevel::Warn);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let args = parse(&["audiosprite", "-l", "loud", "a.wav"]);
        assert!(cli_level(&args).is_err());
        assert!(apply_overrides(&args, &mut Settings::default()).is_err());
    }

    #[test]
    fn cli_level_is_known_before_settings_load() {
        assert_eq!(
            cli_level(&parse(&["audiosprite", "-l", "notice", "a.wav"])).unwrap(),
            Some(LogLevel::Info)
        );
        assert_eq!(cli_level(&parse(&["audiosprite", "a.wav"])).unwrap(), None);
    }

    #[test]
    fn spec_from_args() {
        let args = parse(&[
            "audiosprite", "-o", "build/sfx", "-a", "", "-s", "2.5", "a.wav", "b.wav", "a.wav",
        ]);
        let mut settings = Settings::default();
        apply_overrides(&args, &mut settings).unwrap();

        let spec = build_spec(&args, &settings);

        assert_eq!(spec.inputs.len(), 2);
        assert_eq!(spec.output, "build/sfx");
        assert!(spec.autoplay.is_none());
        assert!(spec.has_silence());
        assert_eq!(spec.pcm, settings.audio.pcm());
        assert!(spec.formats.is_empty());
    }

    #[test]
    fn command_definition_is_valid() {
        Args::command().debug_assert();
    }
}

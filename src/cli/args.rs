use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::features::breath::MusicTrack;

#[derive(Parser)]
#[command(name = "boxbreath")]
#[command(about = "Guided box breathing in the terminal")]
#[command(long_about = "boxbreath - Guided box breathing in the terminal

Walks you around a square, one side per phase: inhale, hold, exhale, hold.
Each side lasts one pace. Optional phase cues, spoken instructions, and
background music are played from ~/.boxbreath/sounds.

QUICK START:
  boxbreath start                     Two minutes at 5 seconds per side
  boxbreath start -d 5m -p 4          Five minutes at 4 seconds per side
  boxbreath start --music river-sounds --instructions

KEYS DURING A SESSION:
  space/p  pause or resume      i  toggle spoken instructions
  s        stop early           q  quit
  r        repeat (after the session ends)")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a breathing session
    ///
    /// Options not given on the command line come from the [session]
    /// section of ~/.boxbreath/config.yaml.
    ///
    /// # Examples
    ///
    ///   boxbreath start                 Use configured defaults
    ///   boxbreath start -d 10m -p 6     Ten minutes, 6 seconds per side
    ///   boxbreath start --plain         Print phases instead of drawing
    #[command(alias = "s")]
    Start(StartArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),

    /// List the audio catalog and which sound files are present
    Tracks,

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   boxbreath completions zsh > ~/.zsh/completions/_boxbreath
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct StartArgs {
    /// Session length (e.g. "2m", "90s", "1m30s"; a bare number is minutes)
    #[arg(short, long)]
    pub duration: Option<String>,

    /// Seconds per side of the square
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=60))]
    pub pace: Option<u32>,

    /// Background music
    #[arg(short, long, value_enum)]
    pub music: Option<MusicTrack>,

    /// Play spoken instructions on each phase change
    #[arg(short, long)]
    pub instructions: bool,

    /// Disable all sound
    #[arg(long)]
    pub no_audio: bool,

    /// Print phase changes to stdout instead of drawing the square
    #[arg(long)]
    pub plain: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_flags() {
        let cli = Cli::try_parse_from([
            "boxbreath", "start", "-d", "5m", "-p", "4", "--music", "gentle-piano", "-i",
        ])
        .unwrap();

        let Commands::Start(args) = cli.command else {
            panic!("expected start");
        };
        assert_eq!(args.duration.as_deref(), Some("5m"));
        assert_eq!(args.pace, Some(4));
        assert_eq!(args.music, Some(MusicTrack::GentlePiano));
        assert!(args.instructions);
        assert!(!args.plain);
    }

    #[test]
    fn test_pace_must_be_positive() {
        assert!(Cli::try_parse_from(["boxbreath", "start", "--pace", "0"]).is_err());
    }

    #[test]
    fn test_global_output_flag() {
        let cli = Cli::try_parse_from(["boxbreath", "tracks", "-o", "json"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
    }
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chorekit")]
#[command(author, version, about = "Video chores: edit pipelines, re-encoding, downloads")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply a sequence of edit actions to a video
    ///
    /// Actions run in the order given: append[=FILE], tempo=F[,RATE],
    /// speed=F, trim=START[-END], delay=SECS, mute, volume=LEVEL,
    /// crop=W:H[:X:Y], reencode[=PRESET]. Repeating an action overwrites
    /// its first occurrence.
    Vedit {
        /// Video file to edit
        input: PathBuf,

        /// Actions, e.g. `trim=5-60 speed=1.5 append`; none copies the input
        #[arg(num_args = 0..)]
        actions: Vec<String>,

        /// Directory for the result
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// File name for the result
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Download a URL, or every URL listed in a file
    ///
    /// URLs containing `{}` are fetched as numbered chunks and merged.
    Download {
        /// URL or path to a file with one URL per line
        source: String,

        /// Directory for downloaded files
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// File name (single URL only)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Re-encode a file, or every file in a directory
    Reencode {
        /// File or directory to re-encode
        source: PathBuf,

        /// Quality preset: 480p, 720p, 1080p or 2160p
        #[arg(short, long)]
        quality: Option<String>,

        /// Include files in subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Directory for re-encoded files
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// File name (single file only)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod batch;
mod info;
mod prepare;
mod sweep;
mod validate;

mod config;
mod profile;

pub use profile::Profile;

/// chemprep - perturbation dataset preparation for chemical models
#[derive(Parser)]
#[command(name = "chemprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output profile for optimizing speed vs file size.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ProfileArg {
    /// Prioritize speed over compression
    Fast,
    /// Balance between speed and compression
    #[default]
    Balanced,
    /// Maximum compression, slower writes
    MaxCompression,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Fast => Profile::Fast,
            ProfileArg::Balanced => Profile::Balanced,
            ProfileArg::MaxCompression => Profile::MaxCompression,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Join, filter, split and write one dataset
    Prepare {
        /// Load settings from a TOML config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Observation table (overrides [dataset] input)
        #[arg(short, long, value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Prepared Parquet output (overrides [dataset] output)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Key-to-SMILES reference file (overrides [dataset] reference)
        #[arg(short, long, value_name = "FILE")]
        reference: Option<PathBuf>,

        /// Seed for both splits (overrides [split] seed)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output profile (fast, balanced, max-compression)
        #[arg(short = 'p', long, value_enum)]
        profile: Option<ProfileArg>,
    },

    /// Prepare every dataset listed in a batch config
    Batch {
        /// Batch TOML file with [[datasets]] entries
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Output profile applied to every dataset
        #[arg(short = 'p', long, value_enum)]
        profile: Option<ProfileArg>,
    },

    /// Display information about a prepared table
    Info {
        /// Prepared Parquet file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Validate a prepared table
    Validate {
        /// Prepared Parquet file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Require at least this many rows per identity
        #[arg(long)]
        min_replicates: Option<usize>,
    },

    /// Validate a sweep definition and print its expanded runs as JSON
    Sweep {
        /// YAML sweep definition
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Random draws per grid point (overrides random.samples)
        #[arg(short = 'n', long)]
        samples: Option<usize>,

        /// Seed for random draws (overrides random.seed)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print only the number of runs
        #[arg(long)]
        count: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Prepare {
            config,
            input,
            output,
            reference,
            seed,
            profile,
        } => prepare::run(
            config,
            input,
            output,
            reference,
            seed,
            profile.map(Profile::from),
        ),
        Commands::Batch { config, profile } => batch::run(config, profile.map(Profile::from)),
        Commands::Info { file } => info::run(file),
        Commands::Validate {
            file,
            min_replicates,
        } => validate::run(file, min_replicates),
        Commands::Sweep {
            file,
            samples,
            seed,
            count,
        } => sweep::run(file, samples, seed, count),
    }
}

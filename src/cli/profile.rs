//! Output profiles for common use cases.
//!
//! Profiles map to writer presets so users pick a speed/size trade-off
//! without touching Parquet settings.

use std::fmt;
use std::str::FromStr;

use chemprep::writer::{CompressionType, WriterConfig};

/// Output profiles for prepared tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    /// Prioritize write speed.
    ///
    /// - Compression: Snappy
    /// - Row group size: 64k rows
    /// - No column statistics
    Fast,

    /// Balance between speed and size (default).
    ///
    /// - Compression: ZSTD level 6
    /// - Row group size: 256k rows
    #[default]
    Balanced,

    /// Smallest files, slower writes.
    ///
    /// - Compression: ZSTD level 19
    /// - Row group size: 1M rows
    MaxCompression,
}

impl Profile {
    /// Writer settings for this profile.
    pub fn writer_config(&self) -> WriterConfig {
        match self {
            Profile::Fast => WriterConfig::fast_write(),
            Profile::Balanced => WriterConfig::balanced(),
            Profile::MaxCompression => WriterConfig::max_compression(),
        }
    }

    /// Writer settings with an explicit ZSTD level and row group size applied.
    pub fn writer_config_with(
        &self,
        compression_level: Option<i32>,
        row_group_size: Option<usize>,
    ) -> WriterConfig {
        let mut config = self.writer_config();
        if let Some(level) = compression_level {
            config.compression = CompressionType::Zstd(level);
        }
        if let Some(rows) = row_group_size {
            config.row_group_size = rows;
        }
        config
    }

    /// Returns all available profile names.
    pub fn variants() -> &'static [&'static str] {
        &["fast", "balanced", "max-compression"]
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Fast => write!(f, "fast"),
            Profile::Balanced => write!(f, "balanced"),
            Profile::MaxCompression => write!(f, "max-compression"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Profile::Fast),
            "balanced" | "default" => Ok(Profile::Balanced),
            "max-compression" | "maxcompression" | "max" => Ok(Profile::MaxCompression),
            _ => Err(format!(
                "Unknown profile '{}'. Valid options: {}",
                s,
                Profile::variants().join(", ")
            )),
        }
    }
}

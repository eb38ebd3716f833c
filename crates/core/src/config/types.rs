use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::converter::{AudioFormat, Bitrate, ConverterConfig};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub conversion: ConversionDefaults,
}

/// Defaults applied to a batch when the caller does not choose otherwise
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConversionDefaults {
    /// Target format when none is selected
    #[serde(default)]
    pub format: AudioFormat,
    /// Bitrate in kbps applied to every lossy conversion
    #[serde(default = "default_bitrate_kbps")]
    pub bitrate_kbps: u32,
    /// Output folder when none is selected
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for ConversionDefaults {
    fn default() -> Self {
        Self {
            format: AudioFormat::default(),
            bitrate_kbps: default_bitrate_kbps(),
            output_dir: None,
        }
    }
}

impl ConversionDefaults {
    pub fn bitrate(&self) -> Bitrate {
        Bitrate::from_kbps(self.bitrate_kbps)
    }
}

fn default_bitrate_kbps() -> u32 {
    Bitrate::DEFAULT.kbps()
}

use super::{types::Config, ConfigError};

/// Log levels accepted by ffmpeg's `-loglevel` option
const FFMPEG_LOG_LEVELS: &[&str] = &[
    "quiet", "panic", "fatal", "error", "warning", "info", "verbose", "debug", "trace",
];

/// Validate configuration
/// Currently validates:
/// - Bitrate is not 0
/// - FFmpeg path is not empty
/// - FFmpeg log level is one ffmpeg understands
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.conversion.bitrate_kbps == 0 {
        return Err(ConfigError::ValidationError(
            "conversion.bitrate_kbps cannot be 0".to_string(),
        ));
    }

    if config.converter.ffmpeg_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.ffmpeg_path cannot be empty".to_string(),
        ));
    }

    if !FFMPEG_LOG_LEVELS.contains(&config.converter.ffmpeg_log_level.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "converter.ffmpeg_log_level must be one of {}, got {:?}",
            FFMPEG_LOG_LEVELS.join(", "),
            config.converter.ffmpeg_log_level
        )));
    }

    Ok(())
}

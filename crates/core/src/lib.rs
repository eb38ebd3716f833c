pub mod batch;
pub mod config;
pub mod converter;
pub mod testing;

pub use batch::{
    output_path_for, BulkConverter, ConversionOutcome, ConversionReport, ConversionRequest,
    ProgressUpdate,
};
pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config,
    ConfigError, ConversionDefaults,
};
pub use converter::{
    AudioFormat, Bitrate, ConversionJob, Converter, ConverterConfig, ConverterError,
    FfmpegConverter,
};

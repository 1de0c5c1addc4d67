//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use drought_duration::FilterConfig;
use drought_io::{Compression, WriterConfig};

use crate::config::{FilterToml, IoConfig};

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoConfig) -> Result<WriterConfig> {
    let cfg = WriterConfig::default()
        .with_compression(parse_compression(&io.compression)?)
        .with_row_group_size(io.row_group_size);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`FilterConfig`], letting a CLI threshold override the TOML one.
pub fn build_filter_config(
    filter: &FilterToml,
    cli_threshold: Option<f64>,
) -> Result<FilterConfig> {
    let Some(threshold) = cli_threshold.or(filter.threshold) else {
        bail!("no threshold specified: pass --threshold or set [filter].threshold in config");
    };
    let cfg = FilterConfig::new().with_threshold(threshold);
    cfg.validate()?;
    Ok(cfg)
}

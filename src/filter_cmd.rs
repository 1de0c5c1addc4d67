//! Filter command: apply a duration threshold to every cell of a Parquet table.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use drought_io::{read_parquet, write_parquet};

use crate::cli::FilterArgs;
use crate::config::{self, DroughtConfig};
use crate::convert;

/// Run the filter pipeline.
pub fn run(args: FilterArgs) -> Result<()> {
    let _cmd = info_span!("filter").entered();

    // 1. Load optional TOML config and merge CLI overrides
    let drought_cfg = match args.config {
        Some(ref path) => config::load(path)?,
        None => DroughtConfig::default(),
    };
    let filter_cfg = convert::build_filter_config(&drought_cfg.filter, args.threshold)?;
    let writer_cfg = convert::build_writer_config(&drought_cfg.io)?;

    // 2. Read input table
    info!(path = %args.input.display(), "reading duration table");
    let mut table = read_parquet(&args.input)
        .with_context(|| format!("failed to read Parquet: {}", args.input.display()))?;
    info!(
        n_cells = table.n_rows(),
        n_steps = table.n_cols(),
        "loaded duration table"
    );

    // 3. Apply threshold row by row
    let before = table
        .matrix()
        .summarize()
        .context("input contains malformed durations")?;
    let removed = table
        .matrix_mut()
        .apply_config(&filter_cfg)
        .context("failed to apply duration threshold")?;
    let after = table
        .matrix()
        .summarize()
        .context("failed to summarise filtered durations")?;
    info!(
        threshold = filter_cfg.threshold(),
        removed,
        episodes_before = before.count,
        episodes_after = after.count,
        "duration threshold applied"
    );

    // 4. Write filtered table
    info!(path = %args.output.display(), "writing filtered table");
    write_parquet(&args.output, &table, &writer_cfg)
        .with_context(|| format!("failed to write Parquet: {}", args.output.display()))?;
    info!("filtered output written");

    Ok(())
}

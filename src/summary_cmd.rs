//! Summary command: report episode statistics for a duration table.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use drought_duration::EpisodeSummary;
use drought_io::read_parquet;

use crate::cli::SummaryArgs;
use crate::config::FilterToml;
use crate::convert;

/// Run the summary report.
pub fn run(args: SummaryArgs) -> Result<()> {
    let _cmd = info_span!("summary").entered();

    info!(path = %args.input.display(), "reading duration table");
    let mut table = read_parquet(&args.input)
        .with_context(|| format!("failed to read Parquet: {}", args.input.display()))?;

    if let Some(threshold) = args.threshold {
        let cfg = convert::build_filter_config(&FilterToml::default(), Some(threshold))?;
        table
            .matrix_mut()
            .apply_config(&cfg)
            .context("failed to apply duration threshold")?;
    }

    let rows = table
        .matrix()
        .summarize_rows()
        .context("input contains malformed durations")?;
    let cells_in_drought = rows.iter().filter(|s| s.count > 0).count();
    let total = rows
        .into_iter()
        .fold(EpisodeSummary::default(), EpisodeSummary::merge);
    info!(
        episodes = total.count,
        cells_in_drought,
        "episode summary computed"
    );

    println!("cells:            {}", table.n_rows());
    println!("time steps:       {}", table.n_cols());
    println!("cells in drought: {cells_in_drought}");
    println!("episodes:         {}", total.count);
    println!("drought steps:    {}", total.total_steps);
    println!("max duration:     {}", total.max_duration);
    println!("mean duration:    {:.3}", total.mean_duration);

    Ok(())
}

use anyhow::{Context, Result};
use human_repr::{HumanCount, HumanDuration};
use rtgen_core::{Event, GenerationStats, SimpleTable};
use tracing::{debug, info};

use crate::{config::GenerateConfig, sink::store_table, Cli};

pub fn generate(args: Cli) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => GenerateConfig::load(path)?,
        None => GenerateConfig::default(),
    };
    let config = GenerateConfig::from(&args).or(file_config);

    let ctx = config
        .ctx_builder()
        .build()
        .context("Invalid rainbow table parameters")?;

    let table_handle = SimpleTable::new_with_events(ctx)?;

    // log every 10%
    let mut next_step = 10.;
    while let Some(event) = table_handle.recv() {
        match event {
            Event::Batch {
                batch_number,
                batch_count,
                chains,
            } => debug!("Batch {batch_number}/{batch_count} done (chains {chains:?})"),
            Event::Progress(progress) if progress >= next_step => {
                info!("{progress:.0}% of the chains computed");
                next_step = (progress / 10.).floor() * 10. + 10.;
            }
            Event::Progress(_) => (),
        }
    }

    let table = table_handle.join()?;
    debug!("First chains of the table:\n{table:?}");

    let output = config.output();
    let size = store_table(&table, &output)?;
    info!("Rainbow table stored to {}", output.display());

    print!("{}", summary(&table.stats(), size));

    Ok(())
}

/// The report printed once the table is stored.
fn summary(stats: &GenerationStats, size: u64) -> String {
    format!(
        "Number of Threads: {}\n\
         Size of File Generated: {size} bytes ({})\n\
         Rainbow table generation time: {}\n",
        stats.threads,
        size.human_count_bytes(),
        stats.elapsed.human_duration()
    )
}

use chrono::Local;

use crate::cli::Args;
use crate::collector::Collector;
use crate::output::write_results;
use crate::search::BlueNile;
use crate::{info_time, Result};

/// Runs one full harvest: open a session, page through the search grid and dump the
/// diamonds into a timestamped CSV file.
pub async fn process_site(args: Args) -> Result<()> {
    let start_time = Local::now();
    let query = args.query();

    info_time!("Started scraping");
    let endpoint = BlueNile::connect(&args.landing_url, &args.search_url).await?;
    let collector = Collector::new(endpoint, args.delay());

    let diamonds = collector.collect(&query).await?;
    info_time!(start_time, "Finished collecting.");

    let local_now = Local::now();
    match write_results(&args.output_dir, local_now, &diamonds).await? {
        Some(path) => {
            info_time!(local_now, "Wrote {} diamonds to file: {}", diamonds.len(), path.display());
        }
        None => println!("No Data Downloaded"),
    }

    Ok(())
}

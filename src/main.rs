use chrono::Local;
use clap::Parser;
use diamond_scrap::{cli::Args, info_time, process::process_site, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let start_time = Local::now();
    process_site(Args::parse()).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}

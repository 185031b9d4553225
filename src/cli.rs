use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::query::{Clarity, Color, Cut, QuerySpec, Shape};
use crate::{DEFAULT_PAGE_SIZE, LANDING_URL, REQUEST_DELAY_SECS, SEARCH_URL};

/// Downloads every diamond matching the filters into `<output-dir>/<timestamp>.csv`.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Shapes to include, any shape if left out
    #[arg(long = "shape", value_enum, num_args = 1..)]
    pub shapes: Vec<Shape>,

    #[arg(long)]
    pub min_price: Option<u64>,
    #[arg(long)]
    pub max_price: Option<u64>,
    #[arg(long)]
    pub min_carat: Option<f64>,
    #[arg(long)]
    pub max_carat: Option<f64>,

    #[arg(long, value_enum)]
    pub min_cut: Option<Cut>,
    #[arg(long, value_enum)]
    pub max_cut: Option<Cut>,
    #[arg(long, value_enum)]
    pub min_color: Option<Color>,
    #[arg(long, value_enum)]
    pub max_color: Option<Color>,
    #[arg(long, value_enum)]
    pub min_clarity: Option<Clarity>,
    #[arg(long, value_enum)]
    pub max_clarity: Option<Clarity>,

    #[arg(long, default_value_t = 0)]
    pub start_index: u32,
    /// Records per request, the search grid caps this at 1000
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
    #[arg(long, default_value = "USA")]
    pub country: String,
    #[arg(long, default_value = "en-us")]
    pub language: String,
    #[arg(long, default_value = "USD")]
    pub currency: String,
    /// Anything other than `price` is refused at collection time
    #[arg(long, default_value = "price")]
    pub sort_column: String,
    /// Anything other than `asc` is refused at collection time
    #[arg(long, default_value = "asc")]
    pub sort_direction: String,

    /// Seconds to wait between requests
    #[arg(long, default_value_t = REQUEST_DELAY_SECS)]
    pub delay_secs: u64,
    /// Directory the CSV file is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    #[arg(long, default_value = LANDING_URL, hide = true)]
    pub landing_url: String,
    #[arg(long, default_value = SEARCH_URL, hide = true)]
    pub search_url: String,
}

impl Args {
    pub fn query(&self) -> QuerySpec {
        QuerySpec {
            shapes: self.shapes.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            min_carat: self.min_carat,
            max_carat: self.max_carat,
            min_cut: self.min_cut,
            max_cut: self.max_cut,
            min_color: self.min_color,
            max_color: self.max_color,
            min_clarity: self.min_clarity,
            max_clarity: self.max_clarity,
            start_index: self.start_index,
            page_size: self.page_size,
            country: self.country.clone(),
            language: self.language.clone(),
            currency: self.currency.clone(),
            sort_column: self.sort_column.clone(),
            sort_direction: self.sort_direction.clone(),
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

use std::time::Duration;

use chrono::Local;
use tokio::time::sleep;

use crate::query::QuerySpec;
use crate::record::{normalize, Diamond};
use crate::search::{SearchEndpoint, SearchPage};
use crate::{info_time, warn_time, Error, Result};

/// What to do after a page has been folded into the results.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    /// Query again with the price floor at this value.
    Continue(u64),
    Done,
}

/// Pages through a search endpoint using price as the cursor.
///
/// The endpoint never returns more than `page_size` records for a query. While a page
/// comes back full the next query starts at the highest price seen, and the records at
/// exactly that price are left for the next page so nothing is collected twice.
pub struct Collector<E> {
    endpoint: E,
    delay: Duration,
}

impl<E: SearchEndpoint> Collector<E> {
    /// `delay` is waited out after every page that isn't the last one.
    pub fn new(endpoint: E, delay: Duration) -> Self {
        Self { endpoint, delay }
    }

    /// The endpoint this collector queries. Callers that script their own endpoint use
    /// it to look at the requests a run made.
    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Collects every diamond matching `query`.
    ///
    /// A response that isn't a search page stops the run early: the raw body is logged
    /// and whatever was collected so far is returned.
    pub async fn collect(&self, query: &QuerySpec) -> Result<Vec<Diamond>> {
        query.ensure_price_ascending()?;
        query.ensure_ranges()?;

        let start_time = Local::now();
        let mut diamonds = Vec::new();
        let mut cursor = query.min_price;
        let mut iteration = 1;

        loop {
            let body = self.endpoint.search(&query.with_min_price(cursor)).await?;
            let page = match SearchPage::parse(&body) {
                Ok(page) => page,
                Err(e) => {
                    warn_time!("{e}");
                    warn_time!("raw response:\n{body}");
                    break;
                }
            };
            info_time!("iteration: {iteration}, diamonds left: {}", page.count_raw);

            let records = page
                .results
                .iter()
                .map(normalize)
                .collect::<Result<Vec<_>>>()?;

            match fold_page(records, page.count_raw, query.page_size, cursor, &mut diamonds)? {
                Step::Done => break,
                Step::Continue(next) => cursor = Some(next),
            }

            iteration += 1;
            sleep(self.delay).await;
        }

        info_time!(start_time, "Collected {} diamonds in {iteration} requests", diamonds.len());
        Ok(diamonds)
    }
}

/// Appends one page of price-sorted records to `diamonds` and decides where the next
/// query starts.
fn fold_page(
    records: Vec<Diamond>,
    count_raw: u64,
    page_size: u32,
    cursor: Option<u64>,
    diamonds: &mut Vec<Diamond>,
) -> Result<Step> {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        warn_time!("empty page, stopping");
        return Ok(Step::Done);
    };
    let (min_price, max_price) = (first.price, last.price);

    if u64::from(page_size) >= count_raw {
        diamonds.extend(records);
        return Ok(Step::Done);
    }

    // A full page at a single price, or one that doesn't move past the current floor,
    // would be fetched again forever.
    if min_price >= max_price || matches!(cursor, Some(floor) if max_price <= floor) {
        return Err(Error::CursorStuck {
            page_size,
            price: min_price,
        });
    }

    diamonds.extend(records.into_iter().filter(|d| d.price < max_price));
    Ok(Step::Continue(max_price))
}

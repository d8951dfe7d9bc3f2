//! Generic list command handler
//!
//! Provides a reusable pattern for list commands that follow the standard flow:
//! 1. Take the first page of a listing
//! 2. Stream further pages until the limit or the end of the listing
//! 3. Convert to display type
//! 4. Print output

use futures::{StreamExt, TryStreamExt};
use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::cli::progress::Spinner;
use crate::client::{AsyncPageFetcher, AsyncPagedResults};
use crate::error::Result;
use crate::output::Formattable;

/// Run a standard list command with the common stream → limit → display → print pattern.
///
/// # Type Parameters
///
/// * `T` - The API model type of the listing (e.g., `AtlanGroup`)
/// * `D` - The display type that implements `From<T>`, `Tabled`, and `Serialize`
/// * `F` - The page fetcher behind the listing
///
/// # Example
///
/// ```ignore
/// let results = ctx.client.list_groups(&request).await?;
/// run_list_command::<_, GroupDisplay, _>(ctx.format, results, args.limit, "groups").await
/// ```
pub async fn run_list_command<T, D, F>(
    format: OutputFormat,
    results: AsyncPagedResults<T, F>,
    limit: Option<usize>,
    resource_name: &str,
) -> Result<()>
where
    T: Send + 'static,
    F: AsyncPageFetcher<T>,
    D: From<T> + Tabled + Serialize,
{
    let matching = results.filtered_count().or(results.total_count());
    if let Some(count) = matching {
        debug!("{} {} match the request", count, resource_name);
    }

    let spinner = Spinner::start(&format!("Fetching {}...", resource_name));
    let stream = results.into_stream();
    let items: Vec<T> = match limit {
        Some(limit) => stream.take(limit).try_collect().await?,
        None => stream.try_collect().await?,
    };
    spinner.finish_and_clear();

    debug!("Fetched {} {}", items.len(), resource_name);

    if format == OutputFormat::Pretty {
        if let Some(count) = matching.filter(|count| *count > items.len()) {
            eprintln!("Showing {} of {} {}", items.len(), count, resource_name);
        }
    }

    let display_items: Vec<D> = items.into_iter().map(D::from).collect();
    display_items.print(format)
}

use anyhow::{Context, Result};

use crate::fetch::RecordSource;
use crate::join::{JoinSpec, join_records};
use crate::record::MergedRecord;
use crate::schema::Position;
use crate::watchlist::{WatchList, watched_keys};

/// Watch-list -> both fetches -> join, for one position.
///
/// An empty watch-list short-circuits without touching the network. Both fetches
/// run concurrently and must both succeed; there is no partial join.
pub fn load_position(
    source: &dyn RecordSource,
    watchlist: &dyn WatchList,
    position: Position,
) -> Result<Vec<MergedRecord>> {
    let schema = position.schema();
    let items = watchlist
        .items_by_category(position)
        .with_context(|| format!("read {} watch-list", position.slug()))?;
    let keys = watched_keys(&items, schema.join_key_field);
    if keys.is_empty() {
        tracing::info!(position = position.slug(), "watch-list empty");
        return Ok(Vec::new());
    }

    let (statistics, graphic) = rayon::join(
        || source.fetch_statistics(position),
        || source.fetch_graphic(position),
    );
    let statistics = statistics.context("fetch statistics")?;
    let graphic = graphic.context("fetch graphic metrics")?;

    let records = join_records(&keys, &statistics, &graphic, &JoinSpec::for_schema(schema));
    tracing::info!(
        position = position.slug(),
        watched = keys.len(),
        joined = records.len(),
        "comparison records loaded"
    );
    Ok(records)
}

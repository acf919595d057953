use anyhow::{Context, Result};
use log::{debug, warn};

use crate::models::RawItem;
use crate::models::fields::ACTION_FIELD;
use crate::store::DocStore;

/// Load every task not yet marked done, as of the snapshot
///
/// A record without an `action` string is kept with empty text so it can
/// still be selected and closed.
pub fn load_open_tasks<S: DocStore>(
    store: &S,
    collection: &str,
    as_of: &str,
) -> Result<Vec<RawItem>> {
    let records = store
        .query_not_done(collection, as_of)
        .with_context(|| format!("Failed to query open tasks in collection {}", collection))?;

    let tasks: Vec<RawItem> = records
        .into_iter()
        .map(|record| {
            let text = match record.get_str(ACTION_FIELD) {
                Some(action) => action.to_string(),
                None => {
                    warn!("event=task_without_action collection={} id={}", collection, record.id);
                    String::new()
                }
            };
            RawItem::task(record.id, record.version, text)
        })
        .collect();

    debug!("event=tasks_loaded collection={} tasks={}", collection, tasks.len());
    Ok(tasks)
}

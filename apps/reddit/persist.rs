use crate::error::PersistError;
use crate::models::posts::{COLUMNS, PostRecord};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, instrument};

/// De-duplicated rows, as written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct PostTable {
    rows: Vec<PostRecord>,
}

impl PostTable {
    pub fn rows(&self) -> &[PostRecord] {
        &self.rows
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), COLUMNS.len())
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }
}

/// Keeps the first record for each permalink. Records without a permalink
/// share one key, so only the first of them survives.
pub fn dedupe_by_permalink(posts: &[PostRecord]) -> Vec<PostRecord> {
    let mut seen: HashSet<Option<&str>> = HashSet::with_capacity(posts.len());
    let mut rows = Vec::with_capacity(posts.len());
    for post in posts {
        if seen.insert(post.permalink.as_deref()) {
            rows.push(post.clone());
        }
    }
    rows
}

/// Removes duplicate permalinks and writes the rest to `path` as CSV with a
/// header row, replacing any existing file. Empty input writes nothing and
/// returns `None`.
#[instrument(skip_all, fields(input = all_posts.len()))]
pub fn save_to_csv(
    all_posts: &[PostRecord],
    path: impl AsRef<Path>,
) -> Result<Option<PostTable>, PersistError> {
    let path = path.as_ref();

    if all_posts.is_empty() {
        info!("No posts to save.");
        return Ok(None);
    }

    let before = all_posts.len();
    let rows = dedupe_by_permalink(all_posts);
    let after = rows.len();

    info!("Removed {} duplicate posts.", before - after);
    info!("Saving {} cleaned posts to '{}'...", after, path.display());

    let mut writer = csv::Writer::from_path(path)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!("Data saved successfully to {}", path.display());
    Ok(Some(PostTable { rows }))
}

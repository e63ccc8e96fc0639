use crate::config::Settings;
use crate::error::FetchError;
use crate::fetchers::hot::HotPostFetcher;
use crate::fetchers::search::SearchFetcher;
use crate::models::posts::PostRecord;
use crate::persist::{PostTable, save_to_csv};
use crate::reddit_api::PostSource;
use anyhow::{Context, Result, bail};
use tracing::{info, warn};

/// Hot listing, then keyword search, then one CSV write. A failed stage only
/// costs its own posts; the run fails when both stages fail.
pub async fn run<S>(source: &S, settings: &Settings) -> Result<Option<PostTable>>
where
    S: PostSource + ?Sized,
{
    let hot_posts = HotPostFetcher::new(source)
        .download_hot_posts(&settings.subreddits, settings.limit)
        .await;
    let search_results = SearchFetcher::new(source)
        .search_posts(&settings.query, &settings.subreddits, settings.limit)
        .await;

    let all_collected = merge_stages(hot_posts, search_results)?;

    let final_table = save_to_csv(&all_collected, &settings.output)
        .with_context(|| format!("failed to save posts to {}", settings.output.display()))?;

    if let Some(table) = &final_table {
        info!("Final dataset shape: {:?}", table.shape());
        info!("Columns: {:?}", table.columns());
    }

    Ok(final_table)
}

fn merge_stages(
    hot_posts: Result<Vec<PostRecord>, FetchError>,
    search_results: Result<Vec<PostRecord>, FetchError>,
) -> Result<Vec<PostRecord>> {
    if let (Err(hot), Err(search)) = (&hot_posts, &search_results) {
        bail!("hot download failed ({hot}) and keyword search failed ({search})");
    }

    let mut all_collected = Vec::new();
    for (stage, result) in [("hot", hot_posts), ("search", search_results)] {
        match result {
            Ok(posts) => all_collected.extend(posts),
            Err(e) => warn!(stage, error = %e, "Stage failed, continuing without its posts"),
        }
    }
    Ok(all_collected)
}

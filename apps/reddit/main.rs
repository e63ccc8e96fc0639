use anyhow::{Context, Result};
use reddit::config::{Settings, load_credentials};
use reddit::reddit_api::RedditApi;
use reddit::runner::run;
use tracing::info;
use utils::tracing::setup_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    let settings = Settings::from_env();
    let credentials = load_credentials(&settings.env_path);

    let reddit = RedditApi::login(&credentials)
        .await
        .context("failed to authenticate with Reddit")?;

    let me = reddit.me().await.context("failed to fetch authenticated user")?;
    info!("Connected as: {}", me.name);

    run(&reddit, &settings).await?;

    Ok(())
}

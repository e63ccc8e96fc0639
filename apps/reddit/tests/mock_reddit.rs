use mockito::{Matcher, Server};
use reddit::config::Settings;
use reddit::reddit_api::{Credentials, RedditApi};
use reddit::runner::run;
use serde_json::json;

fn listing(permalinks: &[&str]) -> String {
    let children: Vec<_> = permalinks
        .iter()
        .map(|permalink| {
            json!({
                "kind": "t3",
                "data": {
                    "title": "A post",
                    "score": 0,
                    "upvote_ratio": 1.0,
                    "num_comments": 0,
                    "author": "[deleted]",
                    "subreddit": "rust",
                    "url": format!("https://www.reddit.com{permalink}"),
                    "permalink": permalink,
                    "created_utc": 1700000000.0,
                    "is_self": true,
                    "selftext": "x".repeat(800),
                    "link_flair_text": null,
                    "domain": "self.rust"
                }
            })
        })
        .collect();
    json!({"kind": "Listing", "data": {"after": null, "children": children}}).to_string()
}

#[tokio::test]
async fn full_run_against_mock_reddit() {
    let mut server = Server::new_async().await;
    let url = server.url();

    server
        .mock("POST", "/api/v1/access_token")
        .with_status(200)
        .with_body(r#"{"access_token": "tok", "token_type": "bearer"}"#)
        .create_async()
        .await;
    let hot = server
        .mock("GET", "/r/rust/hot")
        .match_header("authorization", "Bearer tok")
        .match_query(Matcher::UrlEncoded("limit".into(), "5".into()))
        .with_status(200)
        .with_body(listing(&["/r/rust/comments/1/", "/r/rust/comments/2/"]))
        .create_async()
        .await;
    let search = server
        .mock("GET", "/r/rust/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "borrow checker".into()),
            Matcher::UrlEncoded("limit".into(), "5".into()),
        ]))
        .with_status(200)
        .with_body(listing(&["/r/rust/comments/2/", "/r/rust/comments/3/"]))
        .create_async()
        .await;

    let credentials = Credentials {
        client_id: Some("id".to_string()),
        client_secret: Some("secret".to_string()),
        username: Some("bot".to_string()),
        password: Some("pw".to_string()),
        user_agent: Some("harvester-test/1.0".to_string()),
    };
    let api = RedditApi::login_with_endpoints(&credentials, &url, &url)
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        subreddits: vec!["rust".to_string()],
        query: "borrow checker".to_string(),
        limit: 5,
        output: dir.path().join("reddit_data.csv"),
        ..Settings::default()
    };

    let table = run(&api, &settings).await.unwrap().unwrap();

    hot.assert_async().await;
    search.assert_async().await;

    let rows = table.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].score, Some(0));
    assert_eq!(rows[0].num_comments, Some(0));
    assert_eq!(rows[0].author, None);
    assert_eq!(rows[0].selftext.as_ref().map(|s| s.len()), Some(500));
    assert_eq!(rows[1].search_query, None);
    assert_eq!(rows[2].search_query.as_deref(), Some("borrow checker"));
    assert!(settings.output.exists());
}

// tests/watch_later_auth_test.rs

use bili_ls::{
    config::cookie::MemoryCredentials,
    error::AppError,
    models::{CollectionType, Platform},
    test_support,
};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

const WATCH_LATER_URL: &str = "https://www.bilibili.com/watchlater/#/list";
const TOVIEW_PATH: &str = "/x/v2/history/toview";

fn toview_body(start: usize, count: usize, total: u64) -> String {
    let list: Vec<_> = (start..start + count)
        .map(|i| {
            json!({
                "bvid": format!("BV1wl{:08}", i),
                "title": format!("稍后再看 {}", i),
                "duration": 60 + i as u64,
            })
        })
        .collect();
    json!({
        "code": 0, "message": "0",
        "data": { "count": total, "list": list }
    })
    .to_string()
}

#[tokio::test]
async fn test_watch_later_without_credential_short_circuits() {
    // --- 1. Arrange (准备阶段) ---
    let mut server = mockito::Server::new_async().await;

    // 没有凭证时必须在发起任何网络调用之前就失败
    let mock = server
        .mock("GET", TOVIEW_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(toview_body(0, 5, 5))
        .expect(0)
        .create_async()
        .await;

    let resolver =
        test_support::test_resolver(&server.url(), Arc::new(MemoryCredentials::empty()));

    // --- 2. Act (执行阶段) ---
    let error = resolver
        .resolve(WATCH_LATER_URL, 50)
        .await
        .expect_err("匿名访问稍后再看应当失败");

    // --- 3. Assert (断言阶段) ---
    mock.assert_async().await;
    assert!(matches!(
        error,
        AppError::AuthRequired {
            platform: Platform::Bilibili
        }
    ));
}

#[tokio::test]
async fn test_watch_later_with_credential_attaches_cookie_and_pages() {
    let mut server = mockito::Server::new_async().await;

    // count=25, 页宽 20 -> 恰好两页
    let mock_p1 = server
        .mock("GET", TOVIEW_PATH)
        .match_query(Matcher::UrlEncoded("pn".into(), "1".into()))
        .match_header("cookie", "SESSDATA=abc123")
        .with_status(200)
        .with_body(toview_body(0, 20, 25))
        .create_async()
        .await;
    let mock_p2 = server
        .mock("GET", TOVIEW_PATH)
        .match_query(Matcher::UrlEncoded("pn".into(), "2".into()))
        .match_header("cookie", "SESSDATA=abc123")
        .with_status(200)
        .with_body(toview_body(20, 5, 25))
        .create_async()
        .await;

    let credentials = Arc::new(MemoryCredentials::with(Platform::Bilibili, "SESSDATA=abc123"));
    let resolver = test_support::test_resolver(&server.url(), credentials);

    let result = resolver
        .resolve(WATCH_LATER_URL, 50)
        .await
        .expect("携带凭证时应当成功");

    mock_p1.assert_async().await;
    mock_p2.assert_async().await;

    assert_eq!(result.videos.len(), 25);
    assert!(!result.truncated);

    let collection = result.collection.expect("应当带有合集引用");
    assert_eq!(collection.collection_type, CollectionType::WatchLater);
    assert!(collection.requires_auth);
}

#[tokio::test]
async fn test_expired_credential_maps_to_auth_required() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", TOVIEW_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "code": -101, "message": "账号未登录", "data": null }).to_string())
        .create_async()
        .await;

    let credentials = Arc::new(MemoryCredentials::with(Platform::Bilibili, "SESSDATA=expired"));
    let resolver = test_support::test_resolver(&server.url(), credentials);

    let error = resolver
        .resolve(WATCH_LATER_URL, 50)
        .await
        .expect_err("过期凭证应当失败");
    assert!(matches!(error, AppError::AuthRequired { .. }));
}

// tests/bangumi_resolver_test.rs

use bili_ls::{
    config::cookie::MemoryCredentials,
    error::AppError,
    models::CollectionType,
    test_support,
};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

const SECTION_PATH: &str = "/pgc/web/season/section";
const MEDIA_PATH: &str = "/pgc/review/user";

fn section_body() -> String {
    json!({
        "code": 0, "message": "success",
        "result": {
            "main_section": {
                "title": "正片",
                "episodes": [
                    { "bvid": "BV1ep00000001", "title": "1", "long_title": "开端", "cover": "https://i0.hdslb.com/ep1.jpg" },
                ]
            },
            "section": [
                {
                    "title": "正片",
                    "episodes": [
                        { "bvid": "BV1ep00000001", "title": "1", "long_title": "开端", "cover": "https://i0.hdslb.com/ep1.jpg" },
                        { "bvid": "BV1ep00000002", "title": "2", "long_title": "转折", "cover": "https://i0.hdslb.com/ep2.jpg" },
                    ]
                },
                {
                    "title": "花絮",
                    "episodes": [
                        { "bvid": "BV1ep00000003", "title": "PV1", "long_title": "先导预告" },
                        // 没有 bvid 的站外条目应当被跳过
                        { "title": "EP99", "long_title": "会员专享花絮" },
                    ]
                }
            ]
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_bangumi_season_url_lists_episodes() {
    // --- 1. Arrange (准备阶段) ---
    let mut server = mockito::Server::new_async().await;

    let mock_section = server
        .mock("GET", SECTION_PATH)
        .match_query(Matcher::UrlEncoded("season_id".into(), "12345".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(section_body())
        .create_async()
        .await;

    let resolver =
        test_support::test_resolver(&server.url(), Arc::new(MemoryCredentials::empty()));

    // --- 2. Act (执行阶段) ---
    let result = resolver
        .resolve("https://www.bilibili.com/bangumi/play/ss12345", 50)
        .await
        .expect("解析应当成功");

    // --- 3. Assert (断言阶段) ---
    mock_section.assert_async().await;

    let collection = result.collection.expect("应当带有合集引用");
    assert_eq!(collection.collection_type, CollectionType::BangumiSeason);
    assert_eq!(collection.collection_id, "12345");

    // 正片2集 + 花絮1集，缺 bvid 的条目被跳过
    assert_eq!(result.videos.len(), 3);
    assert_eq!(result.videos[0].title, "1 开端");
    assert_eq!(result.videos[1].title, "2 转折");
    assert_eq!(result.videos[2].title, "PV1 先导预告");
    assert!(!result.truncated);
}

#[tokio::test]
async fn test_bangumi_media_url_resolves_in_two_phases() {
    let mut server = mockito::Server::new_async().await;

    // 第一阶段: media_id -> season_id
    let mock_media = server
        .mock("GET", MEDIA_PATH)
        .match_query(Matcher::UrlEncoded("media_id".into(), "54321".into()))
        .with_status(200)
        .with_body(
            json!({
                "code": 0, "message": "success",
                "result": { "media": { "season_id": 12345, "title": "某番剧" } }
            })
            .to_string(),
        )
        .create_async()
        .await;
    // 第二阶段: 委托给分节接口
    let mock_section = server
        .mock("GET", SECTION_PATH)
        .match_query(Matcher::UrlEncoded("season_id".into(), "12345".into()))
        .with_status(200)
        .with_body(section_body())
        .create_async()
        .await;

    let resolver =
        test_support::test_resolver(&server.url(), Arc::new(MemoryCredentials::empty()));
    let result = resolver
        .resolve("https://www.bilibili.com/bangumi/media/md54321", 50)
        .await
        .expect("解析应当成功");

    mock_media.assert_async().await;
    mock_section.assert_async().await;

    // 合集引用保留链接本来指向的媒体ID
    let collection = result.collection.expect("应当带有合集引用");
    assert_eq!(collection.collection_type, CollectionType::BangumiMedia);
    assert_eq!(collection.collection_id, "54321");
    assert_eq!(result.videos.len(), 3);
}

#[tokio::test]
async fn test_bangumi_media_phase_one_failure_short_circuits() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", MEDIA_PATH)
        .match_query(Matcher::UrlEncoded("media_id".into(), "54321".into()))
        .with_status(200)
        .with_body(json!({ "code": -404, "message": "啥都木有", "result": null }).to_string())
        .create_async()
        .await;
    // 第一阶段失败后不应触碰分节接口
    let mock_section = server
        .mock("GET", SECTION_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(section_body())
        .expect(0)
        .create_async()
        .await;

    let resolver =
        test_support::test_resolver(&server.url(), Arc::new(MemoryCredentials::empty()));
    let error = resolver
        .resolve("https://www.bilibili.com/bangumi/media/md54321", 50)
        .await
        .expect_err("第一阶段失败应当让整体失败");

    mock_section.assert_async().await;
    assert!(matches!(error, AppError::NotFound { .. }));
}

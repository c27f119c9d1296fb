// tests/user_space_series_test.rs

use bili_ls::{
    config::cookie::MemoryCredentials,
    models::CollectionType,
    test_support,
};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

const ARC_SEARCH_PATH: &str = "/x/space/arc/search";
const VIEW_PATH: &str = "/x/web-interface/view";

#[tokio::test]
async fn test_user_uploads_url_pages_through_space() {
    // --- 1. Arrange (准备阶段) ---
    let mut server = mockito::Server::new_async().await;

    let page1 = json!({
        "code": 0, "message": "0",
        "data": {
            "list": {
                "vlist": [
                    { "bvid": "BV1up00000001", "title": "投稿一", "length": "12:34", "created": 1_700_000_000 },
                    { "bvid": "BV1up00000002", "title": "投稿二", "length": "1:02:03", "created": 1_700_000_100 },
                ]
            },
            "page": { "count": 3, "pn": 1, "ps": 20 }
        }
    });
    // count=3 但第一页就返回了全部有效条目，第二页为空列表
    let page2 = json!({
        "code": 0, "message": "0",
        "data": {
            "list": { "vlist": [ { "bvid": "BV1up00000003", "title": "投稿三", "length": "0:45" } ] },
            "page": { "count": 3, "pn": 2, "ps": 20 }
        }
    });

    let mock_p1 = server
        .mock("GET", ARC_SEARCH_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("mid".into(), "8888".into()),
            Matcher::UrlEncoded("pn".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(page1.to_string())
        .create_async()
        .await;
    // 3 <= 20：第一页之后就不应再翻页
    let mock_p2 = server
        .mock("GET", ARC_SEARCH_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("mid".into(), "8888".into()),
            Matcher::UrlEncoded("pn".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(page2.to_string())
        .expect(0)
        .create_async()
        .await;

    let resolver =
        test_support::test_resolver(&server.url(), Arc::new(MemoryCredentials::empty()));

    // --- 2. Act (执行阶段) ---
    let result = resolver
        .resolve("https://space.bilibili.com/8888/video", 50)
        .await
        .expect("解析应当成功");

    // --- 3. Assert (断言阶段) ---
    mock_p1.assert_async().await;
    mock_p2.assert_async().await;

    let collection = result.collection.expect("应当带有合集引用");
    assert_eq!(collection.collection_type, CollectionType::UserUploads);
    assert_eq!(collection.collection_id, "8888");

    assert_eq!(result.videos.len(), 2);
    // "12:34" 形式的时长文本被解析为秒
    assert_eq!(result.videos[0].duration_secs, Some(754));
    assert_eq!(result.videos[1].duration_secs, Some(3723));
}

fn series_seed_view(bvid: &str, mid: u64) -> serde_json::Value {
    json!({
        "code": 0, "message": "0",
        "data": {
            "bvid": bvid,
            "title": "数据结构教学 第一集",
            "duration": 900,
            "owner": { "mid": mid, "name": "教学UP" },
            "pages": [ { "page": 1, "part": "正片" } ],
        }
    })
}

#[tokio::test]
async fn test_series_keyword_triggers_sibling_scan() {
    let mut server = mockito::Server::new_async().await;
    let bvid = "BV1ser0000001";

    // 标题命中系列关键词 -> 翻UP主投稿找兄弟视频
    let mock_view = server
        .mock("GET", VIEW_PATH)
        .match_query(Matcher::UrlEncoded("bvid".into(), bvid.into()))
        .with_status(200)
        .with_body(series_seed_view(bvid, 8888).to_string())
        .create_async()
        .await;

    let uploads = json!({
        "code": 0, "message": "0",
        "data": {
            "list": {
                "vlist": [
                    { "bvid": "BV1ser0000002", "title": "数据结构教学 第二集", "length": "14:00" },
                    { "bvid": bvid, "title": "数据结构教学 第一集", "length": "15:00" },
                    { "bvid": "BV1oth0000001", "title": "开箱一把人体工学椅", "length": "05:00" },
                ]
            },
            "page": { "count": 3, "pn": 1, "ps": 20 }
        }
    });
    let mock_uploads = server
        .mock("GET", ARC_SEARCH_PATH)
        .match_query(Matcher::UrlEncoded("mid".into(), "8888".into()))
        .with_status(200)
        .with_body(uploads.to_string())
        .create_async()
        .await;

    let resolver =
        test_support::test_resolver(&server.url(), Arc::new(MemoryCredentials::empty()));
    let result = resolver
        .resolve(&format!("https://www.bilibili.com/video/{}", bvid), 50)
        .await
        .expect("解析应当成功");

    mock_view.assert_async().await;
    mock_uploads.assert_async().await;

    let collection = result.collection.expect("应当带有合集引用");
    assert_eq!(collection.collection_type, CollectionType::Series);
    assert_eq!(collection.collection_id, "8888");

    // 不相似的投稿被过滤掉
    let ids: Vec<&str> = result.videos.iter().map(|v| v.video_id.as_str()).collect();
    assert_eq!(ids, vec!["BV1ser0000002", bvid]);
}

#[tokio::test]
async fn test_series_scan_without_siblings_falls_back_to_single() {
    let mut server = mockito::Server::new_async().await;
    let bvid = "BV1ser0000001";

    server
        .mock("GET", VIEW_PATH)
        .match_query(Matcher::UrlEncoded("bvid".into(), bvid.into()))
        .with_status(200)
        .with_body(series_seed_view(bvid, 8888).to_string())
        .create_async()
        .await;
    // 投稿里只有种子视频自己
    server
        .mock("GET", ARC_SEARCH_PATH)
        .match_query(Matcher::UrlEncoded("mid".into(), "8888".into()))
        .with_status(200)
        .with_body(
            json!({
                "code": 0, "message": "0",
                "data": {
                    "list": { "vlist": [ { "bvid": bvid, "title": "数据结构教学 第一集", "length": "15:00" } ] },
                    "page": { "count": 1, "pn": 1, "ps": 20 }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let resolver =
        test_support::test_resolver(&server.url(), Arc::new(MemoryCredentials::empty()));
    let result = resolver
        .resolve(&format!("https://www.bilibili.com/video/{}", bvid), 50)
        .await
        .expect("解析应当成功");

    // 扫不出兄弟视频时退回单视频结果
    assert!(result.collection.is_none());
    assert_eq!(result.videos.len(), 1);
    assert_eq!(result.videos[0].video_id, bvid);
    assert_eq!(result.videos[0].title, "数据结构教学 第一集");
}

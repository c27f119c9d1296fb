// tests/video_probe_test.rs
//
// 覆盖单视频链接的探测路径：多分P展开、独立视频、UGC合集展开、幂等性。

use bili_ls::{
    config::cookie::MemoryCredentials,
    models::CollectionType,
    test_support,
};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

const VIEW_PATH: &str = "/x/web-interface/view";
const VIEW_DETAIL_PATH: &str = "/x/web-interface/view/detail";
const ARCHIVES_PATH: &str = "/x/polymer/space/seasons_archives_list";

fn bvid_query(bvid: &str) -> Matcher {
    Matcher::UrlEncoded("bvid".into(), bvid.into())
}

/// 带 5 个分P的视频详情
fn multi_part_view_body(bvid: &str) -> String {
    let pages: Vec<_> = (1..=5)
        .map(|p| {
            json!({
                "page": p,
                "part": format!("{}.KMEANS工作流程P{}", p, p),
                "duration": 600 + p as u64,
                "first_frame": format!("https://i0.hdslb.com/frame{}.jpg", p),
            })
        })
        .collect();
    json!({
        "code": 0, "message": "0",
        "data": {
            "bvid": bvid,
            "title": "机器学习实战课程",
            "pic": "https://i0.hdslb.com/cover.jpg",
            "duration": 3000,
            "pubdate": 1_700_000_000,
            "owner": { "mid": 42, "name": "某UP主" },
            "pages": pages,
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_multi_part_video_expands_from_embedded_pages() {
    // --- 1. Arrange (准备阶段) ---
    let mut server = mockito::Server::new_async().await;
    let bvid = "BV1BZ4y1u7zT";

    // 分P数据已内嵌在详情响应里，应当只有这一次网络调用
    let mock_view = server
        .mock("GET", VIEW_PATH)
        .match_query(bvid_query(bvid))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(multi_part_view_body(bvid))
        .create_async()
        .await;

    let resolver =
        test_support::test_resolver(&server.url(), Arc::new(MemoryCredentials::empty()));

    // --- 2. Act (执行阶段) ---
    let url = format!("https://www.bilibili.com/video/{}?p=3", bvid);
    let result = resolver.resolve(&url, 50).await.expect("解析应当成功");

    // --- 3. Assert (断言阶段) ---
    mock_view.assert_async().await;

    assert_eq!(result.videos.len(), 5, "5个分P应当产出5个条目");
    assert!(!result.truncated);

    let collection = result.collection.expect("应当带有合集引用");
    assert_eq!(collection.collection_type, CollectionType::MultiPart);
    assert_eq!(collection.collection_id, bvid);

    for (i, video) in result.videos.iter().enumerate() {
        assert_eq!(video.video_id, bvid, "分P共享同一个视频ID");
        assert_eq!(video.part_index, Some(i as u32 + 1));
        assert_eq!(video.title, format!("{}.KMEANS工作流程P{}", i + 1, i + 1));
    }
}

#[tokio::test]
async fn test_multi_part_respects_max_videos() {
    let mut server = mockito::Server::new_async().await;
    let bvid = "BV1BZ4y1u7zT";

    server
        .mock("GET", VIEW_PATH)
        .match_query(bvid_query(bvid))
        .with_status(200)
        .with_body(multi_part_view_body(bvid))
        .create_async()
        .await;

    let resolver =
        test_support::test_resolver(&server.url(), Arc::new(MemoryCredentials::empty()));
    let url = format!("https://www.bilibili.com/video/{}", bvid);
    let result = resolver.resolve(&url, 3).await.expect("解析应当成功");

    assert_eq!(result.videos.len(), 3);
    assert!(result.truncated, "分P数量超过上限时应当截断");
}

#[tokio::test]
async fn test_standalone_video_yields_single_descriptor() {
    let mut server = mockito::Server::new_async().await;
    let bvid = "BV1vc411b7Wa";

    // 无 ugc_season、单分P、无 season、标题无系列词
    let view = json!({
        "code": 0, "message": "0",
        "data": {
            "bvid": bvid,
            "title": "一个普通的单发视频",
            "pic": "https://i0.hdslb.com/cover.jpg",
            "duration": 754,
            "pubdate": 1_700_000_000,
            "owner": { "mid": 42, "name": "某UP主" },
            "pages": [ { "page": 1, "part": "正片", "duration": 754 } ],
        }
    });
    server
        .mock("GET", VIEW_PATH)
        .match_query(bvid_query(bvid))
        .with_status(200)
        .with_body(view.to_string())
        .create_async()
        .await;
    // 相关推荐里没有同UP主的兄弟视频
    server
        .mock("GET", VIEW_DETAIL_PATH)
        .match_query(bvid_query(bvid))
        .with_status(200)
        .with_body(
            json!({
                "code": 0, "message": "0",
                "data": {
                    "View": view["data"],
                    "Related": [
                        { "bvid": "BV1other00001", "title": "别人的视频", "owner": { "mid": 999 } }
                    ],
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let resolver =
        test_support::test_resolver(&server.url(), Arc::new(MemoryCredentials::empty()));
    let url = format!("https://www.bilibili.com/video/{}", bvid);
    let result = resolver.resolve(&url, 50).await.expect("解析应当成功");

    assert!(result.collection.is_none(), "独立视频不应带合集引用");
    assert_eq!(result.videos.len(), 1);
    assert_eq!(result.videos[0].video_id, bvid);
    assert_eq!(result.videos[0].title, "一个普通的单发视频");
    assert_eq!(result.videos[0].duration_secs, Some(754));
    assert!(!result.truncated);
}

#[tokio::test]
async fn test_ugc_season_video_expands_whole_season() {
    let mut server = mockito::Server::new_async().await;
    let bvid = "BV1ugc0000001";

    // ugc_season 字段优先于分P数量：两个信号同时存在时按UGC合集处理
    let view = json!({
        "code": 0, "message": "0",
        "data": {
            "bvid": bvid,
            "title": "合集里的某一集",
            "duration": 300,
            "owner": { "mid": 777, "name": "合集作者" },
            "pages": [
                { "page": 1, "part": "上半" },
                { "page": 2, "part": "下半" },
            ],
            "ugc_season": { "id": 999, "title": "年度教学合集" },
        }
    });
    let mock_view = server
        .mock("GET", VIEW_PATH)
        .match_query(bvid_query(bvid))
        .with_status(200)
        .with_body(view.to_string())
        .create_async()
        .await;

    let archives = json!({
        "code": 0, "message": "0",
        "data": {
            "meta": { "name": "年度教学合集", "total": 2 },
            "archives": [
                { "bvid": "BV1ugc0000001", "title": "合集里的某一集", "duration": 300, "pubdate": 1_700_000_000 },
                { "bvid": "BV1ugc0000002", "title": "合集里的另一集", "duration": 320, "pubdate": 1_700_000_100 },
            ],
            "page": { "page_num": 1, "page_size": 20, "total": 2 },
        }
    });
    let mock_archives = server
        .mock("GET", ARCHIVES_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("mid".into(), "777".into()),
            Matcher::UrlEncoded("season_id".into(), "999".into()),
            Matcher::UrlEncoded("page_num".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(archives.to_string())
        .create_async()
        .await;

    let resolver =
        test_support::test_resolver(&server.url(), Arc::new(MemoryCredentials::empty()));
    let url = format!("https://www.bilibili.com/video/{}", bvid);
    let result = resolver.resolve(&url, 50).await.expect("解析应当成功");

    mock_view.assert_async().await;
    mock_archives.assert_async().await;

    let collection = result.collection.expect("应当带有合集引用");
    assert_eq!(collection.collection_type, CollectionType::UgcSeason);
    assert_eq!(collection.collection_id, "999");
    assert_eq!(collection.title.as_deref(), Some("年度教学合集"));
    assert_eq!(result.videos.len(), 2);
    assert!(!result.truncated);
}

#[tokio::test]
async fn test_identical_upstream_gives_identical_results() {
    let mut server = mockito::Server::new_async().await;
    let bvid = "BV1BZ4y1u7zT";

    server
        .mock("GET", VIEW_PATH)
        .match_query(bvid_query(bvid))
        .with_status(200)
        .with_body(multi_part_view_body(bvid))
        .expect(2)
        .create_async()
        .await;

    let resolver =
        test_support::test_resolver(&server.url(), Arc::new(MemoryCredentials::empty()));
    let url = format!("https://www.bilibili.com/video/{}", bvid);

    let first = resolver.resolve(&url, 50).await.expect("第一次解析应当成功");
    let second = resolver.resolve(&url, 50).await.expect("第二次解析应当成功");

    // 相同的上游响应必须产出完全一致的结果
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

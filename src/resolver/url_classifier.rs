// src/resolver/url_classifier.rs

use crate::{
    error::{AppError, AppResult},
    models::{CollectionType, Platform},
};
use regex::Regex;
use std::sync::LazyLock;

static BILI_HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bilibili\.com|b23\.tv").unwrap());
static DOUYIN_HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"douyin\.com|iesdouyin\.com").unwrap());
static YOUTUBE_HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtube\.com|youtu\.be").unwrap());
static KUAISHOU_HOST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"kuaishou\.com").unwrap());

static FAV_FID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"fid=(\d+)").unwrap());
static SID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"sid=(\d+)").unwrap());
static BANGUMI_SS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bangumi/play/ss(\d+)").unwrap());
static BANGUMI_MD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bangumi/media/md(\d+)").unwrap());
static BILI_VIDEO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/video/(BV[0-9A-Za-z]+)").unwrap());
static SPACE_UPLOADS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"space\.bilibili\.com/(\d+)/video").unwrap());
static DOUYIN_VIDEO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/video/(\d+)").unwrap());
static YOUTUBE_VIDEO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|youtu\.be/)([0-9A-Za-z_-]{11})").unwrap());

/// 分类结果：单个视频，或某种合集
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlKind {
    Video { id: String },
    Collection {
        collection_type: CollectionType,
        id: String,
    },
}

fn collection(collection_type: CollectionType, id: impl Into<String>) -> UrlKind {
    UrlKind::Collection {
        collection_type,
        id: id.into(),
    }
}

fn identify_platform(url: &str) -> Option<Platform> {
    if BILI_HOST_RE.is_match(url) {
        Some(Platform::Bilibili)
    } else if DOUYIN_HOST_RE.is_match(url) {
        Some(Platform::Douyin)
    } else if YOUTUBE_HOST_RE.is_match(url) {
        Some(Platform::Youtube)
    } else if KUAISHOU_HOST_RE.is_match(url) {
        Some(Platform::Kuaishou)
    } else {
        None
    }
}

/// 纯函数分类：不发任何网络请求。
/// 模式按固定优先级匹配，特定的合集形态在前，通用的单视频兜底在后。
pub fn classify(raw_url: &str) -> AppResult<(Platform, UrlKind)> {
    let platform = identify_platform(raw_url).ok_or_else(|| AppError::UnsupportedPlatform {
        url: raw_url.to_string(),
    })?;

    let kind = match platform {
        Platform::Bilibili => classify_bilibili(raw_url),
        Platform::Douyin => DOUYIN_VIDEO_RE
            .captures(raw_url)
            .map(|c| UrlKind::Video { id: c[1].to_string() }),
        Platform::Youtube => YOUTUBE_VIDEO_RE
            .captures(raw_url)
            .map(|c| UrlKind::Video { id: c[1].to_string() }),
        // 快手链接形态未接入
        Platform::Kuaishou => None,
    };

    kind.map(|k| (platform, k))
        .ok_or_else(|| AppError::UnsupportedUrlShape {
            platform,
            url: raw_url.to_string(),
        })
}

fn classify_bilibili(url: &str) -> Option<UrlKind> {
    if url.contains("favlist") {
        return FAV_FID_RE
            .captures(url)
            .map(|c| collection(CollectionType::Favorites, &c[1]));
    }
    if url.contains("collectiondetail") {
        return SID_RE
            .captures(url)
            .map(|c| collection(CollectionType::PersonalCollection, &c[1]));
    }
    if url.contains("seriesdetail") {
        return SID_RE
            .captures(url)
            .map(|c| collection(CollectionType::Series, &c[1]));
    }
    if url.contains("watchlater") {
        return Some(collection(CollectionType::WatchLater, "toview"));
    }
    if let Some(caps) = BANGUMI_SS_RE.captures(url) {
        return Some(collection(CollectionType::BangumiSeason, &caps[1]));
    }
    if let Some(caps) = BANGUMI_MD_RE.captures(url) {
        return Some(collection(CollectionType::BangumiMedia, &caps[1]));
    }
    if let Some(caps) = BILI_VIDEO_RE.captures(url) {
        return Some(UrlKind::Video { id: caps[1].to_string() });
    }
    if let Some(caps) = SPACE_UPLOADS_RE.captures(url) {
        return Some(collection(CollectionType::UserUploads, &caps[1]));
    }
    if url.contains("channel/index") {
        return Some(collection(CollectionType::Channel, "index"));
    }
    None
}

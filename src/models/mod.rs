// src/models/mod.rs

pub mod api;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// 支持识别的视频平台
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Bilibili,
    Douyin,
    Youtube,
    Kuaishou,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Bilibili => "bilibili",
            Platform::Douyin => "douyin",
            Platform::Youtube => "youtube",
            Platform::Kuaishou => "kuaishou",
        }
    }

    /// 读取凭证时使用的环境变量名，如 BILIBILI_COOKIE
    pub fn cookie_env_var(&self) -> String {
        format!("{}_COOKIE", self.as_str().to_uppercase())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bilibili" => Ok(Platform::Bilibili),
            "douyin" => Ok(Platform::Douyin),
            "youtube" => Ok(Platform::Youtube),
            "kuaishou" => Ok(Platform::Kuaishou),
            other => Err(format!("未知平台 '{}'", other)),
        }
    }
}

/// 一条链接背后可能指向的合集形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionType {
    Favorites,
    PersonalCollection,
    Series,
    WatchLater,
    BangumiSeason,
    BangumiMedia,
    MultiPart,
    UgcSeason,
    UserUploads,
    Channel,
}

impl CollectionType {
    pub fn label(&self) -> &'static str {
        match self {
            CollectionType::Favorites => "收藏夹",
            CollectionType::PersonalCollection => "个人合集",
            CollectionType::Series => "系列视频",
            CollectionType::WatchLater => "稍后再看",
            CollectionType::BangumiSeason => "番剧系列",
            CollectionType::BangumiMedia => "番剧媒体",
            CollectionType::MultiPart => "多分P视频",
            CollectionType::UgcSeason => "UGC合集",
            CollectionType::UserUploads => "用户投稿",
            CollectionType::Channel => "频道",
        }
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 归一化后的单个视频条目，身份由 (platform, video_id, part_index) 决定。
/// 一经产出即视为不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoDescriptor {
    pub platform: Platform,
    pub video_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pubdate: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_collection_id: Option<String>,
}

impl VideoDescriptor {
    pub fn new(platform: Platform, video_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            platform,
            video_id: video_id.into(),
            title: title.into(),
            cover_url: None,
            duration_secs: None,
            part_index: None,
            pubdate: None,
            source_collection_id: None,
        }
    }

    /// 去重所用的身份键
    pub fn identity_key(&self) -> (Platform, String, Option<u32>) {
        (self.platform, self.video_id.clone(), self.part_index)
    }

    /// 规范化的观看页链接
    pub fn watch_url(&self) -> String {
        match self.platform {
            Platform::Bilibili => match self.part_index {
                Some(p) => format!("https://www.bilibili.com/video/{}?p={}", self.video_id, p),
                None => format!("https://www.bilibili.com/video/{}", self.video_id),
            },
            Platform::Douyin => format!("https://www.douyin.com/video/{}", self.video_id),
            Platform::Youtube => format!("https://www.youtube.com/watch?v={}", self.video_id),
            Platform::Kuaishou => {
                format!("https://www.kuaishou.com/short-video/{}", self.video_id)
            }
        }
    }
}

/// 指向一个合集的引用
#[derive(Debug, Clone, Serialize)]
pub struct CollectionRef {
    pub platform: Platform,
    pub collection_type: CollectionType,
    pub collection_id: String,
    pub requires_auth: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// 适配器返回的一页数据
#[derive(Debug, Clone, Default)]
pub struct FetchPage {
    pub items: Vec<VideoDescriptor>,
    pub next_cursor: Option<u32>,
    pub total_estimate: Option<u64>,
    /// 合集级标题，供归一化阶段回填缺失的条目标题
    pub collection_title: Option<String>,
}

/// 一次解析的最终产物
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionRef>,
    pub videos: Vec<VideoDescriptor>,
    pub truncated: bool,
}

impl ResolutionResult {
    /// 单个独立视频的解析结果
    pub fn single(descriptor: VideoDescriptor) -> Self {
        Self {
            collection: None,
            videos: vec![descriptor],
            truncated: false,
        }
    }
}

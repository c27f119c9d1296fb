// src/models/api.rs

use crate::client::ApiScope;
use crate::constants::api::codes;
use crate::error::{AppError, AppResult};
use serde::Deserialize;

// --- 通用响应信封 ---

/// 大多数 web-interface / x 系接口的外层结构，载荷在 `data` 字段
#[derive(Deserialize, Debug, Clone)]
pub struct BiliResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// pgc (番剧) 系接口的外层结构，载荷在 `result` 字段
#[derive(Deserialize, Debug, Clone)]
pub struct BiliPgcResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub result: Option<T>,
}

/// 业务错误码映射。code 为 0 时返回 None，否则给出对应的类型化错误；
/// 未知错误码按结构异常处理，交由上层决定是否降级。
fn check_code(scope: &ApiScope, code: i64, message: &str) -> Option<AppError> {
    match code {
        codes::OK => None,
        codes::NOT_LOGGED_IN | codes::ACCESS_DENIED => Some(scope.auth_required()),
        codes::NOT_FOUND | codes::VIDEO_GONE => Some(scope.not_found()),
        codes::PRECONDITION | codes::OVERLOADED => Some(scope.rate_limited()),
        other => Some(scope.malformed(format!("code={} message={}", other, message))),
    }
}

impl<T> BiliResponse<T> {
    pub fn into_data(self, scope: &ApiScope) -> AppResult<T> {
        if let Some(err) = check_code(scope, self.code, &self.message) {
            return Err(err);
        }
        self.data
            .ok_or_else(|| scope.malformed("响应缺少 data 字段"))
    }
}

impl<T> BiliPgcResponse<T> {
    pub fn into_result(self, scope: &ApiScope) -> AppResult<T> {
        if let Some(err) = check_code(scope, self.code, &self.message) {
            return Err(err);
        }
        self.result
            .ok_or_else(|| scope.malformed("响应缺少 result 字段"))
    }
}

// --- 视频详情 (x/web-interface/view) ---

#[derive(Deserialize, Debug, Clone)]
pub struct VideoView {
    pub bvid: String,
    pub title: String,
    pub pic: Option<String>,
    pub duration: Option<u64>,
    pub pubdate: Option<i64>,
    pub owner: Option<VideoOwner>,
    #[serde(default)]
    pub pages: Vec<VideoPage>,
    pub ugc_season: Option<UgcSeasonInfo>,
    pub season: Option<SeasonInfo>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct VideoOwner {
    pub mid: u64,
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct VideoPage {
    pub page: u32,
    pub part: String,
    pub duration: Option<u64>,
    pub first_frame: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct UgcSeasonInfo {
    pub id: u64,
    pub title: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SeasonInfo {
    pub season_id: u64,
    pub title: Option<String>,
}

// --- 视频详情扩展 (x/web-interface/view/detail)，含相关推荐 ---

#[derive(Deserialize, Debug, Clone)]
pub struct VideoViewDetail {
    #[serde(rename = "View")]
    pub view: VideoView,
    #[serde(rename = "Related", default)]
    pub related: Vec<RelatedVideo>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RelatedVideo {
    pub bvid: Option<String>,
    pub title: Option<String>,
    pub owner: Option<VideoOwner>,
}

// --- 收藏夹 (x/v3/fav/resource/list) ---

#[derive(Deserialize, Debug, Clone)]
pub struct FavResourceList {
    pub info: Option<FavInfo>,
    #[serde(default)]
    pub medias: Option<Vec<FavMedia>>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FavInfo {
    pub title: Option<String>,
    pub media_count: Option<u64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FavMedia {
    pub bvid: Option<String>,
    pub title: Option<String>,
    pub cover: Option<String>,
    pub duration: Option<u64>,
    pub pubtime: Option<i64>,
}

// --- 合集/系列稿件 (x/polymer/space/seasons_archives_list) ---

#[derive(Deserialize, Debug, Clone)]
pub struct SeasonsArchivesList {
    pub meta: Option<ArchivesMeta>,
    #[serde(default)]
    pub archives: Vec<Archive>,
    pub page: Option<ArchivesPage>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ArchivesMeta {
    pub name: Option<String>,
    pub total: Option<u64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ArchivesPage {
    pub page_num: u32,
    pub page_size: u32,
    pub total: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Archive {
    pub bvid: Option<String>,
    pub title: Option<String>,
    pub pic: Option<String>,
    pub duration: Option<u64>,
    pub pubdate: Option<i64>,
}

// --- 稍后再看 (x/v2/history/toview) ---

#[derive(Deserialize, Debug, Clone)]
pub struct ToViewList {
    pub count: Option<u64>,
    #[serde(default)]
    pub list: Option<Vec<ToViewItem>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ToViewItem {
    pub bvid: Option<String>,
    pub title: Option<String>,
    pub pic: Option<String>,
    pub duration: Option<u64>,
    pub pubdate: Option<i64>,
}

// --- 番剧分节 (pgc/web/season/section) ---

#[derive(Deserialize, Debug, Clone)]
pub struct BangumiSectionResult {
    pub main_section: Option<BangumiSection>,
    #[serde(default)]
    pub section: Option<Vec<BangumiSection>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BangumiSection {
    pub title: Option<String>,
    #[serde(default)]
    pub episodes: Vec<BangumiEpisode>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BangumiEpisode {
    pub bvid: Option<String>,
    pub title: Option<String>,
    pub long_title: Option<String>,
    pub cover: Option<String>,
}

// --- 番剧媒体 (pgc/review/user)，用于 media_id -> season_id ---

#[derive(Deserialize, Debug, Clone)]
pub struct MediaReviewResult {
    pub media: Option<MediaInfo>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MediaInfo {
    pub season_id: Option<u64>,
    pub title: Option<String>,
}

// --- 用户投稿 (x/space/arc/search) ---

#[derive(Deserialize, Debug, Clone)]
pub struct SpaceArcSearch {
    pub list: Option<SpaceArcList>,
    pub page: Option<SpacePage>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SpaceArcList {
    #[serde(default)]
    pub vlist: Vec<SpaceVideo>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SpacePage {
    pub count: u64,
    pub pn: u32,
    pub ps: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SpaceVideo {
    pub bvid: Option<String>,
    pub title: Option<String>,
    pub pic: Option<String>,
    /// 形如 "12:34" 的时长文本
    pub length: Option<String>,
    pub created: Option<i64>,
}

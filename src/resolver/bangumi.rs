// src/resolver/bangumi.rs

use super::CollectionAdapter;
use crate::{
    client::{ApiScope, RobustClient},
    config::AppConfig,
    constants::api::templates,
    error::AppResult,
    models::{
        CollectionType, FetchPage, Platform, VideoDescriptor,
        api::{BangumiSectionResult, BiliPgcResponse, MediaReviewResult},
    },
};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

/// 番剧分节适配器，collection_id 即 season_id。
/// 接口一次性返回全部剧集，不存在游标。
pub struct BangumiSectionAdapter {
    http_client: Arc<RobustClient>,
    _config: Arc<AppConfig>,
}

impl BangumiSectionAdapter {
    pub fn new(http_client: Arc<RobustClient>, config: Arc<AppConfig>) -> Self {
        Self {
            http_client,
            _config: config,
        }
    }
}

#[async_trait]
impl CollectionAdapter for BangumiSectionAdapter {
    async fn fetch_page(
        &self,
        collection_id: &str,
        _cursor: u32,
        credential: Option<&str>,
    ) -> AppResult<FetchPage> {
        let scope = ApiScope::new(
            Platform::Bilibili,
            Some(CollectionType::BangumiSeason),
            collection_id,
        );
        let response: BiliPgcResponse<BangumiSectionResult> = self
            .http_client
            .get_json(
                &scope,
                templates::BANGUMI_SECTION,
                &[("season_id", collection_id)],
                credential,
            )
            .await?;
        let result = response.into_result(&scope)?;

        // 正片在 section 列表里；列表为空时退回 main_section
        let sections = match result.section {
            Some(sections) if !sections.is_empty() => sections,
            _ => result.main_section.into_iter().collect(),
        };

        let mut items = Vec::new();
        for section in sections {
            info!(
                "番剧 '{}' 章节 '{}' 包含 {} 个剧集",
                collection_id,
                section.title.as_deref().unwrap_or("(未命名)"),
                section.episodes.len()
            );
            for episode in section.episodes {
                let (Some(bvid), Some(long_title)) = (episode.bvid, episode.long_title) else {
                    continue;
                };
                let title = format!(
                    "{} {}",
                    episode.title.as_deref().unwrap_or_default(),
                    long_title
                )
                .trim()
                .to_string();
                let mut descriptor = VideoDescriptor::new(Platform::Bilibili, bvid, title);
                descriptor.cover_url = episode.cover;
                items.push(descriptor);
            }
        }

        Ok(FetchPage {
            items,
            next_cursor: None,
            total_estimate: None,
            collection_title: None,
        })
    }
}

/// 番剧媒体页的两阶段解析：先用 media_id 换取 season_id，
/// 再交给分节适配器。第一阶段失败即整体失败，不会进入第二阶段。
pub struct BangumiMediaAdapter {
    http_client: Arc<RobustClient>,
    section: BangumiSectionAdapter,
}

impl BangumiMediaAdapter {
    pub fn new(http_client: Arc<RobustClient>, config: Arc<AppConfig>) -> Self {
        let section = BangumiSectionAdapter::new(http_client.clone(), config);
        Self {
            http_client,
            section,
        }
    }

    async fn resolve_season_id(
        &self,
        media_id: &str,
        credential: Option<&str>,
    ) -> AppResult<u64> {
        let scope = ApiScope::new(
            Platform::Bilibili,
            Some(CollectionType::BangumiMedia),
            media_id,
        );
        let response: BiliPgcResponse<MediaReviewResult> = self
            .http_client
            .get_json(
                &scope,
                templates::BANGUMI_MEDIA,
                &[("media_id", media_id)],
                credential,
            )
            .await?;
        let result = response.into_result(&scope)?;

        result
            .media
            .and_then(|media| media.season_id)
            .ok_or_else(|| scope.malformed("媒体信息缺少 season_id"))
    }
}

#[async_trait]
impl CollectionAdapter for BangumiMediaAdapter {
    async fn fetch_page(
        &self,
        collection_id: &str,
        cursor: u32,
        credential: Option<&str>,
    ) -> AppResult<FetchPage> {
        let season_id = self.resolve_season_id(collection_id, credential).await?;
        info!("番剧媒体 '{}' 对应 season_id {}", collection_id, season_id);
        self.section
            .fetch_page(&season_id.to_string(), cursor, credential)
            .await
    }
}

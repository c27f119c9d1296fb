// src/resolver/space.rs

use super::{CollectionAdapter, heuristics};
use crate::{
    client::{ApiScope, RobustClient},
    config::AppConfig,
    constants::api::templates,
    error::AppResult,
    models::{
        CollectionType, FetchPage, Platform, VideoDescriptor,
        api::{BiliResponse, SpaceArcSearch},
    },
    utils,
};
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

/// 用户投稿 (space arc search) 适配器，collection_id 即UP主 mid。
pub struct UserUploadsAdapter {
    http_client: Arc<RobustClient>,
    config: Arc<AppConfig>,
    collection_type: CollectionType,
}

impl UserUploadsAdapter {
    pub fn new(
        http_client: Arc<RobustClient>,
        config: Arc<AppConfig>,
        collection_type: CollectionType,
    ) -> Self {
        Self {
            http_client,
            config,
            collection_type,
        }
    }
}

#[async_trait]
impl CollectionAdapter for UserUploadsAdapter {
    async fn fetch_page(
        &self,
        collection_id: &str,
        cursor: u32,
        credential: Option<&str>,
    ) -> AppResult<FetchPage> {
        let scope = ApiScope::new(Platform::Bilibili, Some(self.collection_type), collection_id);
        let response: BiliResponse<SpaceArcSearch> = self
            .http_client
            .get_json(
                &scope,
                templates::SPACE_ARC_SEARCH,
                &[
                    ("mid", collection_id),
                    ("pn", &cursor.to_string()),
                    ("ps", &self.config.page_size.to_string()),
                ],
                credential,
            )
            .await?;
        let data = response.into_data(&scope)?;

        let total = data.page.as_ref().map(|p| p.count);
        let vlist = data.list.map(|l| l.vlist).unwrap_or_default();
        info!(
            "用户 '{}' 投稿第 {} 页包含 {} 个视频",
            collection_id,
            cursor,
            vlist.len()
        );

        let items: Vec<VideoDescriptor> = vlist
            .into_iter()
            .filter_map(|video| {
                let mut descriptor = VideoDescriptor::new(
                    Platform::Bilibili,
                    video.bvid?,
                    video.title.unwrap_or_default(),
                );
                descriptor.cover_url = video.pic;
                descriptor.duration_secs =
                    video.length.as_deref().and_then(utils::parse_length_secs);
                descriptor.pubdate = utils::timestamp_to_datetime(video.created);
                Some(descriptor)
            })
            .collect();

        let fetched = u64::from(cursor) * u64::from(self.config.page_size);
        let next_cursor = match total {
            Some(count) if fetched < count && !items.is_empty() => Some(cursor + 1),
            _ => None,
        };

        Ok(FetchPage {
            items,
            next_cursor,
            total_estimate: total,
            collection_title: None,
        })
    }
}

/// 系列兄弟扫描：翻UP主的投稿，只保留与种子标题相似的条目。
/// 这是启发式展开，结果可能偏多也可能偏少。
pub struct SeriesScanAdapter {
    inner: UserUploadsAdapter,
    seed_title: String,
}

impl SeriesScanAdapter {
    pub fn new(
        http_client: Arc<RobustClient>,
        config: Arc<AppConfig>,
        seed_title: impl Into<String>,
    ) -> Self {
        Self {
            inner: UserUploadsAdapter::new(http_client, config, CollectionType::Series),
            seed_title: seed_title.into(),
        }
    }
}

#[async_trait]
impl CollectionAdapter for SeriesScanAdapter {
    async fn fetch_page(
        &self,
        collection_id: &str,
        cursor: u32,
        credential: Option<&str>,
    ) -> AppResult<FetchPage> {
        let mut page = self.inner.fetch_page(collection_id, cursor, credential).await?;

        let before = page.items.len();
        page.items.retain(|item| {
            heuristics::is_series_sibling(&self.seed_title, &item.title)
        });
        for item in &mut page.items {
            item.title = utils::clean_collection_title(&item.title);
        }
        debug!(
            "系列扫描第 {} 页: {} 个投稿中 {} 个与 '{}' 相似",
            cursor,
            before,
            page.items.len(),
            self.seed_title
        );

        // 过滤后的数量不再反映来源总量
        page.total_estimate = None;
        Ok(page)
    }
}

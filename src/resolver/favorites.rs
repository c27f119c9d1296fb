// src/resolver/favorites.rs

use super::CollectionAdapter;
use crate::{
    client::{ApiScope, RobustClient},
    config::AppConfig,
    constants::api::templates,
    error::AppResult,
    models::{
        CollectionType, FetchPage, Platform, VideoDescriptor,
        api::{BiliResponse, FavResourceList},
    },
    utils,
};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

/// 收藏夹 (favlist?fid=) 适配器。私人收藏夹匿名访问时由
/// 接口错误码映射为登录错误，这里不做预判。
pub struct FavoritesAdapter {
    http_client: Arc<RobustClient>,
    config: Arc<AppConfig>,
}

impl FavoritesAdapter {
    pub fn new(http_client: Arc<RobustClient>, config: Arc<AppConfig>) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

#[async_trait]
impl CollectionAdapter for FavoritesAdapter {
    async fn fetch_page(
        &self,
        collection_id: &str,
        cursor: u32,
        credential: Option<&str>,
    ) -> AppResult<FetchPage> {
        let scope = ApiScope::new(
            Platform::Bilibili,
            Some(CollectionType::Favorites),
            collection_id,
        );
        let response: BiliResponse<FavResourceList> = self
            .http_client
            .get_json(
                &scope,
                templates::FAV_RESOURCE_LIST,
                &[
                    ("media_id", collection_id),
                    ("pn", &cursor.to_string()),
                    ("ps", &self.config.page_size.to_string()),
                ],
                credential,
            )
            .await?;
        let data = response.into_data(&scope)?;

        let collection_title = data.info.as_ref().and_then(|i| i.title.clone());
        let total_estimate = data.info.as_ref().and_then(|i| i.media_count);
        let medias = data.medias.unwrap_or_default();
        info!("收藏夹 '{}' 第 {} 页包含 {} 个条目", collection_id, cursor, medias.len());

        let items = medias
            .into_iter()
            .filter_map(|media| {
                let mut descriptor = VideoDescriptor::new(
                    Platform::Bilibili,
                    media.bvid?,
                    media.title.unwrap_or_default(),
                );
                descriptor.cover_url = media.cover;
                descriptor.duration_secs = media.duration;
                descriptor.pubdate = utils::timestamp_to_datetime(media.pubtime);
                Some(descriptor)
            })
            .collect();

        Ok(FetchPage {
            items,
            next_cursor: data.has_more.then(|| cursor + 1),
            total_estimate,
            collection_title,
        })
    }
}

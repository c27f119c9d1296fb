// src/resolver/watch_later.rs

use super::CollectionAdapter;
use crate::{
    client::{ApiScope, RobustClient},
    config::AppConfig,
    constants::api::templates,
    error::AppResult,
    models::{
        CollectionType, FetchPage, Platform, VideoDescriptor,
        api::{BiliResponse, ToViewList},
    },
    utils,
};
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

/// 稍后再看适配器。该列表与账号绑定，匿名请求注定失败，
/// 没有凭证时直接报登录错误，不发起无谓的网络调用。
pub struct WatchLaterAdapter {
    http_client: Arc<RobustClient>,
    config: Arc<AppConfig>,
}

impl WatchLaterAdapter {
    pub fn new(http_client: Arc<RobustClient>, config: Arc<AppConfig>) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

#[async_trait]
impl CollectionAdapter for WatchLaterAdapter {
    async fn fetch_page(
        &self,
        collection_id: &str,
        cursor: u32,
        credential: Option<&str>,
    ) -> AppResult<FetchPage> {
        let scope = ApiScope::new(
            Platform::Bilibili,
            Some(CollectionType::WatchLater),
            collection_id,
        );
        if credential.is_none() {
            warn!("稍后再看需要登录，但没有可用的 Cookie");
            return Err(scope.auth_required());
        }

        let response: BiliResponse<ToViewList> = self
            .http_client
            .get_json(
                &scope,
                templates::WATCH_LATER,
                &[
                    ("pn", &cursor.to_string()),
                    ("ps", &self.config.page_size.to_string()),
                ],
                credential,
            )
            .await?;
        let data = response.into_data(&scope)?;

        let total = data.count;
        let list = data.list.unwrap_or_default();
        info!("稍后再看第 {} 页包含 {} 个视频", cursor, list.len());

        let items: Vec<VideoDescriptor> = list
            .into_iter()
            .filter_map(|item| {
                let mut descriptor = VideoDescriptor::new(
                    Platform::Bilibili,
                    item.bvid?,
                    item.title.unwrap_or_default(),
                );
                descriptor.cover_url = item.pic;
                descriptor.duration_secs = item.duration;
                descriptor.pubdate = utils::timestamp_to_datetime(item.pubdate);
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
            collection_title: Some("稍后再看".to_string()),
        })
    }
}

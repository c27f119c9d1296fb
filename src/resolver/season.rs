// src/resolver/season.rs

use super::CollectionAdapter;
use crate::{
    client::{ApiScope, RobustClient},
    config::AppConfig,
    constants::api::templates,
    error::AppResult,
    models::{
        CollectionType, FetchPage, Platform, VideoDescriptor,
        api::{BiliResponse, SeasonsArchivesList},
    },
    utils,
};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

/// 合集/系列稿件 (seasons_archives_list) 适配器。
/// 个人合集与系列视频从链接携带的 sid 出发 (此时 mid 填 0 即可)，
/// UGC合集从视频探测结果出发并携带UP主 mid。
pub struct SeasonArchivesAdapter {
    http_client: Arc<RobustClient>,
    config: Arc<AppConfig>,
    mid: u64,
    collection_type: CollectionType,
}

impl SeasonArchivesAdapter {
    pub fn new(
        http_client: Arc<RobustClient>,
        config: Arc<AppConfig>,
        mid: u64,
        collection_type: CollectionType,
    ) -> Self {
        Self {
            http_client,
            config,
            mid,
            collection_type,
        }
    }
}

#[async_trait]
impl CollectionAdapter for SeasonArchivesAdapter {
    async fn fetch_page(
        &self,
        collection_id: &str,
        cursor: u32,
        credential: Option<&str>,
    ) -> AppResult<FetchPage> {
        let scope = ApiScope::new(Platform::Bilibili, Some(self.collection_type), collection_id);
        let response: BiliResponse<SeasonsArchivesList> = self
            .http_client
            .get_json(
                &scope,
                templates::SEASONS_ARCHIVES,
                &[
                    ("mid", &self.mid.to_string()),
                    ("season_id", collection_id),
                    ("pn", &cursor.to_string()),
                    ("ps", &self.config.page_size.to_string()),
                ],
                credential,
            )
            .await?;
        let data = response.into_data(&scope)?;

        let collection_title = data.meta.as_ref().and_then(|m| m.name.clone());
        let page = data.page;
        info!(
            "{} '{}' 第 {} 页包含 {} 个稿件",
            self.collection_type,
            collection_id,
            cursor,
            data.archives.len()
        );

        // UGC合集条目常把合集名抄进每集标题，展示前剥掉
        let clean_titles = self.collection_type == CollectionType::UgcSeason;
        let items = data
            .archives
            .into_iter()
            .filter_map(|archive| {
                let title = archive.title.unwrap_or_default();
                let title = if clean_titles {
                    utils::clean_collection_title(&title)
                } else {
                    title
                };
                let mut descriptor =
                    VideoDescriptor::new(Platform::Bilibili, archive.bvid?, title);
                descriptor.cover_url = archive.pic;
                descriptor.duration_secs = archive.duration;
                descriptor.pubdate = utils::timestamp_to_datetime(archive.pubdate);
                Some(descriptor)
            })
            .collect();

        let (next_cursor, total_estimate) = match page {
            Some(p) => {
                let fetched = u64::from(p.page_num) * u64::from(p.page_size);
                (
                    (fetched < p.total).then(|| cursor + 1),
                    Some(p.total),
                )
            }
            None => (None, data.meta.as_ref().and_then(|m| m.total)),
        };

        Ok(FetchPage {
            items,
            next_cursor,
            total_estimate,
            collection_title,
        })
    }
}

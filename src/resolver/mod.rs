// src/resolver/mod.rs

pub mod bangumi;
pub mod dedup;
pub mod favorites;
pub mod heuristics;
pub mod paginate;
pub mod probe;
pub mod season;
pub mod space;
pub mod url_classifier;
pub mod watch_later;

use self::{
    bangumi::{BangumiMediaAdapter, BangumiSectionAdapter},
    favorites::FavoritesAdapter,
    probe::{ProbeOutcome, VideoProbe},
    season::SeasonArchivesAdapter,
    space::SeriesScanAdapter,
    url_classifier::UrlKind,
    watch_later::WatchLaterAdapter,
};
use crate::{
    client::RobustClient,
    config::{AppConfig, cookie::CredentialProvider},
    error::{AppError, AppResult},
    models::{
        CollectionRef, CollectionType, FetchPage, Platform, ResolutionResult, VideoDescriptor,
        api::VideoView,
    },
    utils,
};
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

/// 合集适配器契约：给定合集ID与游标拉取一页。
/// 游标从 1 开始；凭证存在时附带，缺失时绝不伪造。
#[async_trait]
pub trait CollectionAdapter: Send + Sync {
    async fn fetch_page(
        &self,
        collection_id: &str,
        cursor: u32,
        credential: Option<&str>,
    ) -> AppResult<FetchPage>;
}

/// 解析管线入口。无跨请求状态，同一实例可被并发调用。
pub struct UrlResolver {
    http_client: Arc<RobustClient>,
    config: Arc<AppConfig>,
    credentials: Arc<dyn CredentialProvider>,
}

impl UrlResolver {
    pub fn new(
        http_client: Arc<RobustClient>,
        config: Arc<AppConfig>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            http_client,
            config,
            credentials,
        }
    }

    /// 把一条链接解析为有序、去重、受上限约束的视频列表。
    pub async fn resolve(&self, raw_url: &str, max_videos: usize) -> AppResult<ResolutionResult> {
        let max_videos = max_videos.max(1);
        let (platform, kind) = url_classifier::classify(raw_url)?;
        info!("链接分类: platform={} kind={:?}", platform, kind);

        // 凭证每次解析只读取一次，翻页期间不再重取
        let credential = self.credentials.get(platform);

        match kind {
            UrlKind::Collection {
                collection_type,
                id,
            } => {
                self.resolve_collection(
                    platform,
                    collection_type,
                    id,
                    credential.as_deref(),
                    max_videos,
                    raw_url,
                )
                .await
            }
            UrlKind::Video { id } => match platform {
                Platform::Bilibili => {
                    self.resolve_bilibili_video(&id, credential.as_deref(), max_videos)
                        .await
                }
                // 兄弟平台没有接入元数据接口，直接给出占位描述符，
                // 标题留给下游管线补全
                other => Ok(ResolutionResult::single(VideoDescriptor::new(
                    other,
                    id.clone(),
                    id,
                ))),
            },
        }
    }

    async fn resolve_collection(
        &self,
        platform: Platform,
        collection_type: CollectionType,
        collection_id: String,
        credential: Option<&str>,
        max_videos: usize,
        raw_url: &str,
    ) -> AppResult<ResolutionResult> {
        let collection = CollectionRef {
            platform,
            collection_type,
            collection_id,
            requires_auth: collection_type == CollectionType::WatchLater,
            title: None,
        };

        if collection.requires_auth && credential.is_none() {
            warn!("{} 必须登录才能访问，且当前没有 Cookie", collection_type);
            return Err(AppError::AuthRequired { platform });
        }

        let adapter: Box<dyn CollectionAdapter> = match collection_type {
            CollectionType::Favorites => Box::new(FavoritesAdapter::new(
                self.http_client.clone(),
                self.config.clone(),
            )),
            CollectionType::PersonalCollection | CollectionType::Series => {
                // 链接只携带 sid，接口允许 mid 填 0
                Box::new(SeasonArchivesAdapter::new(
                    self.http_client.clone(),
                    self.config.clone(),
                    0,
                    collection_type,
                ))
            }
            CollectionType::WatchLater => Box::new(WatchLaterAdapter::new(
                self.http_client.clone(),
                self.config.clone(),
            )),
            CollectionType::BangumiSeason => Box::new(BangumiSectionAdapter::new(
                self.http_client.clone(),
                self.config.clone(),
            )),
            CollectionType::BangumiMedia => Box::new(BangumiMediaAdapter::new(
                self.http_client.clone(),
                self.config.clone(),
            )),
            CollectionType::UserUploads => Box::new(space::UserUploadsAdapter::new(
                self.http_client.clone(),
                self.config.clone(),
                CollectionType::UserUploads,
            )),
            // 频道首页没有对应的列表接口；多分P/UGC合集只会由视频探测产生
            CollectionType::Channel
            | CollectionType::MultiPart
            | CollectionType::UgcSeason => {
                return Err(AppError::UnsupportedUrlShape {
                    platform,
                    url: raw_url.to_string(),
                });
            }
        };

        paginate::drive(
            adapter.as_ref(),
            &collection,
            credential,
            max_videos,
            self.config.max_page_calls,
        )
        .await
    }

    async fn resolve_bilibili_video(
        &self,
        bvid: &str,
        credential: Option<&str>,
        max_videos: usize,
    ) -> AppResult<ResolutionResult> {
        let probe = VideoProbe::new(self.http_client.clone(), self.config.clone());
        match probe.classify(bvid, credential).await? {
            ProbeOutcome::UgcSeason {
                mid,
                season_id,
                title,
            } => {
                let collection = CollectionRef {
                    platform: Platform::Bilibili,
                    collection_type: CollectionType::UgcSeason,
                    collection_id: season_id.to_string(),
                    requires_auth: false,
                    title,
                };
                let adapter = SeasonArchivesAdapter::new(
                    self.http_client.clone(),
                    self.config.clone(),
                    mid,
                    CollectionType::UgcSeason,
                );
                paginate::drive(
                    &adapter,
                    &collection,
                    credential,
                    max_videos,
                    self.config.max_page_calls,
                )
                .await
            }
            ProbeOutcome::MultiPart { view } => Ok(multi_part_result(view, max_videos)),
            ProbeOutcome::BangumiSeason { season_id, title } => {
                let collection = CollectionRef {
                    platform: Platform::Bilibili,
                    collection_type: CollectionType::BangumiSeason,
                    collection_id: season_id.to_string(),
                    requires_auth: false,
                    title,
                };
                let adapter =
                    BangumiSectionAdapter::new(self.http_client.clone(), self.config.clone());
                paginate::drive(
                    &adapter,
                    &collection,
                    credential,
                    max_videos,
                    self.config.max_page_calls,
                )
                .await
            }
            ProbeOutcome::Series { view, confident } => {
                let mid = view.owner.as_ref().map(|o| o.mid).unwrap_or(0);
                let collection = CollectionRef {
                    platform: Platform::Bilibili,
                    collection_type: CollectionType::Series,
                    collection_id: mid.to_string(),
                    requires_auth: false,
                    title: None,
                };
                let adapter = SeriesScanAdapter::new(
                    self.http_client.clone(),
                    self.config.clone(),
                    view.title.clone(),
                );
                let result = paginate::drive(
                    &adapter,
                    &collection,
                    credential,
                    max_videos,
                    self.config.max_page_calls,
                )
                .await?;

                // 扫不出兄弟视频就退回单视频，不给调用方一个只有自己的"系列"
                if result.videos.len() <= 1 {
                    info!(
                        "系列扫描只得到 {} 个视频 (confident={})，按单视频返回",
                        result.videos.len(),
                        confident
                    );
                    return Ok(ResolutionResult::single(descriptor_from_view(&view)));
                }
                Ok(result)
            }
            ProbeOutcome::Standalone { view } => {
                Ok(ResolutionResult::single(descriptor_from_view(&view)))
            }
        }
    }
}

fn descriptor_from_view(view: &VideoView) -> VideoDescriptor {
    let mut descriptor =
        VideoDescriptor::new(Platform::Bilibili, view.bvid.clone(), view.title.clone());
    descriptor.cover_url = view.pic.clone();
    descriptor.duration_secs = view.duration;
    descriptor.pubdate = utils::timestamp_to_datetime(view.pubdate);
    descriptor
}

/// 多分P稿件直接用详情里内嵌的分P列表展开，不再发起请求
fn multi_part_result(view: VideoView, max_videos: usize) -> ResolutionResult {
    let total_parts = view.pages.len();
    let truncated = total_parts > max_videos;

    let videos: Vec<VideoDescriptor> = view
        .pages
        .iter()
        .take(max_videos)
        .map(|page| {
            let title = if page.part.trim().is_empty() {
                format!("{} P{}", view.title, page.page)
            } else {
                page.part.trim().to_string()
            };
            let mut descriptor =
                VideoDescriptor::new(Platform::Bilibili, view.bvid.clone(), title);
            descriptor.part_index = Some(page.page);
            descriptor.duration_secs = page.duration;
            descriptor.cover_url = page.first_frame.clone().or_else(|| view.pic.clone());
            descriptor.source_collection_id = Some(view.bvid.clone());
            descriptor
        })
        .collect();

    ResolutionResult {
        collection: Some(CollectionRef {
            platform: Platform::Bilibili,
            collection_type: CollectionType::MultiPart,
            collection_id: view.bvid.clone(),
            requires_auth: false,
            title: Some(view.title.clone()),
        }),
        videos,
        truncated,
    }
}

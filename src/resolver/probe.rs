// src/resolver/probe.rs

use super::heuristics;
use crate::{
    client::{ApiScope, RobustClient},
    config::AppConfig,
    constants,
    constants::api::templates,
    error::AppResult,
    models::{
        Platform,
        api::{BiliResponse, VideoView, VideoViewDetail},
    },
};
use log::{debug, info};
use std::sync::Arc;

/// 单视频探测的结论。各变体按固定优先级产生，信号冲突时先命中者胜。
#[derive(Debug)]
pub enum ProbeOutcome {
    /// 视频挂在UP主创建的合集下
    UgcSeason {
        mid: u64,
        season_id: u64,
        title: Option<String>,
    },
    /// 多分P稿件，分P数据已随详情返回，无需再发请求
    MultiPart { view: VideoView },
    /// 视频属于番剧/影视季
    BangumiSeason {
        season_id: u64,
        title: Option<String>,
    },
    /// 标题或相关推荐提示这是系列中的一集 (启发式，置信度有限)
    Series { view: VideoView, confident: bool },
    /// 独立视频
    Standalone { view: VideoView },
}

/// 对"看起来是单视频"的链接做一次详情探测，
/// 判断它是否其实挂在某个更大的结构之下。
pub struct VideoProbe {
    http_client: Arc<RobustClient>,
    _config: Arc<AppConfig>,
}

impl VideoProbe {
    pub fn new(http_client: Arc<RobustClient>, config: Arc<AppConfig>) -> Self {
        Self {
            http_client,
            _config: config,
        }
    }

    pub async fn classify(
        &self,
        bvid: &str,
        credential: Option<&str>,
    ) -> AppResult<ProbeOutcome> {
        let scope = ApiScope::video(Platform::Bilibili, bvid);
        let response: BiliResponse<VideoView> = self
            .http_client
            .get_json(&scope, templates::VIDEO_VIEW, &[("bvid", bvid)], credential)
            .await?;
        let view = response.into_data(&scope)?;
        info!("视频 '{}' 详情获取成功: {}", bvid, view.title);

        // 1. UGC合集字段
        if let Some(season) = &view.ugc_season {
            let mid = view.owner.as_ref().map(|o| o.mid).unwrap_or(0);
            info!(
                "视频 '{}' 属于UGC合集 '{}' (ID: {})",
                bvid,
                season.title.as_deref().unwrap_or("(无标题)"),
                season.id
            );
            return Ok(ProbeOutcome::UgcSeason {
                mid,
                season_id: season.id,
                title: season.title.clone(),
            });
        }

        // 2. 多分P
        if view.pages.len() > 1 {
            info!("视频 '{}' 有 {} 个分P", bvid, view.pages.len());
            return Ok(ProbeOutcome::MultiPart { view });
        }

        // 3. 番剧季字段
        if let Some(season) = &view.season {
            info!(
                "视频 '{}' 属于番剧 '{}' (Season ID: {})",
                bvid,
                season.title.as_deref().unwrap_or("(无标题)"),
                season.season_id
            );
            return Ok(ProbeOutcome::BangumiSeason {
                season_id: season.season_id,
                title: season.title.clone(),
            });
        }

        // 4. 标题关键词
        if view.owner.is_some() && heuristics::title_has_series_keyword(&view.title) {
            info!("视频 '{}' 标题含系列关键词，按系列处理", bvid);
            return Ok(ProbeOutcome::Series {
                view,
                confident: true,
            });
        }

        // 5. 相关推荐中的同UP主视频 (尽力而为，失败不影响结论)
        if let Some(owner_mid) = view.owner.as_ref().map(|o| o.mid) {
            match self.count_same_owner_related(bvid, owner_mid, credential).await {
                Ok(count) if count >= constants::MIN_RELATED_FOR_SERIES => {
                    info!(
                        "视频 '{}' 相关推荐中有 {} 个同UP主视频，按低置信度系列处理",
                        bvid, count
                    );
                    return Ok(ProbeOutcome::Series {
                        view,
                        confident: false,
                    });
                }
                Ok(count) => debug!("视频 '{}' 同UP主相关推荐 {} 个，不足以判定系列", bvid, count),
                Err(err) => debug!("获取 '{}' 相关推荐失败，忽略该信号: {}", bvid, err),
            }
        }

        Ok(ProbeOutcome::Standalone { view })
    }

    async fn count_same_owner_related(
        &self,
        bvid: &str,
        owner_mid: u64,
        credential: Option<&str>,
    ) -> AppResult<usize> {
        let scope = ApiScope::video(Platform::Bilibili, bvid);
        let response: BiliResponse<VideoViewDetail> = self
            .http_client
            .get_json(
                &scope,
                templates::VIDEO_VIEW_DETAIL,
                &[("bvid", bvid)],
                credential,
            )
            .await?;
        let detail = response.into_data(&scope)?;

        Ok(detail
            .related
            .iter()
            .filter(|related| {
                related.bvid.is_some()
                    && related.owner.as_ref().is_some_and(|o| o.mid == owner_mid)
            })
            .count())
    }
}

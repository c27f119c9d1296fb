// src/config.rs

pub mod cookie;

use crate::constants;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::Duration};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub page_size: Option<u32>,
}

/// 磁盘上的配置文件结构 (~/.bili-ls/config.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalConfig {
    /// 平台名 -> 浏览器 Cookie，由外部登录流程获得后经 --set-cookie 写入
    #[serde(default)]
    pub cookies: HashMap<String, String>,
    #[serde(default)]
    pub network: NetworkConfig,
    pub url_templates: HashMap<String, String>,
}

impl ExternalConfig {
    pub(crate) fn default_app_config() -> Self {
        let url_templates = HashMap::from([
            (
                constants::api::templates::VIDEO_VIEW.into(),
                "https://api.bilibili.com/x/web-interface/view?bvid={bvid}".into(),
            ),
            (
                constants::api::templates::VIDEO_VIEW_DETAIL.into(),
                "https://api.bilibili.com/x/web-interface/view/detail?bvid={bvid}".into(),
            ),
            (
                constants::api::templates::FAV_RESOURCE_LIST.into(),
                "https://api.bilibili.com/x/v3/fav/resource/list?media_id={media_id}&pn={pn}&ps={ps}".into(),
            ),
            (
                constants::api::templates::SEASONS_ARCHIVES.into(),
                "https://api.bilibili.com/x/polymer/space/seasons_archives_list?mid={mid}&season_id={season_id}&sort_reverse=false&page_num={pn}&page_size={ps}".into(),
            ),
            (
                constants::api::templates::WATCH_LATER.into(),
                "https://api.bilibili.com/x/v2/history/toview?pn={pn}&ps={ps}".into(),
            ),
            (
                constants::api::templates::BANGUMI_SECTION.into(),
                "https://api.bilibili.com/pgc/web/season/section?season_id={season_id}".into(),
            ),
            (
                constants::api::templates::BANGUMI_MEDIA.into(),
                "https://api.bilibili.com/pgc/review/user?media_id={media_id}".into(),
            ),
            (
                constants::api::templates::SPACE_ARC_SEARCH.into(),
                "https://api.bilibili.com/x/space/arc/search?mid={mid}&ps={ps}&pn={pn}&order=pubdate".into(),
            ),
        ]);

        let network = NetworkConfig {
            connect_timeout_secs: Some(10),
            timeout_secs: Some(30),
            page_size: Some(constants::DEFAULT_PAGE_SIZE),
        };

        Self {
            cookies: HashMap::new(),
            network,
            url_templates,
        }
    }
}

/// 运行期配置，由配置文件与命令行参数合成
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub user_agent: String,
    pub referer: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub page_size: u32,
    pub max_page_calls: u32,
    pub url_templates: HashMap<String, String>,
}

impl AppConfig {
    pub(crate) fn from_external(external: &ExternalConfig) -> Self {
        Self {
            user_agent: constants::USER_AGENT.into(),
            referer: constants::BILI_REFERER.into(),
            connect_timeout: Duration::from_secs(
                external.network.connect_timeout_secs.unwrap_or(10),
            ),
            timeout: Duration::from_secs(external.network.timeout_secs.unwrap_or(30)),
            page_size: external
                .network
                .page_size
                .unwrap_or(constants::DEFAULT_PAGE_SIZE),
            max_page_calls: constants::MAX_PAGE_CALLS,
            url_templates: external.url_templates.clone(),
        }
    }

    pub fn template(&self, key: &str) -> Option<&str> {
        self.url_templates.get(key).map(String::as_str)
    }
}

#[cfg(feature = "testing")]
impl Default for AppConfig {
    fn default() -> Self {
        Self::from_external(&ExternalConfig::default_app_config())
    }
}

// src/client.rs

use crate::{
    config::AppConfig,
    error::*,
    models::{CollectionType, Platform},
};
use anyhow::anyhow;
use log::trace;
use reqwest::{StatusCode, header};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// 一次API调用的上下文，错误构造时携带平台/合集类型/目标ID
#[derive(Debug, Clone)]
pub struct ApiScope {
    pub platform: Platform,
    pub collection_type: Option<CollectionType>,
    pub id: String,
}

impl ApiScope {
    pub fn new(
        platform: Platform,
        collection_type: Option<CollectionType>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            collection_type,
            id: id.into(),
        }
    }

    pub fn video(platform: Platform, id: impl Into<String>) -> Self {
        Self::new(platform, None, id)
    }

    pub fn auth_required(&self) -> AppError {
        AppError::AuthRequired {
            platform: self.platform,
        }
    }

    pub fn not_found(&self) -> AppError {
        AppError::NotFound {
            platform: self.platform,
            collection_type: self.collection_type,
            id: self.id.clone(),
        }
    }

    pub fn rate_limited(&self) -> AppError {
        AppError::RateLimited {
            platform: self.platform,
            collection_type: self.collection_type,
            id: self.id.clone(),
        }
    }

    pub fn timeout(&self) -> AppError {
        AppError::Timeout {
            platform: self.platform,
            id: self.id.clone(),
        }
    }

    pub fn malformed(&self, detail: impl Into<String>) -> AppError {
        AppError::UpstreamMalformed {
            platform: self.platform,
            collection_type: self.collection_type,
            id: self.id.clone(),
            detail: detail.into(),
        }
    }
}

#[derive(Clone)]
pub struct RobustClient {
    client: reqwest::Client,
    config: Arc<AppConfig>,
}

impl RobustClient {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// 展开URL模板并请求JSON。凭证存在时作为 Cookie 头附带，绝不伪造；
    /// HTTP 层错误在此处映射为类型化错误，响应体结构异常映射为 malformed。
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        scope: &ApiScope,
        template_key: &str,
        params: &[(&str, &str)],
        credential: Option<&str>,
    ) -> AppResult<T> {
        let template = self
            .config
            .template(template_key)
            .ok_or_else(|| AppError::Other(anyhow!("缺少URL模板 '{}'", template_key)))?;

        let mut url = template.to_string();
        for (key, val) in params {
            url = url.replace(&format!("{{{}}}", key), val);
        }
        trace!("GET {}", url);

        let mut request = self
            .client
            .get(&url)
            .header(header::REFERER, &self.config.referer);
        if let Some(cookie) = credential {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                scope.timeout()
            } else {
                AppError::Network(e)
            }
        })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(scope.auth_required());
            }
            StatusCode::NOT_FOUND => return Err(scope.not_found()),
            StatusCode::PRECONDITION_FAILED | StatusCode::TOO_MANY_REQUESTS => {
                return Err(scope.rate_limited());
            }
            _ => {}
        }
        let response = response.error_for_status()?;

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                scope.timeout()
            } else {
                AppError::Network(e)
            }
        })?;
        serde_json::from_str(&body).map_err(|e| scope.malformed(e.to_string()))
    }
}

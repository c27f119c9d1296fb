// src/error.rs

use crate::models::{CollectionType, Platform};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("无法识别的平台: {url}")]
    UnsupportedPlatform { url: String },
    #[error("{platform} 平台不支持的链接形态: {url}")]
    UnsupportedUrlShape { platform: Platform, url: String },
    #[error("访问 {platform} 内容需要登录 (Cookie 缺失或已失效)")]
    AuthRequired { platform: Platform },
    #[error("资源不存在 (链接或ID错误): {id}")]
    NotFound {
        platform: Platform,
        collection_type: Option<CollectionType>,
        id: String,
    },
    #[error("{platform} 接口限流 (ID: {id})，请稍后重试")]
    RateLimited {
        platform: Platform,
        collection_type: Option<CollectionType>,
        id: String,
    },
    #[error("{platform} 请求超时 (ID: {id})，请稍后重试")]
    Timeout { platform: Platform, id: String },
    #[error("{platform} 接口返回了无法识别的数据 (ID: {id}): {detail}")]
    UpstreamMalformed {
        platform: Platform,
        collection_type: Option<CollectionType>,
        id: String,
        detail: String,
    },
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL 解析错误: {0}")]
    Url(#[from] url::ParseError),
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("用户中断")]
    UserInterrupt,
    #[error("{0}")] // 只打印内部信息，不加任何前缀
    UserInputError(String),
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// 该错误是否值得调用方稍后原样重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::RateLimited { .. } | AppError::Timeout { .. })
    }
}

pub type AppResult<T> = Result<T, AppError>;

// src/config/cookie.rs

use crate::{
    config::ExternalConfig,
    constants,
    error::{AppError, AppResult},
    models::Platform,
};
use anyhow::{Context, anyhow};
use log::{debug, info};
use std::{collections::HashMap, fs, path::PathBuf};

pub(super) fn get_config_path() -> AppResult<PathBuf> {
    let path = dirs::home_dir()
        .ok_or_else(|| AppError::Other(anyhow!("无法获取用户主目录")))?
        .join(constants::CONFIG_DIR_NAME)
        .join(constants::CONFIG_FILE_NAME);
    Ok(path)
}

pub(crate) fn load_or_create_external_config() -> AppResult<ExternalConfig> {
    let config_path = get_config_path()?;
    if config_path.is_file() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("读取配置文件 '{}' 失败", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件 '{}' 失败", config_path.display()))
            .map_err(AppError::from)
    } else {
        info!("配置文件 {:?} 不存在，将创建默认配置。", config_path);
        let config = ExternalConfig::default_app_config();

        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }

        let json_content = serde_json::to_string_pretty(&config)?;
        fs::write(&config_path, json_content)?;

        Ok(config)
    }
}

/// 将外部登录流程获得的 Cookie 写入配置文件
pub fn save_cookie(platform: Platform, cookie: &str) -> AppResult<()> {
    if cookie.is_empty() {
        return Ok(());
    }

    let config_path = get_config_path()?;
    let mut config = load_or_create_external_config()?;

    config
        .cookies
        .insert(platform.as_str().to_string(), cookie.to_string());

    let json_content = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, json_content)
        .with_context(|| format!("保存Cookie到 '{}' 失败", config_path.display()))?;

    info!(
        "已保存 {} 的 Cookie (长度 {}) 至 {}",
        platform,
        cookie.len(),
        config_path.display()
    );
    Ok(())
}

/// 从配置文件删除某平台的 Cookie；返回是否确有删除
pub fn delete_cookie(platform: Platform) -> AppResult<bool> {
    let config_path = get_config_path()?;
    let mut config = load_or_create_external_config()?;

    let removed = config.cookies.remove(platform.as_str()).is_some();
    if removed {
        let json_content = serde_json::to_string_pretty(&config)?;
        fs::write(&config_path, json_content)?;
        info!("已删除 {} 的 Cookie", platform);
    }
    Ok(removed)
}

/// 会话凭证提供方。解析器在每次解析开始时恰好读取一次，
/// 之后全程只读；这也是单元测试注入假凭证的接口。
pub trait CredentialProvider: Send + Sync {
    fn get(&self, platform: Platform) -> Option<String>;
}

/// 生产环境的凭证链: 命令行参数 > 环境变量 > 配置文件
pub struct CookieStore {
    cli_override: Option<String>,
    cookies: HashMap<String, String>,
}

impl CookieStore {
    pub fn new(external: &ExternalConfig, cli_override: Option<String>) -> Self {
        Self {
            cli_override,
            cookies: external.cookies.clone(),
        }
    }
}

impl CredentialProvider for CookieStore {
    fn get(&self, platform: Platform) -> Option<String> {
        if let Some(cookie) = &self.cli_override
            && !cookie.is_empty()
        {
            debug!("使用来自命令行参数的 {} Cookie", platform);
            return Some(cookie.clone());
        }
        if let Ok(cookie) = std::env::var(platform.cookie_env_var())
            && !cookie.is_empty()
        {
            debug!("使用来自环境变量 {} 的 Cookie", platform.cookie_env_var());
            return Some(cookie);
        }
        if let Some(cookie) = self.cookies.get(platform.as_str())
            && !cookie.is_empty()
        {
            debug!("使用来自本地配置文件的 {} Cookie", platform);
            return Some(cookie.clone());
        }
        debug!("{} 没有可用的 Cookie", platform);
        None
    }
}

/// 固定内容的凭证表，用于测试注入
pub struct MemoryCredentials {
    cookies: HashMap<Platform, String>,
}

impl MemoryCredentials {
    pub fn empty() -> Self {
        Self {
            cookies: HashMap::new(),
        }
    }

    pub fn with(platform: Platform, cookie: impl Into<String>) -> Self {
        let mut cookies = HashMap::new();
        cookies.insert(platform, cookie.into());
        Self { cookies }
    }
}

impl CredentialProvider for MemoryCredentials {
    fn get(&self, platform: Platform) -> Option<String> {
        self.cookies.get(&platform).cloned()
    }
}

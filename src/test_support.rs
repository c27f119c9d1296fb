// src/test_support.rs
//
// 仅在启用 `testing` feature 时编译，供集成测试把
// 各端点模板指向模拟服务器。

use crate::{
    client::RobustClient,
    config::{AppConfig, ExternalConfig, cookie::CredentialProvider},
    resolver::UrlResolver,
};
use std::sync::Arc;

/// 生成把所有端点指向 `base_url` 的配置
pub fn test_config(base_url: &str) -> AppConfig {
    let mut external = ExternalConfig::default_app_config();
    for template in external.url_templates.values_mut() {
        *template = template.replace("https://api.bilibili.com", base_url);
    }
    AppConfig::from_external(&external)
}

/// 组装一个指向模拟服务器的解析器
pub fn test_resolver(base_url: &str, credentials: Arc<dyn CredentialProvider>) -> UrlResolver {
    let config = Arc::new(test_config(base_url));
    let http_client =
        Arc::new(RobustClient::new(config.clone()).expect("构建测试 HTTP 客户端失败"));
    UrlResolver::new(http_client, config, credentials)
}

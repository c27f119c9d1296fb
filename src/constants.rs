// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const TITLE_TRUNCATE_WIDTH: usize = 56;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = concat!(clap::crate_name!(), ".log");
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";

pub const DEFAULT_MAX_VIDEOS: usize = 50;
/// 单次解析允许的最大翻页次数，防止游标异常导致的死循环
pub const MAX_PAGE_CALLS: u32 = 25;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const BILI_REFERER: &str = "https://www.bilibili.com/";

/// 标题中出现即视为系列/合集信号的词表
pub const SERIES_TITLE_KEYWORDS: &[&str] = &[
    "合集", "系列", "第一集", "第二集", "P1", "P2", "上篇", "下篇", "（一）", "（二）",
    "【合集】", "【系列】", "全集", "连载", "番外", "EP", "ep",
];

/// 相关推荐中同UP主视频达到该数量时，按低置信度系列处理
pub const MIN_RELATED_FOR_SERIES: usize = 3;

/// UP主投稿标题与种子标题的最小相似度 (词集 Jaccard)
pub const SERIES_TITLE_SIMILARITY: f64 = 0.3;

pub const HELP_COOKIE_GUIDE: &str = r#"
1. 登录B站: 使用 Chrome / Edge / Firefox 浏览器登录。
   (登录地址: https://passport.bilibili.com/login)
2. 打开开发者工具:
   - 在 Windows / Linux 上: 按 F12 或 Ctrl+Shift+I
   - 在 macOS 上: 按 Cmd+Opt+I (⌘⌥I)
3. 切换到“控制台” (Console) 标签页。
4. 复制并粘贴以下代码到控制台，然后按 Enter 运行：
----------------------------------------------
copy(document.cookie)
----------------------------------------------
5. 此时 Cookie 已自动复制到剪贴板。运行
   bili-ls --set-cookie bilibili
   并在提示处粘贴即可保存。
注意: 私人收藏夹、稍后再看等内容必须携带登录 Cookie 才能访问。"#;

pub mod api {
    /// URL 模板键名，模板正文见配置文件 (允许被测试覆盖)
    pub mod templates {
        pub const VIDEO_VIEW: &str = "VIDEO_VIEW";
        pub const VIDEO_VIEW_DETAIL: &str = "VIDEO_VIEW_DETAIL";
        pub const FAV_RESOURCE_LIST: &str = "FAV_RESOURCE_LIST";
        pub const SEASONS_ARCHIVES: &str = "SEASONS_ARCHIVES";
        pub const WATCH_LATER: &str = "WATCH_LATER";
        pub const BANGUMI_SECTION: &str = "BANGUMI_SECTION";
        pub const BANGUMI_MEDIA: &str = "BANGUMI_MEDIA";
        pub const SPACE_ARC_SEARCH: &str = "SPACE_ARC_SEARCH";
    }

    /// B站业务错误码到行为的映射见 resolver 模块
    pub mod codes {
        pub const OK: i64 = 0;
        pub const NOT_LOGGED_IN: i64 = -101;
        pub const ACCESS_DENIED: i64 = -403;
        pub const NOT_FOUND: i64 = -404;
        pub const VIDEO_GONE: i64 = 62002;
        pub const PRECONDITION: i64 = -412;
        pub const OVERLOADED: i64 = -509;
    }
}

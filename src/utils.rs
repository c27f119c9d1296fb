// src/utils.rs

use chrono::{DateTime, Utc};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

pub static BV_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^BV[0-9A-Za-z]{10}$").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static EDGE_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^[：:\s]+)|([：:\s]+$)").unwrap());

/// 标题里需要剥离的合集/集数标记
static COLLECTION_MARKER_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"【(合集|系列|全集|连载)】",
        r"\((合集|系列|全集|连载)\)",
        r"(合集|系列|全集|连载)[：:]?\s*",
        r"第\d+(集|期|部分|章)[：:]?\s*",
        r"^P\d+[：:\s]*",
        r"^\d+P[：:\s]*",
        r"(?i)^EP\.?\d+[：:\s]*",
        r"(?i)^Episode\s*\d+[：:\s]*",
        r"(?i)Season\s*\d+[：:\s]*",
        r"^\d+[\.．][：:\s]*",
        r"^【\d+】[：:\s]*",
        r"^\[\d+\][：:\s]*",
        r"(完整版|高清版|正式版|官方版)[：:]?\s*",
        r"(上篇|下篇|上集|下集)[：:]?\s*",
        r"(番外|特别篇|预告)[：:]?\s*",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

pub fn is_bv_id(text: &str) -> bool {
    BV_ID_PATTERN.is_match(text)
}

/// 去掉合集条目标题里的系列标记，让列表读起来更干净。
/// 清理结果过短时保留原标题，宁可不清也不把标题清没。
pub fn clean_collection_title(title: &str) -> String {
    if title.is_empty() {
        return title.to_string();
    }

    let mut cleaned = title.to_string();
    for re in COLLECTION_MARKER_RES.iter() {
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }
    cleaned = EDGE_SEPARATOR_RE.replace_all(&cleaned, "").into_owned();
    cleaned = WHITESPACE_RE.replace_all(&cleaned, " ").trim().to_string();

    if cleaned.chars().count() < 3 {
        debug!("标题清理后过短，保留原标题: '{}' -> '{}'", title, cleaned);
        return title.to_string();
    }
    if cleaned != title {
        debug!("标题清理: '{}' -> '{}'", title, cleaned);
    }
    cleaned
}

/// 按显示宽度截断文本 (中文按2列计)，超出时以 "..." 结尾
pub fn truncate_text(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut end_pos = 0;
    for (i, c) in text.char_indices() {
        width += if c.is_ascii() { 1 } else { 2 };
        if width > max_width.saturating_sub(3) {
            end_pos = i;
            break;
        }
    }
    if end_pos == 0 {
        text.to_string()
    } else {
        format!("{}...", &text[..end_pos])
    }
}

/// 秒数 -> "MM:SS" 或 "H:MM:SS"
pub fn format_duration(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// "12:34" / "1:02:03" 形式的时长文本 -> 秒数
pub fn parse_length_secs(length: &str) -> Option<u64> {
    let parts: Vec<&str> = length.split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    let mut secs: u64 = 0;
    for part in &parts {
        secs = secs
            .checked_mul(60)?
            .checked_add(part.trim().parse::<u64>().ok()?)?;
    }
    Some(secs)
}

/// 接口返回的Unix时间戳 -> UTC时间；非正值视为缺失
pub fn timestamp_to_datetime(ts: Option<i64>) -> Option<DateTime<Utc>> {
    ts.filter(|v| *v > 0)
        .and_then(|v| DateTime::from_timestamp(v, 0))
}

// src/resolver/dedup.rs

use crate::models::{Platform, VideoDescriptor};
use std::collections::HashSet;

/// 按身份键合并多页条目：保序、先见者胜、受上限约束。
/// 各适配器返回的页可能互相重叠 (来源在翻页间发生插入/删除时尤其常见)。
pub struct DescriptorMerger {
    max: usize,
    seen: HashSet<(Platform, String, Option<u32>)>,
    ordered: Vec<VideoDescriptor>,
}

impl DescriptorMerger {
    pub fn new(max: usize) -> Self {
        Self {
            max,
            seen: HashSet::new(),
            ordered: Vec::new(),
        }
    }

    /// 吸收一页条目。返回 true 表示有新条目因上限被丢弃。
    pub fn absorb(&mut self, items: Vec<VideoDescriptor>) -> bool {
        let mut dropped = false;
        for item in items {
            let key = item.identity_key();
            if self.seen.contains(&key) {
                continue;
            }
            if self.ordered.len() >= self.max {
                dropped = true;
                break;
            }
            self.seen.insert(key);
            self.ordered.push(item);
        }
        dropped
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ordered.len() >= self.max
    }

    /// 产出最终列表：用合集级元数据回填缺失的标题，并打上来源合集ID
    pub fn finish(
        self,
        collection_title: Option<&str>,
        collection_id: Option<&str>,
    ) -> Vec<VideoDescriptor> {
        self.ordered
            .into_iter()
            .enumerate()
            .map(|(i, mut descriptor)| {
                if descriptor.title.is_empty() {
                    descriptor.title = match collection_title {
                        Some(title) => format!("{} #{}", title, i + 1),
                        None => descriptor.video_id.clone(),
                    };
                }
                if descriptor.source_collection_id.is_none() {
                    descriptor.source_collection_id = collection_id.map(str::to_string);
                }
                descriptor
            })
            .collect()
    }
}

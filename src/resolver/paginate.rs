// src/resolver/paginate.rs

use super::{CollectionAdapter, dedup::DescriptorMerger};
use crate::{
    error::{AppError, AppResult},
    models::{CollectionRef, ResolutionResult},
};
use log::{debug, warn};

/// 翻页驱动：从游标 1 开始反复调用适配器直至穷尽或触达上限。
/// 凭证在进入循环前读定，翻页过程中不再重取。
pub async fn drive(
    adapter: &dyn CollectionAdapter,
    collection: &CollectionRef,
    credential: Option<&str>,
    max_videos: usize,
    max_page_calls: u32,
) -> AppResult<ResolutionResult> {
    let mut merger = DescriptorMerger::new(max_videos);
    let mut cursor = 1u32;
    let mut calls = 0u32;
    let mut truncated = false;
    let mut collection_title: Option<String> = None;

    loop {
        if calls >= max_page_calls {
            // 游标异常时的保险丝：按截断处理而不是无限翻页
            warn!(
                "{} '{}' 翻页达到 {} 次上限，停止枚举",
                collection.collection_type, collection.collection_id, max_page_calls
            );
            truncated = true;
            break;
        }

        let page = match adapter
            .fetch_page(&collection.collection_id, cursor, credential)
            .await
        {
            Ok(page) => page,
            Err(err @ AppError::UpstreamMalformed { .. }) => {
                if calls > 0 {
                    // 已有成功页时，残缺数据降级为截断，保住已取回的部分
                    warn!(
                        "{} '{}' 第 {} 页数据异常，保留已获取的 {} 条: {}",
                        collection.collection_type,
                        collection.collection_id,
                        cursor,
                        merger.len(),
                        err
                    );
                    truncated = true;
                    break;
                }
                return Err(err);
            }
            Err(err) => return Err(err),
        };
        calls += 1;

        debug!(
            "{} '{}' 第 {} 页: {} 条, next={:?}, total={:?}",
            collection.collection_type,
            collection.collection_id,
            cursor,
            page.items.len(),
            page.next_cursor,
            page.total_estimate
        );

        if collection_title.is_none() {
            collection_title = page.collection_title.clone();
        }

        if merger.absorb(page.items) {
            truncated = true;
            break;
        }
        if merger.is_full() && page.next_cursor.is_some() {
            truncated = true;
            break;
        }
        match page.next_cursor {
            Some(next) => cursor = next,
            None => break,
        }
    }

    let videos = merger.finish(collection_title.as_deref(), Some(&collection.collection_id));
    let mut collection = collection.clone();
    if collection.title.is_none() {
        collection.title = collection_title;
    }
    Ok(ResolutionResult {
        collection: Some(collection),
        videos,
        truncated,
    })
}

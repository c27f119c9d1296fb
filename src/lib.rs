// src/lib.rs

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod resolver;
pub mod symbols;
pub mod ui;
pub mod utils;

#[cfg(feature = "testing")]
pub mod test_support;

use crate::{
    cli::{Cli, OutputFormat},
    client::RobustClient,
    config::{AppConfig, cookie},
    error::{AppError, AppResult},
    models::{Platform, ResolutionResult},
    resolver::UrlResolver,
};
use anyhow::anyhow;
use colored::*;
use futures::{StreamExt, stream};
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use log::{debug, info};
use std::{path::Path, str::FromStr, sync::Arc, time::Duration};
use url::Url;

/// 核心的执行上下文，包含一次运行所需的状态和工具
#[derive(Clone)]
pub struct ResolveJobContext {
    pub resolver: Arc<UrlResolver>,
    pub config: Arc<AppConfig>,
    pub args: Arc<Cli>,
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);

    if args.cookie_help {
        ui::box_message(
            "获取登录 Cookie 指南",
            constants::HELP_COOKIE_GUIDE
                .lines()
                .collect::<Vec<_>>()
                .as_slice(),
            |s| s.cyan(),
        );
        println!(
            "\n{} 安全提醒: Cookie 等同于登录凭证，请妥善保管，不要分享给他人。",
            *symbols::INFO
        );
        return Ok(());
    }
    if let Some(platform_name) = &args.set_cookie {
        return handle_set_cookie(platform_name);
    }
    if let Some(platform_name) = &args.clear_cookie {
        return handle_clear_cookie(platform_name);
    }

    let external_config = config::cookie::load_or_create_external_config()?;
    let config = Arc::new(AppConfig::from_external(&external_config));
    debug!("加载的应用配置: {:?}", config);

    let credentials = Arc::new(cookie::CookieStore::new(
        &external_config,
        args.cookie.clone(),
    ));
    let http_client = Arc::new(RobustClient::new(config.clone())?);
    let resolver = Arc::new(UrlResolver::new(
        http_client,
        config.clone(),
        credentials,
    ));

    let context = ResolveJobContext {
        resolver,
        config,
        args: args.clone(),
    };

    if args.interactive {
        handle_interactive_mode(context).await?;
    } else if let Some(batch_file) = &args.batch_file {
        process_batch_tasks(batch_file, context).await?;
    } else if let Some(url) = &args.url {
        process_single_task(url, &context).await?;
    }

    Ok(())
}

fn parse_platform_arg(platform_name: &str) -> AppResult<Platform> {
    Platform::from_str(platform_name).map_err(AppError::UserInputError)
}

fn handle_set_cookie(platform_name: &str) -> AppResult<()> {
    let platform = parse_platform_arg(platform_name)?;
    let cookie = ui::prompt_hidden(&format!("请粘贴 {} 的 Cookie", platform))?;
    if cookie.trim().is_empty() {
        println!("\n{} 输入为空，未做任何修改。", *symbols::WARN);
        return Ok(());
    }
    cookie::save_cookie(platform, cookie.trim())?;
    println!("\n{} 已保存 {} 的 Cookie。", *symbols::OK, platform);
    Ok(())
}

fn handle_clear_cookie(platform_name: &str) -> AppResult<()> {
    let platform = parse_platform_arg(platform_name)?;
    if cookie::delete_cookie(platform)? {
        println!("\n{} 已删除 {} 的 Cookie。", *symbols::OK, platform);
    } else {
        println!("\n{} {} 没有已保存的 Cookie。", *symbols::INFO, platform);
    }
    Ok(())
}

/// 允许输入完整链接或裸BV号
fn normalize_task_input(input: &str) -> AppResult<String> {
    if utils::is_bv_id(input) {
        return Ok(format!("https://www.bilibili.com/video/{}", input));
    }
    if Url::parse(input).is_ok() {
        return Ok(input.to_string());
    }
    Err(AppError::UserInputError(format!(
        "输入 '{}' 既不是有效的链接，也不是有效的BV号。",
        input
    )))
}

async fn resolve_with_spinner(
    context: &ResolveJobContext,
    url: &str,
) -> AppResult<ResolutionResult> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("解析中: {}", utils::truncate_text(url, 60)));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = context
        .resolver
        .resolve(url, context.args.max_videos)
        .await;
    spinner.finish_and_clear();
    result
}

fn emit_result(context: &ResolveJobContext, result: &ResolutionResult) -> AppResult<()> {
    match context.args.format {
        OutputFormat::Table => ui::render_result(result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
    }

    if let Some(output_path) = &context.args.output {
        std::fs::write(output_path, serde_json::to_string_pretty(result)?)?;
        info!("解析结果已写入 {}", output_path.display());
        println!(
            "\n{} 结果已写入: {}",
            *symbols::INFO,
            output_path.display()
        );
    }
    Ok(())
}

async fn process_single_task(task_input: &str, context: &ResolveJobContext) -> AppResult<()> {
    let url = normalize_task_input(task_input.trim())?;
    let result = resolve_with_spinner(context, &url).await?;
    emit_result(context, &result)
}

async fn handle_interactive_mode(base_context: ResolveJobContext) -> AppResult<()> {
    ui::print_header("交互模式");
    println!(
        "在此模式下，你可以逐一输入 链接 或 BV号 进行解析。按 {} 可随时退出。",
        *symbols::CTRL_C
    );

    loop {
        match ui::prompt("请输入链接或BV号", None) {
            Ok(input) if !input.is_empty() => {
                if let Err(e) = process_single_task(&input, &base_context).await {
                    log::error!("交互模式任务 '{}' 失败: {}", input, e);
                    if !matches!(e, AppError::UserInterrupt) {
                        eprintln!(
                            "\n{} 处理任务时发生错误: {}",
                            *symbols::ERROR,
                            e.to_string().red()
                        );
                        if e.is_retryable() {
                            eprintln!("{} 该错误是暂时性的，稍后重试即可。", *symbols::INFO);
                        }
                    }
                }
            }
            Ok(_) => break, // 用户输入空行
            Err(_) => return Err(AppError::UserInterrupt), // 用户按 Ctrl+C
        }
    }

    println!("\n{} 退出交互模式。", *symbols::INFO);
    Ok(())
}

async fn process_batch_tasks(batch_file: &Path, base_context: ResolveJobContext) -> AppResult<()> {
    let content = std::fs::read_to_string(batch_file).map_err(|e| {
        log::error!("读取批量文件 '{}' 失败: {}", batch_file.display(), e);
        AppError::from(e)
    })?;

    // 重复行只解析一次
    let tasks: Vec<String> = content
        .lines()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unique()
        .collect();
    if tasks.is_empty() {
        log::warn!("批量文件 '{}' 为空或不含有效行。", batch_file.display());
        println!(
            "{} 批量文件 '{}' 为空。",
            *symbols::WARN,
            batch_file.display()
        );
        return Ok(());
    }

    let workers = base_context.args.workers.unwrap_or(3).max(1);
    ui::print_header(&format!(
        "开始批量解析 {} 个任务 (并发 {})",
        tasks.len(),
        workers
    ));

    // 各任务相互独立，解析器无共享可变状态，可以放心并发
    let outcomes: Vec<(String, AppResult<ResolutionResult>)> = stream::iter(tasks.iter().cloned())
        .map(|task| {
            let context = base_context.clone();
            async move {
                let outcome = match normalize_task_input(&task) {
                    Ok(url) => {
                        context
                            .resolver
                            .resolve(&url, context.args.max_videos)
                            .await
                    }
                    Err(e) => Err(e),
                };
                (task, outcome)
            }
        })
        .buffered(workers)
        .collect()
        .await;

    let mut success = 0;
    let mut skipped = 0;
    let mut failed = 0;
    for (i, (task, outcome)) in outcomes.iter().enumerate() {
        ui::print_sub_header(&format!(
            "批量任务 {}/{} - {}",
            i + 1,
            outcomes.len(),
            utils::truncate_text(task, 60)
        ));
        match outcome {
            Ok(result) => {
                success += 1;
                emit_batch_item(&base_context, result)?;
            }
            Err(AppError::UserInputError(msg)) => {
                // 无效条目不算失败，跳过即可
                skipped += 1;
                log::warn!("跳过无效条目: {}", task);
                eprintln!("{} 跳过无效条目: {}", *symbols::WARN, msg);
            }
            Err(e) => {
                failed += 1;
                log::error!("批量任务 '{}' 失败: {}", task, e);
                eprintln!("\n{} 处理任务时发生错误: {}", *symbols::ERROR, e);
            }
        }
    }

    ui::print_header("批量解析报告");
    println!(
        "{} | {} | {} | 总计: {}",
        format!("成功: {}", success).green(),
        format!("跳过: {}", skipped).yellow(),
        format!("失败: {}", failed).red(),
        outcomes.len()
    );
    if failed > 0 {
        Err(AppError::Other(anyhow!("{} 个批量任务解析失败。", failed)))
    } else {
        Ok(())
    }
}

fn emit_batch_item(context: &ResolveJobContext, result: &ResolutionResult) -> AppResult<()> {
    match context.args.format {
        OutputFormat::Table => ui::render_result(result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
    }
    Ok(())
}

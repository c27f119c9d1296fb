// src/cli.rs

use crate::constants;
use clap::{Parser, ValueEnum, command, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// 解析结果的终端输出格式
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

// command 属性
#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true,
)]
#[command(group(
    clap::ArgGroup::new("mode")
        .required(true)
        .args(&["interactive", "url", "batch_file", "cookie_help", "set_cookie", "clear_cookie"]),
))]
pub struct Cli {
    // --- 运行模式 (Mode) ---
    /// 启动交互式会话，逐一输入链接
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub interactive: bool,
    /// 指定要解析的单个链接或BV号
    #[arg(long, help_heading = "Mode")]
    pub url: Option<String>,
    /// 从文本文件批量解析多个链接 (每行一个)
    #[arg(short, long, value_name = "FILE", help_heading = "Mode")]
    pub batch_file: Option<PathBuf>,
    /// 显示如何获取登录 Cookie 的指南并退出
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub cookie_help: bool,
    /// 保存某平台的登录 Cookie (隐藏输入，如: --set-cookie bilibili)
    #[arg(long, value_name = "PLATFORM", help_heading = "Mode")]
    pub set_cookie: Option<String>,
    /// 删除已保存的某平台 Cookie
    #[arg(long, value_name = "PLATFORM", help_heading = "Mode")]
    pub clear_cookie: Option<String>,

    // --- 解析选项 (Options) ---
    /// 合集最多展开的视频数量
    #[arg(long, default_value_t = constants::DEFAULT_MAX_VIDEOS, value_name = "N", help_heading = "Options")]
    pub max_videos: usize,
    /// 输出格式: 'table' 或 'json'
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, help_heading = "Options")]
    pub format: OutputFormat,
    /// 将解析结果以JSON形式额外写入文件
    #[arg(short, long, value_name = "FILE", help_heading = "Options")]
    pub output: Option<PathBuf>,
    /// 为本次运行直接提供 Cookie，优先级高于环境变量与配置文件
    #[arg(long, help_heading = "Options")]
    pub cookie: Option<String>,
    /// [批量模式] 并发解析的任务数
    #[arg(short, long, value_parser = clap::value_parser!(usize), help_heading = "Options")]
    pub workers: Option<usize>,

    // --- 通用选项 (General) ---
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (隐藏参数) 设置日志文件的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}

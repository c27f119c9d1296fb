// src/ui.rs

use crate::{
    constants,
    models::{ResolutionResult, VideoDescriptor},
    symbols, utils,
};
use colored::*;
use std::io::{self, Write};

pub fn print_header(title: &str) {
    println!("\n{}", "═".repeat(constants::UI_WIDTH));
    println!(" {}", title.cyan().bold());
    println!("{}", "═".repeat(constants::UI_WIDTH));
}

pub fn print_sub_header(title: &str) {
    println!("\n--- {} ---", title.bold());
}

pub fn box_message(title: &str, content: &[&str], color_func: fn(ColoredString) -> ColoredString) {
    println!("\n┌{}┐", "─".repeat(constants::UI_WIDTH - 2));
    println!("  {}", color_func(title.bold()));
    println!("├{}┤", "─".repeat(constants::UI_WIDTH - 2));
    for line in content {
        println!("  {}", line);
    }
    println!("└{}┘", "─".repeat(constants::UI_WIDTH - 2));
}

pub fn prompt(message: &str, default: Option<&str>) -> io::Result<String> {
    let default_str = default.map_or("".to_string(), |d| format!(" (默认: {})", d));
    print!("\n>>> {}{}: ", message, default_str);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim().to_string();
    if input.is_empty() {
        Ok(default.unwrap_or("").to_string())
    } else {
        Ok(input)
    }
}

pub fn prompt_hidden(message: &str) -> io::Result<String> {
    print!("\n>>> {}: ", message);
    io::stdout().flush()?;
    rpassword::read_password()
}

fn descriptor_line(index: usize, video: &VideoDescriptor) -> String {
    let duration = video
        .duration_secs
        .map(utils::format_duration)
        .unwrap_or_else(|| "--:--".to_string());
    let part = video
        .part_index
        .map(|p| format!(" P{}", p))
        .unwrap_or_default();
    format!(
        "  [{:>3}] {:>8}  {}{}  {}",
        index + 1,
        duration,
        video.video_id.yellow(),
        part,
        utils::truncate_text(&video.title, constants::TITLE_TRUNCATE_WIDTH)
    )
}

/// 以表格形式输出一次解析结果
pub fn render_result(result: &ResolutionResult) {
    match &result.collection {
        Some(collection) => {
            let title = collection.title.as_deref().unwrap_or("(无标题)");
            print_sub_header(&format!(
                "{} [{}] {}",
                collection.collection_type,
                collection.collection_id,
                title
            ));
        }
        None => print_sub_header("单个视频"),
    }

    for (i, video) in result.videos.iter().enumerate() {
        println!("{}", descriptor_line(i, video));
    }

    if result.truncated {
        println!(
            "\n{} 列表未穷尽来源，已在 {} 条处截断。",
            *symbols::WARN,
            result.videos.len()
        );
    }
    println!(
        "\n{} 共 {} 个视频。",
        *symbols::OK,
        result.videos.len()
    );
}

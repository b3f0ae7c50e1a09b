// src/cli.rs

use clap::{Parser, ValueEnum, crate_version};
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

// command 属性
#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true,
)]
pub struct Cli {
    // --- 输入源 (Source) ---
    /// 站点根地址，相对路径的资源都基于它拼接 (例如 'https://example.com')
    #[arg(short = 'u', long, value_name = "URL", help_heading = "Source")]
    pub base_url: Option<String>,
    /// 已保存的 HTML 页面 (默认: <输出目录>/index.html)
    #[arg(short, long, value_name = "FILE", help_heading = "Source")]
    pub input: Option<PathBuf>,
    /// 先从站点根地址下载页面并保存为输入文件，再提取资源
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Source")]
    pub fetch_page: bool,

    // --- 下载选项 (Options) ---
    /// 设置资源保存目录 (默认: docs)
    #[arg(short, long, value_name = "DIR", help_heading = "Options")]
    pub output: Option<PathBuf>,
    /// 设置最大并发下载数 (0 表示不限制)
    #[arg(short, long, value_parser = clap::value_parser!(usize), help_heading = "Options")]
    pub workers: Option<usize>,
    /// 同时扫描内联样式中的 url(...) 引用
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub inline_styles: bool,
    /// 只列出将要下载的资源，不发起任何下载
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub dry_run: bool,
    /// 指定配置文件 (默认: ~/.asset-dl/config.json)
    #[arg(short, long, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

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

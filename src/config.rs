// src/config.rs

pub mod file;

use self::file::load_external_config;
use crate::{
    cli::Cli,
    constants,
    error::{AppError, AppResult},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

/// 配置文件 (`config.json`) 的结构，所有字段均可省略。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    #[serde(default)]
    pub scan_inline_styles: bool,
    #[serde(default)]
    pub network: NetworkConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: Url,
    pub output_root: PathBuf,
    pub document_path: PathBuf,
    /// `None` 表示不限制并发
    pub max_workers: Option<usize>,
    pub scan_inline_styles: bool,
    pub fetch_page: bool,
    pub dry_run: bool,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Option<Duration>,
}

impl AppConfig {
    pub fn new(args: &Cli) -> AppResult<Self> {
        let external_config = load_external_config(args.config.as_deref())?;
        Self::resolve(args, external_config)
    }

    /// 合并命令行参数与配置文件，命令行优先。
    pub fn resolve(args: &Cli, external: ExternalConfig) -> AppResult<Self> {
        let raw_base_url = args
            .base_url
            .clone()
            .or(external.base_url)
            .ok_or_else(|| {
                AppError::Config("未指定站点根地址，请使用 --base-url 或在配置文件中设置 base_url".into())
            })?;
        let base_url = parse_base_url(&raw_base_url)?;

        let output_root = args
            .output
            .clone()
            .or(external.output_dir)
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_OUTPUT_DIR));
        let document_path = args
            .input
            .clone()
            .or(external.input_file)
            .unwrap_or_else(|| output_root.join(constants::DEFAULT_INPUT_FILE));

        let workers = args
            .workers
            .or(external.workers)
            .unwrap_or(constants::DEFAULT_WORKERS);

        Ok(Self {
            base_url,
            output_root,
            document_path,
            max_workers: (workers > 0).then_some(workers),
            scan_inline_styles: args.inline_styles || external.scan_inline_styles,
            fetch_page: args.fetch_page,
            dry_run: args.dry_run,
            user_agent: external
                .network
                .user_agent
                .unwrap_or_else(|| constants::USER_AGENT.into()),
            connect_timeout: Duration::from_secs(
                external
                    .network
                    .connect_timeout_secs
                    .unwrap_or(constants::DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            timeout: external.network.timeout_secs.map(Duration::from_secs),
        })
    }
}

fn parse_base_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::Config(format!("无效的站点根地址 '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::Config(format!(
            "站点根地址只支持 http/https，收到 '{}'",
            other
        ))),
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://127.0.0.1/").unwrap(),
            output_root: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            document_path: PathBuf::from(constants::DEFAULT_OUTPUT_DIR)
                .join(constants::DEFAULT_INPUT_FILE),
            max_workers: Some(4),
            scan_inline_styles: false,
            fetch_page: false,
            dry_run: false,
            user_agent: "test-agent/1.0".to_string(),
            connect_timeout: Duration::from_secs(5),
            timeout: Some(Duration::from_secs(15)),
        }
    }
}

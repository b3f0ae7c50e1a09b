// src/lib.rs

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod models;
pub mod page;
pub mod symbols;
pub mod ui;
pub mod utils;

use crate::{
    cli::Cli,
    client::HttpClient,
    config::AppConfig,
    downloader::{AssetMirror, DownloadManager},
    error::{AppError, AppResult},
};
use log::debug;
use std::sync::Arc;

/// 核心的执行上下文，包含所有任务所需的状态和工具
#[derive(Clone)]
pub struct MirrorJobContext {
    pub manager: DownloadManager,
    pub config: Arc<AppConfig>,
    pub http_client: Arc<HttpClient>,
}

impl MirrorJobContext {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let http_client = Arc::new(HttpClient::new(config.clone())?);
        Ok(Self {
            manager: DownloadManager::new(),
            config,
            http_client,
        })
    }
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);

    let config = Arc::new(AppConfig::new(&args)?);
    debug!("加载的应用配置: {:?}", config);

    ui::print_header(&format!("镜像站点资源: {}", config.base_url));
    let context = MirrorJobContext::new(config.clone())?;
    let report = AssetMirror::new(context).run().await?;

    if config.dry_run {
        ui::plain("");
        ui::info("预演模式，未下载任何文件。");
        return Ok(());
    }

    if report.all_succeeded() {
        ui::plain("");
        ui::success("所有资源下载成功！");
        Ok(())
    } else {
        Err(AppError::DownloadsFailed {
            failed: report.failed.len(),
            total: report.total,
        })
    }
}

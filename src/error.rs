// src/error.rs

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("无法读取页面文件 '{}': {source}", .path.display())]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("配置错误: {0}")]
    Config(String),
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
    #[error("服务器返回状态码 {status} ({url})")]
    HttpStatus { url: String, status: StatusCode },
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("URL 解析错误: {0}")]
    Url(#[from] url::ParseError),
    #[error("安全错误: {0}")]
    Security(String),
    #[error("{failed}/{total} 个资源下载失败")]
    DownloadsFailed { failed: usize, total: usize },
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

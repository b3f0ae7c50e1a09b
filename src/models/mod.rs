// src/models/mod.rs

use crate::error::AppError;
use crate::symbols;
use colored::{ColoredString, Colorize};
use std::{
    fmt,
    path::{Path, PathBuf},
};
use url::Url;

/// 已加载的 HTML 页面，读取后不再修改。
#[derive(Debug, Clone)]
pub struct Document {
    source: PathBuf,
    text: String,
}

impl Document {
    pub fn new(source: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// 页面中找到的一个资源引用，按原始字符串判等。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetReference(String);

impl AssetReference {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 带协议头 (`https:`、`data:` 等) 或以 `//` 开头的引用指向站外，不做本地镜像。
    pub fn is_external(&self) -> bool {
        let s = self.0.trim_start();
        if s.starts_with("//") {
            return true;
        }
        match s.split_once(':') {
            Some((scheme, _)) => {
                !scheme.is_empty()
                    && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            }
            None => false,
        }
    }
}

impl fmt::Display for AssetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetReference {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// 一个下载单元：引用、解析后的地址与本地目标路径。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub reference: AssetReference,
    pub url: Url,
    pub destination: PathBuf,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DownloadStatus {
    Success,
    HttpError,
    NetworkError,
    ConnectionError,
    TimeoutError,
    IoError,
    InvalidPath,
    UnexpectedError,
}

impl DownloadStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadStatus::Success)
    }

    pub fn get_display_info(
        &self,
    ) -> (
        &'static ColoredString,
        fn(ColoredString) -> ColoredString,
        &'static str,
    ) {
        match self {
            DownloadStatus::Success => (&symbols::OK, |s| s.green(), "下载成功"),
            DownloadStatus::HttpError => (&symbols::ERROR, |s| s.red(), "服务器返回错误"),
            DownloadStatus::NetworkError => (&symbols::ERROR, |s| s.red(), "网络请求失败"),
            DownloadStatus::ConnectionError => (&symbols::ERROR, |s| s.red(), "无法建立连接"),
            DownloadStatus::TimeoutError => (&symbols::WARN, |s| s.yellow(), "网络连接超时"),
            DownloadStatus::IoError => (&symbols::ERROR, |s| s.red(), "本地文件读写错误"),
            DownloadStatus::InvalidPath => (&symbols::ERROR, |s| s.red(), "资源路径无效"),
            DownloadStatus::UnexpectedError => {
                (&symbols::ERROR, |s| s.red(), "发生未预期的程序错误")
            }
        }
    }
}

impl From<&AppError> for DownloadStatus {
    fn from(error: &AppError) -> Self {
        match error {
            AppError::HttpStatus { .. } => DownloadStatus::HttpError,
            AppError::Network(err) => {
                if err.is_timeout() {
                    DownloadStatus::TimeoutError
                } else if err.is_connect() {
                    DownloadStatus::ConnectionError
                } else if err.is_status() {
                    DownloadStatus::HttpError
                } else {
                    DownloadStatus::NetworkError
                }
            }
            AppError::Io(_) => DownloadStatus::IoError,
            AppError::Security(_) | AppError::Url(_) => DownloadStatus::InvalidPath,
            _ => DownloadStatus::UnexpectedError,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub reference: AssetReference,
    pub destination: PathBuf,
    pub status: DownloadStatus,
    pub bytes_written: u64,
    pub message: Option<String>,
}

/// 一次镜像运行的汇总结果。
#[derive(Debug, Clone, Default)]
pub struct MirrorReport {
    pub total: usize,
    pub succeeded: Vec<AssetReference>,
    pub failed: Vec<(AssetReference, String)>,
    pub skipped: Vec<(AssetReference, String)>,
}

impl MirrorReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn external_references_are_detected() {
        for external in [
            "https://cdn.example.com/a.js",
            "http://example.com/b.png",
            "HTTPS://EXAMPLE.COM/C.CSS",
            "//cdn.example.com/d.woff2",
            "data:image/png;base64,AAAA.png",
        ] {
            assert!(AssetReference::from(external).is_external(), "{external}");
        }
        for local in ["/img/logo.png", "css/site.css", "./a.js", "../up.png", "/a:b.png"] {
            assert!(!AssetReference::from(local).is_external(), "{local}");
        }
    }

    #[test]
    fn status_failures_are_classified() {
        let err = AppError::HttpStatus {
            url: "http://x/a.png".into(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(DownloadStatus::from(&err), DownloadStatus::HttpError);
        assert!(err.to_string().contains("404"));

        let err = AppError::Io(std::io::Error::other("disk full"));
        assert_eq!(DownloadStatus::from(&err), DownloadStatus::IoError);

        let err = AppError::Security("..".into());
        assert_eq!(DownloadStatus::from(&err), DownloadStatus::InvalidPath);
    }
}

// src/page.rs

use crate::{client::HttpClient, error::*, models::Document};
use log::{info, warn};
use std::{borrow::Cow, fs, path::Path};
use url::Url;

/// 读取已保存的页面。只有文件缺失或不可读才是致命错误，发生在提取之前；
/// 非 UTF-8 字节会被替换为 U+FFFD，其余内容照常提取。
pub fn load_document(path: &Path) -> AppResult<Document> {
    let bytes = fs::read(path).map_err(|source| AppError::ReadDocument {
        path: path.to_path_buf(),
        source,
    })?;
    info!("读取页面 '{}' ({} 字节)", path.display(), bytes.len());
    let text = match String::from_utf8_lossy(&bytes) {
        Cow::Borrowed(text) => text.to_owned(),
        Cow::Owned(text) => {
            warn!("页面 '{}' 含有非 UTF-8 字节，已按替换字符处理", path.display());
            text
        }
    };
    Ok(Document::new(path, text))
}

/// 下载页面并保存到 `path`，供随后的 `load_document` 读取。
pub async fn fetch_page(client: &HttpClient, url: &Url, path: &Path) -> AppResult<()> {
    info!("下载页面 {} -> {}", url, path.display());
    let body = client.fetch_text(url.clone()).await?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, body).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_document_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, AppError::ReadDocument { .. }));
        assert!(err.to_string().contains("index.html"));
    }

    #[test]
    fn document_text_is_loaded_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "<img src=\"/a.png\">").unwrap();
        let doc = load_document(&path).unwrap();
        assert_eq!(doc.as_str(), "<img src=\"/a.png\">");
        assert_eq!(doc.source(), path.as_path());
    }

    #[test]
    fn non_utf8_document_is_decoded_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        // Latin-1 编码的 "café"
        fs::write(&path, b"<p>caf\xe9</p><img src=\"/img/a.png\">").unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.as_str(), "<p>caf\u{FFFD}</p><img src=\"/img/a.png\">");

        let references = crate::extractor::AssetExtractor::new(false).extract(&doc);
        assert!(references.contains(&crate::models::AssetReference::from("/img/a.png")));
    }
}

// src/utils.rs

use crate::error::*;
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};

pub fn truncate_text(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut end_pos = 0;
    for (i, c) in text.char_indices() {
        width += if c.is_ascii() { 1 } else { 2 };
        if width > max_width.saturating_sub(3) {
            end_pos = i;
            break;
        }
    }
    if end_pos == 0 { text.to_string() } else { format!("{}...", &text[..end_pos]) }
}

/// 去掉引用中的查询串与片段，并做百分号解码。
pub fn reference_path(reference: &str) -> AppResult<String> {
    let end = reference.find(['?', '#']).unwrap_or(reference.len());
    let raw = &reference[..end];
    percent_decode_str(raw)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| AppError::Security(format!("引用 '{}' 含有非法的百分号编码: {}", reference, e)))
}

/// 把相对路径拼接到基础目录下。只接受普通路径段，遇到 `..` 直接拒绝。
/// 纯函数：不访问文件系统，相同输入总得到相同输出。
pub fn secure_join_path(base_dir: &Path, relative_path: &Path) -> AppResult<PathBuf> {
    let mut final_path = base_dir.to_path_buf();
    let mut pushed = false;
    for component in relative_path.components() {
        match component {
            Component::Normal(part) => {
                final_path.push(part);
                pushed = true;
            }
            Component::ParentDir => return Err(AppError::Security(format!("检测到路径遍历 '..': {:?}", relative_path))),
            _ => continue,
        }
    }
    if !pushed {
        return Err(AppError::Security(format!("路径 {:?} 不包含文件名", relative_path)));
    }
    Ok(final_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_path() {
        assert_eq!(reference_path("/img/logo.png").unwrap(), "/img/logo.png");
        assert_eq!(reference_path("/img/a%20b.png").unwrap(), "/img/a b.png");
        assert_eq!(reference_path("/f/x.woff2?v=3#iefix").unwrap(), "/f/x.woff2");
        assert_eq!(reference_path("/img/%E5%9B%BE.png").unwrap(), "/img/图.png");
        assert!(reference_path("/img/%FF.png").is_err());
    }

    #[test]
    fn test_secure_join_path() {
        let base = Path::new("out");
        assert_eq!(
            secure_join_path(base, Path::new("/img/logo.png")).unwrap(),
            Path::new("out").join("img").join("logo.png")
        );
        assert_eq!(
            secure_join_path(base, Path::new("./css//site.css")).unwrap(),
            Path::new("out").join("css").join("site.css")
        );
        assert!(matches!(
            secure_join_path(base, Path::new("/img/../../etc/passwd")),
            Err(AppError::Security(_))
        ));
        assert!(matches!(secure_join_path(base, Path::new("/")), Err(AppError::Security(_))));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghijkl", 8), "abcde...");
    }
}

// src/extractor/patterns.rs

use crate::constants::extensions;
use regex::Regex;
use std::sync::LazyLock;

/// 构造 `attr="...ext"` 形式的匹配式，属性名与扩展名都不区分大小写。
fn attribute_pattern(attributes: &[&str], exts: &[&str]) -> Regex {
    Regex::new(&format!(
        r#"(?i)(?:{})=["']([^"']+\.(?:{}))["']"#,
        attributes.join("|"),
        exts.join("|")
    ))
    .unwrap()
}

pub(super) static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| attribute_pattern(&["src", "href"], extensions::IMAGES));
pub(super) static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| attribute_pattern(&["src"], extensions::SCRIPTS));
pub(super) static STYLESHEET_RE: LazyLock<Regex> =
    LazyLock::new(|| attribute_pattern(&["href"], extensions::STYLESHEETS));
pub(super) static FONT_RE: LazyLock<Regex> =
    LazyLock::new(|| attribute_pattern(&["href"], extensions::FONTS));

// url(foo.png) / url("foo.png") / url( 'foo.woff2' )
pub(super) static INLINE_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let exts = extensions::IMAGES
        .iter()
        .chain(extensions::FONTS)
        .copied()
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r#"(?i)url\(\s*["']?([^"'()\s]+\.(?:{}))["']?\s*\)"#,
        exts
    ))
    .unwrap()
});

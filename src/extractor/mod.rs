// src/extractor/mod.rs

mod patterns;

use crate::models::{AssetReference, Document};
use log::{debug, info};
use regex::Regex;
use std::collections::BTreeSet;

/// 资源类别，每一类对应一条独立的匹配规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Image,
    Script,
    Stylesheet,
    Font,
    /// 内联样式中的 `url(...)`，默认关闭
    InlineStyle,
}

impl AssetClass {
    pub const ATTRIBUTE_CLASSES: [AssetClass; 4] = [
        AssetClass::Image,
        AssetClass::Script,
        AssetClass::Stylesheet,
        AssetClass::Font,
    ];

    fn pattern(&self) -> &'static Regex {
        match self {
            AssetClass::Image => &*patterns::IMAGE_RE,
            AssetClass::Script => &*patterns::SCRIPT_RE,
            AssetClass::Stylesheet => &*patterns::STYLESHEET_RE,
            AssetClass::Font => &*patterns::FONT_RE,
            AssetClass::InlineStyle => &*patterns::INLINE_STYLE_RE,
        }
    }
}

/// 基于正则的资源扫描器。不构建 DOM，允许漏报与误报。
#[derive(Debug, Clone)]
pub struct AssetExtractor {
    classes: Vec<AssetClass>,
}

impl Default for AssetExtractor {
    fn default() -> Self {
        Self::new(false)
    }
}

impl AssetExtractor {
    pub fn new(scan_inline_styles: bool) -> Self {
        let mut classes = AssetClass::ATTRIBUTE_CLASSES.to_vec();
        if scan_inline_styles {
            classes.push(AssetClass::InlineStyle);
        }
        Self { classes }
    }

    pub fn classes(&self) -> &[AssetClass] {
        &self.classes
    }

    pub fn extract(&self, document: &Document) -> BTreeSet<AssetReference> {
        let mut assets = BTreeSet::new();
        for class in &self.classes {
            let before = assets.len();
            for caps in class.pattern().captures_iter(document.as_str()) {
                if let Some(m) = caps.get(1) {
                    assets.insert(AssetReference::new(m.as_str()));
                }
            }
            debug!("{:?} 规则新增 {} 个引用", class, assets.len() - before);
        }
        info!(
            "从 '{}' 中提取到 {} 个不重复的资源引用",
            document.source().display(),
            assets.len()
        );
        assets
    }
}

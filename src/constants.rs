// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const URL_TRUNCATE_LENGTH: usize = 72;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = concat!(clap::crate_name!(), ".log");
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
pub const DEFAULT_OUTPUT_DIR: &str = "docs";
pub const DEFAULT_INPUT_FILE: &str = "index.html";
pub const DEFAULT_WORKERS: usize = 8;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub mod extensions {
    pub const IMAGES: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];
    pub const SCRIPTS: &[&str] = &["js"];
    pub const STYLESHEETS: &[&str] = &["css"];
    pub const FONTS: &[&str] = &["woff", "woff2"];
}

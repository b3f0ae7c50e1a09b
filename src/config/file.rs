// src/config/file.rs

use crate::{
    config::ExternalConfig,
    constants,
    error::{AppError, AppResult},
};
use anyhow::{Context, anyhow};
use log::{debug, info};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub(super) fn get_config_path() -> AppResult<PathBuf> {
    let path = dirs::home_dir()
        .ok_or_else(|| AppError::Other(anyhow!("无法获取用户主目录")))?
        .join(constants::CONFIG_DIR_NAME)
        .join(constants::CONFIG_FILE_NAME);
    Ok(path)
}

/// 读取配置文件。显式指定的文件必须存在；默认位置的文件不存在时使用空配置。
pub(crate) fn load_external_config(explicit: Option<&Path>) -> AppResult<ExternalConfig> {
    let config_path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match get_config_path() {
            Ok(path) if path.is_file() => path,
            Ok(path) => {
                debug!("配置文件 {:?} 不存在，使用默认配置。", path);
                return Ok(ExternalConfig::default());
            }
            Err(e) => {
                debug!("无法定位默认配置文件 ({})，使用默认配置。", e);
                return Ok(ExternalConfig::default());
            }
        },
    };

    info!("从 {:?} 加载配置", config_path);
    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("读取配置文件 '{}' 失败", config_path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("解析配置文件 '{}' 失败", config_path.display()))
        .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_config_file_is_parsed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"base_url": "https://example.com", "workers": 3}}"#).unwrap();

        let config = load_external_config(Some(file.path())).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://example.com"));
        assert_eq!(config.workers, Some(3));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_external_config(Some(&dir.path().join("nope.json")));
        assert!(matches!(result, Err(AppError::Other(_))));
    }
}

//! 设置文件模块
//!
//! `settings.json` 位于系统配置目录下的 `qr-creator/`，内容为 `QrConfig` 的 JSON 形式，
//! 可以只写出需要覆盖的字段。

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::qr_creator::QrConfig;

const APP_DIR_NAME: &str = "qr-creator";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// 默认设置文件路径。
pub fn settings_file_path() -> Result<PathBuf, AppError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| AppError::Storage("获取应用配置目录失败".to_string()))?;

    Ok(config_dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

/// 读取设置；文件不存在时返回默认配置。
pub fn load_settings(path: &Path) -> Result<QrConfig, AppError> {
    if !path.exists() {
        log::debug!("设置文件不存在，使用默认配置: {}", path.display());
        return Ok(QrConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config = serde_json::from_str::<QrConfig>(&content)
        .map_err(|e| AppError::Config(format!("解析设置文件失败: {}", e)))?;

    config
        .validate()
        .map_err(|e| AppError::Config(e.to_string()))?;

    log::info!("⚙️ 已加载设置: {}", path.display());
    Ok(config)
}

/// 读取生效设置；没有可用的设置文件路径时直接使用默认配置。
pub fn load_settings_or_default(path: Option<&Path>) -> Result<QrConfig, AppError> {
    match path {
        Some(path) => load_settings(path),
        None => {
            log::warn!("⚠️ 没有可用的设置文件路径，使用默认配置");
            Ok(QrConfig::default())
        }
    }
}

/// 以格式化 JSON 写出设置，必要时创建父目录。
pub fn store_settings(path: &Path, config: &QrConfig) -> Result<(), AppError> {
    config
        .validate()
        .map_err(|e| AppError::Config(e.to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::Storage(format!("创建配置目录失败: {}", e)))?;
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| AppError::Config(format!("序列化设置失败: {}", e)))?;

    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir failed");

        let config = load_settings(&dir.path().join("settings.json")).expect("load should succeed");

        assert_eq!(config, QrConfig::default());
    }

    #[test]
    fn no_settings_path_yields_defaults() {
        let config = load_settings_or_default(None).expect("defaults should load");

        assert_eq!(config, QrConfig::default());
    }

    #[test]
    fn explicit_settings_path_is_read() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "allowed_sizes": [120, 240] }"#).expect("write fixture failed");

        let config = load_settings_or_default(Some(&path)).expect("load should succeed");

        assert_eq!(config.allowed_sizes, vec![120, 240]);
    }

    #[test]
    fn store_then_load_keeps_overrides() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let path = dir.path().join("nested").join("settings.json");
        let mut config = QrConfig::default();
        config.allowed_sizes = vec![128, 256, 512];
        config.request_timeout_secs = Some(15);

        store_settings(&path, &config).expect("store should succeed");
        let loaded = load_settings(&path).expect("load should succeed");

        assert_eq!(loaded, config);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").expect("write fixture failed");

        assert!(matches!(load_settings(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "allowed_sizes": [] }"#).expect("write fixture failed");

        assert!(matches!(load_settings(&path), Err(AppError::Config(_))));
    }
}

//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `QrConfig`：服务地址、可选尺寸、超时、解码上限与保存默认值。
//! 所有字段都带默认值，`settings.json` 只需写出想覆盖的部分。
//!
//! ## 实现思路
//!
//! - `Default` 提供可直接使用的生产配置。
//! - `validate` 在加载或命令行覆盖之后统一做范围检查。
//! - `size_options` 输出界面展示用的尺寸标签。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::QrError;

/// 默认二维码服务地址。
pub const DEFAULT_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// 默认可选尺寸（像素，宽高相同）。
pub const DEFAULT_SIZES: [u32; 10] = [100, 150, 200, 250, 300, 400, 500, 600, 800, 1000];

/// 保存对话框默认文件名。
pub const DEFAULT_FILE_NAME: &str = "qrcode.png";

/// 命令行复制后默认保持剪贴板内容的秒数。
pub const DEFAULT_CLIPBOARD_HOLD_SECS: u64 = 10;
const MAX_CLIPBOARD_HOLD_SECS: u64 = 600;

/// 服务端支持的单边尺寸范围。
const MIN_SIZE: u32 = 10;
const MAX_SIZE: u32 = 1000;

/// 二维码生成配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    /// 二维码服务基础地址，查询参数会拼接在其后。
    pub endpoint: String,
    /// 可选尺寸集合，顺序即展示顺序。
    pub allowed_sizes: Vec<u32>,
    /// 整个请求的超时时间（秒）；`None` 沿用 HTTP 客户端默认值。
    pub request_timeout_secs: Option<u64>,
    /// 建立连接超时时间（秒）。
    pub connect_timeout_secs: Option<u64>,
    pub user_agent: String,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 保存时建议的文件名。
    pub default_file_name: String,
    /// 保存时默认目录；`None` 时使用系统图片目录。
    pub save_dir: Option<PathBuf>,
    /// 复制后保持剪贴板内容的最长秒数（仅 Linux 生效，0 表示不等待）。
    pub clipboard_hold_secs: u64,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            allowed_sizes: DEFAULT_SIZES.to_vec(),
            request_timeout_secs: None,
            connect_timeout_secs: None,
            user_agent: format!("qr-creator/{}", env!("CARGO_PKG_VERSION")),
            max_decoded_pixels: 4_000_000,
            default_file_name: DEFAULT_FILE_NAME.to_string(),
            save_dir: None,
            clipboard_hold_secs: DEFAULT_CLIPBOARD_HOLD_SECS,
        }
    }
}

impl QrConfig {
    /// 校验配置取值范围。
    ///
    /// # 示例
    /// ```rust
    /// use qr_creator::qr_creator::QrConfig;
    ///
    /// let mut config = QrConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.allowed_sizes.clear();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), QrError> {
        let endpoint = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| QrError::InvalidConfig(format!("endpoint 不是合法 URL：{}", e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(QrError::InvalidConfig(format!(
                "endpoint 仅支持 http/https：{}",
                endpoint.scheme()
            )));
        }
        if endpoint.query().is_some() {
            return Err(QrError::InvalidConfig("endpoint 不能包含查询参数".to_string()));
        }
        if endpoint.fragment().is_some() {
            return Err(QrError::InvalidConfig("endpoint 不能包含片段（#）".to_string()));
        }

        if self.allowed_sizes.is_empty() {
            return Err(QrError::InvalidConfig("allowed_sizes 不能为空".to_string()));
        }
        if let Some(size) = self
            .allowed_sizes
            .iter()
            .find(|size| !(MIN_SIZE..=MAX_SIZE).contains(*size))
        {
            return Err(QrError::InvalidConfig(format!(
                "尺寸 {} 超出范围（{}~{}）",
                size, MIN_SIZE, MAX_SIZE
            )));
        }

        if let Some(timeout) = self.request_timeout_secs {
            if !(1..=300).contains(&timeout) {
                return Err(QrError::InvalidConfig("request_timeout_secs 必须在 1~300 秒之间".to_string()));
            }
        }
        if let Some(timeout) = self.connect_timeout_secs {
            if !(1..=120).contains(&timeout) {
                return Err(QrError::InvalidConfig("connect_timeout_secs 必须在 1~120 秒之间".to_string()));
            }
        }

        let max_side = u64::from(self.allowed_sizes.iter().copied().max().unwrap_or(MAX_SIZE));
        if self.max_decoded_pixels < max_side * max_side {
            return Err(QrError::InvalidConfig(format!(
                "max_decoded_pixels 不能小于最大尺寸的像素数（{}）",
                max_side * max_side
            )));
        }

        if self.default_file_name.trim().is_empty() {
            return Err(QrError::InvalidConfig("default_file_name 不能为空".to_string()));
        }

        if self.clipboard_hold_secs > MAX_CLIPBOARD_HOLD_SECS {
            return Err(QrError::InvalidConfig(format!(
                "clipboard_hold_secs 不能超过 {} 秒",
                MAX_CLIPBOARD_HOLD_SECS
            )));
        }

        Ok(())
    }

    /// 尺寸选项的展示标签。
    pub fn size_options(&self) -> Vec<String> {
        self.allowed_sizes.iter().map(|size| size.to_string()).collect()
    }

    pub fn is_allowed_size(&self, size: u32) -> bool {
        self.allowed_sizes.contains(&size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        QrConfig::default()
            .validate()
            .expect("default config should be valid");
    }

    #[test]
    fn validate_rejects_out_of_range_size() {
        let mut config = QrConfig::default();
        config.allowed_sizes.push(2000);

        assert!(matches!(config.validate(), Err(QrError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_endpoint_with_query() {
        let mut config = QrConfig::default();
        config.endpoint = "https://api.qrserver.com/v1/create-qr-code/?size=1x1".to_string();

        assert!(matches!(config.validate(), Err(QrError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_endpoint_with_fragment() {
        let mut config = QrConfig::default();
        config.endpoint = "https://api.qrserver.com/v1/create-qr-code/#x".to_string();

        assert!(matches!(config.validate(), Err(QrError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_non_http_endpoint() {
        let mut config = QrConfig::default();
        config.endpoint = "ftp://example.com/qr".to_string();

        assert!(matches!(config.validate(), Err(QrError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_timeouts_out_of_range() {
        let mut config = QrConfig::default();
        config.request_timeout_secs = Some(0);
        assert!(matches!(config.validate(), Err(QrError::InvalidConfig(_))));

        let mut config = QrConfig::default();
        config.connect_timeout_secs = Some(500);
        assert!(matches!(config.validate(), Err(QrError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_pixel_limit_below_largest_size() {
        let mut config = QrConfig::default();
        config.max_decoded_pixels = 1000;

        assert!(matches!(config.validate(), Err(QrError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_excessive_clipboard_hold() {
        let mut config = QrConfig::default();
        config.clipboard_hold_secs = 0;
        assert!(config.validate().is_ok());

        config.clipboard_hold_secs = 601;
        assert!(matches!(config.validate(), Err(QrError::InvalidConfig(_))));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: QrConfig = serde_json::from_str(r#"{ "allowed_sizes": [120, 240] }"#)
            .expect("partial config should parse");

        assert_eq!(config.allowed_sizes, vec![120, 240]);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.default_file_name, DEFAULT_FILE_NAME);
        assert_eq!(config.size_options(), vec!["120".to_string(), "240".to_string()]);
    }
}

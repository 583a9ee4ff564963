//! # 请求构建模块
//!
//! ## 设计思路
//!
//! 在发出任何网络请求之前完成全部输入校验：文本不能为空白，尺寸必须来自可选集合。
//! 校验通过后才能得到 `GenerationRequest`，因此持有该类型即意味着输入合法。
//!
//! ## 实现思路
//!
//! - 文本保持原样（不 trim），只用于判断是否为空白。
//! - 尺寸从选项标签解析，再检查是否属于 `QrConfig::allowed_sizes`。
//! - `data` 参数按 RFC 3986 百分号编码，仅保留非保留字符原样输出。

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use super::{QrConfig, QrError, ValidationError};

/// 除 RFC 3986 非保留字符（`A-Z a-z 0-9 - _ . ~`）外全部编码。
const DATA_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// 已通过校验的生成请求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    text: String,
    size: u32,
}

impl GenerationRequest {
    /// 校验输入并构建请求。
    ///
    /// `size_option` 为界面上选中的尺寸标签，`None` 表示未选择。
    ///
    /// # 示例
    /// ```rust
    /// use qr_creator::qr_creator::{GenerationRequest, QrConfig};
    ///
    /// let config = QrConfig::default();
    /// let request = GenerationRequest::new("https://example.com", Some("300"), &config)?;
    /// assert_eq!(request.size(), 300);
    /// # Ok::<(), qr_creator::qr_creator::QrError>(())
    /// ```
    pub fn new(text: &str, size_option: Option<&str>, config: &QrConfig) -> Result<Self, QrError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText.into());
        }

        let size = parse_size_option(size_option)?;
        if !config.is_allowed_size(size) {
            return Err(ValidationError::UnsupportedSize(size).into());
        }

        Ok(Self {
            text: text.to_string(),
            size,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 边长（像素），宽高相同。
    pub fn size(&self) -> u32 {
        self.size
    }

    /// 拼出请求地址：`{endpoint}?size={W}x{H}&data={encoded}`。
    ///
    /// 查询串写在解析后的 `Url` 上，endpoint 自带的片段会被丢弃。
    pub fn url(&self, endpoint: &str) -> Result<reqwest::Url, QrError> {
        let mut url = reqwest::Url::parse(endpoint)
            .map_err(|e| QrError::InvalidConfig(format!("无法构建请求地址：{}", e)))?;

        url.set_fragment(None);
        url.set_query(Some(&format!(
            "size={}x{}&data={}",
            self.size,
            self.size,
            encode_data(&self.text)
        )));

        Ok(url)
    }
}

fn parse_size_option(size_option: Option<&str>) -> Result<u32, ValidationError> {
    let label = size_option
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .ok_or(ValidationError::MissingSize)?;

    match label.parse::<u32>() {
        Ok(0) | Err(_) => Err(ValidationError::UnparsableSize(label.to_string())),
        Ok(size) => Ok(size),
    }
}

/// 对 `data` 参数做百分号编码。
pub fn encode_data(text: &str) -> String {
    utf8_percent_encode(text, DATA_ENCODE_SET).to_string()
}

/// 从请求地址中取出 `data` 参数并解码。
pub fn decode_data_param(url: &reqwest::Url) -> Option<String> {
    url.query()?
        .split('&')
        .find_map(|pair| pair.strip_prefix("data="))
        .and_then(|encoded| percent_decode_str(encoded).decode_utf8().ok())
        .map(|decoded| decoded.into_owned())
}

/// 日志输出用：去掉查询参数（其中含用户文本）与片段。
pub(crate) fn redact_url_for_log(url: &reqwest::Url) -> String {
    let mut redacted = url.clone();
    redacted.set_query(None);
    redacted.set_fragment(None);
    redacted.to_string()
}

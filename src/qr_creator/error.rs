//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载二维码生成链路中的所有失败来源：
//! 校验 → 网络 → 解码，以及下游的保存与复制。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。

/// 输入校验失败的具体原因。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("输入文本为空")]
    EmptyText,

    #[error("未选择二维码尺寸")]
    MissingSize,

    #[error("无法解析尺寸：{0}")]
    UnparsableSize(String),

    #[error("尺寸不在可选范围内：{0}")]
    UnsupportedSize(u32),
}

/// 二维码生成链路统一错误类型。
///
/// 该类型会在应用层被上转为 `AppError`。
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("校验错误：{0}")]
    Validation(#[from] ValidationError),

    /// `status` 为 `None` 表示请求未拿到 HTTP 响应（连接失败、超时等）。
    #[error("网络错误：{message}")]
    Network { status: Option<u16>, message: String },

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("剪贴板错误：{0}")]
    Clipboard(String),

    #[error("配置错误：{0}")]
    InvalidConfig(String),
}

impl QrError {
    pub(crate) fn network_status(status: u16, message: impl Into<String>) -> Self {
        Self::Network {
            status: Some(status),
            message: message.into(),
        }
    }

    pub(crate) fn network_transport(message: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            message: message.into(),
        }
    }

    /// 稳定的错误码，供界面与日志聚合使用。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(ValidationError::EmptyText) => "EMPTY_TEXT",
            Self::Validation(_) => "INVALID_SIZE",
            Self::Network { status: Some(_), .. } => "HTTP_STATUS",
            Self::Network { status: None, .. } => "NETWORK",
            Self::Decode(_) => "DECODE",
            Self::FileSystem(_) => "FILE_SYSTEM",
            Self::Clipboard(_) => "CLIPBOARD",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }

    /// 出错所在阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validate",
            Self::Network { .. } => "fetch",
            Self::Decode(_) => "decode",
            Self::FileSystem(_) => "save",
            Self::Clipboard(_) => "copy",
            Self::InvalidConfig(_) => "config",
        }
    }

    /// 网络失败时的 HTTP 状态码。
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<QrError> for String {
    fn from(error: QrError) -> Self {
        error.to_string()
    }
}

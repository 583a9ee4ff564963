//! # 用户提示模块
//!
//! 模态对话框抽象为 `Notifier`：工作流只产出 `Notice`，
//! 由调用方决定是弹窗、打印到终端还是写日志。

use std::path::PathBuf;

use super::{QrError, ValidationError};

/// 提示级别，对应对话框图标。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// 工作流产生的用户提示。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptyInput,
    InvalidSize,
    /// 网络失败，携带状态码或错误描述。
    NetworkError(String),
    /// 解码、保存、复制等其他失败。
    Failed(String),
    Generated { size: u32 },
    Saved(PathBuf),
    Copied,
}

impl Notice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Self::EmptyInput | Self::InvalidSize => NoticeLevel::Warning,
            Self::NetworkError(_) | Self::Failed(_) => NoticeLevel::Error,
            Self::Generated { .. } | Self::Saved(_) | Self::Copied => NoticeLevel::Info,
        }
    }

    /// 对话框标题。
    pub fn title(&self) -> &'static str {
        match self.level() {
            NoticeLevel::Info => "成功",
            NoticeLevel::Warning | NoticeLevel::Error => "错误",
        }
    }

    /// 对话框正文。
    pub fn message(&self) -> String {
        match self {
            Self::EmptyInput => "请输入文本或链接！".to_string(),
            Self::InvalidSize => "请选择正确的二维码尺寸。".to_string(),
            Self::NetworkError(detail) => format!("创建二维码时出错：{}", detail),
            Self::Failed(detail) => format!("发生错误：{}", detail),
            Self::Generated { size } => format!("二维码创建成功！（{}x{}）", size, size),
            Self::Saved(path) => format!("二维码已保存！{}", path.display()),
            Self::Copied => "二维码已复制到剪贴板！".to_string(),
        }
    }

    /// 将失败映射为对应提示。
    pub fn from_error(error: &QrError) -> Self {
        match error {
            QrError::Validation(ValidationError::EmptyText) => Self::EmptyInput,
            QrError::Validation(_) => Self::InvalidSize,
            QrError::Network { message, .. } => Self::NetworkError(message.clone()),
            other => Self::Failed(other.to_string()),
        }
    }
}

/// 提示展示方。
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// 只写日志的默认实现。
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level() {
            NoticeLevel::Info => log::info!("[{}] {}", notice.title(), notice.message()),
            NoticeLevel::Warning => log::warn!("[{}] {}", notice.title(), notice.message()),
            NoticeLevel::Error => log::error!("[{}] {}", notice.title(), notice.message()),
        }
    }
}

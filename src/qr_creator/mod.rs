//! # 二维码生成模块（qr_creator）
//!
//! ## 设计思路
//!
//! 该模块将“输入校验 → 构建请求 → 下载 → 解码 → 保存/复制”按职责拆分为多个子模块。
//! 二维码编码本身完全交给远端服务，本模块只负责把一次生成做对、做稳。
//!
//! - `commands`：终端入口的参数适配与提示输出（薄封装）
//! - `workflow`：编排整条生成链路，持有当前图像
//! - `request`：输入校验与请求地址构建
//! - `fetcher`：HTTP 请求
//! - `pipeline`：签名校验、解码、尺寸修正
//! - `saver` / `clipboard_writer`：下游的保存与复制
//! - `notifier`：用户提示（对话框的抽象）
//! - `config/error/model`：配置、错误、数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! main.rs / 外部界面
//!    ↓
//! commands.rs（参数适配 + 终端提示）
//!    ↓
//! workflow.rs（统一编排 + 阶段耗时日志）
//!    ├─ request.rs（校验 + URL 编码）
//!    ├─ fetcher.rs（一次 GET，无重试）
//!    ├─ pipeline.rs（签名 + 解码 + 缩放）
//!    ├─ saver.rs（PNG 写盘）
//!    └─ clipboard_writer.rs（写剪贴板）
//!    ↓
//! 返回 QrError / 通过 Notifier 提示
//! ```

pub mod commands;
mod clipboard_writer;
mod config;
mod error;
mod fetcher;
mod model;
mod notifier;
mod pipeline;
mod request;
mod saver;
mod workflow;

pub use clipboard_writer::{ClipboardSink, SystemClipboard};
pub use config::{
    DEFAULT_CLIPBOARD_HOLD_SECS, DEFAULT_ENDPOINT, DEFAULT_FILE_NAME, DEFAULT_SIZES, QrConfig,
};
pub use error::{QrError, ValidationError};
pub use fetcher::{HttpFetcher, ImageFetcher};
pub use model::{GeneratedImage, GenerationPhase};
pub use notifier::{LogNotifier, Notice, NoticeLevel, Notifier};
pub use pipeline::decode_qr_image;
pub use request::{GenerationRequest, decode_data_param, encode_data};
pub use saver::{SaveDialogRequest, SavePathPicker, write_png};
pub use workflow::{OperationResult, QrWorkflow};

/// 模块注册信息（在工具集合中展示用）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

pub const MODULE_INFO: ModuleInfo = ModuleInfo {
    id: "QrCreatorModule",
    display_name: "从任意文本创建二维码",
    category: "工具",
    description: "可从任意文本创建二维码，并可选择尺寸。",
};

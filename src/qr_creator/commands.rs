//! # 命令层
//!
//! ## 设计思路
//!
//! 命令层仅做参数接收与结果输出，不承载业务逻辑。
//! 对话框在终端里的替身是 `ConsoleNotifier`，保存对话框的替身是 `PresetSavePicker`。

use std::path::PathBuf;
use std::sync::Arc;

use super::{
    ClipboardSink, ImageFetcher, Notice, NoticeLevel, Notifier, QrError, QrWorkflow,
    SaveDialogRequest, SavePathPicker,
};

/// 将提示打印到终端：成功信息写 stdout，警告与错误写 stderr。
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level() {
            NoticeLevel::Info => {
                log::debug!("提示：{}", notice.message());
                println!("[{}] {}", notice.title(), notice.message());
            }
            NoticeLevel::Warning | NoticeLevel::Error => {
                eprintln!("[{}] {}", notice.title(), notice.message());
            }
        }
    }
}

/// 非交互的保存位置选择：使用预先给定的路径，或按建议目录 + 文件名拼出路径。
#[derive(Debug, Clone, Default)]
pub struct PresetSavePicker {
    path: Option<PathBuf>,
}

impl PresetSavePicker {
    /// `path` 为 `None` 时使用对话框建议的位置。
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl SavePathPicker for PresetSavePicker {
    fn pick_save_path(&self, request: &SaveDialogRequest) -> Option<PathBuf> {
        if let Some(path) = &self.path {
            return Some(path.clone());
        }

        match crate::storage::resolve_save_dir(request.suggested_dir.as_deref()) {
            Ok(dir) => Some(dir.join(&request.suggested_file_name)),
            Err(e) => {
                log::warn!("⚠️ 无法确定保存目录：{}", e);
                None
            }
        }
    }
}

/// 一次命令行生成请求。
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub text: String,
    pub size: Option<String>,
    /// `Some(None)` 表示保存到建议位置。
    pub save: Option<Option<PathBuf>>,
    pub copy: bool,
}

/// 执行生成，并按需保存、复制。
///
/// 任一步失败都会返回错误；提示已经由工作流的 `Notifier` 输出。
pub async fn run_generate<F, N, C>(
    workflow: &QrWorkflow<F, N>,
    options: GenerateOptions,
    clipboard: Arc<C>,
) -> Result<(), QrError>
where
    F: ImageFetcher,
    N: Notifier,
    C: ClipboardSink,
{
    workflow
        .generate(&options.text, options.size.as_deref())
        .await?;

    if let Some(path) = options.save {
        workflow.save(&PresetSavePicker::new(path))?;
    }

    if options.copy {
        workflow.copy(clipboard).await?;
    }

    Ok(())
}

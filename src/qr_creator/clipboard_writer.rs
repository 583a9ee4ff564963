//! # 剪贴板写入模块
//!
//! ## 设计思路
//!
//! 与操作系统剪贴板交互的逻辑独立出来，通过 `ClipboardSink` 注入，便于隔离平台差异与测试。
//! 写入是阻塞调用，工作流会把它放到阻塞线程执行，避免阻塞 async 运行时。
//!
//! ## 实现思路
//!
//! 默认实现 `SystemClipboard` 使用 `arboard` 写入 RGBA 图像；失败不重试，直接上报。
//!
//! Linux（X11/Wayland）上剪贴板内容由写入进程自己提供，进程退出后内容随之失效。
//! 短生命周期的调用方（如命令行）可以设置保持时长：写入后最多阻塞到该时长，
//! 期间若剪贴板管理器或其他程序接管了内容则提前返回。其他平台忽略该设置。

use std::borrow::Cow;
use std::time::Duration;

use super::model::GeneratedImage;
use super::QrError;

/// 剪贴板写入方。
pub trait ClipboardSink: Send + Sync + 'static {
    /// 以图像格式写入剪贴板。
    fn write_image(&self, image: &GeneratedImage) -> Result<(), QrError>;
}

/// 系统剪贴板（`arboard`）。
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard {
    hold: Duration,
}

impl SystemClipboard {
    /// 写入后立即返回，适合常驻进程。
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入后在 Linux 上最多保持 `hold` 时长，`Duration::ZERO` 等同于 `new`。
    pub fn holding_for(hold: Duration) -> Self {
        Self { hold }
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    #[cfg(target_os = "linux")]
    fn set_image(
        &self,
        clipboard: &mut arboard::Clipboard,
        data: arboard::ImageData<'_>,
    ) -> Result<(), arboard::Error> {
        use arboard::SetExtLinux;

        if self.hold.is_zero() {
            return clipboard.set_image(data);
        }

        log::info!("📋 保持剪贴板内容，最长 {} 秒", self.hold.as_secs());
        clipboard
            .set()
            .wait_until(std::time::Instant::now() + self.hold)
            .image(data)
    }

    #[cfg(not(target_os = "linux"))]
    fn set_image(
        &self,
        clipboard: &mut arboard::Clipboard,
        data: arboard::ImageData<'_>,
    ) -> Result<(), arboard::Error> {
        clipboard.set_image(data)
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_image(&self, image: &GeneratedImage) -> Result<(), QrError> {
        log::debug!("📋 准备复制到剪贴板 - {}x{}", image.width(), image.height());

        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| QrError::Clipboard(format!("无法访问剪贴板：{}", e)))?;

        let image_data = arboard::ImageData {
            width: image.width() as usize,
            height: image.height() as usize,
            bytes: Cow::Borrowed(image.pixels().as_raw()),
        };

        self.set_image(&mut clipboard, image_data)
            .map_err(|e| QrError::Clipboard(format!("复制失败：{}", e)))?;

        Ok(())
    }
}

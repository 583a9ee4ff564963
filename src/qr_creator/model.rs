//! # 数据模型
//!
//! - `GeneratedImage`：解码完成、可展示/保存/复制的二维码位图
//! - `GenerationPhase`：单次生成周期所处的阶段

use chrono::{DateTime, Local};
use image::RgbaImage;

/// 生成成功后持有的二维码图像。
///
/// 只会在“下载 + 解码”都成功后创建，尺寸恒为 `size × size`。
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub(crate) text: String,
    pub(crate) size: u32,
    pub(crate) pixels: RgbaImage,
    pub(crate) generated_at: DateTime<Local>,
}

impl GeneratedImage {
    /// 生成该图像时使用的原始文本。
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// RGBA 像素缓冲。
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn generated_at(&self) -> DateTime<Local> {
        self.generated_at
    }
}

/// 生成周期状态机：`Idle → Validating → Requesting → Decoding → Ready`。
///
/// 任一阶段失败都回到 `Idle`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Validating,
    Requesting,
    Decoding,
    Ready,
}

impl GenerationPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Requesting => "requesting",
            Self::Decoding => "decoding",
            Self::Ready => "ready",
        }
    }
}

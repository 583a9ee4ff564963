//! # 保存模块
//!
//! ## 设计思路
//!
//! “选择保存位置”属于界面能力，通过 `SavePathPicker` 注入；
//! 本模块只负责把位图编码为 PNG 写入选定路径。
//!
//! ## 实现思路
//!
//! 文件句柄只存在于 `write_png` 的作用域内，编码失败、刷新失败都会随作用域结束释放。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::model::GeneratedImage;
use super::QrError;

/// 保存对话框参数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveDialogRequest {
    /// 建议文件名，默认 `qrcode.png`。
    pub suggested_file_name: String,
    /// 建议目录。
    pub suggested_dir: Option<PathBuf>,
    /// 过滤器显示名。
    pub filter_name: &'static str,
    /// 过滤器扩展名（不含点）。
    pub filter_extension: &'static str,
}

impl SaveDialogRequest {
    pub fn png(suggested_file_name: impl Into<String>, suggested_dir: Option<PathBuf>) -> Self {
        Self {
            suggested_file_name: suggested_file_name.into(),
            suggested_dir,
            filter_name: "PNG Image",
            filter_extension: "png",
        }
    }
}

/// 保存位置选择方（原生保存对话框等）。
pub trait SavePathPicker {
    /// 返回用户选定的路径；`None` 表示用户取消。
    fn pick_save_path(&self, request: &SaveDialogRequest) -> Option<PathBuf>;
}

/// 将图像编码为 PNG 写入 `path`。
pub fn write_png(image: &GeneratedImage, path: &Path) -> Result<(), QrError> {
    let file = File::create(path)
        .map_err(|e| QrError::FileSystem(format!("无法创建文件 {}：{}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);

    PngEncoder::new(&mut writer)
        .write_image(
            image.pixels().as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| QrError::FileSystem(format!("PNG 编码失败：{}", e)))?;

    writer
        .flush()
        .map_err(|e| QrError::FileSystem(format!("写入文件失败：{}", e)))?;

    log::info!("💾 二维码已保存 - {}", path.display());
    Ok(())
}

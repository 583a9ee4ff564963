//! 保存目录管理模块
//!
//! # 设计思路
//!
//! 统一决定二维码图片的默认保存目录，支持用户自定义目录，
//! 并在目录不存在时自动创建。
//!
//! # 实现思路
//!
//! - 优先使用设置中配置的自定义目录。
//! - 未设置时回退到系统图片目录，其次是用户主目录，最后是当前目录。
//! - 目录不存在时自动 `create_dir_all`，避免上层判断。
//! - 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// 获取保存目录
///
/// # 参数
/// * `custom_dir` - 用户自定义目录（可选）
///
/// # 返回
/// - `Ok(PathBuf)` — 可用的保存目录
/// - `Err(AppError::Storage)` — 无法获取或创建目录
pub fn resolve_save_dir(custom_dir: Option<&Path>) -> Result<PathBuf, AppError> {
    // 优先使用用户自定义目录
    if let Some(dir) = custom_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                AppError::Storage(format!("创建自定义目录 '{}' 失败: {}", dir.display(), e))
            })?;
        }
        return Ok(dir.to_path_buf());
    }

    if let Some(dir) = dirs::picture_dir().or_else(dirs::home_dir) {
        return Ok(dir);
    }

    std::env::current_dir()
        .map_err(|e| AppError::Storage(format!("获取当前目录失败: {}", e)))
}

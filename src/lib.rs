//! # 二维码生成工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │            外部界面 / 终端 (main.rs + clap)               │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ Result<T, AppError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ qr_creator   校验·请求·解码·保存·复制                  │
//! │  │   ├─ workflow       当前图像槽位 + 阶段状态机          │
//! │  │   └─ commands       终端提示与保存位置                 │
//! │  │                                                       │
//! │  ├─ settings     settings.json 读写                      │
//! │  └─ storage      默认保存目录                             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`qr_creator`] | 从文本请求二维码图片，持有结果并支持保存/复制 |
//! | [`settings`] | 设置文件的定位、加载与写回 |
//! | [`storage`] | 保存目录的获取与自动创建 |

pub mod error;
pub mod qr_creator;
pub mod settings;
pub mod storage;

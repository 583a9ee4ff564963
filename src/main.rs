//! # 二维码生成工具 — 应用入口
//!
//! 本文件仅负责日志初始化、设置加载与子命令分发。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

mod cli;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use qr_creator::error::AppError;
use qr_creator::qr_creator::commands::{self, ConsoleNotifier, GenerateOptions};
use qr_creator::qr_creator::{HttpFetcher, MODULE_INFO, QrConfig, QrWorkflow, SystemClipboard};
use qr_creator::settings;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::log!(failure_log_level(&err), "{err}");
            ExitCode::FAILURE
        }
    }
}

/// 生成链路的失败已经由 `ConsoleNotifier` 输出，这里只在 debug 级别补记。
fn failure_log_level(err: &AppError) -> log::Level {
    match err {
        AppError::Qr(_) => log::Level::Debug,
        _ => log::Level::Error,
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let settings_path = match cli.config {
        Some(path) => Some(path),
        None => match settings::settings_file_path() {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("⚠️ {}", e);
                None
            }
        },
    };

    let mut config = settings::load_settings_or_default(settings_path.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    config
        .validate()
        .map_err(|e| AppError::Config(e.to_string()))?;

    match cli.command {
        Command::Generate(args) => {
            let clipboard =
                SystemClipboard::holding_for(Duration::from_secs(config.clipboard_hold_secs));
            let fetcher =
                HttpFetcher::new(&config).map_err(|e| AppError::Config(e.to_string()))?;
            let workflow = QrWorkflow::new(config, fetcher, ConsoleNotifier)
                .map_err(|e| AppError::Config(e.to_string()))?;
            let options = GenerateOptions {
                text: args.text,
                size: args.size,
                save: args.save,
                copy: args.copy,
            };
            commands::run_generate(&workflow, options, Arc::new(clipboard)).await?;
        }
        Command::Sizes => print_sizes(&config),
        Command::Info => {
            println!("{} ({})", MODULE_INFO.display_name, MODULE_INFO.id);
            println!("分类: {}", MODULE_INFO.category);
            println!("{}", MODULE_INFO.description);
        }
        Command::Settings(args) => {
            let content = serde_json::to_string_pretty(&config)
                .map_err(|e| AppError::Config(format!("序列化设置失败: {}", e)))?;
            println!("{content}");
            if args.write_defaults {
                let path = settings_path.ok_or_else(|| {
                    AppError::Storage("找不到配置目录，请通过 --config 指定设置文件".to_string())
                })?;
                settings::store_settings(&path, &config)?;
                log::info!("💾 设置已写入: {}", path.display());
            }
        }
    }

    Ok(())
}

fn print_sizes(config: &QrConfig) {
    for option in config.size_options() {
        println!("{option}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qr_creator::qr_creator::QrError;

    #[test]
    fn generation_failures_are_not_logged_twice() {
        let notified = AppError::Qr(QrError::Decode("bad".to_string()));
        let config = AppError::Config("endpoint 不是合法 URL".to_string());

        assert_eq!(failure_log_level(&notified), log::Level::Debug);
        assert_eq!(failure_log_level(&config), log::Level::Error);
    }
}

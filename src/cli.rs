use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(version, about = "从任意文本创建二维码")]
pub struct Cli {
    /// 设置文件路径（默认位于系统配置目录）
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 覆盖二维码服务地址
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// 生成二维码，可选保存与复制
    Generate(Generate),
    /// 列出可选尺寸
    Sizes,
    /// 显示模块信息
    Info,
    /// 显示当前生效的设置
    Settings(Settings),
}

#[derive(Debug, clap::Args)]
pub struct Generate {
    /// 文本或链接
    #[arg(short, long)]
    pub text: String,

    /// 尺寸（边长像素，必须是可选尺寸之一）
    #[arg(short, long)]
    pub size: Option<String>,

    /// 保存为 PNG；不带路径时保存到默认目录下的 qrcode.png
    #[arg(long, num_args = 0..=1)]
    pub save: Option<Option<PathBuf>>,

    /// 复制到剪贴板
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, clap::Args)]
pub struct Settings {
    /// 把当前生效的设置写回设置文件
    #[arg(long)]
    pub write_defaults: bool,
}

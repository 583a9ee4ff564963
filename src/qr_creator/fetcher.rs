//! # 下载模块
//!
//! ## 设计思路
//!
//! 网络访问通过 `ImageFetcher` 抽象注入，工作流本身不依赖具体 HTTP 实现，
//! 测试可替换为本地桩实现。
//!
//! ## 实现思路
//!
//! - `HttpFetcher` 基于复用的 `reqwest::Client`，每次生成只发一次 GET。
//! - 非 2xx 状态码映射为带状态码的 `QrError::Network`。
//! - 连接、超时等传输错误映射为不带状态码的 `QrError::Network`。
//! - 不做重试，也不做缓存。

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;

use super::request::redact_url_for_log;
use super::{QrConfig, QrError};

/// 二维码图片获取方。
pub trait ImageFetcher: Send + Sync {
    /// 请求 `url` 并返回响应体原始字节。
    fn fetch(&self, url: &reqwest::Url) -> impl Future<Output = Result<Bytes, QrError>> + Send;
}

/// 基于 `reqwest` 的默认实现。
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// 按配置构建可复用的 HTTP 客户端。
    pub fn new(config: &QrConfig) -> Result<Self, QrError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());

        if let Some(timeout) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        if let Some(timeout) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| QrError::InvalidConfig(format!("HTTP 客户端初始化失败：{}", e)))?;

        Ok(Self { client })
    }

    fn map_reqwest_error(e: reqwest::Error) -> QrError {
        // reqwest 的错误文本会带上完整 URL，这里去掉以免泄露用户文本
        let e = e.without_url();
        if e.is_timeout() {
            QrError::network_transport(format!("请求超时：{}", e))
        } else if e.is_connect() {
            QrError::network_transport(format!("无法连接：{}", e))
        } else {
            QrError::network_transport(format!("请求失败：{}", e))
        }
    }

    /// 常见 HTTP 状态码本地化文案。
    fn status_message(code: u16) -> &'static str {
        match code {
            400 => "请求参数错误",
            404 => "未找到",
            403 => "访问被拒绝",
            414 => "文本过长",
            429 => "请求过于频繁",
            500..=599 => "服务器错误",
            _ => "请求失败",
        }
    }
}

impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &reqwest::Url) -> Result<Bytes, QrError> {
        log::debug!("📡 发送 HTTP 请求 - {}", redact_url_for_log(url));

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(Self::map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("❌ 二维码服务返回 HTTP {}", status.as_u16());
            return Err(QrError::network_status(
                status.as_u16(),
                format!("HTTP {}: {}", status.as_u16(), Self::status_message(status.as_u16())),
            ));
        }

        let bytes = response.bytes().await.map_err(Self::map_reqwest_error)?;
        log::debug!("📥 收到响应 {} 字节", bytes.len());

        Ok(bytes)
    }
}

//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `QrWorkflow` 负责流程编排，不直接与任何界面框架绑定。
//! 生成链路固定为：
//! 1. 校验输入并构建请求地址
//! 2. 请求二维码服务（唯一的挂起点）
//! 3. 解码为位图
//! 4. 替换当前持有的图像
//!
//! ## 实现思路
//!
//! - 当前图像保存在单一槽位 `Mutex<Option<Arc<GeneratedImage>>>` 中，只在生成成功后整体替换。
//! - 失败不会清空已有图像，只把阶段退回 `Idle`。
//! - 多次生成并发时互不取消，后返回的响应覆盖先前结果。
//! - 每次生成分配递增的周期号，只有最新周期可以改写 `phase`，旧周期的失败不会把新周期的阶段退回 `Idle`。
//! - 记录 `validate/fetch/decode/total` 阶段耗时，便于性能诊断。

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::clipboard_writer::ClipboardSink;
use super::fetcher::{HttpFetcher, ImageFetcher};
use super::model::{GeneratedImage, GenerationPhase};
use super::notifier::{LogNotifier, Notice, Notifier};
use super::pipeline::decode_qr_image;
use super::request::{GenerationRequest, redact_url_for_log};
use super::saver::{SaveDialogRequest, SavePathPicker, write_png};
use super::{QrConfig, QrError};

/// 一次生成的结果：成功时为新持有的图像。
pub type OperationResult = Result<Arc<GeneratedImage>, QrError>;

/// 一次生成各阶段耗时。
#[derive(Debug, Clone, Copy, Default)]
struct StageTimings {
    validate: Duration,
    fetch: Duration,
    decode: Duration,
    total: Duration,
}

impl StageTimings {
    fn summary(&self) -> String {
        format!(
            "validate={}ms fetch={}ms decode={}ms total={}ms",
            self.validate.as_millis(),
            self.fetch.as_millis(),
            self.decode.as_millis(),
            self.total.as_millis()
        )
    }
}

/// 二维码生成工作流。
pub struct QrWorkflow<F = HttpFetcher, N = LogNotifier> {
    config: QrConfig,
    fetcher: F,
    notifier: N,
    current: Mutex<Option<Arc<GeneratedImage>>>,
    phase: Mutex<GenerationPhase>,
    /// 最近一次发起的生成周期号。
    cycle: AtomicU64,
}

impl QrWorkflow<HttpFetcher, LogNotifier> {
    /// 使用真实 HTTP 客户端与日志提示创建工作流。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use qr_creator::qr_creator::{QrConfig, QrWorkflow};
    ///
    /// # async fn demo() -> Result<(), qr_creator::qr_creator::QrError> {
    /// let workflow = QrWorkflow::from_config(QrConfig::default())?;
    /// let image = workflow.generate("https://example.com", Some("300")).await?;
    /// assert_eq!(image.width(), 300);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config(config: QrConfig) -> Result<Self, QrError> {
        let fetcher = HttpFetcher::new(&config)?;
        Self::new(config, fetcher, LogNotifier)
    }
}

impl<F: ImageFetcher, N: Notifier> QrWorkflow<F, N> {
    /// 注入下载方与提示方创建工作流。配置会先经过校验。
    pub fn new(config: QrConfig, fetcher: F, notifier: N) -> Result<Self, QrError> {
        config.validate()?;
        Ok(Self {
            config,
            fetcher,
            notifier,
            current: Mutex::new(None),
            phase: Mutex::new(GenerationPhase::Idle),
            cycle: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &QrConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// 当前生成周期所处阶段。
    pub fn phase(&self) -> GenerationPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 当前持有的图像（最近一次成功生成的结果）。
    pub fn current_image(&self) -> Option<Arc<GeneratedImage>> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 第 1 步：校验输入并构建请求。
    pub fn validate_and_build_request(
        &self,
        text: &str,
        size_option: Option<&str>,
    ) -> Result<(GenerationRequest, reqwest::Url), QrError> {
        let request = GenerationRequest::new(text, size_option, &self.config)?;
        let url = request.url(&self.config.endpoint)?;
        Ok((request, url))
    }

    /// 第 2 步：请求二维码服务。
    pub async fn fetch_image(&self, url: &reqwest::Url) -> Result<bytes::Bytes, QrError> {
        self.fetcher.fetch(url).await
    }

    /// 第 3 步：解码为可展示的图像。
    pub fn decode_and_present(
        &self,
        bytes: &[u8],
        request: &GenerationRequest,
    ) -> Result<GeneratedImage, QrError> {
        decode_qr_image(bytes, request, &self.config)
    }

    /// 生成主入口：校验 → 请求 → 解码 → 替换当前图像。
    ///
    /// 失败时通过 `Notifier` 提示并返回错误，已持有的图像保持不变。
    pub async fn generate(&self, text: &str, size_option: Option<&str>) -> OperationResult {
        let cycle = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;

        match self.run_generation(cycle, text, size_option).await {
            Ok(image) => {
                self.notifier.notify(&Notice::Generated { size: image.size() });
                Ok(image)
            }
            Err(err) => {
                self.set_phase(cycle, GenerationPhase::Idle);
                log::warn!("❌ 二维码生成失败 - code={} stage={}：{}", err.code(), err.stage(), err);
                self.notifier.notify(&Notice::from_error(&err));
                Err(err)
            }
        }
    }

    async fn run_generation(
        &self,
        cycle: u64,
        text: &str,
        size_option: Option<&str>,
    ) -> OperationResult {
        let total_start = Instant::now();
        let mut timings = StageTimings::default();

        self.set_phase(cycle, GenerationPhase::Validating);
        let (request, url) = self.validate_and_build_request(text, size_option)?;
        timings.validate = total_start.elapsed();
        log::info!(
            "🌐 请求二维码 - {} size={}x{} 文本长度={}",
            redact_url_for_log(&url),
            request.size(),
            request.size(),
            request.text().chars().count()
        );

        self.set_phase(cycle, GenerationPhase::Requesting);
        let fetch_start = Instant::now();
        let bytes = self.fetch_image(&url).await?;
        timings.fetch = fetch_start.elapsed();

        self.set_phase(cycle, GenerationPhase::Decoding);
        let decode_start = Instant::now();
        let image = Arc::new(self.decode_and_present(&bytes, &request)?);
        timings.decode = decode_start.elapsed();

        self.replace_current(Arc::clone(&image));
        self.set_phase(cycle, GenerationPhase::Ready);

        timings.total = total_start.elapsed();
        log::info!("✅ 二维码生成完成 - {}", timings.summary());

        Ok(image)
    }

    /// 保存当前图像为 PNG。
    ///
    /// 返回值：
    /// - `Ok(Some(path))`：已保存
    /// - `Ok(None)`：没有可保存的图像，或用户取消了保存对话框
    pub fn save(&self, picker: &impl SavePathPicker) -> Result<Option<PathBuf>, QrError> {
        let Some(image) = self.current_image() else {
            log::debug!("⏭️ 当前没有二维码，跳过保存");
            return Ok(None);
        };

        let dialog = SaveDialogRequest::png(
            self.config.default_file_name.clone(),
            self.config.save_dir.clone(),
        );
        let Some(path) = picker.pick_save_path(&dialog) else {
            log::debug!("⏭️ 用户取消保存");
            return Ok(None);
        };

        if let Err(err) = write_png(&image, &path) {
            self.notifier.notify(&Notice::from_error(&err));
            return Err(err);
        }

        self.notifier.notify(&Notice::Saved(path.clone()));
        Ok(Some(path))
    }

    /// 将当前图像复制到剪贴板。返回是否实际执行了复制。
    pub async fn copy<C: ClipboardSink>(&self, sink: Arc<C>) -> Result<bool, QrError> {
        let Some(image) = self.current_image() else {
            log::debug!("⏭️ 当前没有二维码，跳过复制");
            return Ok(false);
        };

        let result = tokio::task::spawn_blocking(move || sink.write_image(&image))
            .await
            .map_err(|e| QrError::Clipboard(format!("线程执行失败：{}", e)))
            .and_then(|inner| inner);

        match result {
            Ok(()) => {
                log::info!("✅ 二维码已复制到剪贴板");
                self.notifier.notify(&Notice::Copied);
                Ok(true)
            }
            Err(err) => {
                self.notifier.notify(&Notice::from_error(&err));
                Err(err)
            }
        }
    }

    /// 只有最新周期可以改写阶段。
    fn set_phase(&self, cycle: u64, phase: GenerationPhase) {
        let mut current = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if self.cycle.load(Ordering::SeqCst) != cycle {
            log::debug!("⏭️ 周期 {} 已过期，忽略阶段 {}", cycle, phase.as_str());
            return;
        }
        log::debug!("🔁 阶段切换 -> {}", phase.as_str());
        *current = phase;
    }

    fn replace_current(&self, image: Arc<GeneratedImage>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(image);
    }
}

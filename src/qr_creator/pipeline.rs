//! # 解码流水线模块
//!
//! ## 设计思路
//!
//! 将“响应字节 → 可展示位图”的过程集中管理，并在完整解码前做签名与尺寸检查，
//! 避免把 HTML 错误页或异常大的图片交给解码器。
//!
//! ## 实现思路
//!
//! 1. 通过文件签名确认是图片
//! 2. 读取 header 尺寸并按像素上限快速拒绝
//! 3. 完整解码为 RGBA
//! 4. 若服务返回的尺寸与请求不一致，缩放到 `size × size`

use chrono::Local;
use fast_image_resize as fr;
use image::{DynamicImage, GenericImageView, ImageBuffer, Rgba, RgbaImage};
use image::imageops::FilterType;
use std::io::Cursor;

use super::model::GeneratedImage;
use super::request::GenerationRequest;
use super::{QrConfig, QrError};

/// 将响应字节解码为 `GeneratedImage`。
pub fn decode_qr_image(
    bytes: &[u8],
    request: &GenerationRequest,
    config: &QrConfig,
) -> Result<GeneratedImage, QrError> {
    validate_image_signature(bytes)?;

    let (header_width, header_height) = inspect_dimensions_from_memory(bytes)?;
    validate_pixel_limits(config, header_width, header_height)?;

    let decoded = image::load_from_memory(bytes)
        .map_err(|e| QrError::Decode(format!("图片解码失败：{}", e)))?;

    let (raw_width, raw_height) = decoded.dimensions();
    let size = request.size();
    let pixels = if raw_width == size && raw_height == size {
        decoded.into_rgba8()
    } else {
        log::warn!(
            "⚠️ 服务返回尺寸 {}x{} 与请求 {}x{} 不一致，缩放到请求尺寸",
            raw_width,
            raw_height,
            size,
            size
        );
        resize_to_square(decoded, size)?
    };

    log::info!(
        "✅ 二维码解码成功 - 原始尺寸: {}x{} 输出尺寸: {}x{}",
        raw_width,
        raw_height,
        pixels.width(),
        pixels.height()
    );

    Ok(GeneratedImage {
        text: request.text().to_string(),
        size,
        pixels,
        generated_at: Local::now(),
    })
}

/// 通过文件签名（magic bytes）校验响应是否为图片。
fn validate_image_signature(bytes: &[u8]) -> Result<(), QrError> {
    if bytes.is_empty() {
        return Err(QrError::Decode("响应内容为空".to_string()));
    }

    let kind = infer::get(bytes)
        .ok_or_else(|| QrError::Decode("无法识别图片类型".to_string()))?;

    if kind.matcher_type() != infer::MatcherType::Image {
        return Err(QrError::Decode(format!(
            "响应内容不是图片类型：{}",
            kind.mime_type()
        )));
    }

    Ok(())
}

/// 仅通过图片头信息读取宽高。
fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), QrError> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| QrError::Decode(format!("无法识别图片格式：{}", e)))?
        .into_dimensions()
        .map_err(|e| QrError::Decode(format!("无法读取图片尺寸：{}", e)))
}

fn validate_pixel_limits(config: &QrConfig, width: u32, height: u32) -> Result<(), QrError> {
    let pixels = u64::from(width) * u64::from(height);

    if pixels > config.max_decoded_pixels {
        return Err(QrError::Decode(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, config.max_decoded_pixels
        )));
    }

    Ok(())
}

fn resize_to_square(image: DynamicImage, size: u32) -> Result<RgbaImage, QrError> {
    match resize_with_fast_image_resize(&image, size) {
        Ok(resized) => Ok(resized),
        Err(err) => {
            log::warn!("⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}", err);
            // 二维码是硬边缘图形，最近邻不会产生灰边
            Ok(image.resize_exact(size, size, FilterType::Nearest).into_rgba8())
        }
    }
}

fn resize_with_fast_image_resize(image: &DynamicImage, size: u32) -> Result<RgbaImage, QrError> {
    let src = image.to_rgba8();
    let (src_width, src_height) = src.dimensions();

    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        src.into_raw(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| QrError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(size, size, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Nearest);

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| QrError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

    ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(size, size, dst_image.into_vec())
        .ok_or_else(|| QrError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Luma};

    fn create_qr_like_png(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            if (x / 10 + y / 10) % 2 == 0 {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });

        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(img)
            .write_to(&mut cursor, ImageFormat::Png)
            .expect("failed to encode test image");
        cursor.into_inner()
    }

    fn request(size: &str) -> GenerationRequest {
        GenerationRequest::new("hello", Some(size), &QrConfig::default())
            .expect("request should be valid")
    }

    #[test]
    fn decodes_png_with_requested_size() {
        let png = create_qr_like_png(300, 300);

        let image = decode_qr_image(&png, &request("300"), &QrConfig::default())
            .expect("decode should succeed");

        assert_eq!((image.width(), image.height()), (300, 300));
        assert_eq!(image.size(), 300);
        assert_eq!(image.text(), "hello");
        assert_eq!(image.pixels().as_raw().len(), 300 * 300 * 4);
    }

    #[test]
    fn mismatched_dimensions_are_scaled_to_request() {
        let png = create_qr_like_png(250, 250);

        let image = decode_qr_image(&png, &request("500"), &QrConfig::default())
            .expect("decode should succeed");

        assert_eq!((image.width(), image.height()), (500, 500));
    }

    #[test]
    fn rejects_non_image_payload() {
        let result = decode_qr_image(
            b"<html><body>rate limited</body></html>",
            &request("300"),
            &QrConfig::default(),
        );

        assert!(matches!(result, Err(QrError::Decode(_))));
    }

    #[test]
    fn rejects_empty_and_truncated_payload() {
        assert!(matches!(
            decode_qr_image(&[], &request("300"), &QrConfig::default()),
            Err(QrError::Decode(_))
        ));

        let png = create_qr_like_png(100, 100);
        let truncated = &png[..png.len() / 2];
        assert!(matches!(
            decode_qr_image(truncated, &request("100"), &QrConfig::default()),
            Err(QrError::Decode(_))
        ));
    }

    #[test]
    fn rejects_images_over_pixel_limit() {
        let mut config = QrConfig::default();
        config.max_decoded_pixels = 10_000;
        let png = create_qr_like_png(200, 200);

        let result = decode_qr_image(&png, &request("200"), &config);

        assert!(matches!(result, Err(QrError::Decode(_))));
    }
}

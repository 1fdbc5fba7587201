use crate::error::{PaymentError, Result};
use image::Luma;
use qrcode::QrCode;

/// Pixels per QR module.
const MODULE_PIXELS: u32 = 10;

/// Rasterizes payload text into a PNG QR image.
///
/// Geometry matches what payment apps expect from these codes: 10-pixel
/// modules with the standard 4-module quiet zone, black on white.
pub fn payload_to_png(payload: &str) -> Result<Vec<u8>> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| PaymentError::QrEncoding(format!("QR generation failed: {e}")))?;

    let image = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .build();

    let mut bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut bytes);
    image::ImageEncoder::write_image(
        encoder,
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::L8,
    )
    .map_err(|e| PaymentError::QrEncoding(format!("PNG encoding failed: {e}")))?;

    Ok(bytes)
}

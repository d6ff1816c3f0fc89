use crate::error::RenderError;
use block_fx::Block;
use std::io::Cursor;

/// Encode a block as an 8-bit RGB PNG.
///
/// The fast encoder output is recompressed with oxipng; if that fails the
/// unoptimized bytes are returned.
pub fn encode_png(block: &Block) -> Result<Vec<u8>, RenderError> {
    let png_bytes = encode_rgb8(block)?;

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}

fn encode_rgb8(block: &Block) -> Result<Vec<u8>, RenderError> {
    let (width, height) = block.dims();
    let width = u32::try_from(width).map_err(|e| RenderError::PngEncode(e.to_string()))?;
    let height = u32::try_from(height).map_err(|e| RenderError::PngEncode(e.to_string()))?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&block.to_rgb8())
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

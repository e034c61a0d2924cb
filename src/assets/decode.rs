use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::SlideFxResult;

/// Decoded raster in premultiplied RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Texture {
    /// 1×1 mid-grey. Neutral for displacement maps (no offset) and mapping lookups.
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba8_premul: Arc::new(vec![128, 128, 128, 255]),
        }
    }

    pub fn byte_len(&self) -> usize {
        self.rgba8_premul.len()
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_texture(bytes: &[u8]) -> SlideFxResult<Texture> {
    let dyn_img = image::load_from_memory(bytes).context("decode texture from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(Texture {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

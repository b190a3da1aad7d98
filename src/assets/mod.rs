/// Startup-time asset loading: the packed container and the optional
/// player-sprite override. Both run once during boot; every validation
/// failure here is fatal (the engine cannot start on partial data).
mod pack;
mod sprite;

pub use pack::{AssetId, AssetPack, PackError, ASSET_COUNT, PACK_SIGNATURE};
pub use sprite::{
    PlayerGraphics, SpriteError, ARMOR_PALETTE_LEN, OVERRIDE_PALETTE_LEN, SPRITE_SHEET_LEN,
};

// ── Shared test fixtures ──

#[cfg(test)]
pub(crate) mod testutil {
    use super::pack::{ASSET_COUNT, PACK_SIGNATURE};

    pub const COUNT_OFFSET: usize = 80;
    pub const SKIP_OFFSET: usize = 84;
    pub const TABLE_OFFSET: usize = 88;

    /// Build a container with the given per-asset sizes. Asset `i` is
    /// filled with the byte `i + 1`, payloads 4-byte aligned, matching the
    /// layout the decoder expects.
    pub fn build_pack(sizes: &[u32; ASSET_COUNT], skip: u32) -> Vec<u8> {
        let mut buf = vec![0u8; TABLE_OFFSET + ASSET_COUNT * 4];
        buf[..PACK_SIGNATURE.len()].copy_from_slice(PACK_SIGNATURE);
        buf[COUNT_OFFSET..COUNT_OFFSET + 4].copy_from_slice(&(ASSET_COUNT as u32).to_le_bytes());
        buf[SKIP_OFFSET..SKIP_OFFSET + 4].copy_from_slice(&skip.to_le_bytes());
        for (i, size) in sizes.iter().enumerate() {
            let at = TABLE_OFFSET + i * 4;
            buf[at..at + 4].copy_from_slice(&size.to_le_bytes());
        }
        buf.resize(buf.len() + skip as usize, 0);
        for (i, &size) in sizes.iter().enumerate() {
            while buf.len() % 4 != 0 {
                buf.push(0);
            }
            buf.resize(buf.len() + size as usize, (i + 1) as u8);
        }
        buf
    }

    /// Build a ZSPR override file. The pixel region is filled with `0xAB`,
    /// the palette region with ascending bytes starting at 1.
    pub fn build_zspr(pixel_len: usize, palette_len: usize, declared_palette_len: u16) -> Vec<u8> {
        let pixel_offs = 29u32; // directly after the 27-byte header, padded
        let palette_offs = pixel_offs + pixel_len as u32;
        let mut buf = vec![0u8; pixel_offs as usize + pixel_len + palette_len];
        buf[..4].copy_from_slice(b"ZSPR");
        buf[9..13].copy_from_slice(&pixel_offs.to_le_bytes());
        buf[13..15].copy_from_slice(&(pixel_len as u16).to_le_bytes());
        buf[15..19].copy_from_slice(&palette_offs.to_le_bytes());
        buf[19..21].copy_from_slice(&declared_palette_len.to_le_bytes());
        for b in &mut buf[pixel_offs as usize..pixel_offs as usize + pixel_len] {
            *b = 0xAB;
        }
        for (i, b) in buf[palette_offs as usize..].iter_mut().enumerate() {
            *b = (i + 1) as u8;
        }
        buf
    }
}

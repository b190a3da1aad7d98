/// Player-sprite override parser (the community "ZSPR" format).
///
/// The fixed in-memory graphics tables are populated from the asset pack;
/// a user-supplied ZSPR file can then replace the sprite sheet and part of
/// the palette. Validation failure only marks the file invalid; whether
/// that is fatal depends on the caller (an explicitly configured override
/// that fails to apply is a misconfiguration, no override at all is fine).
use thiserror::Error;

use crate::assets::{AssetId, AssetPack};

/// The sprite sheet is exactly this long, and an override's pixel region
/// must declare exactly this length.
pub const SPRITE_SHEET_LEN: usize = 0x7000;

/// Full armor/gloves palette table as shipped in the asset pack.
pub const ARMOR_PALETTE_LEN: usize = 150;

/// Portion of the palette table a ZSPR override replaces.
pub const OVERRIDE_PALETTE_LEN: usize = 120;

const GLOVES_COLOR_LEN: usize = 4;
const ZSPR_MAGIC: &[u8; 4] = b"ZSPR";

// Fixed little-endian header field positions.
const HEADER_MIN: usize = 27;
const PIXEL_OFFS_AT: usize = 9;
const PIXEL_LEN_AT: usize = 13;
const PALETTE_OFFS_AT: usize = 15;
const PALETTE_LEN_AT: usize = 19;

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("sprite file too short ({0} bytes, header needs {HEADER_MIN})")]
    TooShort(usize),
    #[error("sprite file signature mismatch (expected ZSPR)")]
    BadSignature,
    #[error("sprite pixel or palette region extends past the end of the file")]
    RegionBounds,
    #[error("sprite pixel region is {0} bytes, expected 0x7000")]
    PixelLength(usize),
    #[error("asset pack {asset} is {actual} bytes, expected {expected}")]
    BuiltinSize {
        asset: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Fixed-size player graphics tables read by the engine renderer.
pub struct PlayerGraphics {
    pub sheet: Box<[u8; SPRITE_SHEET_LEN]>,
    pub armor_palette: [u8; ARMOR_PALETTE_LEN],
    pub gloves_color: [u8; GLOVES_COLOR_LEN],
}

impl Default for PlayerGraphics {
    fn default() -> Self {
        PlayerGraphics {
            sheet: Box::new([0; SPRITE_SHEET_LEN]),
            armor_palette: [0; ARMOR_PALETTE_LEN],
            gloves_color: [0; GLOVES_COLOR_LEN],
        }
    }
}

impl PlayerGraphics {
    /// Copy the built-in tables out of the asset pack. The pack assets
    /// must match the fixed table sizes exactly; a mismatch means the pack
    /// belongs to a different build and boot cannot continue.
    pub fn from_pack(pack: &AssetPack) -> Result<Self, SpriteError> {
        let sheet = pack.get(AssetId::PlayerGraphics);
        if sheet.len() != SPRITE_SHEET_LEN {
            return Err(SpriteError::BuiltinSize {
                asset: "player graphics",
                expected: SPRITE_SHEET_LEN,
                actual: sheet.len(),
            });
        }
        let armor = pack.get(AssetId::ArmorPalette);
        if armor.len() != ARMOR_PALETTE_LEN {
            return Err(SpriteError::BuiltinSize {
                asset: "armor palette",
                expected: ARMOR_PALETTE_LEN,
                actual: armor.len(),
            });
        }
        let gloves = pack.get(AssetId::GlovesColor);
        if gloves.len() != GLOVES_COLOR_LEN {
            return Err(SpriteError::BuiltinSize {
                asset: "gloves color",
                expected: GLOVES_COLOR_LEN,
                actual: gloves.len(),
            });
        }

        let mut graphics = PlayerGraphics::default();
        graphics.sheet.copy_from_slice(sheet);
        graphics.armor_palette.copy_from_slice(armor);
        graphics.gloves_color.copy_from_slice(gloves);
        Ok(graphics)
    }

    /// Validate a ZSPR buffer and patch the tables in place.
    ///
    /// The two palette copies are gated independently on the declared
    /// palette length so override files predating the gloves-color
    /// extension (120-byte palettes) still apply their palette portion.
    /// Nothing is written unless the whole file validated.
    pub fn apply_override(&mut self, file: &[u8]) -> Result<(), SpriteError> {
        if file.len() < HEADER_MIN {
            return Err(SpriteError::TooShort(file.len()));
        }
        if &file[..4] != ZSPR_MAGIC {
            return Err(SpriteError::BadSignature);
        }

        let pixel_offs = read_u32(file, PIXEL_OFFS_AT) as u64;
        let pixel_len = read_u16(file, PIXEL_LEN_AT) as u64;
        let palette_offs = read_u32(file, PALETTE_OFFS_AT) as u64;
        let palette_len = read_u16(file, PALETTE_LEN_AT) as u64;
        let len = file.len() as u64;

        if pixel_offs + pixel_len > len || palette_offs + palette_len > len {
            return Err(SpriteError::RegionBounds);
        }
        if pixel_len != SPRITE_SHEET_LEN as u64 {
            return Err(SpriteError::PixelLength(pixel_len as usize));
        }

        self.sheet
            .copy_from_slice(&file[pixel_offs as usize..][..SPRITE_SHEET_LEN]);

        let palette = &file[palette_offs as usize..][..palette_len as usize];
        if palette.len() >= OVERRIDE_PALETTE_LEN {
            self.armor_palette[..OVERRIDE_PALETTE_LEN]
                .copy_from_slice(&palette[..OVERRIDE_PALETTE_LEN]);
        }
        if palette.len() >= OVERRIDE_PALETTE_LEN + GLOVES_COLOR_LEN {
            self.gloves_color.copy_from_slice(
                &palette[OVERRIDE_PALETTE_LEN..OVERRIDE_PALETTE_LEN + GLOVES_COLOR_LEN],
            );
        }
        Ok(())
    }
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fn read_u16(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::testutil::build_zspr;

    fn marked_graphics() -> PlayerGraphics {
        let mut g = PlayerGraphics::default();
        g.sheet.fill(0x11);
        g.armor_palette.fill(0x22);
        g.gloves_color.fill(0x33);
        g
    }

    #[test]
    fn full_override_replaces_sheet_palette_and_gloves() {
        // Palette region declared as 130 bytes: 120 palette bytes apply,
        // the 4 gloves bytes apply, the trailing 6 are ignored.
        let file = build_zspr(SPRITE_SHEET_LEN, 130, 130);
        let mut g = marked_graphics();
        g.apply_override(&file).unwrap();

        assert!(g.sheet.iter().all(|&b| b == 0xAB));
        for (i, &b) in g.armor_palette[..120].iter().enumerate() {
            assert_eq!(b, (i + 1) as u8);
        }
        // Bytes past the override window keep the built-in values.
        assert!(g.armor_palette[120..].iter().all(|&b| b == 0x22));
        assert_eq!(g.gloves_color, [121, 122, 123, 124]);
    }

    #[test]
    fn short_palette_leaves_gloves_color_alone() {
        let file = build_zspr(SPRITE_SHEET_LEN, 120, 120);
        let mut g = marked_graphics();
        g.apply_override(&file).unwrap();
        assert_eq!(g.armor_palette[0], 1);
        assert_eq!(g.gloves_color, [0x33; 4]);
    }

    #[test]
    fn zero_palette_still_replaces_the_sheet() {
        let file = build_zspr(SPRITE_SHEET_LEN, 0, 0);
        let mut g = marked_graphics();
        g.apply_override(&file).unwrap();
        assert!(g.sheet.iter().all(|&b| b == 0xAB));
        assert!(g.armor_palette.iter().all(|&b| b == 0x22));
    }

    #[test]
    fn header_shorter_than_27_bytes_is_invalid() {
        let mut g = marked_graphics();
        assert!(matches!(
            g.apply_override(b"ZSPR too short"),
            Err(SpriteError::TooShort(14))
        ));
    }

    #[test]
    fn wrong_signature_is_invalid() {
        let mut file = build_zspr(SPRITE_SHEET_LEN, 120, 120);
        file[..4].copy_from_slice(b"ZSPX");
        let mut g = marked_graphics();
        assert!(matches!(
            g.apply_override(&file),
            Err(SpriteError::BadSignature)
        ));
        // Nothing was written.
        assert!(g.sheet.iter().all(|&b| b == 0x11));
    }

    #[test]
    fn declared_palette_past_end_is_invalid() {
        // 120 palette bytes present but 500 declared.
        let file = build_zspr(SPRITE_SHEET_LEN, 120, 500);
        let mut g = marked_graphics();
        assert!(matches!(
            g.apply_override(&file),
            Err(SpriteError::RegionBounds)
        ));
        assert!(g.armor_palette.iter().all(|&b| b == 0x22));
    }

    #[test]
    fn wrong_pixel_length_is_invalid() {
        let file = build_zspr(SPRITE_SHEET_LEN - 16, 120, 120);
        let mut g = marked_graphics();
        assert!(matches!(
            g.apply_override(&file),
            Err(SpriteError::PixelLength(l)) if l == SPRITE_SHEET_LEN - 16
        ));
        assert!(g.sheet.iter().all(|&b| b == 0x11));
    }

    #[test]
    fn from_pack_copies_builtin_tables() {
        use crate::assets::testutil::build_pack;
        use crate::assets::{AssetPack, ASSET_COUNT};

        let mut sizes = [4u32; ASSET_COUNT];
        sizes[AssetId::PlayerGraphics as usize] = SPRITE_SHEET_LEN as u32;
        sizes[AssetId::ArmorPalette as usize] = ARMOR_PALETTE_LEN as u32;
        sizes[AssetId::GlovesColor as usize] = 4;
        let pack = AssetPack::parse(build_pack(&sizes, 0)).unwrap();

        let g = PlayerGraphics::from_pack(&pack).unwrap();
        // build_pack fills asset i with byte i+1.
        assert!(g.sheet.iter().all(|&b| b == 1));
        assert!(g.armor_palette.iter().all(|&b| b == 2));
        assert_eq!(g.gloves_color, [3; 4]);
    }

    #[test]
    fn from_pack_rejects_mismatched_table_sizes() {
        use crate::assets::testutil::build_pack;
        use crate::assets::{AssetPack, ASSET_COUNT};

        let sizes = [4u32; ASSET_COUNT]; // sheet asset is far too small
        let pack = AssetPack::parse(build_pack(&sizes, 0)).unwrap();
        assert!(matches!(
            PlayerGraphics::from_pack(&pack),
            Err(SpriteError::BuiltinSize { asset: "player graphics", .. })
        ));
    }
}

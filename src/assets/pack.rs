/// Asset container decoder.
///
/// The pack is one flat binary blob produced by the asset build tooling:
/// a 48-byte signature, a 32-byte content digest (written by the packer,
/// not validated here), a declared asset count, an extra-skip field, then
/// one little-endian u32 size per asset followed by the payloads in table
/// order, each 4-byte aligned.
///
/// Decoding never copies payload bytes: `AssetPack` keeps the blob alive
/// for the life of the process and serves slices borrowed from it. Any
/// validation failure is fatal to the loading phase; there is no partial
/// or degraded load.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Exact first 48 bytes of every valid container.
pub const PACK_SIGNATURE: &[u8; 48] = b"PocketPort asset pack v01; see tools/packassets\n";

/// Logical asset indices, fixed at build time. The packer writes payloads
/// in exactly this order; the declared count in the header must match
/// [`ASSET_COUNT`] or the file is from a different build.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AssetId {
    PlayerGraphics = 0,
    ArmorPalette,
    GlovesColor,
    SpritePalettes,
    BgPalettes,
    FontGraphics,
    Tilemaps,
    OverworldMap,
    DungeonMap,
    DialogueText,
    SoundBank,
    MusicScores,
}

pub const ASSET_COUNT: usize = 12;

const SIG_LEN: usize = 48;
const COUNT_OFFSET: usize = 80; // after the 32-byte digest
const SKIP_OFFSET: usize = 84;
const TABLE_OFFSET: usize = 88;
const HEADER_MIN: usize = TABLE_OFFSET + ASSET_COUNT * 4;

/// Filenames tried under the assets directory, in order.
const PACK_PATHS: [&str; 2] = ["tables/assets.dat", "assets.dat"];

#[derive(Debug, Error)]
pub enum PackError {
    #[error(
        "no asset pack under {0} (looked for tables/assets.dat and assets.dat; \
         run tools/packassets against the game data to produce one)"
    )]
    Missing(PathBuf),
    #[error("failed reading asset pack: {0}")]
    Io(#[from] io::Error),
    #[error("asset pack truncated: {len} bytes, the header alone needs {need}")]
    Truncated { len: usize, need: usize },
    #[error("asset pack signature mismatch (wrong or corrupt file)")]
    BadSignature,
    #[error("asset pack declares {declared} assets, this build expects {expected}")]
    CountMismatch { declared: u32, expected: usize },
    #[error("asset {index} extends past the end of the pack")]
    OutOfBounds { index: usize },
}

#[derive(Debug)]
pub struct AssetPack {
    data: Vec<u8>,
    table: [(u32, u32); ASSET_COUNT], // (offset, size) per AssetId
}

impl AssetPack {
    /// Validate and index a container blob. The scan is strictly
    /// sequential and fails on the first violation; no view is handed out
    /// unless the whole table validated.
    pub fn parse(data: Vec<u8>) -> Result<Self, PackError> {
        let len = data.len();
        if len < HEADER_MIN {
            return Err(PackError::Truncated { len, need: HEADER_MIN });
        }
        if data[..SIG_LEN] != PACK_SIGNATURE[..] {
            return Err(PackError::BadSignature);
        }
        let declared = read_u32(&data, COUNT_OFFSET);
        if declared as usize != ASSET_COUNT {
            return Err(PackError::CountMismatch { declared, expected: ASSET_COUNT });
        }

        // Payloads start past the header, the size table and the
        // header-declared skip region. Bounds math in u64 so a hostile
        // size field cannot wrap.
        let mut offset = HEADER_MIN as u64 + read_u32(&data, SKIP_OFFSET) as u64;
        let mut table = [(0u32, 0u32); ASSET_COUNT];
        for (index, entry) in table.iter_mut().enumerate() {
            let size = read_u32(&data, TABLE_OFFSET + index * 4) as u64;
            offset = (offset + 3) & !3;
            if offset + size > len as u64 {
                return Err(PackError::OutOfBounds { index });
            }
            *entry = (offset as u32, size as u32);
            offset += size;
        }

        Ok(AssetPack { data, table })
    }

    /// Read the container from disk, trying the well-known locations under
    /// `dir` in order. Both absent is its own error so the caller can show
    /// the user something actionable.
    pub fn load(dir: &Path) -> Result<Self, PackError> {
        for name in PACK_PATHS {
            let path = dir.join(name);
            match fs::read(&path) {
                Ok(bytes) => {
                    log::info!("loading asset pack: {}", path.display());
                    return Self::parse(bytes);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(PackError::Io(e)),
            }
        }
        Err(PackError::Missing(dir.to_path_buf()))
    }

    /// Zero-copy view of one asset. Borrows from the pack, which owns the
    /// blob for the whole session.
    pub fn get(&self, id: AssetId) -> &[u8] {
        let (offset, size) = self.table[id as usize];
        &self.data[offset as usize..offset as usize + size as usize]
    }

    pub fn size(&self, id: AssetId) -> u32 {
        self.table[id as usize].1
    }
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

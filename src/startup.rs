/// Boot sequence: load the asset container, build the player graphics
/// tables, apply the configured sprite override if any. Every error here
/// aborts startup; there is no degraded mode.
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::assets::{AssetPack, PackError, PlayerGraphics, SpriteError};
use crate::config::PortConfig;
use crate::context::PlatformContext;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Pack(#[from] PackError),
    #[error("player graphics: {0}")]
    Sprite(#[from] SpriteError),
    #[error("could not read player sprite {path}: {source}")]
    SpriteIo { path: PathBuf, source: io::Error },
}

/// Run the one-time loaders. On success the returned pack owns the
/// container bytes for the rest of the session and the context carries
/// the (possibly overridden) graphics tables.
pub fn startup(config: &PortConfig) -> Result<(AssetPack, PlatformContext), StartupError> {
    let pack = AssetPack::load(&config.assets_dir)?;
    let mut graphics = PlayerGraphics::from_pack(&pack)?;

    // An explicitly configured override that cannot be read or fails
    // validation is a misconfiguration; only the absent option is a no-op.
    if let Some(path) = &config.player_sprite {
        let bytes = fs::read(path).map_err(|source| StartupError::SpriteIo {
            path: path.clone(),
            source,
        })?;
        graphics.apply_override(&bytes)?;
        log::info!("applied player sprite override: {}", path.display());
    }

    Ok((pack, PlatformContext::new(graphics)))
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

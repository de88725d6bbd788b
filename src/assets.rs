//! Assets looked up by logical name.
//!
//! Every asset lives at `<dir>/<name>.txt`. A load failure is never fatal:
//! it gets logged and the asset is left out, and everything that draws or
//! plays an asset copes with it being absent.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

const MAX_SOUND_PULSES: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    FoodSprite,
    EatSound,
    WallSound,
}

impl AssetKey {
    pub const ALL: [AssetKey; 3] = [AssetKey::FoodSprite, AssetKey::EatSound, AssetKey::WallSound];

    pub fn name(self) -> &'static str {
        match self {
            AssetKey::FoodSprite => "food-sprite",
            AssetKey::EatSound => "eat-sound",
            AssetKey::WallSound => "wall-sound",
        }
    }

    fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.txt", self.name()))
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("could not read {name} from {path:?}: {source}")]
    Io {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{name} is empty")]
    EmptySprite { name: &'static str },
    #[error("{name} must hold a pulse count between 1 and 8, got {found:?}")]
    BadPulseCount { name: &'static str, found: String },
}

/// Opaque reference to a loaded sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(usize);

/// A sound is rendered as a burst of terminal bells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sound {
    pub pulses: u8,
}

#[derive(Debug, Default)]
pub struct Assets {
    sprites: Vec<String>,
    sprite_keys: HashMap<AssetKey, SpriteHandle>,
    sounds: HashMap<AssetKey, Sound>,
}

impl Assets {
    /// Loads everything it can from `dir`.
    pub fn load(dir: &Path) -> Self {
        let mut assets = Assets::default();

        for key in AssetKey::ALL {
            let result = match key {
                AssetKey::FoodSprite => load_sprite(key, dir).map(|glyph| {
                    assets.insert_sprite(key, glyph);
                }),
                AssetKey::EatSound | AssetKey::WallSound => load_sound(key, dir).map(|sound| {
                    assets.sounds.insert(key, sound);
                }),
            };

            match result {
                Ok(()) => debug!(asset = key.name(), "asset loaded"),
                Err(err) => warn!(asset = key.name(), "asset unavailable: {err}"),
            }
        }

        assets
    }

    pub fn insert_sprite(&mut self, key: AssetKey, glyph: String) -> SpriteHandle {
        let handle = SpriteHandle(self.sprites.len());
        self.sprites.push(glyph);
        self.sprite_keys.insert(key, handle);
        handle
    }

    pub fn sprite_handle(&self, key: AssetKey) -> Option<SpriteHandle> {
        self.sprite_keys.get(&key).copied()
    }

    pub fn sprite(&self, handle: SpriteHandle) -> Option<&str> {
        self.sprites.get(handle.0).map(String::as_str)
    }

    pub fn sound(&self, key: AssetKey) -> Option<Sound> {
        self.sounds.get(&key).copied()
    }
}

fn read_asset(key: AssetKey, dir: &Path) -> Result<String, AssetError> {
    let path = key.path_in(dir);
    fs::read_to_string(&path).map_err(|source| AssetError::Io { name: key.name(), path, source })
}

fn load_sprite(key: AssetKey, dir: &Path) -> Result<String, AssetError> {
    let text = read_asset(key, dir)?;
    // A cell is two terminal columns wide.
    let glyph: String = text.trim_end_matches(['\r', '\n']).chars().take(2).collect();

    if glyph.trim().is_empty() {
        return Err(AssetError::EmptySprite { name: key.name() });
    }
    Ok(glyph)
}

fn load_sound(key: AssetKey, dir: &Path) -> Result<Sound, AssetError> {
    let text = read_asset(key, dir)?;
    let found = text.trim();

    match found.parse::<u8>() {
        Ok(pulses) if (1..=MAX_SOUND_PULSES).contains(&pulses) => Ok(Sound { pulses }),
        _ => Err(AssetError::BadPulseCount { name: key.name(), found: found.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, key: AssetKey, contents: &str) {
        fs::write(key.path_in(dir), contents).unwrap();
    }

    #[test]
    fn test_load_complete_set() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), AssetKey::FoodSprite, "()\n");
        write(dir.path(), AssetKey::EatSound, "1\n");
        write(dir.path(), AssetKey::WallSound, "3");

        let assets = Assets::load(dir.path());
        let handle = assets.sprite_handle(AssetKey::FoodSprite).unwrap();
        assert_eq!(assets.sprite(handle), Some("()"));
        assert_eq!(assets.sound(AssetKey::EatSound), Some(Sound { pulses: 1 }));
        assert_eq!(assets.sound(AssetKey::WallSound), Some(Sound { pulses: 3 }));
    }

    #[test]
    fn test_missing_dir_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let assets = Assets::load(&dir.path().join("nope"));
        assert!(assets.sprite_handle(AssetKey::FoodSprite).is_none());
        assert!(assets.sound(AssetKey::EatSound).is_none());
        assert!(assets.sound(AssetKey::WallSound).is_none());
    }

    #[test]
    fn test_bad_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), AssetKey::FoodSprite, "  \n");
        write(dir.path(), AssetKey::EatSound, "loud");
        write(dir.path(), AssetKey::WallSound, "0");

        let assets = Assets::load(dir.path());
        assert!(assets.sprite_handle(AssetKey::FoodSprite).is_none());
        assert!(assets.sound(AssetKey::EatSound).is_none());
        assert!(assets.sound(AssetKey::WallSound).is_none());
    }

    #[test]
    fn test_sprite_is_cut_to_one_cell() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), AssetKey::FoodSprite, "<=>");
        assert_eq!(load_sprite(AssetKey::FoodSprite, dir.path()).unwrap(), "<=");
    }

    #[test]
    fn test_errors_name_the_asset() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_sound(AssetKey::WallSound, dir.path()).unwrap_err();
        assert!(matches!(err, AssetError::Io { name: "wall-sound", .. }));
        assert!(err.to_string().contains("wall-sound"));
    }
}

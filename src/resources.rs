//! Named handle registry for textures and sounds
//!
//! The simulation and draw list refer to assets by opaque handles; the
//! render and audio backends map handles to whatever they actually loaded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Opaque texture id; zero is the null handle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Opaque sound id; zero is the null handle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundHandle(pub u32);

/// Name-to-handle registry populated at startup
#[derive(Debug, Clone, Default)]
pub struct Resources {
    textures: HashMap<String, TextureHandle>,
    sounds: HashMap<String, SoundHandle>,
    next_id: u32,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-filled with every asset name the game references
    pub fn with_defaults() -> Self {
        let mut resources = Self::new();
        for name in [
            "paddle",
            "ball",
            "particle",
            "block",
            "block_solid",
            "speed",
            "sticky",
            "passthrough",
            "size-increase",
        ] {
            resources.register_texture(name);
        }
        for name in ["bleep", "solid", "powerup"] {
            resources.register_sound(name);
        }
        resources
    }

    pub fn register_texture(&mut self, name: &str) -> TextureHandle {
        self.next_id += 1;
        let handle = TextureHandle(self.next_id);
        self.textures.insert(name.to_owned(), handle);
        handle
    }

    pub fn register_sound(&mut self, name: &str) -> SoundHandle {
        self.next_id += 1;
        let handle = SoundHandle(self.next_id);
        self.sounds.insert(name.to_owned(), handle);
        handle
    }

    pub fn texture(&self, name: &str) -> Option<TextureHandle> {
        let handle = self.textures.get(name).copied();
        if handle.is_none() {
            log::debug!("texture not registered: {name}");
        }
        handle
    }

    pub fn sound(&self, name: &str) -> Option<SoundHandle> {
        let handle = self.sounds.get(name).copied();
        if handle.is_none() {
            log::debug!("sound not registered: {name}");
        }
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_look_up() {
        let mut resources = Resources::new();
        let handle = resources.register_texture("ball");

        assert_eq!(resources.texture("ball"), Some(handle));
        assert_ne!(handle, TextureHandle::default());
    }

    #[test]
    fn test_missing_name_is_none() {
        let resources = Resources::new();
        assert_eq!(resources.texture("nope"), None);
        assert_eq!(resources.sound("nope"), None);
    }

    #[test]
    fn test_handles_are_unique_across_kinds() {
        let mut resources = Resources::new();
        let texture = resources.register_texture("a");
        let sound = resources.register_sound("b");
        assert_ne!(texture.0, sound.0);
    }

    #[test]
    fn test_defaults_cover_game_assets() {
        let resources = Resources::with_defaults();
        for name in ["paddle", "ball", "particle", "block", "block_solid"] {
            assert!(resources.texture(name).is_some());
        }
        for name in ["speed", "sticky", "passthrough", "size-increase"] {
            assert!(resources.texture(name).is_some());
        }
        for name in ["bleep", "solid", "powerup"] {
            assert!(resources.sound(name).is_some());
        }
    }
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::animation::anim::{EffectAnimations, retain_declared};
use crate::effects::model::Effect;
use crate::foundation::error::{GlyphfxError, GlyphfxResult};

/// Key of the saved effect list.
pub const EFFECTS_KEY: &str = "effects";
/// Key of the saved animation map.
pub const ANIMATIONS_KEY: &str = "animations";
/// Key of the saved preset list.
pub const PRESETS_KEY: &str = "presets";

/// Opaque string storage.
pub trait KeyValueStore {
    /// Stored value, `None` when the key was never written.
    fn get(&self, key: &str) -> GlyphfxResult<Option<String>>;
    /// Overwrite `key`.
    fn set(&mut self, key: &str, value: &str) -> GlyphfxResult<()>;
}

/// Store kept in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> GlyphfxResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> GlyphfxResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Store writing one `<key>.json` file per key into a directory.
#[derive(Clone, Debug)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> GlyphfxResult<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(GlyphfxError::validation(format!("invalid store key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonDirStore {
    fn get(&self, key: &str) -> GlyphfxResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("failed to read '{}'", path.display()))
                .into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> GlyphfxResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create '{}'", self.dir.display()))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)
            .with_context(|| format!("failed to write '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("failed to replace '{}'", path.display()))?;
        Ok(())
    }
}

/// A named snapshot of an effect stack and its animations.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Effect stack.
    pub effects: Vec<Effect>,
    /// Animations keyed by effect id.
    #[serde(default)]
    pub animations: EffectAnimations,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
}

static PRESET_SEQ: AtomicU64 = AtomicU64::new(0);

impl Preset {
    /// Snapshot the given stack under `name`, stamped with the current time.
    ///
    /// Ids are `preset-<millis>-<seq>`; `seq` counts captures in this process, so captures
    /// within the same millisecond get distinct ids.
    pub fn capture(
        name: impl Into<String>,
        effects: &[Effect],
        animations: &EffectAnimations,
    ) -> Self {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            id: format!(
                "preset-{created_at}-{}",
                PRESET_SEQ.fetch_add(1, Ordering::Relaxed)
            ),
            name: name.into(),
            effects: effects.to_vec(),
            animations: animations.clone(),
            created_at,
        }
    }
}

/// Typed load/save of the effect list, animation map and presets on top of a
/// [`KeyValueStore`].
///
/// Loads never fail: a missing or unparsable entry yields the empty default and a warning.
/// Loaded effect parameters are clamped into their declared ranges and animations for
/// parameters the effect does not declare are dropped.
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saved effect list, or empty.
    pub fn load_effects(&self) -> Vec<Effect> {
        let mut effects: Vec<Effect> = self.load_or_default(EFFECTS_KEY);
        for e in &mut effects {
            e.params.clamp();
        }
        effects
    }

    /// Replace the saved effect list.
    pub fn save_effects(&mut self, effects: &[Effect]) -> GlyphfxResult<()> {
        self.save(EFFECTS_KEY, &effects)
    }

    /// Saved animations restricted to parameters `effects` declare, or empty.
    pub fn load_animations(&self, effects: &[Effect]) -> EffectAnimations {
        let mut animations: EffectAnimations = self.load_or_default(ANIMATIONS_KEY);
        let dropped = retain_declared(&mut animations, effects);
        if dropped > 0 {
            tracing::warn!(dropped, "dropped animations of undeclared parameters");
        }
        animations
    }

    /// Replace the saved animation map.
    pub fn save_animations(&mut self, animations: &EffectAnimations) -> GlyphfxResult<()> {
        self.save(ANIMATIONS_KEY, animations)
    }

    /// Saved presets, or empty.
    pub fn load_presets(&self) -> Vec<Preset> {
        let mut presets: Vec<Preset> = self.load_or_default(PRESETS_KEY);
        for p in &mut presets {
            for e in &mut p.effects {
                e.params.clamp();
            }
            retain_declared(&mut p.animations, &p.effects);
        }
        presets
    }

    /// Replace the saved preset list.
    pub fn save_presets(&mut self, presets: &[Preset]) -> GlyphfxResult<()> {
        self.save(PRESETS_KEY, &presets)
    }

    /// Append a preset, replacing one with the same id.
    pub fn add_preset(&mut self, preset: Preset) -> GlyphfxResult<()> {
        let mut presets = self.load_presets();
        presets.retain(|p| p.id != preset.id);
        presets.push(preset);
        self.save_presets(&presets)
    }

    /// Remove a preset. Returns whether one was removed.
    pub fn delete_preset(&mut self, id: &str) -> GlyphfxResult<bool> {
        let mut presets = self.load_presets();
        let before = presets.len();
        presets.retain(|p| p.id != id);
        if presets.len() == before {
            return Ok(false);
        }
        self.save_presets(&presets)?;
        Ok(true)
    }

    /// Make a preset current: its effects and animations become the saved state.
    pub fn apply_preset(&mut self, id: &str) -> GlyphfxResult<Option<Preset>> {
        let Some(preset) = self.load_presets().into_iter().find(|p| p.id == id) else {
            return Ok(None);
        };
        self.save_effects(&preset.effects)?;
        self.save_animations(&preset.animations)?;
        Ok(Some(preset))
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read saved state, using defaults");
                return T::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "unparsable saved state, using defaults");
            T::default()
        })
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> GlyphfxResult<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| GlyphfxError::serde(format!("failed to encode '{key}': {e}")))?;
        self.store.set(key, &raw)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/store.rs"]
mod tests;

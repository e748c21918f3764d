//! File-backed layout persistence.
//!
//! Stores last-committed card geometry and formation-player positions as a
//! nested mapping (screen → card → value), serialized as pretty JSON in the
//! platform config directory. Saves go through a temp file and an atomic
//! rename so a crash mid-write never corrupts the store; unreadable or
//! missing files degrade to an empty store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use touchline_core::geometry::{CardGeometry, PlayerPosition};
use touchline_core::layout::LayoutStore;
use touchline_core::{Error, Result};

use crate::error::{StoreError, StoreResult};

/// On-disk shape of the layout store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LayoutData {
    /// screen → card → committed geometry
    #[serde(default)]
    geometry: BTreeMap<String, BTreeMap<String, CardGeometry>>,
    /// screen → card → player → normalized position
    #[serde(default)]
    players: BTreeMap<String, BTreeMap<String, BTreeMap<String, PlayerPosition>>>,
}

impl LayoutData {
    fn reset_screen(&mut self, screen_id: &str) {
        self.geometry.remove(screen_id);
        self.players.remove(screen_id);
    }
}

/// Layout store persisted to a JSON file.
#[derive(Debug)]
pub struct FileLayoutStore {
    path: PathBuf,
    data: LayoutData,
}

impl FileLayoutStore {
    /// Opens a store at the given path. A missing or unreadable file is not
    /// an error: the store starts empty and the next flush rewrites it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match Self::load(&path) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(
                    "Could not read layout file {}: {}; starting empty",
                    path.display(),
                    err
                );
                LayoutData::default()
            }
        };
        Self { path, data }
    }

    /// Opens the store at the platform default location.
    pub fn open_default() -> StoreResult<Self> {
        Ok(Self::open(Self::default_path()?))
    }

    /// Platform default layout file path.
    pub fn default_path() -> StoreResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| StoreError::StorageDirectory("no config directory".to_string()))?;
        Ok(base.join("touchline").join("layout.json"))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> StoreResult<LayoutData> {
        if !path.exists() {
            return Ok(LayoutData::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| StoreError::LoadError(format!("{}: {}", path.display(), e)))?;
        let data = serde_json::from_str(&content)
            .map_err(|e| StoreError::LoadError(format!("{}: {}", path.display(), e)))?;
        Ok(data)
    }

    fn save(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }

        let content = serde_json::to_string_pretty(&self.data)?;

        // Write-to-temp-then-rename keeps the previous file intact if the
        // process dies mid-write.
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content)
            .map_err(|e| StoreError::SaveError(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| StoreError::SaveError(format!("{}: {}", self.path.display(), e)))?;
        Ok(())
    }
}

impl LayoutStore for FileLayoutStore {
    fn geometry(&self, screen_id: &str, card_id: &str) -> Option<CardGeometry> {
        self.data
            .geometry
            .get(screen_id)
            .and_then(|cards| cards.get(card_id))
            .copied()
    }

    fn set_geometry(&mut self, screen_id: &str, card_id: &str, geometry: CardGeometry) {
        self.data
            .geometry
            .entry(screen_id.to_string())
            .or_default()
            .insert(card_id.to_string(), geometry);
    }

    fn player_positions(
        &self,
        screen_id: &str,
        card_id: &str,
    ) -> Option<BTreeMap<String, PlayerPosition>> {
        self.data
            .players
            .get(screen_id)
            .and_then(|cards| cards.get(card_id))
            .cloned()
    }

    fn set_player_positions(
        &mut self,
        screen_id: &str,
        card_id: &str,
        positions: BTreeMap<String, PlayerPosition>,
    ) {
        self.data
            .players
            .entry(screen_id.to_string())
            .or_default()
            .insert(card_id.to_string(), positions);
    }

    fn reset_screen(&mut self, screen_id: &str) {
        self.data.reset_screen(screen_id);
    }

    fn flush(&mut self) -> Result<()> {
        self.save().map_err(Error::from)
    }
}

/// In-memory layout store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryLayoutStore {
    data: LayoutData,
}

impl MemoryLayoutStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutStore for MemoryLayoutStore {
    fn geometry(&self, screen_id: &str, card_id: &str) -> Option<CardGeometry> {
        self.data
            .geometry
            .get(screen_id)
            .and_then(|cards| cards.get(card_id))
            .copied()
    }

    fn set_geometry(&mut self, screen_id: &str, card_id: &str, geometry: CardGeometry) {
        self.data
            .geometry
            .entry(screen_id.to_string())
            .or_default()
            .insert(card_id.to_string(), geometry);
    }

    fn player_positions(
        &self,
        screen_id: &str,
        card_id: &str,
    ) -> Option<BTreeMap<String, PlayerPosition>> {
        self.data
            .players
            .get(screen_id)
            .and_then(|cards| cards.get(card_id))
            .cloned()
    }

    fn set_player_positions(
        &mut self,
        screen_id: &str,
        card_id: &str,
        positions: BTreeMap<String, PlayerPosition>,
    ) {
        self.data
            .players
            .entry(screen_id.to_string())
            .or_default()
            .insert(card_id.to_string(), positions);
    }

    fn reset_screen(&mut self, screen_id: &str) {
        self.data.reset_screen(screen_id);
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

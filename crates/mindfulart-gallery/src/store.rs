//! Gallery persistence.
//!
//! Galleries are stored as a flat JSON array in a single file. Every mutation
//! rewrites the whole file through a temp file and a rename, so a crash never
//! leaves a half-written store behind. A mutation only reaches memory once
//! the file write succeeded. There is no cross-process locking; the store
//! assumes a single writer.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use mindfulart_core::{Artwork, ArtworkKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{GalleryError, GalleryResult};

/// Name of the gallery created for a fresh store.
pub const DEFAULT_GALLERY_NAME: &str = "My First Gallery";

/// Description of the gallery created for a fresh store.
pub const DEFAULT_GALLERY_DESCRIPTION: &str = "Start curating by saving artworks from Search.";

/// A named, user-curated collection of artworks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub artworks: Vec<Artwork>,
}

impl Gallery {
    /// Creates an empty gallery with a fresh id.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            created_at: Utc::now(),
            artworks: Vec::new(),
        }
    }

    /// Returns true if an artwork with this key is already saved.
    pub fn contains(&self, key: &ArtworkKey) -> bool {
        self.artworks.iter().any(|a| a.has_key(key))
    }

    /// Appends the artwork unless one with the same key is present.
    fn insert(&mut self, artwork: Artwork) -> bool {
        if self.contains(&artwork.key()) {
            return false;
        }
        self.artworks.push(artwork);
        true
    }

    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }
}

/// File-backed gallery collection.
#[derive(Debug)]
pub struct GalleryStore {
    path: PathBuf,
    galleries: Vec<Gallery>,
}

impl GalleryStore {
    /// Returns the default store path (`<data dir>/mindfulart/galleries.json`).
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mindfulart")
            .join("galleries.json")
    }

    /// Opens the store at `path`.
    ///
    /// A missing, unreadable-as-JSON, non-array or empty file is replaced by a
    /// store holding one default gallery. An invalid file is kept next to the
    /// store as `<file name>.invalid` before being replaced; if that backup
    /// already exists a timestamped name is used instead.
    pub fn open(path: impl Into<PathBuf>) -> GalleryResult<Self> {
        let path = path.into();
        let loaded = Self::load(&path)?;

        let mut galleries = loaded.unwrap_or_default();
        if galleries.is_empty() {
            debug!("seeding gallery store at {:?}", path);
            galleries.push(Gallery::new(
                DEFAULT_GALLERY_NAME,
                DEFAULT_GALLERY_DESCRIPTION,
            ));
            write_galleries(&path, &galleries)?;
        }

        Ok(Self { path, galleries })
    }

    /// Opens the store at [`GalleryStore::default_path`].
    pub fn open_default() -> GalleryResult<Self> {
        Self::open(Self::default_path())
    }

    /// Reads galleries from disk. `Ok(None)` means the file should be reseeded.
    fn load(path: &Path) -> GalleryResult<Option<Vec<Gallery>>> {
        if !path.exists() {
            debug!("no gallery file at {:?}", path);
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|e| GalleryError::io(path, e))?;

        match serde_json::from_str::<Vec<Gallery>>(&content) {
            Ok(galleries) => {
                debug!(count = galleries.len(), "loaded galleries from {:?}", path);
                Ok(Some(galleries))
            }
            Err(e) => {
                let backup = backup_path(path);
                warn!(
                    error = %e,
                    "gallery file {:?} is not a valid gallery list; moving it to {:?}",
                    path,
                    backup
                );
                fs::rename(path, &backup).map_err(|e| GalleryError::io(path, e))?;
                Ok(None)
            }
        }
    }

    /// Applies `change` to a copy of the galleries. The copy replaces the
    /// in-memory list only after it was written; `change` returns whether
    /// anything needs writing.
    fn update<T>(
        &mut self,
        change: impl FnOnce(&mut Vec<Gallery>) -> GalleryResult<(T, bool)>,
    ) -> GalleryResult<T> {
        let mut next = self.galleries.clone();
        let (value, dirty) = change(&mut next)?;
        if dirty {
            write_galleries(&self.path, &next)?;
            self.galleries = next;
        }
        Ok(value)
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All galleries, in creation order.
    pub fn galleries(&self) -> &[Gallery] {
        &self.galleries
    }

    /// Looks up a gallery by exact id.
    pub fn get(&self, id: &str) -> Option<&Gallery> {
        self.galleries.iter().find(|g| g.id == id)
    }

    /// Looks up a gallery by exact id or unique id prefix.
    pub fn resolve(&self, id_or_prefix: &str) -> GalleryResult<&Gallery> {
        let needle = id_or_prefix.trim();
        if let Some(gallery) = self.get(needle) {
            return Ok(gallery);
        }
        if needle.is_empty() {
            return Err(GalleryError::not_found(needle));
        }

        let mut matches = self.galleries.iter().filter(|g| g.id.starts_with(needle));
        match (matches.next(), matches.count()) {
            (Some(gallery), 0) => Ok(gallery),
            (Some(_), more) => Err(GalleryError::Ambiguous {
                prefix: needle.to_string(),
                matches: more + 1,
            }),
            (None, _) => Err(GalleryError::not_found(needle)),
        }
    }

    /// Creates a gallery. Name and description are trimmed; the name must not be empty.
    pub fn create_gallery(&mut self, name: &str, description: &str) -> GalleryResult<Gallery> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GalleryError::EmptyName);
        }

        let gallery = Gallery::new(name, description.trim());
        self.update(|galleries| {
            galleries.push(gallery.clone());
            Ok(((), true))
        })?;

        info!(id = %gallery.id, name = %gallery.name, "created gallery");
        Ok(gallery)
    }

    /// Adds an artwork to one gallery.
    ///
    /// Returns `false` if the gallery already holds an artwork with the same
    /// `(source, id)`; the file is not rewritten in that case.
    pub fn add_artwork(&mut self, gallery_id: &str, artwork: Artwork) -> GalleryResult<bool> {
        let key = artwork.key();
        let added = self.update(|galleries| {
            let added = find_mut(galleries, gallery_id)?.insert(artwork);
            Ok((added, added))
        })?;
        if added {
            info!(gallery = gallery_id, artwork = %key, "saved artwork to gallery");
        } else {
            debug!(gallery = gallery_id, artwork = %key, "artwork already in gallery");
        }
        Ok(added)
    }

    /// Adds an artwork to every listed gallery. Unknown ids are ignored.
    ///
    /// Returns the number of galleries that changed.
    pub fn add_artwork_to_galleries<S: AsRef<str>>(
        &mut self,
        gallery_ids: &[S],
        artwork: &Artwork,
    ) -> GalleryResult<usize> {
        let changed = self.update(|galleries| {
            let mut changed = 0;
            for gallery in galleries.iter_mut() {
                if gallery_ids.iter().any(|id| id.as_ref() == gallery.id)
                    && gallery.insert(artwork.clone())
                {
                    changed += 1;
                }
            }
            Ok((changed, changed > 0))
        })?;

        if changed > 0 {
            info!(artwork = %artwork.key(), changed, "saved artwork to galleries");
        }
        Ok(changed)
    }

    /// Removes an artwork from a gallery. Returns `false` if it was not there.
    pub fn remove_artwork(&mut self, gallery_id: &str, key: &ArtworkKey) -> GalleryResult<bool> {
        let removed = self.update(|galleries| {
            let gallery = find_mut(galleries, gallery_id)?;
            let before = gallery.artworks.len();
            gallery.artworks.retain(|a| !a.has_key(key));
            let removed = gallery.artworks.len() != before;
            Ok((removed, removed))
        })?;

        if removed {
            info!(gallery = gallery_id, artwork = %key, "removed artwork from gallery");
        }
        Ok(removed)
    }

    /// Renames a gallery, optionally replacing its description.
    pub fn rename_gallery(
        &mut self,
        gallery_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> GalleryResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GalleryError::EmptyName);
        }

        self.update(|galleries| {
            let gallery = find_mut(galleries, gallery_id)?;
            gallery.name = name.to_string();
            if let Some(description) = description {
                gallery.description = description.trim().to_string();
            }
            Ok(((), true))
        })?;

        info!(gallery = gallery_id, name, "renamed gallery");
        Ok(())
    }

    /// Deletes a gallery. Returns `false` if no gallery had that id.
    pub fn delete_gallery(&mut self, gallery_id: &str) -> GalleryResult<bool> {
        let deleted = self.update(|galleries| {
            let before = galleries.len();
            galleries.retain(|g| g.id != gallery_id);
            let deleted = galleries.len() != before;
            Ok((deleted, deleted))
        })?;

        if deleted {
            info!(gallery = gallery_id, "deleted gallery");
        }
        Ok(deleted)
    }
}

fn find_mut<'a>(galleries: &'a mut [Gallery], id: &str) -> GalleryResult<&'a mut Gallery> {
    galleries
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or_else(|| GalleryError::not_found(id))
}

/// Writes galleries to `path` through a sibling temp file and a rename.
fn write_galleries(path: &Path, galleries: &[Gallery]) -> GalleryResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GalleryError::io(parent, e))?;
    }

    let temp_path = with_suffix(path, ".tmp");
    let content = serde_json::to_string_pretty(galleries)?;

    fs::write(&temp_path, content).map_err(|e| GalleryError::io(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| GalleryError::io(path, e))?;

    debug!("saved {} galleries to {:?}", galleries.len(), path);
    Ok(())
}

/// `<file name>.invalid`, or `<file name>.<timestamp>.invalid` when that is taken.
fn backup_path(path: &Path) -> PathBuf {
    let backup = with_suffix(path, ".invalid");
    if !backup.exists() {
        return backup;
    }
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.6f");
    with_suffix(path, &format!(".{}.invalid", stamp))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindfulart_core::Source;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> GalleryStore {
        GalleryStore::open(dir.path().join("galleries.json")).unwrap()
    }

    fn art(source: Source, id: &str) -> Artwork {
        Artwork::new(source, id).with_title(format!("Title {}", id))
    }

    #[test]
    fn fresh_store_is_seeded_and_persisted() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.galleries().len(), 1);
        let seeded = &store.galleries()[0];
        assert_eq!(seeded.name, DEFAULT_GALLERY_NAME);
        assert_eq!(seeded.description, DEFAULT_GALLERY_DESCRIPTION);
        assert!(seeded.is_empty());
        assert!(Uuid::parse_str(&seeded.id).is_ok());

        let reopened = store_in(&dir);
        assert_eq!(reopened.galleries(), store.galleries());
    }

    #[test]
    fn empty_array_is_reseeded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("galleries.json");
        fs::write(&path, "[]").unwrap();

        let store = GalleryStore::open(&path).unwrap();
        assert_eq!(store.galleries().len(), 1);
        assert_eq!(store.galleries()[0].name, DEFAULT_GALLERY_NAME);
    }

    #[test]
    fn invalid_file_is_backed_up_and_reseeded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("galleries.json");
        fs::write(&path, r#"{"not": "an array"}"#).unwrap();

        let store = GalleryStore::open(&path).unwrap();
        assert_eq!(store.galleries().len(), 1);

        let backup = dir.path().join("galleries.json.invalid");
        assert_eq!(
            fs::read_to_string(backup).unwrap(),
            r#"{"not": "an array"}"#
        );
    }

    #[test]
    fn backup_keeps_custom_file_name_and_earlier_backups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("galleries.db");

        fs::write(&path, "first broken").unwrap();
        GalleryStore::open(&path).unwrap();
        let first = dir.path().join("galleries.db.invalid");
        assert_eq!(fs::read_to_string(&first).unwrap(), "first broken");
        assert!(!dir.path().join("galleries.json.invalid").exists());

        fs::write(&path, "second broken").unwrap();
        GalleryStore::open(&path).unwrap();
        assert_eq!(fs::read_to_string(&first).unwrap(), "first broken");

        let mut backups: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .filter(|name| name.ends_with(".invalid"))
            .collect();
        backups.sort();
        assert_eq!(backups.len(), 2);
        let stamped = backups.iter().find(|n| *n != "galleries.db.invalid").unwrap();
        assert!(stamped.starts_with("galleries.db."));
        assert_eq!(
            fs::read_to_string(dir.path().join(stamped)).unwrap(),
            "second broken"
        );
    }

    #[test]
    fn reads_galleries_in_stored_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("galleries.json");
        fs::write(
            &path,
            r#"[{
                "id": "g-1",
                "name": "Dutch",
                "description": "",
                "createdAt": "2024-05-01T10:00:00.000Z",
                "artworks": [{
                    "id": "SK-C-5",
                    "title": "The Night Watch",
                    "artist": "Rembrandt van Rijn",
                    "imageUrl": null,
                    "objectUrl": "https://www.rijksmuseum.nl/en/collection/SK-C-5",
                    "institution": "Rijksmuseum",
                    "source": "rijksmuseum"
                }]
            }]"#,
        )
        .unwrap();

        let store = GalleryStore::open(&path).unwrap();
        let gallery = store.get("g-1").unwrap();
        assert_eq!(gallery.len(), 1);
        assert!(gallery.contains(&ArtworkKey::new(Source::Rijksmuseum, "SK-C-5")));
    }

    #[test]
    fn create_gallery_trims_and_rejects_empty_names() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let gallery = store.create_gallery("  Blue Period ", "  cool tones ").unwrap();
        assert_eq!(gallery.name, "Blue Period");
        assert_eq!(gallery.description, "cool tones");
        assert_eq!(store.galleries().len(), 2);

        assert!(matches!(
            store.create_gallery("   ", "x"),
            Err(GalleryError::EmptyName)
        ));
        assert_eq!(store_in(&dir).galleries().len(), 2);
    }

    #[test]
    fn add_artwork_dedups_on_source_and_id() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let id = store.galleries()[0].id.clone();

        assert!(store.add_artwork(&id, art(Source::Harvard, "1")).unwrap());
        assert!(!store.add_artwork(&id, art(Source::Harvard, "1")).unwrap());
        // Same id from another source is a different artwork.
        assert!(store.add_artwork(&id, art(Source::Rijksmuseum, "1")).unwrap());

        assert_eq!(store_in(&dir).get(&id).unwrap().len(), 2);
    }

    #[test]
    fn add_artwork_to_unknown_gallery_fails() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let err = store
            .add_artwork("missing", art(Source::Harvard, "1"))
            .unwrap_err();
        assert!(matches!(err, GalleryError::NotFound { .. }));
    }

    #[test]
    fn add_artwork_to_several_galleries() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let first = store.galleries()[0].id.clone();
        let second = store.create_gallery("Second", "").unwrap().id;
        store.add_artwork(&first, art(Source::Harvard, "9")).unwrap();

        let ids = [first.as_str(), second.as_str(), "unknown"];
        let changed = store
            .add_artwork_to_galleries(&ids, &art(Source::Harvard, "9"))
            .unwrap();
        assert_eq!(changed, 1);
        assert_eq!(store.get(&second).unwrap().len(), 1);
        assert_eq!(store.get(&first).unwrap().len(), 1);
    }

    #[test]
    fn remove_artwork_by_key() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let id = store.galleries()[0].id.clone();
        store.add_artwork(&id, art(Source::Harvard, "1")).unwrap();

        let key = ArtworkKey::new(Source::Harvard, "1");
        assert!(store.remove_artwork(&id, &key).unwrap());
        assert!(!store.remove_artwork(&id, &key).unwrap());
        assert!(store_in(&dir).get(&id).unwrap().is_empty());
    }

    #[test]
    fn rename_and_delete_gallery() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let id = store.create_gallery("Old", "desc").unwrap().id;

        store.rename_gallery(&id, " New ", None).unwrap();
        let gallery = store.get(&id).unwrap();
        assert_eq!(gallery.name, "New");
        assert_eq!(gallery.description, "desc");
        assert!(matches!(
            store.rename_gallery(&id, "", None),
            Err(GalleryError::EmptyName)
        ));

        assert!(store.delete_gallery(&id).unwrap());
        assert!(!store.delete_gallery(&id).unwrap());
        assert!(store_in(&dir).get(&id).is_none());
    }

    #[test]
    fn resolve_by_prefix() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let id = store.galleries()[0].id.clone();

        assert_eq!(store.resolve(&id).unwrap().id, id);
        assert_eq!(store.resolve(&id[..8]).unwrap().id, id);
        assert!(matches!(
            store.resolve("zzzz"),
            Err(GalleryError::NotFound { .. })
        ));

        store.create_gallery("Other", "").unwrap();
        assert!(matches!(
            store.resolve(""),
            Err(GalleryError::NotFound { .. })
        ));
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        let mut store = GalleryStore::open(data_dir.join("galleries.json")).unwrap();
        let id = store.galleries()[0].id.clone();
        store.add_artwork(&id, art(Source::Harvard, "1")).unwrap();
        let before = store.galleries().to_vec();

        // A plain file where the data directory was makes every write fail.
        fs::remove_dir_all(&data_dir).unwrap();
        fs::write(&data_dir, "not a directory").unwrap();

        assert!(matches!(
            store.create_gallery("Lost", ""),
            Err(GalleryError::Io { .. })
        ));
        assert!(store.add_artwork(&id, art(Source::Rijksmuseum, "2")).is_err());
        assert!(store
            .add_artwork_to_galleries(&[id.as_str()], &art(Source::Harvard, "3"))
            .is_err());
        assert!(store
            .remove_artwork(&id, &ArtworkKey::new(Source::Harvard, "1"))
            .is_err());
        assert!(store.rename_gallery(&id, "Renamed", Some("new")).is_err());
        assert!(store.delete_gallery(&id).is_err());

        assert_eq!(store.galleries(), before.as_slice());
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.create_gallery("Another", "").unwrap();
        assert!(!dir.path().join("galleries.json.tmp").exists());
        assert!(dir.path().join("galleries.json").exists());
    }
}

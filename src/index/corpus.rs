//! In-memory corpus index loaded from the signature file

use crate::index::entry::{ColorEntry, EntryId};
use crate::index::signature::SignatureRecord;
use crate::io::configuration::INDEX_FILE_NAME;
use crate::io::error::{MosaicError, Result};
use crate::io::image::{load_rgb, reshape_by_box_average, solid_tile};
use image::RgbImage;
use std::collections::HashSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Owned collection of corpus entries plus the directory they live in
///
/// Entries keep file order, which is also the matcher's tie-break order.
/// Identifiers are unique: on duplicates the first record wins.
#[derive(Debug)]
pub struct ColorIndex {
    base_dir: PathBuf,
    entries: Vec<ColorEntry>,
}

impl ColorIndex {
    /// Load the signature file of a corpus directory
    ///
    /// Malformed records are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The signature file is missing or cannot be read
    /// - No usable record remains
    pub fn load(corpus_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = corpus_dir.as_ref().to_path_buf();
        let index_path = base_dir.join(INDEX_FILE_NAME);

        let file = std::fs::File::open(&index_path).map_err(|source| MosaicError::SignatureFile {
            path: index_path.clone(),
            source,
        })?;

        let index = Self::parse(base_dir, std::io::BufReader::new(file))
            .map_err(|err| match err {
                MosaicError::FileSystem { source, .. } => MosaicError::SignatureFile {
                    path: index_path.clone(),
                    source,
                },
                other => other,
            })?;

        log::info!(
            "Loaded {} corpus entries from {}",
            index.len(),
            index_path.display()
        );
        Ok(index)
    }

    /// Build an index from signature records read from `reader`
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or no usable record is found
    pub fn parse(base_dir: impl Into<PathBuf>, reader: impl BufRead) -> Result<Self> {
        let base_dir = base_dir.into();
        let mut entries = Vec::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match SignatureRecord::parse(&line) {
                Ok(record) => entries.push(ColorEntry::new(record.identifier, record.signatures)),
                Err(reason) => {
                    let err = MosaicError::MalformedRecord {
                        line: number + 1,
                        reason,
                    };
                    log::warn!("Skipping record: {err}");
                }
            }
        }

        let index = Self::from_entries(base_dir, entries);
        if index.is_empty() {
            return Err(MosaicError::EmptyIndex {
                corpus: index.base_dir,
            });
        }
        Ok(index)
    }

    /// Assemble an index from already built entries, dropping duplicate identifiers
    pub fn from_entries(base_dir: impl Into<PathBuf>, entries: Vec<ColorEntry>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(entries.len());

        for entry in entries {
            if seen.insert(entry.identifier().to_string()) {
                unique.push(entry);
            } else {
                log::warn!("Duplicate corpus identifier '{}' ignored", entry.identifier());
            }
        }

        Self {
            base_dir: base_dir.into(),
            entries: unique,
        }
    }

    /// Directory identifiers are resolved against
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Number of entries
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entry
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in index order
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [ColorEntry] {
        &mut self.entries
    }

    /// Handles of all entries in index order
    pub fn ids(&self) -> impl Iterator<Item = EntryId> {
        (0..self.entries.len()).map(EntryId::new)
    }

    /// Entry behind a handle
    pub fn entry(&self, id: EntryId) -> Option<&ColorEntry> {
        self.entries.get(id.position())
    }

    /// Mutable entry behind a handle
    pub fn entry_mut(&mut self, id: EntryId) -> Option<&mut ColorEntry> {
        self.entries.get_mut(id.position())
    }

    /// Handle of the entry with the given identifier
    pub fn find(&self, identifier: &str) -> Option<EntryId> {
        self.entries
            .iter()
            .position(|entry| entry.identifier() == identifier)
            .map(EntryId::new)
    }

    /// File backing an entry
    pub fn resolve_path(&self, entry: &ColorEntry) -> PathBuf {
        self.base_dir.join(entry.identifier())
    }

    /// Cell-size rendering of an entry, produced once and cached
    ///
    /// The corpus image is reshaped by box average to `cell_pixels` square.
    /// An image that can no longer be decoded degrades to a flat tile of the
    /// entry's RGB average. The first requested size is the one cached.
    pub fn rendering(&self, id: EntryId, cell_pixels: u32) -> Option<&RgbImage> {
        let entry = self.entry(id)?;
        Some(entry.rendering_or_init(|| self.render_entry(entry, cell_pixels)))
    }

    fn render_entry(&self, entry: &ColorEntry, cell_pixels: u32) -> RgbImage {
        let path = self.resolve_path(entry);
        match load_rgb(&path) {
            Ok(source) => reshape_by_box_average(&source, cell_pixels, cell_pixels),
            Err(err) => {
                log::warn!("{err}; rendering flat tile instead");
                solid_tile(cell_pixels, cell_pixels, entry.rgb().channels())
            }
        }
    }
}

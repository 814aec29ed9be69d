//! Mosaic descriptor: the flat listing of final cell assignments
//!
//! Line 1 holds `<width> <height>` in cells, line 2 the cell pixel size,
//! followed by one corpus identifier per cell in raster order.

use crate::index::{ColorIndex, EntryId};
use crate::io::error::{MosaicError, Result, file_system_error};
use crate::spatial::grid::MosaicGrid;
use ndarray::Array2;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Final assignment snapshot of a mosaic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicDescriptor {
    /// Cells per row
    pub width: usize,
    /// Cells per column
    pub height: usize,
    /// Pixel size of one rendered cell
    pub cell_pixels: u32,
    /// Corpus identifiers in raster order
    pub identifiers: Vec<String>,
}

impl MosaicDescriptor {
    /// Snapshot a grid's current assignments
    pub fn from_grid(grid: &MosaicGrid, index: &ColorIndex) -> Self {
        let identifiers = grid
            .assignments()
            .iter()
            .map(|&id| {
                index
                    .entry(id)
                    .map_or_else(String::new, |entry| entry.identifier().to_string())
            })
            .collect();

        Self {
            width: grid.cols(),
            height: grid.rows(),
            cell_pixels: grid.cell_pixels(),
            identifiers,
        }
    }

    /// Parse descriptor text; `path` is only used in error messages
    ///
    /// # Errors
    ///
    /// Returns an error if the header is malformed or the identifier count
    /// differs from `width * height`
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let invalid = |reason: String| MosaicError::Descriptor {
            path: path.to_path_buf(),
            reason,
        };

        let mut lines = text.lines();
        let header = lines
            .next()
            .ok_or_else(|| invalid("missing size line".to_string()))?;
        let mut dimensions = header.split_whitespace().map(str::parse::<usize>);
        let (Some(Ok(width)), Some(Ok(height)), None) =
            (dimensions.next(), dimensions.next(), dimensions.next())
        else {
            return Err(invalid(format!("size line '{header}' is not '<width> <height>'")));
        };

        let cell_line = lines
            .next()
            .ok_or_else(|| invalid("missing cell size line".to_string()))?;
        let cell_pixels = cell_line
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid(format!("cell size '{cell_line}': {e}")))?;

        let expected = width
            .checked_mul(height)
            .ok_or_else(|| invalid(format!("size {width}x{height} overflows the cell count")))?;

        let identifiers: Vec<String> = lines
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.trim().to_string())
            .collect();

        if identifiers.len() != expected {
            return Err(invalid(format!(
                "expected {expected} identifiers for {width}x{height}, found {}",
                identifiers.len()
            )));
        }

        Ok(Self {
            width,
            height,
            cell_pixels,
            identifiers,
        })
    }

    /// Read a descriptor file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is inconsistent
    pub fn read(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).map_err(file_system_error(path, "read descriptor"))?;
        Self::parse(&text, path)
    }

    /// Write the descriptor, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be written
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(file_system_error(parent, "create directory"))?;
        }
        std::fs::write(path, self.to_string()).map_err(file_system_error(path, "write descriptor"))
    }

    /// Rebuild a grid by resolving identifiers against an index
    ///
    /// Cells take their own entry's luma/chroma signature as source coloring.
    ///
    /// # Errors
    ///
    /// Returns an error if an identifier is not in the index or the cell size is zero
    pub fn to_grid(&self, index: &ColorIndex, path: &Path) -> Result<MosaicGrid> {
        let lookup: HashMap<&str, EntryId> = index
            .ids()
            .filter_map(|id| index.entry(id).map(|entry| (entry.identifier(), id)))
            .collect();

        let ids = self
            .identifiers
            .iter()
            .map(|identifier| {
                lookup
                    .get(identifier.as_str())
                    .copied()
                    .ok_or_else(|| MosaicError::Descriptor {
                        path: path.to_path_buf(),
                        reason: format!("'{identifier}' is not in the corpus index"),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let source = ids
            .iter()
            .map(|&id| {
                index
                    .entry(id)
                    .map(crate::index::ColorEntry::luma_chroma)
                    .unwrap_or_default()
            })
            .collect();

        let shape = (self.height, self.width);
        let reshape_error = |e: ndarray::ShapeError| MosaicError::Descriptor {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };
        let assignments = Array2::from_shape_vec(shape, ids).map_err(reshape_error)?;
        let source = Array2::from_shape_vec(shape, source).map_err(reshape_error)?;

        MosaicGrid::from_parts(assignments, source, self.cell_pixels)
    }
}

impl fmt::Display for MosaicDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.width, self.height)?;
        writeln!(f, "{}", self.cell_pixels)?;
        for identifier in &self.identifiers {
            writeln!(f, "{identifier}")?;
        }
        Ok(())
    }
}

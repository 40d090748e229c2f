use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, SparrowError};
use crate::sprite::Region;

use super::xml;

/// A parsed texture atlas: the packed sheet's name and its sub-textures
///
/// Read-only once built. Regions keep their parse order; a name-sorted index
/// built at construction backs [`TextureAtlas::lookup`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureAtlas {
    image_path: String,
    regions: Vec<Region>,
    /// Indices into `regions`, sorted by name
    by_name: Vec<usize>,
}

impl TextureAtlas {
    /// Build an atlas from regions in their original order.
    ///
    /// Fails if two regions share a name.
    pub fn new(image_path: impl Into<String>, regions: Vec<Region>) -> Result<Self> {
        let mut by_name: Vec<usize> = (0..regions.len()).collect();
        by_name.sort_unstable_by(|&a, &b| regions[a].name().cmp(regions[b].name()));

        if let Some(pair) = by_name
            .windows(2)
            .find(|pair| regions[pair[0]].name() == regions[pair[1]].name())
        {
            return Err(SparrowError::DuplicateRegionName(
                regions[pair[0]].name().to_string(),
            ));
        }

        Ok(Self {
            image_path: image_path.into(),
            regions,
            by_name,
        })
    }

    /// Parse a Sparrow v2 texture atlas in XML format
    pub fn parse(xml_data: &[u8]) -> Result<Self> {
        xml::decode(xml_data)
    }

    /// Read and parse a Sparrow v2 texture atlas file
    pub fn from_path(path: &Path) -> Result<Self> {
        let xml_data = std::fs::read(path).map_err(|e| SparrowError::AtlasRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&xml_data)
    }

    /// Encode the atlas back to Sparrow XML, preserving region order
    pub fn encode(&self) -> Result<Vec<u8>> {
        xml::encode(self)
    }

    /// Path of the packed sheet, as written in the atlas
    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    /// Find the region with exactly this name
    pub fn lookup(&self, name: &str) -> Result<&Region> {
        self.by_name
            .binary_search_by(|&i| self.regions[i].name().cmp(name))
            .map(|pos| &self.regions[self.by_name[pos]])
            .map_err(|_pos| SparrowError::NotFound {
                name: name.to_string(),
            })
    }

    /// All regions keyed by name
    pub fn enumerate(&self) -> HashMap<&str, &Region> {
        self.regions.iter().map(|r| (r.name(), r)).collect()
    }

    /// All regions in parse order
    pub fn all(&self) -> &[Region] {
        &self.regions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl<'a> IntoIterator for &'a TextureAtlas {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

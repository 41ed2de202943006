//! Point-cloud asset addressing.

use std::fmt;

use crate::core::{Error, Result};

/// Identity of a tree's point-cloud asset: `{zone}/{zone}/{species}/{tree_id}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssetKey {
    zone: String,
    species: String,
    tree_id: String,
}

impl AssetKey {
    /// Build a key; every component must be non-empty.
    pub fn new(zone: impl Into<String>, species: impl Into<String>, tree_id: impl Into<String>) -> Result<Self> {
        let zone = zone.into().trim().to_string();
        let species = species.into().trim().to_string();
        let tree_id = tree_id.into().trim().to_string();

        for (name, value) in [("zone", &zone), ("species", &species), ("tree id", &tree_id)] {
            if value.is_empty() {
                return Err(Error::InvalidSelection(format!("empty {name}")));
            }
        }

        Ok(Self { zone, species, tree_id })
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn tree_id(&self) -> &str {
        &self.tree_id
    }

    /// Relative path of the asset file, including the `.json` extension.
    pub fn file_name(&self) -> String {
        format!("{self}.json")
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}/{0}/{1}/{2}", self.zone, self.species, self.tree_id)
    }
}

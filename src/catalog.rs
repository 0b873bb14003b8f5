use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{BnpError, BnpResult};

/// Dimensions of a stock sheet.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Stock {
    /// Width, the capacity of the outer (strip) knapsack.
    pub width: f64,
    /// Length, the capacity of the inner (item) knapsack.
    pub length: f64,
}

/// A strip type that stock sheets are cut into.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct StripType {
    /// Width of the strip.
    pub width: f64,
}

/// An item type that strips are cut into.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ItemType {
    /// Length of the item along the strip.
    pub length: f64,
    /// Minimum number of items to produce.
    pub demand: u32,
}

/// Immutable description of one problem instance.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Catalog {
    /// Stock sheet dimensions.
    pub stock: Stock,
    /// Strip types, in master row order.
    pub strip_types: Vec<StripType>,
    /// Item types, in master row order after the strip rows.
    pub item_types: Vec<ItemType>,
}

impl Catalog {
    /// Creates a catalog, rejecting instances the search cannot handle.
    pub fn new(
        stock: Stock,
        strip_types: Vec<StripType>,
        item_types: Vec<ItemType>,
    ) -> BnpResult<Self> {
        let catalog = Catalog {
            stock,
            strip_types,
            item_types,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parses and validates a catalog from a TOML string.
    pub fn from_toml_str(s: &str) -> BnpResult<Self> {
        let catalog: Catalog = toml::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads a catalog from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> BnpResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Number of strip types (`J`).
    pub fn n_strip_types(&self) -> usize {
        self.strip_types.len()
    }

    /// Number of item types (`N`).
    pub fn n_item_types(&self) -> usize {
        self.item_types.len()
    }

    /// Number of master rows, `J + N`.
    pub fn n_rows(&self) -> usize {
        self.n_strip_types() + self.n_item_types()
    }

    fn validate(&self) -> BnpResult<()> {
        let invalid = |msg: String| Err(BnpError::InvalidCatalog(msg));

        if !(self.stock.width > 0.0 && self.stock.length > 0.0) {
            return invalid(format!(
                "stock dimensions must be positive, got {}x{}",
                self.stock.width, self.stock.length
            ));
        }
        if self.strip_types.is_empty() {
            return invalid("no strip types".to_string());
        }
        if self.item_types.is_empty() {
            return invalid("no item types".to_string());
        }
        for (j, strip) in self.strip_types.iter().enumerate() {
            if !(strip.width > 0.0 && strip.width <= self.stock.width) {
                return invalid(format!(
                    "strip type {j} has width {}, stock width is {}",
                    strip.width, self.stock.width
                ));
            }
        }
        for (i, item) in self.item_types.iter().enumerate() {
            if !(item.length > 0.0 && item.length <= self.stock.length) {
                return invalid(format!(
                    "item type {i} has length {}, stock length is {}",
                    item.length, self.stock.length
                ));
            }
        }
        Ok(())
    }
}

//! Static read-only catalogs: collectible items and tradable
//! instruments. The catalog has no behavior beyond lookup — the
//! player owns subsets of it by id.

use crate::types::{InstrumentId, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of collectible categories. Each category has its own
/// typed owned-set in the game state; there is no runtime field-name
/// dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Cars,
    Planes,
    Ships,
    Coins,
    Islands,
    Jewels,
    Nfts,
    Paintings,
    RetroCars,
    Stamps,
    Unique,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 11] = [
        ItemCategory::Cars,
        ItemCategory::Planes,
        ItemCategory::Ships,
        ItemCategory::Coins,
        ItemCategory::Islands,
        ItemCategory::Jewels,
        ItemCategory::Nfts,
        ItemCategory::Paintings,
        ItemCategory::RetroCars,
        ItemCategory::Stamps,
        ItemCategory::Unique,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cars => "cars",
            Self::Planes => "planes",
            Self::Ships => "ships",
            Self::Coins => "coins",
            Self::Islands => "islands",
            Self::Jewels => "jewels",
            Self::Nfts => "nfts",
            Self::Paintings => "paintings",
            Self::RetroCars => "retro_cars",
            Self::Stamps => "stamps",
            Self::Unique => "unique",
        }
    }
}

/// One purchasable collectible. Immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    pub image: String,
}

/// One tradable instrument. The market simulator produces a live
/// price on top of `base_price`; `delta_range` bounds the per-tick
/// random-walk step (stocks ±100, simulated commodities wider).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentSpec {
    pub id: InstrumentId,
    pub name: String,
    pub base_price: f64,
    pub dividend_yield: f64,
    pub capitalization: f64,
    pub total_shares: u64,
    pub delta_range: f64,
    pub logo: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    items: BTreeMap<ItemCategory, Vec<CatalogItem>>,
    instruments: Vec<InstrumentSpec>,
}

#[derive(Debug, Deserialize)]
struct CollectiblesFile {
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    category: ItemCategory,
    items: Vec<CatalogItem>,
}

#[derive(Debug, Deserialize)]
struct InstrumentsFile {
    instruments: Vec<InstrumentSpec>,
}

impl Catalog {
    /// Load from the data/ directory (runtime path, used by the
    /// runner). Tests and fallback use [`Catalog::builtin`].
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let items_path = format!("{data_dir}/catalog/collectibles.json");
        let items_raw = std::fs::read_to_string(&items_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {items_path}: {e}"))?;
        let instruments_path = format!("{data_dir}/catalog/instruments.json");
        let instruments_raw = std::fs::read_to_string(&instruments_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {instruments_path}: {e}"))?;
        Self::from_json(&items_raw, &instruments_raw)
    }

    /// The catalog shipped with the crate, compiled in.
    pub fn builtin() -> Self {
        Self::from_json(
            include_str!("../../data/catalog/collectibles.json"),
            include_str!("../../data/catalog/instruments.json"),
        )
        .expect("built-in catalog is valid")
    }

    fn from_json(items_raw: &str, instruments_raw: &str) -> anyhow::Result<Self> {
        let items_file: CollectiblesFile = serde_json::from_str(items_raw)?;
        let instruments_file: InstrumentsFile = serde_json::from_str(instruments_raw)?;
        let items = items_file
            .categories
            .into_iter()
            .map(|c| (c.category, c.items))
            .collect();
        Ok(Self {
            items,
            instruments: instruments_file.instruments,
        })
    }

    pub fn items(&self, category: ItemCategory) -> &[CatalogItem] {
        self.items.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn item(&self, category: ItemCategory, id: ItemId) -> Option<&CatalogItem> {
        self.items(category).iter().find(|i| i.id == id)
    }

    pub fn instruments(&self) -> &[InstrumentSpec] {
        &self.instruments
    }

    pub fn instrument(&self, id: &str) -> Option<&InstrumentSpec> {
        self.instruments.iter().find(|s| s.id == id)
    }
}

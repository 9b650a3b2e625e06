// File: src/catalog.rs
// Purpose: Product catalog and the search / filter / sort pipeline over it

use crate::error::CatalogError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Category value that disables the category filter
pub const ALL_CATEGORIES: &str = "All";

/// Stock below this (but above zero) is shown as running low
const LOW_STOCK_THRESHOLD: u32 = 10;

const DEMO_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub rating: f64,
    pub stock: u32,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock(u32),
    OutOfStock,
}

impl Product {
    pub fn stock_status(&self) -> StockStatus {
        match self.stock {
            0 => StockStatus::OutOfStock,
            n if n < LOW_STOCK_THRESHOLD => StockStatus::LowStock(n),
            _ => StockStatus::InStock,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// `needle` must already be lowercased
    fn mentions(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Labeled, inclusive price bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortBy {
    #[serde(rename = "name-asc")]
    NameAsc,
    #[serde(rename = "name-desc")]
    NameDesc,
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
    #[serde(rename = "rating-desc")]
    RatingDesc,
}

impl SortBy {
    pub const ALL: [SortBy; 5] = [
        SortBy::NameAsc,
        SortBy::NameDesc,
        SortBy::PriceAsc,
        SortBy::PriceDesc,
        SortBy::RatingDesc,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SortBy::NameAsc => "name-asc",
            SortBy::NameDesc => "name-desc",
            SortBy::PriceAsc => "price-asc",
            SortBy::PriceDesc => "price-desc",
            SortBy::RatingDesc => "rating-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::NameAsc => "Name (A-Z)",
            SortBy::NameDesc => "Name (Z-A)",
            SortBy::PriceAsc => "Price (Low to High)",
            SortBy::PriceDesc => "Price (High to Low)",
            SortBy::RatingDesc => "Rating (High to Low)",
        }
    }

    /// Parse a sort key, `None` for anything unrecognised (which leaves order untouched)
    pub fn from_key(key: &str) -> Option<Self> {
        SortBy::ALL.into_iter().find(|sort| sort.key() == key)
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortBy::NameAsc => locale_cmp(&a.name, &b.name),
            SortBy::NameDesc => locale_cmp(&b.name, &a.name),
            SortBy::PriceAsc => a.price.total_cmp(&b.price),
            SortBy::PriceDesc => b.price.total_cmp(&a.price),
            SortBy::RatingDesc => b.rating.total_cmp(&a.rating),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::from_key(s).ok_or_else(|| format!("unknown sort key '{}'", s))
    }
}

/// Case-insensitive ordering; on a case-only difference lowercase sorts first
///
/// Lowercased names are compared by code point, not by a collation table, so
/// accented initials sort after plain ASCII ("Zebra" before "Éclair").
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub category: String,
    pub price_range_index: usize,
    pub sort_by: Option<SortBy>,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            price_range_index: 0,
            sort_by: Some(SortBy::NameAsc),
        }
    }
}

/// Run the catalog pipeline: text search, category, price range, then sort
///
/// The sort is stable, so ties keep their relative order from `products`.
pub fn query(
    products: &[Product],
    price_ranges: &[PriceRange],
    search: &str,
    filters: &Filters,
) -> Result<Vec<Product>, CatalogError> {
    let range = price_ranges
        .get(filters.price_range_index)
        .ok_or(CatalogError::PriceRangeOutOfBounds {
            index: filters.price_range_index,
            len: price_ranges.len(),
        })?;

    let needle = search.to_lowercase();
    let mut matched: Vec<Product> = products
        .iter()
        .filter(|product| search.is_empty() || product.mentions(&needle))
        .filter(|product| {
            filters.category == ALL_CATEGORIES || product.category == filters.category
        })
        .filter(|product| range.contains(product.price))
        .cloned()
        .collect();

    if let Some(sort_by) = filters.sort_by {
        matched.sort_by(|a, b| sort_by.compare(a, b));
    }

    tracing::debug!(
        search,
        category = %filters.category,
        price_range = %range.label,
        sort = ?filters.sort_by,
        matched = matched.len(),
        total = products.len(),
        "catalog query"
    );

    Ok(matched)
}

#[derive(Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
    price_ranges: Vec<PriceRange>,
}

/// Read-only product collection plus the price buckets used to filter it
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    price_ranges: Vec<PriceRange>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids
    pub fn new(
        products: Vec<Product>,
        price_ranges: Vec<PriceRange>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        if let Some(dup) = products.iter().find(|p| !seen.insert(p.id)) {
            return Err(CatalogError::DuplicateProductId(dup.id));
        }

        let catalog = Self {
            products,
            price_ranges,
        };
        catalog.warn_on_hidden_products();
        Ok(catalog)
    }

    /// The bundled demo catalog
    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_CATALOG).context("Failed to parse bundled demo catalog")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file.products, file.price_ranges)?)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse catalog file: {:?}", path))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn price_ranges(&self) -> &[PriceRange] {
        &self.price_ranges
    }

    pub fn find(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Like [`Catalog::find`], for callers that render a not-found view
    pub fn get(&self, id: u32) -> Result<&Product, CatalogError> {
        self.find(id).ok_or(CatalogError::ProductNotFound(id))
    }

    /// "All" followed by each category in the order it first appears
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        std::iter::once(ALL_CATEGORIES)
            .chain(
                self.products
                    .iter()
                    .map(|p| p.category.as_str())
                    .filter(|category| seen.insert(*category)),
            )
            .collect()
    }

    pub fn featured(&self, count: usize) -> &[Product] {
        &self.products[..count.min(self.products.len())]
    }

    pub fn query(&self, search: &str, filters: &Filters) -> Result<Vec<Product>, CatalogError> {
        query(&self.products, &self.price_ranges, search, filters)
    }

    // The default filter always applies range 0, so products outside it are never listed
    fn warn_on_hidden_products(&self) {
        let Some(default_range) = self.price_ranges.first() else {
            tracing::warn!("catalog has no price ranges; every query will fail");
            return;
        };
        let hidden = self
            .products
            .iter()
            .filter(|p| !default_range.contains(p.price))
            .count();
        if hidden > 0 {
            tracing::warn!(
                range = %default_range.label,
                hidden,
                "default price range does not cover every product"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn product(id: u32, name: &str, category: &str, price: f64, rating: f64) -> Product {
        Product {
            id,
            name: name.to_string(),
            category: category.to_string(),
            price,
            rating,
            stock: 5,
            description: format!("{} description", name),
            image: String::new(),
        }
    }

    fn ids(products: &[Product]) -> Vec<u32> {
        products.iter().map(|p| p.id).collect()
    }

    fn ranges() -> Vec<PriceRange> {
        vec![
            PriceRange::new("All Prices", 0.0, 100.0),
            PriceRange::new("Under $50", 0.0, 50.0),
        ]
    }

    #[test]
    fn test_locale_cmp_ignores_case() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_locale_cmp_accents_follow_code_points() {
        assert_eq!(locale_cmp("Éclair", "Zebra"), Ordering::Greater);
        assert_eq!(locale_cmp("éclair", "Éclair"), Ordering::Less);
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let products = vec![
            product(1, "banana", "Fruit", 1.0, 1.0),
            product(2, "Apple", "Fruit", 1.0, 1.0),
            product(3, "cherry", "Fruit", 1.0, 1.0),
        ];
        let sorted = query(&products, &ranges(), "", &Filters::default()).unwrap();
        assert_eq!(ids(&sorted), vec![2, 1, 3]);
    }

    #[test]
    fn test_unknown_sort_key_keeps_order() {
        assert_eq!(SortBy::from_key("popularity"), None);

        let products = vec![
            product(1, "B", "X", 30.0, 1.0),
            product(2, "A", "X", 10.0, 1.0),
        ];
        let filters = Filters {
            sort_by: SortBy::from_key("popularity"),
            ..Filters::default()
        };
        let result = query(&products, &ranges(), "", &filters).unwrap();
        assert_eq!(ids(&result), vec![1, 2]);
    }

    #[test]
    fn test_out_of_bounds_price_range() {
        let filters = Filters {
            price_range_index: 5,
            ..Filters::default()
        };
        assert_eq!(
            query(&[], &ranges(), "", &filters),
            Err(CatalogError::PriceRangeOutOfBounds { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_stock_status() {
        let mut p = product(1, "Thing", "X", 1.0, 1.0);
        p.stock = 0;
        assert_eq!(p.stock_status(), StockStatus::OutOfStock);
        p.stock = 9;
        assert_eq!(p.stock_status(), StockStatus::LowStock(9));
        p.stock = 10;
        assert_eq!(p.stock_status(), StockStatus::InStock);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let products = vec![
            product(1, "A", "X", 1.0, 1.0),
            product(1, "B", "X", 1.0, 1.0),
        ];
        assert_eq!(
            Catalog::new(products, ranges()),
            Err(CatalogError::DuplicateProductId(1))
        );
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let catalog = Catalog::new(
            vec![
                product(1, "A", "Tools", 1.0, 1.0),
                product(2, "B", "Garden", 1.0, 1.0),
                product(3, "C", "Tools", 1.0, 1.0),
            ],
            ranges(),
        )
        .unwrap();
        assert_eq!(catalog.categories(), vec!["All", "Tools", "Garden"]);
    }

    #[test]
    fn test_featured_is_bounded() {
        let catalog = Catalog::new(vec![product(1, "A", "X", 1.0, 1.0)], ranges()).unwrap();
        assert_eq!(catalog.featured(6).len(), 1);
        assert_eq!(catalog.featured(0).len(), 0);
    }

    #[test]
    fn test_sort_key_round_trip_through_serde() {
        let json = serde_json::to_string(&SortBy::RatingDesc).unwrap();
        assert_eq!(json, "\"rating-desc\"");
        assert_eq!("price-asc".parse::<SortBy>(), Ok(SortBy::PriceAsc));
    }
}

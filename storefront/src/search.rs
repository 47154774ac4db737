//! # Search
//!
//! Client side filter and sort over the fetched catalog.
//!
//! Recomputed on every render from (products, search, sort). Never mutates the catalog.
//!
//! 1. Start from the catalog in fetch order
//! 2. Non-empty search keeps titles containing it, ignoring case
//! 3. Sort by price if a direction is set, otherwise keep fetch order
use cart::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortMode {
    /// None -> Asc -> Desc -> None
    pub fn toggle(self) -> Self {
        match self {
            SortMode::None => SortMode::Asc,
            SortMode::Asc => SortMode::Desc,
            SortMode::Desc => SortMode::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::None => "No Sort",
            SortMode::Asc => "Price Low → High",
            SortMode::Desc => "Price High → Low",
        }
    }
}

pub fn filter_products<'a>(products: &'a [Product], search: &str, sort: SortMode) -> Vec<&'a Product> {
    let needle = search.to_lowercase();

    let mut result: Vec<&Product> = products
        .iter()
        .filter(|product| needle.is_empty() || product.title.to_lowercase().contains(&needle))
        .collect();

    // sort_by is stable, equal prices keep fetch order
    match sort {
        SortMode::None => {}
        SortMode::Asc => result.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortMode::Desc => result.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }

    result
}

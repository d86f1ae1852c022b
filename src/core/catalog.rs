//! Store products and catalog queries

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1513519245088-0e12902e35ca?auto=format&fit=crop&q=80&w=800";

/// Stock level below which a product is reported as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Handmade,
    Homemade,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Category::Handmade => "Handmade",
                Category::Homemade => "Homemade",
            }
        )
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "handmade" => Ok(Category::Handmade),
            "homemade" => Ok(Category::Homemade),
            _ => Err(anyhow!("Invalid category: {}", s)),
        }
    }
}

/// A product for sale. `price` is in the base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default = "default_image")]
    pub image: String,
    pub category: Category,
    pub stock: u32,
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

impl StoreItem {
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }

    /// Checks the fields an admin can edit.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail!("Product id must not be empty");
        }
        if self.name.trim().is_empty() {
            bail!("Product name must not be empty");
        }
        if !self.price.is_finite() || self.price < 0.0 {
            bail!("Invalid price for {}: {}", self.name, self.price);
        }
        Ok(())
    }
}

/// Category filter; `All` matches every product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Products matching the category and, case-insensitively, the search text
/// in name or description.
pub fn filter_items<'a>(
    items: &'a [StoreItem],
    filter: CategoryFilter,
    search: &str,
) -> Vec<&'a StoreItem> {
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|item| match filter {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == category,
        })
        .filter(|item| {
            item.name.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn find_item<'a>(items: &'a [StoreItem], id: &str) -> Option<&'a StoreItem> {
    items.iter().find(|item| item.id == id)
}

/// Products shipped with the store.
pub fn default_items() -> Vec<StoreItem> {
    vec![
        StoreItem {
            id: "1".to_string(),
            name: "Hand-stitched Silk Scarf".to_string(),
            price: 3500.0,
            description: "Artisanal silk scarf with unique traditional patterns.".to_string(),
            long_description: Some(
                "Each scarf is individually hand-stitched over 12 hours using 100% pure mulberry silk. Measures 180x50cm."
                    .to_string(),
            ),
            image: "https://images.unsplash.com/photo-1601924994987-69e26d50dc26?auto=format&fit=crop&q=80&w=800".to_string(),
            category: Category::Handmade,
            stock: 5,
        },
        StoreItem {
            id: "2".to_string(),
            name: "Ceramic Tea Set".to_string(),
            price: 8200.0,
            description: "Hand-thrown clay tea set with reactive glaze.".to_string(),
            long_description: Some(
                "A complete 5-piece set including a teapot and four cups, crafted from high-fire stoneware clay."
                    .to_string(),
            ),
            image: "https://images.unsplash.com/photo-1576020488411-291983719908?auto=format&fit=crop&q=80&w=800".to_string(),
            category: Category::Handmade,
            stock: 2,
        },
        StoreItem {
            id: "3".to_string(),
            name: "Organic Lavender Oil".to_string(),
            price: 1200.0,
            description: "Home-distilled lavender oil from my own garden.".to_string(),
            long_description: Some(
                "Pure, undiluted essential oil distilled in small batches using a copper alembic. 15ml bottle."
                    .to_string(),
            ),
            image: "https://images.unsplash.com/photo-1608571423902-eed4a5ad8108?auto=format&fit=crop&q=80&w=800".to_string(),
            category: Category::Homemade,
            stock: 12,
        },
        StoreItem {
            id: "4".to_string(),
            name: "Handmade Soy Candle".to_string(),
            price: 850.0,
            description: "Scented with sandalwood and meditation herbs.".to_string(),
            long_description: Some(
                "Poured by hand using natural soy wax and wood wicks for a clean, crackling burn."
                    .to_string(),
            ),
            image: "https://images.unsplash.com/photo-1603006905003-be475563bc59?auto=format&fit=crop&q=80&w=800".to_string(),
            category: Category::Homemade,
            stock: 20,
        },
    ]
}

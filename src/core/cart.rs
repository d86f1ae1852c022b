//! Shopping cart held in base currency

use crate::core::catalog::StoreItem;
use crate::core::pricing::PriceFormatter;
use anyhow::{Result, bail};
use reqwest::Url;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub item_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` of a product, merging with an existing line. The
    /// resulting quantity may not exceed the product's stock.
    pub fn add(&mut self, product: &StoreItem, quantity: u32) -> Result<()> {
        if quantity == 0 {
            bail!("Quantity must be at least 1");
        }
        let current = self
            .items
            .iter()
            .find(|i| i.item_id == product.id)
            .map_or(0, |i| i.quantity);
        let wanted = match current.checked_add(quantity) {
            Some(wanted) if wanted <= product.stock => wanted,
            _ => bail!(
                "Only {} of {} in stock, cart already has {}",
                product.stock,
                product.name,
                current
            ),
        };

        match self.items.iter_mut().find(|i| i.item_id == product.id) {
            Some(line) => line.quantity = wanted,
            None => self.items.push(CartItem {
                item_id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                quantity: wanted,
            }),
        }
        Ok(())
    }

    /// Removes a product line. Returns whether anything was removed.
    pub fn remove(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.item_id != item_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line totals in the base currency.
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Order message listing every line and the total in display prices.
    pub fn order_message(&self, prices: &PriceFormatter) -> String {
        let lines: Vec<String> = self
            .items
            .iter()
            .map(|i| {
                format!(
                    "{} (x{}) - {}",
                    i.name,
                    i.quantity,
                    prices.format(i.line_total())
                )
            })
            .collect();
        format!(
            "Hi Ambs! I'd like to order from Tattva Store:\n\n{}\n\nTotal: {}",
            lines.join("\n"),
            prices.format(self.total())
        )
    }
}

/// Link that opens a chat with `number` pre-filled with `message`.
/// Non-digit characters are stripped from the number.
pub fn whatsapp_link(number: &str, message: &str) -> Result<Url> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        bail!("No messaging number configured");
    }
    Ok(Url::parse_with_params(
        &format!("https://wa.me/{digits}"),
        &[("text", message)],
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::default_items;
    use crate::core::currency::rate_table;
    use crate::core::locale::LocaleFormatter;
    use crate::core::resolver::resolve_currency;

    #[test]
    fn test_add_merges_lines() -> Result<()> {
        let items = default_items();
        let mut cart = Cart::new();
        cart.add(&items[3], 1)?;
        cart.add(&items[3], 2)?;
        cart.add(&items[0], 1)?;

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total(), 850.0 * 3.0 + 3500.0);
        Ok(())
    }

    #[test]
    fn test_add_respects_stock() -> Result<()> {
        let items = default_items();
        let mut cart = Cart::new();
        cart.add(&items[1], 2)?;
        let err = cart.add(&items[1], 1).unwrap_err();
        assert!(err.to_string().contains("in stock"));
        assert!(cart.add(&items[0], 0).is_err());
        assert_eq!(cart.item_count(), 2);
        Ok(())
    }

    #[test]
    fn test_huge_quantity_is_rejected() -> Result<()> {
        let items = default_items();
        let mut cart = Cart::new();
        cart.add(&items[3], 1)?;

        let err = cart.add(&items[3], u32::MAX).unwrap_err();
        assert!(err.to_string().contains("in stock"));
        assert_eq!(cart.items[0].quantity, 1);

        let mut unlimited = items[3].clone();
        unlimited.stock = u32::MAX;
        assert!(cart.add(&unlimited, u32::MAX).is_err());
        cart.add(&unlimited, u32::MAX - 1)?;
        assert_eq!(cart.items[0].quantity, u32::MAX);
        assert_eq!(cart.item_count(), u64::from(u32::MAX));
        Ok(())
    }

    #[test]
    fn test_remove_and_clear() -> Result<()> {
        let items = default_items();
        let mut cart = Cart::new();
        cart.add(&items[0], 1)?;
        cart.add(&items[2], 1)?;

        assert!(cart.remove("1"));
        assert!(!cart.remove("1"));
        assert_eq!(cart.total(), 1200.0);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
        Ok(())
    }

    #[test]
    fn test_order_message() -> Result<()> {
        let items = default_items();
        let mut cart = Cart::new();
        cart.add(&items[1], 1)?;
        cart.add(&items[3], 1)?;

        let inr = resolve_currency("Asia/Kolkata", "en-IN", rate_table(), &LocaleFormatter);
        let prices = PriceFormatter::new(inr, "en-IN", &LocaleFormatter);
        assert_eq!(
            cart.order_message(&prices),
            "Hi Ambs! I'd like to order from Tattva Store:\n\n\
             Ceramic Tea Set (x1) - ₹8,200\n\
             Handmade Soy Candle (x1) - ₹850\n\n\
             Total: ₹9,050"
        );
        Ok(())
    }

    #[test]
    fn test_whatsapp_link() -> Result<()> {
        let link = whatsapp_link("+91 98765-43210", "Total: 5")?;
        assert_eq!(link.host_str(), Some("wa.me"));
        assert_eq!(link.path(), "/919876543210");
        let text = link
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned());
        assert_eq!(text.as_deref(), Some("Total: 5"));

        assert!(whatsapp_link("n/a", "hi").is_err());
        Ok(())
    }
}

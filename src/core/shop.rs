//! Storefront state kept in local storage
//!
//! Products, the cart, orders and the messaging number live in a
//! [`LocalStore`] as JSON values. Reads fall back to configured or built-in
//! defaults when nothing has been stored yet.

use crate::core::cart::Cart;
use crate::core::catalog::{StoreItem, default_items, find_item};
use crate::core::config::StoreConfig;
use crate::core::order::{Order, OrderStatus, next_order_id, sample_orders};
use crate::core::payment::{PaymentAuthorizer, PaymentOutcome, PaymentRequest};
use crate::core::resolver::ResolvedCurrency;
use crate::core::storage::{
    CART_KEY, LocalStore, ORDERS_KEY, PRODUCTS_KEY, WA_NUMBER_KEY, load_json, save_json,
};
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutResult {
    Placed {
        order: Order,
        request: PaymentRequest,
    },
    Declined {
        reason: String,
        request: PaymentRequest,
    },
}

/// Random 9 character product id.
pub fn new_product_id() -> String {
    Uuid::new_v4().simple().to_string()[..9].to_string()
}

pub struct Shop<'a> {
    store: &'a dyn LocalStore,
    config: &'a StoreConfig,
}

impl<'a> Shop<'a> {
    pub fn new(store: &'a dyn LocalStore, config: &'a StoreConfig) -> Self {
        Self { store, config }
    }

    pub fn merchant_name(&self) -> &str {
        &self.config.merchant_name
    }

    pub fn products(&self) -> Result<Vec<StoreItem>> {
        if let Some(products) = load_json(self.store, PRODUCTS_KEY)? {
            return Ok(products);
        }
        if !self.config.products.is_empty() {
            debug!("Using configured products");
            return Ok(self.config.products.clone());
        }
        Ok(default_items())
    }

    pub fn save_products(&self, products: &[StoreItem]) -> Result<()> {
        save_json(self.store, PRODUCTS_KEY, &products)
    }

    pub fn product(&self, id: &str) -> Result<StoreItem> {
        let products = self.products()?;
        find_item(&products, id)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown product: {}", id))
    }

    /// Replaces the product with the same id, or adds it to the front of the
    /// catalog. Returns true when the product is new.
    pub fn upsert_product(&self, item: StoreItem) -> Result<bool> {
        item.validate()?;
        let mut products = self.products()?;
        let created = match products.iter_mut().find(|p| p.id == item.id) {
            Some(existing) => {
                *existing = item;
                false
            }
            None => {
                products.insert(0, item);
                true
            }
        };
        self.save_products(&products)?;
        Ok(created)
    }

    pub fn remove_product(&self, id: &str) -> Result<bool> {
        let mut products = self.products()?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Ok(false);
        }
        self.save_products(&products)?;
        Ok(true)
    }

    pub fn cart(&self) -> Result<Cart> {
        Ok(load_json(self.store, CART_KEY)?.unwrap_or_default())
    }

    fn save_cart(&self, cart: &Cart) -> Result<()> {
        save_json(self.store, CART_KEY, cart)
    }

    pub fn add_to_cart(&self, id: &str, quantity: u32) -> Result<Cart> {
        let product = self.product(id)?;
        let mut cart = self.cart()?;
        cart.add(&product, quantity)?;
        self.save_cart(&cart)?;
        Ok(cart)
    }

    pub fn remove_from_cart(&self, id: &str) -> Result<bool> {
        let mut cart = self.cart()?;
        let removed = cart.remove(id);
        if removed {
            self.save_cart(&cart)?;
        }
        Ok(removed)
    }

    pub fn clear_cart(&self) -> Result<()> {
        self.store.remove(CART_KEY)
    }

    pub fn orders(&self) -> Result<Vec<Order>> {
        Ok(load_json(self.store, ORDERS_KEY)?.unwrap_or_else(sample_orders))
    }

    pub fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<Order> {
        let mut orders = self.orders()?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| anyhow!("Unknown order: {}", id))?;
        order.status = status;
        let updated = order.clone();
        save_json(self.store, ORDERS_KEY, &orders)?;
        Ok(updated)
    }

    /// Stored number, else the configured one.
    pub fn whatsapp_number(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(WA_NUMBER_KEY)?
            .or_else(|| self.config.whatsapp_number.clone()))
    }

    pub fn set_whatsapp_number(&self, number: &str) -> Result<()> {
        self.store.set(WA_NUMBER_KEY, number.trim())
    }

    /// Charges the cart total in the shopper's currency. A successful payment
    /// records a pending order, takes the units out of stock and empties the
    /// cart; a declined one leaves everything as it was.
    pub async fn checkout(
        &self,
        customer_name: &str,
        currency: &ResolvedCurrency,
        authorizer: &(dyn PaymentAuthorizer + Send + Sync),
        today: NaiveDate,
    ) -> Result<CheckoutResult> {
        let cart = self.cart()?;
        if cart.is_empty() {
            bail!("Cart is empty");
        }

        let mut products = self.products()?;
        for line in &cart.items {
            let product = products
                .iter()
                .find(|p| p.id == line.item_id)
                .with_context(|| format!("{} is no longer sold", line.name))?;
            if line.quantity > product.stock {
                bail!("Only {} of {} left in stock", product.stock, product.name);
            }
        }

        let request = PaymentRequest::new(cart.total(), currency, self.merchant_name());
        match authorizer.authorize(&request).await? {
            PaymentOutcome::Success => {}
            PaymentOutcome::Failure(reason) => {
                info!("Payment declined: {}", reason);
                return Ok(CheckoutResult::Declined { reason, request });
            }
        }

        for line in &cart.items {
            if let Some(product) = products.iter_mut().find(|p| p.id == line.item_id) {
                product.stock -= line.quantity;
            }
        }
        self.save_products(&products)?;

        let mut orders = self.orders()?;
        let order = Order {
            id: next_order_id(&orders),
            customer_name: customer_name.to_string(),
            items: cart.items.iter().map(|i| i.name.clone()).collect(),
            total: cart.total(),
            status: OrderStatus::Pending,
            date: today,
        };
        orders.insert(0, order.clone());
        save_json(self.store, ORDERS_KEY, &orders)?;
        self.clear_cart()?;

        info!("Order {} placed for {}", order.id, order.customer_name);
        Ok(CheckoutResult::Placed { order, request })
    }
}

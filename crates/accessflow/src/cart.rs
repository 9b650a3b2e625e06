// File: src/cart.rs
// Purpose: Shopping cart lines, totals and the order summary shown at checkout

use crate::catalog::Product;
use crate::config::PricingConfig;
use serde::{Deserialize, Serialize};

/// A product snapshot and how many of it the shopper wants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Subtotal, shipping, tax and grand total for a set of lines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderSummary {
    pub fn for_subtotal(subtotal: f64, pricing: &PricingConfig) -> Self {
        let shipping = if subtotal > pricing.free_shipping_threshold {
            0.0
        } else {
            pricing.flat_shipping
        };
        let tax = subtotal * pricing.tax_rate;
        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    pub fn free_shipping(&self) -> bool {
        self.shipping == 0.0
    }
}

/// Cart lines keyed by product id, in the order they were first added
///
/// Quantities are not checked against stock here; callers use
/// [`Cart::at_stock_limit`] to stop the shopper going over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of a product, merging into an existing line
    ///
    /// A merged quantity stops at `u32::MAX`.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.line_mut(product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity,
            }),
        }
        tracing::debug!(product_id = product.id, quantity, "added to cart");
    }

    pub fn add_one(&mut self, product: &Product) {
        self.add(product, 1);
    }

    /// Set a line's quantity; zero or less removes the line
    pub fn update_quantity(&mut self, product_id: u32, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
    }

    pub fn remove(&mut self, product_id: u32) {
        self.lines.retain(|line| line.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: u32) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: u32) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
    }

    /// Whether the line already holds all the stock there is
    pub fn at_stock_limit(&self, product_id: u32) -> bool {
        self.line(product_id)
            .is_some_and(|line| line.quantity >= line.product.stock)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of price × quantity
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Number of items, counting quantities
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn summary(&self, pricing: &PricingConfig) -> OrderSummary {
        OrderSummary::for_subtotal(self.total(), pricing)
    }
}

//! # Purchase Ledger
//!
//! Restocking events. A purchase either tops up an existing product
//! (overwriting its cost price with this invoice's unit cost) or creates a
//! new catalog entry on the fly.

use chrono::{Datelike, Utc};
use shopmaster_core::{
    ident, validation, LedgerError, LedgerResult, Money, Product, PurchaseRecord,
    AUTO_PRICE_MARKUP_BPS, DEFAULT_CATEGORY,
};
use tracing::info;

use crate::shop::Shop;

/// Fallback sale unit when a new product arrives without one.
const DEFAULT_UNIT: &str = "pcs";

/// What a purchase restocks.
#[derive(Debug, Clone)]
pub enum PurchaseTarget {
    /// Top up an existing product. `new_price` replaces the sale price only
    /// when explicitly supplied.
    Existing {
        product_id: String,
        new_price: Option<Money>,
    },
    /// Create a catalog entry for a product the shop has never stocked.
    New(NewProduct),
}

/// Creation data for a product first seen on a purchase invoice.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub unit: String,
    /// Explicit sale price; defaults to unit cost plus 20% when absent.
    pub price: Option<Money>,
}

impl Shop {
    /// Records a restocking purchase.
    ///
    /// `total_cost` is the full invoice amount for the whole quantity; the
    /// product's `cost_price` becomes `total_cost / quantity` (latest-cost
    /// overwrite, not a weighted average).
    ///
    /// ## Rejections
    /// - validation error on `quantity <= 0` or `total_cost <= 0`
    /// - validation error on an empty new-product name
    /// - [`LedgerError::ProductNotFound`] for an unknown existing target
    pub fn record_purchase(
        &mut self,
        target: PurchaseTarget,
        quantity: i64,
        total_cost: Money,
        source: Option<String>,
    ) -> LedgerResult<PurchaseRecord> {
        validation::validate_quantity(quantity)?;
        validation::validate_amount("total cost", total_cost)?;

        let unit_cost = total_cost.unit_cost(quantity);

        let (product_id, product_name, unit) = match target {
            PurchaseTarget::New(data) => {
                validation::validate_product_name(&data.name)?;
                let unit = if data.unit.trim().is_empty() {
                    DEFAULT_UNIT.to_string()
                } else {
                    data.unit
                };
                let product = Product {
                    id: ident::entity_id(),
                    sku: ident::generated_sku(),
                    name: data.name,
                    unit: unit.clone(),
                    price: data
                        .price
                        .unwrap_or_else(|| unit_cost.with_markup_bps(AUTO_PRICE_MARKUP_BPS)),
                    cost_price: unit_cost,
                    stock: quantity,
                    category: DEFAULT_CATEGORY.to_string(),
                    is_auto_created: self.pending_draft.is_some(),
                };
                let snapshot = (product.id.clone(), product.name.clone(), unit);
                self.inventory.push(product);
                snapshot
            }
            PurchaseTarget::Existing {
                product_id,
                new_price,
            } => {
                let product = self
                    .product_mut(&product_id)
                    .ok_or_else(|| LedgerError::ProductNotFound(product_id.clone()))?;
                product.stock += quantity;
                product.cost_price = unit_cost;
                if let Some(price) = new_price {
                    product.price = price;
                }
                (product.id.clone(), product.name.clone(), product.unit.clone())
            }
        };

        let now = Utc::now();
        let purchase = PurchaseRecord {
            id: ident::purchase_invoice(self.purchases.len(), now.year()),
            timestamp: now,
            product_id,
            product_name,
            quantity,
            unit,
            total_cost,
            source,
        };

        info!(
            invoice = %purchase.id,
            product = %purchase.product_name,
            quantity = purchase.quantity,
            cost = %purchase.total_cost,
            "Purchase recorded"
        );

        self.purchases.push(purchase.clone());
        self.pending_draft = None;
        Ok(purchase)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

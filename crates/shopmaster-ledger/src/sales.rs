//! # Sales Ledger
//!
//! Recording a sale is one atomic state transition: validate every line
//! against the catalog, append the `SaleRecord`, decrement stock, update the
//! customer's running spend, and discard any staged draft. On any rejection
//! the shop state is untouched.

use std::collections::HashMap;

use chrono::{Datelike, Utc};
use shopmaster_core::{
    ident, validation, Customer, LedgerError, LedgerResult, Money, SaleItem, SaleRecord,
    SaleStatus,
};
use tracing::info;

use crate::shop::Shop;

/// One requested sale line. `price` overrides the catalog price when the
/// operator negotiates at the counter; `None` sells at the listed price.
#[derive(Debug, Clone)]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: i64,
    pub price: Option<Money>,
}

impl Shop {
    /// Records a completed sale for a resolved customer.
    ///
    /// ## Rejections
    /// - [`LedgerError::EmptySale`] on an empty line list
    /// - validation error on non-positive quantities
    /// - [`LedgerError::ProductNotFound`] for unknown product ids
    /// - [`LedgerError::InsufficientStock`] when requested quantities
    ///   (summed per product across lines) exceed on-hand stock
    pub fn record_sale(
        &mut self,
        lines: Vec<SaleLine>,
        customer: Customer,
    ) -> LedgerResult<SaleRecord> {
        if lines.is_empty() {
            return Err(LedgerError::EmptySale);
        }

        // Validate everything before mutating anything.
        let mut requested: HashMap<String, i64> = HashMap::new();
        for line in &lines {
            validation::validate_quantity(line.quantity)?;
            *requested.entry(line.product_id.clone()).or_insert(0) += line.quantity;
        }
        for (product_id, qty) in &requested {
            let product = self
                .product(product_id)
                .ok_or_else(|| LedgerError::ProductNotFound(product_id.clone()))?;
            if !product.can_fulfil(*qty) {
                return Err(LedgerError::InsufficientStock {
                    product: product.name.clone(),
                    available: product.stock,
                    requested: *qty,
                });
            }
        }

        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            let product = self
                .product(&line.product_id)
                .ok_or_else(|| LedgerError::ProductNotFound(line.product_id.clone()))?;
            let price = line.price.unwrap_or(product.price);
            items.push(SaleItem {
                product_id: product.id.clone(),
                name: product.name.clone(),
                quantity: line.quantity,
                returned_quantity: 0,
                price,
                total: price.multiply_quantity(line.quantity),
                unit: product.unit.clone(),
            });
        }

        let total_amount: Money = items.iter().map(|i| i.total).sum();
        let now = Utc::now();

        let sale = SaleRecord {
            id: ident::sale_invoice(self.sales.len(), now.year()),
            timestamp: now,
            items,
            total_amount,
            status: SaleStatus::Completed,
            customer,
            cashier_id: self.operator.clone(),
        };

        // Apply side effects.
        for (product_id, qty) in &requested {
            if let Some(product) = self.product_mut(product_id) {
                product.stock -= qty;
            }
        }
        if let Some(registered) = self
            .customers
            .iter_mut()
            .find(|c| c.id == sale.customer.id)
        {
            registered.total_spent += total_amount;
        }

        info!(
            invoice = %sale.id,
            total = %sale.total_amount,
            items = sale.items.len(),
            customer = %sale.customer.id,
            "Sale recorded"
        );

        self.sales.push(sale.clone());
        self.pending_draft = None;
        Ok(sale)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

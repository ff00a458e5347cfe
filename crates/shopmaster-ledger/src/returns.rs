//! # Return Ledger
//!
//! Refund events against a recorded sale. Refunds are priced at the
//! original sale's unit prices, never at current catalog prices. The
//! remaining-returnable bound is enforced here at the ledger boundary, not
//! just by the frontend's quantity steppers.

use std::collections::HashMap;

use chrono::{Datelike, Utc};
use shopmaster_core::{
    ident, validation, LedgerError, LedgerResult, Money, ReturnRecord, SaleItem, SaleStatus,
    ValidationError,
};
use tracing::info;

use crate::shop::Shop;

/// One requested refund line.
#[derive(Debug, Clone)]
pub struct ReturnLine {
    pub product_id: String,
    pub quantity: i64,
}

impl Shop {
    /// Records a refund against `sale_id`.
    ///
    /// Applies three coupled mutations atomically from the caller's
    /// perspective: appends the `ReturnRecord`, bumps `returned_quantity`
    /// on the sale's line items (status becomes `PARTIAL_RETURN`), and puts
    /// the goods back into stock.
    ///
    /// ## Rejections
    /// - [`LedgerError::SaleNotFound`] for an unknown sale
    /// - validation error on an empty line list or non-positive quantity
    /// - [`LedgerError::ProductNotFound`] when a line names a product the
    ///   sale did not contain
    /// - [`LedgerError::ReturnExceedsRemaining`] when requested quantities
    ///   (summed per product) exceed a line's remaining returnable amount
    pub fn record_return(
        &mut self,
        sale_id: &str,
        customer_id: &str,
        lines: Vec<ReturnLine>,
    ) -> LedgerResult<ReturnRecord> {
        if lines.is_empty() {
            return Err(ValidationError::Required {
                field: "return items".to_string(),
            }
            .into());
        }

        let sale = self
            .sale(sale_id)
            .ok_or_else(|| LedgerError::SaleNotFound(sale_id.to_string()))?;

        let mut requested: HashMap<String, i64> = HashMap::new();
        for line in &lines {
            validation::validate_quantity(line.quantity)?;
            *requested.entry(line.product_id.clone()).or_insert(0) += line.quantity;
        }

        // Validate each requested product against the original sale lines
        // and freeze the refund items at the original unit prices. Items
        // follow the caller's first-occurrence order.
        let mut items = Vec::with_capacity(requested.len());
        for line in &lines {
            if items.iter().any(|i: &SaleItem| i.product_id == line.product_id) {
                continue;
            }
            let qty = requested[&line.product_id];
            let original = sale
                .items
                .iter()
                .find(|i| i.product_id == line.product_id)
                .ok_or_else(|| LedgerError::ProductNotFound(line.product_id.clone()))?;
            let remaining = original.remaining_returnable();
            if qty > remaining {
                return Err(LedgerError::ReturnExceedsRemaining {
                    product: original.name.clone(),
                    remaining,
                    requested: qty,
                });
            }
            items.push(SaleItem {
                product_id: original.product_id.clone(),
                name: original.name.clone(),
                quantity: qty,
                returned_quantity: 0,
                price: original.price,
                total: original.price.multiply_quantity(qty),
                unit: original.unit.clone(),
            });
        }

        let refund_amount: Money = items.iter().map(|i| i.total).sum();
        let now = Utc::now();

        let record = ReturnRecord {
            id: ident::return_invoice(self.returns.len(), now.year()),
            sale_id: sale_id.to_string(),
            customer_id: customer_id.to_string(),
            timestamp: now,
            items,
            refund_amount,
        };

        // Apply: bump the sale's returned counters and flag the record.
        if let Some(sale) = self.sales.iter_mut().find(|s| s.id == sale_id) {
            for item in sale.items.iter_mut() {
                if let Some(qty) = requested.get(&item.product_id) {
                    item.returned_quantity += qty;
                }
            }
            sale.status = SaleStatus::PartialReturn;
        }

        // Apply: restock. A product removed from the catalog since the sale
        // is skipped; the refund still stands.
        for (product_id, qty) in &requested {
            if let Some(product) = self.product_mut(product_id) {
                product.stock += qty;
            }
        }

        info!(
            invoice = %record.id,
            sale = %record.sale_id,
            refund = %record.refund_amount,
            "Return recorded"
        );

        self.returns.push(record.clone());
        self.pending_draft = None;
        Ok(record)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

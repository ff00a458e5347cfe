//! # Domain Types
//!
//! Record types for the ShopMaster ledger engine.
//!
//! ## Dual-Key Identity Pattern
//! Entities carry two identifiers:
//! - `id`: UUID v4 or a timestamp-derived key, immutable, used for references
//! - Display id: human-readable invoice/customer number (see [`crate::ident`])
//!
//! ## Serialization
//! Every type serializes camelCase and exports a TypeScript binding; the web
//! frontend consumes these shapes verbatim.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the shop inventory.
///
/// Mutated by three ledger operations only: sale (stock down), purchase
/// (stock up, cost price overwritten with the latest unit cost), return
/// (stock up).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - display identifier.
    pub sku: String,

    /// Display name shown on the catalog and receipts.
    pub name: String,

    /// Sale unit ("kg", "pcs", "litre", ...).
    pub unit: String,

    /// Current unit sale price.
    pub price: Money,

    /// Last-known unit acquisition cost (overwritten by each purchase).
    pub cost_price: Money,

    /// On-hand quantity in `unit`.
    pub stock: i64,

    /// Catalog category.
    pub category: String,

    /// Whether the product was created from a staged AI draft rather than
    /// manual entry.
    #[serde(default)]
    pub is_auto_created: bool,
}

impl Product {
    /// Checks whether on-hand stock covers a requested sale quantity.
    #[inline]
    pub fn can_fulfil(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer profile.
///
/// Identity dedup key is `phone`: a non-empty phone is unique in the
/// registry. Immutable after creation except for `total_spent`, which the
/// sales ledger maintains.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Display id (`CUST-001001`).
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Gross lifetime spend, accumulated by each completed sale.
    pub total_spent: Money,
}

// =============================================================================
// Sale
// =============================================================================

/// A line item inside a sale.
///
/// `price` and `total` are frozen at sale time; partial returns track
/// `returned_quantity` separately and never recompute `total`.
///
/// Invariant: `0 <= returned_quantity <= quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub name: String,
    pub quantity: i64,
    /// Quantity refunded so far across all returns against this sale.
    pub returned_quantity: i64,
    /// Unit price at time of sale (frozen).
    pub price: Money,
    /// Line total at creation (`price * quantity`, frozen).
    pub total: Money,
    /// Sale unit at time of sale (frozen).
    pub unit: String,
}

impl SaleItem {
    /// Builds a line item from a product snapshot and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        SaleItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
            returned_quantity: 0,
            price: product.price,
            total: product.price.multiply_quantity(quantity),
            unit: product.unit.clone(),
        }
    }

    /// Quantity still eligible for return.
    #[inline]
    pub fn remaining_returnable(&self) -> i64 {
        self.quantity - self.returned_quantity
    }
}

/// The status of a completed sale with respect to returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleStatus {
    /// Sold, nothing returned.
    Completed,
    /// At least one return has been applied against the sale.
    PartialReturn,
    /// Reserved for a confirmed full-refund rule; never set automatically.
    Returned,
}

/// A completed sale. Append-only ledger entry; only the per-item
/// `returned_quantity` counters and `status` mutate afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    /// Display invoice id (`SALE-2026-00001`).
    pub id: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub items: Vec<SaleItem>,
    /// Sum of line totals at creation, immutable.
    pub total_amount: Money,
    pub status: SaleStatus,
    /// Customer snapshot at sale time.
    pub customer: Customer,
    /// Operator label of whoever rang the sale.
    pub cashier_id: String,
}

// =============================================================================
// Purchase
// =============================================================================

/// A restocking event. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    /// Display invoice id (`PUR-2026-00001`).
    pub id: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub product_id: String,
    /// Product name at purchase time (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// Unit at purchase time (frozen).
    pub unit: String,
    /// Full invoice amount for the whole quantity.
    pub total_cost: Money,
    /// Supplier or shop the stock came from.
    pub source: Option<String>,
}

// =============================================================================
// Return
// =============================================================================

/// A refund event. Immutable once created; references the originating sale
/// and customer by id only.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRecord {
    /// Display invoice id (`RET-2026-00001`).
    pub id: String,
    pub sale_id: String,
    pub customer_id: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    /// Returned lines, priced at the original sale's unit prices.
    pub items: Vec<SaleItem>,
    /// Sum of returned line totals.
    pub refund_amount: Money,
}

// =============================================================================
// Cash Session
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Open,
    Closed,
}

/// An accounting period anchored by an opening-cash float.
///
/// At most one session is open per shop at a time. The live cash balance is
/// derived from the ledgers on demand, never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CashSession {
    /// Display id (`SESS-<millis>`).
    pub id: String,
    #[ts(as = "String")]
    pub start_time: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub end_time: Option<DateTime<Utc>>,
    pub opening_cash: Money,
    pub closing_cash: Option<Money>,
    pub status: SessionStatus,
}

// =============================================================================
// Client (admin tenant record)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    Overdue,
}

/// One rent payment in a client's billing history. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillingEntry {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub amount: Money,
    pub status: PaymentStatus,
    /// Display id (`INV-PAY-<millis>`).
    pub invoice_id: String,
}

/// Per-tenant rent billing state.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClientBilling {
    pub rent_amount: Money,
    #[ts(as = "String")]
    pub billing_date: NaiveDate,
    #[ts(as = "String")]
    pub due_date: NaiveDate,
    pub payment_status: PaymentStatus,
    /// Append-only payment history.
    pub history: Vec<BillingEntry>,
}

/// An independently billed client shop managed by the admin.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Display id (`CLIENT-<millis>`).
    pub id: String,
    pub owner_name: String,
    pub shop_name: String,
    pub shop_serial_number: String,
    pub market_name: String,
    pub phone: String,
    pub password: Option<String>,
    pub division: String,
    pub district: String,
    pub thana: String,
    pub billing: ClientBilling,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// AI Draft (interpreter wire shape)
// =============================================================================

/// Transaction kind extracted from a natural-language command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftIntent {
    Sale,
    Purchase,
    Return,
    OpeningCash,
}

/// The loosely-typed draft produced by the external interpreter.
///
/// This is a wire shape: numeric fields arrive as JSON numbers in taka and
/// are converted to [`Money`] / whole units at the draft-adapter boundary.
/// Transient by design; it is staged for human confirmation and discarded
/// on commit or cancel, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AiDraft {
    pub intent: DraftIntent,
    pub product_name: Option<String>,
    pub product_id: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    /// Unit price (sale) or unit cost (purchase), in taka.
    pub price: Option<f64>,
    /// Total transaction value, in taka.
    pub total_amount: Option<f64>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    /// Supplier name for purchases.
    pub source: Option<String>,
    /// Human-readable summary of what was extracted.
    pub summary: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

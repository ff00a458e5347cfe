//! # Shop State Aggregate
//!
//! One `Shop` owns every session-scoped collection: inventory, customers,
//! and the three append-only ledgers, plus the cash session and any staged
//! draft. All mutation goes through the operation methods defined in the
//! sibling modules (`sales`, `purchases`, `returns`, `customers`, `cash`,
//! `draft`); there is no ambient or static state anywhere in the engine.

use shopmaster_core::{
    CashSession, Customer, Money, Product, PurchaseRecord, ReturnRecord, SaleRecord,
};

use crate::draft::Draft;

/// The in-memory state of one client shop for the current login session.
#[derive(Debug, Clone, Default)]
pub struct Shop {
    /// Operator label stamped on sales as `cashier_id`.
    pub operator: String,
    pub inventory: Vec<Product>,
    pub customers: Vec<Customer>,
    /// Append-only sales ledger. Line-item `returned_quantity` counters and
    /// record `status` are the only fields that mutate after append.
    pub sales: Vec<SaleRecord>,
    /// Append-only restocking ledger.
    pub purchases: Vec<PurchaseRecord>,
    /// Append-only refund ledger.
    pub returns: Vec<ReturnRecord>,
    pub cash_session: Option<CashSession>,
    /// Staged, unconfirmed transaction from the AI interpreter. Cleared by
    /// every committed ledger operation and by explicit cancel.
    pub pending_draft: Option<Draft>,
}

impl Shop {
    /// Creates an empty shop state for the given operator.
    pub fn new(operator: impl Into<String>) -> Self {
        Shop {
            operator: operator.into(),
            ..Shop::default()
        }
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.inventory.iter().find(|p| p.id == id)
    }

    pub(crate) fn product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.inventory.iter_mut().find(|p| p.id == id)
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn sale(&self, id: &str) -> Option<&SaleRecord> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// Removes a product from the catalog (explicit manual removal; no
    /// ledger entry is written and historic records keep their snapshots).
    pub fn remove_product(&mut self, id: &str) -> bool {
        let before = self.inventory.len();
        self.inventory.retain(|p| p.id != id);
        self.inventory.len() != before
    }

    // =========================================================================
    // Derived values (recomputed on demand, never cached)
    // =========================================================================

    /// Sum of all sale totals.
    pub fn total_sales_amount(&self) -> Money {
        self.sales.iter().map(|s| s.total_amount).sum()
    }

    /// Sum of all purchase invoice costs.
    pub fn total_purchase_cost(&self) -> Money {
        self.purchases.iter().map(|p| p.total_cost).sum()
    }

    /// Sum of all refunds.
    pub fn total_returns_amount(&self) -> Money {
        self.returns.iter().map(|r| r.refund_amount).sum()
    }

    /// Opening float of the current session, zero when none was opened.
    pub fn opening_cash(&self) -> Money {
        self.cash_session
            .as_ref()
            .map_or(Money::zero(), |s| s.opening_cash)
    }

    /// Live cash balance:
    /// `openingCash + sales - purchases - returns`.
    pub fn cash_balance(&self) -> Money {
        self.opening_cash() + self.total_sales_amount()
            - self.total_purchase_cost()
            - self.total_returns_amount()
    }

    /// Retail valuation of on-hand stock (`sum of stock * price`).
    pub fn inventory_valuation(&self) -> Money {
        self.inventory
            .iter()
            .map(|p| p.price.multiply_quantity(p.stock))
            .sum()
    }

    /// Recomputes a customer's gross spend from the sales ledger. Must agree
    /// with the stored `total_spent` the sales operation maintains.
    pub fn customer_total_spent(&self, customer_id: &str) -> Money {
        self.sales
            .iter()
            .filter(|s| s.customer.id == customer_id)
            .map(|s| s.total_amount)
            .sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # shopmaster-ledger: Transactional Ledger Engine
//!
//! The invariant-preserving core of ShopMaster. Everything lives in memory
//! inside an explicit [`Shop`] aggregate (client side) or
//! [`ClientDirectory`] (admin side); each operation is a synchronous,
//! atomic state transition that either applies fully or rejects with a
//! typed error leaving state untouched.
//!
//! ## Operations
//!
//! - [`Shop::register_or_find_customer`] - phone-deduped registration
//! - [`Shop::record_sale`] - sale + stock decrement + customer spend
//! - [`Shop::record_purchase`] - restock or create product, cost overwrite
//! - [`Shop::record_return`] - refund at original prices, restock
//! - [`Shop::open_session`] / [`Shop::close_session`] - cash period
//! - [`Shop::stage_draft`] / [`Shop::cancel_draft`] - AI draft staging
//! - [`ClientDirectory::record_payment`] - tenant rent sub-ledger
//!
//! Derived values (`cash_balance`, `inventory_valuation`, ledger totals)
//! are recomputed from the ledgers on every read and never cached.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod cash;
pub mod customers;
pub mod draft;
pub mod purchases;
pub mod returns;
pub mod sales;
pub mod shop;
pub mod state;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use billing::{ClientDirectory, NewClient, PaymentReceipt};
pub use customers::NewCustomer;
pub use draft::{CustomerMatch, Draft, ProductMatch, Screen};
pub use purchases::{NewProduct, PurchaseTarget};
pub use returns::ReturnLine;
pub use sales::SaleLine;
pub use shop::Shop;
pub use state::{DirectoryState, ShopState};

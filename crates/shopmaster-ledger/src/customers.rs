//! # Customer Registry
//!
//! Phone-keyed dedup registry. A non-empty phone that matches an existing
//! customer returns that record unchanged; registration never fails.

use chrono::Utc;
use shopmaster_core::{ident, Customer, Money, ANONYMOUS_CUSTOMER_NAME};
use tracing::debug;

use crate::shop::Shop;

/// Partial customer data captured at the point of sale.
#[derive(Debug, Clone, Default)]
pub struct NewCustomer {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl Shop {
    /// Returns the existing customer matching `data.phone` exactly, or
    /// registers a new one.
    ///
    /// Strict dedup, not merge: when the phone matches, the stored record is
    /// returned as-is even if other fields differ. A missing name defaults
    /// to `"Anonymous"`.
    pub fn register_or_find_customer(&mut self, data: NewCustomer) -> Customer {
        if let Some(phone) = data.phone.as_deref().filter(|p| !p.is_empty()) {
            if let Some(existing) = self.customers.iter().find(|c| c.phone == phone) {
                return existing.clone();
            }
        }

        let customer = Customer {
            id: ident::customer_id(self.customers.len()),
            name: data
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| ANONYMOUS_CUSTOMER_NAME.to_string()),
            phone: data.phone.unwrap_or_default(),
            email: data.email.unwrap_or_default(),
            address: data.address.unwrap_or_default(),
            created_at: Utc::now(),
            total_spent: Money::zero(),
        };

        debug!(customer = %customer.id, name = %customer.name, "Customer registered");
        self.customers.push(customer.clone());
        customer
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

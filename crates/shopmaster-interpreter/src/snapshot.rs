//! # Context Snapshots
//!
//! Minimal projections of the live inventory and customer registry that are
//! serialized into the interpretation prompt so the service can resolve
//! names to known ids.

use serde::{Deserialize, Serialize};
use shopmaster_core::{Customer, Product};

/// What the interpreter gets to know about a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub id: String,
    pub name: String,
    pub unit: String,
}

impl From<&Product> for ProductRef {
    fn from(product: &Product) -> Self {
        ProductRef {
            id: product.id.clone(),
            name: product.name.clone(),
            unit: product.unit.clone(),
        }
    }
}

/// What the interpreter gets to know about a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRef {
    pub id: String,
    pub name: String,
    pub phone: String,
}

impl From<&Customer> for CustomerRef {
    fn from(customer: &Customer) -> Self {
        CustomerRef {
            id: customer.id.clone(),
            name: customer.name.clone(),
            phone: customer.phone.clone(),
        }
    }
}

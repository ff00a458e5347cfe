//! # Shared State Wrappers
//!
//! Host layers (a web command handler, a desktop IPC bridge) may run
//! handlers concurrently even though the engine itself is single-operator.
//! These wrappers serialize all access behind a mutex: one mutation at a
//! time, reads take the same lock briefly.

use std::sync::{Arc, Mutex};

use crate::billing::ClientDirectory;
use crate::shop::Shop;

/// Host-managed shop state.
#[derive(Debug)]
pub struct ShopState {
    shop: Arc<Mutex<Shop>>,
}

impl ShopState {
    /// Creates a fresh shop state for the given operator.
    pub fn new(operator: impl Into<String>) -> Self {
        ShopState {
            shop: Arc::new(Mutex::new(Shop::new(operator))),
        }
    }

    /// Executes a closure with read access to the shop.
    ///
    /// ```rust,ignore
    /// let balance = shop_state.with_shop(|shop| shop.cash_balance());
    /// ```
    pub fn with_shop<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Shop) -> R,
    {
        let shop = self.shop.lock().expect("Shop mutex poisoned");
        f(&shop)
    }

    /// Executes a closure with write access to the shop.
    ///
    /// ```rust,ignore
    /// shop_state.with_shop_mut(|shop| shop.record_sale(lines, customer))?;
    /// ```
    pub fn with_shop_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Shop) -> R,
    {
        let mut shop = self.shop.lock().expect("Shop mutex poisoned");
        f(&mut shop)
    }
}

/// Host-managed admin client directory.
#[derive(Debug, Default)]
pub struct DirectoryState {
    directory: Arc<Mutex<ClientDirectory>>,
}

impl DirectoryState {
    pub fn new() -> Self {
        DirectoryState::default()
    }

    pub fn with_directory<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ClientDirectory) -> R,
    {
        let directory = self.directory.lock().expect("Directory mutex poisoned");
        f(&directory)
    }

    pub fn with_directory_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ClientDirectory) -> R,
    {
        let mut directory = self.directory.lock().expect("Directory mutex poisoned");
        f(&mut directory)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customers::NewCustomer;
    use shopmaster_core::Money;

    #[test]
    fn test_with_shop_mut_applies_mutations() {
        let state = ShopState::new("Karim");

        state.with_shop_mut(|shop| {
            shop.open_session(Money::from_taka(1000)).map(|_| ())
        })
        .unwrap();
        state.with_shop_mut(|shop| {
            shop.register_or_find_customer(NewCustomer::default());
        });

        let (balance, customers) =
            state.with_shop(|shop| (shop.cash_balance(), shop.customers.len()));
        assert_eq!(balance, Money::from_taka(1000));
        assert_eq!(customers, 1);
    }

    #[test]
    fn test_directory_state_round_trip() {
        let state = DirectoryState::new();
        let count = state.with_directory(|d| d.clients.len());
        assert_eq!(count, 0);
    }
}

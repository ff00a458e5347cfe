//! # Identifier Generation
//!
//! Human-readable display identifiers for invoices, customers, and sessions.
//!
//! Sequence-derived ids are pure functions of the owning collection's
//! current size (plus the current year for time-scoped invoices), so they
//! are monotonic within a session. They are NOT safe under concurrent
//! writers; the engine assumes a single operator per shop state (a
//! multi-writer deployment would need collision-resistant ids here).

use rand::Rng;
use uuid::Uuid;

/// Customer display id: `CUST-001001`, `CUST-001002`, ...
///
/// The visible sequence starts at 1001.
pub fn customer_id(count: usize) -> String {
    format!("CUST-{:06}", 1000 + count + 1)
}

/// Sale invoice: `SALE-2026-00001`.
///
/// The year is a label only; the sequence does not reset with it.
pub fn sale_invoice(count: usize, year: i32) -> String {
    format!("SALE-{}-{:05}", year, count + 1)
}

/// Purchase invoice: `PUR-2026-00001`.
pub fn purchase_invoice(count: usize, year: i32) -> String {
    format!("PUR-{}-{:05}", year, count + 1)
}

/// Return invoice: `RET-2026-00001`.
pub fn return_invoice(count: usize, year: i32) -> String {
    format!("RET-{}-{:05}", year, count + 1)
}

/// Rent payment invoice: `INV-PAY-<millis>`.
pub fn payment_invoice(timestamp_millis: i64) -> String {
    format!("INV-PAY-{}", timestamp_millis)
}

/// Cash session id: `SESS-<millis>`.
pub fn session_id(timestamp_millis: i64) -> String {
    format!("SESS-{}", timestamp_millis)
}

/// Client tenant id: `CLIENT-<millis>`.
pub fn client_id(timestamp_millis: i64) -> String {
    format!("CLIENT-{}", timestamp_millis)
}

/// Entity primary key (products): UUID v4.
pub fn entity_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generated SKU for products auto-created by a purchase: `SKU-` plus four
/// random digits.
pub fn generated_sku() -> String {
    format!("SKU-{:04}", rand::thread_rng().gen_range(0..10_000))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_id_sequence() {
        assert_eq!(customer_id(0), "CUST-001001");
        assert_eq!(customer_id(1), "CUST-001002");
        assert_eq!(customer_id(41), "CUST-001042");
    }

    #[test]
    fn test_invoice_formats() {
        assert_eq!(sale_invoice(0, 2026), "SALE-2026-00001");
        assert_eq!(purchase_invoice(9, 2026), "PUR-2026-00010");
        assert_eq!(return_invoice(99, 2025), "RET-2025-00100");
    }

    #[test]
    fn test_invoice_monotonic_within_session() {
        let a = sale_invoice(7, 2026);
        let b = sale_invoice(8, 2026);
        assert!(b > a);
    }

    #[test]
    fn test_timestamp_ids() {
        assert_eq!(payment_invoice(1700000000000), "INV-PAY-1700000000000");
        assert_eq!(session_id(1700000000000), "SESS-1700000000000");
        assert_eq!(client_id(1700000000000), "CLIENT-1700000000000");
    }

    #[test]
    fn test_generated_sku_shape() {
        for _ in 0..32 {
            let sku = generated_sku();
            assert_eq!(sku.len(), 8);
            assert!(sku.starts_with("SKU-"));
            assert!(sku[4..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_entity_id_unique() {
        assert_ne!(entity_id(), entity_id());
    }
}

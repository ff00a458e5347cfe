//! # Draft Adapter
//!
//! Bridges the external AI interpreter and the ledger screens. An incoming
//! [`AiDraft`] is validated and resolved against the live inventory and
//! customer registry, then staged as a typed [`Draft`] for the operator to
//! confirm. The adapter never commits anything: committing is the normal
//! ledger operation with the pre-filled values as ordinary input, and every
//! committed operation discards the staged draft.

use serde::{Deserialize, Serialize};
use shopmaster_core::{AiDraft, Customer, DraftIntent, LedgerResult, Money, Product, ValidationError};
use tracing::debug;
use ts_rs::TS;

use crate::shop::Shop;

// =============================================================================
// Routing
// =============================================================================

/// The ledger screen a staged draft routes the operator to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Pos,
    Purchases,
    Returns,
    Dashboard,
}

// =============================================================================
// Resolved references
// =============================================================================

/// Inventory match resolved from a draft's product reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductMatch {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub price: Money,
}

impl From<&Product> for ProductMatch {
    fn from(product: &Product) -> Self {
        ProductMatch {
            id: product.id.clone(),
            name: product.name.clone(),
            unit: product.unit.clone(),
            price: product.price,
        }
    }
}

/// Registry match resolved from a draft's customer reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMatch {
    pub id: String,
    pub name: String,
    pub phone: String,
}

impl From<&Customer> for CustomerMatch {
    fn from(customer: &Customer) -> Self {
        CustomerMatch {
            id: customer.id.clone(),
            name: customer.name.clone(),
            phone: customer.phone.clone(),
        }
    }
}

// =============================================================================
// Typed draft
// =============================================================================

/// A staged, unconfirmed transaction keyed by intent. Each variant carries
/// only the fields its target screen can pre-fill; amounts are already
/// converted from the wire's taka floats to [`Money`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "intent", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Draft {
    #[serde(rename_all = "camelCase")]
    Sale {
        product: Option<ProductMatch>,
        /// Unresolved name, kept for the operator to act on.
        product_name: Option<String>,
        quantity: Option<i64>,
        price: Option<Money>,
        customer: Option<CustomerMatch>,
        customer_name: Option<String>,
        summary: String,
    },
    #[serde(rename_all = "camelCase")]
    Purchase {
        product: Option<ProductMatch>,
        product_name: Option<String>,
        quantity: Option<i64>,
        unit: Option<String>,
        total_cost: Option<Money>,
        source: Option<String>,
        summary: String,
    },
    #[serde(rename_all = "camelCase")]
    Return {
        customer: Option<CustomerMatch>,
        customer_name: Option<String>,
        summary: String,
    },
    #[serde(rename_all = "camelCase")]
    OpeningCash {
        amount: Option<Money>,
        summary: String,
    },
}

impl Draft {
    /// The screen this draft routes to.
    pub fn screen(&self) -> Screen {
        match self {
            Draft::Sale { .. } => Screen::Pos,
            Draft::Purchase { .. } => Screen::Purchases,
            Draft::Return { .. } => Screen::Returns,
            Draft::OpeningCash { .. } => Screen::Dashboard,
        }
    }

    pub fn summary(&self) -> &str {
        match self {
            Draft::Sale { summary, .. }
            | Draft::Purchase { summary, .. }
            | Draft::Return { summary, .. }
            | Draft::OpeningCash { summary, .. } => summary,
        }
    }
}

// =============================================================================
// Wire conversions
// =============================================================================

/// Converts a wire amount in taka to poisha, rounding to the nearest.
fn taka_to_money(value: f64) -> Money {
    Money::from_poisha((value * 100.0).round() as i64)
}

/// Rounds a wire quantity to whole sale units.
fn whole_units(value: f64) -> i64 {
    value.round() as i64
}

fn positive_quantity(value: f64) -> Result<i64, ValidationError> {
    let qty = whole_units(value);
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(qty)
}

fn positive_amount(field: &str, value: f64) -> Result<Money, ValidationError> {
    let amount = taka_to_money(value);
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(amount)
}

// =============================================================================
// Resolution
// =============================================================================

/// Exact id match first, then case-insensitive substring match on name.
fn resolve_product<'a>(
    inventory: &'a [Product],
    id: Option<&str>,
    name: Option<&str>,
) -> Option<&'a Product> {
    if let Some(id) = id {
        if let Some(product) = inventory.iter().find(|p| p.id == id) {
            return Some(product);
        }
    }
    let query = name?.to_lowercase();
    inventory
        .iter()
        .find(|p| p.name.to_lowercase().contains(&query))
}

fn resolve_customer<'a>(
    customers: &'a [Customer],
    id: Option<&str>,
    name: Option<&str>,
) -> Option<&'a Customer> {
    if let Some(id) = id {
        if let Some(customer) = customers.iter().find(|c| c.id == id) {
            return Some(customer);
        }
    }
    let query = name?.to_lowercase();
    customers
        .iter()
        .find(|c| c.name.to_lowercase().contains(&query))
}

// =============================================================================
// Staging
// =============================================================================

impl Shop {
    /// Validates an interpreter draft, resolves its references, stages it,
    /// and returns the screen to route the operator to.
    ///
    /// On a validation rejection nothing is staged and any previously
    /// staged draft is kept.
    pub fn stage_draft(&mut self, draft: AiDraft) -> LedgerResult<Screen> {
        let product = resolve_product(
            &self.inventory,
            draft.product_id.as_deref(),
            draft.product_name.as_deref(),
        )
        .map(ProductMatch::from);
        let customer = resolve_customer(
            &self.customers,
            draft.customer_id.as_deref(),
            draft.customer_name.as_deref(),
        )
        .map(CustomerMatch::from);

        let quantity = draft.quantity.map(positive_quantity).transpose()?;

        let typed = match draft.intent {
            DraftIntent::Sale => Draft::Sale {
                product,
                product_name: draft.product_name,
                quantity,
                price: draft
                    .price
                    .map(|p| positive_amount("price", p))
                    .transpose()?,
                customer,
                customer_name: draft.customer_name,
                summary: draft.summary,
            },
            DraftIntent::Purchase => {
                // The interpreter reports either the invoice total or a unit
                // cost; fall back to cost x quantity when only the unit cost
                // arrived.
                let total_cost = match (draft.total_amount, draft.price, quantity) {
                    (Some(total), _, _) => Some(positive_amount("total cost", total)?),
                    (None, Some(unit_cost), Some(qty)) => {
                        Some(positive_amount("total cost", unit_cost * qty as f64)?)
                    }
                    _ => None,
                };
                Draft::Purchase {
                    product,
                    product_name: draft.product_name,
                    quantity,
                    unit: draft.unit,
                    total_cost,
                    source: draft.source,
                    summary: draft.summary,
                }
            }
            DraftIntent::Return => Draft::Return {
                customer,
                customer_name: draft.customer_name,
                summary: draft.summary,
            },
            DraftIntent::OpeningCash => {
                let amount = draft
                    .total_amount
                    .or(draft.price)
                    .map(|a| positive_amount("opening cash", a))
                    .transpose()?;
                Draft::OpeningCash {
                    amount,
                    summary: draft.summary,
                }
            }
        };

        let screen = typed.screen();
        debug!(screen = ?screen, summary = %typed.summary(), "Draft staged");
        self.pending_draft = Some(typed);
        Ok(screen)
    }

    /// Discards the staged draft without committing anything.
    pub fn cancel_draft(&mut self) {
        self.pending_draft = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customers::NewCustomer;
    use crate::purchases::{NewProduct, PurchaseTarget};
    use crate::sales::SaleLine;

    fn wire_draft(intent: DraftIntent) -> AiDraft {
        AiDraft {
            intent,
            product_name: None,
            product_id: None,
            quantity: None,
            unit: None,
            price: None,
            total_amount: None,
            customer_id: None,
            customer_name: None,
            source: None,
            summary: "test".to_string(),
        }
    }

    fn shop_with_catalog() -> Shop {
        let mut shop = Shop::new("Karim");
        shop.record_purchase(
            PurchaseTarget::New(NewProduct {
                name: "Miniket Rice".to_string(),
                unit: "kg".to_string(),
                price: Some(Money::from_taka(50)),
            }),
            10,
            Money::from_taka(400),
            None,
        )
        .unwrap();
        shop.register_or_find_customer(NewCustomer {
            name: Some("Rahim Uddin".to_string()),
            phone: Some("01712-345678".to_string()),
            ..NewCustomer::default()
        });
        shop
    }

    #[test]
    fn test_sale_draft_resolves_by_substring() {
        let mut shop = shop_with_catalog();
        let mut draft = wire_draft(DraftIntent::Sale);
        draft.product_name = Some("rice".to_string());
        draft.quantity = Some(3.0);
        draft.customer_name = Some("rahim".to_string());

        let screen = shop.stage_draft(draft).unwrap();
        assert_eq!(screen, Screen::Pos);

        match shop.pending_draft.as_ref().unwrap() {
            Draft::Sale {
                product,
                quantity,
                customer,
                ..
            } => {
                assert_eq!(product.as_ref().unwrap().name, "Miniket Rice");
                assert_eq!(*quantity, Some(3));
                assert_eq!(customer.as_ref().unwrap().name, "Rahim Uddin");
            }
            other => panic!("expected sale draft, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_id_match_wins_over_name() {
        let mut shop = shop_with_catalog();
        let product_id = shop.inventory[0].id.clone();

        let mut draft = wire_draft(DraftIntent::Sale);
        draft.product_id = Some(product_id.clone());
        draft.product_name = Some("something else".to_string());

        shop.stage_draft(draft).unwrap();
        match shop.pending_draft.as_ref().unwrap() {
            Draft::Sale { product, .. } => {
                assert_eq!(product.as_ref().unwrap().id, product_id);
            }
            other => panic!("expected sale draft, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_product_keeps_name() {
        let mut shop = shop_with_catalog();
        let mut draft = wire_draft(DraftIntent::Purchase);
        draft.product_name = Some("Brown Sugar".to_string());
        draft.quantity = Some(5.0);
        draft.price = Some(90.0);
        draft.source = Some("City Wholesale".to_string());

        let screen = shop.stage_draft(draft).unwrap();
        assert_eq!(screen, Screen::Purchases);

        match shop.pending_draft.as_ref().unwrap() {
            Draft::Purchase {
                product,
                product_name,
                total_cost,
                ..
            } => {
                assert!(product.is_none());
                assert_eq!(product_name.as_deref(), Some("Brown Sugar"));
                // Unit cost x quantity fallback: 90 x 5 = 450.
                assert_eq!(*total_cost, Some(Money::from_taka(450)));
            }
            other => panic!("expected purchase draft, got {:?}", other),
        }
    }

    #[test]
    fn test_opening_cash_routes_to_dashboard() {
        let mut shop = shop_with_catalog();
        let mut draft = wire_draft(DraftIntent::OpeningCash);
        draft.total_amount = Some(1000.0);

        let screen = shop.stage_draft(draft).unwrap();
        assert_eq!(screen, Screen::Dashboard);
        assert_eq!(
            shop.pending_draft,
            Some(Draft::OpeningCash {
                amount: Some(Money::from_taka(1000)),
                summary: "test".to_string(),
            })
        );
    }

    #[test]
    fn test_return_routes_to_returns() {
        let mut shop = shop_with_catalog();
        let mut draft = wire_draft(DraftIntent::Return);
        draft.customer_name = Some("rahim".to_string());

        let screen = shop.stage_draft(draft).unwrap();
        assert_eq!(screen, Screen::Returns);
    }

    #[test]
    fn test_invalid_quantity_rejected() {
        let mut shop = shop_with_catalog();
        let mut draft = wire_draft(DraftIntent::Sale);
        draft.quantity = Some(0.0);
        assert!(shop.stage_draft(draft).is_err());
        assert!(shop.pending_draft.is_none());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut shop = shop_with_catalog();
        shop.stage_draft(wire_draft(DraftIntent::Sale)).unwrap();
        assert!(shop.pending_draft.is_some());

        shop.cancel_draft();
        assert!(shop.pending_draft.is_none());
    }

    #[test]
    fn test_commit_clears_draft() {
        let mut shop = shop_with_catalog();
        let product_id = shop.inventory[0].id.clone();
        let customer = shop.customers[0].clone();

        shop.stage_draft(wire_draft(DraftIntent::Sale)).unwrap();
        shop.record_sale(
            vec![SaleLine {
                product_id,
                quantity: 1,
                price: None,
            }],
            customer,
        )
        .unwrap();
        assert!(shop.pending_draft.is_none());
    }

    #[test]
    fn test_purchase_committed_from_draft_flags_auto_created() {
        let mut shop = shop_with_catalog();
        let mut draft = wire_draft(DraftIntent::Purchase);
        draft.product_name = Some("Brown Sugar".to_string());
        shop.stage_draft(draft).unwrap();

        let purchase = shop
            .record_purchase(
                PurchaseTarget::New(NewProduct {
                    name: "Brown Sugar".to_string(),
                    unit: "kg".to_string(),
                    price: None,
                }),
                5,
                Money::from_taka(450),
                Some("City Wholesale".to_string()),
            )
            .unwrap();

        assert!(shop.product(&purchase.product_id).unwrap().is_auto_created);
        assert!(shop.pending_draft.is_none());
    }

    #[test]
    fn test_draft_wire_tag_matches_intent() {
        let draft = Draft::OpeningCash {
            amount: Some(Money::from_taka(500)),
            summary: "open with 500".to_string(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["intent"], "OPENING_CASH");
    }
}

//! # Client Directory & Billing Sub-Ledger
//!
//! Admin-side tenant records. Each client shop carries an independent rent
//! billing state with an append-only payment history; there is no void or
//! reversal operation.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shopmaster_core::{
    ident, validation, BillingEntry, Client, ClientBilling, LedgerError, LedgerResult, Money,
    PaymentStatus,
};
use tracing::info;
use ts_rs::TS;

/// Days between the billing date and the payment due date for a new client.
const DUE_DAYS: i64 = 7;

/// Registration data for a new client shop.
#[derive(Debug, Clone, Default)]
pub struct NewClient {
    pub owner_name: String,
    pub shop_name: String,
    pub shop_serial_number: String,
    pub market_name: String,
    pub phone: String,
    pub password: String,
    pub division: String,
    pub district: String,
    pub thana: String,
    pub rent_amount: Money,
}

/// Read projection handed to the UI after a rent payment; not ledger state.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    /// Client snapshot after the payment was applied.
    pub client: Client,
    pub amount: Money,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub invoice_id: String,
}

/// The admin's registry of billed client shops.
#[derive(Debug, Clone, Default)]
pub struct ClientDirectory {
    pub clients: Vec<Client>,
}

impl ClientDirectory {
    pub fn new() -> Self {
        ClientDirectory::default()
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Registers a new client shop with a fresh billing state.
    ///
    /// ## Rejections
    /// Validation errors on missing phone/password/shop name, a malformed
    /// phone, or a non-positive rent amount.
    pub fn create_client(&mut self, data: NewClient) -> LedgerResult<Client> {
        validation::validate_required("phone", &data.phone)?;
        validation::validate_phone(&data.phone)?;
        validation::validate_required("password", &data.password)?;
        validation::validate_required("shop name", &data.shop_name)?;
        validation::validate_amount("rent amount", data.rent_amount)?;

        let now = Utc::now();
        let today = now.date_naive();
        let client = Client {
            id: ident::client_id(now.timestamp_millis()),
            owner_name: data.owner_name,
            shop_name: data.shop_name,
            shop_serial_number: data.shop_serial_number,
            market_name: data.market_name,
            phone: data.phone,
            password: Some(data.password),
            division: data.division,
            district: data.district,
            thana: data.thana,
            billing: ClientBilling {
                rent_amount: data.rent_amount,
                billing_date: today,
                due_date: today + Duration::days(DUE_DAYS),
                payment_status: PaymentStatus::Unpaid,
                history: Vec::new(),
            },
            created_at: now,
        };

        info!(client = %client.id, shop = %client.shop_name, "Client registered");
        self.clients.push(client.clone());
        Ok(client)
    }

    /// Replaces a client record wholesale (admin edit form).
    pub fn update_client(&mut self, updated: Client) -> LedgerResult<()> {
        let slot = self
            .clients
            .iter_mut()
            .find(|c| c.id == updated.id)
            .ok_or_else(|| LedgerError::ClientNotFound(updated.id.clone()))?;
        *slot = updated;
        Ok(())
    }

    /// Records a rent payment for a client.
    ///
    /// Appends to the billing history and marks the client `PAID` only when
    /// this single payment covers the full rent amount. A smaller payment
    /// is kept in the history but leaves the payment status untouched;
    /// partial amounts do not accumulate toward the threshold.
    ///
    /// Returns the receipt projection for the UI.
    pub fn record_payment(&mut self, client_id: &str, amount: Money) -> LedgerResult<PaymentReceipt> {
        validation::validate_amount("payment amount", amount)?;

        let client = self
            .clients
            .iter_mut()
            .find(|c| c.id == client_id)
            .ok_or_else(|| LedgerError::ClientNotFound(client_id.to_string()))?;

        let now = Utc::now();
        let date = now.date_naive();
        let invoice_id = ident::payment_invoice(now.timestamp_millis());

        client.billing.history.push(BillingEntry {
            date,
            amount,
            status: PaymentStatus::Paid,
            invoice_id: invoice_id.clone(),
        });
        if amount >= client.billing.rent_amount {
            client.billing.payment_status = PaymentStatus::Paid;
        }

        info!(
            client = %client.id,
            amount = %amount,
            invoice = %invoice_id,
            status = ?client.billing.payment_status,
            "Rent payment recorded"
        );

        Ok(PaymentReceipt {
            client: client.clone(),
            amount,
            date,
            invoice_id,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn new_client(rent_taka: i64) -> NewClient {
        NewClient {
            owner_name: "Karim".to_string(),
            shop_name: "Karim Store".to_string(),
            shop_serial_number: "A-17".to_string(),
            market_name: "New Market".to_string(),
            phone: "01712-345678".to_string(),
            password: "secret".to_string(),
            division: "Dhaka".to_string(),
            district: "Dhaka".to_string(),
            thana: "Dhanmondi".to_string(),
            rent_amount: Money::from_taka(rent_taka),
        }
    }

    #[test]
    fn test_create_client() {
        let mut directory = ClientDirectory::new();
        let client = directory.create_client(new_client(1500)).unwrap();

        assert!(client.id.starts_with("CLIENT-"));
        assert_eq!(client.billing.payment_status, PaymentStatus::Unpaid);
        assert!(client.billing.history.is_empty());
        assert_eq!(
            client.billing.due_date - client.billing.billing_date,
            Duration::days(7)
        );
        assert_eq!(directory.clients.len(), 1);
    }

    #[test]
    fn test_create_client_validation() {
        let mut directory = ClientDirectory::new();

        let mut missing_phone = new_client(1500);
        missing_phone.phone = String::new();
        assert!(directory.create_client(missing_phone).is_err());

        let mut zero_rent = new_client(1500);
        zero_rent.rent_amount = Money::zero();
        assert!(directory.create_client(zero_rent).is_err());

        assert!(directory.clients.is_empty());
    }

    /// Rent 1500: a payment of 800 leaves the status untouched, then a
    /// second payment of 700 also leaves it untouched, because the
    /// threshold applies to a single payment, never a running sum.
    #[test]
    fn test_partial_payments_never_accumulate() {
        let mut directory = ClientDirectory::new();
        let client = directory.create_client(new_client(1500)).unwrap();

        let receipt = directory
            .record_payment(&client.id, Money::from_taka(800))
            .unwrap();
        assert_eq!(receipt.client.billing.payment_status, PaymentStatus::Unpaid);
        assert_eq!(receipt.client.billing.history.len(), 1);
        assert_eq!(receipt.client.billing.history[0].amount, Money::from_taka(800));

        let receipt = directory
            .record_payment(&client.id, Money::from_taka(700))
            .unwrap();
        // 800 + 700 covers the rent, but neither single payment does.
        assert_eq!(receipt.client.billing.payment_status, PaymentStatus::Unpaid);
        assert_eq!(receipt.client.billing.history.len(), 2);
    }

    #[test]
    fn test_full_payment_marks_paid() {
        let mut directory = ClientDirectory::new();
        let client = directory.create_client(new_client(1500)).unwrap();

        let receipt = directory
            .record_payment(&client.id, Money::from_taka(1500))
            .unwrap();
        assert_eq!(receipt.client.billing.payment_status, PaymentStatus::Paid);
        assert_eq!(receipt.amount, Money::from_taka(1500));
        assert!(receipt.invoice_id.starts_with("INV-PAY-"));

        let stored = directory.client(&client.id).unwrap();
        assert_eq!(stored.billing.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_overpayment_marks_paid() {
        let mut directory = ClientDirectory::new();
        let client = directory.create_client(new_client(1500)).unwrap();
        let receipt = directory
            .record_payment(&client.id, Money::from_taka(2000))
            .unwrap();
        assert_eq!(receipt.client.billing.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_payment_rejections() {
        let mut directory = ClientDirectory::new();
        let client = directory.create_client(new_client(1500)).unwrap();

        assert!(matches!(
            directory.record_payment(&client.id, Money::zero()),
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            directory.record_payment("CLIENT-404", Money::from_taka(100)),
            Err(LedgerError::ClientNotFound(_))
        ));
        assert!(directory.client(&client.id).unwrap().billing.history.is_empty());
    }

    #[test]
    fn test_update_client() {
        let mut directory = ClientDirectory::new();
        let mut client = directory.create_client(new_client(1500)).unwrap();

        client.shop_name = "Karim Superstore".to_string();
        directory.update_client(client.clone()).unwrap();
        assert_eq!(
            directory.client(&client.id).unwrap().shop_name,
            "Karim Superstore"
        );

        client.id = "CLIENT-404".to_string();
        assert!(matches!(
            directory.update_client(client),
            Err(LedgerError::ClientNotFound(_))
        ));
    }
}

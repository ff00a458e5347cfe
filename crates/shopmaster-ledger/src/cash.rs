//! # Cash Session
//!
//! The accounting period for a shop login.
//!
//! ```text
//! UNINITIALIZED --open_session--> OPEN --close_session--> CLOSED
//! ```
//!
//! At most one session is open at a time. The live balance is derived from
//! the ledgers on every read (see [`Shop::cash_balance`]); nothing here
//! caches it.

use chrono::Utc;
use shopmaster_core::{
    ident, validation, CashSession, LedgerError, LedgerResult, Money, SessionStatus,
};
use tracing::info;

use crate::shop::Shop;

impl Shop {
    /// Opens a cash session anchored by `opening_cash`.
    ///
    /// ## Rejections
    /// - validation error on a negative float (zero is legal)
    /// - [`LedgerError::SessionAlreadyOpen`] while a session is open
    pub fn open_session(&mut self, opening_cash: Money) -> LedgerResult<&CashSession> {
        validation::validate_cash_float("opening cash", opening_cash)?;

        if matches!(
            self.cash_session,
            Some(CashSession {
                status: SessionStatus::Open,
                ..
            })
        ) {
            return Err(LedgerError::SessionAlreadyOpen);
        }

        let now = Utc::now();
        let session = CashSession {
            id: ident::session_id(now.timestamp_millis()),
            start_time: now,
            end_time: None,
            opening_cash,
            closing_cash: None,
            status: SessionStatus::Open,
        };

        info!(session = %session.id, float = %opening_cash, "Cash session opened");
        Ok(self.cash_session.insert(session))
    }

    /// Closes the open session, recording the counted closing cash.
    ///
    /// Closing is a manual admin action; the ledgers keep accepting entries
    /// only through a newly opened session afterwards.
    pub fn close_session(&mut self, closing_cash: Money) -> LedgerResult<&CashSession> {
        validation::validate_cash_float("closing cash", closing_cash)?;

        match self.cash_session.as_mut() {
            Some(session) if session.status == SessionStatus::Open => {
                session.end_time = Some(Utc::now());
                session.closing_cash = Some(closing_cash);
                session.status = SessionStatus::Closed;
                info!(session = %session.id, counted = %closing_cash, "Cash session closed");
                Ok(session)
            }
            _ => Err(LedgerError::SessionNotOpen),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

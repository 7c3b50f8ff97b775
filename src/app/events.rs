//! Outbound application events.
//!
//! The [`SafeService`](super::service::SafeService) and the door supervisor
//! emit these through the [`EventSink`](super::ports::EventSink) port.
//! Adapters decide where they go (serial log today).

use crate::door::supervisor::DoorPhase;
use crate::error::LedgerError;

use super::transaction::{Transaction, TransactionKind};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Boot finished.  `from_ledger` is false when the balance defaulted.
    Started { balance: u64, from_ledger: bool },

    /// The boot-time balance read failed; balance stays at its default.
    BalanceReadFailed(LedgerError),

    /// A deposit/withdraw button was pressed.
    TriggerReceived(TransactionKind),

    /// Credential accepted.
    Authenticated(TransactionKind),

    /// Credential rejected; back to idle.
    AuthenticationFailed(TransactionKind),

    /// The door supervisor moved between phases.
    DoorPhaseChanged { from: DoorPhase, to: DoorPhase },

    /// Door confirmed closed.  `closed_in` is the phase that observed it.
    DoorResolved { closed_in: DoorPhase, alert_sent: bool },

    /// Security alert raised (at most once per supervision cycle).
    SecurityAlert { balance: u64, reported: bool },

    /// Balance mutated.
    Committed { transaction: Transaction, balance: u64 },

    /// Withdrawal exceeded the balance; nothing changed.
    Rejected { transaction: Transaction, balance: u64 },

    /// A ledger post failed and will not be retried.
    LedgerPostFailed(LedgerError),

    /// Door found shut after the auto-lock delay.
    LockConfirmed,

    /// Door still open after the auto-lock delay; alarming until shut.
    LockOverdue,

    /// Transaction flow finished; back to idle.
    Settled { balance: u64 },
}

//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production).  Each line starts
//! with a fixed tag so a serial capture can be filtered with `grep`.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                balance,
                from_ledger,
            } => {
                info!(
                    "BOOT   | balance={} source={}",
                    balance,
                    if *from_ledger { "ledger" } else { "default" }
                );
            }
            AppEvent::BalanceReadFailed(e) => {
                warn!("LEDGER | balance read failed: {e}");
            }
            AppEvent::TriggerReceived(kind) => {
                info!("TXN    | {:?} requested", kind);
            }
            AppEvent::Authenticated(kind) => {
                info!("AUTH   | accepted for {:?}", kind);
            }
            AppEvent::AuthenticationFailed(kind) => {
                warn!("AUTH   | rejected for {:?}", kind);
            }
            AppEvent::DoorPhaseChanged { from, to } => {
                info!("DOOR   | {} -> {}", from.name(), to.name());
            }
            AppEvent::DoorResolved {
                closed_in,
                alert_sent,
            } => {
                info!(
                    "DOOR   | closed during {} alert_sent={}",
                    closed_in.name(),
                    alert_sent
                );
            }
            AppEvent::SecurityAlert { balance, reported } => {
                warn!("ALARM  | security alert balance={balance} reported={reported}");
            }
            AppEvent::Committed {
                transaction,
                balance,
            } => {
                info!(
                    "TXN    | {:?} {} committed, balance={}",
                    transaction.kind, transaction.amount, balance
                );
            }
            AppEvent::Rejected {
                transaction,
                balance,
            } => {
                warn!(
                    "TXN    | {:?} {} rejected, balance={}",
                    transaction.kind, transaction.amount, balance
                );
            }
            AppEvent::LedgerPostFailed(e) => {
                warn!("LEDGER | post failed: {e}");
            }
            AppEvent::LockConfirmed => {
                info!("DOOR   | locked");
            }
            AppEvent::LockOverdue => {
                warn!("ALARM  | door open after auto-lock delay");
            }
            AppEvent::Settled { balance } => {
                info!("TXN    | settled, balance={balance}");
            }
        }
    }
}

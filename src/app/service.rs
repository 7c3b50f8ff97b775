//! Application service: the transaction engine.
//!
//! [`SafeService`] owns the configuration, the balance, and the three
//! sub-engines (authenticator, amount entry, door supervisor).  All I/O
//! flows through port traits injected at call sites, so the whole flow
//! runs against mock adapters in tests.
//!
//! ```text
//!  IDLE ─[button]─▶ AUTHENTICATING ─[wrong]──────────────────────▶ IDLE
//!                        │ [ok]
//!                        ▼
//!               PRE_COMMIT_DOOR_CHECK   (never blocks progress)
//!                        ▼
//!                  AMOUNT_CAPTURE
//!                        ▼
//!                    COMMITTING ─[withdraw > balance]─┐ (no mutation, no post)
//!                        │                            │
//!                        ▼                            ▼
//!              POST_COMMIT_DOOR_CHECK ◀───────────────┘
//!                        ▼
//!                     SETTLED ──▶ IDLE
//! ```
//!
//! Nothing here returns an error: a wrong password, an insufficient
//! balance, a failed ledger call, or an open door all end in on-device
//! feedback and a logged event.  A failed ledger post is not retried and
//! the local balance is not rolled back, so the ledger can lag behind the
//! device until the next successful post.

use log::{info, warn};

use crate::config::SafeConfig;
use crate::door::{self, supervisor::DoorCloseSupervisor};
use crate::entry::{amount::AmountEntry, auth::Authenticator};

use super::events::AppEvent;
use super::feedback::{beep, flash_confirm, labelled, show};
use super::ports::{DisplaySink, EventSink, LedgerClient, SafeHardware, UserInterface};
use super::transaction::{LedgerEvent, Transaction, TransactionKind, TransactionOutcome};

/// Transaction engine phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPhase {
    Idle,
    Authenticating,
    PreCommitDoorCheck,
    AmountCapture,
    Committing,
    PostCommitDoorCheck,
    Settled,
}

impl TxnPhase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Authenticating => "Authenticating",
            Self::PreCommitDoorCheck => "PreCommitDoorCheck",
            Self::AmountCapture => "AmountCapture",
            Self::Committing => "Committing",
            Self::PostCommitDoorCheck => "PostCommitDoorCheck",
            Self::Settled => "Settled",
        }
    }
}

// ───────────────────────────────────────────────────────────────
// SafeService
// ───────────────────────────────────────────────────────────────

pub struct SafeService {
    config: SafeConfig,
    /// Session copy of the ledger balance.  Never persisted locally.
    balance: u64,
    phase: TxnPhase,
    authenticator: Authenticator,
    amount_entry: AmountEntry,
    door: DoorCloseSupervisor,
}

impl SafeService {
    /// Construct the service.  Balance starts at zero until [`boot`](Self::boot).
    pub fn new(config: SafeConfig) -> Self {
        Self {
            authenticator: Authenticator::new(&config),
            amount_entry: AmountEntry::new(&config),
            door: DoorCloseSupervisor::new(&config),
            config,
            balance: 0,
            phase: TxnPhase::Idle,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Load the balance from the ledger.  On failure the balance keeps its
    /// current value and the device carries on; there is no retry.
    pub fn boot(&mut self, ledger: &mut impl LedgerClient, sink: &mut impl EventSink) {
        let from_ledger = match ledger.read_balance() {
            Ok(balance) => {
                self.balance = balance;
                true
            }
            Err(e) => {
                warn!("Balance read failed ({e}), starting from {}", self.balance);
                sink.emit(&AppEvent::BalanceReadFailed(e));
                false
            }
        };
        info!("SafeService started, balance={}", self.balance);
        sink.emit(&AppEvent::Started {
            balance: self.balance,
            from_ledger,
        });
    }

    /// One pass of the idle loop: draw the balance screen, run a
    /// transaction if a button was pressed, then sleep one idle period.
    pub fn run_once<H: SafeHardware>(
        &mut self,
        hw: &mut H,
        ui: &mut impl UserInterface,
        ledger: &mut impl LedgerClient,
        sink: &mut impl EventSink,
    ) -> Option<TransactionOutcome> {
        self.show_idle(ui);

        let outcome = hw.poll_trigger().map(|kind| {
            sink.emit(&AppEvent::TriggerReceived(kind));
            self.run_transaction(kind, hw, ui, ledger, sink)
        });

        hw.delay_ms(self.config.idle_loop_interval_ms);
        outcome
    }

    /// Run one complete deposit or withdrawal flow and return to idle.
    pub fn run_transaction<H: SafeHardware>(
        &mut self,
        kind: TransactionKind,
        hw: &mut H,
        ui: &mut impl UserInterface,
        ledger: &mut impl LedgerClient,
        sink: &mut impl EventSink,
    ) -> TransactionOutcome {
        // 1. Credential
        self.transition(TxnPhase::Authenticating);
        if !self.authenticator.authenticate(hw, ui) {
            sink.emit(&AppEvent::AuthenticationFailed(kind));
            self.transition(TxnPhase::Idle);
            return TransactionOutcome::AuthenticationFailed;
        }
        sink.emit(&AppEvent::Authenticated(kind));
        info!("{}", kind.mode_title());
        show(ui, &[kind.mode_title()]);

        // 2. Encourage the user to shut the door before counting money.
        //    The outcome only feeds the alert flag of the ledger report.
        self.transition(TxnPhase::PreCommitDoorCheck);
        let alert_sent = self
            .door
            .supervise(hw, ui, ledger, self.balance, sink)
            .alert_sent;

        // 3. Amount
        self.transition(TxnPhase::AmountCapture);
        let amount = self.amount_entry.capture(kind.amount_prompt(), hw, ui);
        let transaction = Transaction { kind, amount };

        // 4. Balance mutation + ledger report
        self.transition(TxnPhase::Committing);
        let outcome = self.commit(transaction, alert_sent, hw, ui, ledger, sink);

        // 5. Door must end up shut whatever happened above.
        self.transition(TxnPhase::PostCommitDoorCheck);
        self.verify_lock(hw, ui, sink);

        // 6. Back to idle
        self.transition(TxnPhase::Settled);
        show(ui, &[labelled("Done. Balance: ", self.balance).as_str()]);
        flash_confirm(hw, self.config.confirm_led_ms);
        sink.emit(&AppEvent::Settled {
            balance: self.balance,
        });
        self.transition(TxnPhase::Idle);

        outcome
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn phase(&self) -> TxnPhase {
        self.phase
    }

    pub fn config(&self) -> &SafeConfig {
        &self.config
    }

    /// Idle screen.
    pub fn show_idle(&self, display: &mut impl DisplaySink) {
        show(
            display,
            &[
                labelled("Balance: ", self.balance).as_str(),
                "Press Deposit or Withdraw",
            ],
        );
    }

    // ── Internal ──────────────────────────────────────────────

    fn commit<H: SafeHardware>(
        &mut self,
        transaction: Transaction,
        alert_sent: bool,
        hw: &mut H,
        ui: &mut impl UserInterface,
        ledger: &mut impl LedgerClient,
        sink: &mut impl EventSink,
    ) -> TransactionOutcome {
        let amount = u64::from(transaction.amount);
        match transaction.kind {
            TransactionKind::Withdraw if amount > self.balance => {
                warn!(
                    "TXN: withdraw {} exceeds balance {}, rejected",
                    amount, self.balance
                );
                show(ui, &["Insufficient balance!"]);
                beep(hw, self.config.insufficient_buzz_ms);
                sink.emit(&AppEvent::Rejected {
                    transaction,
                    balance: self.balance,
                });
                return TransactionOutcome::Rejected {
                    transaction,
                    alert_sent,
                };
            }
            TransactionKind::Withdraw => self.balance -= amount,
            TransactionKind::Deposit => self.balance = self.balance.saturating_add(amount),
        }

        info!(
            "TXN: {:?} {} committed, balance={}",
            transaction.kind, amount, self.balance
        );
        sink.emit(&AppEvent::Committed {
            transaction,
            balance: self.balance,
        });

        let event = LedgerEvent::committed(self.balance, transaction.kind, alert_sent);
        let reported = match ledger.post_event(&event) {
            Ok(()) => true,
            Err(e) => {
                warn!("TXN: ledger post failed ({e}), local balance kept");
                sink.emit(&AppEvent::LedgerPostFailed(e));
                false
            }
        };

        TransactionOutcome::Committed {
            transaction,
            alert_sent,
            reported,
        }
    }

    /// Give the user the auto-lock delay, then check once.  An open door
    /// goes straight to the continuous alarm; the delay was its grace.
    fn verify_lock<H: SafeHardware>(
        &mut self,
        hw: &mut H,
        ui: &mut impl UserInterface,
        sink: &mut impl EventSink,
    ) {
        info!("Waiting {}ms for door closure", self.config.auto_lock_delay_ms);
        hw.delay_ms(self.config.auto_lock_delay_ms);

        if door::sample(hw).is_closed() {
            show(ui, &["Door locked !!"]);
            flash_confirm(hw, self.config.confirm_led_ms);
            sink.emit(&AppEvent::LockConfirmed);
        } else {
            warn!("Door still open after auto-lock delay, alarming");
            sink.emit(&AppEvent::LockOverdue);
            self.door.alarm_until_closed(hw, ui, sink);
        }
    }

    fn transition(&mut self, next: TxnPhase) {
        if next != self.phase {
            info!("TXN transition: {} -> {}", self.phase.name(), next.name());
            self.phase = next;
        }
    }
}

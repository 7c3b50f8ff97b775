//! Transaction value objects and the ledger event record.

/// Which button started the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl TransactionKind {
    /// Screen title shown once the user is authenticated.
    pub fn mode_title(self) -> &'static str {
        match self {
            Self::Deposit => "Deposit Mode",
            Self::Withdraw => "Withdraw Mode",
        }
    }

    /// Prompt shown by amount entry.
    pub fn amount_prompt(self) -> &'static str {
        match self {
            Self::Deposit => "Enter deposit amt:",
            Self::Withdraw => "Enter withdraw amt:",
        }
    }
}

/// A transient deposit or withdrawal.  Created only after authentication
/// and the pre-amount door check; never queued or retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    pub kind: TransactionKind,
    /// Always `>= 1`.
    pub amount: u32,
}

/// One row posted to the remote ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEvent {
    /// Balance after the change (or the unchanged balance for a bare alert).
    pub balance: u64,
    pub deposit: bool,
    pub withdraw: bool,
    pub alert: bool,
}

impl LedgerEvent {
    /// Security alert with no balance movement.
    pub fn alert(balance: u64) -> Self {
        Self {
            balance,
            deposit: false,
            withdraw: false,
            alert: true,
        }
    }

    /// Record of a committed transaction.
    pub fn committed(balance: u64, kind: TransactionKind, alert: bool) -> Self {
        Self {
            balance,
            deposit: kind == TransactionKind::Deposit,
            withdraw: kind == TransactionKind::Withdraw,
            alert,
        }
    }
}

/// Result of one run of the transaction engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// Wrong credential; no transaction was created.
    AuthenticationFailed,
    /// Balance mutated.  `reported` is false if the ledger post failed.
    Committed {
        transaction: Transaction,
        alert_sent: bool,
        reported: bool,
    },
    /// Withdrawal larger than the balance; nothing mutated or posted.
    Rejected {
        transaction: Transaction,
        alert_sent: bool,
    },
}

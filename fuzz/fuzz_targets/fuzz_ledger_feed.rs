//! Fuzz target: `decode_balance` (ledger `last.json` body)
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Any accepted balance decodes back to itself from a canonical body
//!
//! cargo fuzz run fuzz_ledger_feed

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartsafe::adapters::ledger::decode_balance;

fuzz_target!(|data: &[u8]| {
    let Ok(balance) = decode_balance(data) else {
        return;
    };

    let canonical = format!(r#"{{"field1":"{balance}"}}"#);
    assert_eq!(decode_balance(canonical.as_bytes()), Ok(balance));
});

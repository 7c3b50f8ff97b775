//! Remote ledger adapter for a ThingSpeak-style channel.
//!
//! Field layout of the channel:
//!
//! | Field    | Meaning                         |
//! |----------|---------------------------------|
//! | `field1` | balance after the event         |
//! | `field2` | `1` if the event is a deposit   |
//! | `field3` | `1` if the event is a withdrawal|
//! | `field4` | `1` if a security alert was sent|
//!
//! The balance is read back from the last `field1` entry at boot.  The HTTP
//! stack sits behind [`HttpTransport`]; with [`NullTransport`] every call
//! fails with [`LedgerError::Unavailable`] and the safe runs offline.

use core::fmt::Write as _;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::app::ports::LedgerClient;
use crate::app::transaction::LedgerEvent;
use crate::config::LedgerConfig;
use crate::error::LedgerError;

/// Blocking HTTP GET.
pub trait HttpTransport {
    /// Fetch `url`, append the response body to `body`, return the status.
    fn get(&mut self, url: &str, body: &mut Vec<u8>) -> Result<u16, LedgerError>;
}

/// Transport for a device with no network.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl HttpTransport for NullTransport {
    fn get(&mut self, _url: &str, _body: &mut Vec<u8>) -> Result<u16, LedgerError> {
        Err(LedgerError::Unavailable)
    }
}

/// `last.json` document for a single field.
#[derive(Debug, Deserialize)]
struct FieldFeed {
    #[serde(default)]
    field1: Option<String>,
}

pub struct ChannelLedger<T> {
    transport: T,
    config: LedgerConfig,
    body: Vec<u8>,
}

impl<T: HttpTransport> ChannelLedger<T> {
    pub fn new(transport: T, config: LedgerConfig) -> Self {
        Self {
            transport,
            config,
            body: Vec::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn read_url(&self) -> String {
        format!(
            "{}/channels/{}/fields/1/last.json?api_key={}",
            self.config.base_url, self.config.channel_id, self.config.read_api_key
        )
    }

    fn update_url(&self, event: &LedgerEvent) -> String {
        let mut url = format!(
            "{}/update?api_key={}",
            self.config.base_url, self.config.write_api_key
        );
        // Writing to a String cannot fail.
        let _ = write!(
            url,
            "&field1={}&field2={}&field3={}&field4={}",
            event.balance,
            u8::from(event.deposit),
            u8::from(event.withdraw),
            u8::from(event.alert)
        );
        url
    }

    fn fetch(&mut self, url: &str) -> Result<&[u8], LedgerError> {
        self.body.clear();
        let status = self.transport.get(url, &mut self.body)?;
        if status != 200 {
            return Err(LedgerError::Status(status));
        }
        Ok(&self.body)
    }
}

impl<T: HttpTransport> LedgerClient for ChannelLedger<T> {
    fn read_balance(&mut self) -> Result<u64, LedgerError> {
        let url = self.read_url();
        let balance = decode_balance(self.fetch(&url)?)?;
        info!("LEDGER: balance {balance} read from channel");
        Ok(balance)
    }

    fn post_event(&mut self, event: &LedgerEvent) -> Result<(), LedgerError> {
        let url = self.update_url(event);
        let body = self.fetch(&url)?;
        // The update endpoint answers with the new entry id, `0` on refusal.
        if body.trim_ascii() == b"0" {
            warn!("LEDGER: update refused by channel");
            return Err(LedgerError::Rejected);
        }
        debug!("LEDGER: posted {:?}", event);
        Ok(())
    }
}

/// Decode a `last.json` body into a balance.
///
/// `field1` must be present and hold a non-negative integer.  A decimal
/// form such as `"150.0"` is accepted and truncated.
pub fn decode_balance(body: &[u8]) -> Result<u64, LedgerError> {
    let feed: FieldFeed = serde_json::from_slice(body).map_err(|_| LedgerError::Decode)?;
    let raw = feed.field1.ok_or(LedgerError::MissingField)?;
    let raw = raw.trim();
    let whole = match raw.split_once('.') {
        Some((whole, frac)) if frac.bytes().all(|b| b.is_ascii_digit()) => whole,
        Some(_) => return Err(LedgerError::Decode),
        None => raw,
    };
    whole.parse::<u64>().map_err(|_| LedgerError::Decode)
}

//! JSON output for balances
//!
//! A balance report is an object keyed by user ID:
//!
//! ```text
//! {
//!   "1": { "balance": 40.0, "withdrawals": [ { "date": "2024-02-01", ... } ] }
//! }
//! ```

use crate::types::{Balance, UserId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Write any serializable value as pretty JSON followed by a newline
pub fn write_json<T: Serialize + ?Sized>(value: &T, output: &mut dyn Write) -> Result<(), String> {
    serde_json::to_writer_pretty(&mut *output, value)
        .map_err(|e| format!("Failed to write JSON: {}", e))?;
    writeln!(output).map_err(|e| format!("Failed to write JSON: {}", e))?;
    output
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))
}

/// Write per-user balances as a JSON object ordered by user ID
pub fn write_balances_json(
    balances: &[(UserId, Balance)],
    output: &mut dyn Write,
) -> Result<(), String> {
    let by_user: BTreeMap<UserId, &Balance> =
        balances.iter().map(|(user, balance)| (*user, balance)).collect();

    write_json(&by_user, output)
}

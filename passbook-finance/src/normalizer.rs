//! Normalizer: layout-native statement transactions to canonical transactions.

use passbook_core::finance::{CanonicalTransaction, Direction};
use passbook_ingest::StatementTransaction;

/// Infer money direction from the kind label and payee text.
/// Priority: kind credit words > payee credit phrases > kind debit words
/// > payee debit phrases > outgoing.
pub fn infer_direction(kind: &str, payee: &str) -> Direction {
    let kind = kind.to_lowercase();
    let payee = payee.to_lowercase();

    if matches!(kind.as_str(), "credit" | "received" | "refund") {
        return Direction::Incoming;
    }
    if payee.contains("received from") || payee.contains("refund") {
        return Direction::Incoming;
    }
    if matches!(kind.as_str(), "debit" | "paid") {
        return Direction::Outgoing;
    }
    if payee.contains("paid to") || payee.contains("payment to") {
        return Direction::Outgoing;
    }

    Direction::Outgoing
}

fn compose_note(txn: &StatementTransaction) -> String {
    if txn.txn_id.is_empty() {
        return String::new();
    }
    format!("TxnID: {}, UTR: {}", txn.txn_id, txn.utr_no.trim())
}

/// Convert one parsed statement transaction. Never fails.
pub fn normalize(txn: &StatementTransaction) -> CanonicalTransaction {
    CanonicalTransaction {
        date: txn.date_iso(),
        time: txn.time_12h(),
        amount: txn.amount.clone(),
        direction: infer_direction(&txn.kind, &txn.payee),
        payee: txn.payee.clone(),
        category: String::new(),
        note: compose_note(txn),
    }
}

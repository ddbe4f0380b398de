use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of one visual item across reconciliation passes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemKey {
    /// Block number
    Height(u64),
    /// Transaction hash
    Hash(String),
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Height(h) => write!(f, "#{h}"),
            ItemKey::Hash(hash) => write!(f, "{hash}"),
        }
    }
}

impl From<u64> for ItemKey {
    fn from(height: u64) -> Self {
        ItemKey::Height(height)
    }
}

impl From<&str> for ItemKey {
    fn from(hash: &str) -> Self {
        ItemKey::Hash(hash.to_string())
    }
}

/// What the visualizer needs to know about a block or transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub key: ItemKey,
    /// Ordering key: block height for blocks, timestamp (ms) for transactions
    pub order: u64,
    /// Serialized size in bytes
    pub size: u64,
    /// Fees paid, in base units
    pub fee: u64,
    /// Sum of transferred outputs, in base units
    pub value: u64,
    /// Transactions contained (1 for a transaction)
    pub count: u32,
}

impl DisplayItem {
    pub fn new(key: impl Into<ItemKey>, order: u64) -> Self {
        Self {
            key: key.into(),
            order,
            size: 0,
            fee: 0,
            value: 0,
            count: 1,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockRow {
    pub height: u64,
    pub hash: String,
    pub prev_hash: Option<String>,
    /// Milliseconds since the unix epoch
    pub timestamp: u64,
    pub tx_count: usize,
    pub size: u64,
    pub total_fee: u64,
    pub when: String,
    pub transactions: Vec<TxLite>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxLite {
    pub hash: String,
    pub height: u64,
    pub timestamp: u64,
    pub size: u64,
    pub fee: u64,
    pub output_sum: u64,
    pub signer_id: Option<String>,
    pub receiver_id: Option<String>,
}

impl From<&BlockRow> for DisplayItem {
    fn from(block: &BlockRow) -> Self {
        Self {
            key: ItemKey::Height(block.height),
            order: block.height,
            size: block.size,
            fee: block.total_fee,
            value: block.transactions.iter().map(|tx| tx.output_sum).sum(),
            count: block.tx_count.min(u32::MAX as usize) as u32,
        }
    }
}

impl From<&TxLite> for DisplayItem {
    fn from(tx: &TxLite) -> Self {
        Self {
            key: ItemKey::Hash(tx.hash.clone()),
            order: tx.timestamp,
            size: tx.size,
            fee: tx.fee,
            value: tx.output_sum,
            count: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    NewBlock(BlockRow),
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(hash: &str, ts: u64, out: u64) -> TxLite {
        TxLite {
            hash: hash.into(),
            height: 7,
            timestamp: ts,
            size: 250,
            fee: 12,
            output_sum: out,
            signer_id: None,
            receiver_id: None,
        }
    }

    #[test]
    fn block_row_maps_to_height_key() {
        let block = BlockRow {
            height: 7,
            hash: "abc".into(),
            prev_hash: None,
            timestamp: 1_000,
            tx_count: 2,
            size: 900,
            total_fee: 24,
            when: String::new(),
            transactions: vec![tx("a", 1_000, 5), tx("b", 1_000, 10)],
        };
        let item = DisplayItem::from(&block);
        assert_eq!(item.key, ItemKey::Height(7));
        assert_eq!(item.order, 7);
        assert_eq!(item.value, 15);
        assert_eq!(item.count, 2);
    }

    #[test]
    fn tx_orders_by_timestamp() {
        let item = DisplayItem::from(&tx("deadbeef", 42_000, 1));
        assert_eq!(item.key, ItemKey::Hash("deadbeef".into()));
        assert_eq!(item.order, 42_000);
        assert_eq!(item.count, 1);
    }

    #[test]
    fn keys_serialize_untagged() {
        assert_eq!(serde_json::to_string(&ItemKey::Height(5)).unwrap(), "5");
        assert_eq!(
            serde_json::to_string(&ItemKey::Hash("ff".into())).unwrap(),
            "\"ff\""
        );
    }
}

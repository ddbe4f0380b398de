use crate::{
    config::Config,
    types::{AppEvent, BlockRow, TxLite},
};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{sleep, Duration};

const ACCOUNTS: &[&str] = &[
    "alice.near",
    "bob.near",
    "carol.near",
    "relay.aurora",
    "v2.ref-finance.near",
    "wrap.near",
    "intents.near",
    "token.sweat",
];

/// Generator for a plausible-looking chain.
pub struct SimChain {
    rng: StdRng,
    height: u64,
    prev_hash: Option<String>,
    max_txs: usize,
}

impl SimChain {
    pub fn new(seed: Option<u64>, start_height: u64, max_txs: usize) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            height: start_height,
            prev_hash: None,
            max_txs,
        }
    }

    fn hash(&mut self) -> String {
        (0..32).map(|_| format!("{:02x}", self.rng.gen::<u8>())).collect()
    }

    fn account(&mut self) -> String {
        ACCOUNTS[self.rng.gen_range(0..ACCOUNTS.len())].to_string()
    }

    /// Next block, stamped `timestamp_ms`.
    pub fn next_block(&mut self, timestamp_ms: u64) -> BlockRow {
        let height = self.height;
        self.height += 1;

        let tx_count = if self.max_txs == 0 {
            0
        } else {
            self.rng.gen_range(0..=self.max_txs)
        };
        let mut transactions = Vec::with_capacity(tx_count);
        for i in 0..tx_count {
            let size = self.rng.gen_range(150..4_000u64);
            // Fees loosely follow size, with the occasional whale
            let fee = size * self.rng.gen_range(80..120u64)
                * if self.rng.gen_bool(0.05) { 20 } else { 1 };
            transactions.push(TxLite {
                hash: self.hash(),
                height,
                timestamp: timestamp_ms + i as u64,
                size,
                fee,
                output_sum: self.rng.gen_range(0..50_000_000u64),
                signer_id: Some(self.account()),
                receiver_id: Some(self.account()),
            });
        }

        let hash = self.hash();
        BlockRow {
            height,
            hash: hash.clone(),
            prev_hash: self.prev_hash.replace(hash),
            timestamp: timestamp_ms,
            tx_count,
            size: 512 + transactions.iter().map(|t| t.size).sum::<u64>(),
            total_fee: transactions.iter().map(|t| t.fee).sum(),
            when: format_when(timestamp_ms),
            transactions,
        }
    }
}

fn format_when(timestamp_ms: u64) -> String {
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis)
        .map(|dt| dt.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Produce a block every `block_interval_ms` until the receiver goes away.
pub async fn run_sim(cfg: &Config, tx: UnboundedSender<AppEvent>) -> Result<()> {
    let start_height = 100_000_000 + (now_ms() / 1000) % 1_000_000;
    let mut chain = SimChain::new(cfg.seed, start_height, cfg.max_txs_per_block);
    log::info!(
        "🚀 Simulated chain started - height: {}, every {}ms",
        start_height,
        cfg.block_interval_ms
    );

    loop {
        let row = chain.next_block(now_ms());
        log::info!(
            "🔔 Sending NewBlock event - height: {}, txs: {}",
            row.height,
            row.tx_count
        );
        if tx.send(AppEvent::NewBlock(row)).is_err() {
            log::info!("👋 Receiver closed, stopping simulated chain");
            return Ok(());
        }

        log::debug!("😴 Sleeping for {}ms...", cfg.block_interval_ms);
        sleep(Duration::from_millis(cfg.block_interval_ms)).await;
    }
}

//! Render snapshots serialize to the JSON shape web frontends consume.

use blockfall::app::{App, Pane};
use blockfall::config::{load_from, CliArgs};
use blockfall::types::{AppEvent, BlockRow, TxLite};
use blockfall::visualizer::Viewport;
use serde_json::Value;

fn tx(hash: &str, height: u64, fee: u64) -> TxLite {
    TxLite {
        hash: hash.into(),
        height,
        timestamp: height * 1000,
        size: 250,
        fee,
        output_sum: 0,
        signer_id: None,
        receiver_id: None,
    }
}

fn app() -> App {
    let cfg = load_from(CliArgs {
        seed: Some(3),
        ..CliArgs::default()
    })
    .unwrap();
    let mut app = App::new(&cfg);
    app.set_viewport(Viewport::new(640.0, 320.0));
    for height in [10, 11] {
        app.on_event(AppEvent::NewBlock(BlockRow {
            height,
            hash: format!("b{height}"),
            prev_hash: None,
            timestamp: height * 1000,
            tx_count: 1,
            size: 700,
            total_fee: 40,
            when: "09:00:00".into(),
            transactions: vec![tx(&format!("t{height}"), height, 40)],
        }));
    }
    app
}

#[test]
fn block_snapshot_uses_heights_as_keys() {
    let app = app();
    let json: Value = serde_json::from_str(&app.snapshot().to_json().unwrap()).unwrap();

    assert_eq!(json["pane"], "blocks");
    assert_eq!(json["settled"], false);
    assert_eq!(json["active"], 2);
    assert_eq!(json["cell_size"], 100.0);

    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    // newest first (index 0 sits bottom-left)
    assert_eq!(items[0]["key"], 11);
    assert_eq!(items[1]["key"], 10);
    assert_eq!(items[0]["count"], 1);
    assert!(items[0]["y"].as_f64().unwrap() < 0.0);
}

#[test]
fn transaction_snapshot_uses_hashes_as_keys() {
    let mut app = app();
    app.next_pane();
    assert_eq!(app.pane(), Pane::Transactions);

    while app.tick(2.0) > 0 {}
    let json = serde_json::to_value(app.snapshot()).unwrap();

    assert_eq!(json["pane"], "transactions");
    assert_eq!(json["settled"], true);
    assert_eq!(json["active"], 0);
    let keys: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["t11", "t10"]);
    let height = json["container_height"].as_f64().unwrap();
    assert!(height > 0.0 && height <= 320.0);
}

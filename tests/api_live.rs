//! Live API tests. Run with: `cargo test --features online --test api_live -- --nocapture`
#![cfg(feature = "online")]

use ssb_repl::config::DEFAULT_BASE_URL;
use ssb_repl::{Client, DataOutcome, query};

#[test]
fn live_metadata_has_variables() {
    let client = Client::new(DEFAULT_BASE_URL).unwrap();
    let meta = client.fetch_metadata("07459").unwrap();
    let vars = meta.variables().expect("07459 is a table");
    assert!(vars.iter().any(|v| v.code == "Tid"));
}

#[test]
fn live_limited_fetch_returns_jsonstat() {
    let client = Client::new(DEFAULT_BASE_URL).unwrap();
    let meta = client.fetch_metadata("07459").unwrap();
    let q = query::query_from_variables(meta.variables().unwrap(), Some(1), true);
    match client.fetch_data("07459", &q).unwrap() {
        DataOutcome::Dataset(ds) => assert!(!ds.dimensions().is_empty()),
        DataOutcome::Forbidden(msg) => panic!("unexpected 403: {msg}"),
    }
}

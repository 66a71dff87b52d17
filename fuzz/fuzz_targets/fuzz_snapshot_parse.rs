#![no_main]

use libfuzzer_sys::fuzz_target;

use ces_activity::count_activity;
use ces_scope::{filter_scope, ScopeParams};
use ces_scoring::{compute_scores, WeightVector};
use ces_store::EntityStore;

// Decoding arbitrary bytes as a snapshot never panics, and any snapshot that
// loads can be scoped, counted and scored.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(store) = EntityStore::from_json_str(text) else {
        return;
    };
    let params = ScopeParams::all(&store, 21);
    let selector = filter_scope(&store, &params);
    let counts = count_activity(&store, &selector);
    let scores = compute_scores(&counts, &WeightVector::default());
    assert_eq!(scores.len(), counts.len());
});

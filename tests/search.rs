mod common;

use std::collections::HashSet;

use common::{caption, loaded_store, synthetic_captions, PayloadBuilder};
use framefinder::schema::schema::IndexSchema;
use framefinder::{Config, CorpusStore, FrameKey, QueryEngine, SearchOutcome};
use serde_json::json;

fn engine() -> QueryEngine {
    QueryEngine::new(&Config::default(), &IndexSchema::captions())
}

fn keys(outcome: &SearchOutcome) -> Vec<FrameKey> {
    outcome.frames.iter().map(|f| f.key()).collect()
}

#[test]
fn short_criteria_skip_the_search() {
    let store = loaded_store(vec![caption(1, 1, 1000, "Mr. Peanutbutter")]);
    let mut engine = engine();

    for criteria in ["", "pe", "a b cd", "  ", "mr"] {
        let outcome = engine.search(&store, criteria).unwrap();
        assert_eq!(outcome, SearchOutcome::skipped(), "{criteria:?}");
    }
}

#[test]
fn prefix_hits_collapse_to_one_frame() {
    let store = loaded_store(vec![
        caption(1, 1, 1000, "Mr. Peanutbutter peanutbutter, peanut"),
        caption(1, 1, 2000, "Nothing to see"),
    ]);
    let mut engine = engine();

    let outcome = engine.search(&store, "peanut").unwrap();
    assert!(outcome.did_search);
    assert_eq!(keys(&outcome), vec![FrameKey::new(1, 1, 1000)]);
}

#[test]
fn searching_with_no_hits_still_reports_a_search() {
    let store = loaded_store(vec![caption(1, 1, 1000, "Hello")]);
    let outcome = engine().search(&store, "zebra").unwrap();
    assert!(outcome.did_search);
    assert!(outcome.frames.is_empty());
}

#[test]
fn every_term_must_match() {
    let store = loaded_store(vec![
        caption(1, 1, 1000, "horse party"),
        caption(1, 1, 2000, "horse racing"),
        caption(1, 1, 3000, "pool party"),
    ]);
    let outcome = engine().search(&store, "horse party").unwrap();
    assert_eq!(keys(&outcome), vec![FrameKey::new(1, 1, 1000)]);
}

#[test]
fn short_tokens_still_narrow_once_the_search_runs() {
    let store = loaded_store(vec![
        caption(1, 1, 1000, "horse party"),
        caption(1, 1, 2000, "a horse"),
    ]);
    // the length filter only gates the search, "a" still has to match
    let outcome = engine().search(&store, "horse a").unwrap();
    assert!(outcome.did_search);
    assert_eq!(keys(&outcome), vec![FrameKey::new(1, 1, 2000)]);
}

#[test]
fn matching_is_case_insensitive() {
    let store = loaded_store(vec![caption(1, 1, 1000, "<i>BoJack</i> Horseman")]);
    let outcome = engine().search(&store, "BOJACK").unwrap();
    assert_eq!(outcome.frames.len(), 1);
}

#[test]
fn exact_matches_outrank_prefix_matches() {
    let store = loaded_store(vec![
        caption(1, 1, 1000, "horseman of the apocalypse"),
        caption(1, 1, 2000, "horse of the apocalypse"),
    ]);
    let outcome = engine().search(&store, "horse").unwrap();
    assert_eq!(
        keys(&outcome),
        vec![FrameKey::new(1, 1, 2000), FrameKey::new(1, 1, 1000)]
    );
}

#[test]
fn equal_scores_keep_corpus_order() {
    let store = loaded_store(vec![
        caption(2, 1, 1000, "drink"),
        caption(1, 1, 1000, "drink"),
        caption(1, 1, 2000, "drink"),
    ]);
    let outcome = engine().search(&store, "drink").unwrap();
    let positions: Vec<u32> = outcome.frames.iter().map(|f| f.position.value()).collect();
    assert_eq!(positions, vec![0, 1, 2]);
}

#[test]
fn results_are_bounded_and_unique() {
    let store = loaded_store(synthetic_captions(600));
    let mut engine = engine();

    for criteria in ["horse", "the", "hol", "party house", "peanutbutter diane"] {
        let outcome = engine.search(&store, criteria).unwrap();
        assert!(outcome.did_search);
        assert!(outcome.frames.len() <= 40, "{criteria}: {}", outcome.frames.len());

        let unique: HashSet<FrameKey> = keys(&outcome).into_iter().collect();
        assert_eq!(unique.len(), outcome.frames.len(), "{criteria}");
    }

    assert_eq!(engine.search(&store, "horse").unwrap().frames.len(), 40);
}

#[test]
fn max_results_is_configurable() {
    let store = loaded_store(synthetic_captions(100));
    let config = Config { max_results: 5, ..Config::default() };
    let mut engine = QueryEngine::new(&config, &IndexSchema::captions());
    assert_eq!(engine.search(&store, "horse").unwrap().frames.len(), 5);
}

#[test]
fn repeated_searches_are_identical() {
    let store = loaded_store(synthetic_captions(300));
    let mut cached = engine();
    let first = cached.search(&store, "party").unwrap();
    let second = cached.search(&store, "party").unwrap();
    assert_eq!(first, second);

    let uncached_config = Config { cache_size: 0, ..Config::default() };
    let mut uncached = QueryEngine::new(&uncached_config, &IndexSchema::captions());
    assert_eq!(uncached.search(&store, "party").unwrap(), first);

    let stats = cached.cache_stats();
    assert_eq!(stats.hit_count, 1);
    assert_eq!(stats.miss_count, 1);
}

#[test]
fn search_before_load_yields_nothing() {
    let store = CorpusStore::default();
    assert!(engine().search(&store, "horse").is_none());
}

#[test]
fn empty_corpus_searches_return_no_frames() {
    let store = loaded_store(Vec::new());
    let outcome = engine().search(&store, "horse").unwrap();
    assert!(outcome.did_search);
    assert!(outcome.frames.is_empty());
}

#[test]
fn fields_outside_the_schema_are_not_searched() {
    let mut raw: serde_json::Value =
        serde_json::from_str(&PayloadBuilder::new(vec![caption(1, 1, 1000, "hello")]).json()).unwrap();
    raw["fieldIds"]["notes"] = json!(1);
    raw["averageFieldLength"] = json!([1.0, 1.0]);
    raw["fieldLength"]["0"] = json!([1, 1]);
    raw["index"]
        .as_array_mut()
        .unwrap()
        .push(json!(["secret", {"1": {"0": 1}}]));

    let mut store = CorpusStore::default();
    store.load_json(&raw.to_string()).unwrap();

    let mut engine = engine();
    assert!(engine.search(&store, "secret").unwrap().frames.is_empty());
    assert_eq!(engine.search(&store, "hello").unwrap().frames.len(), 1);
}

#[test]
fn early_schema_payloads_are_searchable() {
    let mut store = CorpusStore::default();
    store
        .load_json(&PayloadBuilder::new(synthetic_captions(50)).early_schema().json())
        .unwrap();
    let outcome = engine().search(&store, "diane").unwrap();
    assert!(!outcome.frames.is_empty());
    assert!(outcome.frames.iter().all(|f| f.still_path.is_some()));
}

#[test]
fn symbols_inside_indexed_terms_are_searchable() {
    // Laid out by hand, the way the index builder writes "That's $100" and "C++ rules"
    let raw = json!({
        "documentCount": 2,
        "nextId": 2,
        "documentIds": {"0": 1000, "1": 2000},
        "fieldIds": {"text": 0},
        "fieldLength": {"0": [3], "1": [2]},
        "averageFieldLength": [2.5],
        "storedFields": {
            "0": {"html": "That's $100", "season": 1, "episode": 1},
            "1": {"html": "<i>C++</i> rules", "season": 1, "episode": 1}
        },
        "dirtCount": 0,
        "index": [
            ["$100", {"0": {"0": 1}}],
            ["c++", {"0": {"1": 1}}],
            ["rules", {"0": {"1": 1}}],
            ["s", {"0": {"0": 1}}],
            ["that", {"0": {"0": 1}}]
        ],
        "serializationVersion": 2
    });
    let mut store = CorpusStore::default();
    store.load_json(&raw.to_string()).unwrap();
    let mut engine = engine();

    let dollars = engine.search(&store, "$100").unwrap();
    assert!(dollars.did_search);
    assert_eq!(keys(&dollars), vec![FrameKey::new(1, 1, 1000)]);

    assert_eq!(keys(&engine.search(&store, "C++ rules").unwrap()), vec![FrameKey::new(1, 1, 2000)]);
    assert!(engine.search(&store, "100").unwrap().frames.is_empty());
}

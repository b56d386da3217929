//! Integration tests for the ingest → history → classify path.

use ticker_core::{Direction, Instrument, InstrumentSet, PriceField, DEFAULT_HISTORY_CAPACITY};
use ticker_feed::{DirectionClassifier, HistoryStore, QuoteIngestor};

fn eurusd() -> Instrument {
    Instrument::new("EURUSD").unwrap()
}

/// Feed a payload through ingest and, if accepted, into the stores.
fn apply(
    ingestor: &QuoteIngestor,
    store: &mut HistoryStore,
    classifier: &mut DirectionClassifier,
    raw: &str,
) -> Option<(Direction, Direction)> {
    let quote = ingestor.ingest(raw).ok()??;
    store.append(&quote.instrument, quote.mid_price()).unwrap();
    let bid = classifier.classify(&quote.instrument, PriceField::Bid, quote.bid);
    let ask = classifier.classify(&quote.instrument, PriceField::Ask, quote.ask);
    Some((bid, ask))
}

#[test]
fn test_thirty_one_mid_prices_evict_the_first() {
    let mut store = HistoryStore::new(&InstrumentSet::default(), DEFAULT_HISTORY_CAPACITY);
    let mids: Vec<f64> = (0..31).map(|i| 1.08 + i as f64 * 0.0001).collect();

    for mid in &mids {
        store.append(&eurusd(), *mid).unwrap();
    }

    let history = store.get(&eurusd()).unwrap().to_vec();
    assert_eq!(history.len(), 30);
    assert!(!history.contains(&mids[0]));
    assert_eq!(history, mids[1..].to_vec());
}

#[test]
fn test_window_equals_trailing_arrivals_for_any_length() {
    for total in [0usize, 1, 2, 29, 30, 31, 59, 60, 61, 200] {
        let mut store = HistoryStore::new(&InstrumentSet::default(), DEFAULT_HISTORY_CAPACITY);
        let values: Vec<f64> = (0..total).map(|i| (i as f64).sin()).collect();
        for v in &values {
            let len = store.append(&eurusd(), *v).unwrap().len();
            assert!(len <= DEFAULT_HISTORY_CAPACITY);
        }
        let keep = total.min(DEFAULT_HISTORY_CAPACITY);
        assert_eq!(
            store.get(&eurusd()).unwrap().to_vec(),
            values[total - keep..].to_vec(),
            "total={total}"
        );
    }
}

#[test]
fn test_bid_up_ask_down_between_consecutive_quotes() {
    let ingestor = QuoteIngestor::new(InstrumentSet::default());
    let mut store = HistoryStore::new(ingestor.instruments(), DEFAULT_HISTORY_CAPACITY);
    let mut classifier = DirectionClassifier::new();

    let first = apply(
        &ingestor,
        &mut store,
        &mut classifier,
        r#"{"symbol":"EURUSD","bid":1.10000,"ask":1.10020,"timestamp":1000}"#,
    );
    assert_eq!(first, Some((Direction::NoBaseline, Direction::NoBaseline)));

    let second = apply(
        &ingestor,
        &mut store,
        &mut classifier,
        r#"{"symbol":"EURUSD","bid":1.10010,"ask":1.10015,"timestamp":1001}"#,
    );
    assert_eq!(second, Some((Direction::Up, Direction::Down)));
}

#[test]
fn test_missing_ask_leaves_state_untouched() {
    let ingestor = QuoteIngestor::new(InstrumentSet::default());
    let mut store = HistoryStore::new(ingestor.instruments(), DEFAULT_HISTORY_CAPACITY);
    let mut classifier = DirectionClassifier::new();

    apply(
        &ingestor,
        &mut store,
        &mut classifier,
        r#"{"symbol":"EURUSD","bid":1.1,"ask":1.1002,"timestamp":1000}"#,
    );
    let before = store.get(&eurusd()).unwrap().clone();
    let bid_before = classifier.baseline(&eurusd(), PriceField::Bid);

    let err = ingestor
        .ingest(r#"{"symbol":"EURUSD","bid":1.2,"timestamp":1001}"#)
        .unwrap_err();
    assert!(err.is_parse_error());

    assert_eq!(store.get(&eurusd()).unwrap(), &before);
    assert_eq!(classifier.baseline(&eurusd(), PriceField::Bid), bid_before);
}

#[test]
fn test_out_of_order_timestamps_apply_in_arrival_order() {
    let ingestor = QuoteIngestor::new(InstrumentSet::default());
    let mut store = HistoryStore::new(ingestor.instruments(), DEFAULT_HISTORY_CAPACITY);
    let mut classifier = DirectionClassifier::new();

    apply(
        &ingestor,
        &mut store,
        &mut classifier,
        r#"{"symbol":"EURUSD","bid":1.0,"ask":1.0,"timestamp":2000}"#,
    );
    let late = apply(
        &ingestor,
        &mut store,
        &mut classifier,
        r#"{"symbol":"EURUSD","bid":2.0,"ask":2.0,"timestamp":1000}"#,
    );

    assert_eq!(late, Some((Direction::Up, Direction::Up)));
    assert_eq!(store.get(&eurusd()).unwrap().to_vec(), vec![1.0, 2.0]);
}

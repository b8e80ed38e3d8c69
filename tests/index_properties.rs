use std::collections::BTreeMap;

use proptest::prelude::*;
use envindex::{Index, Record};

fn record_samples() -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::vec((-500i64..500, any::<u32>(), any::<u32>()), 0..200)
        .prop_map(|samples| samples.into_iter()
            .map(|(timestamp, temperature, humidity)| Record::new(timestamp, temperature, humidity))
            .collect())
}

fn build(records: &[Record]) -> Index {
    let mut index = Index::new();
    for record in records {
        index.insert(*record).expect("insert succeeds");
    }
    index
}

proptest! {
    #[test]
    fn enumerate_is_strictly_ascending(records in record_samples()) {
        let index = build(&records);
        let enumerated = index.enumerate();
        for pair in enumerated.windows(2) {
            prop_assert!(pair[0].timestamp < pair[1].timestamp, "{:?} before {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn first_insert_wins(records in record_samples()) {
        let index = build(&records);

        let mut expected: BTreeMap<i64, Record> = BTreeMap::new();
        for record in &records {
            expected.entry(record.timestamp).or_insert(*record);
        }

        prop_assert_eq!(index.len(), expected.len());
        prop_assert_eq!(index.enumerate(), expected.values().copied().collect::<Vec<_>>());
        for (timestamp, record) in &expected {
            prop_assert_eq!(index.lookup(*timestamp), Some(record));
        }
    }

    #[test]
    fn content_does_not_depend_on_order(records in record_samples()) {
        let mut unique: BTreeMap<i64, Record> = BTreeMap::new();
        for record in &records {
            unique.entry(record.timestamp).or_insert(*record);
        }
        let forward: Vec<Record> = unique.values().copied().collect();
        let backward: Vec<Record> = forward.iter().rev().copied().collect();

        prop_assert_eq!(build(&forward).enumerate(), build(&backward).enumerate());
    }

    #[test]
    fn missing_keys_are_not_found(records in record_samples(), key in 500i64..1000) {
        let index = build(&records);
        prop_assert!(index.lookup(key).is_none());

        let mut visited = 0usize;
        prop_assert!(index.lookup_traced(key, |_| visited += 1).is_none());
        prop_assert!(visited <= index.height());
        prop_assert_eq!(visited == 0, index.is_empty());
    }

    #[test]
    fn release_is_idempotent(records in record_samples()) {
        let mut index = build(&records);
        index.release();
        prop_assert!(index.enumerate().is_empty());
        index.release();
        prop_assert!(index.enumerate().is_empty());
        prop_assert_eq!(index.len(), 0);
    }
}

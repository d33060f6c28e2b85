use bloomer::BloomFilter;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Key {
    Int(i64),
    Text(String),
    Bytes(Vec<u8>),
}

fn insert(bf: &mut BloomFilter, key: &Key) -> bool {
    match key {
        Key::Int(v) => bf.add(*v),
        Key::Text(s) => bf.add(s),
        Key::Bytes(b) => bf.add(b),
    }
}

fn lookup(bf: &BloomFilter, key: &Key) -> bool {
    match key {
        Key::Int(v) => bf.test(*v),
        Key::Text(s) => bf.test(s),
        Key::Bytes(b) => bf.test(b),
    }
}

proptest! {
    #[test]
    fn test_no_false_negatives(
        keys in proptest::collection::vec(
            prop_oneof![
                any::<i64>().prop_map(Key::Int),
                ".{0,12}".prop_map(Key::Text),
                proptest::collection::vec(any::<u8>(), 0..16).prop_map(Key::Bytes),
            ],
            0..64
        ),
        n in 1u32..500,
        fp in 0.0001f64..0.5,
    ) {
        let mut bf = BloomFilter::new(n as f64, fp).unwrap();

        for key in &keys {
            prop_assert!(insert(&mut bf, key));
            prop_assert!(lookup(&bf, key), "key {:?} missing right after add", key);
        }

        // Later inserts never clear earlier bits
        for key in &keys {
            prop_assert!(lookup(&bf, key), "key {:?} lost", key);
        }
    }

    #[test]
    fn test_encoding_is_stable(keys in proptest::collection::vec(any::<u64>(), 0..32)) {
        let mut bf = BloomFilter::new(50.0, 0.05).unwrap();
        for key in &keys {
            bf.add(*key);
        }

        let first = bf.encode_base64();
        prop_assert_eq!(&first, &bf.encode_base64());
        // 8 header bytes plus m / 64 + 1 eight-byte words
        let bytes = 8 + (bf.m() / 64 + 1) * 8;
        prop_assert_eq!(first.len(), (bytes + 2) / 3 * 4);
    }
}

#[test]
fn test_false_positive_rate_near_target() {
    let target = 0.01;
    let mut bf = BloomFilter::new(1000.0, target).unwrap();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    let mut members = HashSet::new();
    while members.len() < 1000 {
        members.insert(rng.gen::<[u8; 16]>());
    }
    for key in &members {
        bf.add(key);
    }

    let trials = 20_000;
    let mut false_positives = 0;
    let mut tested = 0;
    while tested < trials {
        let key = rng.gen::<[u8; 16]>();
        if members.contains(&key) {
            continue;
        }
        tested += 1;
        if bf.test(&key) {
            false_positives += 1;
        }
    }

    let observed = false_positives as f64 / trials as f64;
    assert!(
        observed < target * 3.0,
        "observed false positive rate {} too far above {}",
        observed,
        target
    );
}

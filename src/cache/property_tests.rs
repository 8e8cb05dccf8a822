//! Property-Based Tests for the Deduplication Cache
//!
//! Uses proptest to verify key-derivation determinism, the capacity bound
//! and hit accounting under arbitrary operation sequences.

use proptest::prelude::*;

use chrono::Utc;

use crate::cache::{Fingerprint, QrCodeCache};
use crate::models::{CreateQrCodeRequest, QrCode};

// == Test Configuration ==
const TEST_MAX_SIZE: usize = 3;
const TEST_TTL_MS: u64 = 60_000;

// == Strategies ==
fn data_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9:/.|-]{1,40}"
}

fn color_strategy() -> impl Strategy<Value = String> {
    "#[0-9a-f]{6}"
}

fn request_strategy() -> impl Strategy<Value = CreateQrCodeRequest> {
    (
        "[a-zA-Z ]{0,20}",
        data_strategy(),
        prop_oneof![Just("url"), Just("text"), Just("email")],
        64u32..=2048,
        color_strategy(),
        color_strategy(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(title, data, content_type, size, fg, bg, include_image, is_dynamic)| {
                CreateQrCodeRequest {
                    title,
                    data,
                    content_type: content_type.to_string(),
                    size,
                    fg_color: fg,
                    bg_color: bg,
                    include_image,
                    is_dynamic,
                }
            },
        )
}

fn record_for(data: &str) -> QrCode {
    let now = Utc::now();
    QrCode {
        id: format!("qr-{data}"),
        user_id: "user-1".to_string(),
        title: "prop".to_string(),
        data: data.to_string(),
        payload: data.to_string(),
        content_type: "text".to_string(),
        size: 300,
        fg_color: "#000000".to_string(),
        bg_color: "#ffffff".to_string(),
        include_image: false,
        is_dynamic: false,
        short_slug: None,
        created_at: now,
        updated_at: now,
    }
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { data: String },
    Get { data: String },
    Has { data: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        data_strategy().prop_map(|data| CacheOp::Set { data }),
        data_strategy().prop_map(|data| CacheOp::Get { data }),
        data_strategy().prop_map(|data| CacheOp::Has { data }),
    ]
}

fn plain_fingerprint(data: &str) -> Fingerprint {
    Fingerprint {
        data: data.to_string(),
        size: 300,
        fg_color: "#000000".to_string(),
        bg_color: "#ffffff".to_string(),
        include_image: false,
        is_dynamic: false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Requests that agree on the artifact-relevant fields always target the
    // same cache slot, regardless of title or content type.
    #[test]
    fn prop_key_ignores_irrelevant_fields(
        req in request_strategy(),
        other_title in "[a-zA-Z ]{0,20}",
        other_content_type in prop_oneof![Just("url"), Just("text"), Just("wifi")],
    ) {
        let mut renamed = req.clone();
        renamed.title = other_title;
        renamed.content_type = other_content_type.to_string();

        prop_assert_eq!(
            Fingerprint::of(&req).canonical_key(),
            Fingerprint::of(&renamed).canonical_key()
        );
    }

    // Changing any artifact-relevant field changes the key.
    #[test]
    fn prop_key_tracks_relevant_fields(req in request_strategy()) {
        let base = Fingerprint::of(&req).canonical_key();

        let mut resized = req.clone();
        resized.size = if req.size == 2048 { 64 } else { req.size + 1 };
        prop_assert_ne!(&base, &Fingerprint::of(&resized).canonical_key());

        let mut flipped = req.clone();
        flipped.is_dynamic = !req.is_dynamic;
        prop_assert_ne!(&base, &Fingerprint::of(&flipped).canonical_key());

        let mut altered = req.clone();
        altered.data.push('x');
        prop_assert_ne!(&base, &Fingerprint::of(&altered).canonical_key());
    }

    // The entry count never exceeds the configured ceiling after any
    // sequence of operations.
    #[test]
    fn prop_capacity_bound_holds(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut cache = QrCodeCache::new(TEST_MAX_SIZE, TEST_TTL_MS).unwrap();

        for op in ops {
            match op {
                CacheOp::Set { data } => {
                    cache.set(&plain_fingerprint(&data), record_for(&data));
                }
                CacheOp::Get { data } => {
                    let _ = cache.get(&plain_fingerprint(&data));
                }
                CacheOp::Has { data } => {
                    let _ = cache.has(&plain_fingerprint(&data));
                }
            }
            prop_assert!(cache.len() <= TEST_MAX_SIZE, "capacity bound violated");
        }
    }

    // Hit accounting: gets increment, probes do not, and total hits reported
    // by stats match the number of successful lookups.
    #[test]
    fn prop_hit_accounting(
        data in data_strategy(),
        gets in 0usize..10,
        probes in 0usize..10,
    ) {
        let mut cache = QrCodeCache::new(TEST_MAX_SIZE, TEST_TTL_MS).unwrap();
        let fp = plain_fingerprint(&data);
        cache.set(&fp, record_for(&data));

        for _ in 0..gets {
            prop_assert!(cache.get(&fp).is_some());
        }
        for _ in 0..probes {
            prop_assert!(cache.has(&fp));
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.entries[0].hits, gets as u64);
    }

    // Stored snapshots round-trip: a get after a set returns the record
    // that was stored under that shape.
    #[test]
    fn prop_set_then_get_roundtrip(data in data_strategy()) {
        let mut cache = QrCodeCache::new(TEST_MAX_SIZE, TEST_TTL_MS).unwrap();
        let fp = plain_fingerprint(&data);
        let stored = record_for(&data);
        cache.set(&fp, stored.clone());

        let retrieved = cache.get(&fp).unwrap();
        prop_assert_eq!(retrieved.id, stored.id);
        prop_assert_eq!(retrieved.payload, stored.payload);
    }
}

//! Property Tests
//!
//! - Profile results equal a brute-force filter over the facts
//! - Repeated profile queries agree
//! - Encoding codes are a bijection onto 0..n
//! - Column summaries stay within the data's range

mod common;

use common::{store, student};
use placement::encoding::EncodingMap;
use placement::facts::FactStore;
use placement::query::query_profile;
use placement::records::Attribute;
use placement::rules::RuleCatalog;
use placement::stats::summarize_column;
use proptest::prelude::*;

prop_compose! {
    fn arb_student(index: usize)(
        cgpa in 0.0f64..10.0,
        iq in 70.0f64..150.0,
        prev in 0.0f64..10.0,
        projects in 0u8..6,
        internship in any::<bool>(),
    ) -> placement::records::StudentRecord {
        student(index)
            .cgpa(cgpa)
            .iq(iq)
            .prev_sem(prev)
            .projects(projects as f64)
            .internship(internship)
            .build()
    }
}

fn arb_students() -> impl Strategy<Value = Vec<placement::records::StudentRecord>> {
    (1usize..25).prop_flat_map(|n| (0..n).map(arb_student).collect::<Vec<_>>())
}

proptest! {
    /// Every rule returns exactly the facts it matches, ascending.
    #[test]
    fn prop_query_equals_filter(records in arb_students()) {
        let records = store(records);
        let facts = FactStore::build(&records).unwrap();
        let base = facts.snapshot();

        for rule in RuleCatalog::standard().rules() {
            let expected: Vec<usize> = base.iter().filter(|f| rule.matches(f)).map(|f| f.index()).collect();
            let matched = query_profile(&base, rule.name()).unwrap();
            prop_assert_eq!(matched.indices, expected);
        }
    }

    /// Two queries on one snapshot return the same match.
    #[test]
    fn prop_query_idempotent(records in arb_students()) {
        let facts = FactStore::build(&store(records)).unwrap();
        let base = facts.snapshot();

        for name in RuleCatalog::standard().names() {
            let first = query_profile(&base, name).unwrap();
            let second = query_profile(&base, name).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    /// Fitted codes are exactly 0..n and decode back to their value.
    #[test]
    fn prop_codes_bijective(values in proptest::collection::vec("[a-z]{1,6}", 1..20)) {
        let map = EncodingMap::from_values(Attribute::InternshipExperience, values.clone());
        let mut codes: Vec<usize> = values.iter().map(|v| map.encode(v).unwrap()).collect();
        for (v, &c) in values.iter().zip(&codes) {
            prop_assert_eq!(map.decode(c), Some(v.as_str()));
        }
        codes.sort();
        codes.dedup();
        prop_assert_eq!(codes, (0..map.len()).collect::<Vec<_>>());
    }

    /// Mean, median and mode lie between min and max; spread is non-negative.
    #[test]
    fn prop_summary_within_range(values in proptest::collection::vec(-1000.0f64..1000.0, 1..50)) {
        let summary = summarize_column(Attribute::Cgpa, &values).unwrap();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        prop_assert_eq!(summary.count, values.len());
        for stat in [summary.mean, summary.median, summary.mode] {
            prop_assert!(stat >= min - 1e-9 && stat <= max + 1e-9);
        }
        prop_assert!(summary.std_dev >= 0.0);
    }
}

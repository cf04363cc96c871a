use bigram_heatmap::{Alphabet, Bucketizer, CountTable};
use proptest::prelude::*;
use proptest::test_runner::Config;
use std::collections::BTreeSet;

fn alphabet_strategy() -> impl Strategy<Value = String> {
    prop::collection::btree_set(any::<char>(), 1..16)
        .prop_map(|set: BTreeSet<char>| set.into_iter().collect())
}

fn text_strategy() -> impl Strategy<Value = String> {
    // Mostly alphabet symbols, with noise that must be ignored
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'c', ' ', '1', '\n', 'ب']), 0..64)
        .prop_map(|chars| chars.into_iter().collect())
}

fn count_all<'a>(alphabet: &Alphabet, texts: impl IntoIterator<Item = &'a String>) -> CountTable {
    let mut table = CountTable::new(alphabet.clone());
    for text in texts {
        table.accumulate_text(text);
    }
    table
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn new_table_has_square_zero_entries(symbols in alphabet_strategy()) {
        let alphabet = Alphabet::new(&symbols).unwrap();
        let n = alphabet.len();
        let table = CountTable::new(alphabet);

        prop_assert_eq!(table.len(), n * n);
        prop_assert_eq!(table.iter().count(), n * n);
        prop_assert!(table.iter().all(|(_, count)| count == 0));
    }

    #[test]
    fn accumulation_is_order_independent(
        texts in prop::collection::vec(text_strategy(), 0..8),
        split in 0usize..8,
    ) {
        let alphabet = Alphabet::new("abc").unwrap();
        let in_order = count_all(&alphabet, &texts);
        let reversed = count_all(&alphabet, texts.iter().rev());

        let split = split.min(texts.len());
        let mut left = count_all(&alphabet, &texts[..split]);
        let right = count_all(&alphabet, &texts[split..]);
        left.merge(&right).unwrap();

        prop_assert_eq!(&in_order, &reversed);
        prop_assert_eq!(&in_order, &left);
    }

    #[test]
    fn accumulation_is_additive(text in text_strategy()) {
        let alphabet = Alphabet::new("abc").unwrap();
        let once = count_all(&alphabet, [&text]);
        let twice = count_all(&alphabet, [&text, &text]);

        for ((key, c1), (_, c2)) in once.iter().zip(twice.iter()) {
            prop_assert_eq!(c1 * 2, c2, "bigram {}", key);
        }
    }

    #[test]
    fn out_of_alphabet_pairs_never_counted(text in text_strategy()) {
        let alphabet = Alphabet::new("ab").unwrap();
        let table = count_all(&alphabet, [&text]);

        let chars: Vec<char> = text.chars().collect();
        let expected = chars
            .windows(2)
            .filter(|w| alphabet.contains(w[0]) && alphabet.contains(w[1]))
            .count() as u64;

        prop_assert_eq!(table.len(), 4);
        prop_assert_eq!(table.total(), expected);
        prop_assert!(table.iter().all(|(key, _)| key.chars().all(|c| alphabet.contains(c))));
    }

    #[test]
    fn classify_is_monotonic(
        buckets in 1usize..20,
        cutoff in prop::option::of(0u64..5000),
        max in 1u64..10_000_000,
        a in 0u64..10_000_000,
        b in 0u64..10_000_000,
    ) {
        let bucketizer = Bucketizer::new(buckets, cutoff, max).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        prop_assert!(bucketizer.classify(lo) <= bucketizer.classify(hi));
        prop_assert!(bucketizer.classify(hi) < buckets);
    }

    #[test]
    fn max_count_lands_in_top_bucket(
        buckets in 1usize..20,
        cutoff in prop::option::of(0u64..5000),
        max in 1u64..u32::MAX as u64,
    ) {
        let bucketizer = Bucketizer::new(buckets, cutoff, max).unwrap();
        if cutoff.map_or(true, |c| c <= max) {
            prop_assert_eq!(bucketizer.classify(max), buckets - 1);
        }
    }

    #[test]
    fn counts_below_cutoff_land_in_bucket_zero(
        cutoff in 1u64..100_000,
        max in 1u64..10_000_000,
        count in 0u64..100_000,
    ) {
        let bucketizer = Bucketizer::new(10, Some(cutoff), max).unwrap();
        if count < cutoff {
            prop_assert_eq!(bucketizer.classify(count), 0);
        }
    }

    #[test]
    fn classified_counts_fall_inside_displayed_range(
        buckets in 1usize..16,
        cutoff in prop::option::of(0u64..5000),
        max in 1u64..5_000_000,
        samples in prop::collection::vec(any::<prop::sample::Index>(), 1..64),
    ) {
        let bucketizer = Bucketizer::new(buckets, cutoff, max).unwrap();
        let zero = bucketizer.zero_range();
        let ranges = bucketizer.boundaries();
        prop_assert_eq!(ranges.len(), buckets - 1);

        let mut counts: Vec<u64> = samples
            .iter()
            .map(|i| i.index(max as usize + 1) as u64)
            .collect();
        counts.extend([0, max]);

        for count in counts {
            let bucket = bucketizer.classify(count);
            let range = if bucket == 0 { zero } else { ranges[bucket - 1] };
            prop_assert_eq!(range.bucket, bucket);
            prop_assert!(
                range.contains(count),
                "count {} in bucket {} outside {:?}",
                count,
                bucket,
                range
            );
        }
    }
}

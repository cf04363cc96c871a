//! Logarithmic bucketing of bigram counts
//!
//! Counts span several orders of magnitude, so they are classified on a
//! natural-log scale into a small number of ordinal buckets, each bound to
//! one color. Bucket 0 additionally absorbs every count below an optional
//! cutoff.
//!
//! Classification and the legend ranges come from the same [`Bucketizer`],
//! so a count reported in bucket `b` always lies inside the range displayed
//! for `b`.

use crate::error::{HeatmapError, Result};

/// Number of buckets used when none is configured
pub const DEFAULT_BUCKETS: usize = 10;

/// Counts below this land in bucket 0 unless the cutoff is disabled
pub const DEFAULT_CUTOFF: u64 = 1000;

/// Inclusive range of counts belonging to one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketRange {
    pub bucket: usize,
    pub min: u64,
    pub max: u64,
}

impl BucketRange {
    /// True when no count can be classified into this bucket
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, count: u64) -> bool {
        self.min <= count && count <= self.max
    }
}

/// Maps counts to buckets for one report
#[derive(Debug, Clone, PartialEq)]
pub struct Bucketizer {
    num_buckets: usize,
    cutoff: Option<u64>,
    max_count: u64,
    width: f64,
}

impl Bucketizer {
    /// `width = (ln(max_count) + 1) / num_buckets`, computed once from the
    /// table-wide maximum.
    pub fn new(num_buckets: usize, cutoff: Option<u64>, max_count: u64) -> Result<Self> {
        if num_buckets == 0 {
            return Err(HeatmapError::InvalidConfig(
                "number of buckets must be at least 1".to_string(),
            ));
        }
        if max_count == 0 {
            return Err(HeatmapError::InvalidConfig(
                "maximum count is 0; nothing to bucket on a log scale".to_string(),
            ));
        }

        let width = ((max_count as f64).ln() + 1.0) / num_buckets as f64;

        Ok(Self {
            num_buckets,
            // A zero cutoff excludes nothing
            cutoff: cutoff.filter(|&c| c > 0),
            max_count,
            width,
        })
    }

    pub fn num_buckets(&self) -> usize {
        self.num_buckets
    }

    pub fn cutoff(&self) -> Option<u64> {
        self.cutoff
    }

    pub fn max_count(&self) -> u64 {
        self.max_count
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    fn top(&self) -> usize {
        self.num_buckets - 1
    }

    /// Bucket of a count, always in `0..num_buckets`
    pub fn classify(&self, count: u64) -> usize {
        if let Some(cutoff) = self.cutoff {
            if count < cutoff {
                return 0;
            }
        }

        // The maximum maps to the top bucket regardless of rounding
        if count >= self.max_count {
            return self.top();
        }

        let bucket = ((count as f64 + 1.0).ln() / self.width).floor();
        (bucket as usize).min(self.top())
    }

    /// Smallest count classified into bucket `b` or above
    ///
    /// Returns `max_count + 1` when no count reaches `b`.
    fn lower_bound(&self, b: usize) -> u64 {
        if b == 0 {
            return 0;
        }
        if b > self.top() {
            return self.max_count.saturating_add(1);
        }

        // Inverse of the log formula; floating point only gets us close
        let seed = ((b as f64 * self.width).exp().floor() as u64).saturating_sub(1);
        let mut count = seed.max(self.cutoff.unwrap_or(0)).min(self.max_count);

        while count > 0 && self.classify(count - 1) >= b {
            count -= 1;
        }
        while count <= self.max_count && self.classify(count) < b {
            count += 1;
        }

        count
    }

    /// Count range of bucket 0
    pub fn zero_range(&self) -> BucketRange {
        BucketRange {
            bucket: 0,
            min: 0,
            max: self.lower_bound(1).saturating_sub(1).min(self.max_count),
        }
    }

    /// Count ranges of buckets `1..num_buckets`, for the legend
    ///
    /// Adjacent ranges do not overlap. A bucket that no count in
    /// `0..=max_count` reaches is returned as an empty range.
    pub fn boundaries(&self) -> Vec<BucketRange> {
        (1..self.num_buckets)
            .map(|b| {
                let min = self.lower_bound(b);
                let next = self.lower_bound(b + 1);
                BucketRange {
                    bucket: b,
                    min,
                    max: next.saturating_sub(1).min(self.max_count),
                }
            })
            .collect()
    }

    /// Range of a bucket, including bucket 0
    pub fn range(&self, bucket: usize) -> Option<BucketRange> {
        match bucket {
            0 => Some(self.zero_range()),
            b if b < self.num_buckets => self.boundaries().into_iter().nth(b - 1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_buckets() {
        assert!(matches!(
            Bucketizer::new(0, None, 100),
            Err(HeatmapError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_zero_max() {
        assert!(Bucketizer::new(10, None, 0).is_err());
    }

    #[test]
    fn test_width() {
        let b = Bucketizer::new(10, None, 1000).unwrap();
        let expected = ((1000f64).ln() + 1.0) / 10.0;
        assert!((b.width() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_classify_below_cutoff() {
        let b = Bucketizer::new(10, Some(1000), 1_000_000).unwrap();
        assert_eq!(b.classify(0), 0);
        assert_eq!(b.classify(999), 0);
        assert!(b.classify(1000) >= 1);
    }

    #[test]
    fn test_classify_max_is_top_bucket() {
        for max in [1u64, 2, 10, 100, 8103, 1_000_000, u32::MAX as u64] {
            let b = Bucketizer::new(10, None, max).unwrap();
            assert_eq!(b.classify(max), 9, "max {}", max);
        }
    }

    #[test]
    fn test_classify_matches_log_formula() {
        let b = Bucketizer::new(10, None, 1_000_000).unwrap();
        let width = b.width();
        for count in [0u64, 1, 5, 42, 1000, 65_000, 999_999] {
            let expected = ((count as f64 + 1.0).ln() / width).floor() as usize;
            assert_eq!(b.classify(count), expected.min(9), "count {}", count);
        }
    }

    #[test]
    fn test_zero_cutoff_is_disabled() {
        let b = Bucketizer::new(10, Some(0), 1000).unwrap();
        assert_eq!(b.cutoff(), None);
    }

    #[test]
    fn test_single_bucket() {
        let b = Bucketizer::new(1, None, 5000).unwrap();
        assert!((b.width() - ((5000f64).ln() + 1.0)).abs() < 1e-12);
        for count in [0u64, 1, 100, 4999, 5000] {
            assert_eq!(b.classify(count), 0);
        }
        assert!(b.boundaries().is_empty());
        assert_eq!(b.zero_range(), BucketRange { bucket: 0, min: 0, max: 5000 });
    }

    #[test]
    fn test_boundaries_cover_every_count() {
        let b = Bucketizer::new(10, Some(50), 3000).unwrap();
        let ranges = b.boundaries();
        assert_eq!(ranges.len(), 9);

        for count in 0..=3000 {
            let bucket = b.classify(count);
            let range = b.range(bucket).unwrap();
            assert!(
                range.contains(count),
                "count {} in bucket {} outside {:?}",
                count,
                bucket,
                range
            );
        }
    }

    #[test]
    fn test_boundaries_are_ordered_and_disjoint() {
        let b = Bucketizer::new(10, None, 250_000).unwrap();
        let ranges = b.boundaries();

        let mut previous_max = b.zero_range().max;
        for range in ranges.iter().filter(|r| !r.is_empty()) {
            assert_eq!(range.min, previous_max + 1);
            previous_max = range.max;
        }
        assert_eq!(previous_max, 250_000);
        assert_eq!(ranges.last().unwrap().max, 250_000);
    }

    #[test]
    fn test_boundaries_follow_inverse_formula() {
        let b = Bucketizer::new(10, None, 1_000_000).unwrap();
        for range in b.boundaries() {
            let inverse = (range.bucket as f64 * b.width()).exp();
            // Within one of floor(base^(b*width)) - 1
            let seed = inverse.floor() as u64 - 1;
            assert!(range.min >= seed && range.min <= seed + 1, "{:?}", range);
        }
    }

    #[test]
    fn test_cutoff_empties_low_buckets() {
        let b = Bucketizer::new(10, Some(1000), 2_000_000).unwrap();
        let ranges = b.boundaries();

        assert!(ranges
            .iter()
            .filter(|r| !r.is_empty())
            .all(|r| r.min >= 1000));
        assert_eq!(b.zero_range().max, 999);
    }

    #[test]
    fn test_cutoff_above_max() {
        let b = Bucketizer::new(10, Some(1000), 10).unwrap();
        for count in 0..=10 {
            assert_eq!(b.classify(count), 0);
        }
        assert!(b.boundaries().iter().all(|r| r.is_empty()));
        assert_eq!(b.zero_range().max, 10);
    }

    #[test]
    fn test_range_out_of_bounds() {
        let b = Bucketizer::new(3, None, 100).unwrap();
        assert!(b.range(2).is_some());
        assert!(b.range(3).is_none());
    }
}

// File: crates/popularity-core/src/index.rs
// Summary: Point index: left-biased nearest-date lookup by pixel position.

use chrono::NaiveDate;

use crate::scale::{day_key, DayKey, TimeScale};

/// Returned by [`PointIndex::from_sorted`] when dates go backwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotSorted {
    /// Position of the first record earlier than its predecessor.
    pub at: usize,
}

/// Dates of a record sequence in ascending order, with the permutation back to record indices.
///
/// Lookups never compare distances: the record at the left-biased insertion point wins,
/// i.e. a cursor between two records resolves to the right-hand one.
#[derive(Clone, Debug, Default)]
pub struct PointIndex {
    keys: Vec<DayKey>,
    /// `order[pos]` is the record index of the `pos`-th smallest date. Empty when identity.
    order: Vec<usize>,
}

impl PointIndex {
    /// Index a sequence that is already ascending by date (the predictions feed).
    pub fn from_sorted<I>(dates: I) -> Result<Self, NotSorted>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let keys: Vec<DayKey> = dates.into_iter().map(day_key).collect();
        if let Some(at) = keys.windows(2).position(|w| w[1] < w[0]) {
            return Err(NotSorted { at: at + 1 });
        }
        Ok(Self { keys, order: Vec::new() })
    }

    /// Index a sequence in arbitrary order (the polls feed). Ties keep source order.
    pub fn from_unsorted<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut pairs: Vec<(DayKey, usize)> =
            dates.into_iter().enumerate().map(|(i, d)| (day_key(d), i)).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (keys, order) = pairs.into_iter().unzip();
        Self { keys, order }
    }

    pub fn len(&self) -> usize { self.keys.len() }

    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    /// Record index stored at sorted position `pos`.
    pub fn record_at(&self, pos: usize) -> Option<usize> {
        if pos >= self.keys.len() {
            return None;
        }
        Some(if self.order.is_empty() { pos } else { self.order[pos] })
    }

    /// Raw left bisection: first sorted position whose date is not before `key`.
    /// Equals `len()` when `key` is past the last date.
    pub fn insertion_point(&self, key: DayKey) -> usize {
        self.keys.partition_point(|&k| k < key)
    }

    /// Record at the insertion point for `key`, clamped to the last record.
    pub fn lookup_key(&self, key: DayKey) -> Option<usize> {
        if self.keys.is_empty() {
            return None;
        }
        let pos = self.insertion_point(key).min(self.keys.len() - 1);
        self.record_at(pos)
    }

    pub fn lookup_date(&self, date: NaiveDate) -> Option<usize> {
        self.lookup_key(day_key(date))
    }

    /// Left bisection in pixel space: first sorted position whose projected x is not left of `px`.
    /// Comparing projections keeps a cursor sitting exactly on a record's pixel on that record,
    /// which a round trip through the inverse scale does not guarantee.
    pub fn insertion_point_px(&self, scale: &TimeScale, px: f32) -> usize {
        self.keys.partition_point(|&k| scale.key_to_px(k) < px)
    }

    /// Record at [`insertion_point_px`](Self::insertion_point_px), clamped to the last record.
    pub fn lookup_px(&self, scale: &TimeScale, px: f32) -> Option<usize> {
        if self.keys.is_empty() {
            return None;
        }
        let pos = self.insertion_point_px(scale, px).min(self.keys.len() - 1);
        self.record_at(pos)
    }

    /// Sorted positions whose dates lie in `[lo, hi]`.
    pub fn range_between(&self, lo: DayKey, hi: DayKey) -> std::ops::Range<usize> {
        let start = self.keys.partition_point(|&k| k < lo);
        let end = self.keys.partition_point(|&k| k <= hi);
        start..end.max(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn cursor_between_two_dates_resolves_right() {
        let ix = PointIndex::from_sorted([d(2020, 1, 1), d(2020, 1, 10)]).unwrap();
        let between = day_key(d(2020, 1, 2));
        assert_eq!(ix.lookup_key(between), Some(1));
    }

    #[test]
    fn past_last_is_raw_len_but_clamped_lookup() {
        let ix = PointIndex::from_sorted([d(2020, 1, 1), d(2020, 1, 10)]).unwrap();
        let after = day_key(d(2021, 1, 1));
        assert_eq!(ix.insertion_point(after), 2);
        assert_eq!(ix.lookup_key(after), Some(1));
    }

    #[test]
    fn unsorted_dates_rejected_with_position() {
        let err = PointIndex::from_sorted([d(2020, 1, 2), d(2020, 1, 3), d(2020, 1, 1)]).unwrap_err();
        assert_eq!(err, NotSorted { at: 2 });
    }

    #[test]
    fn unsorted_index_maps_back_to_source_order() {
        let ix = PointIndex::from_unsorted([d(2020, 3, 1), d(2020, 1, 1), d(2020, 2, 1)]);
        assert_eq!(ix.record_at(0), Some(1));
        assert_eq!(ix.record_at(1), Some(2));
        assert_eq!(ix.record_at(2), Some(0));
        let r = ix.range_between(day_key(d(2020, 1, 15)), day_key(d(2020, 3, 1)));
        assert_eq!(r, 1..3);
    }

    #[test]
    fn cursor_on_a_daily_record_pixel_finds_that_record() {
        let scale = TimeScale::new(crate::types::DateDomain::fixed(), 0.0, 710.0);
        let start = d(2017, 5, 1);
        let dates: Vec<NaiveDate> = (0..1827).map(|i| start + chrono::Days::new(i)).collect();
        let ix = PointIndex::from_sorted(dates.iter().copied()).unwrap();
        let missed: Vec<usize> =
            (0..dates.len()).filter(|&i| ix.lookup_px(&scale, scale.to_px(dates[i])) != Some(i)).collect();
        assert!(missed.is_empty(), "{} records missed, first {:?}", missed.len(), &missed[..missed.len().min(5)]);
    }

    #[test]
    fn empty_index_has_no_lookup() {
        let ix = PointIndex::from_sorted(std::iter::empty::<NaiveDate>()).unwrap();
        assert_eq!(ix.lookup_key(0.0), None);
    }
}

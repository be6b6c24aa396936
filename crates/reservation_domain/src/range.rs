use chrono::NaiveDate;

use crate::Error;

/// Half-open range of calendar dates, `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a range without checking the order of its bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Builds a range, rejecting any `end` that is not strictly after `start`.
    pub fn validated(start: NaiveDate, end: NaiveDate) -> Result<Self, Error> {
        if end > start {
            Ok(Self { start, end })
        } else {
            Err(Error::InvalidDateRange { start, end })
        }
    }

    /// Ranges that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..3650).prop_map(|days| date("2020-01-01") + chrono::Duration::days(days))
    }

    #[test]
    fn test_overlapping_ranges() {
        let a = DateRange::new(date("2024-01-01"), date("2024-01-10"));
        let b = DateRange::new(date("2024-01-05"), date("2024-01-15"));

        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        let a = DateRange::new(date("2024-01-01"), date("2024-01-10"));
        let c = DateRange::new(date("2024-01-10"), date("2024-01-20"));

        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_validated_rejects_same_day() {
        let day = date("2024-03-01");

        assert_eq!(
            DateRange::validated(day, day),
            Err(Error::InvalidDateRange {
                start: day,
                end: day
            })
        );
    }

    proptest! {
        #[test]
        fn test_overlap_is_symmetric(a in any_date(), b in any_date(), c in any_date(), d in any_date()) {
            let x = DateRange::new(a, b);
            let y = DateRange::new(c, d);
            prop_assert_eq!(x.overlaps(&y), y.overlaps(&x));
        }

        #[test]
        fn test_validated_accepts_only_forward_ranges(start in any_date(), end in any_date()) {
            prop_assert_eq!(DateRange::validated(start, end).is_ok(), end > start);
        }

        #[test]
        fn test_valid_range_overlaps_itself(start in any_date(), len in 1i64..60) {
            let range = DateRange::new(start, start + chrono::Duration::days(len));
            prop_assert!(range.overlaps(&range));
        }
    }
}

//! Derived values and the sentinels that replace division by zero.
//!
//! Every ratio column in the finalized tables is a [`Metric`]. A zero
//! denominator never produces `NaN` or infinity: it becomes either
//! [`Metric::Perfect`] (KDA-like ratios where the numerator is positive) or
//! [`Metric::NotApplicable`] (nothing to measure).

use chrono::Duration;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Value(f64),
    Perfect,
    NotApplicable,
}

impl Metric {
    /// `num / den`, or `NotApplicable` when `den` is zero.
    pub fn ratio(num: f64, den: f64) -> Self {
        if den == 0.0 {
            Metric::NotApplicable
        } else {
            Metric::Value(num / den)
        }
    }

    /// Like [`Metric::ratio`] but a positive numerator over zero is `Perfect`.
    pub fn ratio_or_perfect(num: f64, den: f64) -> Self {
        if den != 0.0 {
            Metric::Value(num / den)
        } else if num > 0.0 {
            Metric::Perfect
        } else {
            Metric::NotApplicable
        }
    }

    pub fn kda(kills: i64, deaths: i64, assists: i64) -> Self {
        Self::ratio_or_perfect((kills + assists) as f64, deaths as f64)
    }

    /// `total * 60 / seconds`.
    pub fn per_minute(total: f64, seconds: i64) -> Self {
        Self::ratio(total * 60.0, seconds as f64)
    }

    pub fn round_to(self, decimals: i32) -> Self {
        match self {
            Metric::Value(v) => {
                let factor = 10f64.powi(decimals);
                Metric::Value((v * factor).round() / factor)
            }
            other => other,
        }
    }

    /// Total order used for sorting: `NotApplicable < Value < Perfect`.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        fn tier(m: &Metric) -> u8 {
            match m {
                Metric::NotApplicable => 0,
                Metric::Value(_) => 1,
                Metric::Perfect => 2,
            }
        }
        tier(self).cmp(&tier(other)).then_with(|| match (self, other) {
            (Metric::Value(a), Metric::Value(b)) => a.total_cmp(b),
            _ => Ordering::Equal,
        })
    }

    pub fn fixed(&self, decimals: usize) -> String {
        match self {
            Metric::Value(v) => format!("{:.*}", decimals, v),
            Metric::Perfect => "Perfect".to_string(),
            Metric::NotApplicable => String::new(),
        }
    }

    pub fn percent(&self) -> String {
        match self {
            Metric::Value(v) => format_percent(*v),
            Metric::Perfect => "Perfect".to_string(),
            Metric::NotApplicable => String::new(),
        }
    }

    /// Whole-number rendering, truncating like an integer cast.
    pub fn whole(&self) -> String {
        match self {
            Metric::Value(v) => format!("{}", v.trunc() as i64),
            other => other.fixed(0),
        }
    }
}

pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

/// Mean of a list, `NotApplicable` when empty.
pub fn mean(values: &[i64]) -> Metric {
    Metric::ratio(values.iter().sum::<i64>() as f64, values.len() as f64)
}

/// Average duration of `total_seconds` spread over `count` games.
pub fn average_duration(total_seconds: i64, count: u32) -> Option<Duration> {
    if count == 0 {
        return None;
    }
    let millis = (total_seconds as f64 * 1000.0 / count as f64).round() as i64;
    Some(Duration::milliseconds(millis))
}

/// `HH:MM:SS`, fractional seconds dropped.
pub fn format_duration(duration: &Duration) -> String {
    let total = duration.num_seconds();
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

pub fn format_optional_duration(duration: &Option<Duration>) -> String {
    duration.as_ref().map(format_duration).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5, 0, 5, Metric::Perfect)]
    #[case(0, 0, 0, Metric::NotApplicable)]
    #[case(7, 2, 7, Metric::Value(7.0))]
    #[case(0, 4, 0, Metric::Value(0.0))]
    fn kda_handles_zero_deaths(
        #[case] kills: i64,
        #[case] deaths: i64,
        #[case] assists: i64,
        #[case] expected: Metric,
    ) {
        assert_eq!(Metric::kda(kills, deaths, assists), expected);
    }

    #[test]
    fn ratio_never_divides_by_zero() {
        assert_eq!(Metric::ratio(3.0, 0.0), Metric::NotApplicable);
        assert_eq!(Metric::ratio(0.0, 0.0), Metric::NotApplicable);
        assert_eq!(Metric::ratio(1.0, 4.0), Metric::Value(0.25));
    }

    #[test]
    fn per_minute_scales_seconds() {
        assert_eq!(Metric::per_minute(300.0, 1800), Metric::Value(10.0));
        assert_eq!(Metric::per_minute(300.0, 0), Metric::NotApplicable);
    }

    #[test]
    fn rank_orders_sentinels_around_values() {
        let mut metrics = vec![
            Metric::Value(3.5),
            Metric::Perfect,
            Metric::NotApplicable,
            Metric::Value(1.0),
        ];
        metrics.sort_by(|a, b| a.rank_cmp(b));
        assert_eq!(
            metrics,
            vec![
                Metric::NotApplicable,
                Metric::Value(1.0),
                Metric::Value(3.5),
                Metric::Perfect,
            ]
        );
    }

    #[test]
    fn renders_blank_for_not_applicable() {
        assert_eq!(Metric::NotApplicable.percent(), "");
        assert_eq!(Metric::NotApplicable.fixed(2), "");
        assert_eq!(Metric::Perfect.fixed(1), "Perfect");
        assert_eq!(Metric::Value(0.666).percent(), "67%");
        assert_eq!(Metric::Value(2.456).fixed(2), "2.46");
        assert_eq!(Metric::Value(-41.9).whole(), "-41");
    }

    #[test]
    fn rounds_values_only() {
        assert_eq!(Metric::Value(2.36).round_to(1), Metric::Value(2.4));
        assert_eq!(Metric::Perfect.round_to(1), Metric::Perfect);
    }

    #[test]
    fn mean_of_empty_list_is_not_applicable() {
        assert_eq!(mean(&[]), Metric::NotApplicable);
        assert_eq!(mean(&[2, 4, 9]), Metric::Value(5.0));
    }

    #[test]
    fn formats_durations_as_clock_time() {
        let avg = average_duration(3 * 1865, 3).unwrap();
        assert_eq!(format_duration(&avg), "00:31:05");
        assert_eq!(format_duration(&Duration::seconds(3725)), "01:02:05");
        assert_eq!(average_duration(100, 0), None);
        assert_eq!(format_optional_duration(&None), "");
    }
}

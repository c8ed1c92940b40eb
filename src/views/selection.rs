use chrono::NaiveDate;

/// The day a dashboard is focused on.
///
/// `requested` is what the user asked for; resolution falls back to the most
/// recent available day when nothing was asked for or the requested day has
/// disappeared from the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaySelection {
    pub requested: Option<NaiveDate>,
}

impl DaySelection {
    pub fn new(requested: Option<NaiveDate>) -> Self {
        Self { requested }
    }

    /// `days` may be in any order.
    pub fn resolve(&self, days: &[NaiveDate]) -> Option<NaiveDate> {
        match self.requested {
            Some(day) if days.contains(&day) => Some(day),
            _ => days.iter().max().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    #[test]
    fn test_defaults_to_most_recent() {
        assert_eq!(DaySelection::default().resolve(&[d(3), d(9), d(5)]), Some(d(9)));
    }

    #[test]
    fn test_keeps_valid_request() {
        assert_eq!(DaySelection::new(Some(d(5))).resolve(&[d(3), d(9), d(5)]), Some(d(5)));
    }

    #[test]
    fn test_vanished_day_falls_back() {
        assert_eq!(DaySelection::new(Some(d(4))).resolve(&[d(3), d(9)]), Some(d(9)));
    }

    #[test]
    fn test_no_days() {
        assert_eq!(DaySelection::new(Some(d(4))).resolve(&[]), None);
    }
}

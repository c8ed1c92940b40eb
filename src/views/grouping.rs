use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{day_label, meal::DailyMeal};

/// Records bucketed by calendar day. Keys are real dates, so iteration is
/// chronological rather than lexicographic on the display label.
pub fn group_by_day<T, F>(records: &[T], day_of: F) -> BTreeMap<NaiveDate, Vec<&T>>
where
    F: Fn(&T) -> NaiveDate,
{
    let mut buckets: BTreeMap<NaiveDate, Vec<&T>> = BTreeMap::new();
    for record in records {
        buckets.entry(day_of(record)).or_default().push(record);
    }
    buckets
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub label: String,
    pub value: f64,
}

fn day_total(date: NaiveDate, value: f64) -> DayTotal {
    DayTotal {
        date,
        label: day_label(date),
        value,
    }
}

/// Per-day sum of a numeric field, oldest day first.
pub fn daily_sums<T, D, V>(records: &[T], day_of: D, value_of: V) -> Vec<DayTotal>
where
    D: Fn(&T) -> NaiveDate,
    V: Fn(&T) -> f64,
{
    group_by_day(records, day_of)
        .into_iter()
        .map(|(date, bucket)| day_total(date, bucket.iter().map(|&r| value_of(r)).sum()))
        .collect()
}

/// Per-day mean of a numeric field, oldest day first.
pub fn daily_averages<T, D, V>(records: &[T], day_of: D, value_of: V) -> Vec<DayTotal>
where
    D: Fn(&T) -> NaiveDate,
    V: Fn(&T) -> f64,
{
    group_by_day(records, day_of)
        .into_iter()
        .map(|(date, bucket)| {
            let sum: f64 = bucket.iter().map(|&r| value_of(r)).sum();
            day_total(date, sum / bucket.len() as f64)
        })
        .collect()
}

/// Most recent day first.
pub fn newest_first(mut totals: Vec<DayTotal>) -> Vec<DayTotal> {
    totals.reverse();
    totals
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishShare {
    pub food_name: String,
    pub calories: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBreakdown {
    pub date: NaiveDate,
    pub label: String,
    pub total_calories: f64,
    pub dishes: Vec<DishShare>,
}

/// Calories per dish on one day. Dishes eaten more than once are merged,
/// in order of first appearance.
pub fn meal_breakdown(meals: &[DailyMeal], date: NaiveDate) -> DayBreakdown {
    let mut dishes: Vec<DishShare> = Vec::new();
    for meal in meals.iter().filter(|m| m.recorded_at.date() == date) {
        match dishes.iter_mut().find(|d| d.food_name == meal.food_name) {
            Some(dish) => dish.calories += meal.calories,
            None => dishes.push(DishShare {
                food_name: meal.food_name.clone(),
                calories: meal.calories,
                percent: 0.0,
            }),
        }
    }

    let total: f64 = dishes.iter().map(|d| d.calories).sum();
    if total > 0.0 {
        for dish in &mut dishes {
            dish.percent = dish.calories / total * 100.0;
        }
    }

    DayBreakdown {
        date,
        label: day_label(date),
        total_calories: total,
        dishes,
    }
}

pub fn meal_daily_totals(meals: &[DailyMeal]) -> Vec<DayTotal> {
    daily_sums(meals, |m| m.recorded_at.date(), |m| m.calories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_timestamp;

    fn meal(name: &str, calories: f64, at: &str) -> DailyMeal {
        DailyMeal {
            id: None,
            food_name: name.into(),
            calories,
            recorded_at: parse_timestamp(at).unwrap(),
        }
    }

    fn sample() -> Vec<DailyMeal> {
        vec![
            meal("Phở", 450.0, "2025-09-21T07:30:00"),
            meal("Cơm tấm", 620.0, "2025-09-21T12:00:00"),
            meal("Phở", 430.0, "2025-09-21T19:00:00"),
            meal("Bánh mì", 350.0, "2025-09-09T07:00:00"),
            meal("Salad", 180.0, "2025-10-01"),
        ]
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_sorted_by_date_not_label() {
        // "01/10/2025" < "09/09/2025" < "21/09/2025" as strings.
        let totals = meal_daily_totals(&sample());
        let dates: Vec<NaiveDate> = totals.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![date(2025, 9, 9), date(2025, 9, 21), date(2025, 10, 1)]);

        let newest = newest_first(totals);
        assert_eq!(newest[0].date, date(2025, 10, 1));
        assert_eq!(newest[0].label, "01/10/2025");
    }

    #[test]
    fn test_daily_totals_sum_to_grand_total() {
        let meals = sample();
        let totals = meal_daily_totals(&meals);
        let grand: f64 = meals.iter().map(|m| m.calories).sum();
        let by_day: f64 = totals.iter().map(|t| t.value).sum();
        assert_eq!(grand, by_day);
    }

    #[test]
    fn test_breakdown_matches_day_total() {
        let meals = sample();
        let totals = meal_daily_totals(&meals);

        for total in &totals {
            let breakdown = meal_breakdown(&meals, total.date);
            let dish_sum: f64 = breakdown.dishes.iter().map(|d| d.calories).sum();
            assert_eq!(dish_sum, total.value);
            assert_eq!(breakdown.total_calories, total.value);

            let percent: f64 = breakdown.dishes.iter().map(|d| d.percent).sum();
            assert!((percent - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_breakdown_merges_repeated_dish() {
        let breakdown = meal_breakdown(&sample(), date(2025, 9, 21));
        let names: Vec<&str> = breakdown.dishes.iter().map(|d| d.food_name.as_str()).collect();
        assert_eq!(names, vec!["Phở", "Cơm tấm"]);
        assert_eq!(breakdown.dishes[0].calories, 880.0);
    }

    #[test]
    fn test_daily_average() {
        let values = [(date(2025, 9, 1), 2.0), (date(2025, 9, 1), 4.0), (date(2025, 9, 2), 5.0)];
        let avgs = daily_averages(&values, |v| v.0, |v| v.1);
        assert_eq!(avgs[0].value, 3.0);
        assert_eq!(avgs[1].value, 5.0);
    }
}

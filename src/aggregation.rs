//! Pure summaries over expense records already fetched from the store.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::schema::{Category, Expense, MonthBucket, MonthKey};

/// Sums saturate at the `Decimal` range instead of panicking on rows that
/// bypassed form validation.
pub fn total_for(records: &[Expense]) -> Decimal {
    records
        .iter()
        .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount))
}

/// Money left after spending. Negative means the month is overspent.
pub fn remaining(income: Decimal, total: Decimal) -> Decimal {
    income.saturating_sub(total)
}

/// Partitions records by their exact booking month.
///
/// Buckets come out in the order their month is first seen, so rows fetched
/// newest-period-first produce newest-period-first buckets.
pub fn group_by_month(records: &[Expense]) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = Vec::new();
    let mut index: HashMap<MonthKey, usize> = HashMap::new();

    for expense in records {
        let key = expense.period();
        let slot = *index.entry(key).or_insert_with(|| {
            buckets.push(MonthBucket {
                key,
                total: Decimal::ZERO,
                count: 0,
            });
            buckets.len() - 1
        });

        let bucket = &mut buckets[slot];
        bucket.total = bucket.total.saturating_add(expense.amount);
        bucket.count += 1;
    }

    buckets
}

/// Case-insensitive substring search over name and category.
pub fn filter_by_text(records: &[Expense], query: &str) -> Vec<Expense> {
    if query.is_empty() {
        return records.to_vec();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|e| {
            e.name.to_lowercase().contains(&needle)
                || e.category.as_str().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// History search: matches the month's display name ("march 2024"),
/// or the year / month number as typed.
pub fn filter_history(buckets: &[MonthBucket], query: &str) -> Vec<MonthBucket> {
    let needle = query.to_lowercase();
    buckets
        .iter()
        .filter(|b| {
            b.label().to_lowercase().contains(&needle)
                || b.key.year.to_string().contains(query)
                || b.key.month.to_string().contains(query)
        })
        .copied()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub primary: Decimal,
    pub secondary: Decimal,
    pub tertiary: Decimal,
}

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> Decimal {
        match category {
            Category::Primary => self.primary,
            Category::Secondary => self.secondary,
            Category::Tertiary => self.tertiary,
        }
    }

    fn add(&mut self, category: Category, amount: Decimal) {
        let slot = match category {
            Category::Primary => &mut self.primary,
            Category::Secondary => &mut self.secondary,
            Category::Tertiary => &mut self.tertiary,
        };
        *slot = slot.saturating_add(amount);
    }
}

pub fn category_breakdown(records: &[Expense]) -> CategoryBreakdown {
    records
        .iter()
        .fold(CategoryBreakdown::default(), |mut acc, e| {
            acc.add(e.category, e.amount);
            acc
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub income: Decimal,
    pub total: Decimal,
    pub remaining: Decimal,
}

impl MonthlySummary {
    pub fn is_overspent(&self) -> bool {
        self.remaining < Decimal::ZERO
    }
}

pub fn summarize(income: Decimal, records: &[Expense]) -> MonthlySummary {
    let total = total_for(records);
    MonthlySummary {
        income,
        total,
        remaining: remaining(income, total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn expense(name: &str, amount: Decimal, category: Category, year: i32, month: u32) -> Expense {
        Expense {
            id: format!("{}-{}-{}", name, year, month),
            user_id: "u-1".to_string(),
            name: name.to_string(),
            amount,
            category,
            month,
            year,
            created_at: None,
        }
    }

    #[test]
    fn test_total_for() {
        assert_eq!(total_for(&[]), Decimal::ZERO);

        let records = vec![
            expense("Rent", dec!(2000000), Category::Primary, 2024, 3),
            expense("Cinema", dec!(75000.50), Category::Tertiary, 2024, 3),
        ];
        assert_eq!(total_for(&records), dec!(2075000.50));
    }

    #[test]
    fn test_remaining_can_go_negative() {
        assert_eq!(remaining(dec!(5000000), dec!(1200000)), dec!(3800000));
        assert_eq!(remaining(dec!(100), dec!(250)), dec!(-150));
        assert_eq!(remaining(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_extreme_amounts_saturate() {
        let records = vec![
            expense("Yacht", Decimal::MAX, Category::Tertiary, 2024, 3),
            expense("Jet", Decimal::MAX, Category::Tertiary, 2024, 3),
        ];

        assert_eq!(total_for(&records), Decimal::MAX);
        assert_eq!(category_breakdown(&records).tertiary, Decimal::MAX);
        assert_eq!(group_by_month(&records)[0].total, Decimal::MAX);

        let summary = summarize(Decimal::MIN, &records);
        assert_eq!(summary.remaining, Decimal::MIN);
        assert!(summary.is_overspent());
    }

    #[test]
    fn test_single_primary_expense_summary() {
        let records = vec![expense("Food", dec!(1200000), Category::Primary, 2024, 1)];
        let summary = summarize(dec!(5000000), &records);

        assert_eq!(summary.total, dec!(1200000));
        assert_eq!(summary.remaining, dec!(3800000));
        assert!(!summary.is_overspent());
    }

    #[test]
    fn test_group_by_month_keeps_retrieval_order() {
        let records = vec![
            expense("Snacks", dec!(100000), Category::Tertiary, 2024, 4),
            expense("Rent", dec!(300000), Category::Primary, 2024, 3),
            expense("Books", dec!(200000), Category::Secondary, 2024, 3),
        ];

        let buckets = group_by_month(&records);
        assert_eq!(buckets.len(), 2);

        assert_eq!(buckets[0].key, MonthKey::new(2024, 4));
        assert_eq!(buckets[0].total, dec!(100000));
        assert_eq!(buckets[0].count, 1);

        assert_eq!(buckets[1].key, MonthKey::new(2024, 3));
        assert_eq!(buckets[1].total, dec!(500000));
        assert_eq!(buckets[1].count, 2);
    }

    #[test]
    fn test_group_by_month_is_partition() {
        let records = vec![
            expense("A", dec!(1), Category::Primary, 2023, 12),
            expense("B", dec!(2), Category::Primary, 2024, 12),
            expense("C", dec!(3), Category::Primary, 2023, 12),
            expense("D", dec!(4), Category::Primary, 2024, 1),
            expense("E", dec!(5), Category::Primary, 2024, 12),
        ];

        let buckets = group_by_month(&records);
        let counted: usize = buckets.iter().map(|b| b.count).sum();
        let summed: Decimal = buckets.iter().map(|b| b.total).sum();

        assert_eq!(buckets.len(), 3);
        assert_eq!(counted, records.len());
        assert_eq!(summed, total_for(&records));

        // Same month number in different years stays apart.
        let dec_2023 = buckets.iter().find(|b| b.key == MonthKey::new(2023, 12)).unwrap();
        assert_eq!(dec_2023.count, 2);
        assert_eq!(dec_2023.total, dec!(4));
    }

    #[test]
    fn test_filter_by_text() {
        let records = vec![
            expense("Groceries", dec!(100), Category::Primary, 2024, 3),
            expense("Netflix", dec!(50), Category::Tertiary, 2024, 3),
            expense("Insurance", dec!(75), Category::Secondary, 2024, 3),
        ];

        assert_eq!(filter_by_text(&records, ""), records);

        let by_name = filter_by_text(&records, "GROC");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Groceries");

        let by_category = filter_by_text(&records, "tertiary");
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].name, "Netflix");

        assert!(filter_by_text(&records, "vacation").is_empty());
    }

    #[test]
    fn test_category_breakdown_fills_missing_with_zero() {
        let records = vec![
            expense("Rent", dec!(2000000), Category::Primary, 2024, 3),
            expense("Food", dec!(500000), Category::Primary, 2024, 3),
            expense("Games", dec!(150000), Category::Tertiary, 2024, 3),
        ];

        let breakdown = category_breakdown(&records);
        assert_eq!(breakdown.get(Category::Primary), dec!(2500000));
        assert_eq!(breakdown.get(Category::Secondary), Decimal::ZERO);
        assert_eq!(breakdown.get(Category::Tertiary), dec!(150000));
    }

    #[test]
    fn test_filter_history() {
        let buckets = vec![
            MonthBucket { key: MonthKey::new(2024, 4), total: dec!(10), count: 1 },
            MonthBucket { key: MonthKey::new(2024, 3), total: dec!(20), count: 2 },
            MonthBucket { key: MonthKey::new(2023, 11), total: dec!(30), count: 3 },
        ];

        assert_eq!(filter_history(&buckets, "").len(), 3);
        assert_eq!(filter_history(&buckets, "MARCH")[0].key, MonthKey::new(2024, 3));
        assert_eq!(filter_history(&buckets, "2023").len(), 1);
        assert_eq!(filter_history(&buckets, "11").len(), 1);
        assert!(filter_history(&buckets, "july").is_empty());
    }
}

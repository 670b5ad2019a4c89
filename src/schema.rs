use chrono::{DateTime, Month, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum Category {
    #[schemars(description = "Essential spending: rent, groceries, utilities, transport to work")]
    Primary,

    #[schemars(description = "Important but deferrable spending: insurance, education, maintenance")]
    Secondary,

    #[schemars(description = "Optional spending: entertainment, eating out, hobbies")]
    Tertiary,
}

/// Visual tone of the category badge shown next to an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Primary,
    Secondary,
    Muted,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Primary, Category::Secondary, Category::Tertiary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Primary => "Primary",
            Category::Secondary => "Secondary",
            Category::Tertiary => "Tertiary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Primary => "Essential",
            Category::Secondary => "Important",
            Category::Tertiary => "Optional",
        }
    }

    pub fn badge_tone(&self) -> BadgeTone {
        match self {
            Category::Primary => BadgeTone::Primary,
            Category::Secondary => BadgeTone::Secondary,
            Category::Tertiary => BadgeTone::Muted,
        }
    }

    /// Parses the wire name, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Category> {
        let value = value.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar month an expense is booked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// English month name, e.g. "March". `None` when the month is out of range.
    pub fn month_name(&self) -> Option<&'static str> {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month_name() {
            Some(name) => write!(f, "{} {}", name, self.year),
            None => write!(f, "{:04}-{:02}", self.year, self.month),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Expense {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub user_id: String,

    #[schemars(description = "What the money was spent on, at most 100 characters")]
    pub name: String,

    #[schemars(description = "Amount spent in Rupiah, always positive")]
    pub amount: Decimal,

    pub category: Category,

    #[schemars(description = "Month of the budget period (1-12)")]
    pub month: u32,

    pub year: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Expense {
    pub fn period(&self) -> MonthKey {
        MonthKey::new(self.year, self.month)
    }
}

/// Insert payload for the `expenses` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub user_id: String,
    pub name: String,
    pub amount: Decimal,
    pub category: Category,
    pub month: u32,
    pub year: i32,
}

/// Fields an edit may touch. The booking month is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseChanges {
    pub name: String,
    pub amount: Decimal,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub monthly_income: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub key: MonthKey,
    pub total: Decimal,
    pub count: usize,
}

impl MonthBucket {
    pub fn label(&self) -> String {
        self.key.to_string()
    }
}

use rust_decimal::Decimal;

use crate::aggregation::{category_breakdown, remaining, total_for};
use crate::schema::{Category, Expense};
use crate::utils::format_grouped;

const ADVISOR_PREAMBLE: &str =
    "You are a financial advisor analyzing someone's spending habits. Here's their financial data:";

const ADVICE_REQUEST: &str = "Please provide:
1. A brief assessment of their spending habits
2. Specific actionable advice to improve their financial health
3. Praise for good habits or warnings for concerning patterns
4. Suggestions on how to better allocate their budget

Keep the response concise, friendly, and encouraging. Use Indonesian Rupiah format.";

fn rupiah(amount: Decimal) -> String {
    format!("Rp {}", format_grouped(amount))
}

/// Renders the full text sent to the generative model for one month of data.
pub fn build_prompt(expenses: &[Expense], monthly_income: Decimal) -> String {
    let total = total_for(expenses);
    let breakdown = category_breakdown(expenses);

    let categories: Vec<String> = Category::ALL
        .iter()
        .map(|&category| {
            format!(
                "- {} ({}): {}",
                category,
                category.label(),
                rupiah(breakdown.get(category))
            )
        })
        .collect();
    let lines: Vec<String> = expenses
        .iter()
        .map(|e| format!("- {}: {} ({})", e.name, rupiah(e.amount), e.category))
        .collect();

    format!(
        "{preamble}\n\n\
         Monthly Income: {income}\n\
         Total Expenses: {total}\n\
         Remaining: {remaining}\n\n\
         Category Breakdown:\n{categories}\n\n\
         Expenses List:\n{lines}\n\n\
         {advice}",
        preamble = ADVISOR_PREAMBLE,
        income = rupiah(monthly_income),
        total = rupiah(total),
        remaining = rupiah(remaining(monthly_income, total)),
        categories = categories.join("\n"),
        lines = lines.join("\n"),
        advice = ADVICE_REQUEST,
    )
}

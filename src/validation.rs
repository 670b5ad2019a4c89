use rust_decimal::Decimal;

use crate::error::{ExpenseError, Result};
use crate::schema::{Category, ExpenseChanges};
use crate::utils::parse_amount;

pub const MAX_NAME_LEN: usize = 100;

/// Largest amount or income accepted from a form: 1,000,000,000,000,000.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Raw values from the add/edit expense dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    pub name: String,
    pub amount: String,
    pub category: Category,
}

impl ExpenseForm {
    pub fn new(name: impl Into<String>, amount: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            category,
        }
    }

    /// Checks the form before anything touches the store.
    pub fn validate(&self) -> Result<ExpenseChanges> {
        let name = validate_name(&self.name)?;
        let amount = validate_amount(&self.amount)?;
        Ok(ExpenseChanges {
            name,
            amount,
            category: self.category,
        })
    }
}

pub fn validate_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ExpenseError::validation("Name is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ExpenseError::validation(format!(
            "Name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

pub fn validate_amount(raw: &str) -> Result<Decimal> {
    match parse_amount(raw) {
        Some(amount) if amount > MAX_AMOUNT => {
            Err(ExpenseError::validation("Amount is too large"))
        }
        Some(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(ExpenseError::validation("Amount must be positive")),
    }
}

/// Monthly income from the Settings form. Zero is allowed.
pub fn validate_income(raw: &str) -> Result<Decimal> {
    match parse_amount(raw) {
        Some(income) if income >= Decimal::ZERO && income <= MAX_AMOUNT => Ok(income),
        _ => Err(ExpenseError::validation("Please enter a valid amount")),
    }
}

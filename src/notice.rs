//! Transient messages shown to the user after an action.

use crate::error::{ExpenseError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadDashboard,
    AddExpense,
    EditExpense,
    DeleteExpense,
    LoadIncome,
    UpdateIncome,
    LoadHistory,
    Analyze,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::LoadDashboard => "Failed to load data",
            Operation::AddExpense => "Failed to add expense",
            Operation::EditExpense => "Failed to update expense",
            Operation::DeleteExpense => "Failed to delete expense",
            Operation::LoadIncome => "Failed to load monthly income",
            Operation::UpdateIncome => "Failed to update monthly income",
            Operation::LoadHistory => "Failed to load history",
            Operation::Analyze => "Failed to get AI analysis",
        }
    }

    pub fn success_message(&self) -> Option<&'static str> {
        match self {
            Operation::AddExpense => Some("Expense added successfully"),
            Operation::EditExpense => Some("Expense updated successfully"),
            Operation::DeleteExpense => Some("Expense deleted successfully"),
            Operation::UpdateIncome => Some("Monthly income updated successfully"),
            Operation::LoadDashboard
            | Operation::LoadIncome
            | Operation::LoadHistory
            | Operation::Analyze => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(op: Operation) -> Option<Notice> {
        op.success_message().map(|message| Notice {
            kind: NoticeKind::Success,
            message: message.to_string(),
        })
    }

    /// Form mistakes are echoed as-is, infrastructure failures get the
    /// operation's generic text, and a missing session shows nothing.
    pub fn failure(op: Operation, err: &ExpenseError) -> Option<Notice> {
        let message = match err {
            ExpenseError::NotAuthenticated => return None,
            e if e.is_user_correctable() => e.to_string(),
            _ => op.failure_message().to_string(),
        };

        Some(Notice {
            kind: NoticeKind::Error,
            message,
        })
    }

    pub fn for_result<T>(op: Operation, result: &Result<T>) -> Option<Notice> {
        match result {
            Ok(_) => Self::success(op),
            Err(err) => Self::failure(op, err),
        }
    }
}

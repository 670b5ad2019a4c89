//! # Quant Expense
//!
//! Monthly expense tracking on top of a hosted record store: users book
//! expenses by category into the current month, set a monthly income, see
//! what is left, browse past months and ask a generative model for advice.
//!
//! ## Core Concepts
//!
//! - **Date Context**: the "today" every booking is assigned to, passed explicitly
//! - **Month Bucket**: expenses grouped by their exact `(year, month)`
//! - **Remaining**: income minus the month's total; negative means overspent
//! - **Analysis**: a fixed-template prompt of the month's figures, answered by Gemini
//!
//! ## Example
//!
//! ```rust,ignore
//! use quant_expense::*;
//! use rust_decimal_macros::dec;
//!
//! let store = InMemoryStore::new().with_profile("user-1", dec!(5000000));
//! let tracker = ExpenseTracker::new(store, DateContext::fixed(2024, 3).unwrap())
//!     .with_session(Session::new("user-1"));
//!
//! tracker
//!     .add_expense(&ExpenseForm::new("Groceries", "1200000", Category::Primary))
//!     .await?;
//!
//! let dashboard = tracker.dashboard().await?;
//! assert_eq!(dashboard.summary.remaining, dec!(3800000));
//! ```

pub mod aggregation;
pub mod analysis;
pub mod config;
pub mod date_context;
pub mod error;
pub mod notice;
pub mod schema;
pub mod store;
pub mod tracker;
pub mod utils;
pub mod validation;

#[cfg(feature = "gemini")]
pub mod llm;

#[cfg(feature = "server")]
pub mod server;

pub use aggregation::*;
pub use analysis::{AnalysisBackend, AnalysisReply, AnalysisRequest, FALLBACK_ANALYSIS};
pub use config::{AnalysisConfig, StoreConfig};
pub use date_context::DateContext;
pub use error::{ExpenseError, Result};
pub use notice::{Notice, NoticeKind, Operation};
pub use schema::*;
pub use store::{ExpenseOrder, ExpenseQuery, InMemoryStore, RecordStore};
pub use tracker::{Dashboard, ExpenseTracker, Session};
pub use utils::{format_grouped, format_rupiah};
pub use validation::ExpenseForm;

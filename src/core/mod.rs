//! Framework-agnostic home-buying components.
//!
//! Each component owns its own snapshot plus a last-error message for
//! rendering. They never call each other; the only thing they share is the
//! current user from [`crate::auth::AuthContext`].

/// Mortgage payment, schedule and loan totals
pub mod amortization;

/// Home search results and selection
pub mod catalog;

/// Conversation with the home-buying assistant
pub mod chat;

/// Favorite homes with read-after-write reconciliation
pub mod favorites;

/// Price forecast for the selected home
pub mod forecast;

/// Upserted log of viewed homes
pub mod recently_viewed;

/// Generated home-buying checklist
pub mod tasks;

pub use amortization::{LoanInputs, MonthlyPayment, compute_monthly_payment};
pub use catalog::HomeCatalog;
pub use chat::ChatSession;
pub use favorites::FavoriteStore;
pub use forecast::ForecastViewModel;
pub use recently_viewed::RecentlyViewedLogger;
pub use tasks::{HouseContext, TaskLifecycleManager};

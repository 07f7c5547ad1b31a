//! Common types used across the application.

pub mod id;
pub mod money;
pub mod month;

pub use id::*;
pub use money::{from_paise, normalize_amount, to_paise, MAX_AMOUNT_PAISE};
pub use month::{FeeMonth, MonthKeyError};

//! Care plan model and the per-day calendar state derived from it.

mod day;
mod demo;
mod error;
mod model;
pub mod period;
mod session;
mod store;

pub use day::*;
pub use demo::*;
pub use error::*;
pub use model::*;
pub use period::{YearMonth, block_for_day, block_index_for_day, day_range};
pub use session::*;
pub use store::*;

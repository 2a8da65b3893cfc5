//! Double-dummy tricks table and the par-score search over it.

mod par;
mod tableau;

pub use par::{par, Par};
pub use tableau::Tableau;

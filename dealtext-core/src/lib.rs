mod auction;
mod card;
mod contract;
mod deal;
mod denom;
mod error;
mod play;
mod score;
mod seat;

pub use auction::{Auction, Call, CALL_PASS, CALL_DOUBLE, CALL_REDOUBLE};
pub use card::{Card, Rank, Suit};
pub use contract::Contract;
pub use deal::{Deal, Holding};
pub use denom::{Denom, Multiplier};
pub use error::{DealError, Result};
pub use play::{Play, Trick};
pub use score::{imps, made_score, undertrick_score};
pub use seat::{Seat, Side, Vulnerability};

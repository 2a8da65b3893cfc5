//! Textual encodings of deals, auctions, contracts and card play.
//!
//! Nine dialects share five token families; a dialect is picked at the
//! call site and the matching codec comes from a static registry. The
//! call and contract lexicons are bidirectional maps built once on first
//! use.

mod calls;
mod codec;
mod contract;
mod deal;
mod dialect;
mod lin;
mod pbn;
mod rbn;
mod table;

pub use calls::{call_token, parse_call};
pub use codec::{
    auction_codec, decode_auction, decode_play, encode_auction, encode_play, play_codec,
    AuctionCodec, PlayCodec,
};
pub use contract::{format_contract, parse_contract};
pub use deal::{format_deal_tag, parse_deal_body, parse_deal_tag};
pub use dialect::{parse_vul, vul_token, Dialect, TokenFamily};

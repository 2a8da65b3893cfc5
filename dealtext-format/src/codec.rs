use tracing::debug;

use dealtext_core::{Auction, Play, Result};

use crate::dialect::{Dialect, TokenFamily};
use crate::lin::{LinAuction, LinPlay, LinVariant};
use crate::pbn::{PbnAuction, PbnPlay};
use crate::rbn::{RbnAuction, RbnPlay};
use crate::table::{TableAuction, TablePlay};

/// Auction serializer/parser for one dialect
pub trait AuctionCodec: Sync {
    fn encode(&self, auction: &Auction) -> Result<String>;
    fn decode(&self, text: &str, auction: &mut Auction) -> Result<()>;
}

/// Play serializer/parser for one dialect
pub trait PlayCodec: Sync {
    fn encode(&self, play: &Play) -> Result<String>;
    fn decode(&self, text: &str, play: &mut Play) -> Result<()>;
}

static LIN_AUCTION: LinAuction = LinAuction { variant: LinVariant::Plain };
static LIN_RP_AUCTION: LinAuction = LinAuction { variant: LinVariant::Spaced };
static LIN_VG_AUCTION: LinAuction = LinAuction { variant: LinVariant::PageBroken };
static PBN_AUCTION: PbnAuction = PbnAuction;
static RBN_AUCTION: RbnAuction = RbnAuction { wrapped: false };
static RBX_AUCTION: RbnAuction = RbnAuction { wrapped: true };
static TXT_AUCTION: TableAuction = TableAuction {
    family: TokenFamily::Txt,
    width: 11,
    header: "West       North      East       South",
    trailer: "All Pass",
};
static EML_AUCTION: TableAuction = TableAuction {
    family: TokenFamily::Eml,
    width: 9,
    header: "WEST     NORTH    EAST     SOUTH",
    trailer: "(all pass)",
};
static REC_AUCTION: TableAuction = TableAuction {
    family: TokenFamily::Rec,
    width: 8,
    header: "West    North   East    South",
    trailer: "All Pass",
};

static LIN_PLAY: LinPlay = LinPlay { variant: LinVariant::Plain };
static LIN_RP_PLAY: LinPlay = LinPlay { variant: LinVariant::Spaced };
static LIN_VG_PLAY: LinPlay = LinPlay { variant: LinVariant::PageBroken };
static PBN_PLAY: PbnPlay = PbnPlay;
static RBN_PLAY: RbnPlay = RbnPlay { wrapped: false };
static RBX_PLAY: RbnPlay = RbnPlay { wrapped: true };
static TXT_PLAY: TablePlay = TablePlay {
    width: 11,
    header: "West       North      East       South",
};
static EML_PLAY: TablePlay = TablePlay {
    width: 9,
    header: "WEST     NORTH    EAST     SOUTH",
};
static REC_PLAY: TablePlay = TablePlay {
    width: 8,
    header: "West    North   East    South",
};

/// The auction codec for a dialect
pub fn auction_codec(dialect: Dialect) -> &'static dyn AuctionCodec {
    match dialect {
        Dialect::Lin => &LIN_AUCTION,
        Dialect::LinRp => &LIN_RP_AUCTION,
        Dialect::LinVg => &LIN_VG_AUCTION,
        Dialect::Pbn => &PBN_AUCTION,
        Dialect::Rbn => &RBN_AUCTION,
        Dialect::Rbx => &RBX_AUCTION,
        Dialect::Txt => &TXT_AUCTION,
        Dialect::Eml => &EML_AUCTION,
        Dialect::Rec => &REC_AUCTION,
    }
}

/// The play codec for a dialect
pub fn play_codec(dialect: Dialect) -> &'static dyn PlayCodec {
    match dialect {
        Dialect::Lin => &LIN_PLAY,
        Dialect::LinRp => &LIN_RP_PLAY,
        Dialect::LinVg => &LIN_VG_PLAY,
        Dialect::Pbn => &PBN_PLAY,
        Dialect::Rbn => &RBN_PLAY,
        Dialect::Rbx => &RBX_PLAY,
        Dialect::Txt => &TXT_PLAY,
        Dialect::Eml => &EML_PLAY,
        Dialect::Rec => &REC_PLAY,
    }
}

/// If the auction has a natural three-pass ending that may be abbreviated,
/// the index where the trailing passes start. `respect_alerts` keeps the
/// passes spelled out when any of them carries an alert.
pub(crate) fn natural_ending_cut(auction: &Auction, respect_alerts: bool) -> Option<usize> {
    if !auction.is_over() || auction.is_passed_out() {
        return None;
    }
    let calls = auction.calls();
    if calls.len() < 3 {
        return None;
    }
    let tail = &calls[calls.len() - 3..];
    if !tail.iter().all(|c| c.number == dealtext_core::CALL_PASS) {
        return None;
    }
    if respect_alerts
        && tail
            .iter()
            .any(|c| c.alerted || c.note.is_some() || c.alert.is_some())
    {
        return None;
    }
    Some(calls.len() - 3)
}

/// Bulk-parse an auction record in the given dialect
pub fn decode_auction(dialect: Dialect, text: &str, auction: &mut Auction) -> Result<()> {
    debug!(?dialect, len = text.len(), "decoding auction");
    auction_codec(dialect).decode(text, auction)
}

/// Serialize an auction in the given dialect
pub fn encode_auction(dialect: Dialect, auction: &Auction) -> Result<String> {
    auction_codec(dialect).encode(auction)
}

/// Bulk-parse a play record in the given dialect
pub fn decode_play(dialect: Dialect, text: &str, play: &mut Play) -> Result<()> {
    debug!(?dialect, len = text.len(), "decoding play");
    play_codec(dialect).decode(text, play)
}

/// Serialize a play record in the given dialect
pub fn encode_play(dialect: Dialect, play: &Play) -> Result<String> {
    play_codec(dialect).encode(play)
}

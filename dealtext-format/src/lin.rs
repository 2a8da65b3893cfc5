//! Pipe-tag stream dialect: `mb|<call>|` bidding tokens, `pc|<card>|` play
//! tokens, `an|<text>|` annotations and `pg||` page breaks. Three
//! sub-variants share the grammar and differ only in token separation and
//! the trailing page-break marker. Trailing passes are always spelled out
//! in this family.

use dealtext_core::{Auction, Call, Card, DealError, Play, Result};

use crate::calls::{call_token, parse_call};
use crate::codec::{AuctionCodec, PlayCodec};
use crate::dialect::TokenFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinVariant {
    /// Tokens back to back
    Plain,
    /// Tokens separated by single spaces
    Spaced,
    /// Tokens back to back with a trailing `pg||`
    PageBroken,
}

impl LinVariant {
    fn join(&self, pieces: Vec<String>) -> String {
        match self {
            LinVariant::Spaced => pieces.join(" "),
            _ => pieces.concat(),
        }
    }
}

pub struct LinAuction {
    pub variant: LinVariant,
}

impl AuctionCodec for LinAuction {
    fn encode(&self, auction: &Auction) -> Result<String> {
        let mut pieces = Vec::with_capacity(auction.calls().len() + 1);
        for call in auction.calls() {
            let token = call_token(TokenFamily::Lin, call.number)?;
            let piece = match &call.alert {
                Some(text) => format!("mb|{}|an|{}|", token, text),
                None if call.alerted => format!("mb|{}!|", token),
                None => format!("mb|{}|", token),
            };
            pieces.push(piece);
        }
        if self.variant == LinVariant::PageBroken {
            pieces.push("pg||".to_string());
        }
        Ok(self.variant.join(pieces))
    }

    fn decode(&self, text: &str, auction: &mut Auction) -> Result<()> {
        let pieces: Vec<&str> = text.split('|').collect();
        let mut pending: Option<Call> = None;
        let mut i = 0;
        while i < pieces.len() {
            let tag = pieces[i].trim();
            if tag.is_empty() {
                i += 1;
                continue;
            }
            match tag {
                "mb" => {
                    if let Some(call) = pending.take() {
                        auction.add_call(call)?;
                    }
                    let raw = pieces
                        .get(i + 1)
                        .ok_or_else(|| DealError::Syntax("mb tag without call".to_string()))?
                        .trim();
                    let (token, alerted) = match raw.strip_suffix('!') {
                        Some(stripped) => (stripped, true),
                        None => (raw, false),
                    };
                    let number = parse_call(TokenFamily::Lin, token)?;
                    let mut call = Call::new(number)
                        .ok_or_else(|| DealError::Range(format!("call number {}", number)))?;
                    call.alerted = alerted;
                    pending = Some(call);
                    i += 2;
                }
                "an" => {
                    let text = pieces
                        .get(i + 1)
                        .ok_or_else(|| DealError::Syntax("an tag without text".to_string()))?;
                    match pending.as_mut() {
                        Some(call) => {
                            call.alerted = true;
                            call.alert = Some(text.to_string());
                        }
                        None => {
                            return Err(DealError::Syntax("an tag without a call".to_string()))
                        }
                    }
                    i += 2;
                }
                "pg" => {
                    i += 2;
                }
                other => {
                    return Err(DealError::Syntax(format!("tag '{}'", other)));
                }
            }
        }
        if let Some(call) = pending.take() {
            auction.add_call(call)?;
        }
        Ok(())
    }
}

pub struct LinPlay {
    pub variant: LinVariant,
}

impl PlayCodec for LinPlay {
    fn encode(&self, play: &Play) -> Result<String> {
        let mut pieces = Vec::with_capacity(play.sequence().len() + 14);
        for (i, card) in play.sequence().iter().enumerate() {
            pieces.push(format!("pc|{}|", card));
            if i % 4 == 3 {
                pieces.push("pg||".to_string());
            }
        }
        Ok(self.variant.join(pieces))
    }

    fn decode(&self, text: &str, play: &mut Play) -> Result<()> {
        let pieces: Vec<&str> = text.split('|').collect();
        let mut i = 0;
        while i < pieces.len() {
            let tag = pieces[i].trim();
            if tag.is_empty() {
                i += 1;
                continue;
            }
            match tag {
                "pc" => {
                    let raw = pieces
                        .get(i + 1)
                        .ok_or_else(|| DealError::Syntax("pc tag without card".to_string()))?
                        .trim();
                    let card = Card::from_token(raw)
                        .ok_or_else(|| DealError::Syntax(format!("card '{}'", raw)))?;
                    play.play(card)?;
                    i += 2;
                }
                "pg" => {
                    i += 2;
                }
                other => {
                    return Err(DealError::Syntax(format!("tag '{}'", other)));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{auction_codec, play_codec};
    use crate::dialect::Dialect;
    use dealtext_core::{Denom, Seat, Vulnerability};

    fn sample_auction() -> Auction {
        let mut a = Auction::new();
        a.set_dealer(Seat::North).unwrap();
        a.set_vul(Vulnerability::None).unwrap();
        a.add_call(Call::bid(1, Denom::Clubs).unwrap().with_alert("strong"))
            .unwrap();
        a.add_call(Call::new(0).unwrap()).unwrap();
        let mut alerted = Call::bid(1, Denom::Hearts).unwrap();
        alerted.alerted = true;
        a.add_call(alerted).unwrap();
        a.add_passes().unwrap();
        a
    }

    #[test]
    fn test_encode_plain() {
        let text = auction_codec(Dialect::Lin).encode(&sample_auction()).unwrap();
        assert_eq!(
            text,
            "mb|1C|an|strong|mb|p|mb|1H!|mb|p|mb|p|mb|p|"
        );
    }

    #[test]
    fn test_encode_variants() {
        let a = sample_auction();
        let spaced = auction_codec(Dialect::LinRp).encode(&a).unwrap();
        assert!(spaced.contains("| mb|"));
        let paged = auction_codec(Dialect::LinVg).encode(&a).unwrap();
        assert!(paged.ends_with("pg||"));
    }

    #[test]
    fn test_roundtrip_all_variants() {
        let a = sample_auction();
        for dialect in [Dialect::Lin, Dialect::LinRp, Dialect::LinVg] {
            let text = auction_codec(dialect).encode(&a).unwrap();
            let mut b = Auction::new();
            b.set_dealer(Seat::North).unwrap();
            b.set_vul(Vulnerability::None).unwrap();
            auction_codec(dialect).decode(&text, &mut b).unwrap();
            assert_eq!(a.calls(), b.calls(), "{:?}", dialect);
            assert!(b.is_over());
        }
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let mut a = Auction::new();
        let err = auction_codec(Dialect::Lin).decode("xx|1C|", &mut a);
        assert!(matches!(err, Err(DealError::Syntax(_))));
    }

    #[test]
    fn test_play_roundtrip() {
        use dealtext_core::{Rank, Suit};
        let deal = crate::deal::parse_deal_tag(
            "[Deal \"N:AKQJT98765432... .AKQJT98765432.. ..AKQJT98765432. ...AKQJT98765432\"]",
        )
        .unwrap()
        .1;
        let mut play = Play::new(deal.clone(), Denom::NoTrump, Seat::North).unwrap();
        for rank in [Rank::Two, Rank::Three] {
            play.play(Card::new(Suit::Hearts, rank)).unwrap();
            play.play(Card::new(Suit::Diamonds, rank)).unwrap();
            play.play(Card::new(Suit::Clubs, rank)).unwrap();
            play.play(Card::new(Suit::Spades, rank)).unwrap();
        }
        let text = play_codec(Dialect::Lin).encode(&play).unwrap();
        assert!(text.starts_with("pc|H2|pc|D2|pc|C2|pc|S2|pg||"));

        let mut replay = Play::new(deal, Denom::NoTrump, Seat::North).unwrap();
        play_codec(Dialect::Lin).decode(&text, &mut replay).unwrap();
        assert_eq!(replay.sequence(), play.sequence());
        assert_eq!(replay.tricks().len(), 2);
    }
}

//! Bracket-tag dialect: `[Auction "<dealer>"]` and `[Play "<leader>"]`
//! sections, whitespace-separated tokens, `=n=` note references after a
//! call with `[Note "n:text"]` lines carrying the alert text. A natural
//! three-pass ending is abbreviated to `AP`; a passed-out board is spelled
//! out in full.

use once_cell::sync::Lazy;
use regex::Regex;

use dealtext_core::{Auction, Call, Card, DealError, Play, Result, Seat};

use crate::calls::{call_token, parse_call};
use crate::codec::{natural_ending_cut, AuctionCodec, PlayCodec};
use crate::dialect::TokenFamily;

static TAG_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\[(\w+)\s+"(.*)"\]$"#).unwrap());
static NOTE_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^=(\d+)=$").unwrap());
static NOTE_BODY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):(.*)$").unwrap());

/// Tag name and quoted value of a bracket-tag line, if it is one
fn tag_parts(line: &str) -> Option<(String, String)> {
    let caps = TAG_LINE.captures(line.trim())?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

fn parse_seat_value(value: &str) -> Result<Seat> {
    let mut chars = value.trim().chars();
    match (chars.next().and_then(Seat::from_char), chars.next()) {
        (Some(seat), None) => Ok(seat),
        _ => Err(DealError::Syntax(format!("seat '{}'", value))),
    }
}

pub struct PbnAuction;

impl AuctionCodec for PbnAuction {
    fn encode(&self, auction: &Auction) -> Result<String> {
        let dealer = auction
            .dealer()
            .ok_or(DealError::RuleViolation("dealer not set"))?;
        let mut out = format!("[Auction \"{}\"]", dealer.to_char());

        let cut = natural_ending_cut(auction, false).unwrap_or(auction.calls().len());
        let mut notes: Vec<(u8, String)> = Vec::new();
        let mut next_note = 1u8;
        let mut tokens: Vec<String> = Vec::new();
        for call in &auction.calls()[..cut] {
            tokens.push(call_token(TokenFamily::Pbn, call.number)?.to_string());
            if let Some(text) = &call.alert {
                // notes are renumbered sequentially on output, whatever
                // ordinals the calls carried in
                let note = next_note;
                next_note += 1;
                tokens.push(format!("={}=", note));
                notes.push((note, text.clone()));
            } else if call.alerted {
                // the standard suffix for an alert with no recorded text
                tokens.push("$15".to_string());
            }
        }
        if cut < auction.calls().len() {
            tokens.push("AP".to_string());
        }

        // four calls per line; a note reference rides with its call
        let mut on_line = 0;
        for token in tokens {
            out.push(if on_line == 0 { '\n' } else { ' ' });
            out.push_str(&token);
            if !token.starts_with('=') && !token.starts_with('$') {
                on_line = (on_line + 1) % 4;
            }
        }
        for (note, text) in notes {
            out.push_str(&format!("\n[Note \"{}:{}\"]", note, text));
        }
        Ok(out)
    }

    fn decode(&self, text: &str, auction: &mut Auction) -> Result<()> {
        // each call is buffered until the next token, so a =n= reference
        // can attach to it before it enters the auction
        let mut pending: Option<Call> = None;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((name, value)) = tag_parts(line) {
                if let Some(call) = pending.take() {
                    auction.add_call(call)?;
                }
                match name.as_str() {
                    "Auction" => {
                        auction.set_dealer(parse_seat_value(&value)?)?;
                    }
                    "Note" => {
                        let caps = NOTE_BODY.captures(&value).ok_or_else(|| {
                            DealError::Syntax(format!("note '{}'", value))
                        })?;
                        let note: u8 = caps[1]
                            .parse()
                            .map_err(|_| DealError::Range(format!("note '{}'", &caps[1])))?;
                        auction.add_alert(note, &caps[2])?;
                    }
                    other => {
                        return Err(DealError::Syntax(format!("tag '{}'", other)));
                    }
                }
                continue;
            }
            for token in line.split_whitespace() {
                if let Some(caps) = NOTE_REF.captures(token) {
                    let note: u8 = caps[1]
                        .parse()
                        .map_err(|_| DealError::Range(format!("note '{}'", &caps[1])))?;
                    match pending.as_mut() {
                        Some(call) => call.note = Some(note),
                        None => {
                            return Err(DealError::Syntax(
                                "note reference without a call".to_string(),
                            ))
                        }
                    }
                    continue;
                }
                if token.starts_with('$') {
                    match pending.as_mut() {
                        Some(call) => call.alerted = true,
                        None => {
                            return Err(DealError::Syntax(
                                "annotation without a call".to_string(),
                            ))
                        }
                    }
                    continue;
                }
                if let Some(call) = pending.take() {
                    auction.add_call(call)?;
                }
                if token.eq_ignore_ascii_case("AP") {
                    auction.add_passes()?;
                    continue;
                }
                let number = parse_call(TokenFamily::Pbn, token)?;
                pending = Call::new(number);
            }
        }
        if let Some(call) = pending.take() {
            auction.add_call(call)?;
        }
        Ok(())
    }
}

pub struct PbnPlay;

impl PlayCodec for PbnPlay {
    fn encode(&self, play: &Play) -> Result<String> {
        let leader = play.opening_leader();
        let mut out = format!("[Play \"{}\"]", leader.to_char());
        for (t, trick) in play.tricks().iter().enumerate() {
            let cards = &play.sequence()[t * 4..t * 4 + 4];
            // cards print in fixed rotation from the tag seat, whichever
            // seat actually led the trick
            let mut cols: [String; 4] = Default::default();
            for (k, card) in cards.iter().enumerate() {
                let seat = trick.leader.advance(k);
                let col = (seat as usize + 4 - leader as usize) % 4;
                cols[col] = card.to_string();
            }
            out.push('\n');
            out.push_str(&cols.join(" "));
        }
        // a trick in progress shows its unplayed cells as dashes
        let partial = play.sequence().len() % 4;
        if partial != 0 {
            let top = play.sequence().len();
            let cards = &play.sequence()[top - partial..];
            let mut cols: [String; 4] = Default::default();
            for col in &mut cols {
                *col = "-".to_string();
            }
            let trick_leader = play.leader();
            for (k, card) in cards.iter().enumerate() {
                let seat = trick_leader.advance(k);
                let col = (seat as usize + 4 - leader as usize) % 4;
                cols[col] = card.to_string();
            }
            out.push('\n');
            out.push_str(&cols.join(" "));
        }
        if play.is_over() {
            out.push_str("\n*");
        }
        Ok(out)
    }

    fn decode(&self, text: &str, play: &mut Play) -> Result<()> {
        let mut tag_seat: Option<Seat> = None;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((name, value)) = tag_parts(line) {
                if name != "Play" {
                    return Err(DealError::Syntax(format!("tag '{}'", name)));
                }
                tag_seat = Some(parse_seat_value(&value)?);
                continue;
            }
            if line == "*" {
                break;
            }
            let tag_seat = tag_seat.ok_or_else(|| {
                DealError::Syntax("play line before the play tag".to_string())
            })?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != 4 {
                return Err(DealError::Syntax(format!("play line '{}'", line)));
            }
            // a trick line lists cards in rotation from the tag seat; the
            // state machine wants them in play order from the trick leader
            let leader = play.leader();
            for k in 0..4 {
                let seat = leader.advance(k);
                let col = (seat as usize + 4 - tag_seat as usize) % 4;
                if tokens[col] == "-" {
                    // unplayed cells are only valid at the tail of a trick
                    for rest in k..4 {
                        let seat = leader.advance(rest);
                        let col = (seat as usize + 4 - tag_seat as usize) % 4;
                        if tokens[col] != "-" {
                            return Err(DealError::Syntax(format!("play line '{}'", line)));
                        }
                    }
                    break;
                }
                let card = Card::from_token(tokens[col])
                    .ok_or_else(|| DealError::Syntax(format!("card '{}'", tokens[col])))?;
                play.play(card)?;
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
    use dealtext_core::{Denom, Vulnerability};

    fn base(dealer: Seat) -> Auction {
        let mut a = Auction::new();
        a.set_dealer(dealer).unwrap();
        a.set_vul(Vulnerability::None).unwrap();
        a
    }

    #[test]
    fn test_encode_natural_ending() {
        let mut a = base(Seat::North);
        a.add_call(Call::bid(1, Denom::NoTrump).unwrap()).unwrap();
        a.add_call(Call::new(0).unwrap()).unwrap();
        a.add_call(Call::bid(3, Denom::NoTrump).unwrap()).unwrap();
        a.add_passes().unwrap();
        let text = auction_codec(Dialect::Pbn).encode(&a).unwrap();
        assert_eq!(text, "[Auction \"N\"]\n1NT Pass 3NT AP");
    }

    #[test]
    fn test_passed_out_spelled_in_full() {
        let mut a = base(Seat::East);
        a.add_passes().unwrap();
        let text = auction_codec(Dialect::Pbn).encode(&a).unwrap();
        assert_eq!(text, "[Auction \"E\"]\nPass Pass Pass Pass");
    }

    #[test]
    fn test_notes_roundtrip() {
        let mut a = base(Seat::South);
        a.add_call(Call::bid(1, Denom::Clubs).unwrap().with_alert("strong"))
            .unwrap();
        a.add_call(Call::new(0).unwrap()).unwrap();
        a.add_call(Call::bid(3, Denom::NoTrump).unwrap()).unwrap();
        a.add_passes().unwrap();
        let text = auction_codec(Dialect::Pbn).encode(&a).unwrap();
        assert!(text.contains("1C =1="));
        assert!(text.contains("[Note \"1:strong\"]"));

        let mut b = base(Seat::South);
        auction_codec(Dialect::Pbn).decode(&text, &mut b).unwrap();
        assert!(b.is_over());
        assert_eq!(b.calls()[0].alert.as_deref(), Some("strong"));
        assert_eq!(b.calls().len(), a.calls().len());
    }

    #[test]
    fn test_notes_renumbered_on_encode() {
        // a note ordinal carried in from a decode and a freshly attached
        // alert must not share a footnote number
        let mut a = base(Seat::North);
        let mut opener = Call::bid(1, Denom::Clubs).unwrap().with_alert("strong");
        opener.note = Some(1);
        a.add_call(opener).unwrap();
        a.add_call(Call::new(0).unwrap()).unwrap();
        a.add_call(Call::bid(1, Denom::Hearts).unwrap().with_alert("transfer"))
            .unwrap();
        a.add_passes().unwrap();
        let text = auction_codec(Dialect::Pbn).encode(&a).unwrap();
        assert!(text.contains("[Note \"1:strong\"]"));
        assert!(text.contains("[Note \"2:transfer\"]"));

        let mut b = base(Seat::North);
        auction_codec(Dialect::Pbn).decode(&text, &mut b).unwrap();
        assert_eq!(b.calls()[0].alert.as_deref(), Some("strong"));
        assert_eq!(b.calls()[2].alert.as_deref(), Some("transfer"));
    }

    #[test]
    fn test_decode_rejects_unknown_tag() {
        let mut a = base(Seat::North);
        let err = auction_codec(Dialect::Pbn).decode("[Deal \"N:x\"]", &mut a);
        assert!(matches!(err, Err(DealError::Syntax(_))));
    }

    #[test]
    fn test_play_roundtrip_with_rotation() {
        use dealtext_core::{Rank, Suit};
        let (_, deal) = crate::deal::parse_deal_tag(
            "[Deal \"N:AKQJT98765432... .AKQJT98765432.. ..AKQJT98765432. ...AKQJT98765432\"]",
        )
        .unwrap();
        // 1NT by North: East leads and wins every heart trick
        let mut play = Play::new(deal.clone(), Denom::NoTrump, Seat::North).unwrap();
        for rank in [Rank::Two, Rank::Three] {
            play.play(Card::new(Suit::Hearts, rank)).unwrap();
            play.play(Card::new(Suit::Diamonds, rank)).unwrap();
            play.play(Card::new(Suit::Clubs, rank)).unwrap();
            play.play(Card::new(Suit::Spades, rank)).unwrap();
        }
        let text = play_codec(Dialect::Pbn).encode(&play).unwrap();
        assert!(text.starts_with("[Play \"E\"]\nH2 D2 C2 S2"));

        let mut replay = Play::new(deal, Denom::NoTrump, Seat::North).unwrap();
        play_codec(Dialect::Pbn).decode(&text, &mut replay).unwrap();
        assert_eq!(replay.sequence(), play.sequence());
    }

    #[test]
    fn test_play_terminator() {
        let (_, deal) = crate::deal::parse_deal_tag(
            "[Deal \"N:AKQJT98765432... .AKQJT98765432.. ..AKQJT98765432. ...AKQJT98765432\"]",
        )
        .unwrap();
        let mut play = Play::new(deal, Denom::NoTrump, Seat::North).unwrap();
        play.claim(7).unwrap();
        let text = play_codec(Dialect::Pbn).encode(&play).unwrap();
        assert!(text.ends_with("\n*"));
    }
}

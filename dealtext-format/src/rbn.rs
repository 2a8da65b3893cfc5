//! Colon-grouped dialect: a compact auction line with a
//! `<dealer><vul>:` header and calls concatenated four per colon segment,
//! and a play line with one trick per colon segment. The braced variant
//! wraps the same text in `{`..`}`.
//!
//! Call suffixes: `*` marks a plain alert, `^<n>` references a numbered
//! note whose text follows on its own `^<n> <text>` line. A natural
//! three-pass ending abbreviates to a trailing `A` segment, except when
//! one of those passes itself carries an alert.

use dealtext_core::{Auction, Call, Card, DealError, Play, Rank, Result, Seat, Suit};

use crate::calls::{call_token, parse_call};
use crate::codec::{natural_ending_cut, AuctionCodec, PlayCodec};
use crate::dialect::{parse_vul, vul_token, TokenFamily};

fn wrap(text: String, wrapped: bool) -> String {
    if wrapped {
        format!("{{{}}}", text)
    } else {
        text
    }
}

fn unwrap_braces(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
        Some(inner) => inner,
        None => trimmed,
    }
}

pub struct RbnAuction {
    pub wrapped: bool,
}

impl AuctionCodec for RbnAuction {
    fn encode(&self, auction: &Auction) -> Result<String> {
        let dealer = auction
            .dealer()
            .ok_or(DealError::RuleViolation("dealer not set"))?;
        let vul = auction
            .vul()
            .ok_or(DealError::RuleViolation("vulnerability not set"))?;
        let mut out = format!(
            "{}{}:",
            dealer.to_char(),
            vul_token(TokenFamily::Rbn, vul)
        );

        let cut = natural_ending_cut(auction, true).unwrap_or(auction.calls().len());
        let mut notes: Vec<(u8, String)> = Vec::new();
        let mut next_note = 1u8;
        for (i, call) in auction.calls()[..cut].iter().enumerate() {
            if i > 0 && i % 4 == 0 {
                out.push(':');
            }
            out.push_str(call_token(TokenFamily::Rbn, call.number)?);
            if let Some(text) = &call.alert {
                // notes are renumbered sequentially on output, whatever
                // ordinals the calls carried in
                let note = next_note;
                next_note += 1;
                out.push_str(&format!("^{}", note));
                notes.push((note, text.clone()));
            } else if call.alerted {
                out.push('*');
            }
        }
        if cut < auction.calls().len() {
            out.push_str(":A");
        }
        for (note, text) in notes {
            out.push_str(&format!("\n^{} {}", note, text));
        }
        Ok(wrap(out, self.wrapped))
    }

    fn decode(&self, text: &str, auction: &mut Auction) -> Result<()> {
        let mut lines = unwrap_braces(text).lines();
        let auction_line = lines
            .next()
            .ok_or_else(|| DealError::Syntax("empty auction record".to_string()))?;

        let mut segments = auction_line.trim().split(':');
        let header = segments
            .next()
            .ok_or_else(|| DealError::Syntax("missing auction header".to_string()))?;
        let chars: Vec<char> = header.trim().chars().collect();
        if chars.len() != 2 {
            return Err(DealError::Syntax(format!("auction header '{}'", header)));
        }
        let dealer = Seat::from_char(chars[0])
            .ok_or_else(|| DealError::Syntax(format!("seat '{}'", chars[0])))?;
        auction.set_dealer(dealer)?;
        auction.set_vul(parse_vul(TokenFamily::Rbn, &chars[1].to_string())?)?;

        for segment in segments {
            decode_call_run(segment.trim(), auction)?;
        }
        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let rest = line
                .strip_prefix('^')
                .ok_or_else(|| DealError::Syntax(format!("note line '{}'", line)))?;
            let (num, text) = rest
                .split_once(' ')
                .ok_or_else(|| DealError::Syntax(format!("note line '{}'", line)))?;
            let note: u8 = num
                .parse()
                .map_err(|_| DealError::Range(format!("note '{}'", num)))?;
            auction.add_alert(note, text)?;
        }
        Ok(())
    }
}

/// One colon segment: up to four concatenated calls with their suffixes,
/// or the lone `A` ending marker
fn decode_call_run(segment: &str, auction: &mut Auction) -> Result<()> {
    let chars: Vec<char> = segment.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == 'A' && i + 1 == chars.len() {
            auction.add_passes()?;
            return Ok(());
        }
        let token: String = if chars[i].is_ascii_digit() {
            let denom = *chars.get(i + 1).ok_or_else(|| {
                DealError::Syntax(format!("call run '{}'", segment))
            })?;
            i += 2;
            [chars[i - 2], denom].iter().collect()
        } else {
            i += 1;
            chars[i - 1].to_string()
        };
        let number = parse_call(TokenFamily::Rbn, &token)?;
        let mut call = Call::new(number)
            .ok_or_else(|| DealError::Range(format!("call number {}", number)))?;
        // suffixes
        while i < chars.len() {
            match chars[i] {
                '*' => {
                    call.alerted = true;
                    i += 1;
                }
                '^' => {
                    let mut digits = String::new();
                    i += 1;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        digits.push(chars[i]);
                        i += 1;
                    }
                    let note: u8 = digits
                        .parse()
                        .map_err(|_| DealError::Syntax(format!("call run '{}'", segment)))?;
                    call.note = Some(note);
                }
                _ => break,
            }
        }
        auction.add_call(call)?;
    }
    Ok(())
}

pub struct RbnPlay {
    pub wrapped: bool,
}

impl PlayCodec for RbnPlay {
    fn encode(&self, play: &Play) -> Result<String> {
        let mut out = String::new();
        for (i, card) in play.sequence().iter().enumerate() {
            let pos = i % 4;
            if pos == 0 {
                if i > 0 {
                    out.push(':');
                }
                out.push_str(&card.to_string());
            } else {
                let suit_led = play.sequence()[i - pos].suit;
                if card.suit == suit_led {
                    // followers of the suit led abbreviate to the rank
                    out.push(card.rank.to_char());
                } else {
                    out.push_str(&card.to_string());
                }
            }
        }
        Ok(wrap(out, self.wrapped))
    }

    fn decode(&self, text: &str, play: &mut Play) -> Result<()> {
        for segment in unwrap_braces(text).split(':') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let chars: Vec<char> = segment.chars().collect();
            let mut suit_led: Option<Suit> = None;
            let mut i = 0;
            while i < chars.len() {
                let card = match Suit::from_char(chars[i]) {
                    Some(suit) => {
                        let rank_char = *chars.get(i + 1).ok_or_else(|| {
                            DealError::Syntax(format!("trick '{}'", segment))
                        })?;
                        let rank = Rank::from_char(rank_char).ok_or_else(|| {
                            DealError::Syntax(format!("rank '{}'", rank_char))
                        })?;
                        i += 2;
                        Card::new(suit, rank)
                    }
                    None => {
                        let suit = suit_led.ok_or_else(|| {
                            DealError::Syntax(format!("trick '{}'", segment))
                        })?;
                        let rank = Rank::from_char(chars[i]).ok_or_else(|| {
                            DealError::Syntax(format!("rank '{}'", chars[i]))
                        })?;
                        i += 1;
                        Card::new(suit, rank)
                    }
                };
                if suit_led.is_none() {
                    suit_led = Some(card.suit);
                }
                play.play(card)?;
            }
        }
        Ok(())
    }
}

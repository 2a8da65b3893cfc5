//! Fixed-width four-column table dialects. A header line names the seats
//! in West-North-East-South order; each following line is one bidding
//! round (or one trick), cells left-justified at the family's column
//! width. The dealer's offset shows as leading blank cells, and a natural
//! three-pass ending is replaced by the family's trailer in the cell
//! after the last bid. Alert markup does not survive this family.

use dealtext_core::{Auction, Call, Card, DealError, Play, Result, Seat};

use crate::calls::{call_token, parse_call};
use crate::codec::{natural_ending_cut, AuctionCodec, PlayCodec};
use crate::dialect::TokenFamily;

/// Column of a seat in W-N-E-S order
fn column(seat: Seat) -> usize {
    (seat as usize + 1) % 4
}

/// Seat whose calls land in a column
fn seat_of_column(col: usize) -> Seat {
    [Seat::West, Seat::North, Seat::East, Seat::South][col % 4]
}

/// Split one line into four cells at the column width; the last cell runs
/// to the end of the line. A column boundary landing inside a multibyte
/// character marks the line as malformed.
fn cells(line: &str, width: usize) -> Result<[&str; 4]> {
    let mut out = [""; 4];
    for (i, cell) in out.iter_mut().enumerate() {
        let start = (i * width).min(line.len());
        let end = if i == 3 {
            line.len()
        } else {
            ((i + 1) * width).min(line.len())
        };
        *cell = line
            .get(start..end)
            .ok_or_else(|| DealError::Syntax(format!("table row '{}'", line)))?
            .trim();
    }
    Ok(out)
}

fn push_cell(out: &mut String, col: usize, width: usize, token: &str) {
    if col == 0 {
        out.push('\n');
    }
    out.push_str(token);
    if col < 3 {
        for _ in token.len()..width {
            out.push(' ');
        }
    }
}

pub struct TableAuction {
    pub family: TokenFamily,
    pub width: usize,
    pub header: &'static str,
    pub trailer: &'static str,
}

impl AuctionCodec for TableAuction {
    fn encode(&self, auction: &Auction) -> Result<String> {
        let dealer = auction
            .dealer()
            .ok_or(DealError::RuleViolation("dealer not set"))?;
        let mut out = String::from(self.header);

        let cut = natural_ending_cut(auction, false).unwrap_or(auction.calls().len());
        // leading blanks for the dealer offset
        let mut col = 0;
        for _ in 0..column(dealer) {
            push_cell(&mut out, col, self.width, "");
            col = (col + 1) % 4;
        }
        for call in &auction.calls()[..cut] {
            push_cell(
                &mut out,
                col,
                self.width,
                call_token(self.family, call.number)?,
            );
            col = (col + 1) % 4;
        }
        if cut < auction.calls().len() {
            push_cell(&mut out, col, self.width, self.trailer);
        } else {
            // strip the padding after the last real cell
            while out.ends_with(' ') {
                out.pop();
            }
        }
        Ok(out)
    }

    fn decode(&self, text: &str, auction: &mut Auction) -> Result<()> {
        let mut lines = text.lines();
        let header = lines
            .next()
            .ok_or_else(|| DealError::Syntax("empty auction table".to_string()))?;
        if header.trim() != self.header.trim() {
            return Err(DealError::Syntax(format!("table header '{}'", header)));
        }
        let mut started = false;
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            // the trailer may be wider than a column, so look for it at
            // each cell boundary before slicing cells
            let mut trailer_at = None;
            for col in 0..4 {
                let start = (col * self.width).min(line.len());
                let tail = match line.get(start..) {
                    Some(tail) => tail,
                    None => continue,
                };
                if tail.trim().eq_ignore_ascii_case(self.trailer) {
                    trailer_at = Some(col);
                    break;
                }
            }
            for (col, cell) in cells(line, self.width)?.iter().enumerate() {
                if trailer_at == Some(col) {
                    auction.add_passes()?;
                    return Ok(());
                }
                if cell.is_empty() {
                    continue;
                }
                if !started {
                    auction.set_dealer(seat_of_column(col))?;
                    started = true;
                }
                let number = parse_call(self.family, cell)?;
                let call = Call::new(number)
                    .ok_or_else(|| DealError::Range(format!("call number {}", number)))?;
                auction.add_call(call)?;
            }
        }
        Ok(())
    }
}

pub struct TablePlay {
    pub width: usize,
    pub header: &'static str,
}

impl PlayCodec for TablePlay {
    fn encode(&self, play: &Play) -> Result<String> {
        let mut out = String::from(self.header);
        for (t, trick) in play.tricks().iter().enumerate() {
            let cards = &play.sequence()[t * 4..t * 4 + 4];
            let mut row: [String; 4] = Default::default();
            for (k, card) in cards.iter().enumerate() {
                row[column(trick.leader.advance(k))] = card.to_string();
            }
            for (col, cell) in row.iter().enumerate() {
                push_cell(&mut out, col, self.width, cell);
            }
            while out.ends_with(' ') {
                out.pop();
            }
        }
        let partial = play.sequence().len() % 4;
        if partial != 0 {
            let top = play.sequence().len();
            let mut row: [String; 4] = Default::default();
            for (k, card) in play.sequence()[top - partial..].iter().enumerate() {
                row[column(play.leader().advance(k))] = card.to_string();
            }
            for (col, cell) in row.iter().enumerate() {
                push_cell(&mut out, col, self.width, cell);
            }
            while out.ends_with(' ') {
                out.pop();
            }
        }
        Ok(out)
    }

    fn decode(&self, text: &str, play: &mut Play) -> Result<()> {
        let mut lines = text.lines();
        let header = lines
            .next()
            .ok_or_else(|| DealError::Syntax("empty play table".to_string()))?;
        if header.trim() != self.header.trim() {
            return Err(DealError::Syntax(format!("table header '{}'", header)));
        }
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let row = cells(line, self.width)?;
            let leader = play.leader();
            for k in 0..4 {
                let cell = row[column(leader.advance(k))];
                if cell.is_empty() {
                    // unplayed cells are only valid at the tail of a trick
                    for rest in k..4 {
                        if !row[column(leader.advance(rest))].is_empty() {
                            return Err(DealError::Syntax(format!("play row '{}'", line)));
                        }
                    }
                    break;
                }
                let card = Card::from_token(cell)
                    .ok_or_else(|| DealError::Syntax(format!("card '{}'", cell)))?;
                play.play(card)?;
            }
        }
        Ok(())
    }
}

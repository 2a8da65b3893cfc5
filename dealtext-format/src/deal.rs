use dealtext_core::{Card, Deal, DealError, Rank, Result, Seat, Suit};

/// Parse a bracket-tag deal line into a full 52-card deal.
/// Format: [Deal "N:KQ4.QJ982..AKQ43 J653.A73.985.J97 9.K54.KQT732.652 AT872.T6.AJ64.T8"]
/// Each hand is Spades.Hearts.Diamonds.Clubs, clockwise from the named seat.
pub fn parse_deal_tag(input: &str) -> Result<(Seat, Deal)> {
    let trimmed = input.trim();

    if !trimmed.starts_with("[Deal \"") || !trimmed.ends_with("\"]") {
        return Err(DealError::Syntax(format!("deal tag '{}'", trimmed)));
    }
    let content = &trimmed[7..trimmed.len() - 2];
    parse_deal_body(content)
}

/// Parse the inner <seat>:<hand> <hand> <hand> <hand> form
pub fn parse_deal_body(content: &str) -> Result<(Seat, Deal)> {
    let (seat_str, hands_str) = content
        .split_once(':')
        .ok_or_else(|| DealError::Syntax("expected seat:hands".to_string()))?;

    let first_seat = parse_seat(seat_str)?;

    let hands: Vec<&str> = hands_str.split_whitespace().collect();
    if hands.len() != 4 {
        return Err(DealError::Syntax(format!("expected 4 hands, got {}", hands.len())));
    }

    let mut deal = Deal::new();
    for (i, hand) in hands.iter().enumerate() {
        let seat = first_seat.advance(i);
        parse_hand_into(&mut deal, seat, hand)?;
    }

    if !deal.is_complete() {
        return Err(DealError::Syntax("deal is not 52 cards".to_string()));
    }
    Ok((first_seat, deal))
}

/// Format a deal as a bracket-tag line, clockwise from `first_seat`
pub fn format_deal_tag(deal: &Deal, first_seat: Seat) -> String {
    let mut result = String::from("[Deal \"");
    result.push(first_seat.to_char());
    result.push(':');
    for i in 0..4 {
        if i > 0 {
            result.push(' ');
        }
        result.push_str(&format_hand(deal, first_seat.advance(i)));
    }
    result.push_str("\"]");
    result
}

fn parse_seat(s: &str) -> Result<Seat> {
    let mut chars = s.trim().chars();
    match (chars.next().and_then(Seat::from_char), chars.next()) {
        (Some(seat), None) => Ok(seat),
        _ => Err(DealError::Syntax(format!("seat '{}'", s))),
    }
}

/// Parse one hand in Spades.Hearts.Diamonds.Clubs form; a void suit is an
/// empty run between dots
fn parse_hand_into(deal: &mut Deal, seat: Seat, s: &str) -> Result<()> {
    let suits_str: Vec<&str> = s.split('.').collect();
    if suits_str.len() != 4 {
        return Err(DealError::Syntax(format!(
            "expected 4 suits separated by dots in '{}'",
            s
        )));
    }

    let suits = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
    for (&suit, &ranks) in suits.iter().zip(suits_str.iter()) {
        for c in ranks.chars() {
            let rank = Rank::from_char(c)
                .ok_or_else(|| DealError::Syntax(format!("rank '{}'", c)))?;
            deal.give(seat, Card::new(suit, rank))?;
        }
    }
    Ok(())
}

fn format_hand(deal: &Deal, seat: Seat) -> String {
    let suits = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
    let mut parts = Vec::with_capacity(4);
    for suit in suits {
        let ranks: String = deal
            .holding(seat, suit)
            .ranks()
            .iter()
            .map(|r| r.to_char())
            .collect();
        parts.push(ranks);
    }
    parts.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEAL: &str = "[Deal \"N:KQ4.QJ982..AKQ43 J653.A73.985.J97 9.K54.KQT732.652 AT872.T6.AJ64.T8\"]";

    #[test]
    fn test_parse_deal_tag() {
        let (first, deal) = parse_deal_tag(DEAL).unwrap();
        assert_eq!(first, Seat::North);
        assert!(deal.is_complete());
        assert!(deal.has(Seat::North, Card::new(Suit::Spades, Rank::King)));
        assert!(!deal.has_suit(Seat::North, Suit::Diamonds));
        assert!(deal.has(Seat::West, Card::new(Suit::Clubs, Rank::Ten)));
    }

    #[test]
    fn test_roundtrip() {
        let (first, deal) = parse_deal_tag(DEAL).unwrap();
        assert_eq!(format_deal_tag(&deal, first), DEAL);
    }

    #[test]
    fn test_rotation_from_other_seat() {
        let rotated = DEAL.replace("N:", "E:");
        let (first, deal) = parse_deal_tag(&rotated).unwrap();
        assert_eq!(first, Seat::East);
        assert!(deal.has(Seat::East, Card::new(Suit::Spades, Rank::King)));
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(parse_deal_tag("[Deal \"N:AKQ\"]").is_err());
        assert!(parse_deal_tag("no tag at all").is_err());
        // short a card
        let short = DEAL.replace("KQ4", "K4");
        assert!(parse_deal_tag(&short).is_err());
    }
}

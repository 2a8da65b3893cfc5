use crate::Suit;

/// A contract denomination: one of the four suits or notrump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Denom {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
    NoTrump = 4,
}

impl Denom {
    /// All denominations in bidding order
    pub const ALL: [Denom; 5] = [
        Denom::Clubs,
        Denom::Diamonds,
        Denom::Hearts,
        Denom::Spades,
        Denom::NoTrump,
    ];

    /// Convert from numeric index (0-4)
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Denom::Clubs),
            1 => Some(Denom::Diamonds),
            2 => Some(Denom::Hearts),
            3 => Some(Denom::Spades),
            4 => Some(Denom::NoTrump),
            _ => None,
        }
    }

    /// Get the denomination as a single character (C, D, H, S, N)
    pub fn to_char(&self) -> char {
        match self {
            Denom::Clubs => 'C',
            Denom::Diamonds => 'D',
            Denom::Hearts => 'H',
            Denom::Spades => 'S',
            Denom::NoTrump => 'N',
        }
    }

    /// The trump suit, or None for a notrump contract
    pub fn trump_suit(&self) -> Option<Suit> {
        match self {
            Denom::NoTrump => None,
            _ => Suit::from_index(*self as u8),
        }
    }

    /// The denomination naming a suit
    pub fn from_suit(suit: Suit) -> Denom {
        match suit {
            Suit::Clubs => Denom::Clubs,
            Suit::Diamonds => Denom::Diamonds,
            Suit::Hearts => Denom::Hearts,
            Suit::Spades => Denom::Spades,
        }
    }
}

/// Undoubled/doubled/redoubled state of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Multiplier {
    Undoubled = 0,
    Doubled = 1,
    Redoubled = 2,
}

impl Default for Multiplier {
    fn default() -> Self {
        Multiplier::Undoubled
    }
}

impl Multiplier {
    /// Trick-score multiplication factor (1, 2 or 4)
    pub fn factor(&self) -> i32 {
        match self {
            Multiplier::Undoubled => 1,
            Multiplier::Doubled => 2,
            Multiplier::Redoubled => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trump_suit() {
        assert_eq!(Denom::Spades.trump_suit(), Some(Suit::Spades));
        assert_eq!(Denom::NoTrump.trump_suit(), None);
        for suit in Suit::ALL {
            assert_eq!(Denom::from_suit(suit).trump_suit(), Some(suit));
        }
    }

    #[test]
    fn test_bidding_order() {
        assert!(Denom::Clubs < Denom::NoTrump);
        assert!(Denom::Hearts < Denom::Spades);
    }
}

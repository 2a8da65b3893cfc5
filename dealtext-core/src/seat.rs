/// Represents the four seats at a bridge table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Seat {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Seat {
    /// All seats in rotation order
    pub const ALL: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    /// Convert from numeric index (0-3)
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Seat::North),
            1 => Some(Seat::East),
            2 => Some(Seat::South),
            3 => Some(Seat::West),
            _ => None,
        }
    }

    /// Parse from a seat initial (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Seat::North),
            'E' => Some(Seat::East),
            'S' => Some(Seat::South),
            'W' => Some(Seat::West),
            _ => None,
        }
    }

    /// Get seat as a character (N, E, S, W)
    pub fn to_char(&self) -> char {
        match self {
            Seat::North => 'N',
            Seat::East => 'E',
            Seat::South => 'S',
            Seat::West => 'W',
        }
    }

    /// Full seat name ("North", ...)
    pub fn name(&self) -> &'static str {
        match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        }
    }

    /// Get partner seat
    pub fn partner(&self) -> Seat {
        match self {
            Seat::North => Seat::South,
            Seat::South => Seat::North,
            Seat::East => Seat::West,
            Seat::West => Seat::East,
        }
    }

    /// Next seat in clockwise rotation
    pub fn next(&self) -> Seat {
        self.advance(1)
    }

    /// Seat reached after `steps` clockwise rotations
    pub fn advance(&self, steps: usize) -> Seat {
        Seat::ALL[(*self as usize + steps) % 4]
    }

    /// The side (partnership) this seat belongs to
    pub fn side(&self) -> Side {
        match self {
            Seat::North | Seat::South => Side::NorthSouth,
            Seat::East | Seat::West => Side::EastWest,
        }
    }
}

/// One of the two partnerships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    NorthSouth,
    EastWest,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::NorthSouth, Side::EastWest];

    /// The two seats of the partnership, in rotation order
    pub fn seats(&self) -> [Seat; 2] {
        match self {
            Side::NorthSouth => [Seat::North, Seat::South],
            Side::EastWest => [Seat::East, Seat::West],
        }
    }

    /// The opposing partnership
    pub fn other(&self) -> Side {
        match self {
            Side::NorthSouth => Side::EastWest,
            Side::EastWest => Side::NorthSouth,
        }
    }
}

/// Per-side game status affecting scoring magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vulnerability {
    None,
    NorthSouth,
    EastWest,
    Both,
}

impl Vulnerability {
    pub const ALL: [Vulnerability; 4] = [
        Vulnerability::None,
        Vulnerability::NorthSouth,
        Vulnerability::EastWest,
        Vulnerability::Both,
    ];

    /// Is the given side vulnerable?
    pub fn is_vulnerable(&self, side: Side) -> bool {
        match self {
            Vulnerability::None => false,
            Vulnerability::Both => true,
            Vulnerability::NorthSouth => side == Side::NorthSouth,
            Vulnerability::EastWest => side == Side::EastWest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation() {
        assert_eq!(Seat::West.next(), Seat::North);
        assert_eq!(Seat::North.advance(3), Seat::West);
        assert_eq!(Seat::South.advance(0), Seat::South);
    }

    #[test]
    fn test_partner_and_side() {
        for seat in Seat::ALL {
            assert_eq!(seat.partner().partner(), seat);
            assert_eq!(seat.side(), seat.partner().side());
            assert_ne!(seat.side(), seat.next().side());
        }
    }

    #[test]
    fn test_vulnerability() {
        assert!(Vulnerability::Both.is_vulnerable(Side::EastWest));
        assert!(!Vulnerability::None.is_vulnerable(Side::NorthSouth));
        assert!(Vulnerability::NorthSouth.is_vulnerable(Side::NorthSouth));
        assert!(!Vulnerability::NorthSouth.is_vulnerable(Side::EastWest));
    }
}

use dealtext_core::{DealError, Result, Vulnerability};

/// One of the supported textual record dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Pipe-tag stream
    Lin,
    /// Pipe-tag stream, space-separated tokens
    LinRp,
    /// Pipe-tag stream with page-break markers
    LinVg,
    /// Bracket-tag blocks with footnote lines
    Pbn,
    /// Compact colon-grouped records
    Rbn,
    /// Colon-grouped records wrapped in braces
    Rbx,
    /// Fixed-width four-column table, wide
    Txt,
    /// Fixed-width four-column table, e-mail style
    Eml,
    /// Fixed-width four-column table, narrow
    Rec,
}

impl Dialect {
    pub const ALL: [Dialect; 9] = [
        Dialect::Lin,
        Dialect::LinRp,
        Dialect::LinVg,
        Dialect::Pbn,
        Dialect::Rbn,
        Dialect::Rbx,
        Dialect::Txt,
        Dialect::Eml,
        Dialect::Rec,
    ];

    /// The token-spelling family this dialect draws from
    pub fn family(&self) -> TokenFamily {
        match self {
            Dialect::Lin | Dialect::LinRp | Dialect::LinVg => TokenFamily::Lin,
            Dialect::Pbn => TokenFamily::Pbn,
            Dialect::Rbn | Dialect::Rbx => TokenFamily::Rbn,
            Dialect::Txt => TokenFamily::Txt,
            Dialect::Eml => TokenFamily::Eml,
            Dialect::Rec => TokenFamily::Rec,
        }
    }
}

/// Call/vulnerability spelling families shared by related dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenFamily {
    Lin = 0,
    Pbn = 1,
    Rbn = 2,
    Txt = 3,
    Eml = 4,
    Rec = 5,
}

impl TokenFamily {
    pub const ALL: [TokenFamily; 6] = [
        TokenFamily::Lin,
        TokenFamily::Pbn,
        TokenFamily::Rbn,
        TokenFamily::Txt,
        TokenFamily::Eml,
        TokenFamily::Rec,
    ];
}

/// Vulnerability spelling for a family
pub fn vul_token(family: TokenFamily, vul: Vulnerability) -> &'static str {
    use Vulnerability::*;
    match family {
        TokenFamily::Lin => match vul {
            None => "o",
            NorthSouth => "n",
            EastWest => "e",
            Both => "b",
        },
        TokenFamily::Pbn => match vul {
            None => "None",
            NorthSouth => "NS",
            EastWest => "EW",
            Both => "All",
        },
        TokenFamily::Rbn => match vul {
            None => "Z",
            NorthSouth => "N",
            EastWest => "E",
            Both => "B",
        },
        TokenFamily::Txt | TokenFamily::Eml | TokenFamily::Rec => match vul {
            None => "None",
            NorthSouth => "N-S",
            EastWest => "E-W",
            Both => "Both",
        },
    }
}

/// Dialect-specific vulnerability parse (case-insensitive)
pub fn parse_vul(family: TokenFamily, s: &str) -> Result<Vulnerability> {
    let upper = s.trim().to_ascii_uppercase();
    let vul = match family {
        TokenFamily::Lin => match upper.as_str() {
            "O" | "0" => Some(Vulnerability::None),
            "N" => Some(Vulnerability::NorthSouth),
            "E" => Some(Vulnerability::EastWest),
            "B" => Some(Vulnerability::Both),
            _ => None,
        },
        TokenFamily::Pbn => match upper.as_str() {
            "NONE" | "LOVE" | "-" => Some(Vulnerability::None),
            "NS" => Some(Vulnerability::NorthSouth),
            "EW" => Some(Vulnerability::EastWest),
            "ALL" | "BOTH" => Some(Vulnerability::Both),
            _ => None,
        },
        TokenFamily::Rbn => match upper.as_str() {
            "Z" | "0" => Some(Vulnerability::None),
            "N" => Some(Vulnerability::NorthSouth),
            "E" => Some(Vulnerability::EastWest),
            "B" => Some(Vulnerability::Both),
            _ => None,
        },
        TokenFamily::Txt | TokenFamily::Eml | TokenFamily::Rec => match upper.as_str() {
            "NONE" => Some(Vulnerability::None),
            "N-S" => Some(Vulnerability::NorthSouth),
            "E-W" => Some(Vulnerability::EastWest),
            "BOTH" => Some(Vulnerability::Both),
            _ => None,
        },
    };
    vul.ok_or_else(|| DealError::Syntax(format!("vulnerability '{}'", s)))
}

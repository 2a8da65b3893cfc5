//! Static call lexicon: bidirectional map between call numbers (0..37) and
//! their spellings in each dialect family. Built once on first use,
//! immutable thereafter.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use dealtext_core::{Call, DealError, Result};

use crate::dialect::TokenFamily;

/// Per-family pass/double/redouble spellings and the notrump suffix
fn family_spellings(family: TokenFamily) -> (&'static str, &'static str, &'static str, &'static str) {
    match family {
        TokenFamily::Lin => ("p", "d", "r", "N"),
        TokenFamily::Pbn => ("Pass", "X", "XX", "NT"),
        TokenFamily::Rbn => ("P", "X", "R", "N"),
        TokenFamily::Txt => ("Pass", "Dbl", "Rdbl", "NT"),
        TokenFamily::Eml => ("Pass", "Dbl", "Rdbl", "NT"),
        TokenFamily::Rec => ("Pass", "DBL", "RDBL", "NT"),
    }
}

/// Forward table: spelling of every call number, per family
static CALL_TOKENS: Lazy<[Vec<String>; 6]> = Lazy::new(|| {
    let mut tables: [Vec<String>; 6] = Default::default();
    for family in TokenFamily::ALL {
        let (pass, double, redouble, notrump) = family_spellings(family);
        let mut tokens = Vec::with_capacity(38);
        tokens.push(pass.to_string());
        tokens.push(double.to_string());
        tokens.push(redouble.to_string());
        for number in 3..38u8 {
            let level = Call::level_of(number).unwrap();
            let denom = Call::denom_of(number).unwrap();
            let denom_str = match denom.to_char() {
                'N' => notrump.to_string(),
                c => c.to_string(),
            };
            tokens.push(format!("{}{}", level, denom_str));
        }
        tables[family as usize] = tokens;
    }
    tables
});

/// Reverse table: uppercased spelling to call number, per family
static CALL_NUMBERS: Lazy<[FxHashMap<String, u8>; 6]> = Lazy::new(|| {
    let mut maps: [FxHashMap<String, u8>; 6] = Default::default();
    for family in TokenFamily::ALL {
        let mut map = FxHashMap::default();
        for (number, token) in CALL_TOKENS[family as usize].iter().enumerate() {
            map.insert(token.to_ascii_uppercase(), number as u8);
        }
        // bids with the alternate notrump suffix are accepted everywhere
        for level in 1..=7u8 {
            let number = Call::number_for(level, dealtext_core::Denom::NoTrump);
            map.entry(format!("{}N", level)).or_insert(number);
            map.entry(format!("{}NT", level)).or_insert(number);
        }
        maps[family as usize] = map;
    }
    maps
});

/// Spelling of a call number in a dialect family
pub fn call_token(family: TokenFamily, number: u8) -> Result<&'static str> {
    CALL_TOKENS[family as usize]
        .get(number as usize)
        .map(|s| s.as_str())
        .ok_or_else(|| DealError::Range(format!("call number {}", number)))
}

/// Call number of a spelling in a dialect family (case-insensitive)
pub fn parse_call(family: TokenFamily, token: &str) -> Result<u8> {
    CALL_NUMBERS[family as usize]
        .get(&token.trim().to_ascii_uppercase())
        .copied()
        .ok_or_else(|| DealError::Syntax(format!("call token '{}'", token)))
}

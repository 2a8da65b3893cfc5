use thiserror::Error;

/// Error taxonomy shared by every record component.
///
/// Legality checks are ordinary `Result` values: a rejected call or card
/// comes back as `RuleViolation`, never as a panic or a control-flow
/// exception. Overwriting an immutable field with the *same* value is a
/// no-op; only a conflicting overwrite is `AlreadySet`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealError {
    /// Text does not match the expected dialect grammar.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// Illegal call, card, claim or undo per the rules of the game.
    #[error("rule violation: {0}")]
    RuleViolation(&'static str),

    /// Attempt to overwrite an immutable field with a different value.
    #[error("already set: {0}")]
    AlreadySet(&'static str),

    /// Index or field out of bounds.
    #[error("out of range: {0}")]
    Range(String),

    /// Dialect/operation combination not implemented for this entry point.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, DealError>;

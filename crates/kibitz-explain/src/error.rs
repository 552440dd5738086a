//! Explanation errors.

/// Errors raised while preparing an explanation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExplainError {
    /// A piece value override has a separator but no usable number.
    #[error("invalid piece value override \"{token}\": expected SYMBOL:NUMBER")]
    InvalidNominal {
        /// The offending `SYMBOL:VALUE` token.
        token: String,
    },

    /// A grid mode name could not be parsed.
    #[error("unknown grid mode \"{found}\", expected contrib or delta")]
    UnknownGridMode {
        /// The unrecognised name.
        found: String,
    },
}

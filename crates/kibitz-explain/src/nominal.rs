//! Nominal piece values used to scale or normalise attributions.

use std::collections::BTreeMap;

use kibitz_core::PieceKind;
use tracing::debug;

use crate::error::ExplainError;

/// Default nominal values; the king has none.
const DEFAULTS: [(PieceKind, Option<f64>); PieceKind::COUNT] = [
    (PieceKind::Pawn, Some(1.0)),
    (PieceKind::Knight, Some(3.0)),
    (PieceKind::Bishop, Some(3.0)),
    (PieceKind::Rook, Some(5.0)),
    (PieceKind::Queen, Some(7.0)),
    (PieceKind::King, None),
];

/// Table of nominal values keyed by uppercase piece symbol.
///
/// Built fresh for every explanation. Symbols other than the six piece
/// kinds may be present after overrides but are never consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceValues {
    entries: BTreeMap<String, Option<f64>>,
}

impl Default for PieceValues {
    fn default() -> Self {
        let entries = DEFAULTS
            .into_iter()
            .map(|(kind, value)| (kind.symbol().to_string(), value))
            .collect();
        Self { entries }
    }
}

impl PieceValues {
    /// Build a table from the defaults and a `SYM:VALUE,SYM:VALUE,...`
    /// override string.
    ///
    /// Symbols are case-insensitive and later tokens win. Tokens without a
    /// `:` are skipped. A token whose value is not a number is an error.
    pub fn resolve(overrides: &str) -> Result<PieceValues, ExplainError> {
        let mut values = PieceValues::default();

        for token in overrides.split(',').map(str::trim) {
            if token.is_empty() {
                continue;
            }
            let Some((symbol, value)) = token.split_once(':') else {
                debug!(token, "ignoring piece value override without separator");
                continue;
            };
            let value: f64 = value
                .trim()
                .parse()
                .map_err(|_| ExplainError::InvalidNominal {
                    token: token.to_string(),
                })?;
            let symbol = symbol.trim().to_uppercase();
            debug!(%symbol, value, "piece value override");
            values.entries.insert(symbol, Some(value));
        }

        Ok(values)
    }

    /// Nominal value of `kind`, if one is defined.
    pub fn nominal(&self, kind: PieceKind) -> Option<f64> {
        self.entries
            .get(&kind.symbol().to_string())
            .copied()
            .flatten()
    }

    /// Factor applied when scaling or normalising `kind`.
    ///
    /// A nominal of zero counts as undefined so that normalisation never
    /// divides by zero.
    pub fn factor(&self, kind: PieceKind) -> Option<f64> {
        self.nominal(kind).filter(|&value| value != 0.0)
    }

    /// Every stored `(symbol, value)` pair, including unknown symbols.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.entries
            .iter()
            .map(|(symbol, &value)| (symbol.as_str(), value))
    }
}

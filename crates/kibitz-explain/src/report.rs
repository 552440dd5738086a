//! Plain-text rendering of an explanation.

use std::fmt;

use kibitz_core::{File, Position, Rank, Square};

use crate::attribution::{Attribution, AttributionRow};
use crate::config::{ExplainConfig, GridMode};
use crate::counterfactual::{CounterfactualRow, Counterfactuals};

/// Number of entries in each of the top and bottom contributor lists.
pub const SUMMARY_LEN: usize = 5;

/// Width of one fancy-grid cell, borders excluded.
const CELL_WIDTH: usize = 11;

/// Result of one explanation run.
///
/// `Display` renders the full report: position, global score, sum and
/// diff, the numeric grid, top and bottom contributors, and the optional
/// delta listing and fancy grid.
#[derive(Debug, Clone)]
pub struct Report {
    position: Position,
    global: f64,
    attribution: Attribution,
    counterfactuals: Option<Counterfactuals>,
    with_delta: bool,
    fancy: Option<GridMode>,
}

impl Report {
    pub(crate) fn new(
        position: Position,
        global: f64,
        attribution: Attribution,
        counterfactuals: Option<Counterfactuals>,
        config: &ExplainConfig,
    ) -> Report {
        Report {
            position,
            global,
            attribution,
            counterfactuals,
            with_delta: config.with_delta,
            fancy: config.fancy.then_some(config.grid_mode),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The evaluator's global score.
    pub fn global(&self) -> f64 {
        self.global
    }

    /// Sum of all square attributions.
    pub fn sum(&self) -> f64 {
        self.attribution.total()
    }

    /// Global score minus the attribution sum.
    pub fn diff(&self) -> f64 {
        self.global - self.sum()
    }

    pub fn attribution(&self) -> &Attribution {
        &self.attribution
    }

    /// Counterfactual rows, present only when they were requested.
    pub fn counterfactuals(&self) -> Option<&Counterfactuals> {
        self.counterfactuals.as_ref()
    }

    /// The [`SUMMARY_LEN`] highest-attributed pieces, highest first.
    pub fn top(&self) -> Vec<AttributionRow> {
        let ranked = self.attribution.ranked();
        head(&ranked).to_vec()
    }

    /// The [`SUMMARY_LEN`] lowest-attributed pieces, still highest first.
    ///
    /// With fewer than `2 * SUMMARY_LEN` pieces this overlaps [`Report::top`].
    pub fn bottom(&self) -> Vec<AttributionRow> {
        let ranked = self.attribution.ranked();
        tail(&ranked).to_vec()
    }

    /// The 8x8 numeric attribution grid.
    pub fn plain_grid(&self) -> PlainGrid<'_> {
        PlainGrid(&self.attribution)
    }

    /// The bordered piece/value grid showing `mode` values.
    pub fn fancy_grid(&self, mode: GridMode) -> FancyGrid<'_> {
        FancyGrid {
            position: &self.position,
            attribution: &self.attribution,
            counterfactuals: self.counterfactuals.as_ref(),
            mode,
        }
    }
}

fn head(ranked: &[AttributionRow]) -> &[AttributionRow] {
    &ranked[..ranked.len().min(SUMMARY_LEN)]
}

fn tail(ranked: &[AttributionRow]) -> &[AttributionRow] {
    &ranked[ranked.len().saturating_sub(SUMMARY_LEN)..]
}

/// Squares of one rank, files a to h.
fn rank_squares(rank: Rank) -> impl Iterator<Item = Square> {
    (0u8..8)
        .filter_map(File::from_index)
        .map(move |file| Square::new(rank, file))
}

fn write_attribution_line(f: &mut fmt::Formatter<'_>, row: &AttributionRow) -> fmt::Result {
    let glyph = row.piece.map_or(' ', |piece| piece.glyph());
    writeln!(f, "{:>2} {:>2}: {:+.3}", row.square.to_string(), glyph, row.value)
}

fn write_delta_line(f: &mut fmt::Formatter<'_>, row: &CounterfactualRow) -> fmt::Result {
    writeln!(
        f,
        "{:>2} {:>2}: {:+.3}",
        row.square.to_string(),
        row.piece.glyph(),
        row.delta
    )
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FEN: {}", self.position)?;
        writeln!(f, "Global eval: {:.3} pawns", self.global)?;
        writeln!(
            f,
            "Sum of per-square contributions: {:.3} pawns (diff {:+.3})",
            self.sum(),
            self.diff()
        )?;
        writeln!(f, "Per-square contributions (A8 on the first row):")?;
        write!(f, "{}", self.plain_grid())?;

        let ranked = self.attribution.ranked();
        writeln!(f, "\nTop {SUMMARY_LEN} contributors:")?;
        for row in head(&ranked) {
            write_attribution_line(f, row)?;
        }
        writeln!(f, "\nBottom {SUMMARY_LEN} contributors:")?;
        for row in tail(&ranked) {
            write_attribution_line(f, row)?;
        }

        if let Some(counterfactuals) = self.counterfactuals.as_ref().filter(|_| self.with_delta) {
            writeln!(f, "\nCounterfactual piece deltas (removing piece):")?;
            for row in counterfactuals.rows() {
                write_delta_line(f, row)?;
            }
        }

        if let Some(mode) = self.fancy {
            writeln!(f, "\nFancy grid (piece on first line, value on second):")?;
            write!(f, "{}", self.fancy_grid(mode))?;
        }

        Ok(())
    }
}

/// Attribution values as 8 lines of 8, rank 8 first.
pub struct PlainGrid<'a>(&'a Attribution);

impl fmt::Display for PlainGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::top_down() {
            for (file, sq) in rank_squares(rank).enumerate() {
                if file > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:6.3}", self.0.value_at(sq))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Bordered 8x8 table: piece glyph on one line, value on the next.
///
/// Empty squares are blank. In [`GridMode::Delta`] a piece without a
/// counterfactual (a king) shows `0.00`.
pub struct FancyGrid<'a> {
    position: &'a Position,
    attribution: &'a Attribution,
    counterfactuals: Option<&'a Counterfactuals>,
    mode: GridMode,
}

impl FancyGrid<'_> {
    fn value_at(&self, sq: Square) -> f64 {
        match self.mode {
            GridMode::Contribution => self.attribution.value_at(sq),
            GridMode::Delta => self
                .counterfactuals
                .and_then(|counterfactuals| counterfactuals.delta_at(sq))
                .unwrap_or(0.0),
        }
    }
}

impl fmt::Display for FancyGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = format!("+{}+", vec!["-".repeat(CELL_WIDTH); 8].join("+"));
        let blank = " ".repeat(CELL_WIDTH);

        writeln!(f, "{separator}")?;
        for rank in Rank::top_down() {
            let mut glyphs = Vec::with_capacity(8);
            let mut values = Vec::with_capacity(8);
            for sq in rank_squares(rank) {
                match self.position.piece_at(sq) {
                    Some(piece) => {
                        glyphs.push(format!("{:^CELL_WIDTH$}", piece.glyph()));
                        values.push(format!("{:^CELL_WIDTH$.2}", self.value_at(sq)));
                    }
                    None => {
                        glyphs.push(blank.clone());
                        values.push(blank.clone());
                    }
                }
            }
            writeln!(f, "|{}|", glyphs.join("|"))?;
            writeln!(f, "|{}|", values.join("|"))?;
            writeln!(f, "{separator}")?;
        }
        Ok(())
    }
}

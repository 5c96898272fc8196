use crate::error::{BatchError, Result};
use std::str::FromStr;

/// Resolves "Row:Column" position expressions against a sheet's bounds.
///
/// Accepted shapes, with `R`/`C` the sheet's highest row and column:
/// `":"` → (R, C), `":N"` → (R, N), `"N:"` → (N, C), `"R:C"` and `"N"` → (N, N).
/// Non-positive numbers fall back as described on [`Parser::resolve`].
pub struct Parser;

impl Parser {
    /// Turns a position expression into a 1-based (row, col) pair.
    ///
    /// Fallbacks for non-positive numbers:
    /// - `":N"` uses `max_col` when `N <= 0`
    /// - `"N:"` uses column 1 when `N <= 0`, the row is kept as given
    /// - `"R:C"` becomes (1, 1) when either part is `<= 0`
    /// - `"N"` becomes (1, 1) when `N <= 0`
    pub fn resolve(pos: &str, max_row: i64, max_col: i64) -> Result<(i64, i64)> {
        if pos.is_empty() {
            return Err(BatchError::InvalidCoordinateFormat(pos.to_string()));
        }

        if let Some(rest) = pos.strip_prefix(':') {
            if pos.ends_with(':') {
                return Ok((max_row, max_col));
            }
            let col = Parser::number(rest, pos)?;
            return Ok((max_row, if col > 0 { col } else { max_col }));
        }

        if let Some(head) = pos.strip_suffix(':') {
            let row = Parser::number(head, pos)?;
            return Ok((row, if row > 0 { max_col } else { 1 }));
        }

        if let Some((head, tail)) = pos.split_once(':') {
            let row = Parser::number(head, pos)?;
            let col = Parser::number(tail, pos)?;
            // One shared fallback: both parts must be positive.
            return Ok(if row > 0 && col > 0 { (row, col) } else { (1, 1) });
        }

        let n = Parser::number(pos, pos)?;
        Ok(if n > 0 { (n, n) } else { (1, 1) })
    }

    fn number(fragment: &str, pos: &str) -> Result<i64> {
        i64::from_str(fragment.trim())
            .map_err(|_| BatchError::InvalidCoordinateFormat(pos.to_string()))
    }
}

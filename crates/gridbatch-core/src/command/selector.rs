//! Selector grammar and its resolution against live table dimensions.
//!
//! Selectors are parsed once at tokenization time; range checks happen at
//! execution time because earlier commands may have reshaped the table.

use crate::error::{GridbatchError, Result};
use crate::table::Table;

use super::exec::Selection;

/// One coordinate of a selector: a 1-based index, `-` (last), or `_` (all).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coord {
    Index(usize),
    Last,
    All,
}

impl Coord {
    /// Parse a single component. `allow_all` is false inside four-part
    /// rectangles and `[R,C]` arguments, where `_` is rejected.
    pub(crate) fn parse(text: &str, allow_all: bool) -> Result<Coord> {
        match text {
            "-" => Ok(Coord::Last),
            "_" if allow_all => Ok(Coord::All),
            _ => text
                .parse()
                .map(Coord::Index)
                .map_err(|_| GridbatchError::NumericConversion(text.to_string())),
        }
    }
}

/// Inclusive 0-based span over one axis of `limit` elements.
fn resolve_span(coord: Coord, limit: usize, axis: &str) -> Result<(usize, usize)> {
    if limit == 0 {
        return Err(GridbatchError::BadSelector(format!("table has no {axis}s")));
    }
    match coord {
        Coord::Index(n) if (1..=limit).contains(&n) => Ok((n - 1, n - 1)),
        Coord::Index(n) => Err(GridbatchError::BadSelector(format!(
            "{axis} {n} out of range 1..={limit}"
        ))),
        Coord::Last => Ok((limit - 1, limit - 1)),
        Coord::All => Ok((0, limit - 1)),
    }
}

/// A parsed selector command.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// `R,C` pair forms; `_` and `-` allowed on both axes.
    Pair(Coord, Coord),
    /// `R1,C1,R2,C2` rectangle; components numeric or `-` only.
    Rect(Coord, Coord, Coord, Coord),
    /// `[_]`: restore the saved selection.
    Recall,
    /// `[set]`: save the current selection.
    Save,
    /// `[find STR]`: shrink to the first cell whose content starts with STR.
    Find(String),
    /// `[min]`: collapse to the smallest numeric cell.
    Min,
    /// `[max]`: collapse to the largest numeric cell.
    Max,
}

impl Selector {
    /// Parse the text between the selector brackets.
    pub fn parse(inner: &str) -> Result<Selector> {
        match inner {
            "_" => return Ok(Selector::Recall),
            "set" => return Ok(Selector::Save),
            "min" => return Ok(Selector::Min),
            "max" => return Ok(Selector::Max),
            _ => {}
        }
        if let Some(needle) = inner.strip_prefix("find ") {
            return Ok(Selector::Find(needle.to_string()));
        }

        let parts: Vec<&str> = inner.split(',').collect();
        match parts.as_slice() {
            [row, col] => Ok(Selector::Pair(
                Coord::parse(row, true)?,
                Coord::parse(col, true)?,
            )),
            [r1, c1, r2, c2] => Ok(Selector::Rect(
                Coord::parse(r1, false)?,
                Coord::parse(c1, false)?,
                Coord::parse(r2, false)?,
                Coord::parse(c2, false)?,
            )),
            _ => Err(GridbatchError::BadSelector(inner.to_string())),
        }
    }
}

/// Resolve an `R,C` pair selector.
pub(crate) fn resolve_pair(row: Coord, col: Coord, table: &Table) -> Result<Selection> {
    let (r1, r2) = resolve_span(row, table.rows(), "row")?;
    let (c1, c2) = resolve_span(col, table.cols(), "column")?;
    Ok(Selection { r1, c1, r2, c2 })
}

/// Resolve an `R1,C1,R2,C2` rectangle selector.
pub(crate) fn resolve_rect(
    r1: Coord,
    c1: Coord,
    r2: Coord,
    c2: Coord,
    table: &Table,
) -> Result<Selection> {
    let (top, _) = resolve_span(r1, table.rows(), "row")?;
    let (left, _) = resolve_span(c1, table.cols(), "column")?;
    let (bottom, _) = resolve_span(r2, table.rows(), "row")?;
    let (right, _) = resolve_span(c2, table.cols(), "column")?;
    if top > bottom || left > right {
        return Err(GridbatchError::BadSelector(format!(
            "rectangle {},{},{},{} is inverted",
            top + 1,
            left + 1,
            bottom + 1,
            right + 1
        )));
    }
    Ok(Selection {
        r1: top,
        c1: left,
        r2: bottom,
        c2: right,
    })
}

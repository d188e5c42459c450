//! Command tokenization: from a literal command spec or a command file to a
//! list of selector and action commands.

pub mod exec;
pub mod selector;
pub mod vars;

use std::path::Path;

use crate::error::{GridbatchError, Result};
use crate::scan;

use self::selector::{Coord, Selector};

/// `[R,C]` target argument of swap/sum/avg/count/len: row and column, each a
/// 1-based index or `-` for the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub row: Coord,
    pub col: Coord,
}

impl Target {
    /// Parse a bracketed `[R,C]` argument.
    fn parse(function: &'static str, argument: &str) -> Result<Target> {
        let malformed = || GridbatchError::BadArgument {
            function,
            argument: argument.to_string(),
        };
        let inner = argument
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(malformed)?;
        let parts: Vec<&str> = inner.split(',').collect();
        let [row, col] = parts.as_slice() else {
            return Err(malformed());
        };
        Ok(Target {
            row: Coord::parse(row, false)?,
            col: Coord::parse(col, false)?,
        })
    }

    /// 0-based cell coordinates, validated against the live table bounds.
    pub(crate) fn resolve(&self, rows: usize, cols: usize) -> Result<(usize, usize)> {
        let row = resolve_axis(self.row, rows, "row")?;
        let col = resolve_axis(self.col, cols, "column")?;
        Ok((row, col))
    }
}

fn resolve_axis(coord: Coord, limit: usize, axis: &str) -> Result<usize> {
    if limit == 0 {
        return Err(GridbatchError::InvalidValue(format!("table has no {axis}s")));
    }
    match coord {
        Coord::Index(n) if (1..=limit).contains(&n) => Ok(n - 1),
        Coord::Index(n) => Err(GridbatchError::InvalidValue(format!(
            "{axis} {n} out of range 1..={limit}"
        ))),
        Coord::Last => Ok(limit - 1),
        Coord::All => Err(GridbatchError::InvalidValue(format!(
            "{axis} `_` not allowed in a cell target"
        ))),
    }
}

/// An action command applied to the current selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// `irow`: insert an empty row above the selection.
    InsertRow,
    /// `arow`: insert an empty row below the selection.
    AppendRow,
    /// `drow`: delete the selected rows.
    DeleteRows,
    /// `icol`: insert an empty column left of the selection.
    InsertColumn,
    /// `acol`: insert an empty column right of the selection.
    AppendColumn,
    /// `dcol`: delete the selected columns.
    DeleteColumns,
    /// `set STR`: write STR into every selected cell.
    Set(String),
    /// `clear`: empty every selected cell.
    Clear,
    /// `swap [R,C]`: exchange each selected cell with the target.
    Swap(Target),
    /// `sum [R,C]`: write the selection total into the target.
    Sum(Target),
    /// `avg [R,C]`: write the selection average into the target.
    Avg(Target),
    /// `count [R,C]`: write the number of non-empty selected cells.
    Count(Target),
    /// `len [R,C]`: write the byte length of the bottom-right selected cell.
    Len(Target),
    /// `def _N`: copy the selected cell into slot N.
    Def(usize),
    /// `use _N`: write slot N into every selected cell.
    Use(usize),
    /// `inc _N`: increment slot N.
    Inc(usize),
}

/// One tokenized command: either a selector or an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Select(Selector),
    Act(Action),
}

/// Build the command list from the command-line spec: `-cPATH` reads one
/// command per line from PATH, anything else is a literal `;`-separated
/// command string. The empty literal yields zero commands.
pub fn load_commands(spec: &str) -> Result<Vec<Command>> {
    if let Some(path) = spec.strip_prefix("-c") {
        let content = std::fs::read_to_string(path).map_err(|source| GridbatchError::FileOpen {
            path: Path::new(path).to_path_buf(),
            source,
        })?;
        parse_pieces(content.lines())
    } else {
        parse_pieces(scan::split(spec, b';', true).into_iter())
    }
}

/// Parse command strings, skipping empty ones.
fn parse_pieces<'a>(pieces: impl Iterator<Item = &'a str>) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for piece in pieces {
        if piece.trim().is_empty() {
            continue;
        }
        commands.push(parse_command(piece)?);
    }
    Ok(commands)
}

/// Parse a single command: a bracketed selector, or a function name split
/// from its argument at the first unquoted space.
fn parse_command(text: &str) -> Result<Command> {
    let trimmed = text.trim();
    if let Some(inner) = trimmed.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        return Ok(Command::Select(Selector::parse(inner)?));
    }

    let (function, argument) = scan::split_first(trimmed, b' ', false);
    let action = match function {
        "irow" => Action::InsertRow,
        "arow" => Action::AppendRow,
        "drow" => Action::DeleteRows,
        "icol" => Action::InsertColumn,
        "acol" => Action::AppendColumn,
        "dcol" => Action::DeleteColumns,
        "clear" => Action::Clear,
        "set" => Action::Set(required_arg("set", argument)?.to_string()),
        "swap" => Action::Swap(Target::parse("swap", required_arg("swap", argument)?)?),
        "sum" => Action::Sum(Target::parse("sum", required_arg("sum", argument)?)?),
        "avg" => Action::Avg(Target::parse("avg", required_arg("avg", argument)?)?),
        "count" => Action::Count(Target::parse("count", required_arg("count", argument)?)?),
        "len" => Action::Len(Target::parse("len", required_arg("len", argument)?)?),
        "def" => Action::Def(parse_slot(trimmed, argument)?),
        "use" => Action::Use(parse_slot(trimmed, argument)?),
        "inc" => Action::Inc(parse_slot(trimmed, argument)?),
        _ => return Err(GridbatchError::BadCommand(trimmed.to_string())),
    };
    Ok(Command::Act(action))
}

fn required_arg<'a>(function: &'static str, argument: Option<&'a str>) -> Result<&'a str> {
    argument.ok_or(GridbatchError::BadArgument {
        function,
        argument: String::new(),
    })
}

/// `_N` slot argument of def/use/inc: the sigil is stripped and the rest
/// must be an integer in `0..=9`.
fn parse_slot(command: &str, argument: Option<&str>) -> Result<usize> {
    let bad = || GridbatchError::BadCommand(command.to_string());
    let digits = argument
        .and_then(|arg| arg.strip_prefix('_'))
        .ok_or_else(bad)?;
    match digits.parse::<usize>() {
        Ok(n) if n < vars::SLOT_COUNT => Ok(n),
        _ => Err(bad()),
    }
}

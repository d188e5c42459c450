//! The interpreter: folds the command list over the table, maintaining the
//! current selection, the saved selection, and the temporary variables.

use crate::error::{GridbatchError, Result};
use crate::format::{format_number, parse_number, trim_quotes};
use crate::table::Table;

use super::selector::{self, Selector};
use super::vars::TempVars;
use super::{Action, Command, Target};

/// Inclusive rectangular selection, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub r1: usize,
    pub c1: usize,
    pub r2: usize,
    pub c2: usize,
}

impl Selection {
    /// The initial selection: the top-left cell.
    pub fn origin() -> Self {
        Selection { r1: 0, c1: 0, r2: 0, c2: 0 }
    }

    pub fn single(row: usize, col: usize) -> Self {
        Selection { r1: row, c1: col, r2: row, c2: col }
    }

    pub fn is_single(&self) -> bool {
        self.r1 == self.r2 && self.c1 == self.c2
    }

    /// Row-major cell coordinates of the selection clamped to a
    /// `rows` x `cols` table. The rectangle is logical: after mutations it
    /// may extend past the table, in which case iteration covers fewer
    /// cells.
    fn cells(self, rows: usize, cols: usize) -> impl Iterator<Item = (usize, usize)> {
        let row_end = (self.r2 + 1).min(rows);
        let col_end = (self.c2 + 1).min(cols);
        let c1 = self.c1;
        (self.r1..row_end).flat_map(move |r| (c1..col_end).map(move |c| (r, c)))
    }
}

impl Default for Selection {
    fn default() -> Self {
        Selection::origin()
    }
}

/// Executes a command list in order. State lives for one run.
pub struct Interpreter {
    pub current: Selection,
    pub saved: Selection,
    pub vars: TempVars,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            current: Selection::origin(),
            saved: Selection::origin(),
            vars: TempVars::new(),
        }
    }

    /// Run the whole command list. The first failing command aborts the run;
    /// the caller must not save the table afterwards.
    pub fn run(&mut self, table: &mut Table, commands: &[Command]) -> Result<()> {
        for command in commands {
            self.check_shape(table)?;
            match command {
                Command::Select(sel) => self.select(table, sel)?,
                Command::Act(action) => self.apply(table, action)?,
            }
        }
        self.check_shape(table)
    }

    fn check_shape(&self, table: &Table) -> Result<()> {
        if table.is_rectangular() {
            Ok(())
        } else {
            Err(GridbatchError::Internal(
                "table lost its rectangular shape".to_string(),
            ))
        }
    }

    fn select(&mut self, table: &Table, sel: &Selector) -> Result<()> {
        match sel {
            Selector::Pair(row, col) => {
                self.current = selector::resolve_pair(*row, *col, table)?;
            }
            Selector::Rect(r1, c1, r2, c2) => {
                self.current = selector::resolve_rect(*r1, *c1, *r2, *c2, table)?;
            }
            Selector::Recall => self.current = self.saved,
            Selector::Save => self.saved = self.current,
            Selector::Find(needle) => self.find(table, needle),
            Selector::Min => self.extreme(table, true),
            Selector::Max => self.extreme(table, false),
        }
        Ok(())
    }

    /// `[find STR]`: shrink to the first selected cell whose content starts
    /// with the needle. A miss is a diagnostic, not an error.
    fn find(&mut self, table: &Table, needle: &str) {
        for (r, c) in self.current.cells(table.rows(), table.cols()) {
            if let Some(cell) = table.cell(r, c)
                && cell.as_str().starts_with(needle)
            {
                self.current = Selection::single(r, c);
                return;
            }
        }
        println!("Warning: no cell matching {needle:?} in the current selection");
    }

    /// `[min]` / `[max]`: collapse to the cell with the extreme numeric
    /// value. One pair of surrounding quotes is trimmed before the parse;
    /// the first cell in row-major order wins ties.
    fn extreme(&mut self, table: &Table, minimum: bool) {
        let mut best: Option<(f64, usize, usize)> = None;
        for (r, c) in self.current.cells(table.rows(), table.cols()) {
            let Some(cell) = table.cell(r, c) else { continue };
            let Some(value) = parse_number(trim_quotes(cell.as_str())) else {
                continue;
            };
            let better = match best {
                None => true,
                Some((seen, _, _)) if minimum => value < seen,
                Some((seen, _, _)) => value > seen,
            };
            if better {
                best = Some((value, r, c));
            }
        }
        match best {
            Some((_, r, c)) => self.current = Selection::single(r, c),
            None => println!(
                "Warning: no numeric cell in the current selection for {}",
                if minimum { "min" } else { "max" }
            ),
        }
    }

    fn apply(&mut self, table: &mut Table, action: &Action) -> Result<()> {
        let sel = self.current;
        match action {
            Action::InsertRow => table.insert_row(sel.r1),
            Action::AppendRow => table.insert_row(sel.r2 + 1),
            Action::DeleteRows => table.delete_rows(sel.r1, sel.r2),
            Action::InsertColumn => table.insert_column(sel.c1),
            Action::AppendColumn => table.insert_column(sel.c2 + 1),
            Action::DeleteColumns => table.delete_columns(sel.c1, sel.c2),
            Action::Set(text) => {
                for (r, c) in sel.cells(table.rows(), table.cols()) {
                    if let Some(cell) = table.cell_mut(r, c) {
                        cell.set(text);
                    }
                }
            }
            Action::Clear => {
                for (r, c) in sel.cells(table.rows(), table.cols()) {
                    if let Some(cell) = table.cell_mut(r, c) {
                        cell.clear();
                    }
                }
            }
            Action::Swap(target) => {
                let to = target.resolve(table.rows(), table.cols())?;
                for from in sel.cells(table.rows(), table.cols()) {
                    table.swap_cells(from, to);
                }
            }
            Action::Sum(target) => self.fold_numeric(table, *target, false)?,
            Action::Avg(target) => self.fold_numeric(table, *target, true)?,
            Action::Count(target) => {
                let to = target.resolve(table.rows(), table.cols())?;
                let filled = sel
                    .cells(table.rows(), table.cols())
                    .filter(|&(r, c)| table.cell(r, c).is_some_and(|cell| !cell.is_empty()))
                    .count();
                if let Some(cell) = table.cell_mut(to.0, to.1) {
                    cell.set(&filled.to_string());
                }
            }
            Action::Len(target) => {
                let to = target.resolve(table.rows(), table.cols())?;
                let row = sel.r2.min(table.rows() - 1);
                let col = sel.c2.min(table.cols() - 1);
                let length = table.cell(row, col).map_or(0, |cell| cell.len());
                if let Some(cell) = table.cell_mut(to.0, to.1) {
                    cell.set(&length.to_string());
                }
            }
            Action::Def(slot) => {
                if !sel.is_single() {
                    return Err(GridbatchError::BadCommand(format!(
                        "def _{slot} needs a single-cell selection"
                    )));
                }
                if table.rows() > 0 {
                    let row = sel.r1.min(table.rows() - 1);
                    let col = sel.c1.min(table.cols() - 1);
                    if let Some(cell) = table.cell(row, col) {
                        self.vars.set(*slot, cell.as_str());
                    }
                }
            }
            Action::Use(slot) => {
                if let Some(value) = self.vars.get(*slot) {
                    for (r, c) in sel.cells(table.rows(), table.cols()) {
                        if let Some(cell) = table.cell_mut(r, c) {
                            cell.set(value);
                        }
                    }
                }
            }
            Action::Inc(slot) => self.vars.inc(*slot),
        }
        Ok(())
    }

    /// Shared `sum`/`avg` scan. Every selected cell must parse as a number;
    /// the first failure writes the literal `NaN` and stops the scan.
    fn fold_numeric(&self, table: &mut Table, target: Target, average: bool) -> Result<()> {
        let to = target.resolve(table.rows(), table.cols())?;
        let mut total = 0.0;
        let mut scanned = 0usize;
        let mut failed = false;
        for (r, c) in self.current.cells(table.rows(), table.cols()) {
            match table.cell(r, c).and_then(|cell| cell.as_number()) {
                Some(value) => {
                    total += value;
                    scanned += 1;
                }
                None => {
                    failed = true;
                    break;
                }
            }
        }
        let text = if failed {
            "NaN".to_string()
        } else if average {
            format_number(total / scanned as f64)
        } else {
            format_number(total)
        };
        if let Some(cell) = table.cell_mut(to.0, to.1) {
            cell.set(&text);
        }
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

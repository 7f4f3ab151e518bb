use super::{Row, Table};
use std::fmt;

/// Width of every column when a table is displayed.
const COLUMN_WIDTH: usize = 15;

fn border(f: &mut fmt::Formatter<'_>, arity: usize) -> fmt::Result {
    writeln!(f, "|-{}-|", "-".repeat(COLUMN_WIDTH * arity))
}

/// Displays the table as a grid: its name, its attribute names and one line per tuple,
/// in insertion order. A tuple the store fails to read ends the grid with an error line.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arity = self.schema.arity();
        writeln!(f)?;
        writeln!(f, " Table {}", self.name())?;
        border(f, arity)?;
        write!(f, "| ")?;
        for attribute in self.schema.attributes() {
            write!(f, "{:>width$}", attribute, width = COLUMN_WIDTH)?;
        }
        writeln!(f, " |")?;
        border(f, arity)?;
        for tuple in self.tuples() {
            let tuple = match tuple {
                Ok(tuple) => tuple,
                Err(e) => {
                    writeln!(f, "| <error: {}> |", e)?;
                    break;
                }
            };
            write!(f, "| ")?;
            for value in &tuple {
                write!(f, "{:>width$}", value.to_string(), width = COLUMN_WIDTH)?;
            }
            writeln!(f, " |")?;
        }
        border(f, arity)
    }
}

/// Displays the index of a table as `key -> tuple` lines, in key order. A tuple the
/// store fails to read is shown as `key -> <error: ...>`.
pub struct IndexDisplay<'a> {
    table: &'a Table,
}

impl fmt::Display for IndexDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, " Index for {}", self.table.name())?;
        writeln!(f, "-------------------")?;
        for (key, position) in self.table.index.iter() {
            match crate::store::TupleStore::get(&self.table.tuples, position) {
                Ok(Some(tuple)) => writeln!(f, "{} -> [{}]", key, Row(&tuple))?,
                Ok(None) => writeln!(f, "{} -> <missing tuple {}>", key, position)?,
                Err(e) => writeln!(f, "{} -> <error: {}>", key, e)?,
            }
        }
        writeln!(f, "-------------------")
    }
}

impl Table {
    /// Returns a value displaying the index of the table.
    pub fn display_index(&self) -> IndexDisplay<'_> {
        IndexDisplay { table: self }
    }
}

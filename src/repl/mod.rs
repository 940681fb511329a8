mod statement;

pub use statement::{Statement, StatementError};

use std::io::{BufRead, Write};

use crate::table::{Table, TableError, TableResult};

const PROMPT: &str = "db > ";

/// Non-statement commands prefixed with `.`
enum MetaCommand {
    Exit,
    Unrecognized,
}

impl MetaCommand {
    fn parse(input: &str) -> Option<MetaCommand> {
        if !input.starts_with('.') {
            return None;
        }
        match input {
            ".exit" => Some(MetaCommand::Exit),
            _ => Some(MetaCommand::Unrecognized),
        }
    }
}

/// Synchronous read-parse-dispatch-print loop over one open table.
///
/// Parse and validation failures are printed and the loop continues; only
/// I/O failures propagate out, at which point the caller exits non-zero.
pub struct Repl {
    table: Table,
}

impl Repl {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// Run until `.exit`, an empty line, or end of input, then flush the
    /// table so the session's inserts reach disk. Exhausting the input
    /// stream must persist exactly like an explicit `.exit`, otherwise
    /// piped sessions would silently lose their rows.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> TableResult<()> {
        let mut line = String::new();
        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            line.clear();
            let bytes_read = input.read_line(&mut line)?;
            let line = line.trim();
            if bytes_read == 0 || line.is_empty() {
                break;
            }

            if let Some(meta) = MetaCommand::parse(line) {
                match meta {
                    MetaCommand::Exit => break,
                    MetaCommand::Unrecognized => {
                        writeln!(output, "Unrecognized command '{line}'")?;
                    }
                }
                continue;
            }

            match Statement::parse(line) {
                Ok(statement) => self.execute(statement, output)?,
                Err(err) => writeln!(output, "{err}")?,
            }
        }

        self.table.flush()
    }

    fn execute<W: Write>(&mut self, statement: Statement, output: &mut W) -> TableResult<()> {
        match statement {
            Statement::Insert(row) => match self.table.insert(&row) {
                Ok(()) => writeln!(output, "Executed")?,
                Err(TableError::TableFull) => writeln!(output, "Table full")?,
                Err(err) => return Err(err),
            },
            Statement::Select => {
                for row in self.table.scan() {
                    let row = row?;
                    writeln!(output, "{}, {}, {}", row.id, row.username, row.email)?;
                }
                writeln!(output, "Executed")?;
            }
        }
        Ok(())
    }
}

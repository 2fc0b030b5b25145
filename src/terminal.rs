//! An interactive list screen for managing transactions from a terminal.
//!
//! The screen shows every transaction and accepts short commands to add, edit
//! and delete them. Transactions are always selected by ID, never by their
//! position in the list.

use std::{
    fmt::Display,
    io::{self, BufRead, Write},
    str::FromStr,
};

use crate::{
    Error,
    backend::Backend,
    store::TransactionStore,
    transaction::{TransactionId, TransactionRecord},
    view::transactions_table,
};

/// The example cost shown when asking for the cost of a new transaction.
pub const COST_PLACEHOLDER: &str = "$1.99";

const HELP: &str = "Commands:
  a         add a transaction
  e <ID>    edit a transaction
  d <ID>    delete a transaction
  r         refresh the list
  h         show this help
  q         quit
";

/// A command entered at the list screen prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Quick-add a new transaction.
    Add,
    /// Edit the transaction with the ID.
    Edit(TransactionId),
    /// Delete the transaction with the ID.
    Delete(TransactionId),
    /// Reload the list from the database.
    Refresh,
    /// Show the list of commands.
    Help,
    /// Leave the list screen.
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let Some(name) = parts.next() else {
            return Err("Enter a command, or 'h' for help.".to_owned());
        };
        let argument = parts.next();

        if parts.next().is_some() {
            return Err(format!("Too many arguments for '{name}'."));
        }

        match (name, argument) {
            ("a" | "add", None) => Ok(Command::Add),
            ("e" | "edit", Some(id)) => parse_id(id).map(Command::Edit),
            ("d" | "delete", Some(id)) => parse_id(id).map(Command::Delete),
            ("e" | "edit" | "d" | "delete", None) => {
                Err(format!("'{name}' needs the ID of a transaction, e.g. '{name} 1'."))
            }
            ("r" | "refresh", None) => Ok(Command::Refresh),
            ("h" | "help" | "?", None) => Ok(Command::Help),
            ("q" | "quit", None) => Ok(Command::Quit),
            _ => Err(format!("Unknown command '{}', enter 'h' for help.", s.trim())),
        }
    }
}

fn parse_id(text: &str) -> Result<TransactionId, String> {
    text.parse()
        .map_err(|_| format!("'{text}' is not a valid transaction ID."))
}

/// Reads commands from `input` and writes the list screen to `output`.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Create a terminal that reads from `input` and writes to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the terminal and return its output.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Show the list screen until the user quits or `input` is exhausted.
    ///
    /// Store errors are reported to the user and do not end the loop.
    ///
    /// # Errors
    /// Returns an error if reading from `input` or writing to `output` fails.
    pub fn run<B: Backend>(&mut self, store: &mut TransactionStore<B>) -> io::Result<()> {
        self.refresh(store)?;
        writeln!(self.output, "Enter 'h' for help.")?;

        loop {
            let Some(line) = self.prompt("> ")? else {
                break;
            };

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(message) => {
                    writeln!(self.output, "{message}")?;
                    continue;
                }
            };

            tracing::debug!("Running command {command:?}");

            match command {
                Command::Add => self.add(store)?,
                Command::Edit(id) => self.edit(store, id)?,
                Command::Delete(id) => self.delete(store, id)?,
                Command::Refresh => self.refresh(store)?,
                Command::Help => write!(self.output, "{HELP}")?,
                Command::Quit => break,
            }
        }

        self.output.flush()
    }

    /// Write the table of `records`.
    ///
    /// # Errors
    /// Returns an error if writing to `output` fails.
    pub fn render_list(&mut self, records: &[TransactionRecord]) -> io::Result<()> {
        write!(self.output, "{}", transactions_table(records))
    }

    /// Ask the user for a line of text.
    ///
    /// Returns `None` once `input` has no more lines.
    ///
    /// # Errors
    /// Returns an error if reading from `input` or writing to `output` fails.
    pub fn prompt(&mut self, label: impl Display) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\n', '\r']).to_owned()))
    }

    /// Tell the user why an operation failed and what they can do about it.
    ///
    /// # Errors
    /// Returns an error if writing to `output` fails.
    pub fn report_error(&mut self, error: &Error) -> io::Result<()> {
        tracing::warn!("Operation failed: {error}");

        match error {
            Error::EmptyTitle => {
                writeln!(self.output, "A title is required to save a transaction.")
            }
            Error::NotFound(id) => writeln!(
                self.output,
                "Transaction {id} could not be found. \
                Enter 'r' to refresh the list and check the ID."
            ),
            error if error.is_storage_error() => writeln!(
                self.output,
                "Your changes were not saved: {error}. Please try again."
            ),
            error => writeln!(self.output, "Something went wrong: {error}"),
        }
    }

    fn refresh<B: Backend>(&mut self, store: &mut TransactionStore<B>) -> io::Result<()> {
        if let Err(error) = store.list() {
            self.report_error(&error)?;
        }

        self.render_list(store.records())
    }

    fn add<B: Backend>(&mut self, store: &mut TransactionStore<B>) -> io::Result<()> {
        writeln!(self.output, "New transaction (leave the title blank to cancel)")?;

        let Some(title) = self.prompt("Title: ")? else {
            return self.cancelled();
        };
        // Saving is only offered once something other than spaces is typed.
        if title.trim().is_empty() {
            return self.cancelled();
        }

        let Some(cost) = self.prompt(format!("Cost ({COST_PLACEHOLDER}): "))? else {
            return self.cancelled();
        };

        match store.create(&title, &cost) {
            Ok(record) => {
                writeln!(self.output, "Saved transaction {}.", record.id)?;
                self.render_list(store.records())
            }
            Err(error) => self.report_error(&error),
        }
    }

    fn edit<B: Backend>(
        &mut self,
        store: &mut TransactionStore<B>,
        id: TransactionId,
    ) -> io::Result<()> {
        let Some(current) = store.get(id).cloned() else {
            return self.report_error(&Error::NotFound(id));
        };

        writeln!(
            self.output,
            "Editing transaction {id} (leave a field blank to keep it)"
        )?;

        let Some(title) = self.prompt(format!("Title [{}]: ", current.title))? else {
            return self.cancelled();
        };
        let Some(cost) = self.prompt(format!("Cost [{}]: ", current.cost))? else {
            return self.cancelled();
        };

        let title = if title.trim().is_empty() {
            current.title.to_string()
        } else {
            title
        };
        let cost = if cost.is_empty() { current.cost } else { cost };

        match store.update(id, &title, &cost) {
            Ok(_) => {
                writeln!(self.output, "Saved transaction {id}.")?;
                self.render_list(store.records())
            }
            Err(error) => self.report_error(&error),
        }
    }

    fn delete<B: Backend>(
        &mut self,
        store: &mut TransactionStore<B>,
        id: TransactionId,
    ) -> io::Result<()> {
        match store.delete(id) {
            Ok(()) => {
                writeln!(self.output, "Deleted transaction {id}.")?;
                self.render_list(store.records())
            }
            Err(error) => self.report_error(&error),
        }
    }

    fn cancelled(&mut self) -> io::Result<()> {
        writeln!(self.output, "Cancelled.")
    }
}


#[cfg(test)]
mod terminal_tests {
    use std::io::Cursor;

    use crate::{backend::SqliteBackend, store::TransactionStore};

    use super::Terminal;

    fn get_store() -> TransactionStore<SqliteBackend> {
        TransactionStore::open(SqliteBackend::open_in_memory().unwrap()).unwrap()
    }

    fn run(store: &mut TransactionStore<SqliteBackend>, input: &str) -> String {
        let mut terminal = Terminal::new(Cursor::new(input.to_owned()), Vec::new());
        terminal.run(store).expect("Terminal session failed");

        String::from_utf8(terminal.into_output()).unwrap()
    }

    fn values(store: &TransactionStore<SqliteBackend>) -> Vec<(String, String)> {
        store
            .records()
            .iter()
            .map(|record| (record.title.to_string(), record.cost.clone()))
            .collect()
    }

    #[test]
    fn quick_add_creates_transaction() {
        let mut store = get_store();

        let output = run(&mut store, "a\nCoffee\n3.50\nq\n");

        assert_eq!(values(&store), vec![("Coffee".to_owned(), "3.50".to_owned())]);
        assert!(output.contains("Cost ($1.99): "));
        assert!(output.contains("Saved transaction"));
    }

    #[test]
    fn blank_title_cancels_add() {
        let mut store = get_store();

        let output = run(&mut store, "a\n   \nq\n");

        assert!(store.list().unwrap().is_empty());
        assert!(output.contains("Cancelled."));
    }

    #[test]
    fn quick_add_keeps_title_as_typed() {
        let mut store = get_store();

        run(&mut store, "a\n Flat white \n4.20\nq\n");

        assert_eq!(
            values(&store),
            vec![(" Flat white ".to_owned(), "4.20".to_owned())]
        );
    }

    #[test]
    fn end_of_input_during_add_cancels() {
        let mut store = get_store();

        let output = run(&mut store, "a\nCoffee\n");

        assert!(store.list().unwrap().is_empty());
        assert!(output.contains("Cancelled."));
    }

    #[test]
    fn edit_prefills_and_keeps_blank_fields() {
        let mut store = get_store();
        let record = store.create("Coffee", "3.50").unwrap();

        let output = run(&mut store, &format!("e {}\n\n4.00\nq\n", record.id));

        assert!(output.contains("Title [Coffee]: "));
        assert!(output.contains("Cost [3.50]: "));
        assert_eq!(values(&store), vec![("Coffee".to_owned(), "4.00".to_owned())]);
    }

    #[test]
    fn edit_unknown_id_reports_not_found() {
        let mut store = get_store();

        let output = run(&mut store, "e 42\nq\n");

        assert!(output.contains("Transaction 42 could not be found."));
    }

    #[test]
    fn delete_removes_transaction() {
        let mut store = get_store();
        let coffee = store.create("Coffee", "3.50").unwrap();
        store.create("Lunch", "12.00").unwrap();

        let output = run(&mut store, &format!("d {}\nq\n", coffee.id));

        assert!(output.contains(&format!("Deleted transaction {}.", coffee.id)));
        assert_eq!(values(&store), vec![("Lunch".to_owned(), "12.00".to_owned())]);
    }

    #[test]
    fn deleting_twice_reports_not_found() {
        let mut store = get_store();
        let coffee = store.create("Coffee", "3.50").unwrap();

        let output = run(&mut store, &format!("d {0}\nd {0}\nq\n", coffee.id));

        assert!(output.contains(&format!("Transaction {} could not be found.", coffee.id)));
    }

    #[test]
    fn list_is_rendered_on_start() {
        let mut store = get_store();
        store.create("Coffee", "3.50").unwrap();

        let output = run(&mut store, "q\n");

        assert!(output.starts_with("ID  Title   Cost\n 1  Coffee  3.50\n"));
    }

    #[test]
    fn unknown_command_shows_hint() {
        let mut store = get_store();

        let output = run(&mut store, "zzz\n");

        assert!(output.contains("Unknown command 'zzz'"));
    }
}

use std::{error::Error, io, process::ExitCode};

use clap::Parser;

use cashtab::{
    SqliteBackend, TransactionStore,
    config::{Args, Command, validate_db_path},
    logging::setup_logging,
    terminal::Terminal,
    view::{transactions_json, transactions_table},
};

/// Manage the transactions in a CashTab database.
fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(args.log_file.as_deref()) {
        print_error(format!("could not open the log file: {error}"));
        return ExitCode::FAILURE;
    }

    if let Err(message) = validate_db_path(&args.db_path) {
        print_error(message);
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            print_error(error);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    tracing::debug!("Opening database at {:?}", args.db_path);

    let backend = SqliteBackend::open(&args.db_path)?;
    let mut store = TransactionStore::open(backend)?;

    match args.command.unwrap_or(Command::Interactive) {
        Command::List { json } => {
            let records = store.list()?;

            if json {
                println!("{}", transactions_json(records)?);
            } else {
                print!("{}", transactions_table(records));
            }
        }
        Command::Add { title, cost } => {
            let record = store.create(&title, cost.as_deref().unwrap_or_default())?;
            println!("Saved transaction {}.", record.id);
        }
        Command::Edit { id, title, cost } => {
            let current = store
                .get(id)
                .cloned()
                .ok_or(cashtab::Error::NotFound(id))?;

            let record = store.update(
                id,
                title.as_deref().unwrap_or(current.title.as_ref()),
                cost.as_deref().unwrap_or(&current.cost),
            )?;
            println!("Saved transaction {}.", record.id);
        }
        Command::Delete { id } => {
            store.delete(id)?;
            println!("Deleted transaction {id}.");
        }
        Command::Interactive => {
            let mut terminal = Terminal::new(io::stdin().lock(), io::stdout().lock());
            terminal.run(&mut store)?;
        }
    }

    Ok(())
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}

fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}

// Bookcase - Personal Library Catalog
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


use anyhow::{bail, Context};
use bookcase::file::{validate_transfer_filename, DataDirectory, InstanceLock};
use bookcase::storage::DEFAULT_COLLECTION;
use bookcase::{
    Book, BookForm, Bookcase, BookcaseError, CsvCodec, Language, Message, SearchField, Settings,
    TableCodec, TransferFormat,
};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookcase-cli")]
#[command(about = "Bookcase Manager - personal library catalog", long_about = None)]
struct Cli {
    /// Data directory (default: ~/BookcaseDb, or $BOOKCASE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Collection to work on
    #[arg(short, long, global = true, default_value = DEFAULT_COLLECTION)]
    collection: String,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a collection (opening an existing one is harmless)
    Create,
    /// List every book in the collection
    List {
        /// Print JSON instead of one line per book
        #[arg(long)]
        json: bool,
    },
    /// Add a book
    Add(BookArgs),
    /// Change fields of a stored book
    Edit {
        /// Book id, as shown by `list`
        id: i64,
        #[command(flatten)]
        fields: BookArgs,
        /// Genre (not part of the entry form)
        #[arg(long)]
        genre: Option<String>,
    },
    /// Delete a book
    Delete {
        /// Book id, as shown by `list`
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Search one field (title, author, isbn, shelf, genre)
    Search {
        field: SearchField,
        query: String,
    },
    /// Export the collection to bookcase_<collection>.csv
    ///
    /// Transfer files are CSV; spreadsheet (.xlsx) files are not read or
    /// written by this tool.
    Export {
        /// Output file (default: in the data directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a bookcase_<name>.csv file into the collection
    Import {
        /// File name in the data directory, or a path
        file: PathBuf,
    },
    /// List the collections in the data directory
    Collections,
    /// Show or change the language (en, gr)
    Language { language: Option<Language> },
}

/// Entry form fields; every one is optional so `edit` can change a subset
#[derive(Args)]
struct BookArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author_last: Option<String>,
    #[arg(long)]
    author_first: Option<String>,
    #[arg(long)]
    trans_last: Option<String>,
    #[arg(long)]
    trans_first: Option<String>,
    #[arg(long)]
    publisher: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    isbn: Option<String>,
    #[arg(long)]
    copies: Option<String>,
    #[arg(long)]
    shelf_row: Option<String>,
    #[arg(long)]
    shelf_col: Option<String>,
}

impl BookArgs {
    fn fill(self, form: &mut BookForm) {
        let fields = [
            (self.title, &mut form.title),
            (self.author_last, &mut form.author_last),
            (self.author_first, &mut form.author_first),
            (self.trans_last, &mut form.trans_last),
            (self.trans_first, &mut form.trans_first),
            (self.publisher, &mut form.publisher),
            (self.year, &mut form.pub_year),
            (self.isbn, &mut form.isbn),
            (self.copies, &mut form.num_of_copies),
            (self.shelf_row, &mut form.shelf_row),
            (self.shelf_col, &mut form.shelf_col),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

fn print_books(books: &[Book], language: Language) {
    for book in books {
        println!("{:>5}  {}", book.id, book);
    }
    println!(
        "{} {} {}",
        Message::Found.text(language),
        books.len(),
        Message::SearchCompleteMsg.text(language)
    );
}

/// Ask before deleting; anything but y/yes declines
fn confirm_delete(book: &Book, language: Language) -> io::Result<bool> {
    print!("{}{}? [y/N] ", Message::DeleteConfirmMsg.text(language), book);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Localized text for library errors, anyhow's chain for everything else
fn report(err: &anyhow::Error, language: Language) -> String {
    match err.downcast_ref::<BookcaseError>() {
        Some(e) => e.user_message(language),
        None => format!("{:#}", err),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { bookcase::logging::DEFAULT_FILTER };
    if let Err(e) = bookcase::logging::init_with_filter(filter) {
        eprintln!("{}", e);
    }

    let dir = cli.data_dir.clone().map(DataDirectory::new).unwrap_or_default();
    if let Err(e) = dir.setup() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let lock = match InstanceLock::acquire(dir.path()) {
        Ok(lock) => lock,
        Err(e) => {
            eprintln!("{}", e.user_message(Language::default()));
            std::process::exit(1);
        }
    };

    let mut settings = match Settings::load_or_create(dir.settings_path()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "could not read settings, using defaults");
            Settings::default()
        }
    };

    let result = run(cli, &dir, &mut settings).await;

    if let Err(e) = lock.release() {
        tracing::warn!(error = %e, "failed to release instance lock");
    }
    if let Err(e) = result {
        eprintln!("{}", report(&e, settings.gui_language));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, dir: &DataDirectory, settings: &mut Settings) -> anyhow::Result<()> {
    let language = settings.gui_language;

    match cli.command {
        Commands::Collections => {
            for name in dir.collections()? {
                println!("{}", name);
            }
            return Ok(());
        }
        Commands::Language { language: None } => {
            println!("{}", language);
            return Ok(());
        }
        Commands::Language { language: Some(new) } => {
            settings.set_language(new, dir.settings_path())?;
            println!("{}", Message::Welcome.text(new));
            return Ok(());
        }
        _ => {}
    }

    let shelf = Bookcase::open(dir.path(), &cli.collection)
        .await
        .with_context(|| format!("Failed to open collection '{}'", cli.collection))?;

    let outcome = execute(cli.command, &shelf, dir, language).await;
    shelf.close().await?;
    outcome
}

async fn execute(
    command: Commands,
    shelf: &Bookcase,
    dir: &DataDirectory,
    language: Language,
) -> anyhow::Result<()> {
    match command {
        Commands::Create => {
            shelf.create_schema().await?;
            println!("{}", shelf.name());
        }
        Commands::List { json } => {
            let books = shelf.list().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&books)?);
            } else if books.is_empty() {
                println!("{}", Message::NoBooksFoundMsg.text(language));
            } else {
                print_books(&books, language);
            }
        }
        Commands::Add(fields) => {
            let mut form = BookForm::new();
            fields.fill(&mut form);
            form.validate().map_err(BookcaseError::from)?;

            let book = shelf.add_book(form.to_new_book().map_err(BookcaseError::from)?).await?;
            println!("{}: {}", Message::BookSavedMsg.text(language), book);
        }
        Commands::Edit { id, fields, genre } => {
            let mut book = shelf.get_book(id).await?;
            let mut form = BookForm::from_book(&book);
            fields.fill(&mut form);
            form.validate().map_err(BookcaseError::from)?;

            let genre_changed = genre.as_ref().is_some_and(|g| g.to_uppercase() != book.genre);
            if !form.changed(&book).map_err(BookcaseError::from)? && !genre_changed {
                println!("{}", book);
                return Ok(());
            }

            form.apply_to(&mut book).map_err(BookcaseError::from)?;
            if let Some(genre) = genre {
                book.genre = genre;
            }
            shelf.save_book(&mut book).await?;
            println!("{}: {}", Message::BookSavedMsg.text(language), book);
        }
        Commands::Delete { id, yes } => {
            let book = shelf.get_book(id).await?;
            if !yes && !confirm_delete(&book, language)? {
                return Ok(());
            }
            shelf.delete_book(&book).await?;
            println!("{}: {}", Message::BookDeletedMsg.text(language), book);
        }
        Commands::Search { field, query } => {
            let books = shelf.search(field, &query).await?;
            if books.is_empty() {
                println!("{}", Message::NoBooksFoundMsg.text(language));
            } else {
                print_books(&books, language);
            }
        }
        Commands::Export { output } => {
            let path = output.unwrap_or_else(|| dir.transfer_path(shelf.name(), TransferFormat::Csv));
            let table = shelf.dump_table().await?;
            CsvCodec::new()
                .write(&path, &table)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            println!("{}{}", Message::ExportedTo.text(language), path.display());
        }
        Commands::Import { file } => {
            let path = if file.components().count() == 1 {
                dir.path().join(&file)
            } else {
                file
            };
            let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
                bail!("Invalid file name: {}", path.display());
            };
            validate_transfer_filename(filename, TransferFormat::Csv)?;
            if !path.is_file() {
                let parent = path.parent().unwrap_or(dir.path());
                bail!("{}{}", Message::NoFileFoundMsg.text(language), parent.display());
            }

            let table = CsvCodec::new().read(&path)?;
            let report = shelf.import_table(&table).await?;
            println!(
                "{}{} ({} imported, {} skipped)",
                Message::ImportedFrom.text(language),
                path.display(),
                report.imported,
                report.skipped_count()
            );
            for skipped in &report.skipped {
                println!("  row {}: {}", skipped.row, skipped.reason);
            }
        }
        Commands::Collections | Commands::Language { .. } => {}
    }

    Ok(())
}

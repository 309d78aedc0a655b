use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use spendbook::{
    AppState, RawForm, create_category, create_expense, create_tag, list_categories, list_tags,
};

/// A utility for creating a demo database for spendbook.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    if output_path
        .extension()
        .is_none_or(|extension| extension.is_empty())
    {
        eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let state = AppState::new(Connection::open(output_path)?)?;

    println!("Creating categories and tags...");
    for name in ["Groceries", "Rent", "Transport", "Eating Out"] {
        create_category(
            &RawForm::from_iter([("name", name)]),
            &state.category_store,
            &state.page_cache,
        )?;
    }

    for name in ["work", "holiday", "shared"] {
        create_tag(
            &RawForm::from_iter([("name", name)]),
            &state.tag_store,
            &state.page_cache,
        )?;
    }

    println!("Creating expenses...");
    let category_id = |name: &str| find_id(list_categories(&state.category_store), name);
    let tag_id = |name: &str| find_id(list_tags(&state.tag_store), name);

    let expenses = [
        ("82", "Weekly shop", "2025-01-04", "Groceries", vec!["shared"]),
        ("1200", "January rent", "2025-01-01", "Rent", vec!["shared"]),
        ("15", "Bus pass top-up", "2025-01-06", "Transport", vec!["work"]),
        ("46", "Dinner in Queenstown", "2025-01-12", "Eating Out", vec!["holiday"]),
        ("12", "Lunch with team", "2025-01-15", "Eating Out", vec!["work", "shared"]),
    ];

    for (amount, description, date, category, tags) in expenses {
        let mut fields = vec![
            ("amount".to_owned(), amount.to_owned()),
            ("description".to_owned(), description.to_owned()),
            ("date".to_owned(), date.to_owned()),
            ("categoryId".to_owned(), category_id(category)?),
        ];
        for tag in tags {
            fields.push(("tags".to_owned(), tag_id(tag)?));
        }

        create_expense(
            &RawForm::from(fields),
            &state.expense_store,
            &state.page_cache,
        )?;
    }

    println!("Success!");

    Ok(())
}

/// The ID of the record called `name` in `records`.
fn find_id<T: Named>(
    records: Result<Vec<T>, spendbook::Error>,
    name: &str,
) -> Result<String, Box<dyn Error>> {
    records?
        .into_iter()
        .find(|record| record.name() == name)
        .map(|record| record.id())
        .ok_or_else(|| format!("Could not find {name:?}").into())
}

trait Named {
    fn name(&self) -> &str;
    fn id(self) -> String;
}

impl Named for spendbook::Category {
    fn name(&self) -> &str {
        self.name.as_ref()
    }

    fn id(self) -> String {
        self.id
    }
}

impl Named for spendbook::Tag {
    fn name(&self) -> &str {
        self.name.as_ref()
    }

    fn id(self) -> String {
        self.id
    }
}

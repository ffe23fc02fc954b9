use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::OffsetDateTime;

use usaha_kas::{
    MonthlyExpenseInput, Period, TransactionEntry, create_transaction, initialize_db,
    upsert_monthly_expense,
};

/// A utility for creating a demo database for the REST API server of usaha-kas.
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

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Logging a sample month...");

    let today = OffsetDateTime::now_utc().date();
    let period = Period::containing(today);
    let first_day = period.first_day();

    let entries = [
        TransactionEntry {
            date: first_day,
            asset_type: "car".parse().unwrap(),
            rental_type: Some("drop".parse().unwrap()),
            vehicle: Some("Veloz 2021 DR 1359 DT".to_owned()),
            from_location: Some("Mataram".to_owned()),
            to_location: Some("Senggigi".to_owned()),
            price: Some(300_000.0),
            fuel_cost: Some(20_000.0),
            driver_cost: Some(15_000.0),
            trips: Some(3),
            days: None,
            sales_amount: None,
        },
        TransactionEntry {
            date: first_day,
            asset_type: "car".parse().unwrap(),
            rental_type: Some("harian".parse().unwrap()),
            vehicle: Some("Avanza 2023 Z 1494 TQ".to_owned()),
            from_location: None,
            to_location: None,
            price: Some(350_000.0),
            fuel_cost: None,
            driver_cost: None,
            trips: None,
            days: Some(2),
            sales_amount: None,
        },
        TransactionEntry {
            date: first_day,
            asset_type: "speedboat".parse().unwrap(),
            rental_type: None,
            vehicle: Some("Speed Boat Bintang Laut".to_owned()),
            from_location: None,
            to_location: None,
            price: Some(500_000.0),
            fuel_cost: Some(150_000.0),
            driver_cost: None,
            trips: Some(1),
            days: None,
            sales_amount: None,
        },
        TransactionEntry {
            date: first_day,
            asset_type: "restaurant".parse().unwrap(),
            rental_type: None,
            vehicle: None,
            from_location: None,
            to_location: None,
            price: None,
            fuel_cost: None,
            driver_cost: None,
            trips: None,
            days: None,
            sales_amount: Some(150_000.0),
        },
    ];

    for entry in entries {
        let new_transaction = entry.classify()?;
        create_transaction(new_transaction, &conn)?;
    }

    upsert_monthly_expense(
        period,
        MonthlyExpenseInput {
            date: first_day,
            staff_salary: Some(1_500_000.0),
            night_guard_salary: Some(800_000.0),
            electricity_bill: Some(500_000.0),
            water_bill: Some(200_000.0),
            internet_bill: Some(300_000.0),
            other_expenses: None,
        },
        &conn,
    )?;

    println!("Success!");

    Ok(())
}

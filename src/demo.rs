//! The fixed seed-and-report sequence.
//!
//! One non-interactive run against a fresh database: seed sample rows, apply
//! one update and one delete, run one search, then render every table. The
//! sequence doubles as the crate's end-to-end acceptance scenario.

use crate::db::{self, DbPool, UserChanges};
use crate::errors::Result;
use crate::report;
use chrono::NaiveDate;
use tracing::{info, instrument};

const SAMPLE_USERS: [(&str, &str, &str, &str); 2] = [
    ("John", "Smith", "john.smith@gmail.com", "123J45"),
    ("Ann", "Mari", "ann.mari@gmail.com", "6A789"),
];

const SAMPLE_EXPENSE_CATEGORIES: [&str; 3] = ["Food", "Transport", "Utilities"];

const SAMPLE_INCOME_SOURCES: [(&str, &str); 3] = [
    ("Salary", "Monthly salary from employer"),
    ("Freelance", "Freelance work income"),
    ("Investment", "Income from investments"),
];

// (user_id, category_id, amount) - rows reference users and categories by the
// positional ids a fresh database assigns, with no defensive check.
const SAMPLE_EXPENSES: [(i64, i64, f64); 3] = [(1, 1, 200.0), (2, 2, 50.0), (1, 3, 100.0)];

// (user_id, income_source_id, amount)
const SAMPLE_INCOMES: [(i64, i64, f64); 3] = [(1, 1, 1500.0), (2, 2, 1200.0), (1, 3, 800.0)];

fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
}

/// Inserts the fixed sample rows, one commit per row.
#[instrument(skip(pool))]
pub async fn seed_sample_data(pool: &DbPool) -> Result<()> {
    info!("Seeding sample data...");

    for (first_name, last_name, email, password) in SAMPLE_USERS {
        db::create_user(pool, first_name, last_name, email, password).await?;
    }

    for category_name in SAMPLE_EXPENSE_CATEGORIES {
        db::create_expense_category(pool, category_name).await?;
    }

    for (source_name, description) in SAMPLE_INCOME_SOURCES {
        db::create_income_source(pool, source_name, description).await?;
    }

    let date = sample_date();
    for (user_id, category_id, amount) in SAMPLE_EXPENSES {
        db::create_expense(pool, user_id, category_id, amount, date).await?;
    }

    for (user_id, income_source_id, amount) in SAMPLE_INCOMES {
        db::create_income(pool, user_id, income_source_id, amount, date).await?;
    }

    info!("Finished seeding sample data.");
    Ok(())
}

/// Runs the whole sequence against `pool` and returns the output lines in
/// print order: the search result first, then the full table report.
#[instrument(skip(pool))]
pub async fn run_demo(pool: &DbPool) -> Result<Vec<String>> {
    seed_sample_data(pool).await?;

    db::update_user(
        pool,
        1,
        &UserChanges {
            email: Some("johnnn@gmail.com"),
            ..UserChanges::default()
        },
    )
    .await?;

    db::delete_expense_category(pool, 3).await?;

    let mut lines = Vec::new();

    // Deliberately queries a name that was never seeded; the report shows the
    // not-found path.
    let source = db::search_income_sources_by_name(pool, "Фріланс").await?;
    lines.push(report::render_search_result(source.as_ref()));

    lines.extend(report::render_all_tables(pool).await?);
    Ok(lines)
}

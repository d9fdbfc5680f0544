//! Report rendering.
//!
//! Builds the console report as plain lines of text. All functions here are
//! output-agnostic: they return `String`s and the caller decides where they
//! go (stdout in the binary, assertions in tests).

use crate::db::{self, DbPool};
use crate::errors::Result;
use crate::models::{Expense, ExpenseCategory, Income, IncomeSource, User};

/// Formats a monetary amount the way the report prints it: integral values
/// keep one decimal place (`200.0`), everything else prints as-is (`25.5`).
#[must_use]
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.1}", amount)
    } else {
        format!("{}", amount)
    }
}

fn user_line(user: &User) -> String {
    // The password column is never printed.
    format!(
        "{} {} {} {}",
        user.id, user.first_name, user.last_name, user.email
    )
}

fn category_line(category: &ExpenseCategory) -> String {
    format!("{} {}", category.id, category.category_name)
}

fn source_line(source: &IncomeSource) -> String {
    format!("{} {} {}", source.id, source.source_name, source.description)
}

fn expense_line(expense: &Expense) -> String {
    format!(
        "{} {} {} {} {}",
        expense.id,
        expense.user_id,
        expense.category_id,
        format_amount(expense.amount),
        expense.date_incurred
    )
}

fn income_line(income: &Income) -> String {
    format!(
        "{} {} {} {} {}",
        income.id,
        income.user_id,
        income.income_source_id,
        format_amount(income.amount),
        income.date_received
    )
}

/// Renders the outcome of an income source search: the matched row's name
/// and description, or the not-found message.
#[must_use]
pub fn render_search_result(source: Option<&IncomeSource>) -> String {
    match source {
        Some(source) => format!("{} {}", source.source_name, source.description),
        None => "Джерело доходу не знайдено.".to_string(),
    }
}

/// Renders every row of every table, one header line per table followed by
/// one line per row, in the fixed order users, expense categories, income
/// sources, expenses, incomes.
pub async fn render_all_tables(pool: &DbPool) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    lines.push("Всі користувачі:".to_string());
    for user in db::get_all_users(pool).await? {
        lines.push(user_line(&user));
    }

    lines.push("Всі категорії витрат:".to_string());
    for category in db::get_all_expense_categories(pool).await? {
        lines.push(category_line(&category));
    }

    lines.push("Всі джерела доходу:".to_string());
    for source in db::get_all_income_sources(pool).await? {
        lines.push(source_line(&source));
    }

    lines.push("Всі витрати:".to_string());
    for expense in db::get_all_expenses(pool).await? {
        lines.push(expense_line(&expense));
    }

    lines.push("Всі доходи:".to_string());
    for income in db::get_all_incomes(pool).await? {
        lines.push(income_line(&income));
    }

    Ok(lines)
}

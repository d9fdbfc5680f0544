use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered user, owner of expenses and incomes.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: i64, // Primary Key, INTEGER
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String, // Stored as plain TEXT, exactly as supplied
}

/// A label expenses are grouped under.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExpenseCategory {
    pub id: i64,
    pub category_name: String,
}

/// One spend, tied to a user and a category by id.
///
/// The referenced rows are not required to exist; see the schema module for
/// the enforcement rules.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub amount: f64, // REAL
    pub date_incurred: NaiveDate,
}

/// Where income comes from (salary, freelance, ...).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IncomeSource {
    pub id: i64,
    pub source_name: String,
    pub description: String,
}

/// One payment received, tied to a user and an income source by id.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Income {
    pub id: i64,
    pub user_id: i64,
    pub income_source_id: i64,
    pub amount: f64,
    pub date_received: NaiveDate,
}

pub mod connection;
pub mod expense_categories;
pub mod expenses;
pub mod income_sources;
pub mod incomes;
pub(crate) mod schema;
pub(crate) mod test_utils;
pub mod users;

pub use connection::{DbPool, close_db, init_db};
pub use expense_categories::{
    create_expense_category, delete_expense_category, get_all_expense_categories,
    update_expense_category,
};
pub use expenses::{
    ExpenseChanges, create_expense, delete_expense, get_all_expenses, total_expenses_for_user,
    update_expense,
};
pub use income_sources::{
    IncomeSourceChanges, create_income_source, delete_income_source, get_all_income_sources,
    search_income_sources_by_name, update_income_source,
};
pub use incomes::{
    IncomeChanges, create_income, delete_income, get_all_incomes, total_income_for_user,
    update_income,
};
pub use users::{UserChanges, create_user, delete_user, get_all_users, update_user};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employee row. `active` carries soft-delete state: deleted employees keep
/// their row with `active = false`.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub salary: Option<f64>,
    pub active: bool,
    pub date_joined: NaiveDate,
    pub department_id: Option<i64>,
}

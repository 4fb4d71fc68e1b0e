use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use validator::Validate;

use crate::errors::AppError;
use crate::models::employee::Employee;

const EMPLOYEE_COLUMNS: &str =
    "id, name, email, phone, role, salary, active, date_joined, department_id";

#[derive(Deserialize, Validate)]
pub struct NewEmployee {
    #[validate(length(min = 1, max = 150))]
    name: String,
    #[validate(email)]
    email: String,
    #[validate(length(max = 20))]
    phone: Option<String>,
    #[validate(length(max = 100))]
    role: Option<String>,
    salary: Option<f64>,
    date_joined: Option<NaiveDate>,
    department_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct EmployeeQueryParams {
    active: Option<bool>,
    department_id: Option<i64>,
}

#[derive(Deserialize, Validate)]
pub struct EmployeeUpdate {
    #[validate(length(min = 1, max = 150))]
    name: Option<String>,
    #[validate(email)]
    email: Option<String>,
    #[validate(length(max = 20))]
    phone: Option<String>,
    #[validate(length(max = 100))]
    role: Option<String>,
    salary: Option<f64>,
    active: Option<bool>,
    date_joined: Option<NaiveDate>,
    department_id: Option<i64>,
}

async fn fetch_employee(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, AppError> {
    let employee = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {} FROM employees WHERE id = ?",
        EMPLOYEE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(employee)
}

/// Non-null department references must resolve before anything is written.
async fn ensure_department_exists(pool: &SqlitePool, department_id: i64) -> Result<(), AppError> {
    let exists: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM departments WHERE id = ?")
        .bind(department_id)
        .fetch_one(pool)
        .await?;
    if exists == 0 {
        return Err(AppError::Validation(format!(
            "Department {} does not exist",
            department_id
        )));
    }
    Ok(())
}

pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    new_employee: web::Json<NewEmployee>,
) -> Result<HttpResponse, AppError> {
    new_employee.validate()?;

    let email_taken: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM employees WHERE email = ?")
        .bind(&new_employee.email)
        .fetch_one(pool.get_ref())
        .await?;
    if email_taken > 0 {
        return Err(AppError::Conflict("Employee email already exists".to_string()));
    }

    if let Some(department_id) = new_employee.department_id {
        ensure_department_exists(pool.get_ref(), department_id).await?;
    }

    let date_joined = new_employee
        .date_joined
        .unwrap_or_else(|| Utc::now().date_naive());

    // Employees always start active; soft-delete is the only path to inactive.
    let result = sqlx::query(
        "INSERT INTO employees (name, email, phone, role, salary, active, date_joined, department_id)
         VALUES (?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&new_employee.name)
    .bind(&new_employee.email)
    .bind(&new_employee.phone)
    .bind(&new_employee.role)
    .bind(new_employee.salary)
    .bind(date_joined)
    .bind(new_employee.department_id)
    .execute(pool.get_ref())
    .await?;

    let employee = fetch_employee(pool.get_ref(), result.last_insert_rowid())
        .await?
        .ok_or_else(|| AppError::Database("Inserted employee not found".to_string()))?;

    Ok(HttpResponse::Created().json(employee))
}

pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeQueryParams>,
) -> Result<HttpResponse, AppError> {
    let mut query_builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
        "SELECT {} FROM employees",
        EMPLOYEE_COLUMNS
    ));

    let mut prefix = " WHERE ";
    if let Some(active) = query.active {
        query_builder.push(prefix).push("active = ").push_bind(active);
        prefix = " AND ";
    }
    if let Some(department_id) = query.department_id {
        query_builder
            .push(prefix)
            .push("department_id = ")
            .push_bind(department_id);
    }
    query_builder.push(" ORDER BY id");

    let employees: Vec<Employee> = query_builder
        .build_query_as()
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(employees))
}

pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    employee_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let employee = fetch_employee(pool.get_ref(), employee_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    Ok(HttpResponse::Ok().json(employee))
}

pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    employee_id: web::Path<i64>,
    updates: web::Json<EmployeeUpdate>,
) -> Result<HttpResponse, AppError> {
    updates.validate()?;

    let employee_id = employee_id.into_inner();
    if fetch_employee(pool.get_ref(), employee_id).await?.is_none() {
        return Err(AppError::NotFound("Employee not found".to_string()));
    }

    if let Some(department_id) = updates.department_id {
        ensure_department_exists(pool.get_ref(), department_id).await?;
    }

    if let Some(email) = &updates.email {
        let email_taken: i64 =
            sqlx::query_scalar("SELECT COUNT(1) FROM employees WHERE email = ? AND id != ?")
                .bind(email)
                .bind(employee_id)
                .fetch_one(pool.get_ref())
                .await?;
        if email_taken > 0 {
            return Err(AppError::Conflict("Employee email already exists".to_string()));
        }
    }

    let mut query_builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new("UPDATE employees SET ");
    let mut has_updates = false;
    {
        let mut fields = query_builder.separated(", ");
        if let Some(name) = &updates.name {
            fields.push("name = ").push_bind_unseparated(name.clone());
            has_updates = true;
        }
        if let Some(email) = &updates.email {
            fields.push("email = ").push_bind_unseparated(email.clone());
            has_updates = true;
        }
        if let Some(phone) = &updates.phone {
            fields.push("phone = ").push_bind_unseparated(phone.clone());
            has_updates = true;
        }
        if let Some(role) = &updates.role {
            fields.push("role = ").push_bind_unseparated(role.clone());
            has_updates = true;
        }
        if let Some(salary) = updates.salary {
            fields.push("salary = ").push_bind_unseparated(salary);
            has_updates = true;
        }
        if let Some(active) = updates.active {
            fields.push("active = ").push_bind_unseparated(active);
            has_updates = true;
        }
        if let Some(date_joined) = updates.date_joined {
            fields.push("date_joined = ").push_bind_unseparated(date_joined);
            has_updates = true;
        }
        if let Some(department_id) = updates.department_id {
            fields
                .push("department_id = ")
                .push_bind_unseparated(department_id);
            has_updates = true;
        }
    }

    if has_updates {
        query_builder.push(" WHERE id = ").push_bind(employee_id);
        query_builder.build().execute(pool.get_ref()).await?;
    }

    let employee = fetch_employee(pool.get_ref(), employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Soft delete: flips `active` to false and keeps the row. Repeating the call
/// on an already-inactive employee succeeds again.
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    employee_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let employee_id = employee_id.into_inner();

    let exists: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_one(pool.get_ref())
        .await?;
    if exists == 0 {
        return Err(AppError::NotFound("Employee not found".to_string()));
    }

    sqlx::query("UPDATE employees SET active = 0 WHERE id = ?")
        .bind(employee_id)
        .execute(pool.get_ref())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::errors::AppError;
use crate::models::department::Department;

#[derive(Deserialize, Validate)]
pub struct NewDepartment {
    #[validate(length(min = 1, max = 100))]
    name: String,
    #[validate(length(max = 255))]
    description: Option<String>,
}

pub async fn create_department(
    pool: web::Data<SqlitePool>,
    new_department: web::Json<NewDepartment>,
) -> Result<HttpResponse, AppError> {
    new_department.validate()?;

    let name_taken: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM departments WHERE name = ?")
        .bind(&new_department.name)
        .fetch_one(pool.get_ref())
        .await?;
    if name_taken > 0 {
        return Err(AppError::Conflict("Department name already exists".to_string()));
    }

    let result = sqlx::query("INSERT INTO departments (name, description) VALUES (?, ?)")
        .bind(&new_department.name)
        .bind(&new_department.description)
        .execute(pool.get_ref())
        .await?;

    let department =
        sqlx::query_as::<_, Department>("SELECT id, name, description FROM departments WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool.get_ref())
            .await?;

    Ok(HttpResponse::Created().json(department))
}

pub async fn list_departments(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let departments =
        sqlx::query_as::<_, Department>("SELECT id, name, description FROM departments ORDER BY id")
            .fetch_all(pool.get_ref())
            .await?;

    Ok(HttpResponse::Ok().json(departments))
}

pub async fn get_department(
    pool: web::Data<SqlitePool>,
    department_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let department =
        sqlx::query_as::<_, Department>("SELECT id, name, description FROM departments WHERE id = ?")
            .bind(department_id.into_inner())
            .fetch_optional(pool.get_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

    Ok(HttpResponse::Ok().json(department))
}

/// Deletion is rejected while employees still reference the department; the
/// caller has to reassign or soft-delete them first.
pub async fn delete_department(
    pool: web::Data<SqlitePool>,
    department_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let department_id = department_id.into_inner();

    let exists: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM departments WHERE id = ?")
        .bind(department_id)
        .fetch_one(pool.get_ref())
        .await?;
    if exists == 0 {
        return Err(AppError::NotFound("Department not found".to_string()));
    }

    let referenced: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM employees WHERE department_id = ?")
        .bind(department_id)
        .fetch_one(pool.get_ref())
        .await?;
    if referenced > 0 {
        return Err(AppError::Conflict("Department still contains employees".to_string()));
    }

    sqlx::query("DELETE FROM departments WHERE id = ?")
        .bind(department_id)
        .execute(pool.get_ref())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

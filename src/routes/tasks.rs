use crate::{
    activity_log::ActivityLog,
    auth::AuthenticatedUser,
    error::AppError,
    models::{Task, TaskInput},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const TASK_COLUMNS: &str = "id, title, description, status, user_id, created_at, updated_at";

/// Resolves the claims' username to a user id. The token only carries the
/// username, so every task handler re-reads the user row.
async fn resolve_user_id(pool: &PgPool, username: &str) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Retrieves all tasks owned by the authenticated user.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    activity: web::Data<ActivityLog>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let user_id = match resolve_user_id(&pool, user.username()).await.map_err(|e| {
        activity.record("Task list query failed", &format!("error: {}", e));
        AppError::from(e)
    })? {
        Some(id) => id,
        None => {
            activity.record("Task list query failed", "user not found");
            return Err(AppError::NotFound("User not found".into()));
        }
    };

    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY created_at",
        TASK_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(&**pool)
    .await
    .map_err(|e| {
        activity.record("Task list query failed", &format!("error: {}", e));
        AppError::from(e)
    })?;

    activity.record(
        "Task list query successful",
        &format!("user: {}", user.username()),
    );
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// Title, description and status are all required and non-empty.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    activity: web::Data<ActivityLog>,
    user: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    if task_data.validate().is_err() {
        activity.record("Task creation failed", "missing data");
        return Err(AppError::BadRequest("Missing data to create the task".into()));
    }

    let user_id = match resolve_user_id(&pool, user.username()).await.map_err(|e| {
        activity.record("Task creation failed", &format!("error: {}", e));
        AppError::from(e)
    })? {
        Some(id) => id,
        None => {
            activity.record("Task creation failed", "user not found");
            return Err(AppError::NotFound("User not found".into()));
        }
    };

    let task = Task::new(task_data.into_inner(), user_id);

    let created = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (id, title, description, status, user_id, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(task.id)
    .bind(task.title)
    .bind(task.description)
    .bind(task.status)
    .bind(task.user_id)
    .bind(task.created_at)
    .bind(task.updated_at)
    .fetch_one(&**pool)
    .await
    .map_err(|e| {
        activity.record("Task creation failed", &format!("error: {}", e));
        AppError::from(e)
    })?;

    activity.record(
        "Task creation successful",
        &format!("user: {}, task: {}", user.username(), created.title),
    );

    Ok(HttpResponse::Created().json(json!({
        "message": "Task created successfully",
        "task": created
    })))
}

/// Updates an existing task's title, description and status.
///
/// The task is looked up by id alone. There is no ownership filter: any
/// authenticated user can update any task whose id they know.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    activity: web::Data<ActivityLog>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    if task_data.validate().is_err() {
        activity.record("Task update failed", "missing data");
        return Err(AppError::BadRequest("Missing data to update the task".into()));
    }

    let task_uuid = task_id.into_inner();

    let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM tasks WHERE id = $1")
        .bind(task_uuid)
        .fetch_optional(&**pool)
        .await
        .map_err(|e| {
            activity.record("Task update failed", &format!("error: {}", e));
            AppError::from(e)
        })?;

    if existing.is_none() {
        activity.record("Task update failed", "task not found");
        return Err(AppError::NotFound("Task not found".into()));
    }

    // Lookup and update are separate statements; a task deleted in between
    // surfaces as a store error, which is accepted.
    let updated = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET title = $1, description = $2, status = $3, updated_at = now()
         WHERE id = $4
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&task_data.title)
    .bind(&task_data.description)
    .bind(&task_data.status)
    .bind(task_uuid)
    .fetch_one(&**pool)
    .await
    .map_err(|e| {
        activity.record("Task update failed", &format!("error: {}", e));
        AppError::from(e)
    })?;

    activity.record(
        "Task update successful",
        &format!("user: {}, task: {}", user.username(), task_uuid),
    );

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task updated successfully",
        "task": updated
    })))
}

/// Deletes a task by its id.
///
/// Same policy as update: no ownership filter, 404 only when the id does
/// not exist at all.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    activity: web::Data<ActivityLog>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task_uuid = task_id.into_inner();

    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task_uuid)
        .execute(&**pool)
        .await
        .map_err(|e| {
            activity.record("Task deletion failed", &format!("error: {}", e));
            AppError::from(e)
        })?;

    if result.rows_affected() == 0 {
        activity.record("Task deletion failed", "task not found");
        return Err(AppError::NotFound("Task not found".into()));
    }

    activity.record(
        "Task deletion successful",
        &format!("user: {}, task: {}", user.username(), task_uuid),
    );

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted successfully"
    })))
}

use actix_web::{delete, get, patch, post, put, web, HttpResponse};

use crate::api::error::{json_config, ApiError};
use crate::models::response::Response;
use crate::models::todo::{TodoId, TodoText};
use crate::repository::database::Database;

/// Shared check for every route carrying an `{id}` segment.
///
/// Integral float spellings such as `1.0` or `1e3` name the same id as their
/// integer form.
fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<TodoId>() {
        return Ok(id);
    }
    let value: f64 = raw.parse().map_err(|_| ApiError::InvalidId)?;
    if value.is_finite()
        && value.fract() == 0.0
        && value >= TodoId::MIN as f64
        && value < TodoId::MAX as f64
    {
        Ok(value as TodoId)
    } else {
        Err(ApiError::InvalidId)
    }
}

fn required_text(body: &TodoText) -> Result<String, ApiError> {
    body.trimmed()
        .ok_or_else(|| ApiError::Validation("Todo text is required".to_string()))
}

#[get("/todos")]
pub async fn get_todos(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let todos = db.get_todos().await?;
    Ok(HttpResponse::Ok().json(todos))
}

#[get("/todos/{id}")]
pub async fn get_todo_by_id(
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&id)?;
    let todo = db.get_todo_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(todo))
}

#[post("/todos")]
pub async fn create_todo(
    db: web::Data<Database>,
    body: web::Json<TodoText>,
) -> Result<HttpResponse, ApiError> {
    let text = required_text(&body)?;
    let todo = db.create_todo(text).await?;
    Ok(HttpResponse::Created().json(todo))
}

#[put("/todos/{id}")]
pub async fn toggle_todo_by_id(
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&id)?;
    let todo = db.toggle_todo_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(todo))
}

#[patch("/todos/{id}")]
pub async fn update_todo_by_id(
    db: web::Data<Database>,
    id: web::Path<String>,
    body: Result<web::Json<TodoText>, actix_web::Error>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&id)?;
    let body = body.map_err(|err| ApiError::Validation(format!("Invalid request body: {err}")))?;
    let text = required_text(&body)?;
    let todo = db
        .update_todo_by_id(id, text)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(todo))
}

#[delete("/todos/{id}")]
pub async fn delete_todo_by_id(
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&id)?;
    db.delete_todo_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(Response::new("Todo deleted successfully")))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .service(get_todos)
            .service(get_todo_by_id)
            .service(create_todo)
            .service(toggle_todo_by_id)
            .service(update_todo_by_id)
            .service(delete_todo_by_id),
    );
}

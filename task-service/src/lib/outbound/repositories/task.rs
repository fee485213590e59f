use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::task::models::Task;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskPriority;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::Title;
use crate::domain::task::ports::TaskRepository;
use crate::domain::user::models::UserId;
use crate::task::errors::TaskError;

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const TASK_COLUMNS: &str = "id, user_id, title, description, status, priority, due_date, \
                            original_input, created_by_ai, created_at, updated_at, completed_at";

fn task_from_row(row: &PgRow) -> Result<Task, TaskError> {
    let db_err = |e: sqlx::Error| TaskError::DatabaseError(e.to_string());

    let status: String = row.try_get("status").map_err(db_err)?;
    let priority: String = row.try_get("priority").map_err(db_err)?;

    Ok(Task {
        id: TaskId(row.try_get("id").map_err(db_err)?),
        user_id: UserId(row.try_get("user_id").map_err(db_err)?),
        title: Title::new(row.try_get("title").map_err(db_err)?)?,
        description: row.try_get("description").map_err(db_err)?,
        status: TaskStatus::from_str(&status).map_err(TaskError::DatabaseError)?,
        priority: TaskPriority::from_str(&priority).map_err(TaskError::DatabaseError)?,
        due_date: row.try_get("due_date").map_err(db_err)?,
        original_input: row.try_get("original_input").map_err(db_err)?,
        created_by_ai: row.try_get("created_by_ai").map_err(db_err)?,
        created_at: row.try_get("created_at").map_err(db_err)?,
        updated_at: row.try_get("updated_at").map_err(db_err)?,
        completed_at: row.try_get("completed_at").map_err(db_err)?,
    })
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, TaskError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, user_id, title, description, status, priority, due_date,
                               original_input, created_by_ai, created_at, updated_at, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(task.id.0)
        .bind(task.user_id.0)
        .bind(task.title.as_str())
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.due_date)
        .bind(&task.original_input)
        .bind(task.created_by_ai)
        .bind(task.created_at)
        .bind(task.updated_at)
        .bind(task.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        Ok(task)
    }

    async fn find_by_id(
        &self,
        user_id: UserId,
        task_id: &TaskId,
    ) -> Result<Option<Task>, TaskError> {
        let row = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2"
        ))
        .bind(task_id.0)
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        row.as_ref().map(task_from_row).transpose()
    }

    async fn list(&self, user_id: UserId, filter: TaskFilter) -> Result<Vec<Task>, TaskError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE user_id = $1
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR priority = $3)
            ORDER BY due_date ASC NULLS LAST
            "#
        ))
        .bind(user_id.0)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.priority.map(|p| p.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        rows.iter().map(task_from_row).collect()
    }

    async fn update(&self, task: Task) -> Result<Task, TaskError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $3, description = $4, status = $5, priority = $6, due_date = $7,
                updated_at = $8, completed_at = $9
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(task.id.0)
        .bind(task.user_id.0)
        .bind(task.title.as_str())
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.due_date)
        .bind(task.updated_at)
        .bind(task.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(task.id.to_string()));
        }

        Ok(task)
    }

    async fn delete(&self, user_id: UserId, task_id: &TaskId) -> Result<(), TaskError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id.0)
            .bind(user_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(task_id.to_string()));
        }

        Ok(())
    }
}

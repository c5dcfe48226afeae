//! `PostgreSQL` repository implementation for todo item storage.

use super::{
    models::{IdentifiedTodoItemRow, NewTodoItemRow, TodoItemChangeset, TodoItemRow},
    schema::todo_items,
};
use crate::todo::{
    domain::{PersistedTodoItemData, TodoDescription, TodoItem, TodoItemId, TodoStatus},
    ports::{TodoRepository, TodoRepositoryError, TodoRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by todo adapters.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL for the `todo_items` table.
const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-01-13-000000_create_todo_items/up.sql");

/// `PostgreSQL`-backed todo repository.
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: TodoPgPool,
}

impl PostgresTodoRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool for `database_url`.
    ///
    /// Blocks while the initial connections are established.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::Persistence`] when the pool cannot be
    /// created.
    pub fn build_pool(database_url: &str, max_connections: u32) -> TodoRepositoryResult<TodoPgPool> {
        Pool::builder()
            .max_size(max_connections)
            .build(ConnectionManager::<PgConnection>::new(database_url))
            .map_err(TodoRepositoryError::persistence)
    }

    /// Creates the `todo_items` table and index when they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::Persistence`] when the DDL fails.
    pub async fn ensure_schema(&self) -> TodoRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(SCHEMA_SQL)
                .map_err(TodoRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TodoRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TodoRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TodoRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TodoRepositoryError::persistence)?
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn save(&self, item: TodoItem) -> TodoRepositoryResult<TodoItem> {
        self.run_blocking(move |connection| {
            let row = match item.id() {
                None => diesel::insert_into(todo_items::table)
                    .values(&to_new_row(&item))
                    .returning(TodoItemRow::as_returning())
                    .get_result::<TodoItemRow>(connection),
                Some(id) => diesel::insert_into(todo_items::table)
                    .values(&to_identified_row(id, &item))
                    .on_conflict(todo_items::id)
                    .do_update()
                    .set(&to_changeset(&item))
                    .returning(TodoItemRow::as_returning())
                    .get_result::<TodoItemRow>(connection),
            }
            .map_err(TodoRepositoryError::persistence)?;
            row_to_item(row)
        })
        .await
    }

    async fn find_by_id(&self, id: TodoItemId) -> TodoRepositoryResult<Option<TodoItem>> {
        self.run_blocking(move |connection| {
            let row = todo_items::table
                .filter(todo_items::id.eq(id.value()))
                .select(TodoItemRow::as_select())
                .first::<TodoItemRow>(connection)
                .optional()
                .map_err(TodoRepositoryError::persistence)?;
            row.map(row_to_item).transpose()
        })
        .await
    }

    async fn find_all(&self) -> TodoRepositoryResult<Vec<TodoItem>> {
        self.run_blocking(|connection| {
            let rows = todo_items::table
                .order(todo_items::id.asc())
                .select(TodoItemRow::as_select())
                .load::<TodoItemRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows_to_items(rows)
        })
        .await
    }

    async fn find_by_status(&self, status: TodoStatus) -> TodoRepositoryResult<Vec<TodoItem>> {
        self.run_blocking(move |connection| {
            let rows = todo_items::table
                .filter(todo_items::status.eq(status.as_str()))
                .order(todo_items::id.asc())
                .select(TodoItemRow::as_select())
                .load::<TodoItemRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows_to_items(rows)
        })
        .await
    }

    async fn find_by_status_and_due_before(
        &self,
        status: TodoStatus,
        before: DateTime<Utc>,
    ) -> TodoRepositoryResult<Vec<TodoItem>> {
        self.run_blocking(move |connection| {
            let rows = todo_items::table
                .filter(todo_items::status.eq(status.as_str()))
                .filter(todo_items::due_at.lt(before))
                .order(todo_items::id.asc())
                .select(TodoItemRow::as_select())
                .load::<TodoItemRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows_to_items(rows)
        })
        .await
    }
}

fn to_new_row(item: &TodoItem) -> NewTodoItemRow {
    NewTodoItemRow {
        description: item.description().as_str().to_owned(),
        status: item.status().as_str().to_owned(),
        created_at: item.created_at(),
        due_at: item.due_at(),
        done_at: item.done_at(),
    }
}

fn to_identified_row(id: TodoItemId, item: &TodoItem) -> IdentifiedTodoItemRow {
    IdentifiedTodoItemRow {
        id: id.value(),
        description: item.description().as_str().to_owned(),
        status: item.status().as_str().to_owned(),
        created_at: item.created_at(),
        due_at: item.due_at(),
        done_at: item.done_at(),
    }
}

fn to_changeset(item: &TodoItem) -> TodoItemChangeset {
    TodoItemChangeset {
        description: item.description().as_str().to_owned(),
        status: item.status().as_str().to_owned(),
        due_at: item.due_at(),
        done_at: item.done_at(),
    }
}

fn rows_to_items(rows: Vec<TodoItemRow>) -> TodoRepositoryResult<Vec<TodoItem>> {
    rows.into_iter().map(row_to_item).collect()
}

fn row_to_item(row: TodoItemRow) -> TodoRepositoryResult<TodoItem> {
    let TodoItemRow {
        id,
        description,
        status: persisted_status,
        created_at,
        due_at,
        done_at,
    } = row;

    let status =
        TodoStatus::try_from(persisted_status.as_str()).map_err(TodoRepositoryError::persistence)?;
    let data = PersistedTodoItemData {
        id: TodoItemId::new(id).map_err(TodoRepositoryError::persistence)?,
        description: TodoDescription::new(description).map_err(TodoRepositoryError::persistence)?,
        status,
        created_at,
        due_at,
        done_at,
    };
    Ok(TodoItem::from_persisted(data))
}

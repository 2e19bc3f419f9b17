//! `PostgreSQL` repository implementations for task storage.

use super::{
    models::{CompletionRow, NewCompletionRow, NewTaskRow, TaskRow},
    schema::{task_history, tasks},
};
use crate::facility::domain::AssetId;
use crate::identity::domain::EmailAddress;
use crate::task::{
    domain::{
        Checklist, CompletionId, CompletionRecord, CompletionSnapshot, PersistedCompletionData,
        PersistedTaskData, PhotoEvidence, Task, TaskId, TaskState,
    },
    ports::{
        CompletionLog, CompletionLogError, CompletionLogResult, TaskRepository,
        TaskRepositoryError, TaskRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = task_to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_new_row(task)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set((
                    tasks::name.eq(row.name),
                    tasks::description.eq(row.description),
                    tasks::checklist.eq(row.checklist),
                    tasks::assigned_to.eq(row.assigned_to),
                    tasks::state.eq(row.state),
                    tasks::last_completion.eq(row.last_completion),
                    tasks::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;

            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;

            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_asset(&self, asset: AssetId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::asset_id.eq(asset.into_inner()))
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_by_assignee(&self, assignee: &EmailAddress) -> TaskRepositoryResult<Vec<Task>> {
        let lookup = assignee.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::assigned_to.eq(lookup))
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

/// `PostgreSQL`-backed completion log.
///
/// Issues inserts and ordered selects only; the absence of update and
/// delete paths keeps the log append-only at the adapter level too.
#[derive(Debug, Clone)]
pub struct PostgresCompletionLog {
    pool: TaskPgPool,
}

impl PostgresCompletionLog {
    /// Creates a new log from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CompletionLogResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CompletionLogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CompletionLogError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CompletionLogError::persistence)?
    }
}

#[async_trait]
impl CompletionLog for PostgresCompletionLog {
    async fn append(&self, record: &CompletionRecord) -> CompletionLogResult<()> {
        let record_id = record.id();
        let new_row = completion_to_new_row(record)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(task_history::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CompletionLogError::DuplicateRecord(record_id)
                    }
                    _ => CompletionLogError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_for_task(&self, task: TaskId) -> CompletionLogResult<Vec<CompletionRecord>> {
        self.run_blocking(move |connection| {
            let rows = task_history::table
                .filter(task_history::task_id.eq(task.into_inner()))
                .order(task_history::completed_at.asc())
                .select(CompletionRow::as_select())
                .load::<CompletionRow>(connection)
                .map_err(CompletionLogError::persistence)?;
            rows.into_iter().map(row_to_completion).collect()
        })
        .await
    }
}

fn task_to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let checklist =
        serde_json::to_value(task.checklist()).map_err(TaskRepositoryError::persistence)?;
    let last_completion = task
        .last_completion()
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        asset_id: task.asset_id().into_inner(),
        name: task.name().to_owned(),
        description: task.description().to_owned(),
        checklist,
        assigned_to: task
            .assigned_to()
            .map(|email| email.as_str().to_owned()),
        state: task.state().as_str().to_owned(),
        last_completion,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let checklist = serde_json::from_value::<Checklist>(row.checklist)
        .map_err(TaskRepositoryError::persistence)?;
    let assigned_to = row
        .assigned_to
        .map(EmailAddress::new)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let state =
        TaskState::try_from(row.state.as_str()).map_err(TaskRepositoryError::persistence)?;
    let last_completion = row
        .last_completion
        .map(serde_json::from_value::<CompletionSnapshot>)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        asset_id: AssetId::from_uuid(row.asset_id),
        name: row.name,
        description: row.description,
        checklist,
        assigned_to,
        state,
        last_completion,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn completion_to_new_row(record: &CompletionRecord) -> CompletionLogResult<NewCompletionRow> {
    let checked_items =
        serde_json::to_value(record.checked_items()).map_err(CompletionLogError::persistence)?;

    Ok(NewCompletionRow {
        id: record.id().into_inner(),
        task_id: record.task_id().into_inner(),
        task_name: record.task_name().to_owned(),
        completed_by: record.completed_by().as_str().to_owned(),
        completed_at: record.completed_at(),
        checked_items,
        evidence: record
            .evidence()
            .map(|evidence| evidence.as_data_url().to_owned()),
    })
}

fn row_to_completion(row: CompletionRow) -> CompletionLogResult<CompletionRecord> {
    let completed_by =
        EmailAddress::new(row.completed_by).map_err(CompletionLogError::persistence)?;
    let checked_items = serde_json::from_value::<Vec<String>>(row.checked_items)
        .map_err(CompletionLogError::persistence)?;
    let evidence = row
        .evidence
        .map(PhotoEvidence::from_data_url)
        .transpose()
        .map_err(CompletionLogError::persistence)?;

    Ok(CompletionRecord::from_persisted(PersistedCompletionData {
        id: CompletionId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        task_name: row.task_name,
        completed_by,
        completed_at: row.completed_at,
        checked_items,
        evidence,
    }))
}

//! Persistent SQLite store
//!
//! Owns the single connection a process uses. The schema is ensured on every
//! open, each insert is its own autocommitted statement, and the connection
//! is released when the `Store` goes out of scope.

pub mod models;
pub mod schema;

pub use models::*;

use crate::error::SchoolError;
use rusqlite::types::Value;
use rusqlite::{Connection, Params, Row, params};
use std::path::Path;
use tracing::debug;

/// How teacher and class ids given to the add commands are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferencePolicy {
    /// Store the id exactly as given, without parsing or existence checks
    #[default]
    Permissive,
    /// Require an integer id naming an existing row
    Strict,
}

impl ReferencePolicy {
    #[must_use]
    #[inline]
    pub const fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Permissive }
    }

    const fn enforces_foreign_keys(self) -> bool {
        matches!(self, Self::Strict)
    }
}

#[derive(Debug, Clone, Copy)]
enum RefTarget {
    Teacher,
    Class,
}

impl RefTarget {
    const fn exists_sql(self) -> &'static str {
        match self {
            Self::Teacher => "SELECT EXISTS(SELECT 1 FROM Teacher WHERE id = ?1)",
            Self::Class => "SELECT EXISTS(SELECT 1 FROM Class WHERE id = ?1)",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Teacher => "Teacher ID",
            Self::Class => "Class ID",
        }
    }
}

fn storage_error(action: &'static str) -> impl Fn(rusqlite::Error) -> SchoolError {
    move |err| SchoolError::storage(format!("Failed to {action}: {err}"))
}

/// Handle to the store file
pub struct Store {
    conn: Connection,
    policy: ReferencePolicy,
}

impl Store {
    /// Open (creating if needed) the store file at `path` and ensure the schema
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be opened or the schema
    /// cannot be created
    #[inline]
    pub fn open(path: &Path, policy: ReferencePolicy) -> Result<Self, SchoolError> {
        debug!("Opening store at {}", path.display());
        let conn = Connection::open(path).map_err(|err| {
            SchoolError::storage(format!(
                "Failed to open store '{}': {err}",
                path.display()
            ))
        })?;
        Self::from_connection(conn, policy)
    }

    /// Open a private in-memory store
    ///
    /// # Errors
    ///
    /// Returns a storage error if SQLite cannot allocate the database
    #[inline]
    pub fn open_in_memory(policy: ReferencePolicy) -> Result<Self, SchoolError> {
        let conn = Connection::open_in_memory().map_err(storage_error("open in-memory store"))?;
        Self::from_connection(conn, policy)
    }

    fn from_connection(conn: Connection, policy: ReferencePolicy) -> Result<Self, SchoolError> {
        // Set explicitly: bundled SQLite builds may default enforcement on.
        conn.pragma_update(None, "foreign_keys", policy.enforces_foreign_keys())
            .map_err(storage_error("configure foreign keys"))?;

        let store = Self { conn, policy };
        store.init_schema()?;
        Ok(store)
    }

    /// Create the Teacher, Class and Student tables if they do not exist
    ///
    /// # Errors
    ///
    /// Returns a storage error if a table cannot be created
    #[inline]
    pub fn init_schema(&self) -> Result<(), SchoolError> {
        debug!("Ensuring schema");
        self.conn
            .execute_batch(schema::CREATE_TABLES)
            .map_err(storage_error("create tables"))
    }

    /// Close the connection, reporting any failure to release it
    ///
    /// # Errors
    ///
    /// Returns a storage error if SQLite refuses to close the connection
    #[inline]
    pub fn close(self) -> Result<(), SchoolError> {
        debug!("Closing store");
        self.conn
            .close()
            .map_err(|(_, err)| SchoolError::storage(format!("Failed to close store: {err}")))
    }

    // ==================== Inserts ====================

    /// Insert a teacher and return the new id
    ///
    /// # Errors
    ///
    /// Returns a storage error if the insert fails
    #[inline]
    pub fn add_teacher(&self, name: &str) -> Result<i64, SchoolError> {
        self.conn
            .execute(schema::INSERT_TEACHER, [name])
            .map_err(storage_error("insert teacher"))?;
        let id = self.conn.last_insert_rowid();
        debug!("Inserted teacher {id}");
        Ok(id)
    }

    /// Insert a class taught by `teacher_id` and return the new id
    ///
    /// # Errors
    ///
    /// Returns an invalid reference error if the policy is strict and the
    /// teacher id does not resolve, or a storage error if the insert fails
    #[inline]
    pub fn add_class(&self, name: &str, teacher_id: &str) -> Result<i64, SchoolError> {
        let teacher = self.bind_reference(RefTarget::Teacher, teacher_id)?;
        self.conn
            .execute(schema::INSERT_CLASS, params![name, teacher])
            .map_err(storage_error("insert class"))?;
        let id = self.conn.last_insert_rowid();
        debug!("Inserted class {id}");
        Ok(id)
    }

    /// Insert a student enrolled in `class_id` and return the new id
    ///
    /// # Errors
    ///
    /// Returns an invalid reference error if the policy is strict and the
    /// class id does not resolve, or a storage error if the insert fails
    #[inline]
    pub fn add_student(&self, name: &str, class_id: &str) -> Result<i64, SchoolError> {
        let class = self.bind_reference(RefTarget::Class, class_id)?;
        self.conn
            .execute(schema::INSERT_STUDENT, params![name, class])
            .map_err(storage_error("insert student"))?;
        let id = self.conn.last_insert_rowid();
        debug!("Inserted student {id}");
        Ok(id)
    }

    fn bind_reference(&self, target: RefTarget, raw: &str) -> Result<Value, SchoolError> {
        if self.policy == ReferencePolicy::Permissive {
            return Ok(Value::Text(raw.to_owned()));
        }

        let id = raw.trim().parse::<i64>().map_err(|_| {
            SchoolError::invalid_reference(format!(
                "{} '{raw}' is not an integer",
                target.label()
            ))
        })?;

        let exists: bool = self
            .conn
            .query_row(target.exists_sql(), [id], |row| row.get(0))
            .map_err(storage_error("check reference"))?;
        if !exists {
            return Err(SchoolError::invalid_reference(format!(
                "{} {id} does not exist",
                target.label()
            )));
        }

        Ok(Value::Integer(id))
    }

    // ==================== Queries ====================

    fn collect<T, P, F>(
        &self,
        sql: &str,
        params: P,
        map: F,
        action: &'static str,
    ) -> Result<Vec<T>, SchoolError>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql).map_err(storage_error(action))?;
        let rows = stmt
            .query_map(params, map)
            .map_err(storage_error(action))?
            .collect::<rusqlite::Result<Vec<T>>>()
            .map_err(storage_error(action))?;
        debug!("{action}: {} row(s)", rows.len());
        Ok(rows)
    }

    /// Students whose class id equals `class_id`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails
    #[inline]
    pub fn students_in_class(&self, class_id: i64) -> Result<Vec<StudentSummary>, SchoolError> {
        self.collect(
            schema::STUDENTS_IN_CLASS,
            [class_id],
            |row| {
                Ok(StudentSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
            "query students in class",
        )
    }

    /// Students of every class taught by `teacher_id`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails
    #[inline]
    pub fn students_for_teacher(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<StudentSummary>, SchoolError> {
        self.collect(
            schema::STUDENTS_FOR_TEACHER,
            [teacher_id],
            |row| {
                Ok(StudentSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
            "query students for teacher",
        )
    }

    /// Students of class `class_id` with the class and teacher names
    ///
    /// Students of a class whose teacher id does not resolve are not returned.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails
    #[inline]
    pub fn class_roster_with_teacher(
        &self,
        class_id: i64,
    ) -> Result<Vec<RosterEntry>, SchoolError> {
        self.collect(
            schema::CLASS_ROSTER_WITH_TEACHER,
            [class_id],
            |row| {
                Ok(RosterEntry {
                    student: row.get(0)?,
                    class: row.get(1)?,
                    teacher: row.get(2)?,
                })
            },
            "query class with teacher",
        )
    }

    /// All teachers in storage order
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails
    #[inline]
    pub fn list_teachers(&self) -> Result<Vec<Teacher>, SchoolError> {
        self.collect(
            schema::LIST_TEACHERS,
            [],
            |row| {
                Ok(Teacher {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
            "list teachers",
        )
    }

    /// All classes in storage order
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails
    #[inline]
    pub fn list_classes(&self) -> Result<Vec<Class>, SchoolError> {
        self.collect(
            schema::LIST_CLASSES,
            [],
            |row| {
                Ok(Class {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    teacher_id: row.get(2)?,
                })
            },
            "list classes",
        )
    }

    /// All students in storage order
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails
    #[inline]
    pub fn list_students(&self) -> Result<Vec<Student>, SchoolError> {
        self.collect(
            schema::LIST_STUDENTS,
            [],
            |row| {
                Ok(Student {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    class_id: row.get(2)?,
                })
            },
            "list students",
        )
    }
}

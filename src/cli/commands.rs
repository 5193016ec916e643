//! CLI command implementations
//!
//! Each recognized flag becomes one [`Command`]. Commands are collected by
//! independent checks in a fixed order and executed one after another; a
//! failure stops the remaining commands but keeps inserts already made.

use crate::cli::{Args, QueryKind};
use crate::store::Store;
use anyhow::{Context as _, Result};
use std::io::Write;
use tracing::debug;

/// Static help banner printed on every invocation
pub const BANNER: &str = "
==== School Database CLI ====
Available commands:
--add-teacher [name]                : Add a teacher
--add-class [name] [teacher_id]     : Add a class with a teacher
--add-student [name] [class_id]     : Add a student to a class
--query class_students --id [id]    : List students in a class
--query teacher_students --id [id]  : List all students for a teacher
--query class_with_teacher --id [id]: List students in a class with the teacher
--list-teachers                     : List all teachers with their IDs
--list-classes                      : List all classes with their IDs and teacher IDs
--list-students                     : List all students with their class IDs
================================
";

/// Write the help banner
///
/// # Errors
///
/// Returns an error if the output cannot be written
pub fn print_banner(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{BANNER}").context("Failed to write help banner")
}

/// One handler invocation selected from the arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTeacher { name: String },
    AddClass { name: String, teacher_id: String },
    AddStudent { name: String, class_id: String },
    Query { kind: QueryKind, id: i64 },
    ListTeachers,
    ListClasses,
    ListStudents,
}

impl Args {
    /// Commands requested by these arguments, in execution order
    #[must_use]
    pub fn commands(&self) -> Vec<Command> {
        let mut commands = Vec::new();

        if let Some(name) = self.add_teacher.as_ref() {
            commands.push(Command::AddTeacher { name: name.clone() });
        }

        if let Some([name, teacher_id]) = self.add_class.as_deref() {
            commands.push(Command::AddClass {
                name: name.clone(),
                teacher_id: teacher_id.clone(),
            });
        }

        if let Some([name, class_id]) = self.add_student.as_deref() {
            commands.push(Command::AddStudent {
                name: name.clone(),
                class_id: class_id.clone(),
            });
        }

        if let (Some(kind), Some(id)) = (self.query, self.id) {
            commands.push(Command::Query { kind, id });
        }

        if self.list_teachers {
            commands.push(Command::ListTeachers);
        }

        if self.list_classes {
            commands.push(Command::ListClasses);
        }

        if self.list_students {
            commands.push(Command::ListStudents);
        }

        commands
    }
}

impl Command {
    /// Run this command against the store, writing result lines to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails or the output cannot
    /// be written
    pub fn execute(&self, store: &Store, out: &mut dyn Write) -> Result<()> {
        debug!("Executing {self:?}");

        match *self {
            Self::AddTeacher { ref name } => {
                store.add_teacher(name).context("Failed to add teacher")?;
                writeln!(out, "✅ Teacher added.")?;
            }
            Self::AddClass {
                ref name,
                ref teacher_id,
            } => {
                store
                    .add_class(name, teacher_id)
                    .context("Failed to add class")?;
                writeln!(out, "✅ Class added.")?;
            }
            Self::AddStudent {
                ref name,
                ref class_id,
            } => {
                store
                    .add_student(name, class_id)
                    .context("Failed to add student")?;
                writeln!(out, "✅ Student added.")?;
            }
            Self::Query { kind, id } => execute_query(store, kind, id, out)?,
            Self::ListTeachers => {
                let teachers = store.list_teachers()?;
                writeln!(out, "📋 Teachers:")?;
                for teacher in teachers {
                    writeln!(out, "ID: {}, Name: {}", teacher.id, teacher.name)?;
                }
            }
            Self::ListClasses => {
                let classes = store.list_classes()?;
                writeln!(out, "📋 Classes:")?;
                for class in classes {
                    writeln!(
                        out,
                        "ID: {}, Name: {}, Teacher ID: {}",
                        class.id, class.name, class.teacher_id
                    )?;
                }
            }
            Self::ListStudents => {
                let students = store.list_students()?;
                writeln!(out, "📋 Students:")?;
                for student in students {
                    writeln!(
                        out,
                        "ID: {}, Name: {}, Class ID: {}",
                        student.id, student.name, student.class_id
                    )?;
                }
            }
        }

        Ok(())
    }
}

fn execute_query(store: &Store, kind: QueryKind, id: i64, out: &mut dyn Write) -> Result<()> {
    match kind {
        QueryKind::ClassStudents => {
            let students = store.students_in_class(id)?;
            writeln!(out, "📘 Students in Class ID {id}:")?;
            for student in students {
                writeln!(out, "ID: {}, Name: {}", student.id, student.name)?;
            }
        }
        QueryKind::TeacherStudents => {
            let students = store.students_for_teacher(id)?;
            writeln!(out, "📘 Students for Teacher ID {id}:")?;
            for student in students {
                writeln!(out, "ID: {}, Name: {}", student.id, student.name)?;
            }
        }
        QueryKind::ClassWithTeacher => {
            let roster = store.class_roster_with_teacher(id)?;
            writeln!(out, "📘 Students in Class ID {id} with Teacher:")?;
            for entry in roster {
                writeln!(
                    out,
                    "Student: {}, Class: {}, Teacher: {}",
                    entry.student, entry.class, entry.teacher
                )?;
            }
        }
    }

    Ok(())
}

/// Execute every command in order, stopping at the first failure
///
/// # Errors
///
/// Returns the first command error; earlier commands keep their effects
pub fn execute_all(commands: &[Command], store: &Store, out: &mut dyn Write) -> Result<()> {
    for command in commands {
        command.execute(store, out)?;
    }
    Ok(())
}

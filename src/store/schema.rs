//! Table definitions and the fixed statements run against them

/// Creates the three tables when absent. Safe to run on every open.
pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS Teacher (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS Class (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    teacher_id INTEGER,
    FOREIGN KEY (teacher_id) REFERENCES Teacher(id)
);

CREATE TABLE IF NOT EXISTS Student (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    class_id INTEGER,
    FOREIGN KEY (class_id) REFERENCES Class(id)
);
";

pub const INSERT_TEACHER: &str = "INSERT INTO Teacher (name) VALUES (?1)";

pub const INSERT_CLASS: &str = "INSERT INTO Class (name, teacher_id) VALUES (?1, ?2)";

pub const INSERT_STUDENT: &str = "INSERT INTO Student (name, class_id) VALUES (?1, ?2)";

pub const STUDENTS_IN_CLASS: &str = "SELECT id, name FROM Student WHERE class_id = ?1";

pub const STUDENTS_FOR_TEACHER: &str = "
SELECT Student.id, Student.name
FROM Student
JOIN Class ON Student.class_id = Class.id
WHERE Class.teacher_id = ?1
";

pub const CLASS_ROSTER_WITH_TEACHER: &str = "
SELECT Student.name, Class.name, Teacher.name
FROM Student
JOIN Class ON Student.class_id = Class.id
JOIN Teacher ON Class.teacher_id = Teacher.id
WHERE Class.id = ?1
";

pub const LIST_TEACHERS: &str = "SELECT id, name FROM Teacher";

pub const LIST_CLASSES: &str = "SELECT id, name, teacher_id FROM Class";

pub const LIST_STUDENTS: &str = "SELECT id, name, class_id FROM Student";

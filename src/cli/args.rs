use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for schooldb
///
/// Every data flag is independent: several may be given in one invocation
/// and each runs once, in the order fixed by [`Args::commands`].
#[derive(Parser, Debug, Clone)]
#[command(name = "schooldb")]
#[command(about = "A CLI tool for managing teachers, classes and students")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Add a teacher
    #[arg(long = "add-teacher", value_name = "NAME")]
    pub add_teacher: Option<String>,

    /// Add a class with a teacher
    #[arg(long = "add-class", num_args = 2, value_names = ["NAME", "TEACHER_ID"])]
    pub add_class: Option<Vec<String>>,

    /// Add a student to a class
    #[arg(long = "add-student", num_args = 2, value_names = ["NAME", "CLASS_ID"])]
    pub add_student: Option<Vec<String>>,

    /// Run a fixed relational query (requires --id)
    #[arg(long, value_name = "KIND", value_enum, requires = "id")]
    pub query: Option<QueryKind>,

    /// Id the query is run for (requires --query)
    #[arg(long, value_name = "ID", requires = "query")]
    pub id: Option<i64>,

    /// List all teachers with their IDs
    #[arg(long = "list-teachers")]
    pub list_teachers: bool,

    /// List all classes with their IDs and teacher IDs
    #[arg(long = "list-classes")]
    pub list_classes: bool,

    /// List all students with their class IDs
    #[arg(long = "list-students")]
    pub list_students: bool,

    /// Store file path (default: school.db)
    #[arg(long, value_name = "PATH", env = "SCHOOLDB_DATABASE")]
    pub database: Option<String>,

    /// YAML settings file (default: ./schooldb.yaml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Reject teacher/class ids that are not integers naming an existing row
    #[arg(long = "strict-ids", env = "SCHOOLDB_STRICT_IDS")]
    pub strict_ids: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// The three fixed queries
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "snake_case")]
pub enum QueryKind {
    /// Students in a class
    ClassStudents,
    /// Students in every class of a teacher
    TeacherStudents,
    /// Students in a class with the class and teacher names
    ClassWithTeacher,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(extra: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("schooldb").chain(extra.iter().copied()))
    }

    #[test]
    fn test_no_flags_is_valid() {
        let args = parse(&[]).unwrap();

        assert!(args.add_teacher.is_none());
        assert!(args.query.is_none());
        assert!(!args.list_teachers);
    }

    #[test]
    fn test_add_class_takes_two_values() {
        let args = parse(&["--add-class", "Math", "1"]).unwrap();
        assert_eq!(args.add_class, Some(vec!["Math".to_owned(), "1".to_owned()]));

        let err = parse(&["--add-class", "Math"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongNumberOfValues);
    }

    #[test]
    fn test_add_student_keeps_reference_as_string() {
        let args = parse(&["--add-student", "Ann", "not-a-number"]).unwrap();
        assert_eq!(
            args.add_student,
            Some(vec!["Ann".to_owned(), "not-a-number".to_owned()])
        );
    }

    #[test]
    fn test_query_kinds() {
        for (raw, kind) in [
            ("class_students", QueryKind::ClassStudents),
            ("teacher_students", QueryKind::TeacherStudents),
            ("class_with_teacher", QueryKind::ClassWithTeacher),
        ] {
            let args = parse(&["--query", raw, "--id", "3"]).unwrap();
            assert_eq!(args.query, Some(kind));
            assert_eq!(args.id, Some(3));
        }
    }

    #[test]
    fn test_invalid_query_kind() {
        let err = parse(&["--query", "all_students", "--id", "1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_query_requires_id() {
        let err = parse(&["--query", "class_students"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_id_requires_query() {
        let err = parse(&["--id", "1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_non_integer_id() {
        let err = parse(&["--query", "class_students", "--id", "one"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_unknown_flag() {
        let err = parse(&["--delete-teacher", "1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_usage_errors_exit_with_two() {
        let err = parse(&["--bogus"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}

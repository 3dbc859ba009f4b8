//! End-to-end filter behaviour against an in-memory SQLite database

use std::sync::LazyLock;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

use super::{fetch_all, table_fields};
use crate::data::filters::{
    DefinitionTable, FieldMap, FilterError, FilterRegistry, FilterRequest, FilterValue, Filterable,
    PrimitiveType, Queryable,
};
use crate::data::sql::SqlQuery;
use crate::utils::sql::LikeMatch;

const SCHEMA: &str = r#"
CREATE TABLE students (
    id INTEGER PRIMARY KEY,
    first_name VARCHAR(255),
    last_name VARCHAR(255),
    student_id BIGINT,
    age INTEGER,
    weighted_gpa DECIMAL,
    gpa FLOAT,
    honor_roll BOOLEAN,
    notes TEXT,
    graduation_date DATETIME
);
CREATE TABLE enrollments (
    id INTEGER PRIMARY KEY,
    student_id INTEGER NOT NULL,
    course TEXT NOT NULL,
    grade TEXT NOT NULL
);
"#;

struct User {
    admin: bool,
}

type Context = Option<User>;

fn admin() -> Context {
    Some(User { admin: true })
}

fn user() -> Context {
    Some(User { admin: false })
}

fn student_fields() -> FieldMap {
    FieldMap::new()
        .with("id", PrimitiveType::Integer)
        .with("first_name", PrimitiveType::String)
        .with("last_name", PrimitiveType::String)
        .with("student_id", PrimitiveType::Bigint)
        .with("age", PrimitiveType::Integer)
        .with("weighted_gpa", PrimitiveType::Decimal)
        .with("gpa", PrimitiveType::Float)
        .with("honor_roll", PrimitiveType::Boolean)
        .with("notes", PrimitiveType::Text)
}

fn at_risk(query: &SqlQuery, value: FilterValue, user: &Context) -> Result<SqlQuery, FilterError> {
    if !user.as_ref().is_some_and(|u| u.admin) {
        return Err(FilterError::forbidden("at_risk"));
    }
    let op = if value.as_bool() == Some(true) { "<" } else { ">=" };
    Ok(query.where_raw(&format!("students.gpa {} ?", op), FilterValue::Float(2.5)))
}

fn course(query: &SqlQuery, value: FilterValue, _: &Context) -> Result<SqlQuery, FilterError> {
    Ok(query
        .join("JOIN enrollments ON enrollments.student_id = students.id")
        .where_raw("enrollments.course = ?", value))
}

fn grade(query: &SqlQuery, value: FilterValue, _: &Context) -> Result<SqlQuery, FilterError> {
    if !query.joins_table("enrollments") {
        return Err(FilterError::rejected("grade", "requires the course filter first"));
    }
    Ok(query.where_raw("enrollments.grade = ?", value))
}

fn student_filters() -> Result<FilterRegistry<SqlQuery, Context>, FilterError> {
    let registry = FilterRegistry::<SqlQuery, Context>::builder("students", student_fields())
        .definitions(DefinitionTable::new().with("custom_definition", |raw| raw != "foo"))
        .attributes(&[
            "first_name",
            "last_name",
            "student_id",
            "age",
            "weighted_gpa",
            "gpa",
            "honor_roll",
            "notes",
        ])?
        .custom("at_risk", PrimitiveType::Boolean, at_risk)?
        .custom_string("fname", |q, value, _| {
            let name = value.as_text().unwrap_or_default();
            Ok(q.where_like("students.first_name", name, LikeMatch::Exact))
        })?
        .custom("lname", "custom_definition", |q, value, _| {
            let name = value.as_text().unwrap_or_default();
            Ok(q.where_like("students.last_name", name, LikeMatch::Exact))
        })?
        .custom_string("course", course)?
        .custom_string("grade", grade)?
        .build();
    Ok(registry)
}

static STUDENT_FILTERS: LazyLock<FilterRegistry<SqlQuery, Context>> =
    LazyLock::new(|| student_filters().expect("student filters"));

struct Student;

impl Filterable for Student {
    type Query = SqlQuery;
    type Context = Context;

    fn all() -> SqlQuery {
        SqlQuery::new("students")
    }

    fn filter_registry() -> &'static FilterRegistry<SqlQuery, Context> {
        &STUDENT_FILTERS
    }
}

async fn setup_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();

    let students: [(i64, &str, &str, i64, i64, f64, f64, bool, &str); 2] = [
        (1, "John", "Doe", 24_672_467_426, 18, 4.26522643, 4.0, true, "Dean's List"),
        (2, "Jane", "Doe", 82_737_272_737, 17, 2.45992473, 2.0, false, "Needs Tutoring"),
    ];
    for (id, first, last, student_id, age, weighted_gpa, gpa, honor_roll, notes) in students {
        sqlx::query(
            "INSERT INTO students (id, first_name, last_name, student_id, age, weighted_gpa, gpa, honor_roll, notes, graduation_date) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, '2025-06-01 00:00:00')",
        )
        .bind(id)
        .bind(first)
        .bind(last)
        .bind(student_id)
        .bind(age)
        .bind(weighted_gpa)
        .bind(gpa)
        .bind(honor_roll)
        .bind(notes)
        .execute(&pool)
        .await
        .unwrap();
    }

    for (student_id, course, grade) in [(1, "math", "A"), (2, "math", "B"), (2, "art", "A")] {
        sqlx::query("INSERT INTO enrollments (student_id, course, grade) VALUES (?, ?, ?)")
            .bind(student_id as i64)
            .bind(course)
            .bind(grade)
            .execute(&pool)
            .await
            .unwrap();
    }
    pool
}

async fn first_names(pool: &SqlitePool, query: &SqlQuery) -> Vec<String> {
    let mut names: Vec<String> = fetch_all(pool, query)
        .await
        .unwrap()
        .iter()
        .map(|row| row.get::<String, _>("first_name"))
        .collect();
    names.sort();
    names
}

async fn filter(pool: &SqlitePool, pairs: &[(&str, &str)], context: &Context) -> Vec<String> {
    let request: FilterRequest = pairs.iter().copied().collect();
    let query = Student::apply_filters(Some(&request), context).unwrap();
    first_names(pool, &query).await
}

fn filter_err(pairs: &[(&str, &str)], context: &Context) -> FilterError {
    let request: FilterRequest = pairs.iter().copied().collect();
    Student::apply_filters(Some(&request), context).unwrap_err()
}

#[tokio::test]
async fn test_no_filters_returns_everything() {
    let pool = setup_test_pool().await;
    let all = Student::apply_filters(None, &None).unwrap();
    assert_eq!(first_names(&pool, &all).await, vec!["Jane", "John"]);

    let empty = Student::apply_filters(Some(&FilterRequest::new()), &None).unwrap();
    assert_eq!(first_names(&pool, &empty).await, vec!["Jane", "John"]);
}

#[tokio::test]
async fn test_seeded_query_keeps_its_scope() {
    let pool = setup_test_pool().await;
    let registry = Student::filter_registry();

    let john = SqlQuery::new("students").where_equals("first_name", &FilterValue::Text("John".into()));
    let result = registry.apply(&john, None, &None).unwrap();
    assert_eq!(first_names(&pool, &result).await, vec!["John"]);

    let nobody = SqlQuery::new("students").filter("1=0");
    let request = FilterRequest::new()
        .with("at_risk", "false")
        .with("first_name", "John");
    let result = registry.apply(&nobody, Some(&request), &admin()).unwrap();
    assert!(first_names(&pool, &result).await.is_empty());

    let foo = SqlQuery::new("students").where_equals("first_name", &FilterValue::Text("Foo".into()));
    let result = registry.apply(&foo, Some(&request), &admin()).unwrap();
    assert!(first_names(&pool, &result).await.is_empty());
}

#[tokio::test]
async fn test_string_filters_are_case_insensitive() {
    let pool = setup_test_pool().await;
    assert_eq!(filter(&pool, &[("first_name", "john")], &user()).await, vec!["John"]);
    assert_eq!(filter(&pool, &[("first_name", "John")], &user()).await, vec!["John"]);
    assert_eq!(filter(&pool, &[("first_name", "JANE")], &None).await, vec!["Jane"]);
}

#[tokio::test]
async fn test_text_filters_are_case_insensitive() {
    let pool = setup_test_pool().await;
    assert_eq!(filter(&pool, &[("notes", "dean's list")], &None).await, vec!["John"]);
    assert_eq!(filter(&pool, &[("notes", "NEEDS TUTORING")], &user()).await, vec!["Jane"]);
    assert!(filter(&pool, &[("notes", "needs")], &None).await.is_empty());
}

#[tokio::test]
async fn test_concrete_scenario() {
    let pool = setup_test_pool().await;
    assert_eq!(filter(&pool, &[("first_name", "john")], &None).await, vec!["John"]);
    assert_eq!(filter(&pool, &[("age", "17")], &None).await, vec!["Jane"]);
    assert!(
        filter(&pool, &[("age", "17"), ("first_name", "john")], &None)
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn test_each_primitive_type() {
    let pool = setup_test_pool().await;
    let cases: [(&str, &str, &str); 10] = [
        ("student_id", "24672467426", "John"),
        ("student_id", "82737272737", "Jane"),
        ("age", "18", "John"),
        ("age", "17", "Jane"),
        ("weighted_gpa", "4.26522643", "John"),
        ("weighted_gpa", "2.45992473", "Jane"),
        ("gpa", "4.0", "John"),
        ("gpa", "2.0", "Jane"),
        ("honor_roll", "true", "John"),
        ("honor_roll", "false", "Jane"),
    ];
    for (name, raw, expected) in cases {
        assert_eq!(
            filter(&pool, &[(name, raw)], &user()).await,
            vec![expected],
            "{name}={raw}"
        );
    }
}

#[test]
fn test_malformed_values_rejected() {
    for name in ["student_id", "age", "weighted_gpa", "gpa", "honor_roll"] {
        let err = filter_err(&[(name, "abc")], &user());
        assert!(
            matches!(err, FilterError::InvalidValue(ref v) if v == "abc"),
            "{name}: {err}"
        );
    }
}

#[tokio::test]
async fn test_custom_filter_with_admin_context() {
    let pool = setup_test_pool().await;
    assert_eq!(filter(&pool, &[("at_risk", "false")], &admin()).await, vec!["John"]);
    assert_eq!(filter(&pool, &[("at_risk", "true")], &admin()).await, vec!["Jane"]);
}

#[tokio::test]
async fn test_multiple_filters() {
    let pool = setup_test_pool().await;
    assert_eq!(
        filter(&pool, &[("at_risk", "false"), ("first_name", "John")], &admin()).await,
        vec!["John"]
    );
    assert_eq!(
        filter(&pool, &[("at_risk", "true"), ("first_name", "Jane")], &admin()).await,
        vec!["Jane"]
    );
    assert!(
        filter(&pool, &[("at_risk", "true"), ("first_name", "John")], &admin())
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn test_authorization_guard() {
    let err = filter_err(&[("at_risk", "true"), ("first_name", "Jane")], &user());
    assert!(matches!(err, FilterError::Forbidden(ref name) if name == "at_risk"));

    let err = filter_err(&[("at_risk", "true")], &None);
    assert!(matches!(err, FilterError::Forbidden(_)));

    let pool = setup_test_pool().await;
    assert_eq!(
        filter(&pool, &[("at_risk", "true"), ("first_name", "Jane")], &admin()).await,
        vec!["Jane"]
    );
}

#[tokio::test]
async fn test_custom_filter_defaults_to_string() {
    let pool = setup_test_pool().await;
    assert_eq!(filter(&pool, &[("fname", "john")], &user()).await, vec!["John"]);
    assert_eq!(filter(&pool, &[("fname", "Jane")], &None).await, vec!["Jane"]);
}

#[tokio::test]
async fn test_custom_definition_validates_value() {
    let err = filter_err(&[("lname", "foo")], &user());
    assert!(matches!(err, FilterError::InvalidValue(ref v) if v == "foo"));

    let pool = setup_test_pool().await;
    assert_eq!(
        filter(&pool, &[("lname", "Doe")], &user()).await,
        vec!["Jane", "John"]
    );
}

#[test]
fn test_unknown_and_blank_filters() {
    let err = filter_err(&[("state", "Fl")], &user());
    assert!(matches!(err, FilterError::InvalidFilter(ref name) if name == "state"));

    let err = filter_err(&[("first_name", "")], &user());
    assert!(matches!(err, FilterError::BlankValue(_)));
}

#[tokio::test]
async fn test_dependent_filters_fold_in_order() {
    let pool = setup_test_pool().await;
    assert_eq!(
        filter(&pool, &[("course", "math"), ("grade", "A")], &None).await,
        vec!["John"]
    );
    assert_eq!(
        filter(&pool, &[("course", "art"), ("grade", "A")], &None).await,
        vec!["Jane"]
    );

    let err = filter_err(&[("grade", "A"), ("course", "math")], &None);
    assert!(matches!(err, FilterError::Rejected { ref filter, .. } if filter == "grade"));
}

#[tokio::test]
async fn test_repeated_calls_are_pure() {
    let pool = setup_test_pool().await;
    let base = Student::all();
    let request = FilterRequest::new().with("first_name", "john");

    let first = Student::filter_registry().apply(&base, Some(&request), &None).unwrap();
    let second = Student::filter_registry().apply(&base, Some(&request), &None).unwrap();
    assert_eq!(first_names(&pool, &first).await, first_names(&pool, &second).await);

    // base still covers every record
    let request = FilterRequest::new().with("age", "17");
    let other = Student::filter_registry().apply(&base, Some(&request), &None).unwrap();
    assert_eq!(first_names(&pool, &other).await, vec!["Jane"]);
    assert_eq!(first_names(&pool, &base).await, vec!["Jane", "John"]);
}

#[tokio::test]
async fn test_json_request_end_to_end() {
    let pool = setup_test_pool().await;
    let request = FilterRequest::from_json(&serde_json::json!({"age": 18, "honor_roll": true}))
        .unwrap();
    let query = Student::apply_filters(Some(&request), &None).unwrap();
    assert_eq!(first_names(&pool, &query).await, vec!["John"]);

    let err = FilterRequest::from_json(&serde_json::json!([{"first_name": "john"}])).unwrap_err();
    assert!(matches!(err, FilterError::Argument(_)));
}

#[tokio::test]
async fn test_introspected_fields() {
    let pool = setup_test_pool().await;
    let fields = table_fields(&pool, "students").await.unwrap();

    assert_eq!(fields.get("first_name"), Some(PrimitiveType::String));
    assert_eq!(fields.get("student_id"), Some(PrimitiveType::Bigint));
    assert_eq!(fields.get("age"), Some(PrimitiveType::Integer));
    assert_eq!(fields.get("weighted_gpa"), Some(PrimitiveType::Decimal));
    assert_eq!(fields.get("gpa"), Some(PrimitiveType::Float));
    assert_eq!(fields.get("honor_roll"), Some(PrimitiveType::Boolean));
    assert_eq!(fields.get("notes"), Some(PrimitiveType::Text));
    assert_eq!(fields.get("graduation_date"), None);

    let err = FilterRegistry::<SqlQuery>::builder("students", fields.clone())
        .attributes(&["graduation_date"])
        .unwrap_err();
    assert!(matches!(err, FilterError::Argument(_)));

    let registry = FilterRegistry::<SqlQuery>::builder("students", fields)
        .attributes(&["first_name", "age"])
        .unwrap()
        .build();
    let request = FilterRequest::new().with("first_name", "JOHN");
    let query = registry
        .apply(&SqlQuery::new("students"), Some(&request), &())
        .unwrap();
    assert_eq!(first_names(&pool, &query).await, vec!["John"]);
}

#[test]
fn test_concurrent_callers_share_registry() {
    let base = Student::all();
    let expected = {
        let request = FilterRequest::new().with("age", "17");
        Student::filter_registry()
            .apply(&base, Some(&request), &None)
            .unwrap()
            .to_sql()
    };

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let base = &base;
                scope.spawn(move || {
                    let request = FilterRequest::new().with("age", "17");
                    Student::filter_registry()
                        .apply(base, Some(&request), &None)
                        .unwrap()
                        .to_sql()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
    assert!(base.conditions().is_empty());
}

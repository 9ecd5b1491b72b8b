//! End-to-end tests of the executor against the pet clinic fixture on SQLite.
//!
//! Every test gets its own in-memory database with the seed data loaded, so
//! tests can run in any order and in parallel.

use rstest::{fixture, rstest};
use sql_template::db::{ColumnMap, Row, RowCounter, SqlError, SqlExecutor, SqliteSession, Value};
use sql_template::params;
use sql_template::petclinic::{self, Owner, extract_vet_specs, map_owner, map_pet_type};

#[fixture]
fn clinic() -> SqlExecutor<SqliteSession> {
    let mut executor = SqlExecutor::new(SqliteSession::open_in_memory().expect("open in-memory database"));
    petclinic::reset(&mut executor, true).expect("load pet clinic fixture");
    executor
}

// ============================================================================
// Scalars and maps
// ============================================================================

#[rstest]
fn count_of_pet_types(mut clinic: SqlExecutor<SqliteSession>) {
    let count: i64 = clinic.query_scalar("SELECT COUNT(*) FROM types", &[]).unwrap();
    assert_eq!(count, 6);
}

#[rstest]
fn first_name_of_owner(mut clinic: SqlExecutor<SqliteSession>) {
    let name: String = clinic
        .query_scalar("SELECT first_name FROM owners WHERE id = ?", &params![1])
        .unwrap();
    assert_eq!(name, "George");
}

#[rstest]
fn pet_as_map_is_case_insensitive(mut clinic: SqlExecutor<SqliteSession>) {
    let pet = clinic
        .query_row_as_map("SELECT * FROM pets WHERE id = ?", &params![1])
        .unwrap();
    assert_eq!(pet.get("NAME"), Some(&Value::Text("Leo".into())));
    assert_eq!(pet.get("name"), pet.get("Name"));
    assert_eq!(pet.keys().collect::<Vec<_>>(), ["id", "name", "birth_date", "type_id", "owner_id"]);
}

#[rstest]
fn pets_of_owner_as_maps(mut clinic: SqlExecutor<SqliteSession>) {
    let pets = clinic
        .query_rows_as_maps("SELECT * FROM pets WHERE owner_id = ? ORDER BY id", &params![3])
        .unwrap();
    assert_eq!(pets.len(), 2);
    assert_eq!(pets[0].get_as::<String>("name").unwrap(), "Rosy");
    assert_eq!(pets[1].get_as::<String>("name").unwrap(), "Jewel");
}

#[rstest]
fn rows_as_maps_empty(mut clinic: SqlExecutor<SqliteSession>) {
    let rows = clinic
        .query_rows_as_maps("SELECT * FROM pets WHERE owner_id = ?", &params![99])
        .unwrap();
    assert!(rows.is_empty());
}

#[rstest]
fn pet_type_names_as_column(mut clinic: SqlExecutor<SqliteSession>) {
    let names: Vec<String> = clinic
        .query_column("SELECT name FROM types ORDER BY id", &[])
        .unwrap();
    assert_eq!(names, ["cat", "dog", "lizard", "snake", "bird", "hamster"]);
}

// ============================================================================
// Mappers, extractors and callbacks
// ============================================================================

#[rstest]
fn owners_from_id_through_mapper(mut clinic: SqlExecutor<SqliteSession>) {
    let owners: Vec<Owner> = clinic
        .query_many("SELECT * FROM owners WHERE id >= ? ORDER BY id", &params![9], map_owner)
        .unwrap();
    assert_eq!(owners.len(), 2);
    assert_eq!(owners[0].full_name(), "David Schroeder");
    assert_eq!(owners[1].city, "Waunakee");
}

#[rstest]
fn single_owner_through_mapper(mut clinic: SqlExecutor<SqliteSession>) {
    let owner = clinic
        .query_one("SELECT * FROM owners WHERE id = ?", &params![1], map_owner)
        .unwrap();
    assert_eq!(owner.telephone, "6085551023");
}

#[rstest]
#[case::no_rows("SELECT * FROM owners WHERE id > 100", 0)]
#[case::many_rows("SELECT * FROM owners WHERE city = 'Madison'", 4)]
fn single_row_operations_reject_other_counts(
    mut clinic: SqlExecutor<SqliteSession>,
    #[case] sql: &str,
    #[case] rows: usize,
) {
    let err = clinic.query_one(sql, &[], map_owner).unwrap_err();
    assert!(matches!(err, SqlError::IncorrectResultSize { expected: 1, actual, .. } if actual == rows));

    let err = clinic.query_row_as_map(sql, &[]).unwrap_err();
    assert!(matches!(err, SqlError::IncorrectResultSize { expected: 1, actual, .. } if actual == rows));
}

#[rstest]
fn vet_specialties_through_extractor(mut clinic: SqlExecutor<SqliteSession>) {
    let vet = clinic
        .query_with_extractor(petclinic::VET_SPECIALTIES, &params![3], extract_vet_specs)
        .unwrap()
        .expect("vet 3 exists");
    assert_eq!(vet.specialties.len(), 2);
    assert_eq!(vet.specialties, ["surgery", "dentistry"]);
}

#[rstest]
fn extractor_sees_rows_lazily(mut clinic: SqlExecutor<SqliteSession>) {
    let first_two: Vec<String> = clinic
        .query_with_extractor("SELECT name FROM pets ORDER BY id", &[], |rows| {
            rows.take(2).map(|row| row?.get("name")).collect()
        })
        .unwrap();
    assert_eq!(first_two, ["Leo", "Basil"]);
}

#[rstest]
fn counting_callback_over_owners(mut clinic: SqlExecutor<SqliteSession>) {
    let mut counter = RowCounter::new();
    clinic
        .query_with_callback("SELECT * FROM owners", &[], |row| counter.process_row(row))
        .unwrap();
    assert_eq!(counter.row_count(), 10);
    assert_eq!(counter.column_names()[0], "id");
}

#[rstest]
fn callback_error_stops_iteration(mut clinic: SqlExecutor<SqliteSession>) {
    let mut seen = Vec::new();
    let err = clinic
        .query_with_callback("SELECT id, name FROM types ORDER BY id", &[], |row: &Row| {
            let name: String = row.get("name")?;
            if name == "lizard" {
                return Err(SqlError::driver("no reptiles"));
            }
            seen.push(name);
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, SqlError::Driver { .. }));
    assert_eq!(seen, ["cat", "dog"]);
}

// ============================================================================
// Updates and generated keys
// ============================================================================

#[rstest]
fn update_pet_type_name(mut clinic: SqlExecutor<SqliteSession>) {
    let updated = clinic
        .execute("UPDATE types SET name = ? WHERE id = ?", &params!["elephant", 6])
        .unwrap();
    assert_eq!(updated, 1);

    let name: String = clinic
        .query_scalar("SELECT name FROM types WHERE id = ?", &params![6])
        .unwrap();
    assert_eq!(name, "elephant");
}

#[rstest]
fn insert_pet_type_and_read_back(mut clinic: SqlExecutor<SqliteSession>) {
    let inserted = clinic
        .execute("INSERT INTO types (id, name) VALUES (?, ?)", &params![7, "elephant"])
        .unwrap();
    assert_eq!(inserted, 1);

    let row = clinic
        .query_row_as_map("SELECT id, name FROM types WHERE id = ?", &params![7])
        .unwrap();
    let expected: ColumnMap = [("id", Value::Integer(7)), ("name", Value::Text("elephant".into()))]
        .into_iter()
        .collect();
    assert_eq!(row, expected);
}

#[rstest]
fn generated_key_for_new_pet_type(mut clinic: SqlExecutor<SqliteSession>) {
    let key = clinic
        .execute_returning_key("INSERT INTO types (name) VALUES (?)", &params!["elephant"], &["id"])
        .unwrap();
    let id: i64 = key.key().unwrap();
    assert_eq!(id, 7);

    let pet_type = clinic
        .query_one("SELECT id, name FROM types WHERE id = ?", &params![id], map_pet_type)
        .unwrap();
    assert_eq!(pet_type.name, "elephant");
}

#[rstest]
fn generated_key_without_declared_columns_uses_rowid(mut clinic: SqlExecutor<SqliteSession>) {
    let key = clinic
        .execute_returning_key("INSERT INTO types (name) VALUES (?)", &params!["elephant"], &[])
        .unwrap();
    assert_eq!(key.key::<i64>().unwrap(), 7);
}

#[rstest]
fn generated_key_rejects_multi_row_insert(mut clinic: SqlExecutor<SqliteSession>) {
    let err = clinic
        .execute_returning_key(
            "INSERT INTO types (name) VALUES (?), (?)",
            &params!["elephant", "giraffe"],
            &["id"],
        )
        .unwrap_err();
    assert!(matches!(err, SqlError::IncorrectResultSize { expected: 1, actual: 2, .. }));

    let count: i64 = clinic.query_scalar("SELECT COUNT(*) FROM types", &[]).unwrap();
    assert_eq!(count, 6);
}

#[rstest]
fn generated_key_with_trailing_comment_writes_nothing(mut clinic: SqlExecutor<SqliteSession>) {
    let err = clinic
        .execute_returning_key(
            "INSERT INTO types (name) VALUES (?) -- new type",
            &params!["elephant"],
            &["id"],
        )
        .unwrap_err();
    assert!(matches!(err, SqlError::Statement { .. }));

    let count: i64 = clinic.query_scalar("SELECT COUNT(*) FROM types", &[]).unwrap();
    assert_eq!(count, 6);
}

#[rstest]
fn generated_key_rejects_update(mut clinic: SqlExecutor<SqliteSession>) {
    let err = clinic
        .execute_returning_key("UPDATE types SET name = 'elephant' WHERE id = 6", &[], &["id"])
        .unwrap_err();
    assert!(matches!(err, SqlError::Unsupported { .. }));
}

#[rstest]
fn duplicate_primary_key_is_integrity_violation(mut clinic: SqlExecutor<SqliteSession>) {
    let err = clinic
        .execute("INSERT INTO owners (id, first_name) VALUES (?, ?)", &params![1, "Twin"])
        .unwrap_err();
    assert!(matches!(err, SqlError::Integrity { .. }));
}

#[rstest]
fn unknown_pet_type_is_integrity_violation(mut clinic: SqlExecutor<SqliteSession>) {
    let err = clinic
        .execute(
            "INSERT INTO pets (id, name, type_id, owner_id) VALUES (?, ?, ?, ?)",
            &params![14, "Stray", 999, 1],
        )
        .unwrap_err();
    assert!(matches!(err, SqlError::Integrity { .. }));
}

#[rstest]
fn batch_update_reports_per_set_counts(mut clinic: SqlExecutor<SqliteSession>) {
    let counts = clinic
        .batch_update(
            "UPDATE owners SET city = ? WHERE city = ?",
            &[params!["Madison WI", "Madison"], params!["Monona WI", "Monona"], params!["X", "Nowhere"]],
        )
        .unwrap();
    assert_eq!(counts, [4, 2, 0]);
}

// ============================================================================
// Statement errors and round trips
// ============================================================================

#[rstest]
#[case::missing_param("SELECT * FROM owners WHERE id = ?", params![])]
#[case::extra_param("SELECT * FROM owners", params![1])]
#[case::malformed("SELEC * FROM owners", params![])]
#[case::trailing_statement("SELECT * FROM owners; DELETE FROM owners", params![])]
fn statement_errors_before_any_row(
    mut clinic: SqlExecutor<SqliteSession>,
    #[case] sql: &str,
    #[case] params: Vec<Value>,
) {
    let mut mapped = 0;
    let err = clinic
        .query_many(sql, &params, |_, _| {
            mapped += 1;
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, SqlError::Statement { .. }));
    assert_eq!(mapped, 0);

    let owners: i64 = clinic.query_scalar("SELECT COUNT(*) FROM owners", &[]).unwrap();
    assert_eq!(owners, 10);
}

#[rstest]
fn values_round_trip(mut clinic: SqlExecutor<SqliteSession>) {
    clinic
        .run_script("CREATE TABLE samples (i INTEGER, r REAL, t TEXT, b BLOB, n TEXT)")
        .unwrap();
    let written = params![-42_i64, 2.5, "Sun Prairie", vec![0xde_u8, 0xad], None::<String>];
    clinic
        .execute("INSERT INTO samples (i, r, t, b, n) VALUES (?, ?, ?, ?, ?)", &written)
        .unwrap();

    let row = clinic.query_row_as_map("SELECT * FROM samples", &[]).unwrap();
    let read: Vec<Value> = row.iter().map(|(_, v)| v.clone()).collect();
    assert_eq!(read, written);
}

#[rstest]
fn null_reads_as_none(mut clinic: SqlExecutor<SqliteSession>) {
    clinic
        .execute("INSERT INTO pets (id, name, type_id) VALUES (?, ?, ?)", &params![14, "Stray", 2])
        .unwrap();
    let owner: Option<i64> = clinic
        .query_scalar("SELECT owner_id FROM pets WHERE id = ?", &params![14])
        .unwrap();
    assert_eq!(owner, None);
}

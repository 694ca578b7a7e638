use chaintally::{CellValue, ChainOutputTable, Row};

fn sample_table() -> ChainOutputTable {
    let mut table = ChainOutputTable::new();
    table.append(Row::from([
        ("step".to_owned(), CellValue::from(0i64)),
        ("accepted".to_owned(), CellValue::from(true)),
        (
            "population".to_owned(),
            CellValue::by_district([(1u32, 7_000i64), (2u32, 7_100i64)]),
        ),
    ]));
    table.append(Row::from([
        ("step".to_owned(), CellValue::from(1i64)),
        ("note".to_owned(), CellValue::from("flipped precinct 17")),
        (
            "deviation".to_owned(),
            CellValue::by_district([(1u32, 0.012f64)]),
        ),
    ]));
    table
}

#[test]
fn serializes_as_an_array_of_row_objects() {
    let json: serde_json::Value = serde_json::to_value(sample_table()).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["step"], 0);
    assert_eq!(rows[0]["population"]["1"], 7_000);
    assert_eq!(rows[1]["note"], "flipped precinct 17");
}

#[test]
fn round_trip_preserves_rows_columns_and_values() {
    let table = sample_table();
    let json = table.to_json().unwrap();
    let back: ChainOutputTable = serde_json::from_str(&json).unwrap();
    assert_eq!(back, table);
}

#[test]
fn repeated_serialization_is_stable() {
    let table = sample_table();
    let first = table.to_json().unwrap();
    let second = table.to_json().unwrap();
    assert_eq!(first, second);
    // Serialization reads the table without consuming it.
    assert_eq!(table.len(), 2);
}

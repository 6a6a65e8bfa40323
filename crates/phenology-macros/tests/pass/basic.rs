use phenology_macros::Record;

#[derive(Debug, Clone, PartialEq, Record)]
pub struct TestRecord {
    pub day: u32,
    pub crown_temperature: f64,
    pub stage: Option<u32>,
}

fn main() {
    let r = TestRecord { day: 5, crown_temperature: 12.5, stage: None };
    let mut table = TestRecordTable::with_capacity(10);
    table.push(&r);
    assert_eq!(table.len(), 1);
    assert!(!table.is_empty());
    assert_eq!(table.row(0), Some(r));
    assert_eq!(table.row(1), None);
    assert_eq!(TestRecord::column_names(), &["day", "crown_temperature", "stage"]);
}

use phenology_macros::Record;

#[derive(Debug, Clone, PartialEq, Record)]
#[record(table_name = "DayTable")]
pub struct DayRow {
    #[record(column = "Crown temperature (T_c)")]
    pub crown_temperature: f64,
    #[record(column = "delta_TT")]
    pub delta_tt: f64,
    pub label: String,
}

fn main() {
    let r = DayRow { crown_temperature: 3.5, delta_tt: 3.5, label: "sowing".to_string() };
    let mut table = DayTable::with_capacity(2);
    table.push(&r);
    assert_eq!(table.label, vec!["sowing".to_string()]);
    assert_eq!(
        DayRow::column_names(),
        &["Crown temperature (T_c)", "delta_TT", "label"]
    );
}

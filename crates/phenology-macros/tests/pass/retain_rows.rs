use phenology_macros::Record;

#[derive(Debug, Clone, PartialEq, Record)]
pub struct Sample {
    pub index: usize,
    pub value: f64,
}

fn main() {
    let mut table = SampleTable::default();
    for index in 0..5 {
        table.push(&Sample { index, value: index as f64 * 0.5 });
    }
    table.retain_rows(&[true, false, true]);
    assert_eq!(table.index, vec![0, 2]);
    assert_eq!(table.value, vec![0.0, 1.0]);
}

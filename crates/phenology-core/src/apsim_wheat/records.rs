/// Per-day output record of the accumulator and its columnar table.
///
/// Column names are the ones external calibration code joins on; they are
/// exported through `DailyRecord::column_names()`.
use chrono::NaiveDate;
use phenology_macros::Record;

use crate::traits::RecordTableOps;

#[derive(Debug, Clone, PartialEq, Record)]
#[record(table_name = "DailyTable")]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DailyRecord {
    #[record(column = "Date")]
    #[cfg_attr(feature = "serde", serde(rename = "Date"))]
    pub date: NaiveDate,
    #[record(column = "Year")]
    #[cfg_attr(feature = "serde", serde(rename = "Year"))]
    pub year: i32,
    #[record(column = "Month")]
    #[cfg_attr(feature = "serde", serde(rename = "Month"))]
    pub month: u32,
    #[record(column = "Day")]
    #[cfg_attr(feature = "serde", serde(rename = "Day"))]
    pub day: u32,
    #[record(column = "T_max")]
    #[cfg_attr(feature = "serde", serde(rename = "T_max"))]
    pub max_temp: f64,
    #[record(column = "T_min")]
    #[cfg_attr(feature = "serde", serde(rename = "T_min"))]
    pub min_temp: f64,
    #[record(column = "L_p")]
    #[cfg_attr(feature = "serde", serde(rename = "L_p"))]
    pub day_length: f64,
    #[record(column = "Photoperiod factor (f_D)")]
    #[cfg_attr(feature = "serde", serde(rename = "Photoperiod factor (f_D)"))]
    pub photoperiod_factor: f64,
    #[record(column = "Crown temperature (T_c)")]
    #[cfg_attr(feature = "serde", serde(rename = "Crown temperature (T_c)"))]
    pub crown_temperature: f64,
    #[record(column = "Total vernalisation (V)")]
    #[cfg_attr(feature = "serde", serde(rename = "Total vernalisation (V)"))]
    pub vernalisation: f64,
    #[record(column = "Vernalisation factor (f_V)")]
    #[cfg_attr(feature = "serde", serde(rename = "Vernalisation factor (f_V)"))]
    pub vernalisation_factor: f64,
    #[record(column = "delta_TT")]
    #[cfg_attr(feature = "serde", serde(rename = "delta_TT"))]
    pub delta_tt: f64,
    #[record(column = "Cumulative_TT")]
    #[cfg_attr(feature = "serde", serde(rename = "Cumulative_TT"))]
    pub cumulative_tt: f64,
    #[record(column = "Emergence_threshold")]
    #[cfg_attr(feature = "serde", serde(rename = "Emergence_threshold"))]
    pub emergence_threshold: f64,
    #[record(column = "Emergence_date")]
    #[cfg_attr(feature = "serde", serde(rename = "Emergence_date"))]
    pub emergence_date: Option<u32>,
}

impl RecordTableOps<DailyRecord> for DailyTable {
    fn with_capacity(n: usize) -> Self {
        DailyTable::with_capacity(n)
    }

    fn push(&mut self, r: &DailyRecord) {
        DailyTable::push(self, r)
    }

    fn len(&self) -> usize {
        DailyTable::len(self)
    }

    fn is_empty(&self) -> bool {
        DailyTable::is_empty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32, delta_tt: f64) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(1977, 3, day).unwrap(),
            year: 1977,
            month: 3,
            day,
            max_temp: 20.0,
            min_temp: 5.0,
            day_length: 12.5,
            photoperiod_factor: 0.83,
            crown_temperature: 12.5,
            vernalisation: 4.2,
            vernalisation_factor: 0.61,
            delta_tt,
            cumulative_tt: delta_tt,
            emergence_threshold: 100.0,
            emergence_date: None,
        }
    }

    #[test]
    fn column_names_match_external_contract() {
        assert_eq!(
            DailyRecord::column_names(),
            &[
                "Date",
                "Year",
                "Month",
                "Day",
                "T_max",
                "T_min",
                "L_p",
                "Photoperiod factor (f_D)",
                "Crown temperature (T_c)",
                "Total vernalisation (V)",
                "Vernalisation factor (f_V)",
                "delta_TT",
                "Cumulative_TT",
                "Emergence_threshold",
                "Emergence_date",
            ]
        );
    }

    #[test]
    fn table_push_and_row() {
        let mut t = <DailyTable as RecordTableOps<DailyRecord>>::with_capacity(2);
        t.push(&record(1, 12.5));
        t.push(&record(2, 7.25));
        assert_eq!(t.len(), 2);
        assert_eq!(t.delta_tt, vec![12.5, 7.25]);
        assert_eq!(t.row(1), Some(record(2, 7.25)));
    }

    #[test]
    fn retain_rows_keeps_columns_aligned() {
        let mut t = DailyTable::default();
        for d in 1..=4 {
            t.push(&record(d, f64::from(d)));
        }
        t.retain_rows(&[true, true, false, false]);
        assert_eq!(t.day, vec![1, 2]);
        assert_eq!(t.delta_tt, vec![1.0, 2.0]);
        assert_eq!(t.date.len(), 2);
    }
}

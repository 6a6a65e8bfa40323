/// Daily table extended with stage columns, `TT_prime` and the
/// parameter-set tag.
use super::{Stage, StageDates};
use crate::apsim_wheat::records::{DailyRecord, DailyTable};

const N_DETECTED: usize = 6;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageTable {
    pub daily: DailyTable,
    /// Day-of-year columns for every stage after emergence, in stage order.
    detected: [Vec<Option<u32>>; N_DETECTED],
    /// Cumulative delta_TT before floral initiation and crown temperature
    /// from it on, rounded. Unset everywhere without floral initiation.
    pub tt_prime: Vec<Option<f64>>,
    pub parameter_set: Option<u32>,
}

impl StageTable {
    /// Wrap an accumulated table with every stage column unset.
    pub fn new(daily: DailyTable) -> Self {
        let n = daily.len();
        Self {
            detected: std::array::from_fn(|_| vec![None; n]),
            tt_prime: vec![None; n],
            parameter_set: None,
            daily,
        }
    }

    pub fn len(&self) -> usize {
        self.daily.len()
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }

    /// Day-of-year column of `stage`. Emergence is the accumulator's own column.
    pub fn column(&self, stage: Stage) -> &[Option<u32>] {
        match stage {
            Stage::Emergence => &self.daily.emergence_date,
            other => &self.detected[other.index() - 1],
        }
    }

    /// Mutable column of a detected stage. Emergence is read-only here.
    pub(crate) fn detected_column_mut(&mut self, stage: Stage) -> Option<&mut Vec<Option<u32>>> {
        match stage {
            Stage::Emergence => None,
            other => Some(&mut self.detected[other.index() - 1]),
        }
    }

    /// First assigned day-of-year of every stage.
    pub fn stage_dates(&self) -> StageDates {
        let mut dates = StageDates::default();
        for stage in Stage::ALL {
            dates.set(stage, self.column(stage).iter().flatten().next().copied());
        }
        dates
    }

    /// Exported column names, in output order.
    pub fn column_names() -> Vec<&'static str> {
        let mut names = DailyRecord::column_names().to_vec();
        names.extend(Stage::ALL[1..].iter().map(|s| s.column_name()));
        names.push("TT_prime");
        names.push("Parameter_set");
        names
    }

    /// Keep only the rows whose entry in `keep` is `true`, in every column.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        self.daily.retain_rows(keep);
        for column in &mut self.detected {
            retain_masked(column, keep);
        }
        retain_masked(&mut self.tt_prime, keep);
    }
}

impl From<DailyTable> for StageTable {
    fn from(daily: DailyTable) -> Self {
        Self::new(daily)
    }
}

fn retain_masked<T>(column: &mut Vec<T>, keep: &[bool]) {
    let mut mask = keep.iter();
    column.retain(|_| mask.next().copied().unwrap_or(false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn daily(n: u64) -> DailyTable {
        let start = NaiveDate::from_ymd_opt(1977, 5, 1).unwrap();
        let mut t = DailyTable::default();
        for i in 0..n {
            let date = start + Days::new(i);
            t.push(&DailyRecord {
                date,
                year: 1977,
                month: 5,
                day: 1 + i as u32,
                max_temp: 20.0,
                min_temp: 10.0,
                day_length: 14.0,
                photoperiod_factor: 0.892,
                crown_temperature: 15.0,
                vernalisation: 50.0,
                vernalisation_factor: 1.0,
                delta_tt: 13.38,
                cumulative_tt: 13.38 * (i + 1) as f64,
                emergence_threshold: 100.0,
                emergence_date: Some(121),
            });
        }
        t
    }

    #[test]
    fn new_table_has_unset_stage_columns() {
        let t = StageTable::new(daily(3));
        assert_eq!(t.len(), 3);
        assert_eq!(t.column(Stage::Emergence), &[Some(121); 3]);
        assert_eq!(t.column(Stage::Flowering), &[None; 3]);
        assert_eq!(t.tt_prime, vec![None; 3]);
        assert_eq!(t.parameter_set, None);
    }

    #[test]
    fn column_names_in_output_order() {
        let names = StageTable::column_names();
        assert_eq!(names.len(), 23);
        assert_eq!(names[0], "Date");
        assert_eq!(names[14], "Emergence_date");
        assert_eq!(names[15], "End_of_juvenile_date");
        assert_eq!(names[20], "maturity_date");
        assert_eq!(&names[21..], &["TT_prime", "Parameter_set"]);
    }

    #[test]
    fn stage_dates_take_first_assigned_value() {
        let mut t = StageTable::new(daily(4));
        if let Some(col) = t.detected_column_mut(Stage::EndOfJuvenile) {
            *col = vec![None, Some(123), Some(123), Some(123)];
        }
        let dates = t.stage_dates();
        assert_eq!(dates.emergence, Some(121));
        assert_eq!(dates.end_of_juvenile, Some(123));
        assert_eq!(dates.maturity, None);
        assert!(t.detected_column_mut(Stage::Emergence).is_none());
    }

    #[test]
    fn retain_rows_applies_to_every_column() {
        let mut t = StageTable::new(daily(4));
        t.tt_prime = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        t.retain_rows(&[true, true, true, false]);
        assert_eq!(t.len(), 3);
        assert_eq!(t.tt_prime.len(), 3);
        assert_eq!(t.column(Stage::Maturity).len(), 3);
    }
}

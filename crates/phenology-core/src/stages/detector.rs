/// Stage-boundary detection.
///
/// One parameterised transition is applied six times from a fixed table.
/// Afterwards `TT_prime` is derived and rows later than the day after
/// maturity are dropped. Detection never fails: a stage that is not reached
/// (or whose predecessor is not reached) is simply left unset.
use chrono::{Datelike, Days, NaiveDate};

use super::divisors::{DivisorKey, StageDivisors};
use super::table::StageTable;
use super::Stage;
use crate::apsim_wheat::records::DailyTable;
use crate::numeric::round3;

/// Daily signal summed by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceColumn {
    DeltaTt,
    CrownTemperature,
}

impl SourceColumn {
    pub fn column_name(self) -> &'static str {
        match self {
            SourceColumn::DeltaTt => "delta_TT",
            SourceColumn::CrownTemperature => "Crown temperature (T_c)",
        }
    }

    pub fn values(self, daily: &DailyTable) -> &[f64] {
        match self {
            SourceColumn::DeltaTt => &daily.delta_tt,
            SourceColumn::CrownTemperature => &daily.crown_temperature,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub previous: Stage,
    pub divisor: DivisorKey,
    pub stage: Stage,
    pub source: SourceColumn,
}

pub const TRANSITIONS: [Transition; 6] = [
    Transition {
        previous: Stage::Emergence,
        divisor: DivisorKey::Emergence,
        stage: Stage::EndOfJuvenile,
        source: SourceColumn::DeltaTt,
    },
    Transition {
        previous: Stage::EndOfJuvenile,
        divisor: DivisorKey::EndOfJuvenile,
        stage: Stage::FloralInitiation,
        source: SourceColumn::DeltaTt,
    },
    Transition {
        previous: Stage::FloralInitiation,
        divisor: DivisorKey::FloralInitiation,
        stage: Stage::Flowering,
        source: SourceColumn::CrownTemperature,
    },
    Transition {
        previous: Stage::Flowering,
        divisor: DivisorKey::Flowering,
        stage: Stage::Heading,
        source: SourceColumn::CrownTemperature,
    },
    // tt_start_grain_fill closes the heading stage.
    Transition {
        previous: Stage::Heading,
        divisor: DivisorKey::StartGrainFill,
        stage: Stage::EndGrainFill,
        source: SourceColumn::CrownTemperature,
    },
    Transition {
        previous: Stage::EndGrainFill,
        divisor: DivisorKey::EndGrainFill,
        stage: Stage::Maturity,
        source: SourceColumn::CrownTemperature,
    },
];

/// Run stage detection on a freshly accumulated table.
pub fn detect_stages(daily: DailyTable, divisors: &StageDivisors) -> StageTable {
    let mut table = StageTable::new(daily);
    detect(&mut table, divisors);
    table
}

/// Recompute every detected column of `table` in place.
///
/// Stage columns and `TT_prime` are rebuilt from scratch, so running this on
/// its own output changes nothing.
pub fn detect(table: &mut StageTable, divisors: &StageDivisors) {
    for transition in &TRANSITIONS {
        apply_transition(table, transition, divisors);
    }
    assign_tt_prime(table);
    truncate_after_maturity(table);
}

/// Assign one stage column from its predecessor.
pub fn apply_transition(table: &mut StageTable, transition: &Transition, divisors: &StageDivisors) {
    let threshold = divisors.get(transition.divisor);
    let crossing = find_crossing(
        table.column(transition.previous),
        transition.source.values(&table.daily),
        threshold,
    );

    let dates = &table.daily.date;
    let assigned: Vec<Option<u32>> = match crossing {
        Some(row) => {
            let stage_date = dates[row];
            let doy = stage_date.ordinal();
            log::debug!(
                "{} on {} (doy {}), {} threshold {}",
                transition.stage.column_name(),
                stage_date,
                doy,
                transition.divisor.name(),
                threshold
            );
            dates
                .iter()
                .map(|d| (*d >= stage_date).then_some(doy))
                .collect()
        }
        None => {
            log::trace!(
                "{} not reached ({} = {})",
                transition.stage.column_name(),
                transition.divisor.name(),
                threshold
            );
            vec![None; dates.len()]
        }
    };

    if let Some(column) = table.detected_column_mut(transition.stage) {
        *column = assigned;
    }
}

/// Row whose running sum lands nearest `threshold`.
///
/// Summing starts the row after the first row where `previous` is set. The
/// first row reaching the threshold competes with the row before it; ties go
/// to the earlier row. When the very first summed row already reaches the
/// threshold it is chosen.
fn find_crossing(previous: &[Option<u32>], source: &[f64], threshold: f64) -> Option<usize> {
    let start = previous.iter().position(Option::is_some)? + 1;
    let mut cumulative = 0.0;
    for (row, &value) in source.iter().enumerate().skip(start) {
        let before = cumulative;
        cumulative += value;
        if cumulative >= threshold {
            if row == start {
                return Some(row);
            }
            let nearer_before = (before - threshold).abs() <= (cumulative - threshold).abs();
            return Some(if nearer_before { row - 1 } else { row });
        }
    }
    None
}

fn first_stage_date(table: &StageTable, stage: Stage) -> Option<NaiveDate> {
    let row = table.column(stage).iter().position(Option::is_some)?;
    Some(table.daily.date[row])
}

fn assign_tt_prime(table: &mut StageTable) {
    let n = table.len();
    table.tt_prime = match first_stage_date(table, Stage::FloralInitiation) {
        Some(initiation) => {
            let daily = &table.daily;
            let mut cumulative = 0.0;
            (0..n)
                .map(|i| {
                    cumulative += if daily.date[i] < initiation {
                        daily.delta_tt[i]
                    } else {
                        daily.crown_temperature[i]
                    };
                    Some(round3(cumulative))
                })
                .collect()
        }
        None => vec![None; n],
    };
}

fn truncate_after_maturity(table: &mut StageTable) {
    let Some(limit) = first_stage_date(table, Stage::Maturity)
        .and_then(|maturity| maturity.checked_add_days(Days::new(1)))
    else {
        return;
    };
    let keep: Vec<bool> = table.daily.date.iter().map(|d| *d <= limit).collect();
    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped > 0 {
        log::debug!("dropping {dropped} rows after {limit}");
        table.retain_rows(&keep);
    }
}

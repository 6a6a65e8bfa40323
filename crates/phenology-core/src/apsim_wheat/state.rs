/// APSIM wheat accumulator state.
///
/// Mutable state carried from day to day within one run. Each run owns its
/// own copy; nothing is shared between runs.
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct State {
    /// Accumulated vernalisation V [-], rounded to 3 decimals.
    pub vernalisation: f64,
    /// Raw thermal time summed from the day after sowing [C day].
    pub emergence_tt: f64,
    /// Date the emergence threshold was first reached. Never changes once set.
    pub emergence_date: Option<NaiveDate>,
    /// Cumulative thermal time carried in the output table [C day].
    /// Raw before emergence, photoperiod/vernalisation-modulated after it.
    pub cumulative_tt: f64,
}

impl State {
    /// Fresh state for a run that has not reached sowing yet.
    pub fn initialize() -> Self {
        Self::default()
    }

    /// Whether the emergence latch has fired.
    pub fn has_emerged(&self) -> bool {
        self.emergence_date.is_some()
    }

    /// Latch `date` as the emergence date if none is set yet.
    ///
    /// Returns `true` only on the call that sets it.
    pub fn latch_emergence(&mut self, date: NaiveDate) -> bool {
        if self.emergence_date.is_some() {
            return false;
        }
        self.emergence_date = Some(date);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_zeroed() {
        let s = State::initialize();
        assert_eq!(s.vernalisation, 0.0);
        assert_eq!(s.emergence_tt, 0.0);
        assert_eq!(s.cumulative_tt, 0.0);
        assert!(!s.has_emerged());
    }

    #[test]
    fn emergence_latches_once() {
        let mut s = State::initialize();
        let first = NaiveDate::from_ymd_opt(1976, 11, 20).unwrap();
        let later = NaiveDate::from_ymd_opt(1976, 11, 25).unwrap();
        assert!(s.latch_emergence(first));
        assert!(!s.latch_emergence(later));
        assert_eq!(s.emergence_date, Some(first));
    }
}

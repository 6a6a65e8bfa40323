use crate::error::PhenologyError;

/// Core trait for daily phenology models.
///
/// Defines the interface a sequential daily model implements: prepare
/// context, initialize state, step, and run over a weather series.
pub trait DailyModel {
    type Params;
    type State: Clone;
    type Forcing;
    type Record;
    type Table: RecordTableOps<Self::Record>;
    /// Precomputed context derived from params, constant for a given run.
    type Context;

    /// Precompute any run-constant data from parameters (e.g., the emergence threshold).
    fn prepare(params: &Self::Params) -> Self::Context;

    /// Create a default initial state from parameters.
    fn initialize_state(params: &Self::Params) -> Self::State;

    /// Execute one day: given state, params, forcing, and context,
    /// return the new state and the day's record.
    ///
    /// A `None` record means the day is skipped and produces no row.
    fn step(
        state: &Self::State,
        params: &Self::Params,
        forcing: &Self::Forcing,
        context: &Self::Context,
    ) -> (Self::State, Option<Self::Record>);

    /// Run the model over a weather series.
    ///
    /// Default implementation: prepare context, initialize/use provided state,
    /// loop over forcing calling step, keep every produced record.
    fn run(
        params: &Self::Params,
        forcing: &[Self::Forcing],
        initial_state: Option<&Self::State>,
    ) -> Self::Table {
        let context = Self::prepare(params);
        let mut state = match initial_state {
            Some(s) => s.clone(),
            None => Self::initialize_state(params),
        };

        let mut outputs = Self::Table::with_capacity(forcing.len());

        for f in forcing {
            let (new_state, record) = Self::step(&state, params, f, &context);
            if let Some(record) = record {
                outputs.push(&record);
            }
            state = new_state;
        }

        outputs
    }
}

/// Operations required on the columnar table type.
pub trait RecordTableOps<R> {
    fn with_capacity(n: usize) -> Self;
    fn push(&mut self, r: &R);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

/// Flat-array contract for calibrated parameter sets.
pub trait ModelParams: Sized {
    const N_PARAMS: usize;
    const PARAM_NAMES: &'static [&'static str];
    const PARAM_BOUNDS: &'static [(f64, f64)];

    fn from_array(arr: &[f64]) -> Result<Self, PhenologyError>;
    fn to_array(&self) -> Vec<f64>;
}

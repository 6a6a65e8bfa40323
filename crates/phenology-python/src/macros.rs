/// Move `f64` columns of a table into a `PyDict` as numpy arrays, keyed by
/// their exported column names.
macro_rules! float_columns_into_dict {
    ($py:expr, $dict:expr, $table:ident, $($name:literal => $field:ident),+ $(,)?) => {{
        $(
            $dict.set_item($name, numpy::PyArray1::from_vec($py, $table.$field))?;
        )+
    }};
}


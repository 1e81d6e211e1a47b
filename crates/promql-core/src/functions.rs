//! Static function registry.
//!
//! Each entry records positional argument types, how many trailing
//! arguments may be omitted, whether the last argument repeats, and the
//! return type. The table is a compile-time perfect hash and needs no
//! initialization.

use phf::phf_map;
use serde::Serialize;

use crate::ValueType::{self, Matrix, Scalar, String as Str, Vector};

/// Signature of a built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: &'static str,
    pub arg_types: &'static [ValueType],
    /// Number of trailing entries of `arg_types` that may be left out.
    pub optional_args: usize,
    /// The last argument type may repeat any number of times.
    pub variadic: bool,
    pub return_type: ValueType,
}

impl Function {
    const fn new(name: &'static str, arg_types: &'static [ValueType], return_type: ValueType) -> Self {
        Self {
            name,
            arg_types,
            optional_args: 0,
            variadic: false,
            return_type,
        }
    }

    const fn optional(mut self, count: usize) -> Self {
        self.optional_args = count;
        self
    }

    const fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn min_args(&self) -> usize {
        self.arg_types.len() - self.optional_args
    }

    /// `None` when the function is variadic.
    pub fn max_args(&self) -> Option<usize> {
        (!self.variadic).then_some(self.arg_types.len())
    }

    /// Expected type of the argument at `index`, if the function accepts one there.
    pub fn arg_type(&self, index: usize) -> Option<ValueType> {
        match self.arg_types.get(index) {
            Some(ty) => Some(*ty),
            None if self.variadic => self.arg_types.last().copied(),
            None => None,
        }
    }
}

static FUNCTIONS: phf::Map<&'static str, Function> = phf_map! {
    "abs" => Function::new("abs", &[Vector], Vector),
    "absent" => Function::new("absent", &[Vector], Vector),
    "avg_over_time" => Function::new("avg_over_time", &[Matrix], Vector),
    "ceil" => Function::new("ceil", &[Vector], Vector),
    "changes" => Function::new("changes", &[Matrix], Vector),
    "clamp_max" => Function::new("clamp_max", &[Vector, Scalar], Vector),
    "clamp_min" => Function::new("clamp_min", &[Vector, Scalar], Vector),
    "count_over_time" => Function::new("count_over_time", &[Matrix], Vector),
    "count_scalar" => Function::new("count_scalar", &[Vector], Scalar),
    "day_of_month" => Function::new("day_of_month", &[Vector], Vector).optional(1),
    "day_of_week" => Function::new("day_of_week", &[Vector], Vector).optional(1),
    "days_in_month" => Function::new("days_in_month", &[Vector], Vector).optional(1),
    "delta" => Function::new("delta", &[Matrix], Vector),
    "deriv" => Function::new("deriv", &[Matrix], Vector),
    "drop_common_labels" => Function::new("drop_common_labels", &[Vector], Vector),
    "exp" => Function::new("exp", &[Vector], Vector),
    "floor" => Function::new("floor", &[Vector], Vector),
    "histogram_quantile" => Function::new("histogram_quantile", &[Scalar, Vector], Vector),
    "holt_winters" => Function::new("holt_winters", &[Matrix, Scalar, Scalar], Vector),
    "hour" => Function::new("hour", &[Vector], Vector).optional(1),
    "idelta" => Function::new("idelta", &[Matrix], Vector),
    "increase" => Function::new("increase", &[Matrix], Vector),
    "irate" => Function::new("irate", &[Matrix], Vector),
    "label_join" => Function::new("label_join", &[Vector, Str, Str, Str], Vector).optional(1).variadic(),
    "label_replace" => Function::new("label_replace", &[Vector, Str, Str, Str, Str], Vector),
    "ln" => Function::new("ln", &[Vector], Vector),
    "log10" => Function::new("log10", &[Vector], Vector),
    "log2" => Function::new("log2", &[Vector], Vector),
    "max_over_time" => Function::new("max_over_time", &[Matrix], Vector),
    "min_over_time" => Function::new("min_over_time", &[Matrix], Vector),
    "minute" => Function::new("minute", &[Vector], Vector).optional(1),
    "month" => Function::new("month", &[Vector], Vector).optional(1),
    "predict_linear" => Function::new("predict_linear", &[Matrix, Scalar], Vector),
    "quantile_over_time" => Function::new("quantile_over_time", &[Scalar, Matrix], Vector),
    "rate" => Function::new("rate", &[Matrix], Vector),
    "resets" => Function::new("resets", &[Matrix], Vector),
    "round" => Function::new("round", &[Vector, Scalar], Vector).optional(1),
    "scalar" => Function::new("scalar", &[Vector], Scalar),
    "sort" => Function::new("sort", &[Vector], Vector),
    "sort_desc" => Function::new("sort_desc", &[Vector], Vector),
    "sqrt" => Function::new("sqrt", &[Vector], Vector),
    "stddev_over_time" => Function::new("stddev_over_time", &[Matrix], Vector),
    "stdvar_over_time" => Function::new("stdvar_over_time", &[Matrix], Vector),
    "sum_over_time" => Function::new("sum_over_time", &[Matrix], Vector),
    "time" => Function::new("time", &[], Scalar),
    "vector" => Function::new("vector", &[Scalar], Vector),
    "year" => Function::new("year", &[Vector], Vector).optional(1),
};

/// Looks up a function by its exact (case-sensitive) name.
pub fn lookup(name: &str) -> Option<&'static Function> {
    FUNCTIONS.get(name)
}

/// All registered functions, in no particular order.
pub fn all() -> impl Iterator<Item = &'static Function> {
    FUNCTIONS.values()
}

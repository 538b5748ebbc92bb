use std::str::FromStr;

use crate::diagnostics::{Diagnostics, LogSink, Raised};
use crate::error::EvalResult;
use crate::object::{Obj, Scalar};
use crate::ops::{self, Operand, Operator, Options};

/// Environment variable listing optimizations to turn off, comma separated.
pub const DISABLE_ENV: &str = "R_ARITH_DISABLE";

/// Evaluation shortcuts that can be turned off. Turning one off never
/// changes a result, only how it is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Optimization {
    /// Describe the result of shifting or scaling a progression as a
    /// progression.
    SequenceFolding,
    /// Compute into the buffer of a temporary operand.
    OperandReuse,
}

/// Evaluation settings and the sink receiving warnings and errors.
#[derive(Debug, Clone)]
pub struct Session<D = LogSink> {
    pub disabled: Vec<Optimization>,
    diagnostics: D,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            disabled: vec![],
            diagnostics: LogSink,
        }
    }
}

impl Session {
    /// A session with every optimization turned on except those named in
    /// `R_ARITH_DISABLE`.
    pub fn from_env() -> Session {
        let disabled = std::env::var(DISABLE_ENV)
            .map(|value| parse_disabled(&value))
            .unwrap_or_default();

        Session {
            disabled,
            diagnostics: LogSink,
        }
    }
}

fn parse_disabled(value: &str) -> Vec<Optimization> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| match Optimization::from_str(name) {
            Ok(opt) => Some(opt),
            Err(_) => {
                tracing::warn!(name, "ignoring unknown optimization in {DISABLE_ENV}");
                None
            }
        })
        .collect()
}

impl<D: Diagnostics> Session<D> {
    pub fn with_disabled(mut self, optimization: Optimization) -> Self {
        if !self.disabled.contains(&optimization) {
            self.disabled.push(optimization);
        }
        self
    }

    pub fn with_diagnostics<E: Diagnostics>(self, diagnostics: E) -> Session<E> {
        Session {
            disabled: self.disabled,
            diagnostics,
        }
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut D {
        &mut self.diagnostics
    }

    pub fn is_enabled(&self, optimization: Optimization) -> bool {
        !self.disabled.contains(&optimization)
    }

    pub(crate) fn options(&self) -> Options {
        Options {
            fold: self.is_enabled(Optimization::SequenceFolding),
            reuse: self.is_enabled(Optimization::OperandReuse),
        }
    }

    /// Evaluate `left op right`, or the unary form of `op` when `right` is
    /// `None`.
    ///
    /// Passing an operand by value lets the result be computed into its
    /// buffer; passing it by reference leaves it untouched. Warnings and
    /// errors are reported to the session's diagnostics.
    pub fn evaluate_binary<'a>(
        &mut self,
        op: Operator,
        left: impl Into<Operand<'a>>,
        right: Option<Operand<'a>>,
    ) -> EvalResult<Obj> {
        let mut raised = Raised::default();
        let result = ops::evaluate(op, left.into(), right, self.options(), &mut raised);
        raised.report(&mut self.diagnostics);
        self.report(result)
    }

    /// Concatenate two values.
    pub fn evaluate_combine(&mut self, left: &Obj, right: &Obj) -> EvalResult<Obj> {
        let result = ops::combine(left, right);
        self.report(result)
    }

    /// Concatenate any number of optionally named values.
    pub fn combine_all(&mut self, args: Vec<(Option<String>, Obj)>) -> EvalResult<Obj> {
        let result = ops::combine_all(args);
        self.report(result)
    }

    pub fn apply_scalar(&mut self, op: Operator, left: &Scalar, right: &Scalar) -> EvalResult<Scalar> {
        let result = ops::apply_scalar_with(op, left, right, &mut self.diagnostics);
        self.report(result)
    }

    fn report<T>(&mut self, result: EvalResult<T>) -> EvalResult<T> {
        if let Err(error) = &result {
            self.diagnostics.error(error);
        }
        result
    }
}

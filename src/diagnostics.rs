use crate::error::Error;

/// Non-fatal conditions. A warning never stops an evaluation and never
/// changes its values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Warning {
    #[error("longer object length ({longer}) is not a multiple of shorter object length ({shorter})")]
    LengthMismatch { longer: usize, shorter: usize },

    #[error("NAs produced by integer overflow")]
    IntegerOverflow,

    #[error("probable complete loss of accuracy in modulus")]
    ModulusAccuracy,
}

/// Receiver for the conditions raised by an evaluation.
pub trait Diagnostics {
    fn warning(&mut self, warning: &Warning);

    fn error(&mut self, error: &Error);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn warning(&mut self, warning: &Warning) {
        (**self).warning(warning)
    }

    fn error(&mut self, error: &Error) {
        (**self).error(error)
    }
}

/// Forward conditions to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl Diagnostics for LogSink {
    fn warning(&mut self, warning: &Warning) {
        tracing::warn!(%warning, "warning in binary operation");
    }

    fn error(&mut self, error: &Error) {
        tracing::error!(%error, "binary operation failed");
    }
}

/// Keep conditions for later inspection.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CollectSink {
    pub warnings: Vec<Warning>,
    pub errors: Vec<Error>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}

impl Diagnostics for CollectSink {
    fn warning(&mut self, warning: &Warning) {
        self.warnings.push(warning.clone());
    }

    fn error(&mut self, error: &Error) {
        self.errors.push(error.clone());
    }
}

/// Warnings raised during one call, each kind reported at most once.
#[derive(Debug, Default, Clone)]
pub(crate) struct Raised(Vec<Warning>);

impl Raised {
    pub fn raise(&mut self, warning: Warning) {
        let seen = self
            .0
            .iter()
            .any(|w| std::mem::discriminant(w) == std::mem::discriminant(&warning));
        if !seen {
            self.0.push(warning);
        }
    }

    /// Take over the warnings raised elsewhere during the same call.
    pub fn absorb(&mut self, other: Raised) {
        for warning in other.0 {
            self.raise(warning);
        }
    }

    pub fn report(self, sink: &mut impl Diagnostics) {
        for warning in self.0.iter() {
            sink.warning(warning);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn each_warning_kind_is_raised_once() {
        let mut raised = Raised::default();
        raised.raise(Warning::IntegerOverflow);
        raised.raise(Warning::LengthMismatch {
            longer: 3,
            shorter: 2,
        });
        raised.raise(Warning::IntegerOverflow);

        let mut sink = CollectSink::new();
        raised.report(&mut sink);
        assert_eq!(sink.warnings.len(), 2);
        assert_eq!(
            sink.warnings[1].to_string(),
            "longer object length (3) is not a multiple of shorter object length (2)"
        );
    }
}

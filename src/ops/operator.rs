/// Operator families, which decide how argument and result kinds relate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
pub enum Family {
    Arithmetic,
    Comparison,
    Logical,
}

/// Vectorized binary operators, parsed from and displayed as their symbol.
///
/// ```
/// use r_arith::ops::Operator;
/// use std::str::FromStr;
///
/// assert_eq!(Operator::from_str("%/%"), Ok(Operator::IntegerDiv));
/// assert_eq!(Operator::Pow.to_string(), "^");
/// ```
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
pub enum Operator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
    #[strum(serialize = "^")]
    Pow,
    #[strum(serialize = "%%")]
    Mod,
    #[strum(serialize = "%/%")]
    IntegerDiv,

    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Ne,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    Ge,

    #[strum(serialize = "&")]
    And,
    #[strum(serialize = "|")]
    Or,
}

impl Operator {
    pub fn family(self) -> Family {
        use Operator::*;
        match self {
            Add | Subtract | Multiply | Divide | Pow | Mod | IntegerDiv => Family::Arithmetic,
            Eq | Ne | Lt | Le | Gt | Ge => Family::Comparison,
            And | Or => Family::Logical,
        }
    }

    pub fn symbol(self) -> String {
        self.to_string()
    }

    /// Whether integer operands keep an integer result rather than being
    /// promoted to double.
    pub fn supports_integer_result(self) -> bool {
        !matches!(self, Operator::Divide | Operator::Pow)
    }

    pub fn is_commutative(self) -> bool {
        use Operator::*;
        matches!(self, Add | Multiply | Eq | Ne | And | Or)
    }

    /// Whether the operator can produce NA from operands that hold none.
    ///
    /// Integer modulus and integer division by zero are NA, and comparisons
    /// of NaN are NA.
    pub fn introduces_na(self) -> bool {
        use Operator::*;
        matches!(self, Mod | IntegerDiv) || self.family() == Family::Comparison
    }

    /// Comparisons that need an ordering rather than just equality.
    pub fn is_ordering(self) -> bool {
        use Operator::*;
        matches!(self, Lt | Le | Gt | Ge)
    }

    /// Operators whose effect on a progression shifts its start only.
    pub fn is_sequence_add_arithmetic(self) -> bool {
        matches!(self, Operator::Add | Operator::Subtract)
    }

    /// Operators whose effect on a progression scales start and stride.
    pub fn is_sequence_mul_arithmetic(self) -> bool {
        matches!(
            self,
            Operator::Multiply | Operator::Divide | Operator::IntegerDiv
        )
    }
}

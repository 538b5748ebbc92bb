use super::complex::Cplx;
use super::types::*;
use super::OptionNA;

pub trait CoercibleInto<T>: Sized {
    fn coerce_into(self) -> T;
}

impl<T> CoercibleInto<T> for T {
    #[inline]
    fn coerce_into(self) -> T {
        self
    }
}

impl CoercibleInto<Integer> for Logical {
    #[inline]
    fn coerce_into(self) -> Integer {
        self.map(|i| i as i32)
    }
}

impl CoercibleInto<Double> for Logical {
    #[inline]
    fn coerce_into(self) -> Double {
        self.map(|i| i as i32 as f64)
    }
}

impl CoercibleInto<Complex> for Logical {
    #[inline]
    fn coerce_into(self) -> Complex {
        self.map(|i| Cplx::from_real(i as i32 as f64))
    }
}

impl CoercibleInto<Character> for Logical {
    fn coerce_into(self) -> Character {
        self.map(|i| if i { "TRUE" } else { "FALSE" }.to_string())
    }
}

impl CoercibleInto<Logical> for Integer {
    #[inline]
    fn coerce_into(self) -> Logical {
        self.map(|i| i != 0)
    }
}

impl CoercibleInto<Double> for Integer {
    #[inline]
    fn coerce_into(self) -> Double {
        self.map(|i| i as f64)
    }
}

impl CoercibleInto<Complex> for Integer {
    #[inline]
    fn coerce_into(self) -> Complex {
        self.map(|i| Cplx::from_real(i as f64))
    }
}

impl CoercibleInto<Character> for Integer {
    fn coerce_into(self) -> Character {
        self.map(|i| i.to_string())
    }
}

impl CoercibleInto<Logical> for Double {
    #[inline]
    fn coerce_into(self) -> Logical {
        use OptionNA::*;
        match self {
            Some(x) if x.is_nan() => NA,
            Some(x) => Some(x != 0.0),
            NA => NA,
        }
    }
}

impl CoercibleInto<Complex> for Double {
    #[inline]
    fn coerce_into(self) -> Complex {
        self.map(Cplx::from_real)
    }
}

impl CoercibleInto<Character> for Double {
    fn coerce_into(self) -> Character {
        self.map(format_double)
    }
}

impl CoercibleInto<Logical> for Complex {
    #[inline]
    fn coerce_into(self) -> Logical {
        use OptionNA::*;
        match self {
            Some(x) if x.is_nan() => NA,
            Some(x) => Some(!x.is_zero()),
            NA => NA,
        }
    }
}

impl CoercibleInto<Character> for Complex {
    fn coerce_into(self) -> Character {
        self.map(|x| x.to_string())
    }
}

impl CoercibleInto<Logical> for Raw {
    #[inline]
    fn coerce_into(self) -> Logical {
        OptionNA::Some(self != 0)
    }
}

impl CoercibleInto<Integer> for Raw {
    #[inline]
    fn coerce_into(self) -> Integer {
        OptionNA::Some(self as i32)
    }
}

impl CoercibleInto<Double> for Raw {
    #[inline]
    fn coerce_into(self) -> Double {
        OptionNA::Some(self as f64)
    }
}

impl CoercibleInto<Complex> for Raw {
    #[inline]
    fn coerce_into(self) -> Complex {
        OptionNA::Some(Cplx::from_real(self as f64))
    }
}

impl CoercibleInto<Character> for Raw {
    fn coerce_into(self) -> Character {
        OptionNA::Some(format!("{:02x}", self))
    }
}

/// Significant digits used when rendering doubles as text.
const DIGITS: usize = 15;

/// Render a double the way R prints it: at most 15 significant digits, and
/// fixed notation unless scientific notation is strictly narrower.
pub fn format_double(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    // round to the available precision, then print the shortest form
    let rounded: f64 = format!("{:.*e}", DIGITS - 1, x).parse().unwrap_or(x);

    let fixed = format!("{}", rounded);
    let sci = format!("{:e}", rounded);
    let sci = match sci.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => sci,
    };

    if fixed.len() <= sci.len() {
        fixed
    } else {
        sci
    }
}

use std::fmt::Display;

use super::coercion::format_double;

/// Complex number with double precision parts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cplx {
    pub re: f64,
    pub im: f64,
}

impl Cplx {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn from_real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    pub fn nan() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    pub fn is_zero(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    pub fn is_one(&self) -> bool {
        self.re == 1.0 && self.im == 0.0
    }

    pub fn abs(&self) -> f64 {
        self.re.hypot(self.im)
    }

    pub fn arg(&self) -> f64 {
        self.im.atan2(self.re)
    }

    fn ln(self) -> Self {
        Self::new(self.abs().ln(), self.arg())
    }

    fn exp(self) -> Self {
        let r = self.re.exp();
        Self::new(r * self.im.cos(), r * self.im.sin())
    }

    /// Raise to an integral power by repeated squaring.
    fn powi(self, k: i32) -> Self {
        let mut base = self;
        let mut n = k.unsigned_abs();
        let mut acc = Cplx::from_real(1.0);
        while n > 0 {
            if n & 1 == 1 {
                acc = acc * base;
            }
            base = base * base;
            n >>= 1;
        }
        if k < 0 {
            Cplx::from_real(1.0) / acc
        } else {
            acc
        }
    }

    /// Complex power with R's conventions: a zero base is only defined for
    /// purely real exponents, and small integral exponents are computed
    /// exactly by multiplication.
    pub fn pow(self, y: Cplx) -> Self {
        const MAX_EXACT_POWER: f64 = 65536.0;

        if self.is_zero() {
            return if y.im == 0.0 {
                Cplx::from_real(0.0_f64.powf(y.re))
            } else {
                Cplx::nan()
            };
        }

        if y.im == 0.0 && y.re.fract() == 0.0 && y.re.abs() <= MAX_EXACT_POWER {
            return self.powi(y.re as i32);
        }

        (y * self.ln()).exp()
    }
}

impl std::ops::Add for Cplx {
    type Output = Cplx;
    fn add(self, rhs: Self) -> Self::Output {
        Cplx::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl std::ops::Sub for Cplx {
    type Output = Cplx;
    fn sub(self, rhs: Self) -> Self::Output {
        Cplx::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl std::ops::Mul for Cplx {
    type Output = Cplx;
    fn mul(self, rhs: Self) -> Self::Output {
        // (a + bi)(c + di) = (ac - bd) + (ad + bc)i
        Cplx::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl std::ops::Div for Cplx {
    type Output = Cplx;
    fn div(self, rhs: Self) -> Self::Output {
        // Smith's algorithm, scaling by the larger part of the divisor
        if rhs.re.abs() >= rhs.im.abs() {
            let ratio = rhs.im / rhs.re;
            let den = rhs.re + ratio * rhs.im;
            Cplx::new(
                (self.re + self.im * ratio) / den,
                (self.im - self.re * ratio) / den,
            )
        } else {
            let ratio = rhs.re / rhs.im;
            let den = rhs.im + ratio * rhs.re;
            Cplx::new(
                (self.re * ratio + self.im) / den,
                (self.im * ratio - self.re) / den,
            )
        }
    }
}

impl std::ops::Neg for Cplx {
    type Output = Cplx;
    fn neg(self) -> Self::Output {
        Cplx::new(-self.re, -self.im)
    }
}

impl Display for Cplx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.im.is_sign_negative() && !self.im.is_nan() {
            "-"
        } else {
            "+"
        };
        write!(
            f,
            "{}{}{}i",
            format_double(self.re),
            sign,
            format_double(self.im.abs())
        )
    }
}

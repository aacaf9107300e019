use std::fmt;

/// A numerator/denominator pair exactly as it was decoded from a rational tag.
///
/// The pair is never reduced, so `10/1000` stays `10/1000` when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

impl Fraction {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.denominator != 0
    }

    pub fn to_f64(&self) -> Option<f64> {
        self.is_valid()
            .then(|| self.numerator as f64 / self.denominator as f64)
    }

    /// The integer value when the denominator divides the numerator exactly.
    pub fn exact_integer(&self) -> Option<i64> {
        if self.is_valid() && self.numerator % self.denominator == 0 {
            Some(self.numerator / self.denominator)
        } else {
            None
        }
    }
}

impl From<&exif::Rational> for Fraction {
    fn from(value: &exif::Rational) -> Self {
        Self::new(i64::from(value.num), i64::from(value.denom))
    }
}

impl From<&exif::SRational> for Fraction {
    fn from(value: &exif::SRational) -> Self {
        Self::new(i64::from(value.num), i64::from(value.denom))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    /// Two fractional digits.
    Decimal,
    /// Decimal whose precision grows as the value shrinks below 0.1.
    ExposureDecimal,
    /// `num/den`, or the bare numerator when the denominator is 1.
    Fraction,
}

const DEFAULT_PRECISION: usize = 2;

fn exposure_precision(value: f64) -> usize {
    if value < 0.001 {
        5
    } else if value < 0.01 {
        4
    } else if value < 0.1 {
        3
    } else {
        DEFAULT_PRECISION
    }
}

/// Renders a decoded fraction for display.
///
/// A zero denominator never fails: it renders as `<prefix><num>/0 (Invalid)`.
pub fn format_fraction(fraction: Fraction, rendering: Rendering, prefix: &str) -> String {
    let Some(value) = fraction.to_f64() else {
        return format!("{}{}/0 (Invalid)", prefix, fraction.numerator);
    };

    match rendering {
        Rendering::Decimal => format!("{}{:.*}", prefix, DEFAULT_PRECISION, value),
        Rendering::ExposureDecimal => {
            format!("{}{:.*}", prefix, exposure_precision(value), value)
        }
        Rendering::Fraction if fraction.denominator == 1 => {
            format!("{}{}", prefix, fraction.numerator)
        }
        Rendering::Fraction => format!("{}{}", prefix, fraction),
    }
}

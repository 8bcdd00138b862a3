use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ChartError, ChartResult};

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "\u{b5}", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];
const DEFAULT_PRECISION: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberKind {
    /// Shortest representation, or `precision` significant digits.
    General,
    Fixed,
    Integer,
    Si,
    Percent,
}

/// Numeric formatter for the pattern grammar `[$][,][.precision][~][type]`.
///
/// Types: none, `f` fixed, `d` integer, `s` SI prefix, `%` percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    currency: bool,
    grouping: bool,
    precision: Option<usize>,
    trim: bool,
    kind: NumberKind,
}

impl NumberFormat {
    pub fn parse(pattern: &str) -> ChartResult<Self> {
        let invalid = || ChartError::Configuration(format!("invalid number format `{pattern}`"));

        let mut rest = pattern;
        let currency = strip(&mut rest, '$');
        let grouping = strip(&mut rest, ',');
        let precision = if strip(&mut rest, '.') {
            let digits = rest.chars().take_while(char::is_ascii_digit).count();
            if digits == 0 {
                return Err(invalid());
            }
            let parsed = rest[..digits].parse::<usize>().map_err(|_| invalid())?;
            rest = &rest[digits..];
            Some(parsed)
        } else {
            None
        };
        let trim = strip(&mut rest, '~');
        let kind = match rest {
            "" => NumberKind::General,
            "f" => NumberKind::Fixed,
            "d" => NumberKind::Integer,
            "s" => NumberKind::Si,
            "%" => NumberKind::Percent,
            _ => return Err(invalid()),
        };

        Ok(Self {
            currency,
            grouping,
            precision,
            trim,
            kind,
        })
    }

    #[must_use]
    pub fn format(self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let precision = self.precision.unwrap_or(DEFAULT_PRECISION);
        let magnitude = value.abs();
        let (mut body, suffix) = match self.kind {
            NumberKind::General => match self.precision {
                Some(digits) => (significant(magnitude, digits.max(1)), ""),
                None => (format!("{magnitude}"), ""),
            },
            NumberKind::Fixed => (fixed(magnitude, precision), ""),
            NumberKind::Integer => (fixed(magnitude, 0), ""),
            NumberKind::Percent => (fixed(magnitude * 100.0, precision), "%"),
            NumberKind::Si => si(magnitude, precision.max(1)),
        };

        if self.trim || (self.kind == NumberKind::General && self.precision.is_some()) {
            body = trim_zeros(body);
        }
        if self.grouping {
            body = group_thousands(&body);
        }

        let negative = value < 0.0 && body.chars().any(|c| matches!(c, '1'..='9'));
        let sign = if negative { "-" } else { "" };
        let currency = if self.currency { "$" } else { "" };
        format!("{sign}{currency}{body}{suffix}")
    }
}

fn strip(rest: &mut &str, prefix: char) -> bool {
    match rest.strip_prefix(prefix) {
        Some(stripped) => {
            *rest = stripped;
            true
        }
        None => false,
    }
}

/// Rounds half away from zero to `digits` decimals, formatted with exactly that many.
fn fixed(value: f64, digits: usize) -> String {
    match Decimal::from_f64(value) {
        Some(decimal) => {
            let rounded = decimal
                .round_dp_with_strategy(digits as u32, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.digits$}")
        }
        None => format!("{value:.digits$}"),
    }
}

/// Decimal exponent of `value`, corrected for `log10` rounding at powers of ten.
fn exponent(value: f64) -> i32 {
    if value == 0.0 {
        return 0;
    }
    let mut exp = value.log10().floor() as i32;
    if 10f64.powi(exp + 1) <= value {
        exp += 1;
    } else if 10f64.powi(exp) > value {
        exp -= 1;
    }
    exp
}

fn round_significant(value: f64, digits: usize) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    let scale = digits as i32 - 1 - exponent(value);
    if scale >= 0 {
        let factor = 10f64.powi(scale);
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-scale);
        (value / factor).round() * factor
    }
}

fn significant(value: f64, digits: usize) -> String {
    let rounded = round_significant(value, digits);
    let decimals = (digits as i32 - 1 - exponent(rounded)).max(0) as usize;
    fixed(rounded, decimals)
}

fn si(value: f64, digits: usize) -> (String, &'static str) {
    let rounded = round_significant(value, digits);
    let exp = exponent(rounded);
    let group = exp.div_euclid(3).clamp(-8, 8);
    let scaled = rounded / 10f64.powi(group * 3);
    let decimals = (digits as i32 - 1 - (exp - group * 3)).max(0) as usize;
    (fixed(scaled, decimals), SI_PREFIXES[(group + 8) as usize])
}

fn trim_zeros(body: String) -> String {
    if !body.contains('.') {
        return body;
    }
    body.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn group_thousands(body: &str) -> String {
    let (integer, fraction) = match body.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (body, None),
    };

    let mut grouped = String::with_capacity(body.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

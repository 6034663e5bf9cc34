// crates/shared/src/toolbelts/calculator.rs

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::register_toolbelt;

#[derive(Default)]
pub struct Calculator;

register_toolbelt! {
    Calculator {
        tools: {
            "basic_calculator" => basic_calculator {
                doc: "Perform a numeric operation on two numbers. \
                      Input: a JSON object (or JSON text) with keys 'num1', 'num2' and 'operation', \
                      for example {\"num1\": 5, \"num2\": 3, \"operation\": \"add\"}. \
                      Operations: add/plus, subtract/minus, multiply/times, divide, floor_divide, \
                      modulus, power, and the comparisons lt, le, eq, ne, ge, gt. \
                      Returns: the formatted result of the operation.",
            }
        }
    }
}

impl Calculator {
    fn basic_calculator(&self, input: &Value) -> String {
        calculate(input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    FloorDivide,
    Modulus,
    Power,
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,
}

/// Accepted keywords, in the order they are listed back to the user.
pub const OPERATIONS: &[(&str, Operation)] = &[
    ("add", Operation::Add),
    ("plus", Operation::Add),
    ("subtract", Operation::Subtract),
    ("minus", Operation::Subtract),
    ("multiply", Operation::Multiply),
    ("times", Operation::Multiply),
    ("divide", Operation::Divide),
    ("floor_divide", Operation::FloorDivide),
    ("modulus", Operation::Modulus),
    ("power", Operation::Power),
    ("lt", Operation::Lt),
    ("le", Operation::Le),
    ("eq", Operation::Eq),
    ("ne", Operation::Ne),
    ("ge", Operation::Ge),
    ("gt", Operation::Gt),
];

fn supported_keywords() -> String {
    OPERATIONS
        .iter()
        .map(|(keyword, _)| *keyword)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything the calculator can answer with other than a result.
///
/// The `Display` text is exactly what the tool returns to the caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("Invalid input format. Please provide valid numbers and operation.")]
    InvalidFormat,
    #[error("Error: Input must contain 'num1', 'num2', and 'operation'")]
    MissingFields,
    #[error("Error: Please provide valid numerical values.")]
    NotNumeric,
    #[error("Unsupported operation: '{0}'. Supported operations are: {list}", list = supported_keywords())]
    UnsupportedOperation(String),
    #[error("Error: Division by zero is not allowed")]
    DivisionByZero,
    #[error("Error during calculation: {0}")]
    Calculation(#[from] ArithmeticFault),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticFault {
    #[error("0.0 cannot be raised to a negative power")]
    ZeroToNegativePower,
    #[error("(34, 'Numerical result out of range')")]
    OutOfRange,
    #[error("complex exponentiation")]
    ComplexOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Number(f64),
    Truth(bool),
    /// Principal value of a negative base raised to a fractional power.
    Complex { re: f64, im: f64 },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Truth(true) => f.write_str("True"),
            Outcome::Truth(false) => f.write_str("False"),
            Outcome::Number(value) => f.write_str(&format_number(*value)),
            Outcome::Complex { re, im } => f.write_str(&format_complex(*re, *im)),
        }
    }
}

/// Shortest round-trip text for a float component: positional for decimal
/// exponents in `-4..16`, otherwise scientific with a signed two-digit
/// exponent (`1e+16`, `1.5e-05`).
fn repr_component(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if value == 0.0 || (-4..16).contains(&exponent) {
        value.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}

/// `(re+imj)`, or just `imj` when the real part is positive zero.
pub fn format_complex(re: f64, im: f64) -> String {
    let imaginary = repr_component(im);
    if re == 0.0 && re.is_sign_positive() {
        return format!("{imaginary}j");
    }
    let sign = if imaginary.starts_with('-') { "" } else { "+" };
    format!("({}{sign}{imaginary}j)", repr_component(re))
}

/// Six decimal places with trailing zeros and a dangling point removed.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    format!("{value:.6}")
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorRequest {
    pub num1: f64,
    pub num2: f64,
    /// Lowercased, not yet checked against [`OPERATIONS`].
    pub operation: String,
}

impl CalculatorRequest {
    pub fn from_value(value: &Value) -> Result<Self, CalculatorError> {
        let Some(fields) = value.as_object() else {
            return Err(CalculatorError::MissingFields);
        };
        let (Some(num1), Some(num2), Some(operation)) = (
            fields.get("num1"),
            fields.get("num2"),
            fields.get("operation"),
        ) else {
            return Err(CalculatorError::MissingFields);
        };

        let num1 = coerce_number(num1).ok_or(CalculatorError::NotNumeric)?;
        let num2 = coerce_number(num2).ok_or(CalculatorError::NotNumeric)?;
        let operation = operation
            .as_str()
            .ok_or(CalculatorError::InvalidFormat)?
            .to_lowercase();

        Ok(Self {
            num1,
            num2,
            operation,
        })
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Turns the raw tool input into a JSON value.
///
/// Objects pass straight through. Text is first parsed as-is; anything short
/// of an object (a parse failure, or a quoted string literal) goes through
/// [`repair_json_text`]. When the repair doesn't parse either, a strict
/// non-object result is kept so validation can report the missing fields.
pub fn decode_input(input: &Value) -> Result<Cow<'_, Value>, CalculatorError> {
    let text = match input {
        Value::Object(_) => return Ok(Cow::Borrowed(input)),
        Value::String(text) => text,
        _ => return Err(CalculatorError::InvalidFormat),
    };

    let strict = serde_json::from_str::<Value>(text.trim()).ok();
    if let Some(value @ Value::Object(_)) = strict {
        return Ok(Cow::Owned(value));
    }

    let repaired = repair_json_text(text);
    debug!(input = %text, repaired = %repaired, "Calculator input is not a JSON object, repairing");
    serde_json::from_str::<Value>(&repaired)
        .ok()
        .or(strict)
        .map(Cow::Owned)
        .ok_or(CalculatorError::InvalidFormat)
}

/// Permissive clean-up for JSON-like text: single quotes become double
/// quotes, then surrounding whitespace and one enclosing quote on each end
/// are removed.
pub fn repair_json_text(text: &str) -> String {
    let swapped = text.replace('\'', "\"");
    let trimmed = swapped.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}

impl Operation {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        OPERATIONS
            .iter()
            .find(|(candidate, _)| *candidate == keyword)
            .map(|(_, operation)| *operation)
    }

    fn rejects_zero_divisor(self) -> bool {
        matches!(
            self,
            Operation::Divide | Operation::FloorDivide | Operation::Modulus
        )
    }

    pub fn apply(self, a: f64, b: f64) -> Result<Outcome, ArithmeticFault> {
        let value = match self {
            Operation::Power => return power(a, b),
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide => a / b,
            Operation::FloorDivide => floored_div_mod(a, b).0,
            Operation::Modulus => floored_div_mod(a, b).1,
            Operation::Lt => return Ok(Outcome::Truth(a < b)),
            Operation::Le => return Ok(Outcome::Truth(a <= b)),
            Operation::Eq => return Ok(Outcome::Truth(a == b)),
            Operation::Ne => return Ok(Outcome::Truth(a != b)),
            Operation::Ge => return Ok(Outcome::Truth(a >= b)),
            Operation::Gt => return Ok(Outcome::Truth(a > b)),
        };
        Ok(Outcome::Number(value))
    }
}

/// Quotient rounded toward negative infinity, remainder carrying the
/// divisor's sign.
fn floored_div_mod(a: f64, b: f64) -> (f64, f64) {
    let mut remainder = a % b;
    let mut quotient = (a - remainder) / b;

    if remainder != 0.0 {
        if (b < 0.0) != (remainder < 0.0) {
            remainder += b;
            quotient -= 1.0;
        }
    } else {
        remainder = 0.0_f64.copysign(b);
    }

    let floored = if quotient != 0.0 {
        let mut floored = quotient.floor();
        if quotient - floored > 0.5 {
            floored += 1.0;
        }
        floored
    } else {
        0.0_f64.copysign(a / b)
    };

    (floored, remainder)
}

/// Real power, switching to the principal complex root when a negative base
/// meets a fractional exponent.
fn power(base: f64, exponent: f64) -> Result<Outcome, ArithmeticFault> {
    if base == 0.0 && exponent < 0.0 {
        return Err(ArithmeticFault::ZeroToNegativePower);
    }
    let finite = base.is_finite() && exponent.is_finite();

    if finite && base < 0.0 && exponent.fract() != 0.0 {
        // Polar form: |base|^exponent at angle pi * exponent.
        let magnitude = (-base).powf(exponent);
        if magnitude.is_infinite() {
            return Err(ArithmeticFault::ComplexOutOfRange);
        }
        let phase = std::f64::consts::PI * exponent;
        return Ok(Outcome::Complex {
            re: magnitude * phase.cos(),
            im: magnitude * phase.sin(),
        });
    }

    let value = base.powf(exponent);
    if finite && value.is_infinite() {
        return Err(ArithmeticFault::OutOfRange);
    }
    Ok(Outcome::Number(value))
}

/// Decodes, validates and runs one calculator request.
pub fn evaluate(input: &Value) -> Result<Outcome, CalculatorError> {
    let decoded = decode_input(input)?;
    let request = CalculatorRequest::from_value(&decoded)?;

    let operation = Operation::from_keyword(&request.operation)
        .ok_or_else(|| CalculatorError::UnsupportedOperation(request.operation.clone()))?;

    if operation.rejects_zero_divisor() && request.num2 == 0.0 {
        return Err(CalculatorError::DivisionByZero);
    }

    Ok(operation.apply(request.num1, request.num2)?)
}

pub fn calculate(input: &Value) -> String {
    match evaluate(input) {
        Ok(outcome) => format!("The answer is: {outcome}"),
        Err(err) => err.to_string(),
    }
}

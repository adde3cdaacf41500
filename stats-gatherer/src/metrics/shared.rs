use serde::Serialize;
use std::fmt;

/// A single metric value as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Counters, byte figures and 0/1 flags.
    Integer(u64),
    /// Percentages and fractional CPU allocations.
    Decimal(f64),
}

impl MetricValue {
    pub fn flag(value: bool) -> Self {
        MetricValue::Integer(u64::from(value))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Integer(value) => write!(f, "{value}"),
            MetricValue::Decimal(value) => write!(f, "{value}"),
        }
    }
}

/// `100 * part / total`, or 0 when there is no total to relate to.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        100.0 * part / total
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(MetricValue::Integer(42).to_string(), "42");
        assert_eq!(MetricValue::flag(true).to_string(), "1");
        assert_eq!(MetricValue::flag(false).to_string(), "0");
        assert_eq!(MetricValue::Decimal(25.5).to_string(), "25.5");
        assert_eq!(MetricValue::Decimal(0.0).to_string(), "0");
    }

    #[test]
    fn serializes_as_plain_numbers() {
        assert_eq!(serde_json::to_string(&MetricValue::Integer(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&MetricValue::Decimal(12.5)).unwrap(), "12.5");
    }

    #[test]
    fn percentage_guards_zero_total() {
        assert_eq!(percentage(250.0, 1000.0), 25.0);
        assert_eq!(percentage(250.0, 0.0), 0.0);
        assert_eq!(percentage(0.0, 0.0), 0.0);
    }
}

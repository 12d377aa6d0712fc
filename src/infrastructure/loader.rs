//! Text-format instance loader.
//!
//! The format is line-oriented, whitespace-delimited integers:
//! line 1 `N H delta`, line 2 the N customer demands, line 3 the H facility
//! opening costs, line 4 the H facility capacities, followed by N lines of H
//! customer-to-facility distances.

use crate::domain::models::{FlpInstance, InstanceError};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read instance file: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error(transparent)]
    Instance(#[from] InstanceError),
}

/// Load and parse an instance file.
pub fn load_instance(path: impl AsRef<Path>) -> Result<FlpInstance, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_instance(&text)
}

/// Parse an instance from its textual form.
pub fn parse_instance(text: &str) -> Result<FlpInstance, LoadError> {
    let lines: Vec<&str> = text.lines().collect();

    let header = int_line(&lines, 0, "N H delta header")?;
    if header.len() != 3 {
        return Err(malformed(0, format!("expected 3 header values, found {}", header.len())));
    }
    let n = size_value(header[0], 0, "customer count")?;
    let h = size_value(header[1], 0, "facility count")?;
    let delta = header[2];

    let demands = exact_int_line(&lines, 1, n, "demand")?;
    let opening_costs = exact_int_line(&lines, 2, h, "opening cost")?;
    let capacities = exact_int_line(&lines, 3, h, "capacity")?;

    let mut distances = Vec::with_capacity(n);
    for i in 0..n {
        distances.push(exact_int_line(&lines, 4 + i, h, "distance")?);
    }

    // Anything beyond the declared N distance rows is a malformed file,
    // not data to silently absorb.
    if let Some(extra) = lines[(4 + n).min(lines.len())..]
        .iter()
        .position(|l| !l.trim().is_empty())
    {
        return Err(malformed(4 + n + extra, "unexpected trailing content".to_string()));
    }

    Ok(FlpInstance::new(n, h, demands, opening_costs, capacities, distances, delta)?)
}

fn malformed(index: usize, message: String) -> LoadError {
    // 1-based line numbers in messages
    LoadError::Malformed {
        line: index + 1,
        message,
    }
}

fn size_value(value: i64, index: usize, what: &str) -> Result<usize, LoadError> {
    usize::try_from(value).map_err(|_| malformed(index, format!("{} must be non-negative", what)))
}

fn int_line(lines: &[&str], index: usize, what: &str) -> Result<Vec<i64>, LoadError> {
    let line = lines
        .get(index)
        .ok_or_else(|| malformed(index, format!("missing {} line", what)))?;
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| malformed(index, format!("invalid integer '{}'", token)))
        })
        .collect()
}

fn exact_int_line(
    lines: &[&str],
    index: usize,
    expected: usize,
    what: &str,
) -> Result<Vec<i64>, LoadError> {
    let values = int_line(lines, index, what)?;
    if values.len() != expected {
        return Err(malformed(
            index,
            format!("expected {} {} values, found {}", expected, what, values.len()),
        ));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "2 2 1\n1 1\n5 5\n2 2\n1 10\n10 1\n";

    #[test]
    fn test_parse_well_formed_instance() {
        let inst = parse_instance(GOOD).unwrap();
        assert_eq!(inst.customers(), 2);
        assert_eq!(inst.facilities(), 2);
        assert_eq!(inst.delta(), 1);
        assert_eq!(inst.demand(1), 1);
        assert_eq!(inst.opening_cost(0), 5);
        assert_eq!(inst.capacity(1), 2);
        assert_eq!(inst.distance(1, 0), 10);
    }

    #[test]
    fn test_trailing_blank_lines_are_tolerated() {
        let text = format!("{}\n  \n", GOOD);
        assert!(parse_instance(&text).is_ok());
    }

    #[test]
    fn test_short_file_is_rejected() {
        let err = parse_instance("2 2 0\n1 1\n5 5\n").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 4, .. }));
    }

    #[test]
    fn test_bad_token_is_rejected() {
        let err = parse_instance("2 two 0\n1 1\n5 5\n2 2\n1 10\n10 1\n").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_wrong_demand_count_is_rejected() {
        let err = parse_instance("2 2 0\n1\n5 5\n2 2\n1 10\n10 1\n").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_short_distance_row_is_rejected() {
        let err = parse_instance("2 2 0\n1 1\n5 5\n2 2\n1 10\n10\n").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 6, .. }));
    }

    #[test]
    fn test_extra_distance_row_is_rejected() {
        let err = parse_instance("1 2 0\n1\n5 5\n2 2\n1 10\n10 1\n").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 6, .. }));
    }

    #[test]
    fn test_negative_value_surfaces_instance_error() {
        let err = parse_instance("2 2 0\n1 -1\n5 5\n2 2\n1 10\n10 1\n").unwrap_err();
        assert!(matches!(err, LoadError::Instance(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_instance("/nonexistent/instance.flp").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}

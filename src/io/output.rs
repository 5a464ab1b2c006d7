//! Solution rendering and side-file persistence.

use std::{fmt, fs, path::Path};

use crate::models::Solution;

use super::loader::{parse_token, ParseTokenError};

/// A saved solution could not be read back.
#[derive(Debug)]
pub enum SolutionFileError {
    /// The file could not be read.
    Io(std::io::Error),
    /// A warehouse index is not a non-negative integer.
    Parse(ParseTokenError),
    /// The file holds fewer indices than the instance has customers.
    Length {
        /// Number of customers in the instance.
        expected: usize,
        /// Number of indices found.
        found: usize,
    },
}

impl fmt::Display for SolutionFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::Length { expected, found } => write!(
                f,
                "solution holds {found} assignments, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for SolutionFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Length { .. } => None,
        }
    }
}

impl From<std::io::Error> for SolutionFileError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for SolutionFileError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

/// Renders the warehouse index of every customer, then the cost with five
/// decimals, on one space-separated line.
///
/// # Examples
///
/// ```
/// use u_facility::io::format_solution;
/// use u_facility::models::Solution;
///
/// assert_eq!(format_solution(&Solution::new(vec![0, 1]), 28.0), "0 1 28.00000");
/// ```
pub fn format_solution(solution: &Solution, cost: f64) -> String {
    let mut line = String::new();
    for w in solution.assignments() {
        line.push_str(&w.to_string());
        line.push(' ');
    }
    line.push_str(&format!("{cost:.5}"));
    line
}

/// Writes [`format_solution`] output, newline-terminated, to `path`.
pub fn save_solution<P: AsRef<Path>>(
    path: P,
    solution: &Solution,
    cost: f64,
) -> Result<(), std::io::Error> {
    let path = path.as_ref();
    fs::write(path, format_solution(solution, cost) + "\n")?;
    tracing::debug!("saved solution (cost {cost:.5}) to {}", path.display());
    Ok(())
}

/// Reads the first `num_customers` warehouse indices from `text`.
///
/// Anything after them, such as the cost written by [`save_solution`], is
/// ignored. Index bounds are checked later by the strategy that uses the
/// solution.
pub fn parse_solution(text: &str, num_customers: usize) -> Result<Solution, SolutionFileError> {
    let assignments = text
        .split_whitespace()
        .take(num_customers)
        .map(parse_token::<usize>)
        .collect::<Result<Vec<_>, _>>()?;

    if assignments.len() != num_customers {
        return Err(SolutionFileError::Length {
            expected: num_customers,
            found: assignments.len(),
        });
    }
    Ok(Solution::new(assignments))
}

/// Reads a solution previously written by [`save_solution`].
pub fn load_solution<P: AsRef<Path>>(
    path: P,
    num_customers: usize,
) -> Result<Solution, SolutionFileError> {
    let text = fs::read_to_string(path)?;
    parse_solution(&text, num_customers)
}

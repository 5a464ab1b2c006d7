//! Instance loader for the plain-text facility location format.
//!
//! The loader reads line by line. The header line holds the warehouse and
//! customer counts. One line per warehouse follows, then one record per
//! customer: a line whose first token is the demand (ignored in the
//! uncapacitated variant), followed by assignment costs that may wrap over
//! any number of lines. Text after `#` is a comment and blank lines are
//! skipped.
//!
//! Cost lines are accumulated until the record holds exactly one cost per
//! warehouse. A line holding a single bare integer, seen while a record is
//! still incomplete, is taken to start the next customer, so a short cost
//! row is reported instead of silently borrowing the next record's demand.

use std::{
    fmt::{self, Display},
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

use crate::error::InstanceError;
use crate::models::{CapacityMode, Customer, Instance, Warehouse};

/// The error type for instance loading.
#[derive(Debug)]
pub enum InstanceLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input ended before every declared record was read.
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// The header declares zero warehouses or zero customers.
    InvalidDimensions,
    /// A header or warehouse line has the wrong number of fields.
    FieldCount {
        /// 1-based line number.
        line: usize,
        /// Fields required by the configured record shape.
        expected: usize,
        /// Fields present on the line.
        found: usize,
    },
    /// A customer record does not hold one cost per warehouse.
    CostCount {
        /// Index of the offending customer.
        customer: usize,
        /// Number of warehouses.
        expected: usize,
        /// Number of costs read before the record ended.
        found: usize,
    },
    /// Non-comment content follows the last declared customer.
    TrailingContent {
        /// 1-based line number of the first extra line.
        line: usize,
    },
    /// The parsed records do not form a valid instance.
    Instance(InstanceError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "f64").
    pub type_name: &'static str,
}

impl Display for ParseTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not parse token '{}' as type {}",
            self.token, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

impl Display for InstanceLoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "unexpected end of file while parsing instance"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::InvalidDimensions => write!(
                f,
                "warehouse and customer counts must be positive integers"
            ),
            Self::FieldCount {
                line,
                expected,
                found,
            } => write!(f, "line {line}: expected {expected} fields, found {found}"),
            Self::CostCount {
                customer,
                expected,
                found,
            } => write!(
                f,
                "customer {customer}: expected {expected} assignment costs, found {found}"
            ),
            Self::TrailingContent { line } => {
                write!(f, "line {line}: unexpected content after the last customer")
            }
            Self::Instance(e) => write!(f, "invalid instance: {e}"),
        }
    }
}

impl std::error::Error for InstanceLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Instance(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InstanceLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for InstanceLoaderError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<InstanceError> for InstanceLoaderError {
    fn from(e: InstanceError) -> Self {
        Self::Instance(e)
    }
}

/// Layout of one warehouse line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarehouseRecord {
    /// `<fixedCost>`
    #[default]
    FixedCostOnly,
    /// `<capacity> <fixedCost>`
    CapacityThenCost,
    /// `<fixedCost> <capacity>`
    CostThenCapacity,
}

impl WarehouseRecord {
    fn fields(self) -> usize {
        match self {
            Self::FixedCostOnly => 1,
            Self::CapacityThenCost | Self::CostThenCapacity => 2,
        }
    }
}

/// A configurable loader for facility location instances.
///
/// The format this parser expects is as follows:
///
/// ```raw
/// M N                      // number of warehouses, number of customers
/// <warehouse record>       // M lines, shape set by `WarehouseRecord`
/// d_1                      // demand of customer 1 (or any integer)
/// c_1_1 ... c_1_M          // costs, possibly wrapped over several lines
/// ...
/// d_N
/// c_N_1 ... c_N_M
/// ```
///
/// # Configuration
/// * `mode`: in [`CapacityMode::Uncapacitated`] the capacity field of a
///   warehouse record and the demand token are read but never parsed.
/// * `record`: which warehouse line layout the benchmark family uses.
///
/// # Examples
///
/// ```
/// use u_facility::io::InstanceLoader;
///
/// let text = "2 2\n10\n15\n0\n1 5\n0\n8 2\n";
/// let instance = InstanceLoader::new().from_str(text).unwrap();
/// assert_eq!(instance.num_warehouses(), 2);
/// assert_eq!(instance.customers()[1].costs(), &[8.0, 2.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstanceLoader {
    mode: CapacityMode,
    record: WarehouseRecord,
}

impl InstanceLoader {
    /// Creates an uncapacitated loader expecting `<fixedCost>` lines.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether capacities and demands are read and enforced.
    #[inline]
    pub fn with_mode(mut self, mode: CapacityMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the warehouse line layout.
    #[inline]
    pub fn with_record(mut self, record: WarehouseRecord) -> Self {
        self.record = record;
        self
    }

    /// Loads an instance from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Instance, InstanceLoaderError> {
        let mut lines = LineReader::new(rdr);

        // Dimensions
        let header = lines.expect_line()?;
        header.expect_fields(2)?;
        let m: usize = parse_token(&header.tokens[0])?;
        let n: usize = parse_token(&header.tokens[1])?;
        if m == 0 || n == 0 {
            return Err(InstanceLoaderError::InvalidDimensions);
        }

        let mut warehouses = Vec::with_capacity(m);
        for _ in 0..m {
            let line = lines.expect_line()?;
            warehouses.push(self.warehouse(&line)?);
        }

        let mut customers = Vec::with_capacity(n);
        for customer in 0..n {
            customers.push(self.customer(&mut lines, customer, m)?);
        }

        if let Some(extra) = lines.next_line()? {
            return Err(InstanceLoaderError::TrailingContent { line: extra.number });
        }

        tracing::debug!("loaded instance: {m} warehouses, {n} customers, {:?}", self.mode);

        let instance = Instance::new(warehouses, customers)?;
        Ok(instance.with_mode(self.mode))
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Instance, InstanceLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Instance, InstanceLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Instance, InstanceLoaderError> {
        self.from_reader(s.as_bytes())
    }

    fn warehouse(&self, line: &Line) -> Result<Warehouse, InstanceLoaderError> {
        line.expect_fields(self.record.fields())?;
        let (fixed, capacity) = match self.record {
            WarehouseRecord::FixedCostOnly => (&line.tokens[0], None),
            WarehouseRecord::CapacityThenCost => (&line.tokens[1], Some(&line.tokens[0])),
            WarehouseRecord::CostThenCapacity => (&line.tokens[0], Some(&line.tokens[1])),
        };

        let warehouse = Warehouse::new(parse_token(fixed)?);
        match (self.mode, capacity) {
            (CapacityMode::Capacitated, Some(token)) => {
                Ok(warehouse.with_capacity(parse_token(token)?))
            }
            _ => Ok(warehouse),
        }
    }

    fn customer<R: BufRead>(
        &self,
        lines: &mut LineReader<R>,
        customer: usize,
        m: usize,
    ) -> Result<Customer, InstanceLoaderError> {
        let head = lines.expect_line()?;
        let demand = match self.mode {
            CapacityMode::Capacitated => parse_token(&head.tokens[0])?,
            CapacityMode::Uncapacitated => 0.0,
        };

        let mut costs: Vec<f64> = Vec::with_capacity(m);
        for token in &head.tokens[1..] {
            costs.push(parse_token(token)?);
        }

        while costs.len() < m {
            let starts_next_record = match lines.peek()? {
                Some(line) => !costs.is_empty() && line.is_bare_integer(),
                None => return Err(InstanceLoaderError::UnexpectedEof),
            };
            if starts_next_record {
                return Err(InstanceLoaderError::CostCount {
                    customer,
                    expected: m,
                    found: costs.len(),
                });
            }
            let line = lines.expect_line()?;
            for token in &line.tokens {
                costs.push(parse_token(token)?);
            }
        }

        if costs.len() != m {
            return Err(InstanceLoaderError::CostCount {
                customer,
                expected: m,
                found: costs.len(),
            });
        }

        Ok(Customer::new(costs).with_demand(demand))
    }
}

/// Parses one token, reporting the token text and target type on failure.
pub(crate) fn parse_token<T: FromStr>(token: &str) -> Result<T, ParseTokenError> {
    token.parse().map_err(|_| ParseTokenError {
        token: token.to_owned(),
        type_name: std::any::type_name::<T>(),
    })
}

/// A non-empty line, stripped of comments and split into tokens.
struct Line {
    number: usize,
    tokens: Vec<String>,
}

impl Line {
    fn expect_fields(&self, expected: usize) -> Result<(), InstanceLoaderError> {
        if self.tokens.len() == expected {
            Ok(())
        } else {
            Err(InstanceLoaderError::FieldCount {
                line: self.number,
                expected,
                found: self.tokens.len(),
            })
        }
    }

    fn is_bare_integer(&self) -> bool {
        self.tokens.len() == 1 && self.tokens[0].parse::<u64>().is_ok()
    }
}

/// Yields the non-empty lines of a reader, with one line of lookahead.
struct LineReader<R> {
    rdr: R,
    buf: String,
    number: usize,
    peeked: Option<Line>,
}

impl<R: BufRead> LineReader<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            number: 0,
            peeked: None,
        }
    }

    fn read_line(&mut self) -> Result<Option<Line>, InstanceLoaderError> {
        loop {
            self.buf.clear();
            if self.rdr.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.number += 1;

            let content = match self.buf.find('#') {
                Some(i) => &self.buf[..i],
                None => &self.buf[..],
            };
            let tokens: Vec<String> = content.split_whitespace().map(str::to_owned).collect();
            if !tokens.is_empty() {
                return Ok(Some(Line {
                    number: self.number,
                    tokens,
                }));
            }
        }
    }

    fn peek(&mut self) -> Result<Option<&Line>, InstanceLoaderError> {
        if self.peeked.is_none() {
            self.peeked = self.read_line()?;
        }
        Ok(self.peeked.as_ref())
    }

    fn next_line(&mut self) -> Result<Option<Line>, InstanceLoaderError> {
        match self.peeked.take() {
            Some(line) => Ok(Some(line)),
            None => self.read_line(),
        }
    }

    fn expect_line(&mut self) -> Result<Line, InstanceLoaderError> {
        self.next_line()?.ok_or(InstanceLoaderError::UnexpectedEof)
    }
}

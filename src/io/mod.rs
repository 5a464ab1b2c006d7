//! Text formats at the edges of the library.
//!
//! - [`InstanceLoader`]: parses the whitespace-delimited instance format
//!   (both warehouse record shapes, both capacitated field orders)
//! - [`format_solution`]: the one-line rendering of a solution and its cost
//! - [`save_solution`] / [`load_solution`]: side files that let one
//!   strategy's result seed another run
//!
//! Nothing here is used inside a search loop.

mod loader;
mod output;

pub use loader::{InstanceLoader, InstanceLoaderError, ParseTokenError, WarehouseRecord};
pub use output::{
    format_solution, load_solution, parse_solution, save_solution, SolutionFileError,
};

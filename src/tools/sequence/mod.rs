//! Code Sequencer


pub mod types;

pub use types::*;

use crate::error::Result;

/// Parse `start` and build the range of `count` codes beginning there.
///
/// # Examples
/// ```
/// use skuprobe::tools::sequence::code_range;
///
/// let range = code_range("ab00100", 2, 5).unwrap();
/// let codes: Vec<String> = range.iter().map(|c| c.to_string()).collect();
/// assert_eq!(codes, ["ab00100", "ab00101"]);
/// ```
pub fn code_range(start: &str, count: u64, width: usize) -> Result<CodeRange> {
    let start = ProductCode::parse(start, width)?;
    Ok(CodeRange::new(start, count))
}

use crate::error::*;
use std::fmt;

/// A catalog product code: a free-form prefix followed by a zero-padded
/// numeric suffix of fixed width.
///
/// Numbers that outgrow the width render with the extra digits
/// (`ab99999` + 1 is `ab100000`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductCode {
    prefix: String,
    number: u64,
    width: usize,
}

impl ProductCode {
    pub fn new(prefix: impl Into<String>, number: u64, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            number,
            width,
        }
    }

    /// Split `raw` into prefix and the trailing `width` digits.
    ///
    /// The code must be strictly longer than `width` and its last `width`
    /// characters must all be ASCII digits.
    pub fn parse(raw: &str, width: usize) -> Result<Self> {
        if raw.len() <= width {
            return Err(ProbeError::CodeTooShort {
                code: raw.to_string(),
                min: width.saturating_add(1),
                width,
            });
        }
        let split = raw.len() - width;
        if !raw.is_char_boundary(split) {
            return Err(ProbeError::NonNumericSuffix(raw.to_string()));
        }
        let (prefix, digits) = raw.split_at(split);
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ProbeError::NonNumericSuffix(raw.to_string()));
        }
        let number = digits
            .parse::<u64>()
            .map_err(|_| ProbeError::NonNumericSuffix(raw.to_string()))?;
        Ok(Self::new(prefix, number, width))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The code `n` steps after this one, same prefix and width.
    pub fn offset(&self, n: u64) -> Self {
        Self {
            prefix: self.prefix.clone(),
            number: self.number.saturating_add(n),
            width: self.width,
        }
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:0width$}", self.prefix, self.number, width = self.width)
    }
}

/// `count` consecutive codes starting at `start`.
///
/// Iterating borrows the range, so the same range can be walked again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRange {
    start: ProductCode,
    count: u64,
}

impl CodeRange {
    pub fn new(start: ProductCode, count: u64) -> Self {
        Self { start, count }
    }

    pub fn start(&self) -> &ProductCode {
        &self.start
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Last code of the range, `None` when the range is empty.
    pub fn last(&self) -> Option<ProductCode> {
        self.count.checked_sub(1).map(|n| self.start.offset(n))
    }

    pub fn iter(&self) -> CodeIter<'_> {
        CodeIter {
            start: &self.start,
            next: 0,
            count: self.count,
        }
    }
}

impl<'a> IntoIterator for &'a CodeRange {
    type Item = ProductCode;
    type IntoIter = CodeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct CodeIter<'a> {
    start: &'a ProductCode,
    next: u64,
    count: u64,
}

impl Iterator for CodeIter<'_> {
    type Item = ProductCode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let code = self.start.offset(self.next);
        self.next += 1;
        Some(code)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.count - self.next).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

impl ExactSizeIterator for CodeIter<'_> {}

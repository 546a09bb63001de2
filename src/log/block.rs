//! Locating the delimited block that encloses a given line.
//!
//! A block looks like:
//!
//! ```text
//! +++ SCP-1        2016-03-08 10:15:05
//!     Measurements for SA_SPAMEAS table
//!     ...data rows...
//! +--  END
//! ```

use crate::Result;
use crate::log::row::SENTINEL_REPORT_TIME;
use anyhow::bail;
use regex::Regex;
use tracing::warn;

const BEGIN_DELIMITER: &str = "+++";

// Both `+--` and `++-` occur as end delimiters in the dumps.
const END_DELIMITER_RE: &str = r"\+[+-]-";

const REPORT_TIME_RE: &str = r"([0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2})";

/// Line indexes of a block's delimiters plus the time it reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpan {
    pub start: usize,
    pub end: usize,
    pub report_time: String,
}

impl BlockSpan {
    /// Indexes of the lines strictly between the delimiters.
    pub fn body(&self) -> std::ops::Range<usize> {
        self.start + 1..self.end
    }
}

pub struct BlockScanner {
    end_re: Regex,
    time_re: Regex,
}

impl BlockScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            end_re: Regex::new(END_DELIMITER_RE)?,
            time_re: Regex::new(REPORT_TIME_RE)?,
        })
    }

    /// Find the block enclosing `index`: the nearest begin delimiter at or above
    /// it and the nearest end delimiter at or below it.
    ///
    /// Running off either end of `lines` is fatal. A begin line without a
    /// timestamp is not; the sentinel time is used instead.
    pub fn locate_block(&self, lines: &[&str], index: usize) -> Result<BlockSpan> {
        let Some(header) = lines.get(index) else {
            bail!(
                "block lookup at line {} is past the end of the log ({} lines)",
                index + 1,
                lines.len()
            );
        };

        let Some(start) = (0..=index).rev().find(|&i| lines[i].contains(BEGIN_DELIMITER)) else {
            bail!(
                "no begin delimiter {:?} above block header at line {}: {:?}",
                BEGIN_DELIMITER,
                index + 1,
                header
            );
        };

        let Some(end) = (index..lines.len()).find(|&i| self.end_re.is_match(lines[i])) else {
            bail!(
                "no end delimiter below block header at line {}: {:?}",
                index + 1,
                header
            );
        };

        let report_time = match self.time_re.captures(lines[start]) {
            Some(caps) => caps[1].to_string(),
            None => {
                warn!(
                    line = start + 1,
                    "failed to get report time of the block, using {}", SENTINEL_REPORT_TIME
                );
                SENTINEL_REPORT_TIME.to_string()
            }
        };

        Ok(BlockSpan {
            start,
            end,
            report_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &[&str] = &[
        "noise before",
        "+++ SCP-1        2016-03-08 10:15:05",
        "    Measurements for SA_SPAMEAS table",
        "60 EPAYSPA 300 0",
        "+--  END",
        "noise after",
    ];

    #[test]
    fn locates_enclosing_delimiters() {
        let scanner = BlockScanner::new().unwrap();
        let span = scanner.locate_block(SAMPLE, 2).unwrap();
        assert_eq!(
            span,
            BlockSpan {
                start: 1,
                end: 4,
                report_time: "2016-03-08 10:15".to_string(),
            }
        );
        assert!(span.start < 2 && 2 < span.end);
        assert_eq!(span.body(), 2..4);
    }

    #[test]
    fn any_inner_line_finds_the_same_block() {
        let scanner = BlockScanner::new().unwrap();
        let a = scanner.locate_block(SAMPLE, 2).unwrap();
        let b = scanner.locate_block(SAMPLE, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn accepts_double_plus_end_delimiter() {
        let lines = ["+++ X 2016-03-08 10:30", "header", "++-"];
        let span = BlockScanner::new().unwrap().locate_block(&lines, 1).unwrap();
        assert_eq!(span.end, 2);
    }

    #[test]
    fn missing_timestamp_falls_back_to_sentinel() {
        let lines = ["+++ no time here", "header", "+--"];
        let span = BlockScanner::new().unwrap().locate_block(&lines, 1).unwrap();
        assert_eq!(span.report_time, SENTINEL_REPORT_TIME);
    }

    #[test]
    fn missing_begin_delimiter_is_fatal() {
        let lines = ["header", "row", "+--"];
        let err = BlockScanner::new().unwrap().locate_block(&lines, 0).unwrap_err();
        assert!(err.to_string().contains("line 1"), "{err}");
        assert!(err.to_string().contains("header"), "{err}");
    }

    #[test]
    fn missing_end_delimiter_is_fatal() {
        let lines = ["+++ 2016-03-08 10:15", "header", "row"];
        let err = BlockScanner::new().unwrap().locate_block(&lines, 1).unwrap_err();
        assert!(err.to_string().contains("no end delimiter"), "{err}");
    }
}

//! Line coverage encoding.

use srcline_report::{LineCoverage, RecordCursor};

use super::{LineReader, Lookahead, line_number};
use crate::error::Result;
use crate::line::SourceLine;

/// Copies unit and integration test coverage onto lines and derives the
/// overall measures.
pub struct CoverageLineReader<C: RecordCursor<Record = LineCoverage>> {
    coverage: Lookahead<C>,
}

impl<C: RecordCursor<Record = LineCoverage>> CoverageLineReader<C> {
    /// Create a reader over coverage records sorted by line.
    pub fn new(coverage: C) -> Self {
        Self {
            coverage: Lookahead::new(coverage, "coverage"),
        }
    }
}

impl<C: RecordCursor<Record = LineCoverage>> LineReader for CoverageLineReader<C> {
    fn read(&mut self, line: u32, _line_length: u32, out: &mut SourceLine) -> Result<()> {
        let records = self
            .coverage
            .take_line(line, |record| line_number(record.line))?;
        // One record per line; a duplicate overrides the previous one.
        if let Some(record) = records.last() {
            apply(record, out);
        }
        Ok(())
    }
}

fn apply(record: &LineCoverage, out: &mut SourceLine) {
    out.ut_line_hits = record.ut_hits.map(i32::from);
    out.ut_conditions = record.ut_conditions;
    out.ut_covered_conditions = record.ut_covered_conditions;
    out.it_line_hits = record.it_hits.map(i32::from);
    out.it_conditions = record.it_conditions;
    out.it_covered_conditions = record.it_covered_conditions;

    out.overall_line_hits = match (record.ut_hits, record.it_hits) {
        (None, None) => None,
        (ut, it) => Some(i32::from(ut.unwrap_or(false) || it.unwrap_or(false))),
    };
    out.overall_conditions = match (record.ut_conditions, record.it_conditions) {
        (Some(ut), Some(it)) => Some(ut.max(it)),
        (ut, it) => ut.or(it),
    };
    out.overall_covered_conditions = if record.has_integration_tests() {
        record.it_covered_conditions
    } else {
        record.ut_covered_conditions
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use srcline_report::MemoryCursor;

    #[test]
    fn test_unit_tests_only() {
        let mut reader = CoverageLineReader::new(MemoryCursor::new(vec![
            LineCoverage::for_line(2).with_unit_tests(true, 4, 3),
        ]));

        let mut first = SourceLine::new(1);
        reader.read(1, 10, &mut first).unwrap();
        assert!(!first.has_coverage());

        let mut second = SourceLine::new(2);
        reader.read(2, 10, &mut second).unwrap();
        assert_eq!(second.ut_line_hits, Some(1));
        assert_eq!(second.ut_conditions, Some(4));
        assert_eq!(second.ut_covered_conditions, Some(3));
        assert_eq!(second.it_line_hits, None);
        assert_eq!(second.overall_line_hits, Some(1));
        assert_eq!(second.overall_conditions, Some(4));
        assert_eq!(second.overall_covered_conditions, Some(3));
    }

    #[test]
    fn test_overall_merges_both_test_kinds() {
        let mut reader = CoverageLineReader::new(MemoryCursor::new(vec![
            LineCoverage::for_line(1)
                .with_unit_tests(false, 2, 0)
                .with_integration_tests(true, 6, 5),
        ]));

        let mut out = SourceLine::new(1);
        reader.read(1, 3, &mut out).unwrap();
        assert_eq!(out.ut_line_hits, Some(0));
        assert_eq!(out.it_line_hits, Some(1));
        assert_eq!(out.overall_line_hits, Some(1));
        assert_eq!(out.overall_conditions, Some(6));
        assert_eq!(out.overall_covered_conditions, Some(5));
    }

    #[test]
    fn test_uncovered_line() {
        let mut reader = CoverageLineReader::new(MemoryCursor::new(vec![
            LineCoverage::for_line(1).with_unit_tests(false, 0, 0),
        ]));

        let mut out = SourceLine::new(1);
        reader.read(1, 3, &mut out).unwrap();
        assert_eq!(out.overall_line_hits, Some(0));
    }

    #[test]
    fn test_invalid_line_number() {
        let mut reader =
            CoverageLineReader::new(MemoryCursor::new(vec![LineCoverage::for_line(0)]));
        assert!(reader.read(1, 3, &mut SourceLine::new(1)).is_err());
    }
}

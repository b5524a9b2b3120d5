//! Duplicated block encoding.
//!
//! Duplication records are numbered after sorting them by origin position:
//! the k-th record marks its origin lines with `2k - 1` and the lines of
//! its duplicates within the project with `2k`.

use std::collections::BTreeSet;

use srcline_report::{Duplication, RecordCursor};
use tracing::debug;

use super::{LineReader, Pending, SortedRanges};
use crate::error::Result;
use crate::line::SourceLine;
use crate::range::required;

/// Lists the duplicated blocks covering each line.
pub struct DuplicationLineReader {
    blocks: SortedRanges<u32>,
    pending: Pending<u32>,
}

impl DuplicationLineReader {
    /// Read every duplication of the file.
    ///
    /// Duplicates located in a project other than `project_key` are ignored.
    pub fn new<C: RecordCursor<Record = Duplication>>(
        project_key: impl Into<String>,
        mut duplications: C,
    ) -> Result<Self> {
        let project_key = project_key.into();

        let mut decoded = Vec::new();
        for duplication in duplications.drain()? {
            let origin = required(duplication.origin_position.as_ref(), "duplication origin")?;
            let mut duplicates = Vec::with_capacity(duplication.duplicates.len());
            for duplicate in &duplication.duplicates {
                if let Some(other) = duplicate
                    .other_project_key
                    .as_deref()
                    .filter(|other| *other != project_key)
                {
                    debug!(
                        project = %project_key,
                        other_project = other,
                        "Ignoring duplicate located in another project"
                    );
                    continue;
                }
                duplicates.push(required(duplicate.range.as_ref(), "duplicate range")?);
            }
            decoded.push((origin, duplicates));
        }
        decoded.sort_by_key(|(origin, _)| (origin.start_line(), origin.line_span()));

        let duplication_count = decoded.len();
        let mut blocks = Vec::new();
        for (idx, (origin, duplicates)) in decoded.into_iter().enumerate() {
            let origin_id = 2 * idx as u32 + 1;
            blocks.push((origin, origin_id));
            blocks.extend(duplicates.into_iter().map(|range| (range, origin_id + 1)));
        }
        let blocks = SortedRanges::new(blocks, "duplication");
        debug!(
            duplications = duplication_count,
            blocks = blocks.len(),
            "Loaded duplications"
        );

        Ok(Self {
            blocks,
            pending: Pending::new(),
        })
    }
}

impl LineReader for DuplicationLineReader {
    fn read(&mut self, line: u32, _line_length: u32, out: &mut SourceLine) -> Result<()> {
        self.blocks.admit(line, &mut self.pending);

        let ids: BTreeSet<u32> = self.pending.covering(line).copied().collect();
        if !ids.is_empty() {
            out.duplications = ids.into_iter().collect();
        }

        self.pending.evict(line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use srcline_report::{Duplicate, MemoryCursor, TextRange};

    fn duplications(reader: &mut DuplicationLineReader, lines: u32) -> Vec<Vec<u32>> {
        (1..=lines)
            .map(|line| {
                let mut out = SourceLine::new(line);
                reader.read(line, 10, &mut out).unwrap();
                out.duplications
            })
            .collect()
    }

    #[test]
    fn test_ids_follow_origin_order() {
        let mut reader = DuplicationLineReader::new(
            "project",
            MemoryCursor::new(vec![
                Duplication::new(TextRange::new(1, 2, 0, 0))
                    .with_duplicate(TextRange::new(3, 4, 0, 0)),
                Duplication::new(TextRange::new(1, 1, 0, 0))
                    .with_duplicate(TextRange::new(4, 4, 0, 0)),
            ]),
        )
        .unwrap();

        assert_eq!(
            duplications(&mut reader, 4),
            vec![vec![1, 3], vec![3], vec![4], vec![2, 4]]
        );
    }

    #[test]
    fn test_cross_project_duplicates_are_ignored() {
        let mut reader = DuplicationLineReader::new(
            "project",
            MemoryCursor::new(vec![
                Duplication::new(TextRange::new(1, 1, 0, 0))
                    .with(Duplicate::cross_project("other", TextRange::new(2, 2, 0, 0)))
                    .with(Duplicate::cross_project("project", TextRange::new(3, 3, 0, 0))),
            ]),
        )
        .unwrap();

        assert_eq!(
            duplications(&mut reader, 3),
            vec![vec![1], vec![], vec![2]]
        );
    }
}

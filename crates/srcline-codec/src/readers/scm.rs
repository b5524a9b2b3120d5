//! SCM blame encoding.

use srcline_report::{Changeset, Changesets, RecordCursor};
use tracing::debug;

use super::LineReader;
use crate::error::{CodecError, Result};
use crate::line::SourceLine;

/// Copies the blame changeset of each line, and keeps track of the most
/// recent change among the lines read so far.
#[derive(Debug)]
pub struct ScmLineReader {
    changesets: Changesets,
    latest: Option<usize>,
    latest_with_revision: Option<usize>,
}

impl ScmLineReader {
    /// Create a reader over the blame of a file.
    pub fn new(changesets: Changesets) -> Self {
        debug!(
            changesets = changesets.changesets.len(),
            lines = changesets.changeset_index_by_line.len(),
            "Loaded changesets"
        );
        Self {
            changesets,
            latest: None,
            latest_with_revision: None,
        }
    }

    /// Read the blame from a cursor holding a single [`Changesets`] record.
    ///
    /// An empty cursor yields a reader without changesets.
    pub fn from_cursor<C: RecordCursor<Record = Changesets>>(mut cursor: C) -> Result<Self> {
        let changesets = if cursor.has_next()? {
            cursor.next_record()?
        } else {
            Changesets::default()
        };
        cursor.close();
        Ok(Self::new(changesets))
    }

    /// Most recent changeset among the lines read so far.
    ///
    /// When none of them is dated, this is the first changeset read.
    pub fn latest_change(&self) -> Option<&Changeset> {
        self.latest.map(|idx| &self.changesets.changesets[idx])
    }

    /// Same as [`latest_change`](Self::latest_change), restricted to
    /// changesets carrying a revision.
    pub fn latest_change_with_revision(&self) -> Option<&Changeset> {
        self.latest_with_revision
            .map(|idx| &self.changesets.changesets[idx])
    }

    fn changeset_index(&self, line: u32) -> Result<usize> {
        let slot = usize::try_from(line)
            .ok()
            .and_then(|line| line.checked_sub(1))
            .and_then(|slot| self.changesets.changeset_index_by_line.get(slot));
        slot.and_then(|idx| usize::try_from(*idx).ok())
            .filter(|idx| *idx < self.changesets.changesets.len())
            .ok_or(CodecError::MissingChangeset { line })
    }
}

/// Whether `candidate` replaces `current` as the latest change.
fn is_later(candidate: &Changeset, current: &Changeset) -> bool {
    match (candidate.date, current.date) {
        (Some(candidate), Some(current)) => candidate > current,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

impl LineReader for ScmLineReader {
    fn read(&mut self, line: u32, _line_length: u32, out: &mut SourceLine) -> Result<()> {
        let idx = self.changeset_index(line)?;
        let changeset = &self.changesets.changesets[idx];
        if changeset.is_empty() {
            return Err(CodecError::EmptyChangeset { line });
        }

        out.scm_author = changeset.non_empty_author().map(str::to_owned);
        out.scm_date = changeset.date;
        out.scm_revision = changeset.non_empty_revision().map(str::to_owned);

        let changesets = &self.changesets.changesets;
        if self
            .latest
            .is_none_or(|latest| is_later(changeset, &changesets[latest]))
        {
            self.latest = Some(idx);
        }
        if changeset.non_empty_revision().is_some()
            && self
                .latest_with_revision
                .is_none_or(|latest| is_later(changeset, &changesets[latest]))
        {
            self.latest_with_revision = Some(idx);
        }
        Ok(())
    }
}

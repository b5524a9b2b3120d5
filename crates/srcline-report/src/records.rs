//! Report record messages.
//!
//! Each per-component report stream is a sequence of length-delimited
//! protobuf messages of a single type. Lines are 1-indexed, offsets are
//! 0-indexed character positions within a line.

use chrono::{DateTime, Utc};

/// A line/offset interval inside one source file.
///
/// The interval may span several lines; `start_offset` is relative to
/// `start_line` and `end_offset` to `end_line`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct TextRange {
    #[prost(int32, tag = "1")]
    pub start_line: i32,
    #[prost(int32, tag = "2")]
    pub end_line: i32,
    #[prost(int32, tag = "3")]
    pub start_offset: i32,
    #[prost(int32, tag = "4")]
    pub end_offset: i32,
}

impl TextRange {
    /// Create a range from its lines and offsets.
    #[must_use]
    pub const fn new(start_line: i32, end_line: i32, start_offset: i32, end_offset: i32) -> Self {
        Self {
            start_line,
            end_line,
            start_offset,
            end_offset,
        }
    }
}

/// Syntax highlighting classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum HighlightingType {
    Unset = 0,
    Annotation = 1,
    Constant = 2,
    Comment = 3,
    CppDoc = 4,
    StructuredComment = 5,
    Keyword = 6,
    HighlightingString = 7,
    KeywordLight = 8,
    PreprocessDirective = 9,
}

/// One highlighted span.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SyntaxHighlightingRule {
    #[prost(message, optional, tag = "1")]
    pub range: Option<TextRange>,
    #[prost(enumeration = "HighlightingType", tag = "2")]
    pub kind: i32,
}

impl SyntaxHighlightingRule {
    /// Create a rule highlighting `range` as `kind`.
    #[must_use]
    pub fn new(range: TextRange, kind: HighlightingType) -> Self {
        Self {
            range: Some(range),
            kind: kind as i32,
        }
    }
}

/// A symbol declaration and the places it is referenced from.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Symbol {
    #[prost(message, optional, tag = "1")]
    pub declaration: Option<TextRange>,
    #[prost(message, repeated, tag = "2")]
    pub references: Vec<TextRange>,
}

impl Symbol {
    /// Create a symbol declared at `declaration` with no references yet.
    #[must_use]
    pub fn new(declaration: TextRange) -> Self {
        Self {
            declaration: Some(declaration),
            references: Vec::new(),
        }
    }

    /// Builder: add a reference.
    #[must_use]
    pub fn with_reference(mut self, reference: TextRange) -> Self {
        self.references.push(reference);
        self
    }
}

/// A duplicated block of code and the blocks it duplicates.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Duplication {
    #[prost(message, optional, tag = "1")]
    pub origin_position: Option<TextRange>,
    #[prost(message, repeated, tag = "2")]
    pub duplicates: Vec<Duplicate>,
}

impl Duplication {
    /// Create a duplication whose origin block is `origin`.
    #[must_use]
    pub fn new(origin: TextRange) -> Self {
        Self {
            origin_position: Some(origin),
            duplicates: Vec::new(),
        }
    }

    /// Builder: add a duplicate located in the current project.
    #[must_use]
    pub fn with_duplicate(mut self, range: TextRange) -> Self {
        self.duplicates.push(Duplicate::in_project(range));
        self
    }

    /// Builder: add an arbitrary duplicate.
    #[must_use]
    pub fn with(mut self, duplicate: Duplicate) -> Self {
        self.duplicates.push(duplicate);
        self
    }
}

/// One copy of a duplicated block.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Duplicate {
    /// Key of the project holding the copy, when it is not the analysed one.
    #[prost(string, optional, tag = "1")]
    pub other_project_key: Option<String>,
    #[prost(message, optional, tag = "2")]
    pub range: Option<TextRange>,
}

impl Duplicate {
    /// A duplicate within the analysed project.
    #[must_use]
    pub fn in_project(range: TextRange) -> Self {
        Self {
            other_project_key: None,
            range: Some(range),
        }
    }

    /// A duplicate located in another project.
    #[must_use]
    pub fn cross_project(project_key: impl Into<String>, range: TextRange) -> Self {
        Self {
            other_project_key: Some(project_key.into()),
            range: Some(range),
        }
    }
}

/// Test coverage of a single line.
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct LineCoverage {
    #[prost(int32, tag = "1")]
    pub line: i32,
    #[prost(bool, optional, tag = "2")]
    pub ut_hits: Option<bool>,
    #[prost(int32, optional, tag = "3")]
    pub ut_conditions: Option<i32>,
    #[prost(int32, optional, tag = "4")]
    pub ut_covered_conditions: Option<i32>,
    #[prost(bool, optional, tag = "5")]
    pub it_hits: Option<bool>,
    #[prost(int32, optional, tag = "6")]
    pub it_conditions: Option<i32>,
    #[prost(int32, optional, tag = "7")]
    pub it_covered_conditions: Option<i32>,
}

impl LineCoverage {
    /// Coverage record for `line` with no measures set.
    #[must_use]
    pub fn for_line(line: i32) -> Self {
        Self {
            line,
            ..Default::default()
        }
    }

    /// Builder: set unit test hit and branch counts.
    #[must_use]
    pub fn with_unit_tests(mut self, hit: bool, conditions: i32, covered: i32) -> Self {
        self.ut_hits = Some(hit);
        self.ut_conditions = Some(conditions);
        self.ut_covered_conditions = Some(covered);
        self
    }

    /// Builder: set integration test hit and branch counts.
    #[must_use]
    pub fn with_integration_tests(mut self, hit: bool, conditions: i32, covered: i32) -> Self {
        self.it_hits = Some(hit);
        self.it_conditions = Some(conditions);
        self.it_covered_conditions = Some(covered);
        self
    }

    /// Whether any integration test measure is present.
    #[must_use]
    pub fn has_integration_tests(&self) -> bool {
        self.it_hits.is_some() || self.it_conditions.is_some() || self.it_covered_conditions.is_some()
    }
}

/// Blame information of a whole file.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Changesets {
    #[prost(message, repeated, tag = "1")]
    pub changesets: Vec<Changeset>,
    /// Index into `changesets` for each line, the first entry being line 1.
    #[prost(int32, repeated, tag = "2")]
    pub changeset_index_by_line: Vec<i32>,
}

impl Changesets {
    /// Create blame data from changesets and the per-line index.
    #[must_use]
    pub fn new(changesets: Vec<Changeset>, changeset_index_by_line: Vec<i32>) -> Self {
        Self {
            changesets,
            changeset_index_by_line,
        }
    }
}

/// One SCM revision attributed to lines by blame.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Changeset {
    #[prost(string, optional, tag = "1")]
    pub revision: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub author: Option<String>,
    /// Commit date in milliseconds since the Unix epoch.
    #[prost(int64, optional, tag = "3")]
    pub date: Option<i64>,
}

impl Changeset {
    /// Builder: set the revision.
    #[must_use]
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    /// Builder: set the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Builder: set the date in epoch milliseconds.
    #[must_use]
    pub fn with_date(mut self, millis: i64) -> Self {
        self.date = Some(millis);
        self
    }

    /// Builder: set the date from a UTC timestamp.
    #[must_use]
    pub fn with_date_time(self, date: DateTime<Utc>) -> Self {
        self.with_date(date.timestamp_millis())
    }

    /// The commit date as a UTC timestamp, if set and representable.
    #[must_use]
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        self.date.and_then(DateTime::from_timestamp_millis)
    }

    /// The author, unless unset or blank.
    #[must_use]
    pub fn non_empty_author(&self) -> Option<&str> {
        self.author.as_deref().filter(|author| !author.is_empty())
    }

    /// The revision, unless unset or blank.
    #[must_use]
    pub fn non_empty_revision(&self) -> Option<&str> {
        self.revision.as_deref().filter(|revision| !revision.is_empty())
    }

    /// True when none of author, date or revision is set. Empty strings
    /// count as unset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.non_empty_author().is_none()
            && self.date.is_none()
            && self.non_empty_revision().is_none()
    }
}

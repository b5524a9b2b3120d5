//! Encoded per-line output.

use serde::{Deserialize, Serialize};

/// Everything the decoders know about one physical source line.
///
/// Every category field is independent and left unset when the category
/// has nothing to say about the line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLine {
    /// Line number (1-indexed).
    pub line: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ut_line_hits: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ut_conditions: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ut_covered_conditions: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub it_line_hits: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub it_conditions: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub it_covered_conditions: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_line_hits: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_conditions: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_covered_conditions: Option<i32>,

    /// Highlighting tokens, `start,end,code` joined by `;`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighting: Option<String>,

    /// Symbol tokens, `start,end,id` joined by `;`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbols: Option<String>,

    /// Ids of the duplicated blocks covering the line, ascending.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub duplications: Vec<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scm_author: Option<String>,
    /// Commit date in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scm_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scm_revision: Option<String>,
}

impl SourceLine {
    /// Empty output for `line`.
    #[must_use]
    pub fn new(line: u32) -> Self {
        Self {
            line,
            ..Default::default()
        }
    }

    /// Whether any coverage measure is set.
    #[must_use]
    pub fn has_coverage(&self) -> bool {
        self.ut_line_hits.is_some()
            || self.it_line_hits.is_some()
            || self.overall_line_hits.is_some()
            || self.overall_conditions.is_some()
            || self.overall_covered_conditions.is_some()
    }

    /// Whether any SCM field is set.
    #[must_use]
    pub fn has_scm(&self) -> bool {
        self.scm_author.is_some() || self.scm_date.is_some() || self.scm_revision.is_some()
    }
}

//! Differ Domain Service
//!
//! Line diff between the content on disk and the content about to be
//! committed, shown to the user before they confirm a write.

use similar::{ChangeTag, TextDiff};

/// A single line change in a diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub tag: DiffTag,
    /// Line number in the old version (if applicable)
    pub old_line: Option<usize>,
    /// Line number in the new version (if applicable)
    pub new_line: Option<usize>,
    /// Line text without its terminator
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    Delete,
    Insert,
    Equal,
}

impl From<ChangeTag> for DiffTag {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Delete => DiffTag::Delete,
            ChangeTag::Insert => DiffTag::Insert,
            ChangeTag::Equal => DiffTag::Equal,
        }
    }
}

/// Result of a diff operation
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    pub lines: Vec<DiffLine>,
    pub additions: usize,
    pub deletions: usize,
}

impl DiffResult {
    pub fn has_changes(&self) -> bool {
        self.additions > 0 || self.deletions > 0
    }

    /// Only insertions and deletions
    pub fn changed_lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.lines.iter().filter(|l| l.tag != DiffTag::Equal)
    }

    /// e.g. "+2, -1"
    pub fn summary(&self) -> String {
        format!("+{}, -{}", self.additions, self.deletions)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Differ;

impl Differ {
    pub fn new() -> Self {
        Self
    }

    pub fn diff(&self, old: &str, new: &str) -> DiffResult {
        let text_diff = TextDiff::from_lines(old, new);
        let mut result = DiffResult::default();

        for change in text_diff.iter_all_changes() {
            let tag = DiffTag::from(change.tag());
            match tag {
                DiffTag::Delete => result.deletions += 1,
                DiffTag::Insert => result.additions += 1,
                DiffTag::Equal => {}
            }
            result.lines.push(DiffLine {
                tag,
                old_line: change.old_index().map(|i| i + 1),
                new_line: change.new_index().map(|i| i + 1),
                content: change.value().trim_end_matches('\n').to_string(),
            });
        }

        result
    }

    /// Unified diff text with `context` lines around each hunk
    pub fn unified(&self, old: &str, new: &str, old_label: &str, new_label: &str, context: usize) -> String {
        TextDiff::from_lines(old, new)
            .unified_diff()
            .context_radius(context)
            .header(old_label, new_label)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_content_has_no_changes() {
        let result = Differ::new().diff("GRUB_TIMEOUT=5\n", "GRUB_TIMEOUT=5\n");
        assert!(!result.has_changes());
        assert_eq!(result.summary(), "+0, -0");
    }

    #[test]
    fn changed_value_is_one_delete_one_insert() {
        let result = Differ::new().diff(
            "GRUB_DEFAULT=0\nGRUB_TIMEOUT=5\n",
            "GRUB_DEFAULT=0\nGRUB_TIMEOUT=10\n",
        );
        assert_eq!(result.additions, 1);
        assert_eq!(result.deletions, 1);

        let deleted = result
            .changed_lines()
            .find(|l| l.tag == DiffTag::Delete)
            .unwrap();
        assert_eq!(deleted.old_line, Some(2));
        assert_eq!(deleted.content, "GRUB_TIMEOUT=5");
    }

    #[test]
    fn unified_diff_has_headers_and_hunk() {
        let text = Differ::new().unified(
            "GRUB_TIMEOUT=5\n",
            "GRUB_TIMEOUT=10\n",
            "/etc/default/grub",
            "pending",
            3,
        );
        assert!(text.starts_with("--- /etc/default/grub\n+++ pending\n"));
        assert!(text.contains("-GRUB_TIMEOUT=5\n"));
        assert!(text.contains("+GRUB_TIMEOUT=10\n"));
    }
}

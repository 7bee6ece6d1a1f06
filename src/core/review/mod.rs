//! # Review Module
//!
//! Key-driven state for walking through duplicate-sets and marking files
//! for deletion. The CLI renders it; nothing here touches the terminal or
//! the filesystem.

use crate::core::aggregator::DuplicateSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One user action on the review screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewCommand {
    /// Previous set (stays put on the first)
    Previous,
    /// Next set, or the confirmation screen after the last one
    Next,
    /// Highlight the member above, wrapping
    CursorUp,
    /// Highlight the member below, wrapping
    CursorDown,
    /// Toggle the highlighted member's mark, or confirm deletion
    Select,
    /// Leave the confirmation screen
    Back,
    /// Quit without deleting anything
    Quit,
}

/// What the caller should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Continue,
    /// Deletion confirmed; take [`ReviewSession::into_deletions`]
    Apply,
    /// User quit; nothing is deleted
    Abandon,
}

/// Review state over a non-empty list of sets
#[derive(Debug)]
pub struct ReviewSession {
    sets: Vec<DuplicateSet>,
    position: usize,
    confirming: bool,
    marked: Vec<PathBuf>,
}

impl ReviewSession {
    /// `None` when there is nothing to review
    pub fn new(sets: Vec<DuplicateSet>) -> Option<Self> {
        if sets.is_empty() {
            return None;
        }
        Some(Self {
            sets,
            position: 0,
            confirming: false,
            marked: Vec::new(),
        })
    }

    pub fn apply(&mut self, command: ReviewCommand) -> ReviewStatus {
        if command == ReviewCommand::Quit {
            return ReviewStatus::Abandon;
        }

        if self.confirming {
            match command {
                ReviewCommand::Select => return ReviewStatus::Apply,
                ReviewCommand::Back => self.confirming = false,
                _ => {}
            }
            return ReviewStatus::Continue;
        }

        match command {
            ReviewCommand::Previous => self.position = self.position.saturating_sub(1),
            ReviewCommand::Next => {
                if self.position + 1 < self.sets.len() {
                    self.position += 1;
                } else {
                    self.confirming = true;
                }
            }
            ReviewCommand::CursorUp => self.sets[self.position].select_previous(),
            ReviewCommand::CursorDown => self.sets[self.position].select_next(),
            ReviewCommand::Select => {
                let target = self.current().selected().to_path_buf();
                self.toggle(target);
            }
            ReviewCommand::Back | ReviewCommand::Quit => {}
        }

        ReviewStatus::Continue
    }

    fn toggle(&mut self, path: PathBuf) {
        if let Some(index) = self.marked.iter().position(|p| *p == path) {
            debug!(path = %path.display(), "unmarked");
            self.marked.remove(index);
        } else {
            debug!(path = %path.display(), "marked for deletion");
            self.marked.push(path);
        }
    }

    /// The set on screen
    pub fn current(&self) -> &DuplicateSet {
        &self.sets[self.position]
    }

    /// Zero-based index of the set on screen
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Always false; construction rejects an empty list
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    pub fn is_marked(&self, path: &Path) -> bool {
        self.marked.iter().any(|p| p == path)
    }

    pub fn marked(&self) -> &[PathBuf] {
        &self.marked
    }

    /// Marked paths in the order they were marked
    pub fn into_deletions(self) -> Vec<PathBuf> {
        self.marked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReviewCommand::*;

    fn session(sets: &[&[&str]]) -> ReviewSession {
        let sets = sets
            .iter()
            .map(|members| {
                DuplicateSet::from_paths(members.iter().map(PathBuf::from).collect()).unwrap()
            })
            .collect();
        ReviewSession::new(sets).unwrap()
    }

    fn run(session: &mut ReviewSession, commands: &[ReviewCommand]) -> ReviewStatus {
        let mut status = ReviewStatus::Continue;
        for command in commands {
            status = session.apply(*command);
        }
        status
    }

    #[test]
    fn empty_list_has_no_session() {
        assert!(ReviewSession::new(Vec::new()).is_none());
    }

    #[test]
    fn mark_both_then_unmark_one() {
        let mut review = session(&[&["/a.png", "/b.png"]]);

        run(&mut review, &[Select, CursorDown, Select, CursorUp, Select]);

        assert!(!review.is_marked(Path::new("/a.png")));
        assert_eq!(review.into_deletions(), vec![PathBuf::from("/b.png")]);
    }

    #[test]
    fn deletions_keep_marking_order() {
        let mut review = session(&[&["/a.png", "/b.png"], &["/c.png", "/d.png"]]);

        run(&mut review, &[Next, CursorDown, Select, Previous, CursorUp, Select]);

        assert_eq!(
            review.into_deletions(),
            vec![PathBuf::from("/d.png"), PathBuf::from("/b.png")]
        );
    }

    #[test]
    fn previous_stops_at_first_set() {
        let mut review = session(&[&["/a.png", "/b.png"], &["/c.png", "/d.png"]]);

        run(&mut review, &[Previous, Previous]);
        assert_eq!(review.position(), 0);

        run(&mut review, &[Next]);
        assert_eq!(review.current().canonical(), Path::new("/c.png"));
    }

    #[test]
    fn next_past_last_set_asks_for_confirmation() {
        let mut review = session(&[&["/a.png", "/b.png"]]);

        assert_eq!(review.apply(Next), ReviewStatus::Continue);
        assert!(review.is_confirming());
        assert_eq!(review.position(), 0);

        // Cursor and mark commands are inert on the confirmation screen
        run(&mut review, &[CursorDown, Previous]);
        assert!(review.is_confirming());
        assert_eq!(review.current().cursor(), 0);

        assert_eq!(review.apply(Select), ReviewStatus::Apply);
    }

    #[test]
    fn back_leaves_confirmation() {
        let mut review = session(&[&["/a.png", "/b.png"]]);

        run(&mut review, &[Next, Back]);
        assert!(!review.is_confirming());

        run(&mut review, &[CursorDown, Select]);
        assert_eq!(review.marked(), &[PathBuf::from("/b.png")]);
    }

    #[test]
    fn quit_abandons_from_anywhere() {
        let mut review = session(&[&["/a.png", "/b.png"]]);
        assert_eq!(run(&mut review, &[Select, Quit]), ReviewStatus::Abandon);

        let mut review = session(&[&["/a.png", "/b.png"]]);
        assert_eq!(run(&mut review, &[Next, Quit]), ReviewStatus::Abandon);
    }

    #[test]
    fn cursor_is_tracked_per_set() {
        let mut review = session(&[&["/a.png", "/b.png", "/c.png"], &["/d.png", "/e.png"]]);

        run(&mut review, &[CursorUp, Next, CursorDown, Previous]);

        assert_eq!(review.current().selected(), Path::new("/c.png"));
    }
}

//! Review screen: one duplicate-set per page with its sixel preview.

use console::{style, Key, Term};
use image_dedup::core::review::{ReviewCommand, ReviewSession, ReviewStatus};
use image_dedup::error::Result;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Drive the session from raw key presses.
///
/// Returns the paths to delete, or `None` when the user quit.
pub fn run(term: &Term, mut session: ReviewSession) -> Result<Option<Vec<PathBuf>>> {
    term.hide_cursor()?;
    let status = review_loop(term, &mut session);
    term.clear_screen()?;
    term.show_cursor()?;

    match status? {
        ReviewStatus::Apply => Ok(Some(session.into_deletions())),
        ReviewStatus::Abandon | ReviewStatus::Continue => Ok(None),
    }
}

fn review_loop(term: &Term, session: &mut ReviewSession) -> Result<ReviewStatus> {
    draw(term, session)?;

    loop {
        let key = match term.read_key() {
            Ok(key) => key,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(ReviewStatus::Abandon),
            Err(e) => return Err(e.into()),
        };

        let Some(command) = command_for(&key) else {
            continue;
        };

        match session.apply(command) {
            ReviewStatus::Continue => draw(term, session)?,
            finished => return Ok(finished),
        }
    }
}

/// Key bindings for the review screen
fn command_for(key: &Key) -> Option<ReviewCommand> {
    match key {
        Key::ArrowLeft => Some(ReviewCommand::Previous),
        Key::ArrowRight => Some(ReviewCommand::Next),
        Key::ArrowUp => Some(ReviewCommand::CursorUp),
        Key::ArrowDown => Some(ReviewCommand::CursorDown),
        Key::Enter => Some(ReviewCommand::Select),
        Key::Escape => Some(ReviewCommand::Back),
        Key::Char('q') | Key::Char('\u{4}') | Key::CtrlC => Some(ReviewCommand::Quit),
        _ => None,
    }
}

fn draw(term: &Term, session: &ReviewSession) -> Result<()> {
    term.clear_screen()?;

    if session.is_confirming() {
        term.write_line(&format!(
            "{} files marked for deletion",
            style(session.marked().len()).cyan()
        ))?;
        term.write_line("")?;
        term.write_line("press ENTER to perform actions")?;
        term.write_line(&style("ESC to go back, q to quit without deleting").dim().to_string())?;
        return Ok(());
    }

    let set = session.current();
    term.write_line(&format!(
        "{}",
        style(format!("{}/{}", session.position() + 1, session.len())).bold()
    ))?;
    term.write_line("")?;

    for (i, path) in set.paths().iter().enumerate() {
        let marker = if i == set.cursor() {
            style(">").cyan().bold().to_string()
        } else {
            " ".to_string()
        };
        let flag = if session.is_marked(path) {
            style(" [delete]").red().bold().to_string()
        } else {
            String::new()
        };
        term.write_line(&format!("{} {}{}", marker, display_path(path), flag))?;
    }

    term.write_line(
        &style("←/→ sets  ↑/↓ files  ENTER mark  q quit")
            .dim()
            .to_string(),
    )?;
    term.write_line("")?;

    if let Some(preview) = set.thumbnail() {
        let mut out = term;
        out.write_all(preview)?;
        out.flush()?;
    }

    Ok(())
}

/// Shorten paths under the home directory to `~/...`
pub fn display_path(path: &Path) -> String {
    dirs::home_dir()
        .and_then(|home| {
            path.strip_prefix(&home)
                .ok()
                .map(|rest| format!("~/{}", rest.display()))
        })
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_navigate_and_enter_selects() {
        assert_eq!(command_for(&Key::ArrowLeft), Some(ReviewCommand::Previous));
        assert_eq!(command_for(&Key::ArrowRight), Some(ReviewCommand::Next));
        assert_eq!(command_for(&Key::ArrowUp), Some(ReviewCommand::CursorUp));
        assert_eq!(command_for(&Key::ArrowDown), Some(ReviewCommand::CursorDown));
        assert_eq!(command_for(&Key::Enter), Some(ReviewCommand::Select));
        assert_eq!(command_for(&Key::Escape), Some(ReviewCommand::Back));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(command_for(&Key::Char('q')), Some(ReviewCommand::Quit));
        assert_eq!(command_for(&Key::CtrlC), Some(ReviewCommand::Quit));
        assert_eq!(command_for(&Key::Char('x')), None);
    }

    #[test]
    fn home_paths_are_shortened() {
        if let Some(home) = dirs::home_dir() {
            let path = home.join("Pictures").join("a.png");
            assert_eq!(
                display_path(&path),
                format!("~/{}", Path::new("Pictures").join("a.png").display())
            );
        }
        assert!(display_path(Path::new("/tmp/a.png")).ends_with("a.png"));
    }
}

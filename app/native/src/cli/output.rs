//! CLI output formatting utilities.
//!
//! User-facing messages go to stdout, errors to stderr. Diagnostics are
//! handled separately by `tracing`.

use colored::Colorize;

use crate::config::RunOptions;
use crate::dispatch::Action;
use crate::error::WkillError;
use crate::tree::LayoutNode;

/// Longest window label printed before it is truncated.
const MAX_LABEL_CHARS: usize = 80;

/// Prints the instructions shown while the picker is active.
pub fn print_prompt() {
    println!("Click on a window to kill it (ESC to cancel)...");
}

/// Builds the line announcing which window is about to be killed.
#[must_use]
pub fn target_line(node: &LayoutNode, options: &RunOptions) -> String {
    let dry_run = if options.is_dry_run() { "[DRY-RUN] " } else { "" };
    let nicely = if options.is_nice() { "Nicely k" } else { "K" };
    format!("{dry_run}{nicely}illing window: {}", truncate(node.label(), MAX_LABEL_CHARS))
}

/// Prints the matched window.
pub fn print_target(node: &LayoutNode, options: &RunOptions) {
    println!("{}", target_line(node, options).bold());
}

/// Prints the outcome of a dispatch. Only dry runs have something to say.
pub fn print_action(action: &Action) {
    if matches!(action, Action::Planned { .. }) {
        println!("{}", action.to_string().yellow());
    }
}

/// Prints a terminal error. Cancellation is informational, not an error.
pub fn print_error(err: &WkillError) {
    if err.is_cancellation() {
        println!("{err}");
    } else {
        eprintln!("{} {err}", "wkill:".red().bold());
    }
}

/// Truncates a string to a maximum number of characters, adding ellipsis if needed.
///
/// This function correctly handles multi-byte UTF-8 characters by counting
/// characters rather than bytes.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();

    if char_count <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        "…".to_string()
    } else {
        // Find the byte index of the (max_chars - 1)th character
        let truncate_at = s.char_indices().nth(max_chars - 1).map_or(s.len(), |(idx, _)| idx);
        format!("{}…", &s[..truncate_at])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Policy;
    use crate::tree::{ChildList, NodeKind, Rect};

    fn node(name: Option<&str>, app_id: Option<&str>) -> LayoutNode {
        LayoutNode {
            id: 1,
            name: name.map(str::to_string),
            app_id: app_id.map(str::to_string),
            kind: NodeKind::WindowContainer,
            rect: Rect::new(0, 0, 10, 10),
            visible: true,
            focused: false,
            pid: Some(1),
            parent: None,
            children: ChildList::new(),
            floating: ChildList::new(),
        }
    }

    #[test]
    fn test_target_line_force_kill() {
        let line = target_line(&node(Some("ed"), None), &RunOptions::default());
        assert_eq!(line, "Killing window: ed");
    }

    #[test]
    fn test_target_line_dry_run_nice() {
        let options = RunOptions {
            policy: Policy::DryRun { nice: true },
            ..RunOptions::default()
        };
        let line = target_line(&node(None, Some("firefox")), &options);
        assert_eq!(line, "[DRY-RUN] Nicely killing window: firefox");
    }

    #[test]
    fn test_target_line_truncates_long_titles() {
        let title = "x".repeat(200);
        let line = target_line(&node(Some(&title), None), &RunOptions::default());
        assert!(line.ends_with('…'));
        assert_eq!(line.chars().count(), "Killing window: ".len() + MAX_LABEL_CHARS);
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("hello world", 8), "hello w…");
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_min_length() {
        assert_eq!(truncate("hello", 1), "…");
    }

    #[test]
    fn test_truncate_multibyte_utf8() {
        let s = "notes.md — vim";
        assert_eq!(truncate(s, 10), "notes.md …");
        assert_eq!(truncate(s, 20), s);
    }
}

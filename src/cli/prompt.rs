//! Interactive acknowledgment prompt

use console::Term;

/// Wait for the user to press Enter before returning control.
///
/// Skipped when `skip` is set (`--yes`) or when stdout is not a terminal, so
/// CI runs and piped invocations never block. Prompt failures are ignored;
/// the pause is best-effort and never affects the exit code.
pub fn pause_for_acknowledgment(skip: bool) {
    if skip {
        return;
    }
    let term = Term::stdout();
    if !term.is_term() {
        return;
    }
    let _ = term.write_str("Press Enter to continue...");
    let _ = term.read_line();
}

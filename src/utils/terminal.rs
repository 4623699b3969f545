//! Terminal width detection.

use crate::config::FALLBACK_TERMINAL_WIDTH;

/// Returns the width of the controlling terminal in columns.
///
/// Falls back to `FALLBACK_TERMINAL_WIDTH` (with a warning) when there is no
/// terminal, e.g. when output is piped or under a test harness.
pub fn terminal_width() -> u16 {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => cols,
        Ok(_) => FALLBACK_TERMINAL_WIDTH,
        Err(e) => {
            log::warn!(
                "Could not get terminal width: {}, using {}",
                e,
                FALLBACK_TERMINAL_WIDTH
            );
            FALLBACK_TERMINAL_WIDTH
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_width_is_positive() {
        // Real width on a tty, fallback otherwise
        assert!(terminal_width() > 0);
    }
}

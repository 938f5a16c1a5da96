//! Front-end context handed to contextual players.

use anyhow::Result;

/// The front-end surface a contextual player may use during its turn.
///
/// The console front-end implements this over stdin/stdout; a human player
/// uses it to ask for a move.
pub trait View {
    /// Shows an informational message.
    fn print(&mut self, msg: &str);

    /// Shows an error or warning.
    fn alert(&mut self, msg: &str);

    /// Asks the user for a line of input.
    fn input(&mut self, label: &str) -> Result<String>;
}

//! Console command (ConCommand) implementation.
//!
//! A ConCommand is a named handler invoked with the rest of the line after
//! its name. The handler drives its own [`ArgTokenizer`] and returns an
//! integer status, non-zero meaning success.

use std::fmt;

use super::ArgTokenizer;

/// Type alias for command handler functions.
pub type CommandHandler = Box<dyn Fn(&mut ArgTokenizer<'_>) -> i32 + Send + Sync>;

/// A console command handler.
///
/// # Examples
///
/// ```
/// use bevy_console_args::core::{ArgTokenizer, ConCommand};
///
/// let sum = ConCommand::new(|args: &mut ArgTokenizer| {
///     args.map(bevy_console_args::core::parse_int).sum()
/// });
/// assert_eq!(sum.invoke("1 2 3"), 6);
/// ```
pub struct ConCommand {
    handler: CommandHandler,
}

impl ConCommand {
    /// Wrap a handler.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&mut ArgTokenizer<'_>) -> i32 + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
        }
    }

    /// Run the handler over a fresh tokenizer for `args`.
    pub fn invoke(&self, args: &str) -> i32 {
        let mut tokenizer = ArgTokenizer::new(args);
        (self.handler)(&mut tokenizer)
    }
}

impl fmt::Debug for ConCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConCommand").finish_non_exhaustive()
    }
}

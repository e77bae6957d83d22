//! Timed character-by-character text reveal.
//!
//! [`TypingMachine`] holds the pure state: which phrase is showing, how much of
//! it is visible and what happens next. It never touches a clock; each call to
//! [`TypingMachine::advance`] applies one transition and hands back the delay
//! before the next one.
//!
//! [`TypingSession`] owns a machine and drives it from a single tokio task,
//! publishing every visible change on a watch channel. Dropping the session
//! cancels the task.

mod machine;
pub mod presets;
mod session;

pub use machine::{Phase, TypingMachine, TypingOptions, TypingSnapshot};
pub use session::TypingSession;

// Console front end: prompting helpers and the interactive menu.

pub mod input;
pub mod shell;

pub use shell::Shell;

//! Typed wrapper around the `whiptail` terminal dialog utility.
//!
//! `whiptail` draws text-mode dialog boxes (message boxes, input fields,
//! yes/no confirmations, menus, radio lists, checklists) on the controlling
//! terminal. This crate shells out to it: each method builds the argument
//! list for one dialog kind, runs the program, captures the user's answer
//! from its stderr stream, and maps the exit code to a typed result.
//!
//! ```no_run
//! use whiptail::Whiptail;
//!
//! fn main() -> whiptail::Result<()> {
//!     let wt = Whiptail::new().title("Setup").size(20, 60);
//!     let name = wt.inputbox("What is your name?")?;
//!     if wt.yesno(&format!("Hello {}. Continue?", name))? {
//!         let tools = wt.checklist("Pick your tools", ["git", "vim", "tmux"])?;
//!         println!("selected: {:?}", tools);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! By default a cancelled dialog terminates the whole process with the
//! dialog's exit code, on the theory that abandoning an interactive
//! checkpoint abandons the program. Configure [`CancelPolicy::Propagate`]
//! to receive [`Error::Cancelled`] instead.

mod error;
mod item;
mod session;

pub use error::{Error, Result};
pub use item::ListItem;
pub use session::{CancelPolicy, DefaultButton, Whiptail};

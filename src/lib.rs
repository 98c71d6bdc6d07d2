//! A small in-memory inventory tracker with an interactive shell.
//!
//! The core is [`InventoryStore`], an insertion-ordered collection of
//! [`Product`] records keyed loosely by barcode. It supports adding, updating
//! and removing records, lookups by barcode, name and expiry date, the total
//! stock value (exact decimal arithmetic) and an expiring-soon report.
//!
//! Around it sits a line-oriented shell: [`Interpreter`] splits each input line
//! into words, resolves the command name through a list of command factories
//! and runs the matching built-in against its [`env::Environment`]. The public
//! modules [`command`] and [`env`] expose the traits and types needed to plug
//! in further commands.

mod builtin;
pub mod command;
pub mod env;
pub mod fields;
mod interpreter;
pub mod lexer;
pub mod logging;
pub mod product;
pub mod store;

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
pub use product::Product;
pub use store::InventoryStore;

//! Peripheral adapters (§6): debug printing is the only one in scope — the public accessor
//! surface and UI-toolkit bindings are out of scope (spec.md §1).

pub mod print;

pub use print::{print_tree, PrintOptions};

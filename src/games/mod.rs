//! Game implementations.
//!
//! This module contains games implementing the [`crate::search::Game`] trait.
//! They serve as:
//!
//! 1. **Validation**: small games with hand-checkable values verify the
//!    search engine and the learner.
//!
//! 2. **Examples**: demonstrate how to implement the `Game` trait for new
//!    games.
//!
//! ## Available Games
//!
//! - [`leduc`]: Leduc hold'em, the standard 6-card imperfect-information
//!   benchmark, with its heuristic evaluators
//!
//! ## Adding New Games
//!
//! 1. Create a new module under `src/games/`
//! 2. Define state and action types
//! 3. Implement the `Game` trait (and a `Heuristic` if it will be searched)
//! 4. Add tests that verify expected behavior
//!
//! See the [`leduc`] module for a complete example.

pub mod leduc;

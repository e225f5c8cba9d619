//! In-memory habit collaborator
//!
//! Stands in for the external habit store so the poll loop can run end to
//! end. The celebration pipeline only ever sees it through [`HabitSource`].

mod book;

pub use book::{HabitBook, HabitSource};

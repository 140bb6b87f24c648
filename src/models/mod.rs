pub mod entry;
pub mod lenient;
pub mod place;

pub use entry::{Entry, EntryInput};
pub use place::Place;

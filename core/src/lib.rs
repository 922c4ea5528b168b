//! Scripture annotation and taxonomy filtering.
//!
//! Everything here is pure over its inputs: the book registry and its filter
//! index, verse reference parsing, book-set resolution, interlinear alignment
//! and flat-file record scanning. Console and network access live in the
//! `study` and `esv_client` crates.

pub mod align;
pub mod declaration;
pub mod error;
pub mod filter;
pub mod files;
pub mod mapping;
pub mod records;
pub mod reference;
pub mod strongs;
pub mod taxonomy;
pub mod usage;

pub use align::{align, AlignedSegment, Interlinear};
pub use error::{Result, StudyError};
pub use filter::{resolve, Resolution};
pub use reference::{parse_reference, VerseReference};
pub use strongs::{Language, StrongsNumber};
pub use taxonomy::{Book, Category, FilterIndex, Registry, Testament};

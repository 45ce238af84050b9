//! Data models for HomeLib

pub mod book;
pub mod enums;

// Re-export commonly used types
pub use book::{Book, BookForm, BookFormView, BookList, DeleteConfirmation, FieldErrors};
pub use enums::{Genre, Language, SelectList};

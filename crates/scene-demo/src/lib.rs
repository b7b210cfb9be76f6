#![forbid(unsafe_code)]

//! Books-list demo: a scene that fetches an author's books from an
//! in-memory library and renders them as text.

pub mod books;
pub mod cli;

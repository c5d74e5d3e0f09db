//! Data models for MomentScape

mod note;

pub use note::{InvalidNote, Note, NoteDraft, NoteId, NoteRecord};

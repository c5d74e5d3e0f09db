use crate::models::{Note, NoteDraft, NoteId};

/// Draft form state: composing a new note, or editing an existing one.
///
/// `epoch` changes whenever the session switches target or is reset, so a
/// request issued under an older epoch can tell it has been superseded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditSession {
    target: Option<NoteId>,
    title: String,
    body: String,
    epoch: u64,
}

impl EditSession {
    /// The note being edited, or `None` while composing a new note.
    pub const fn target(&self) -> Option<&NoteId> {
        self.target.as_ref()
    }

    pub fn is_editing(&self, id: &NoteId) -> bool {
        self.target.as_ref() == Some(id)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn draft(&self) -> NoteDraft {
        NoteDraft::new(self.title.clone(), self.body.clone())
    }

    /// Composing, with both drafts empty.
    pub fn is_empty(&self) -> bool {
        self.target.is_none() && self.title.is_empty() && self.body.is_empty()
    }

    pub(crate) const fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn begin(&mut self, note: &Note) {
        self.target = Some(note.id.clone());
        self.title.clone_from(&note.title);
        self.body.clone_from(&note.body);
        self.epoch += 1;
    }

    pub(crate) fn reset(&mut self) {
        self.target = None;
        self.title.clear();
        self.body.clear();
        self.epoch += 1;
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(crate) fn set_body(&mut self, body: String) {
        self.body = body;
    }
}

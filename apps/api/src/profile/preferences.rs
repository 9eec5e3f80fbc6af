//! User preferences: theme flag, bookmarked job ids, per-job notes.
//! Every mutation schedules a debounced write of the affected key.

use std::collections::BTreeMap;

use crate::persist::debounce::PersistHandle;
use crate::persist::{KEY_BOOKMARKS, KEY_NOTES, KEY_THEME};

pub struct Preferences {
    dark_mode: bool,
    /// Insertion-ordered; membership is what matters.
    bookmarks: Vec<u64>,
    /// Sparse: absent key means "no note". Blank notes are never stored.
    notes: BTreeMap<u64, String>,
    persist: PersistHandle,
}

impl Preferences {
    pub fn new(
        dark_mode: bool,
        bookmarks: Vec<u64>,
        notes: BTreeMap<u64, String>,
        persist: PersistHandle,
    ) -> Self {
        Self {
            dark_mode,
            bookmarks,
            notes,
            persist,
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.dark_mode = dark;
        self.persist.write_json(KEY_THEME, &self.dark_mode);
    }

    pub fn bookmarks(&self) -> &[u64] {
        &self.bookmarks
    }

    pub fn is_bookmarked(&self, job_id: u64) -> bool {
        self.bookmarks.contains(&job_id)
    }

    /// Flips membership; returns whether the job is bookmarked afterwards.
    pub fn toggle_bookmark(&mut self, job_id: u64) -> bool {
        let bookmarked = match self.bookmarks.iter().position(|&id| id == job_id) {
            Some(index) => {
                self.bookmarks.remove(index);
                false
            }
            None => {
                self.bookmarks.push(job_id);
                true
            }
        };
        self.persist.write_json(KEY_BOOKMARKS, &self.bookmarks);
        bookmarked
    }

    pub fn clear_bookmarks(&mut self) {
        self.bookmarks.clear();
        self.persist.write_json(KEY_BOOKMARKS, &self.bookmarks);
    }

    pub fn notes(&self) -> &BTreeMap<u64, String> {
        &self.notes
    }

    pub fn note(&self, job_id: u64) -> Option<&str> {
        self.notes.get(&job_id).map(|n| n.as_str())
    }

    /// Stores a note for the job; a blank note removes the entry, keeping
    /// the map sparse.
    pub fn set_note(&mut self, job_id: u64, note: &str) {
        if note.trim().is_empty() {
            self.notes.remove(&job_id);
        } else {
            self.notes.insert(job_id, note.to_string());
        }
        self.persist.write_json(KEY_NOTES, &self.notes);
    }

    pub fn clear_notes(&mut self) {
        self.notes.clear();
        self.persist.write_json(KEY_NOTES, &self.notes);
    }
}

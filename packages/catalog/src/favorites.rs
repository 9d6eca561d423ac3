//! The user's favorited dog ids.
//!
//! Membership is unique and insertion order is kept, so the match request and
//! the favorites bar see ids in the order the user picked them. Ids are taken
//! on trust from the caller.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns whether `id` is now a favorite.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|f| f == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|f| f == id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Favorited ids in insertion order.
    pub fn members(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

use crate::domain::model::PrintableItem;
use std::collections::HashSet;

/// Which catalog entries are chosen for export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    /// Flips one id; returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn select_all(&mut self, items: &[PrintableItem]) {
        self.ids.extend(items.iter().map(|item| item.id.clone()));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Keeps the selected items in catalog order.
    pub fn apply(&self, items: Vec<PrintableItem>) -> Vec<PrintableItem> {
        let chosen: Vec<PrintableItem> = items
            .into_iter()
            .filter(|item| self.ids.contains(&item.id))
            .collect();

        if chosen.len() < self.ids.len() {
            let found: HashSet<&str> = chosen.iter().map(|item| item.id.as_str()).collect();
            let mut missing: Vec<&str> = self
                .ids
                .iter()
                .map(String::as_str)
                .filter(|id| !found.contains(id))
                .collect();
            missing.sort_unstable();
            tracing::warn!("Selected ids not in catalog: {}", missing.join(", "));
        }

        chosen
    }
}

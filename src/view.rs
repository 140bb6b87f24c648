use std::cmp::Ordering;

use crate::models::Entry;

/// Sort keys offered by the log view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    Rating,
    Sweetness,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// Filter and sort settings owned by the view controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub key: SortKey,
    pub dir: SortDir,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            dir: SortDir::Desc,
        }
    }
}

impl ViewSettings {
    /// Re-selecting the active key toggles direction; switching to a new
    /// key resets to descending.
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.dir = match self.dir {
                SortDir::Asc => SortDir::Desc,
                SortDir::Desc => SortDir::Asc,
            };
        } else {
            self.key = key;
            self.dir = SortDir::Desc;
        }
    }
}

/// The filtered, sorted projection of the entry collection used by both
/// the list and the map. Pure: identical inputs produce identical
/// ordering, and entries comparing equal keep their input order.
pub fn derived_view<'a>(
    entries: &'a [Entry],
    filter_text: &str,
    settings: ViewSettings,
) -> Vec<&'a Entry> {
    let needle = filter_text.trim().to_lowercase();

    let mut view: Vec<&Entry> = entries
        .iter()
        .filter(|entry| {
            needle.is_empty()
                || entry
                    .added_by
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(&needle)
        })
        .collect();

    // sort_by is stable, and reversing the comparator (rather than the
    // result) keeps ties in input order for both directions
    view.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, settings.key);
        match settings.dir {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    });

    view
}

/// Missing values compare as the minimum for the key: before every
/// present value ascending, after every present value descending.
fn compare_by_key(a: &Entry, b: &Entry, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::Rating => a.rating.cmp(&b.rating),
        SortKey::Sweetness => a.sweetness.cmp(&b.sweetness),
        SortKey::Price => cmp_opt_f64(a.price, b.price),
    }
}

fn cmp_opt_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.total_cmp(&b),
    }
}

use crate::domain::model::PrintableItem;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::io::Write;

/// Items sharing a normalized name, oldest first.
///
/// Only built by [`find_duplicate_sets`], so a set always has at least two members.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateSet {
    pub key: String,
    members: Vec<PrintableItem>,
}

impl DuplicateSet {
    pub fn members(&self) -> &[PrintableItem] {
        &self.members
    }

    /// The earliest-created member. Never selected for deletion.
    pub fn original(&self) -> Option<&PrintableItem> {
        self.members.first()
    }

    pub fn duplicates(&self) -> &[PrintableItem] {
        self.members.get(1..).unwrap_or_default()
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Groups the full catalog by trimmed, case-insensitive name.
///
/// Only groups with more than one member are returned, in order of first
/// appearance. Members are stably sorted by `created_at`; undated members
/// go after dated ones.
pub fn find_duplicate_sets(items: &[PrintableItem]) -> Vec<DuplicateSet> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<PrintableItem>> = HashMap::new();

    for item in items {
        let key = normalize_name(&item.name);
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(item.clone());
    }

    order
        .into_iter()
        .filter_map(|key| {
            let mut members = groups.remove(&key)?;
            if members.len() < 2 {
                return None;
            }
            members.sort_by_key(|m| (m.created_at.is_none(), m.created_at));
            Some(DuplicateSet { key, members })
        })
        .collect()
}

/// Ids of every non-original member across all sets.
pub fn select_all_duplicates(sets: &[DuplicateSet]) -> Vec<String> {
    sets.iter()
        .flat_map(|set| set.duplicates().iter().map(|item| item.id.clone()))
        .collect()
}

pub fn write_report_csv<W: Write>(sets: &[DuplicateSet], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["group", "role", "id", "name", "artist", "created_at"])?;

    for set in sets {
        for (index, item) in set.members().iter().enumerate() {
            let role = if index == 0 { "original" } else { "duplicate" };
            let created = item
                .created_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_default();
            csv.write_record([
                set.key.as_str(),
                role,
                item.id.as_str(),
                item.name.as_str(),
                item.artist.as_str(),
                created.as_str(),
            ])?;
        }
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn named(id: &str, name: &str, day: Option<u32>) -> PrintableItem {
        let mut item = PrintableItem::new(id, name);
        item.created_at = day.map(|d| Utc.with_ymd_and_hms(2024, 1, d, 9, 0, 0).unwrap());
        item
    }

    #[test]
    fn test_grouping_ignores_case_and_whitespace() {
        let items = vec![
            named("1", "Sunset", Some(1)),
            named("2", "sunset ", Some(2)),
            named("3", "SUNSET", Some(3)),
            named("4", "Ocean", Some(4)),
        ];
        let sets = find_duplicate_sets(&items);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].key, "sunset");
        assert_eq!(sets[0].members().len(), 3);
        assert!(sets[0].members().iter().all(|m| m.id != "4"));
    }

    #[test]
    fn test_keep_oldest_selection() {
        let items = vec![
            named("t3", "Harbour", Some(3)),
            named("t1", "Harbour", Some(1)),
            named("t2", "harbour", Some(2)),
        ];
        let sets = find_duplicate_sets(&items);
        assert_eq!(sets[0].original().map(|m| m.id.as_str()), Some("t1"));

        let mut selected = select_all_duplicates(&sets);
        selected.sort();
        assert_eq!(selected, vec!["t2", "t3"]);
    }

    #[test]
    fn test_equal_timestamps_keep_catalog_order() {
        let items = vec![
            named("b", "Field", Some(5)),
            named("a", "Field", Some(5)),
        ];
        let sets = find_duplicate_sets(&items);
        let ids: Vec<&str> = sets[0].members().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_undated_members_sort_last() {
        let items = vec![named("x", "Dune", None), named("y", "Dune", Some(9))];
        let sets = find_duplicate_sets(&items);
        assert_eq!(sets[0].original().map(|m| m.id.as_str()), Some("y"));
        assert_eq!(select_all_duplicates(&sets), vec!["x"]);
    }

    #[test]
    fn test_no_duplicates() {
        let items = vec![named("1", "One", None), named("2", "Two", None)];
        assert!(find_duplicate_sets(&items).is_empty());
        assert!(select_all_duplicates(&[]).is_empty());
    }

    #[test]
    fn test_empty_set_has_no_original() {
        let set = DuplicateSet {
            key: "empty".to_string(),
            members: Vec::new(),
        };
        assert!(set.original().is_none());
        assert!(set.duplicates().is_empty());
    }

    #[test]
    fn test_report_csv() {
        let items = vec![named("1", "Sunset", Some(1)), named("2", "sunset", Some(2))];
        let sets = find_duplicate_sets(&items);
        let mut out = Vec::new();
        write_report_csv(&sets, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "group,role,id,name,artist,created_at");
        assert!(lines[1].starts_with("sunset,original,1,Sunset,"));
        assert!(lines[2].starts_with("sunset,duplicate,2,sunset,"));
    }
}

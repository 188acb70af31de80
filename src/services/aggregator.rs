//! Category tree built from stored playlists
//!
//! Rebuilt from scratch on every request; nothing here is cached.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{category, CategoryView, MediaEntry, PlaylistRecord, StorageInfo, SubcategoryView};

fn main_label(entry: &MediaEntry) -> &str {
    let main = entry.main_category.trim();
    if main.is_empty() {
        category::UNCATEGORIZED
    } else {
        main
    }
}

fn sub_label(entry: &MediaEntry) -> &str {
    entry
        .sub_category
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(category::GENERAL)
}

/// Case-insensitive stable sort; equal names keep insertion order
fn sort_by_name(entries: &mut [MediaEntry]) {
    entries.sort_by_cached_key(|e| e.name.to_lowercase());
}

/// Group entries by main category, in order of first appearance
fn group_by_main(entries: Vec<MediaEntry>) -> Vec<(String, Vec<MediaEntry>)> {
    let mut groups: Vec<(String, Vec<MediaEntry>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let label = main_label(&entry).to_string();
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            groups.push((label, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(entry);
    }

    groups
}

fn build_subcategories(items: &[MediaEntry]) -> BTreeMap<String, SubcategoryView> {
    let mut subcategories: BTreeMap<String, SubcategoryView> = BTreeMap::new();

    // Items arrive sorted, so each subcategory stays sorted
    for entry in items {
        let name = sub_label(entry);
        let view = subcategories
            .entry(name.to_string())
            .or_insert_with(|| SubcategoryView {
                name: name.to_string(),
                count: 0,
                items: Vec::new(),
            });
        view.items.push(entry.clone());
        view.count += 1;
    }

    subcategories
}

/// Build the sorted category -> subcategory -> entries tree
pub fn build_categories(records: &[PlaylistRecord]) -> Vec<CategoryView> {
    let entries: Vec<MediaEntry> = records
        .iter()
        .flat_map(|record| record.items.iter().cloned())
        .collect();

    let mut categories: Vec<CategoryView> = group_by_main(entries)
        .into_iter()
        .map(|(name, mut items)| {
            sort_by_name(&mut items);
            let subcategories = build_subcategories(&items);
            CategoryView {
                name,
                count: items.len(),
                items,
                subcategories,
            }
        })
        .collect();

    categories.sort_by_cached_key(|c| c.name.to_lowercase());
    categories
}

/// Find a category by exact name
pub fn find_category<'a>(categories: &'a [CategoryView], name: &str) -> Option<&'a CategoryView> {
    categories.iter().find(|c| c.name == name)
}

/// Case-insensitive search over entry name and categories
pub fn search_entries<'a, I>(entries: I, query: &str) -> Vec<MediaEntry>
where
    I: IntoIterator<Item = &'a MediaEntry>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    entries
        .into_iter()
        .filter(|entry| {
            entry.name.to_lowercase().contains(&needle)
                || entry.main_category.to_lowercase().contains(&needle)
                || entry
                    .sub_category
                    .as_deref()
                    .map_or(false, |s| s.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Playlists, main categories and entries currently stored
pub fn storage_info(records: &[PlaylistRecord]) -> StorageInfo {
    let entries = records.iter().flat_map(|r| r.items.iter());
    let categories: HashSet<&str> = entries.clone().map(main_label).collect();

    StorageInfo {
        total_playlists: records.len(),
        total_categories: categories.len(),
        total_items: entries.count(),
    }
}

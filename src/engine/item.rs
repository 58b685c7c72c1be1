//! Work items and their progress numbering
//!
//! A batch arrives as two ordered sub-collections. They are flattened into
//! one sequence where each entry keeps its category and a 1-based index that
//! runs continuously from the first sub-collection into the second.

/// Which sub-collection an item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    Primary,
    Secondary,
}

/// Work item with its position in the batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedItem<T> {
    /// 1-based sequence index, used for progress messages
    pub index: usize,
    pub category: ItemCategory,
    pub item: T,
}

/// Ordered batch of work items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBatch<T> {
    items: Vec<IndexedItem<T>>,
}

impl<T> ItemBatch<T> {
    /// Flatten `primary` then `secondary`, numbering from 1
    pub fn new(primary: Vec<T>, secondary: Vec<T>) -> Self {
        let tagged = primary
            .into_iter()
            .map(|item| (ItemCategory::Primary, item))
            .chain(
                secondary
                    .into_iter()
                    .map(|item| (ItemCategory::Secondary, item)),
            );

        let items = tagged
            .enumerate()
            .map(|(position, (category, item))| IndexedItem {
                index: position + 1,
                category,
                item,
            })
            .collect();

        Self { items }
    }

    /// Single sub-collection batch
    pub fn from_items(items: Vec<T>) -> Self {
        Self::new(items, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, category: ItemCategory) -> usize {
        self.items
            .iter()
            .filter(|entry| entry.category == category)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedItem<T>> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<IndexedItem<T>> {
        self.items
    }
}

impl<T> Default for ItemBatch<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> IntoIterator for ItemBatch<T> {
    type Item = IndexedItem<T>;
    type IntoIter = std::vec::IntoIter<IndexedItem<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

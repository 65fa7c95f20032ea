//! An insertion-ordered collection whose slots stay put when items are removed.

/// An insertion-ordered collection with stable slot indices.
///
/// Items live in a dense array of slots. Removing an item leaves a tombstone in its slot, so the slot indices of all other items do not change. This makes it
/// safe to remove the item under a cursor while walking the collection with [`first_slot`](Self::first_slot) and [`next_slot`](Self::next_slot): the next
/// slot is found by scanning forward from the current one, so a removed item is never revisited and the item after it is never skipped.
///
/// Tombstones are dropped by [`compact`](Self::compact), which renumbers the slots. Removals that are not made through a slot index compact the collection
/// once tombstones outnumber the live items.
///
/// # Type Parameters
///
/// - `T`: The type of the items.
#[derive(Debug, Clone)]
pub struct OrderedSet<T> {
    /// The slots, in insertion order. `None` marks a removed item.
    slots: Vec<Option<T>>,
    /// The number of live items.
    len: usize,
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedSet<T> {
    /// Creates an empty `OrderedSet`.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new(), len: 0 }
    }

    /// Creates an empty `OrderedSet` with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Returns the number of live items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns whether there are no live items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of tombstones left by removals since the last compaction.
    #[must_use]
    pub const fn n_tombstones(&self) -> usize {
        self.slots.len() - self.len
    }

    /// Appends an item after all existing items.
    pub fn push(&mut self, item: T) {
        self.slots.push(Some(item));
        self.len += 1;
    }

    /// Returns the slot of the first live item.
    #[must_use]
    pub fn first_slot(&self) -> Option<usize> {
        self.slot_from(0)
    }

    /// Returns the slot of the first live item after `slot`.
    ///
    /// `slot` itself may already have been removed.
    #[must_use]
    pub fn next_slot(&self, slot: usize) -> Option<usize> {
        self.slot_from(slot + 1)
    }

    /// Returns the first live slot at or after `start`.
    fn slot_from(&self, start: usize) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .skip(start)
            .find_map(|(i, s)| s.as_ref().map(|_| i))
    }

    /// Returns the item in the given slot, if it is live.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Returns the item in the given slot mutably, if it is live.
    #[must_use]
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Returns the slot of the first live item matching the predicate.
    pub fn position<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> Option<usize> {
        self.slots.iter().position(|s| s.as_ref().is_some_and(&mut predicate))
    }

    /// Returns the first live item matching the predicate.
    pub fn find<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> Option<&T> {
        self.iter().find(|item| predicate(*item))
    }

    /// Returns the first live item matching the predicate, mutably.
    pub fn find_mut<P: FnMut(&T) -> bool>(&mut self, mut predicate: P) -> Option<&mut T> {
        self.iter_mut().find(|item| predicate(&**item))
    }

    /// Removes the item in the given slot, leaving a tombstone.
    ///
    /// No other slot changes, so this is safe to call on the current slot of a cursor.
    pub fn remove_at(&mut self, slot: usize) -> Option<T> {
        let item = self.slots.get_mut(slot).and_then(Option::take);
        if item.is_some() {
            self.len -= 1;
        }
        item
    }

    /// Removes the first live item matching the predicate.
    ///
    /// This may compact the collection, so it must not be called during a cursor walk.
    pub fn remove_first<P: FnMut(&T) -> bool>(&mut self, predicate: P) -> Option<T> {
        let item = self.position(predicate).and_then(|slot| self.remove_at(slot));
        if self.n_tombstones() > self.len {
            self.compact();
        }
        item
    }

    /// Keeps only the items matching the predicate, in their original order.
    ///
    /// This compacts the collection.
    pub fn retain<P: FnMut(&T) -> bool>(&mut self, mut predicate: P) {
        self.slots.retain(|s| s.as_ref().is_some_and(&mut predicate));
        self.len = self.slots.len();
    }

    /// Drops all tombstones. The slots of live items are renumbered.
    pub fn compact(&mut self) {
        self.slots.retain(Option::is_some);
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.len = 0;
    }

    /// Returns an iterator over the live items, in insertion order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter(self.slots.iter())
    }

    /// Returns a mutable iterator over the live items, in insertion order.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut(self.slots.iter_mut())
    }

    /// Returns an iterator over the live items paired with their slots, in insertion order.
    pub fn iter_slots(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|item| (i, item)))
    }
}

/// An iterator over the live items of an [`OrderedSet`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T>(std::slice::Iter<'a, Option<T>>);

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.by_ref().find_map(Option::as_ref)
    }
}

/// A mutable iterator over the live items of an [`OrderedSet`].
#[derive(Debug)]
pub struct IterMut<'a, T>(std::slice::IterMut<'a, Option<T>>);

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.by_ref().find_map(Option::as_mut)
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut OrderedSet<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = std::iter::Flatten<std::vec::IntoIter<Option<T>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter().flatten()
    }
}

impl<T> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

/// Serialized as a sequence of the live items, so tombstones never reach the wire.
#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for OrderedSet<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for OrderedSet<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from_iter)
    }
}

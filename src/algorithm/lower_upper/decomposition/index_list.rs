//! # Live index sets
//!
//! The rows and columns that were not yet pivoted on are kept in circular doubly linked lists,
//! stored as index arrays, one list for every nonzero count. Removal and moving between counts are
//! constant time, and the pivot search visits the lines of a given count directly.

/// Indices grouped by a count, every group a circular doubly linked list within the same arrays.
///
/// Moving an index to another group is constant time. It is appended to its new group, so the
/// iteration order within a group is the order in which indices arrived there.
#[derive(Clone, Debug)]
pub struct CountBuckets {
    next: Vec<usize>,
    previous: Vec<usize>,
    /// Group of each index, `None` once removed.
    count: Vec<Option<usize>>,
    heads: Vec<Option<usize>>,
    len: usize,
}

impl CountBuckets {
    /// Group the indices `0..counts.len()` in increasing order.
    ///
    /// # Arguments
    ///
    /// * `counts`: Initial count of each index.
    /// * `max_count`: Largest count that will ever be used.
    pub fn new(counts: impl IntoIterator<Item=usize>, max_count: usize) -> Self {
        let mut buckets = Self {
            next: Vec::new(),
            previous: Vec::new(),
            count: Vec::new(),
            heads: vec![None; max_count + 1],
            len: 0,
        };
        for (index, count) in counts.into_iter().enumerate() {
            buckets.next.push(index);
            buckets.previous.push(index);
            buckets.count.push(None);
            buckets.insert(index, count);
        }

        buckets
    }

    fn insert(&mut self, index: usize, count: usize) {
        debug_assert!(self.count[index].is_none());

        match self.heads[count] {
            Some(head) => {
                let tail = self.previous[head];
                self.next[tail] = index;
                self.previous[index] = tail;
                self.next[index] = head;
                self.previous[head] = index;
            }
            None => {
                self.next[index] = index;
                self.previous[index] = index;
                self.heads[count] = Some(index);
            }
        }
        self.count[index] = Some(count);
        self.len += 1;
    }

    /// Take an index out of its group. Does nothing if it was already removed.
    pub fn remove(&mut self, index: usize) {
        let Some(count) = self.count[index].take() else {
            return;
        };
        self.len -= 1;

        let (previous, next) = (self.previous[index], self.next[index]);
        if next == index {
            self.heads[count] = None;
        } else {
            self.next[previous] = next;
            self.previous[next] = previous;
            if self.heads[count] == Some(index) {
                self.heads[count] = Some(next);
            }
        }
    }

    /// Move a present index to the group of its new count.
    pub fn update(&mut self, index: usize, count: usize) {
        debug_assert!(self.count[index].is_some());

        if self.count[index] != Some(count) {
            self.remove(index);
            self.insert(index, count);
        }
    }

    /// Whether the index was not yet removed.
    pub fn contains(&self, index: usize) -> bool {
        self.count[index].is_some()
    }

    /// Number of indices over all groups.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether all indices have been removed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Indices currently in the group of a count.
    pub fn iter(&self, count: usize) -> BucketIter<'_> {
        let head = self.heads.get(count).copied().flatten();
        BucketIter { buckets: self, head, current: head }
    }
}

/// Iterator over one group of a `CountBuckets`.
pub struct BucketIter<'a> {
    buckets: &'a CountBuckets,
    head: Option<usize>,
    current: Option<usize>,
}

impl Iterator for BucketIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        let next = self.buckets.next[current];
        self.current = if Some(next) == self.head { None } else { Some(next) };
        Some(current)
    }
}

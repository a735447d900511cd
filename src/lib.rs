//! A double-ended queue stored in fixed-size blocks.
//!
//! Elements live in independently allocated blocks of [`BLOCK_SIZE`] slots,
//! reached through a block-pointer array. Growing the deque rebuilds only that
//! array: existing blocks are reused by pointer, so elements never move once
//! they are pushed. Pushes and pops at either end are amortized O(1), indexing
//! is O(1), and inserting or erasing in the middle is O(n).
//!
//! ```
//! use block_deque::Deque;
//!
//! let mut deque = Deque::new();
//! deque.push_back(1);
//! deque.push_back(2);
//! deque.push_front(0);
//! assert_eq!(deque, [0, 1, 2]);
//! assert!(deque.at(3).is_err());
//! ```

mod block;
mod cursor;
mod iter;

pub use block::{BLOCK_SIZE, GROWTH_FACTOR};
pub use cursor::{Cursor, CursorMut};
pub use iter::{IntoIter, Iter, IterMut};

use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem,
    ops::{Index, IndexMut},
    ptr,
};

use block::BlockMap;
use cursor::RawCursor;

/// Blocks allocated by [`Deque::new`]. The live range starts in the middle one.
const INITIAL_BLOCKS: usize = 3;

/// The error returned by checked accessors when an index is not below the
/// deque's length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    index: usize,
    len: usize,
}

impl OutOfRange {
    /// The index that was requested.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The length of the deque at the time of the access.
    #[inline]
    pub fn deque_len(&self) -> usize {
        self.len
    }
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} out of range for a deque of length {}", self.index, self.len)
    }
}

impl std::error::Error for OutOfRange {}

/// A double-ended queue backed by fixed-size blocks.
///
/// Four boundary cursors split the allocated slots: `[true_begin, begin)` is
/// free head room, `[begin, end)` holds the live elements and `[end, true_end]`
/// is free tail room. The `true_end` slot itself is never occupied, so `end`
/// always addresses a real slot.
pub struct Deque<T> {
    blocks: BlockMap<T>,
    true_begin: RawCursor<T>,
    begin: RawCursor<T>,
    end: RawCursor<T>,
    true_end: RawCursor<T>,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T> Deque<T> {
    /// Creates an empty deque with three blocks and the live range centered in
    /// the middle one.
    #[inline]
    pub fn new() -> Self {
        Self::from_blocks(BlockMap::with_blocks(INITIAL_BLOCKS), BLOCK_SIZE)
    }

    /// Creates a deque holding `n` clones of `value`.
    ///
    /// If cloning panics, the elements cloned so far are dropped and every block
    /// is freed before the panic propagates.
    #[inline]
    pub fn from_elem(value: T, n: usize) -> Self
    where
        T: Clone,
    {
        Self::from_fn(n, || value.clone())
    }

    /// Creates a deque holding `n` default values.
    #[inline]
    pub fn with_len(n: usize) -> Self
    where
        T: Default,
    {
        Self::from_fn(n, T::default)
    }

    /// Creates a deque holding `n` values produced by `f`, front to back.
    pub fn from_fn(n: usize, mut f: impl FnMut() -> T) -> Self {
        let mut this = Self::from_blocks(BlockMap::with_blocks(Self::blocks_for_len(n)), 0);
        for _ in 0..n {
            // SAFETY: blocks_for_len leaves at least one free slot past n elements.
            // If f panics, `this` drops whatever was written so far.
            unsafe { this.write_back(f()) };
        }
        this
    }

    /// Number of blocks needed to hold `n` elements starting at `true_begin`
    /// while keeping `end` in front of `true_end`.
    #[inline]
    fn blocks_for_len(n: usize) -> usize {
        n.checked_add(1).expect("capacity overflow").div_ceil(BLOCK_SIZE)
    }

    /// Builds an empty deque over `blocks` with `head_room` free slots in front
    /// of the live range.
    fn from_blocks(blocks: BlockMap<T>, head_room: usize) -> Self {
        let (true_begin, true_end) = Self::bounds(&blocks);
        // SAFETY: callers keep head_room below the block map's slot count.
        let begin = unsafe { true_begin.offset(head_room as isize) };
        Self {
            blocks,
            true_begin,
            begin,
            end: begin,
            true_end,
            len: 0,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn bounds(blocks: &BlockMap<T>) -> (RawCursor<T>, RawCursor<T>) {
        // SAFETY: a block map always holds at least one block.
        unsafe { (RawCursor::new(blocks.first(), 0), RawCursor::new(blocks.last(), BLOCK_SIZE - 1)) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of allocated slots, head room and tail room included.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.blocks.len() * BLOCK_SIZE
    }

    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Rebuilds the block map at `GROWTH_FACTOR` times its size and recomputes
    /// the boundary cursors. Elements are not moved, but every raw cursor taken
    /// before this call is invalid afterwards.
    #[cold]
    fn grow(&mut self) {
        let head_room = (self.begin - self.true_begin) as usize;
        let added = self.blocks.grow() * BLOCK_SIZE;
        let (true_begin, true_end) = Self::bounds(&self.blocks);
        self.true_begin = true_begin;
        self.true_end = true_end;
        // SAFETY: the old slots now sit `added` slots further from true_begin,
        // with the same amount of fresh tail room behind them.
        unsafe {
            self.begin = true_begin.offset((head_room + added) as isize);
            self.end = self.begin.offset(self.len as isize);
        }
    }

    /// # Safety
    /// `end` must not be `true_end`.
    #[inline]
    unsafe fn write_back(&mut self, val: T) {
        ptr::write(self.end.slot(), val);
        self.end.inc();
        self.len += 1;
    }

    /// Cursor at logical index `idx`.
    ///
    /// `idx` must not exceed `self.len`.
    #[inline]
    pub(crate) fn raw_at(&self, idx: usize) -> RawCursor<T> {
        debug_assert!(idx <= self.len);
        // SAFETY: begin + idx lies in [begin, end]
        unsafe { self.begin.offset(idx as isize) }
    }

    #[inline]
    pub fn push_back(&mut self, val: T) {
        if self.end == self.true_end {
            self.grow();
        }
        // SAFETY: after growing there's always tail room
        unsafe { self.write_back(val) };
    }

    #[inline]
    pub fn push_front(&mut self, val: T) {
        if self.begin == self.true_begin {
            self.grow();
        }
        // SAFETY: after growing there's always head room
        unsafe {
            self.begin.dec();
            ptr::write(self.begin.slot(), val);
        }
        self.len += 1;
    }

    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.len -= 1;
        // SAFETY: the deque was non-empty, so end - 1 is a live slot
        let val = unsafe {
            self.end.dec();
            ptr::read(self.end.slot())
        };
        if self.is_empty() {
            self.recenter();
        }
        Some(val)
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.len -= 1;
        // SAFETY: the deque was non-empty, so begin is a live slot and begin + 1 <= end
        let val = unsafe {
            let val = ptr::read(self.begin.slot());
            self.begin.inc();
            val
        };
        if self.is_empty() {
            self.recenter();
        }
        Some(val)
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        let idx = self.len.checked_sub(1)?;
        self.get(idx)
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let idx = self.len.checked_sub(1)?;
        self.get_mut(idx)
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&T> {
        if idx >= self.len {
            None
        } else {
            Some(unsafe { self.get_unchecked(idx) })
        }
    }

    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        if idx >= self.len {
            None
        } else {
            Some(unsafe { self.get_unchecked_mut(idx) })
        }
    }

    /// # Safety
    /// Callers must ensure that `idx < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, idx: usize) -> &T {
        &*self.begin.offset(idx as isize).slot()
    }

    /// # Safety
    /// Callers must ensure that `idx < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, idx: usize) -> &mut T {
        &mut *self.begin.offset(idx as isize).slot()
    }

    /// Bounds-checked access. Unlike indexing, an index past the end is reported
    /// as an error rather than a panic; the deque is left untouched either way.
    #[inline]
    pub fn at(&self, idx: usize) -> Result<&T, OutOfRange> {
        let len = self.len;
        self.get(idx).ok_or(OutOfRange { index: idx, len })
    }

    #[inline]
    pub fn at_mut(&mut self, idx: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len;
        self.get_mut(idx).ok_or(OutOfRange { index: idx, len })
    }

    /// Inserts `val` at `idx`, moving every element from `idx` on one slot
    /// towards the back.
    ///
    /// # Panics
    /// Panics if `idx > self.len()`.
    pub fn insert(&mut self, idx: usize, val: T) {
        if idx > self.len {
            panic!("tried to insert at index {idx} into a deque of length {}", self.len);
        }
        if self.end == self.true_end {
            self.grow();
        }
        // SAFETY: end < true_end after growing, so every slot in [target, end]
        // exists, and [target, end) holds live elements that are moved one slot
        // up before target is overwritten.
        unsafe {
            let target = self.raw_at(idx);
            let mut cur = self.end;
            while cur != target {
                let mut prev = cur;
                prev.dec();
                ptr::copy_nonoverlapping(prev.slot(), cur.slot(), 1);
                cur = prev;
            }
            ptr::write(target.slot(), val);
            self.end.inc();
        }
        self.len += 1;
    }

    /// Removes and returns the element at `idx`, moving every element behind it
    /// one slot towards the front. Returns `None` if `idx` is out of bounds.
    pub fn remove(&mut self, idx: usize) -> Option<T> {
        if idx >= self.len {
            return None;
        }
        // SAFETY: idx is in bounds, so the slot is live; after it's read out the
        // hole is closed by moving the rest of the live range down one slot.
        unsafe {
            let mut cur = self.raw_at(idx);
            let val = ptr::read(cur.slot());
            self.end.dec();
            while cur != self.end {
                let mut next = cur;
                next.inc();
                ptr::copy_nonoverlapping(next.slot(), cur.slot(), 1);
                cur = next;
            }
            self.len -= 1;
            Some(val)
        }
    }

    /// Drops the element at `idx` and closes the gap. The element is dropped only
    /// after the deque is consistent again.
    ///
    /// # Panics
    /// Panics if `idx >= self.len()`.
    pub fn erase(&mut self, idx: usize) {
        match self.remove(idx) {
            Some(val) => drop(val),
            None => panic!("tried to erase index {idx} from a deque of length {}", self.len),
        }
    }

    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        if i >= self.len || j >= self.len {
            panic!(
                "swap indices out of bounds: tried to swap {i} and {j} on a Deque of length {}",
                self.len
            );
        }
        unsafe { ptr::swap(self.raw_at(i).slot(), self.raw_at(j).slot()) }
    }

    /// Drops elements from the back until at most `len` remain. Elements are
    /// dropped back to front, and the deque is consistent before each drop.
    pub fn truncate(&mut self, len: usize) {
        while self.len > len {
            self.len -= 1;
            // SAFETY: end - 1 is live; it's cut off before being dropped.
            unsafe {
                self.end.dec();
                ptr::drop_in_place(self.end.slot());
            }
        }
    }

    /// Drops every element and re-centers the empty live range in the block map.
    pub fn clear(&mut self) {
        self.truncate(0);
        self.recenter();
    }

    /// Moves the empty live range back to the start of the middle block so a
    /// queue that keeps draining doesn't walk off one end of the block map.
    #[inline]
    fn recenter(&mut self) {
        debug_assert!(self.is_empty());
        let mid = self.blocks.len() / 2 * BLOCK_SIZE;
        // SAFETY: mid is the first slot of an allocated block
        self.begin = unsafe { self.true_begin.offset(mid as isize) };
        self.end = self.begin;
    }

    #[inline]
    pub fn contains(&self, t: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|x| x == t)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.begin, self.end)
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.begin, self.end)
    }

    /// A read-only cursor at `idx`, or `None` if `idx > self.len()`. The position
    /// `self.len()` is the end of the deque.
    #[inline]
    pub fn cursor(&self, idx: usize) -> Option<Cursor<'_, T>> {
        if idx > self.len {
            None
        } else {
            Some(Cursor::new(self.raw_at(idx), self))
        }
    }

    #[inline]
    pub fn cursor_mut(&mut self, idx: usize) -> Option<CursorMut<'_, T>> {
        if idx > self.len {
            None
        } else {
            Some(CursorMut::new(self.raw_at(idx), self))
        }
    }
}

impl<T> Drop for Deque<T> {
    fn drop(&mut self) {
        if mem::needs_drop::<T>() {
            struct Dropper<'a, T>(&'a mut Deque<T>);

            impl<'a, T> Drop for Dropper<'a, T> {
                fn drop(&mut self) {
                    self.0.truncate(0)
                }
            }

            // if an element's destructor panics, the guard keeps dropping the rest
            let mut guard = Dropper(self);
            guard.0.truncate(0);
        }
        // the blocks themselves are freed when `self.blocks` is dropped
    }
}

impl<T: Clone> Clone for Deque<T> {
    /// Clones into a block map of the same size, with the same head and tail room.
    fn clone(&self) -> Self {
        let head_room = (self.begin - self.true_begin) as usize;
        let mut this = Self::from_blocks(BlockMap::with_blocks(self.blocks.len()), head_room);
        for item in self.iter() {
            // SAFETY: `this` has the same layout as `self`, so there's room for
            // every element. A panicking clone drops `this` before unwinding on.
            unsafe { this.write_back(item.clone()) };
        }
        this
    }

    /// Builds the full replacement first and only then drops the old contents,
    /// so a panicking clone leaves `self` untouched.
    fn clone_from(&mut self, source: &Self) {
        let replacement = source.clone();
        *self = replacement;
    }
}

impl<T> Default for Deque<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Deque<T> {
    fn from(v: Vec<T>) -> Self {
        let mut this = Self::from_blocks(BlockMap::with_blocks(Self::blocks_for_len(v.len())), 0);
        for val in v {
            // SAFETY: sized for v.len() elements
            unsafe { this.write_back(val) };
        }
        this
    }
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
    #[inline]
    fn from(arr: [T; N]) -> Self {
        let mut this = Self::from_blocks(BlockMap::with_blocks(Self::blocks_for_len(N)), 0);
        for val in arr {
            // SAFETY: sized for N elements
            unsafe { this.write_back(val) };
        }
        this
    }
}

impl<T> Extend<T> for Deque<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|val| self.push_back(val));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for Deque<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T> FromIterator<T> for Deque<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq<U>, U> PartialEq<Deque<U>> for Deque<T> {
    fn eq(&self, other: &Deque<U>) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: PartialEq<U>, U> PartialEq<[U]> for Deque<T> {
    #[inline]
    fn eq(&self, other: &[U]) -> bool {
        self.len == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<T: PartialEq<U>, U> PartialEq<&[U]> for Deque<T> {
    #[inline]
    fn eq(&self, other: &&[U]) -> bool {
        self == *other
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for Deque<T> {
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        self == other.as_slice()
    }
}

impl<T: PartialEq<U>, U> PartialEq<Vec<U>> for Deque<T> {
    #[inline]
    fn eq(&self, other: &Vec<U>) -> bool {
        self == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for Deque<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for Deque<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T: Hash> Hash for Deque<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|t| t.hash(state));
    }
}

impl<T> Index<usize> for Deque<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("Out of bounds access")
    }
}

impl<T> IndexMut<usize> for Deque<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).expect("Out of bounds access")
    }
}

unsafe impl<T: Send> Send for Deque<T> {}

unsafe impl<T: Sync> Sync for Deque<T> {}

impl<T> IntoIterator for Deque<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_boundaries<T>(deque: &Deque<T>) {
        assert!(deque.true_begin <= deque.begin);
        assert!(deque.begin <= deque.end);
        assert!(deque.end <= deque.true_end);
        assert_eq!((deque.end - deque.begin) as usize, deque.len());
        assert_eq!((deque.true_end - deque.true_begin) as usize + 1, deque.capacity());
    }

    #[test]
    fn new_centers_in_middle_block() {
        let deque = Deque::<i32>::new();
        assert_eq!(deque.block_count(), 3);
        assert_eq!((deque.begin - deque.true_begin) as usize, BLOCK_SIZE);
        assert_eq!((deque.true_end - deque.end) as usize, 2 * BLOCK_SIZE - 1);
        check_boundaries(&deque);
    }

    #[test]
    fn growth_keeps_elements_in_place() {
        let mut deque = Deque::new();
        for i in 0..2 * BLOCK_SIZE - 1 {
            deque.push_back(i);
        }
        assert_eq!(deque.block_count(), 3);
        let first = &deque[0] as *const usize;
        let map = deque.blocks.first();
        let old_begin = deque.begin;

        deque.push_back(2 * BLOCK_SIZE - 1);
        assert_eq!(deque.block_count(), 9);
        check_boundaries(&deque);

        // the block-pointer array is new, so cursors into it had to be rebuilt
        assert_ne!(map, deque.blocks.first());
        assert_ne!(old_begin, deque.begin);
        // but the blocks, and the elements in them, are untouched
        assert_eq!(first, &deque[0] as *const usize);
        assert_eq!((deque.begin - deque.true_begin) as usize, 3 * BLOCK_SIZE + BLOCK_SIZE);
    }

    #[test]
    fn push_front_grows_symmetrically() {
        let mut deque = Deque::new();
        for i in 0..BLOCK_SIZE {
            deque.push_front(i);
        }
        assert_eq!(deque.block_count(), 3);
        deque.push_front(BLOCK_SIZE);
        assert_eq!(deque.block_count(), 9);
        assert_eq!((deque.begin - deque.true_begin) as usize, 3 * BLOCK_SIZE - 1);
        check_boundaries(&deque);
        assert!(deque.iter().copied().eq((0..=BLOCK_SIZE).rev()));
    }

    #[test]
    fn sized_construction_leaves_tail_room() {
        for n in [0, 1, 31, 32, 33, 63, 64, 100] {
            let deque = Deque::from_elem(7u8, n);
            assert_eq!(deque.len(), n);
            assert_eq!(deque.block_count(), (n + 1).div_ceil(BLOCK_SIZE));
            assert_eq!(deque.begin, deque.true_begin);
            check_boundaries(&deque);
            assert!(deque.iter().all(|&x| x == 7));
        }
        let deque = Deque::<String>::with_len(40);
        assert!(deque.iter().all(String::is_empty));
    }

    #[test]
    fn clone_replicates_room() {
        let mut deque: Deque<i32> = Deque::new();
        for i in 0..50 {
            deque.push_front(i);
        }
        deque.pop_back();
        let copy = deque.clone();
        assert_eq!(copy, deque);
        assert_eq!(copy.block_count(), deque.block_count());
        assert_eq!(copy.begin - copy.true_begin, deque.begin - deque.true_begin);
        assert_eq!(copy.true_end - copy.end, deque.true_end - deque.end);
        check_boundaries(&copy);
    }

    #[test]
    fn clear_recenters() {
        let mut deque: Deque<i32> = (0..10).collect();
        deque.clear();
        assert!(deque.is_empty());
        assert_eq!((deque.begin - deque.true_begin) as usize, BLOCK_SIZE);
        check_boundaries(&deque);
        deque.push_front(1);
        assert_eq!(deque.block_count(), 3);
    }

    #[test]
    fn draining_fifo_does_not_grow() {
        let mut deque = Deque::new();
        for i in 0..100_000 {
            deque.push_back(i);
            assert_eq!(deque.pop_front(), Some(i));
        }
        assert_eq!(deque.block_count(), 3);
        assert_eq!((deque.begin - deque.true_begin) as usize, BLOCK_SIZE);
        check_boundaries(&deque);

        for i in 0..100_000 {
            deque.push_front(i);
            assert_eq!(deque.pop_back(), Some(i));
        }
        assert_eq!(deque.block_count(), 3);
    }

    #[allow(dead_code)]
    fn deque_is_covariant<'a>(deque: Deque<&'static str>) -> Deque<&'a str> {
        deque
    }

    #[allow(dead_code)]
    fn iter_is_covariant<'i, 'a>(iter: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        iter
    }

    #[allow(dead_code)]
    fn into_iter_is_covariant<'a>(iter: IntoIter<&'static str>) -> IntoIter<&'a str> {
        iter
    }

    #[allow(dead_code)]
    fn cursor_is_covariant<'c, 'a>(cursor: Cursor<'c, &'static str>) -> Cursor<'c, &'a str> {
        cursor
    }

    #[test]
    fn shorter_lifetimes_are_accepted() {
        let owned = String::from("borrowed");
        let mut deque: Deque<&str> = deque_is_covariant(Deque::from(["static"]));
        deque.push_back(&owned);
        assert_eq!(deque, ["static", "borrowed"]);
    }

    #[test]
    fn insert_and_remove_keep_boundaries() {
        let mut deque: Deque<usize> = Deque::new();
        for i in 0..300 {
            deque.insert(i / 2, i);
            check_boundaries(&deque);
        }
        while !deque.is_empty() {
            let idx = deque.len() / 3;
            deque.remove(idx);
            check_boundaries(&deque);
        }
    }

    #[test]
    fn zero_sized_elements() {
        let mut deque = Deque::new();
        for _ in 0..1000 {
            deque.push_back(());
            deque.push_front(());
        }
        deque.insert(5, ());
        assert_eq!(deque.len(), 2001);
        assert_eq!(deque.iter().count(), 2001);
        deque.erase(0);
        assert_eq!(deque.pop_back(), Some(()));
        check_boundaries(&deque);
    }

    #[test]
    fn out_of_range_display() {
        let deque: Deque<i32> = [1, 2].into();
        let err = deque.at(2).unwrap_err();
        assert_eq!((err.index(), err.deque_len()), (2, 2));
        assert_eq!(err.to_string(), "index 2 out of range for a deque of length 2");
    }

    #[test]
    #[should_panic(expected = "tried to insert at index 4 into a deque of length 3")]
    fn insert_past_end_panics() {
        let mut deque: Deque<i32> = [1, 2, 3].into();
        deque.insert(4, 0);
    }

    #[test]
    #[should_panic(expected = "tried to erase index 0 from a deque of length 0")]
    fn erase_empty_panics() {
        Deque::<i32>::new().erase(0);
    }
}

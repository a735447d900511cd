use core::{
    cmp::Ordering,
    fmt, mem,
    ops::Sub,
    ptr::NonNull,
};

use crate::{block::BLOCK_SIZE, Deque};

/// A position inside a block map: which block, and which slot in that block.
///
/// The slot address is cached so dereferencing never has to chase the block
/// pointer again. A `RawCursor` borrows nothing, so it's up to the owner to make
/// sure it isn't used after the block-pointer array it points into is rebuilt.
pub(crate) struct RawCursor<T> {
    block: *const NonNull<T>,
    offset: usize,
    slot: NonNull<T>,
}

impl<T> Clone for RawCursor<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawCursor<T> {}

impl<T> RawCursor<T> {
    /// # Safety
    /// `block` must point into a live block-pointer array and `offset` must be
    /// smaller than `BLOCK_SIZE`.
    #[inline]
    pub(crate) unsafe fn new(block: *const NonNull<T>, offset: usize) -> Self {
        debug_assert!(offset < BLOCK_SIZE);
        let slot = NonNull::new_unchecked((*block).as_ptr().add(offset));
        Self { block, offset, slot }
    }

    #[inline]
    pub(crate) fn slot(&self) -> *mut T {
        self.slot.as_ptr()
    }

    /// # Safety
    /// The next slot must still lie inside the block-pointer array.
    #[inline]
    pub(crate) unsafe fn inc(&mut self) {
        self.offset += 1;
        if self.offset == BLOCK_SIZE {
            self.offset = 0;
            self.block = self.block.add(1);
        }
        self.slot = NonNull::new_unchecked((*self.block).as_ptr().add(self.offset));
    }

    /// # Safety
    /// The previous slot must still lie inside the block-pointer array.
    #[inline]
    pub(crate) unsafe fn dec(&mut self) {
        if self.offset == 0 {
            self.offset = BLOCK_SIZE - 1;
            self.block = self.block.sub(1);
        } else {
            self.offset -= 1;
        }
        self.slot = NonNull::new_unchecked((*self.block).as_ptr().add(self.offset));
    }

    /// Moves `delta` slots, crossing block boundaries as needed. Negative deltas
    /// are floored, so they land in the correct earlier block.
    ///
    /// # Safety
    /// The target slot must lie inside the block-pointer array.
    #[inline]
    pub(crate) unsafe fn offset(self, delta: isize) -> Self {
        let combined = self.offset as isize + delta;
        let block_shift = combined.div_euclid(BLOCK_SIZE as isize);
        let offset = combined.rem_euclid(BLOCK_SIZE as isize) as usize;
        Self::new(self.block.offset(block_shift), offset)
    }

    #[inline]
    fn block_addr(&self) -> usize {
        self.block as usize
    }
}

impl<T> Sub for RawCursor<T> {
    type Output = isize;

    /// Number of slots from `rhs` to `self`. Both cursors must point into the
    /// same block-pointer array.
    #[inline]
    fn sub(self, rhs: Self) -> isize {
        let stride = mem::size_of::<NonNull<T>>() as isize;
        let blocks = self.block_addr().wrapping_sub(rhs.block_addr()) as isize / stride;
        blocks * BLOCK_SIZE as isize + self.offset as isize - rhs.offset as isize
    }
}

impl<T> PartialEq for RawCursor<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.block == other.block && self.offset == other.offset
    }
}

impl<T> Eq for RawCursor<T> {}

impl<T> PartialOrd for RawCursor<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for RawCursor<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.block_addr()
            .cmp(&other.block_addr())
            .then(self.offset.cmp(&other.offset))
    }
}

impl<T> fmt::Debug for RawCursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawCursor")
            .field("block", &self.block)
            .field("offset", &self.offset)
            .finish()
    }
}

/// A read-only random-access position in a [`Deque`].
///
/// A cursor ranges over `0..=len`; the position `len` is the end of the deque
/// and has no element. It is created by [`Deque::cursor`].
///
/// Growing the deque rebuilds its block-pointer array, which would leave any
/// outstanding position dangling. A `Cursor` borrows the deque, so it can't
/// outlive such a rebuild:
///
/// ```compile_fail
/// use block_deque::Deque;
///
/// let mut deque: Deque<i32> = (0..10).collect();
/// let cursor = deque.cursor(3).unwrap();
/// deque.push_back(10);
/// assert_eq!(cursor.get(), Some(&3));
/// ```
pub struct Cursor<'a, T> {
    raw: RawCursor<T>,
    deque: &'a Deque<T>,
}

impl<'a, T> Cursor<'a, T> {
    #[inline]
    pub(crate) fn new(raw: RawCursor<T>, deque: &'a Deque<T>) -> Self {
        Self { raw, deque }
    }

    /// The logical index this cursor points at.
    #[inline]
    pub fn index(&self) -> usize {
        (self.raw - self.deque.begin) as usize
    }

    /// The element under the cursor, or `None` at the end position.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        if self.raw == self.deque.end {
            None
        } else {
            // SAFETY: the cursor lies in [begin, end), so the slot is live.
            Some(unsafe { &*self.raw.slot() })
        }
    }

    /// Steps one element towards the back. Returns `false` at the end position.
    #[inline]
    pub fn move_next(&mut self) -> bool {
        if self.raw == self.deque.end {
            return false;
        }
        // SAFETY: raw < end <= true_end
        unsafe { self.raw.inc() };
        true
    }

    /// Steps one element towards the front. Returns `false` at the first position.
    #[inline]
    pub fn move_prev(&mut self) -> bool {
        if self.raw == self.deque.begin {
            return false;
        }
        // SAFETY: raw > begin >= true_begin
        unsafe { self.raw.dec() };
        true
    }

    /// Moves the cursor by `delta` positions. If the target lies outside
    /// `0..=len`, the cursor stays where it is and `false` is returned.
    #[inline]
    pub fn seek(&mut self, delta: isize) -> bool {
        match seek_target(self.index(), delta, self.deque.len()) {
            Some(_) => {
                // SAFETY: the target lies in [begin, end]
                self.raw = unsafe { self.raw.offset(delta) };
                true
            }
            None => false,
        }
    }
}

#[inline]
fn seek_target(index: usize, delta: isize, len: usize) -> Option<usize> {
    let target = (index as isize).checked_add(delta)?;
    if target < 0 || target as usize > len {
        None
    } else {
        Some(target as usize)
    }
}

impl<'a, T> Clone for Cursor<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Cursor<'a, T> {}

impl<'a, T> Sub for Cursor<'a, T> {
    type Output = isize;

    #[inline]
    fn sub(self, rhs: Self) -> isize {
        self.raw - rhs.raw
    }
}

impl<'a, T> PartialEq for Cursor<'a, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<'a, T> PartialOrd for Cursor<'a, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a, T> Ord for Cursor<'a, T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Cursor<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.index()).field(&self.get()).finish()
    }
}

unsafe impl<'a, T: Sync> Send for Cursor<'a, T> {}

unsafe impl<'a, T: Sync> Sync for Cursor<'a, T> {}

/// A mutable random-access position in a [`Deque`], created by
/// [`Deque::cursor_mut`].
///
/// A `CursorMut` holds the only borrow of the deque. Its own mutations may grow
/// the block map, so it repositions itself by index after each of them.
pub struct CursorMut<'a, T> {
    raw: RawCursor<T>,
    deque: &'a mut Deque<T>,
}

impl<'a, T> CursorMut<'a, T> {
    #[inline]
    pub(crate) fn new(raw: RawCursor<T>, deque: &'a mut Deque<T>) -> Self {
        Self { raw, deque }
    }

    #[inline]
    pub fn index(&self) -> usize {
        (self.raw - self.deque.begin) as usize
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.as_cursor().get()
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if self.raw == self.deque.end {
            None
        } else {
            // SAFETY: the slot is live and we hold the deque mutably.
            Some(unsafe { &mut *self.raw.slot() })
        }
    }

    /// A read-only view of the same position, borrowing this cursor.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.raw, self.deque)
    }

    #[inline]
    pub fn move_next(&mut self) -> bool {
        let mut cursor = Cursor::new(self.raw, self.deque);
        let moved = cursor.move_next();
        self.raw = cursor.raw;
        moved
    }

    #[inline]
    pub fn move_prev(&mut self) -> bool {
        let mut cursor = Cursor::new(self.raw, self.deque);
        let moved = cursor.move_prev();
        self.raw = cursor.raw;
        moved
    }

    #[inline]
    pub fn seek(&mut self, delta: isize) -> bool {
        let mut cursor = Cursor::new(self.raw, self.deque);
        let moved = cursor.seek(delta);
        self.raw = cursor.raw;
        moved
    }

    /// Inserts `value` at the cursor position, shifting the current element and
    /// everything after it one slot towards the back. The cursor ends up on the
    /// inserted element.
    pub fn insert(&mut self, value: T) {
        let idx = self.index();
        self.deque.insert(idx, value);
        self.raw = self.deque.raw_at(idx);
    }

    /// Removes the element under the cursor and returns it. The cursor ends up on
    /// the element that followed it. Returns `None` at the end position.
    pub fn remove_current(&mut self) -> Option<T> {
        let idx = self.index();
        let val = self.deque.remove(idx)?;
        self.raw = self.deque.raw_at(idx);
        Some(val)
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    #[inline]
    fn from(cursor: CursorMut<'a, T>) -> Self {
        Cursor::new(cursor.raw, cursor.deque)
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for CursorMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.index()).field(&self.get()).finish()
    }
}

unsafe impl<'a, T: Send> Send for CursorMut<'a, T> {}

unsafe impl<'a, T: Sync> Sync for CursorMut<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockMap;

    fn raw_cursors(map: &BlockMap<u32>) -> (RawCursor<u32>, RawCursor<u32>) {
        unsafe { (RawCursor::new(map.first(), 0), RawCursor::new(map.last(), BLOCK_SIZE - 1)) }
    }

    #[test]
    fn increment_crosses_block_boundary() {
        let map = BlockMap::<u32>::with_blocks(2);
        let (first, _) = raw_cursors(&map);
        let mut cur = unsafe { first.offset(BLOCK_SIZE as isize - 1) };
        unsafe { cur.inc() };
        assert_eq!(cur.offset, 0);
        assert_eq!(cur.block, unsafe { map.first().add(1) });
        assert_eq!(cur - first, BLOCK_SIZE as isize);

        unsafe { cur.dec() };
        assert_eq!(cur.offset, BLOCK_SIZE - 1);
        assert_eq!(cur.block, map.first());
    }

    #[test]
    fn negative_offsets_floor_into_earlier_blocks() {
        let map = BlockMap::<u32>::with_blocks(4);
        let (first, last) = raw_cursors(&map);
        let mid = unsafe { first.offset(2 * BLOCK_SIZE as isize + 3) };

        let back = unsafe { mid.offset(-4) };
        assert_eq!(back.offset, BLOCK_SIZE - 1);
        assert_eq!(back - first, 2 * BLOCK_SIZE as isize - 1);

        let far = unsafe { mid.offset(-(BLOCK_SIZE as isize) * 2 - 3) };
        assert_eq!(far, first);

        let end = unsafe { mid.offset(BLOCK_SIZE as isize * 2 - 4) };
        assert_eq!(end, last);
    }

    #[test]
    fn ordering_and_distance_agree() {
        let map = BlockMap::<u32>::with_blocks(3);
        let (first, last) = raw_cursors(&map);
        for i in 0..(3 * BLOCK_SIZE as isize) {
            let a = unsafe { first.offset(i) };
            assert_eq!(a - first, i);
            assert_eq!(last - a, 3 * BLOCK_SIZE as isize - 1 - i);
            assert!(a >= first && a <= last);
            let slot = unsafe { (*map.first().add(i as usize / BLOCK_SIZE)).as_ptr() };
            assert_eq!(a.slot(), unsafe { slot.add(i as usize % BLOCK_SIZE) });
        }
        let a = unsafe { first.offset(40) };
        let b = unsafe { first.offset(41) };
        assert!(a < b);
        assert_eq!(a - b, -1);
    }

    #[test]
    fn cursor_walks_the_live_range() {
        let deque: Deque<i32> = (0..100).collect();
        let mut cursor = deque.cursor(0).unwrap();
        assert!(!cursor.move_prev());
        for i in 0..100 {
            assert_eq!(cursor.get(), Some(&i));
            assert_eq!(cursor.index(), i as usize);
            assert!(cursor.move_next());
        }
        assert_eq!(cursor.get(), None);
        assert!(!cursor.move_next());
        assert!(cursor.move_prev());
        assert_eq!(cursor.get(), Some(&99));
    }

    #[test]
    fn cursor_seek_is_bounded() {
        let deque: Deque<i32> = (0..70).collect();
        let mut cursor = deque.cursor(10).unwrap();
        assert!(cursor.seek(45));
        assert_eq!(cursor.get(), Some(&55));
        assert!(cursor.seek(-50));
        assert_eq!(cursor.get(), Some(&5));
        assert!(!cursor.seek(-6));
        assert!(!cursor.seek(66));
        assert_eq!(cursor.index(), 5);
        assert!(cursor.seek(65));
        assert_eq!(cursor.get(), None);
        assert!(!cursor.seek(isize::MAX));

        let start = deque.cursor(0).unwrap();
        assert_eq!(cursor - start, 70);
        assert!(start < cursor);
        assert!(deque.cursor(71).is_none());
    }

    #[test]
    fn cursor_mut_edits_in_place() {
        let mut deque: Deque<i32> = (0..5).collect();
        let mut cursor = deque.cursor_mut(2).unwrap();
        *cursor.get_mut().unwrap() *= 10;
        cursor.insert(7);
        assert_eq!(cursor.get(), Some(&7));
        assert!(cursor.move_next());
        assert_eq!(cursor.remove_current(), Some(20));
        assert_eq!(cursor.get(), Some(&3));

        let cursor: Cursor<'_, i32> = cursor.into();
        assert_eq!(cursor.index(), 3);
        assert_eq!(deque, [0, 1, 7, 3, 4]);
    }

    #[test]
    fn cursor_mut_survives_growth() {
        let mut deque: Deque<usize> = Deque::new();
        let mut cursor = deque.cursor_mut(0).unwrap();
        for i in 0..500 {
            cursor.insert(i);
            assert!(cursor.move_next());
        }
        assert_eq!(cursor.get(), None);
        assert_eq!(cursor.index(), 500);
        assert!(deque.iter().copied().eq(0..500));
    }
}

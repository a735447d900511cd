use std::{
    alloc::{self, handle_alloc_error, Layout},
    mem,
    ptr::NonNull,
};

/// Number of element slots in every block.
pub const BLOCK_SIZE: usize = 32;

/// Factor by which the block-pointer array grows when head or tail room runs out.
pub const GROWTH_FACTOR: usize = 3;

/// The block-pointer array: an ordered run of independently allocated blocks of
/// `BLOCK_SIZE` uninitialized slots each.
///
/// A `BlockMap` only ever deals in raw memory. It never constructs or drops a `T`;
/// whoever owns the map is responsible for dropping live elements before the map
/// itself is dropped.
pub(crate) struct BlockMap<T> {
    blocks: Vec<NonNull<T>>,
}

impl<T> BlockMap<T> {
    #[inline]
    fn block_layout() -> Layout {
        match Layout::array::<T>(BLOCK_SIZE) {
            Ok(l) if l.size() <= isize::MAX as usize => l,
            _ => panic!("capacity overflow"),
        }
    }

    #[inline]
    fn allocate_block() -> NonNull<T> {
        if mem::size_of::<T>() == 0 {
            return NonNull::dangling();
        }
        let layout = Self::block_layout();
        // SAFETY: T is not a ZST, so the layout has a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) };
        match NonNull::new(ptr) {
            Some(ptr) => ptr.cast(),
            None => handle_alloc_error(layout),
        }
    }

    /// # Safety
    /// `block` must come from `allocate_block` and must not be used afterwards.
    #[inline]
    unsafe fn free_block(block: NonNull<T>) {
        if mem::size_of::<T>() != 0 {
            alloc::dealloc(block.as_ptr().cast(), Self::block_layout());
        }
    }

    pub(crate) fn with_blocks(n: usize) -> Self {
        let mut this = Self { blocks: Vec::with_capacity(n) };
        this.allocate(n);
        this
    }

    /// Appends `n` fresh blocks. If an allocation fails halfway, the blocks
    /// allocated so far are already owned by `self` and get freed with it.
    fn allocate(&mut self, n: usize) {
        for _ in 0..n {
            self.blocks.push(Self::allocate_block());
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub(crate) fn first(&self) -> *const NonNull<T> {
        self.blocks.as_ptr()
    }

    /// # Panics
    /// Panics if the map holds no blocks. Every `Deque` keeps at least one.
    #[inline]
    pub(crate) fn last(&self) -> *const NonNull<T> {
        assert!(!self.blocks.is_empty());
        // SAFETY: the map is non-empty, so `len - 1` is in bounds.
        unsafe { self.blocks.as_ptr().add(self.blocks.len() - 1) }
    }

    /// Rebuilds the block-pointer array at `GROWTH_FACTOR` times its size.
    ///
    /// The existing blocks end up in the middle third, in order, so every element
    /// stays where it is. The outer thirds are freshly allocated. Returns the
    /// number of blocks added in front of the old ones.
    ///
    /// Any raw cursor into the old array is invalidated.
    #[cold]
    pub(crate) fn grow(&mut self) -> usize {
        let n = self.blocks.len();
        let new_len = n.checked_mul(GROWTH_FACTOR).expect("capacity overflow");
        let shift = (GROWTH_FACTOR - 1) / 2 * n;
        let new_cap_bytes = new_len.checked_mul(BLOCK_SIZE * mem::size_of::<T>());
        if new_cap_bytes.map_or(true, |b| b > isize::MAX as usize) {
            panic!("capacity overflow");
        }

        // Allocate everything before touching `self`, so a failure leaves the
        // current array intact and frees whatever was allocated up to then.
        let mut head = Self::with_blocks(shift);
        let mut tail = Self::with_blocks(new_len - shift - n);
        let mut blocks = Vec::with_capacity(new_len);

        blocks.append(&mut head.blocks);
        blocks.append(&mut self.blocks);
        blocks.append(&mut tail.blocks);
        self.blocks = blocks;

        tracing::trace!(old_blocks = n, new_blocks = new_len, "rebuilt deque block map");
        shift
    }
}

impl<T> Drop for BlockMap<T> {
    fn drop(&mut self) {
        for &block in &self.blocks {
            // SAFETY: every block in the map was produced by allocate_block and
            // is owned exclusively by this map.
            unsafe { Self::free_block(block) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_keeps_existing_blocks_in_the_middle() {
        let mut map = BlockMap::<u64>::with_blocks(2);
        let old: Vec<_> = map.blocks.clone();

        let shift = map.grow();
        assert_eq!(shift, 2);
        assert_eq!(map.len(), 6);
        assert_eq!(&map.blocks[2..4], &old[..]);
        for fresh in map.blocks[..2].iter().chain(&map.blocks[4..]) {
            assert!(!old.contains(fresh));
        }

        map.grow();
        assert_eq!(map.len(), 18);
        assert_eq!(&map.blocks[8..10], &old[..]);
    }

    #[test]
    fn grow_replaces_the_pointer_array() {
        let mut map = BlockMap::<u8>::with_blocks(3);
        let before = map.first();
        map.grow();
        assert_ne!(before, map.first());
    }

    #[test]
    fn zero_sized_blocks_never_allocate() {
        let mut map = BlockMap::<()>::with_blocks(3);
        assert!(map.blocks.iter().all(|&b| b == NonNull::dangling()));
        map.grow();
        assert_eq!(map.len(), 9);
    }

    #[test]
    fn last_points_at_final_block() {
        let map = BlockMap::<i32>::with_blocks(4);
        let last = map.last();
        assert_eq!(unsafe { *last }, map.blocks[3]);
        assert_eq!(unsafe { last.offset_from(map.first()) }, 3);
    }
}

use core::{fmt, iter::FusedIterator, marker::PhantomData};

use crate::{cursor::RawCursor, Deque};

/// Shared iterator over a [`Deque`], front to back. Use `.rev()` for back to front.
pub struct Iter<'a, T> {
    front: RawCursor<T>,
    back: RawCursor<T>,
    _marker: PhantomData<&'a T>,
}

/// Mutable iterator over a [`Deque`].
pub struct IterMut<'a, T> {
    front: RawCursor<T>,
    back: RawCursor<T>,
    _marker: PhantomData<&'a mut T>,
}

/// Owning iterator over a [`Deque`].
#[derive(Clone, Debug)]
pub struct IntoIter<T>(pub(crate) Deque<T>);

impl<'a, T> Iter<'a, T> {
    /// `front..back` must be the live range (or a subrange of it) of a deque
    /// borrowed for `'a`.
    #[inline]
    pub(crate) fn new(front: RawCursor<T>, back: RawCursor<T>) -> Self {
        Self { front, back, _marker: PhantomData }
    }
}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    pub(crate) fn new(front: RawCursor<T>, back: RawCursor<T>) -> Self {
        Self { front, back, _marker: PhantomData }
    }

    #[inline]
    pub fn as_iter(&self) -> Iter<'_, T> {
        Iter::new(self.front, self.back)
    }
}

// Every cursor move below stays inside [front, back], which lies inside the live
// range of the borrowed deque, so the raw cursor operations are in bounds.

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = unsafe { &*self.front.slot() };
        unsafe { self.front.inc() };
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.len() {
            self.front = self.back;
            return None;
        }
        self.front = unsafe { self.front.offset(n as isize) };
        self.next()
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        unsafe { self.back.dec() };
        Some(unsafe { &*self.back.slot() })
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.len() {
            self.back = self.front;
            return None;
        }
        self.back = unsafe { self.back.offset(-(n as isize)) };
        self.next_back()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        (self.back - self.front) as usize
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> Clone for Iter<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self::new(self.front, self.back)
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct IterFormatter<'a, 'b, T>(&'b Iter<'a, T>);

        impl<'a, 'b, T: fmt::Debug> fmt::Debug for IterFormatter<'a, 'b, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.0.clone()).finish()
            }
        }

        f.debug_tuple("Iter").field(&IterFormatter(self)).finish()
    }
}

unsafe impl<'a, T: Sync> Send for Iter<'a, T> {}

unsafe impl<'a, T: Sync> Sync for Iter<'a, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = unsafe { &mut *self.front.slot() };
        unsafe { self.front.inc() };
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.len() {
            self.front = self.back;
            return None;
        }
        self.front = unsafe { self.front.offset(n as isize) };
        self.next()
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        unsafe { self.back.dec() };
        Some(unsafe { &mut *self.back.slot() })
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.len() {
            self.back = self.front;
            return None;
        }
        self.back = unsafe { self.back.offset(-(n as isize)) };
        self.next_back()
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        (self.back - self.front) as usize
    }
}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

impl<'a, T: fmt::Debug> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct IterMutFormatter<'a, 'b, T>(&'b IterMut<'a, T>);

        impl<'a, 'b, T: fmt::Debug> fmt::Debug for IterMutFormatter<'a, 'b, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.0.as_iter()).finish()
            }
        }

        f.debug_tuple("IterMut").field(&IterMutFormatter(self)).finish()
    }
}

unsafe impl<'a, T: Send> Send for IterMut<'a, T> {}

unsafe impl<'a, T: Sync> Sync for IterMut<'a, T> {}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

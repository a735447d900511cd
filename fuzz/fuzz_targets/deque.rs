#![no_main]
use std::collections::VecDeque;

use arbitrary::Arbitrary;
use block_deque::Deque;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    At(usize),
    Back,
    Clear,
    Clone,
    CloneFrom,
    Contains(i32),
    Cursor(usize, Vec<CursorOp>),
    Equals,
    Erase(usize),
    Front,
    Get(usize),
    Insert(usize, i32),
    IsEmpty,
    Iter,
    Len,
    Nth(usize),
    PopBack,
    PopFront,
    PushBack(i32),
    PushFront(i32),
    Remove(usize),
    Swap(usize, usize),
    Truncate(usize),
}

const MAX_LEN: usize = 1000000;

#[derive(Arbitrary, Debug)]
enum CursorOp {
    Next,
    Prev,
    Seek(isize),
    Insert(i32),
    RemoveCurrent,
}

fuzz_target!(|data: Vec<Op>| { fuzz(&data) });

fn fuzz(data: &[Op]) {
    let (mut d1, mut d2) = (Deque::<i32>::new(), Deque::<i32>::new());
    let (mut v1, mut v2) = (VecDeque::<i32>::new(), VecDeque::<i32>::new());

    for op in data {
        match op {
            &Op::At(i) => {
                assert_eq!(d1.at(i).ok(), v1.get(i));
                assert_eq!(d1.at(i).is_err(), i >= v1.len());
                assert_eq!(d2.at(i).ok(), v2.get(i));
            }
            Op::Back => {
                assert_eq!(d1.back(), v1.back());
                assert_eq!(d2.back(), v2.back());
            }
            Op::Clear => {
                d1.clear();
                d2.clear();
                v1.clear();
                v2.clear();
            }
            Op::Clone => {
                d2 = d1.clone();
                v2 = v1.clone();
            }
            Op::CloneFrom => {
                d1.clone_from(&d2);
                v1.clone_from(&v2);
            }
            Op::Contains(i) => {
                assert_eq!(d1.contains(i), v1.contains(i));
                assert_eq!(d2.contains(i), v2.contains(i));
            }
            Op::Cursor(start, ops) => {
                let start = start % (v1.len() + 1);
                let mut cursor = match d1.cursor_mut(start) {
                    Some(cursor) => cursor,
                    None => panic!("cursor at {start} missing from deque of length {}", v1.len()),
                };
                let mut idx = start;
                for op in ops {
                    match *op {
                        CursorOp::Next => {
                            assert_eq!(cursor.move_next(), idx < v1.len());
                            idx = (idx + 1).min(v1.len());
                        }
                        CursorOp::Prev => {
                            assert_eq!(cursor.move_prev(), idx > 0);
                            idx = idx.saturating_sub(1);
                        }
                        CursorOp::Seek(delta) => {
                            let target = (idx as isize).checked_add(delta);
                            let valid = matches!(target, Some(t) if t >= 0 && t as usize <= v1.len());
                            assert_eq!(cursor.seek(delta), valid);
                            if valid {
                                idx = (idx as isize + delta) as usize;
                            }
                        }
                        CursorOp::Insert(x) => {
                            if v1.len() < MAX_LEN {
                                cursor.insert(x);
                                v1.insert(idx, x);
                            }
                        }
                        CursorOp::RemoveCurrent => {
                            assert_eq!(cursor.remove_current(), v1.remove(idx));
                        }
                    }
                    assert_eq!(cursor.index(), idx);
                    assert_eq!(cursor.get(), v1.get(idx));
                }
                assert!(d1.iter().eq(v1.iter()));
            }
            Op::Equals => {
                assert!(d1.iter().eq(v1.iter()));
                assert!(d2.iter().eq(v2.iter()));
            }
            &Op::Erase(i) => {
                if !v1.is_empty() {
                    let i1 = i % v1.len();
                    d1.erase(i1);
                    v1.remove(i1);
                }
                if !v2.is_empty() {
                    let i2 = i % v2.len();
                    d2.erase(i2);
                    v2.remove(i2);
                }
            }
            Op::Front => {
                assert_eq!(d1.front(), v1.front());
                assert_eq!(d2.front(), v2.front());
            }
            Op::Get(i) => {
                assert_eq!(d1.get(*i), v1.get(*i));
                assert_eq!(d2.get(*i), v2.get(*i));
                let i1 = *i & v1.len();
                let i2 = *i & v2.len();
                assert_eq!(d1.get(i1), v1.get(i1));
                assert_eq!(d2.get(i2), v2.get(i2));
            }
            &Op::Insert(i, a) => {
                if v1.len() < MAX_LEN {
                    let i1 = i % (v1.len() + 1);
                    d1.insert(i1, a);
                    v1.insert(i1, a);
                }
                if v2.len() < MAX_LEN {
                    let i2 = i % (v2.len() + 1);
                    d2.insert(i2, a);
                    v2.insert(i2, a);
                }
            }
            Op::IsEmpty => {
                assert_eq!(d1.is_empty(), v1.is_empty());
                assert_eq!(d2.is_empty(), v2.is_empty());
            }
            Op::Iter => {
                let mut d1_iter = d1.iter();
                let mut v1_iter = v1.iter();
                while v1_iter.len() > 0 {
                    if fastrand::bool() {
                        assert_eq!(d1_iter.next(), v1_iter.next());
                    } else {
                        assert_eq!(d1_iter.next_back(), v1_iter.next_back());
                    }
                    assert_eq!(d1_iter.len(), v1_iter.len());
                }

                let mut d2_iter = d2.iter_mut();
                let mut v2_iter = v2.iter_mut();
                while v2_iter.len() > 0 {
                    if fastrand::bool() {
                        assert_eq!(d2_iter.next(), v2_iter.next());
                    } else {
                        assert_eq!(d2_iter.next_back(), v2_iter.next_back());
                    }
                }
            }
            Op::Len => {
                assert_eq!(d1.len(), v1.len());
                assert_eq!(d2.len(), v2.len());
            }
            &Op::Nth(n) => {
                let n = n % (v1.len() + 2);
                assert_eq!(d1.iter().nth(n), v1.iter().nth(n));
                assert_eq!(d1.iter().nth_back(n), v1.iter().nth_back(n));
            }
            Op::PopBack => {
                assert_eq!(d1.pop_back(), v1.pop_back());
                assert_eq!(d2.pop_back(), v2.pop_back());
            }
            Op::PopFront => {
                assert_eq!(d1.pop_front(), v1.pop_front());
                assert_eq!(d2.pop_front(), v2.pop_front());
            }
            Op::PushBack(i) => {
                if v1.len() < MAX_LEN {
                    d1.push_back(*i);
                    v1.push_back(*i);
                }
                if v2.len() < MAX_LEN {
                    d2.push_back(*i);
                    v2.push_back(*i);
                }
            }
            Op::PushFront(i) => {
                if v1.len() < MAX_LEN {
                    d1.push_front(*i);
                    v1.push_front(*i);
                }
                if v2.len() < MAX_LEN {
                    d2.push_front(*i);
                    v2.push_front(*i);
                }
            }
            &Op::Remove(i) => {
                assert_eq!(d1.remove(i), v1.remove(i));
                if !v2.is_empty() {
                    let i2 = i % v2.len();
                    assert_eq!(d2.remove(i2), v2.remove(i2));
                }
            }
            Op::Swap(i, j) => {
                if !v1.is_empty() {
                    let i1 = i % v1.len();
                    let j1 = j % v1.len();
                    d1.swap(i1, j1);
                    v1.swap(i1, j1);
                }

                if !v2.is_empty() {
                    let j2 = j % v2.len();
                    let i2 = i % v2.len();
                    d2.swap(i2, j2);
                    v2.swap(i2, j2);
                }
            }
            &Op::Truncate(i) => {
                d1.truncate(i);
                v1.truncate(i);
                d2.truncate(i);
                v2.truncate(i);
            }
        }
    }
}

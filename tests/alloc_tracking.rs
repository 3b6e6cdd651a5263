//! Counts live heap allocations per thread to check that the table releases
//! exactly what it allocated, and releases it once.

use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
};

use chaintable::{ChainTable, Key};

struct TrackingAlloc;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for TrackingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            let _ = LIVE.try_with(|live| live.set(live.get() + 1));
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        let _ = LIVE.try_with(|live| live.set(live.get() - 1));
    }
}

#[global_allocator]
static GLOBAL: TrackingAlloc = TrackingAlloc;

fn live() -> isize {
    LIVE.with(Cell::get)
}

fn table() -> ChainTable<Box<u64>, fn(Key) -> usize> {
    fn mod16(key: Key) -> usize {
        (key % 16) as usize
    }
    ChainTable::new(mod16 as fn(Key) -> usize, 16).unwrap()
}

const N: u32 = 1000;

#[test]
fn drop_releases_every_entry_and_value() {
    let before = live();

    let mut table = table();
    let empty = live();
    assert!(empty > before);

    for key in 0..N {
        table.insert(key, Box::new(u64::from(key)));
    }
    // one node and one boxed value per entry
    assert_eq!(live() - empty, 2 * N as isize);

    drop(table);
    assert_eq!(live(), before);
}

#[test]
fn remove_transfers_value_and_delete_releases_it() {
    let mut table = table();
    for key in 0..N {
        table.insert(key, Box::new(u64::from(key)));
    }
    let full = live();

    // node released, value now owned here
    let removed = table.remove(7);
    assert_eq!(live(), full - 1);
    drop(removed);
    assert_eq!(live(), full - 2);

    table.delete(8);
    assert_eq!(live(), full - 4);

    // absent keys release nothing
    assert_eq!(table.remove(7), None);
    table.delete(8);
    assert_eq!(live(), full - 4);
}

#[test]
fn overwrite_hands_back_old_value() {
    let mut table = table();
    table.insert(3, Box::new(1));
    let one_entry = live();

    let old = table.insert(3, Box::new(2));
    // new value allocated, old value still alive in `old`
    assert_eq!(live(), one_entry + 1);
    assert_eq!(old.as_deref(), Some(&1));
    drop(old);
    assert_eq!(live(), one_entry);
}

#[test]
fn clear_releases_entries_but_keeps_buckets() {
    let before = live();
    let mut table = table();
    let empty = live();

    for key in 0..N {
        table.insert(key, Box::new(u64::from(key)));
    }
    table.clear();
    assert_eq!(live(), empty);
    assert_eq!(table.bucket_count(), 16);

    drop(table);
    assert_eq!(live(), before);
}

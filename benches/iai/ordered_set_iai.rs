//! IAI-Callgrind benchmark for `OrderedSet`.
//!
//! Measures instruction counts for construction, removal from the front
//! (worst-case re-indexing) and symmetric difference.

use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use ordered_set::OrderedSet;
use std::hint::black_box;

// Setup functions for different data sizes
fn setup_vec_1000() -> Vec<i32> {
    (0..1000).rev().collect()
}

fn setup_vec_10000() -> Vec<i32> {
    (0..10000).rev().collect()
}

fn setup_set_1000() -> OrderedSet<i32> {
    (0..1000).collect()
}

fn setup_set_10000() -> OrderedSet<i32> {
    (0..10000).collect()
}

fn setup_pair_1000() -> (OrderedSet<i32>, OrderedSet<i32>) {
    ((0..1000).collect(), (500..1500).collect())
}

// construction benchmarks
#[library_benchmark]
#[bench::with_setup(setup_vec_1000())]
fn collect_1000(elements: Vec<i32>) -> OrderedSet<i32> {
    black_box(black_box(elements).into_iter().collect())
}

#[library_benchmark]
#[bench::with_setup(setup_vec_10000())]
fn collect_10000(elements: Vec<i32>) -> OrderedSet<i32> {
    black_box(black_box(elements).into_iter().collect())
}

// removal benchmarks
#[library_benchmark]
#[bench::with_setup(setup_set_1000())]
fn pop_first_1000(mut set: OrderedSet<i32>) -> OrderedSet<i32> {
    let _ = black_box(set.pop_first());
    set
}

#[library_benchmark]
#[bench::with_setup(setup_set_10000())]
fn pop_first_10000(mut set: OrderedSet<i32>) -> OrderedSet<i32> {
    let _ = black_box(set.pop_first());
    set
}

#[library_benchmark]
#[bench::with_setup(setup_set_10000())]
fn pop_last_10000(mut set: OrderedSet<i32>) -> OrderedSet<i32> {
    let _ = black_box(set.pop());
    set
}

// algebra benchmarks
#[library_benchmark]
#[bench::with_setup(setup_pair_1000())]
fn symmetric_difference_1000(sets: (OrderedSet<i32>, OrderedSet<i32>)) -> OrderedSet<i32> {
    let (left, right) = sets;
    black_box(left.symmetric_difference(black_box(&right)))
}

library_benchmark_group!(
    name = ordered_set_group;
    benchmarks =
        collect_1000, collect_10000,
        pop_first_1000, pop_first_10000, pop_last_10000,
        symmetric_difference_1000
);

main!(library_benchmark_groups = ordered_set_group);

//! Demonstrates set reconciliation between two Invertible Bloom Filters.
//!
//! Run with `cargo run --example reconcile_demo`.

#![allow(clippy::print_stdout)]

use ibf_oxide::ibf::InvertibleBloomFilter;

fn main() {
    let alice_set: Vec<u64> = vec![1, 2, 3, 4, 5, 100];
    let bob_set: Vec<u64> = vec![2, 3, 4, 5, 6, 200];

    let d = 10;
    let k = 3;

    let mut alice = InvertibleBloomFilter::new(d, k, None, None).expect("valid parameters");
    let mut bob = InvertibleBloomFilter::new(d, k, None, None).expect("valid parameters");

    alice.encode(alice_set.clone()).expect("encode succeeds");
    bob.encode(bob_set.clone()).expect("encode succeeds");

    println!("Alice's set: {:?}", alice_set);
    println!("Bob's set:   {:?}", bob_set);

    let mut diff = InvertibleBloomFilter::new(d, k, None, None).expect("valid parameters");
    alice.subtract(&bob, &mut diff).expect("matching dimensions");

    match diff.decode() {
        Ok(result) => {
            println!("Only Alice has: {:?}", result.missing_in_b);
            println!("Only Bob has:   {:?}", result.missing_in_a);
        }
        Err(err) => {
            println!("Could not reconcile within this filter's capacity: {err}");
        }
    }
}

//! Demonstration driver: build a set of integers, exercise duplicate
//! insertion and removal, and print the contents in ascending order.

use skipset::SkipSet;

fn main() {
    let mut set = SkipSet::new();

    assert!(set.insert(10));
    assert!(set.insert(20));
    assert!(!set.insert(10));

    assert!(set.contains(&20));
    assert!(!set.contains(&30));

    assert!(set.remove(&10));
    assert!(!set.remove(&10));

    for value in &set {
        println!("{value}");
    }
}

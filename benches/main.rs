#[macro_use]
extern crate criterion;

mod set;

criterion_group!(benches, crate::set::benchmark);
criterion_main!(benches);

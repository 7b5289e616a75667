mod operations;

criterion::criterion_main!(operations::inserts, operations::lookups);

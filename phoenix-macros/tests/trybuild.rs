#![allow(missing_docs)]

#[test]
fn ui() {
    if std::env::var_os("CARGO_TARPAULIN").is_some() {
        return;
    }

    let tests = trybuild::TestCases::new();
    tests.pass("tests/ui/populate_ok.rs");
    tests.pass("tests/ui/populate_tuple_ok.rs");
    tests.compile_fail("tests/ui/populate_enum_invalid.rs");
    tests.pass("tests/ui/inject_ok.rs");
}

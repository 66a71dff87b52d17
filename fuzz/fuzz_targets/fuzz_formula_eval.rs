#![no_main]

use libfuzzer_sys::fuzz_target;

use ces_formula::Formula;

// Arbitrary formula text must either fail to parse or evaluate to a finite
// value or a domain error, for any score.
fuzz_target!(|data: &[u8]| {
    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(formula) = Formula::parse(src) else {
        return;
    };
    for x in [0.0, 1.0, 0.5, 42.0, 1e9, f64::MIN_POSITIVE] {
        if let Ok(value) = formula.eval(x) {
            assert!(value.is_finite(), "{src} at {x} gave {value}");
        }
    }
    // The printed tree parses back to a formula with the same value.
    let reparsed = Formula::parse(&formula.expr().to_string());
    if let Ok(reparsed) = reparsed {
        let (a, b) = (formula.eval(2.0), reparsed.eval(2.0));
        if let (Ok(a), Ok(b)) = (a, b) {
            assert!(a == b || (a - b).abs() <= 1e-9 * a.abs().max(1.0));
        }
    }
});

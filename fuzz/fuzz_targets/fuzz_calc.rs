#![no_main]

use calc_demo::Calc;
use frontkit::ParseConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };

    let config = ParseConfig::new()
        .with_max_recursion_depth(32)
        .with_max_tokens(512);
    let mut calc = Calc::with_config(config);

    if let Err(err) = calc.evaluate(src) {
        let _ = err.to_string();
    }
    // Every binding made during evaluation is gone again.
    assert!(calc.symbols().iter().all(|sym| sym.depth() == 0));

    if let Ok(expr) = calc.parse(src) {
        let _ = expr.sexp(calc.symbols()).to_string();
    }
});

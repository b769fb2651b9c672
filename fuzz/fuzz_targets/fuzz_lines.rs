#![no_main]

use arbitrary::Arbitrary;
use frontkit::{Buffer, LineMap, Location};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    probes: Vec<Location>,
}

fuzz_target!(|input: Input| {
    let text = input.text.as_str();
    let buffer = Buffer::new(text);

    // Lines recorded one terminator at a time must match a full scan.
    let mut streamed = LineMap::new();
    let mut start = 0;
    streamed.start_line(start);
    for (i, _) in text.match_indices('\n') {
        streamed.finish_line(start, i);
        start = i + 1;
        streamed.start_line(start);
    }
    streamed.finish_line(start, text.len());
    assert_eq!(&streamed, buffer.lines());

    let mut previous = 0;
    for line in buffer.lines().iter() {
        assert_eq!(line.number(), previous + 1);
        previous = line.number();
        assert!(!buffer.line_text(line).contains('\n'));
    }

    for loc in input.probes {
        match buffer.lines().get(loc) {
            None => assert!(loc.is_none()),
            Some(line) => {
                assert!(line.offset() <= loc.offset());
                assert!(buffer.column_no(loc) >= 1);
                let _ = buffer.location(loc).to_string();
            }
        }
    }
});

use crate::FrameReassembler;

const STREAM: &str = "\
$GPGGA,075909.00,6451.53390,N,14749.78748,W,1,04,8.23,149.4,M,5.8,M,,*75\r\n\
$GPGSA,A,3,27,70,,,,,,,,,,,2.50,1.30,2.14*02\r\n\
\r\n\
\r\n\
garbage without a dollar\r\n\
$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K,A*25\r\n\
$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W,A*07\r\n\
$GPGLL,4916.45,N,12311.12,W,225444,A,A*5c\r\n\
$GPGGA,075909";

fn single_feed(stream: &str, max_line_length: usize) -> Vec<String> {
    FrameReassembler::with_max_line_length(max_line_length)
        .feed(stream)
        .collect()
}

fn chunked_feed(stream: &str, size: usize, max_line_length: usize) -> Vec<String> {
    let mut reassembler = FrameReassembler::with_max_line_length(max_line_length);
    let mut frames = Vec::new();

    for chunk in stream.as_bytes().chunks(size) {
        // the stream is ASCII, so every chunk is valid text
        let chunk = std::str::from_utf8(chunk).unwrap();
        frames.extend(reassembler.feed(chunk));
    }

    frames
}

fn chunked_byte_feed(stream: &[u8], size: usize) -> Vec<String> {
    let mut reassembler = FrameReassembler::new();
    let mut frames = Vec::new();

    for chunk in stream.chunks(size) {
        frames.extend(reassembler.feed_bytes(chunk));
    }

    frames
}

#[test]
fn test_every_chunk_size() {
    let expected = single_feed(STREAM, 1024);
    assert_eq!(expected.len(), 6);
    assert_eq!(expected[2], "garbage without a dollar");

    for size in 1..=STREAM.len() {
        assert_eq!(chunked_feed(STREAM, size, 1024), expected, "chunk size {size}");
        assert_eq!(
            chunked_byte_feed(STREAM.as_bytes(), size),
            expected,
            "byte chunk size {size}"
        );
    }
}

#[test]
fn test_every_chunk_size_with_overlong_lines() {
    // every sentence is longer than 40 bytes, the garbage line is not
    let expected = single_feed(STREAM, 40);
    assert_eq!(expected, ["garbage without a dollar"]);

    for size in 1..=STREAM.len() {
        assert_eq!(chunked_feed(STREAM, size, 40), expected, "chunk size {size}");
    }
}

#[test]
fn test_every_chunk_size_with_multibyte_characters() {
    let stream = "$GPTXT,01,01,02,Zürich \u{1f6f0}*00\r\n$GPTXT,01,01,02,ok*00\r\n";
    let expected = single_feed(stream, 1024);
    assert_eq!(expected.len(), 2);

    for size in 1..=stream.len() {
        assert_eq!(
            chunked_byte_feed(stream.as_bytes(), size),
            expected,
            "byte chunk size {size}"
        );
    }
}

#[test]
fn test_every_split_point() {
    let expected = single_feed(STREAM, 1024);

    for split in 0..=STREAM.len() {
        let (head, tail) = STREAM.split_at(split);
        let mut reassembler = FrameReassembler::new();

        let mut frames: Vec<_> = reassembler.feed(head).collect();
        frames.extend(reassembler.feed(tail));

        assert_eq!(frames, expected, "split at {split}");
        assert_eq!(reassembler.pending(), "$GPGGA,075909");
    }
}

use super::*;

fn frame(delay_ms: u32, index: u8) -> IndexedFrame {
    IndexedFrame {
        width: 2,
        height: 2,
        palette: vec![[255, 255, 255], [0, 0, 0]],
        indices: vec![index; 4],
        delay_ms,
    }
}

fn cfg(frame_count: u64) -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        frame_count,
        delay_ms: 100,
    }
}

#[test]
fn delay_rounds_to_centiseconds() {
    assert_eq!(delay_centis(100), 10);
    assert_eq!(delay_centis(67), 7);
    assert_eq!(delay_centis(64), 6);
    assert_eq!(delay_centis(0), 0);
}

#[test]
fn stream_is_a_looping_gif_with_per_frame_delays() {
    let mut sink = GifSink::new();
    sink.begin(cfg(2)).unwrap();
    sink.push_frame(0, &frame(100, 0)).unwrap();
    sink.push_frame(1, &frame(67, 1)).unwrap();
    sink.end().unwrap();
    let bytes = sink.into_bytes().unwrap();

    assert!(bytes.starts_with(b"GIF89a"));
    assert_eq!(bytes.last(), Some(&0x3B));
    // NETSCAPE2.0 application extension carries the loop count.
    assert!(bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));

    let mut opts = ::gif::DecodeOptions::new();
    opts.set_color_output(::gif::ColorOutput::Indexed);
    let mut decoder = opts.read_info(bytes.as_slice()).unwrap();
    let mut delays = Vec::new();
    while let Some(f) = decoder.read_next_frame().unwrap() {
        assert!(f.palette.is_some());
        delays.push(f.delay);
    }
    assert_eq!(delays, [10, 7]);
}

#[test]
fn misuse_is_reported() {
    let mut sink = GifSink::new();
    assert!(sink.push_frame(0, &frame(100, 0)).is_err());
    assert!(sink.end().is_err());

    sink.begin(cfg(1)).unwrap();
    let mut wrong = frame(100, 0);
    wrong.width = 3;
    assert!(sink.push_frame(0, &wrong).is_err());
    sink.push_frame(1, &frame(100, 0)).unwrap();
    assert!(sink.push_frame(1, &frame(100, 0)).is_err());
}

#[test]
fn unfinished_stream_has_no_bytes() {
    let mut sink = GifSink::new();
    sink.begin(cfg(1)).unwrap();
    assert!(sink.into_bytes().is_err());
}

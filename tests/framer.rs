mod common;

use std::fs::File;

use common::{random_chunks, read_fixture, MIXED_STREAM_FRAMES};
use gnssaux::{
    decode_auxiliary, decode_security, read_frames, AuxiliaryMessage, Frame, Framer,
    FramerConfig, SecurityMessage,
};
use rand::SeedableRng;
use test_case::test_case;

fn summarize(frames: &[Frame]) -> Vec<(u16, usize)> {
    frames.iter().map(|f| (f.message_type(), f.len())).collect()
}

#[test]
fn mixed_stream_in_one_feed() {
    let dat = read_fixture("mixed_stream.dat");
    let mut framer = Framer::default();
    let frames = framer.feed(&dat).unwrap();

    assert_eq!(summarize(&frames), MIXED_STREAM_FRAMES);
    assert_eq!(framer.buffered(), 0);
}

#[test_case(1; "single bytes")]
#[test_case(7; "small chunks")]
#[test_case(100; "large chunks")]
fn chunking_does_not_change_frames(max_chunk: usize) {
    let dat = read_fixture("mixed_stream.dat");
    let expected = Framer::default().feed(&dat).unwrap();

    let mut rng = rand::rngs::StdRng::seed_from_u64(max_chunk as u64);
    for _ in 0..20 {
        let mut framer = Framer::default();
        let mut frames = Vec::new();
        for chunk in random_chunks(&mut rng, &dat, max_chunk) {
            frames.extend(framer.feed(&chunk).unwrap());
        }
        assert_eq!(frames, expected);
        assert_eq!(framer.buffered(), 0);
    }
}

#[test]
fn every_frame_in_stream_decodes() {
    let dat = read_fixture("mixed_stream.dat");
    let frames = Framer::default().feed(&dat).unwrap();

    for frame in &frames {
        match frame.message_type() {
            0x0201 | 0x0202 => {
                decode_auxiliary(&frame.data).unwrap();
            }
            _ => {
                decode_security(&frame.data).unwrap();
            }
        }
    }

    match decode_auxiliary(&frames[0].data).unwrap() {
        AuxiliaryMessage::PositionTime(pt) => {
            assert_eq!(pt.pos_x, 1);
            assert_eq!((pt.week, pt.seconds), (1024, 345_600));
        }
        other => panic!("expected position/time, got {other:?}"),
    }
    match decode_security(&frames[4].data).unwrap() {
        SecurityMessage::InterferenceDetection(det) => {
            assert_eq!(det.raim_faults.len(), 2);
            assert_eq!(det.jammers.len(), 1);
            assert_eq!(det.jammers[0].frequency, 1_561_098);
            assert_eq!(det.spoofed_signals.len(), 3);
            assert_eq!(det.satellite_count, 9);
        }
        other => panic!("expected interference detection, got {other:?}"),
    }
}

#[test]
fn filter_interference_and_control() {
    let dat = read_fixture("mixed_stream.dat");
    let config = FramerConfig::builder()
        .message_types([0x0105u16, 0x0106])
        .build();
    let frames = Framer::new(config).feed(&dat).unwrap();

    assert_eq!(summarize(&frames), [(0x0106, 14), (0x0105, 69)]);
}

#[test]
fn read_frames_from_file() {
    let file = File::open(common::fixture_path("mixed_stream.dat")).unwrap();
    let frames: Vec<Frame> = read_frames(file, FramerConfig::default())
        .collect::<gnssaux::Result<_>>()
        .unwrap();

    assert_eq!(summarize(&frames), MIXED_STREAM_FRAMES);
}

#[test]
fn resync_after_garbage() {
    let stream = read_fixture("mixed_stream.dat");
    let mut dat = vec![0xde, 0xad, 0xbe, 0xef, 0x00, 0xff, 0xff, 0x00, 0x00];
    dat.extend(&stream);

    let mut framer = Framer::default();
    let err = framer.feed(&dat).unwrap_err();
    assert!(err.is_format());

    assert_eq!(framer.resync(), 9);
    let frames = framer.feed(&[]).unwrap();
    assert_eq!(summarize(&frames), MIXED_STREAM_FRAMES);
}

use super::writer_for;
use crate::geom::point;
use crate::*;

fn encode(version: FormatVersion, text: &str, styles: StyleTriple) -> Vec<u8> {
    let mut w = writer_for(version);
    let mut codec = EdgePathCodec::new();
    codec.write_edges(&mut w, text, styles).unwrap();
    w.into_inner()
}

#[test]
fn square_uses_byte_tier_and_styles_only_once() {
    let text = "!0 0|10 0|10 10|0 10";
    assert_eq!(edges_count(text), 3);

    let bytes = encode(FormatVersion::Cs4, text, StyleTriple::new(1, 0, 0));
    assert_eq!(
        bytes,
        vec![
            0xD0, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0A, 0x00, 0x00, 0x00, //
            0x10, 0x00, 0x00, 0x00, 0x0A, 0x00, //
            0x10, 0x00, 0xF6, 0x00, 0x00, 0x00,
        ]
    );
}

#[test]
fn profiles_without_curve_tags_omit_the_line_tag_byte() {
    let bytes = encode(FormatVersion::Mx, "!0 0|10 0|10 10", StyleTriple::default());
    assert_eq!(
        bytes,
        vec![
            0xD0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0A, 0x00, 0x00, //
            0x10, 0x00, 0x00, 0x00, 0x0A,
        ]
    );
}

#[test]
fn alternate_lines_are_tagged_with_one() {
    let bytes = encode(FormatVersion::Cs3, "!0 0/1 1|2 2", StyleTriple::default());
    assert_eq!(bytes[11], 0x01);
    assert_eq!(bytes[17], 0x00);
    assert_eq!(bytes.len(), 18);
}

#[test]
fn zero_length_line_after_redundant_move_omits_from() {
    let bytes = encode(FormatVersion::Mx, "!0 0|5 5!5 5|5 5", StyleTriple::default());
    assert_eq!(&bytes[11..], &[0x10, 0x00, 0x00, 0x00, 0x00]);
}

#[test]
fn move_away_from_the_pen_writes_a_from_delta() {
    let bytes = encode(FormatVersion::Mx, "!0 0|1 0!20 0|21 0", StyleTriple::default());
    assert_eq!(
        &bytes[11..],
        &[0x11, 0x00, 0x13, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00]
    );
}

#[test]
fn curves_write_control_then_anchor_without_tag() {
    let bytes = encode(FormatVersion::Cs4, "!0 0[10 -5 20 0", StyleTriple::default());
    assert_eq!(
        bytes,
        vec![
            0xD4, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
            0x00, 0x0A, 0x00, 0xFB, //
            0x00, 0x14, 0x00, 0x00,
        ]
    );
}

#[test]
fn selection_mask_interleaves_markers_and_clears_bit_seven() {
    let bytes = encode(FormatVersion::Cs4, "!0 0S5|1 0", StyleTriple::new(1, 2, 3));
    assert_eq!(
        bytes,
        vec![
            0x50, //
            0x01, 0x00, 0x80, // stroke, selected
            0x02, 0x00, 0x80, // fill0, selected
            0x03, 0x00, 0x00, // fill1
            0x00, 0x01, 0x00, 0x00, //
            0x00,
        ]
    );
}

#[test]
fn hex_literals_encode_exact_fractions() {
    let bytes = encode(
        FormatVersion::Mx,
        "!#0A 0|#FFFFFE.80 0",
        StyleTriple::default(),
    );
    assert_eq!(
        bytes,
        vec![
            0xD1, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
            0x00, 0x0A, 0x00, 0x00, //
            0x80, 0xF4, 0x00, 0x00,
        ]
    );
}

#[test]
fn wide_deltas_pick_short_or_extended_tiers() {
    let short = encode(FormatVersion::Mx, "!0 0|200.5 0", StyleTriple::default());
    assert_eq!(short[0], 0xF0);
    assert_eq!(&short[7..], &[0x91, 0x01, 0x00, 0x00]);

    let extended = encode(FormatVersion::Mx, "!0 0|0.25 1000.25", StyleTriple::default());
    assert_eq!(extended[0], 0xE0);
    assert_eq!(
        &extended[7..],
        &[0x40, 0x00, 0x00, 0x00, 0x40, 0xE8, 0x03, 0x00]
    );
}

#[test]
fn style_changes_mid_shape_reopen_the_style_block() {
    let mut w = writer_for(FormatVersion::Mx);
    let mut codec = EdgePathCodec::new();
    codec.set_styles(StyleTriple::new(1, 0, 0));
    codec.move_to(point(0.0, 0.0), SelectionMask::NONE);
    codec.line_to(&mut w, point(1.0, 0.0), LineTag::General).unwrap();
    codec.set_styles(StyleTriple::new(1, 0, 0));
    codec.line_to(&mut w, point(2.0, 0.0), LineTag::General).unwrap();
    codec.set_styles(StyleTriple::new(2, 0, 0));
    codec.line_to(&mut w, point(3.0, 0.0), LineTag::General).unwrap();

    let bytes = w.into_inner();
    assert_eq!(bytes[11], 0x10);
    assert_eq!(&bytes[16..23], &[0xD0, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00]);
    assert!(!codec.pen().styles_dirty());
    assert_eq!(codec.pen().position(), point(3.0, 0.0));
}

#[test]
fn line_without_move_starts_at_the_pen() {
    let mut w = writer_for(FormatVersion::Mx);
    let mut codec = EdgePathCodec::new();
    codec.line_to(&mut w, point(4.0, 4.0), LineTag::General).unwrap();
    assert_eq!(w.into_inner()[7..], [0x00, 0x04, 0x00, 0x04]);
}

#[test]
fn begin_shape_resets_pen_and_styles() {
    let mut w = writer_for(FormatVersion::Mx);
    let mut codec = EdgePathCodec::new();
    codec
        .write_edges(&mut w, "!0 0|10 10", StyleTriple::new(3, 0, 0))
        .unwrap();
    codec.move_to(point(50.0, 50.0), SelectionMask::NONE);
    codec.begin_shape();
    assert_eq!(codec.pen().position(), point(0.0, 0.0));
    assert_eq!(codec.pen().pending_move(), None);
    assert!(codec.pen().styles_dirty());
    assert_eq!(codec.pen().styles(), StyleTriple::default());
}

#[test]
fn edge_list_is_prefixed_with_the_record_count() {
    let mut w = writer_for(FormatVersion::Mx);
    let mut codec = EdgePathCodec::new();
    let count = codec
        .write_edge_list(&mut w, "!0 0[1 1 2 2/3 3!4 4|5 5", StyleTriple::default())
        .unwrap();
    assert_eq!(count, 3);
    assert_eq!(&w.into_inner()[..4], &[0x03, 0x00, 0x00, 0x00]);
}

#[test]
fn edges_count_follows_normalization() {
    assert_eq!(edges_count(""), 0);
    assert_eq!(edges_count("!0 0"), 0);
    assert_eq!(edges_count("!0 0[1 1 2 2/3 3!4 4|5 5"), 3);
    assert_eq!(edges_count("  ! 0   0 |1 1\n|\t2 2 "), 2);
}

#[test]
fn parse_keeps_selection_and_tags() {
    let ops = parse_edges("!1 2S6/3 4[5 6 7 8").unwrap();
    assert_eq!(
        ops,
        vec![
            EdgeOp::MoveTo {
                to: point(1.0, 2.0),
                selection: SelectionMask(6),
            },
            EdgeOp::LineTo {
                to: point(3.0, 4.0),
                tag: LineTag::Alternate,
            },
            EdgeOp::CurveTo {
                control: point(5.0, 6.0),
                to: point(7.0, 8.0),
            },
        ]
    );
    assert!(parse_edges("   ").unwrap().is_empty());
}

#[test]
fn malformed_paths_name_the_offending_fragment() {
    let cases = [
        ("0 0|1 1", "0 0 |"),
        ("!0 0|1", "| 1"),
        ("!0 0|1 abc", "| 1 abc"),
        ("!0 0S|1 1", "! 0 0S"),
        ("!0 0[1 1 2|3 3", "[ 1 1 2"),
        ("!0 0 7|1 1", "7"),
    ];
    for (text, expected) in cases {
        match parse_edges(text) {
            Err(Error::InvalidEdgePath { fragment, .. }) => {
                assert_eq!(fragment, expected, "{text}");
            }
            other => panic!("expected InvalidEdgePath for {text:?}, got {other:?}"),
        }
    }
}

#[test]
fn parse_errors_write_nothing() {
    let mut w = writer_for(FormatVersion::Cs4);
    let mut codec = EdgePathCodec::new();
    assert!(
        codec
            .write_edges(&mut w, "!0 0|1 1|2", StyleTriple::default())
            .is_err()
    );
    assert_eq!(w.position(), 0);
}

#[test]
fn out_of_range_deltas_abort_before_the_record() {
    let mut w = writer_for(FormatVersion::Cs4);
    let mut codec = EdgePathCodec::new();
    let err = codec
        .write_edges(&mut w, "!0 0|9000000 0", StyleTriple::default())
        .unwrap_err();
    assert!(matches!(err, Error::NumericRange { axis: 'x', .. }));
    assert_eq!(w.position(), 0);
}

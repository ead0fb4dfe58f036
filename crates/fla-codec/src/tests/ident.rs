use super::writer_for;
use crate::ident::REPLAYED_IDENTIFIER;
use crate::*;

#[test]
fn generator_counts_up_from_zero_under_one_timestamp() {
    let mut ids = IdGenerator::new(0x5F5E_1000);
    let first = ids.generate();
    let second = ids.generate();
    assert_eq!(first, Identifier::new(0x5F5E_1000, 0));
    assert_eq!(second, Identifier::new(0x5F5E_1000, 1));
    assert_eq!(ids.issued(), 2);
    assert_eq!(first.to_string(), "5f5e1000-00000000");
    assert_eq!(second.to_string(), "5f5e1000-00000001");
}

#[test]
fn parse_accepts_only_the_canonical_form() {
    let id: Identifier = "5f5e1000-0000002a".parse().unwrap();
    assert_eq!(id, Identifier::new(0x5F5E_1000, 0x2A));

    for bad in [
        "5F5E1000-0000002A",
        "5f5e1000-2a",
        "5f5e10000000002a",
        "5f5e1000-0000002g",
        "5f5e1000-0000002a-0",
        "",
    ] {
        let err = bad.parse::<Identifier>().unwrap_err();
        assert!(
            matches!(err, Error::InvalidIdentifierFormat { ref text } if text == bad),
            "{bad:?}: {err}"
        );
    }
}

#[test]
fn binary_form_is_high_then_low_little_endian() {
    let id = Identifier::new(0x0102_0304, 0x0A0B_0C0D);
    assert_eq!(
        id.to_bytes(),
        [0x04, 0x03, 0x02, 0x01, 0x0D, 0x0C, 0x0B, 0x0A]
    );

    let mut w = writer_for(FormatVersion::Cs4);
    w.write_identifier(id).unwrap();
    assert_eq!(w.into_inner(), id.to_bytes().to_vec());
}

#[test]
fn replay_hides_identifiers_but_still_advances() {
    let mut ctx = ConversionContext::for_version(FormatVersion::Cs4)
        .with_determinism(Determinism::Replay)
        .with_timestamp(1_000);
    let mut w = ctx.writer(Vec::new());
    let id = ctx.write_new_id(&mut w).unwrap();
    assert_eq!(w.into_inner(), vec![b'X'; 8]);
    assert_eq!(ctx.format_id(id), REPLAYED_IDENTIFIER);
    assert_eq!(ctx.next_id(), Identifier::new(1_000, 1));
    assert_eq!(ctx.ids().issued(), 2);
}

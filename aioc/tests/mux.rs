//! Round-trip and text-format tests for the multiplexer source sets.

use aioc::mux::{ButtonSource, PttSource};
use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// Decoding and re-encoding a PTT source register reproduces the raw
    /// value bit-for-bit, named bits plus residue.
    #[test]
    fn prop_ptt_roundtrip(raw: u32) {
        prop_assert_eq!(PttSource::from_bits_retain(raw).bits(), raw);
    }

    /// Same for the CM108 button source registers.
    #[test]
    fn prop_button_roundtrip(raw: u32) {
        prop_assert_eq!(ButtonSource::from_bits_retain(raw).bits(), raw);
    }

    /// Decoding the named portion is idempotent.
    #[test]
    fn prop_ptt_decode_idempotent(raw: u32) {
        let once = PttSource::from_bits_retain(raw);
        let twice = PttSource::from_bits_retain(once.bits());
        prop_assert_eq!(once, twice);
    }

    /// Residue never overlaps the named bits.
    #[test]
    fn prop_residue_is_disjoint(raw: u32) {
        let sources = PttSource::from_bits_retain(raw);
        prop_assert_eq!(sources.residue() & PttSource::all().bits(), 0);
    }
}

#[test]
fn ptt_source_bits_match_the_datasheet() {
    assert_eq!(PttSource::CM108_GPIO1.bits(), 0x0000_0001);
    assert_eq!(PttSource::CM108_GPIO2.bits(), 0x0000_0002);
    assert_eq!(PttSource::CM108_GPIO3.bits(), 0x0000_0004);
    assert_eq!(PttSource::CM108_GPIO4.bits(), 0x0000_0008);
    assert_eq!(PttSource::SERIAL_DTR.bits(), 0x0000_0100);
    assert_eq!(PttSource::SERIAL_RTS.bits(), 0x0000_0200);
    assert_eq!(PttSource::SERIAL_DTR_NRTS.bits(), 0x0000_0400);
    assert_eq!(PttSource::SERIAL_NDTR_RTS.bits(), 0x0000_0800);
    assert_eq!(PttSource::VPTT.bits(), 0x0000_1000);
}

#[test]
fn button_source_bits_match_the_datasheet() {
    assert_eq!(ButtonSource::IN1.bits(), 0x0001_0000);
    assert_eq!(ButtonSource::IN2.bits(), 0x0002_0000);
    assert_eq!(ButtonSource::VCOS.bits(), 0x0100_0000);
}

#[test]
fn display_names_the_routed_sources() {
    let sources = PttSource::SERIAL_RTS | PttSource::VPTT;
    assert_eq!(sources.to_string(), "SERIAL_RTS | VPTT");
}

#[test]
fn display_renders_the_empty_set_as_none() {
    assert_eq!(PttSource::empty().to_string(), "NONE");
    assert_eq!(ButtonSource::empty().to_string(), "NONE");
}

#[test]
fn display_keeps_unrecognized_bits_visible() {
    let sources = PttSource::from_bits_retain(0x8000_0200);
    assert_eq!(sources.residue(), 0x8000_0000);
    let rendered = sources.to_string();
    assert!(
        rendered.contains("SERIAL_RTS") && rendered.contains("0x80000000"),
        "unexpected rendering: {rendered}"
    );
}

#[test]
fn parses_source_lists() {
    let sources: PttSource = "SERIAL_RTS | CM108_GPIO3".parse().unwrap();
    assert_eq!(sources, PttSource::SERIAL_RTS | PttSource::CM108_GPIO3);

    let buttons: ButtonSource = "IN2".parse().unwrap();
    assert_eq!(buttons, ButtonSource::IN2);
}

#[test]
fn parses_none_and_empty_as_the_empty_set() {
    assert_eq!("NONE".parse::<PttSource>().unwrap(), PttSource::empty());
    assert_eq!("none".parse::<ButtonSource>().unwrap(), ButtonSource::empty());
    assert_eq!("".parse::<PttSource>().unwrap(), PttSource::empty());
}

#[test]
fn rejects_unknown_source_names() {
    assert!("WARBLE".parse::<PttSource>().is_err());
}

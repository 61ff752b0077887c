//! Session state machine and transaction sequencing tests against a
//! scripted in-process channel.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    io,
    rc::Rc,
};

use aioc::{
    channel::FeatureReportChannel,
    frame::Command,
    mux::{ButtonSource, PttSource},
    register::{Button, PttLine, Register},
    session::{MAGIC, Session, SessionError},
};

/// A scripted feature report channel recording every transport call.
#[derive(Default)]
struct MockChannel {
    /// Every feature report sent, in order.
    sent: RefCell<Vec<Vec<u8>>>,

    /// Responses handed out by `get_feature_report`, front first.
    responses: RefCell<VecDeque<Vec<u8>>>,

    /// How many feature report reads were issued.
    gets: Cell<usize>,

    /// When set, every transport call fails.
    fail: Cell<bool>,
}

impl MockChannel {
    fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Queues a well-formed response frame carrying the given value.
    fn push_value(&self, value: u32) {
        let mut frame = vec![0x00, 0x00, 0x00];
        frame.extend_from_slice(&value.to_le_bytes());
        self.responses.borrow_mut().push_back(frame);
    }

    /// Queues the magic register response of a genuine adapter.
    fn push_magic(&self) {
        self.push_value(u32::from_le_bytes(MAGIC));
    }

    fn sent_count(&self) -> usize {
        self.sent.borrow().len()
    }

    fn last_sent(&self) -> Vec<u8> {
        self.sent.borrow().last().expect("nothing was sent").clone()
    }
}

/// Wraps a shared [`MockChannel`] so the feature report trait is implemented
/// on a local type. The orphan rule forbids implementing the crate's
/// `FeatureReportChannel` directly for `Rc<MockChannel>`, so the session owns
/// this wrapper while the test keeps its own `Rc` handle for inspection.
struct Shared(Rc<MockChannel>);

impl FeatureReportChannel for Shared {
    type Error = io::Error;

    fn send_feature_report(&self, data: &[u8]) -> Result<(), io::Error> {
        if self.0.fail.get() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device gone"));
        }
        self.0.sent.borrow_mut().push(data.to_vec());
        Ok(())
    }

    fn get_feature_report(&self, report_id: u8, buf: &mut [u8]) -> Result<usize, io::Error> {
        assert_eq!(report_id, 0x00, "all register traffic uses report ID 0");
        if self.0.fail.get() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device gone"));
        }
        self.0.gets.set(self.0.gets.get() + 1);

        let response = self
            .0
            .responses
            .borrow_mut()
            .pop_front()
            .expect("unscripted feature report read");
        buf[..response.len()].copy_from_slice(&response);
        Ok(response.len())
    }
}

/// Convenience: a channel plus a session that already passed the handshake.
fn identified() -> (Rc<MockChannel>, Session<Shared>) {
    let chan = MockChannel::new();
    chan.push_magic();
    let mut session = Session::new(Shared(Rc::clone(&chan)));
    session.identify().expect("handshake must pass");
    (chan, session)
}

#[test]
fn identify_accepts_the_magic_signature() {
    let chan = MockChannel::new();
    chan.push_magic();

    let mut session = Session::new(Shared(Rc::clone(&chan)));
    let magic = session.identify().expect("genuine magic must identify");

    assert_eq!(magic, *b"AIOC");
    // The handshake is one read: address-set frame, then one report read.
    assert_eq!(chan.last_sent(), [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(chan.gets.get(), 1);
}

#[test]
fn identify_rejects_an_unexpected_magic() {
    let chan = MockChannel::new();
    chan.push_value(u32::from_le_bytes(*b"BLUB"));

    let mut session = Session::new(Shared(Rc::clone(&chan)));
    match session.identify() {
        Err(SessionError::UnexpectedMagic(actual)) => assert_eq!(actual, *b"BLUB"),
        other => panic!("expected UnexpectedMagic, got {other:?}"),
    }

    // The session must stay unidentified: no register operation may issue
    // any further transport call.
    let sent_before = chan.sent_count();
    assert!(matches!(
        session.read_register(Register::AiocIomux0),
        Err(SessionError::NotIdentified)
    ));
    assert_eq!(chan.sent_count(), sent_before);
    assert_eq!(chan.gets.get(), 1);
}

#[test]
fn read_before_identify_touches_no_transport() {
    let chan = MockChannel::new();
    let session = Session::new(Shared(Rc::clone(&chan)));

    assert!(matches!(
        session.read_register(Register::AiocIomux0),
        Err(SessionError::NotIdentified)
    ));
    assert_eq!(chan.sent_count(), 0);
    assert_eq!(chan.gets.get(), 0);
}

#[test]
fn read_sets_the_address_pointer_then_reads_back() {
    let (chan, session) = identified();
    chan.push_value(0x1234_5678);

    let value = session
        .read_register(Register::AiocIomux0)
        .expect("scripted read must succeed");

    assert_eq!(value, 0x1234_5678);
    assert_eq!(chan.last_sent(), [0x00, 0x00, 0x24, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(chan.gets.get(), 2);
}

#[test]
fn write_is_a_single_strobed_report() {
    let (chan, session) = identified();

    session
        .write_register(Register::AiocIomux0, 0x0000_0200)
        .expect("write must succeed");

    assert_eq!(chan.last_sent(), [0x00, 0x01, 0x24, 0x00, 0x02, 0x00, 0x00]);
    // No read-back: the handshake's single report read stays the only one.
    assert_eq!(chan.gets.get(), 1);
}

#[test]
fn device_commands_are_fire_and_forget() {
    let (chan, session) = identified();

    session.send_command(Command::STORE).expect("store");
    assert_eq!(chan.last_sent(), [0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00]);

    session.send_command(Command::RECALL).expect("recall");
    assert_eq!(chan.last_sent(), [0x00, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00]);

    session.send_command(Command::DEFAULTS).expect("defaults");
    assert_eq!(chan.last_sent(), [0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00]);

    assert_eq!(chan.gets.get(), 1);
}

#[test]
fn dump_all_reads_every_register_in_ascending_order() {
    let (chan, session) = identified();
    for i in 0..Register::ALL.len() {
        chan.push_value(i as u32);
    }

    let dump = session.dump_all().expect("scripted dump must succeed");

    assert_eq!(dump.len(), Register::ALL.len());
    for (i, (register, value)) in dump.iter().enumerate() {
        assert_eq!(*register, Register::ALL[i]);
        assert_eq!(*value, i as u32);
    }

    // One address-set frame per register, after the handshake's one.
    let sent = chan.sent.borrow();
    let addresses: Vec<u8> = sent[1..].iter().map(|report| report[2]).collect();
    let expected: Vec<u8> = Register::ALL.into_iter().map(u8::from).collect();
    assert_eq!(addresses, expected);
    assert!(addresses.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn typed_accessors_decode_and_encode_the_mux_registers() {
    let (chan, session) = identified();

    chan.push_value(0x0000_1200);
    let sources = session.ptt_source(PttLine::Ptt1).expect("read ptt1");
    assert_eq!(sources, PttSource::SERIAL_RTS | PttSource::VPTT);

    // Unknown bits survive a read-modify-write cycle.
    chan.push_value(0x8000_0200);
    let sources = session.ptt_source(PttLine::Ptt2).expect("read ptt2");
    assert_eq!(sources.residue(), 0x8000_0000);
    session
        .set_ptt_source(PttLine::Ptt2, sources)
        .expect("write ptt2");
    assert_eq!(chan.last_sent(), [0x00, 0x01, 0x25, 0x00, 0x02, 0x00, 0x80]);

    chan.push_value(0x0100_0000);
    let buttons = session.button_source(Button::VolumeDown).expect("read btn2");
    assert_eq!(buttons, ButtonSource::VCOS);
    session
        .set_button_source(Button::VolumeDown, ButtonSource::IN2)
        .expect("write btn2");
    assert_eq!(chan.last_sent(), [0x00, 0x01, 0x45, 0x00, 0x00, 0x02, 0x00]);
}

#[test]
fn short_responses_are_malformed() {
    let (chan, session) = identified();
    chan.responses.borrow_mut().push_back(vec![0x00; 6]);

    assert!(matches!(
        session.read_register(Register::SerialCtrl),
        Err(SessionError::Frame(_))
    ));
}

#[test]
fn transport_failures_propagate_unchanged() {
    let (chan, session) = identified();
    chan.fail.set(true);

    match session.read_register(Register::SerialCtrl) {
        Err(SessionError::Transport(err)) => {
            assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        },
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[test]
fn closed_sessions_reject_every_operation() {
    let (chan, mut session) = identified();
    session.close();

    let sent_before = chan.sent_count();
    assert!(matches!(
        session.read_register(Register::AiocIomux0),
        Err(SessionError::SessionClosed)
    ));
    assert!(matches!(
        session.write_register(Register::AiocIomux0, 0),
        Err(SessionError::SessionClosed)
    ));
    assert!(matches!(
        session.send_command(Command::STORE),
        Err(SessionError::SessionClosed)
    ));
    assert!(matches!(
        session.identify(),
        Err(SessionError::SessionClosed)
    ));
    assert_eq!(chan.sent_count(), sent_before);
    assert_eq!(chan.gets.get(), 1);
}

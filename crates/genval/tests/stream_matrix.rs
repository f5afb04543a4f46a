use std::io::{self, Write};
use std::thread;

use genval::stream::{channel, read_stream, write_stream};
use genval::{pack, Table, UnpackError, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn sample() -> Vec<Value> {
    let t = Table::map();
    t.put("k", "v");
    vec![
        Value::long(1),
        Value::utf8("two"),
        Value::Table(t),
        Value::Nil,
        Value::double(0.5),
    ]
}

#[test]
fn values_survive_a_pipe() {
    init_tracing();
    let (tx, rx) = channel();
    let producer = thread::spawn(move || {
        for value in sample() {
            tx.send(value).unwrap();
        }
    });
    let mut bytes = Vec::new();
    let written = write_stream(&mut bytes, rx).unwrap();
    producer.join().unwrap();
    assert_eq!(written, 5);

    let (tx, rx) = channel();
    let consumer = thread::spawn(move || rx.iter().collect::<Vec<_>>());
    let read = read_stream(bytes.as_slice(), tx).unwrap();
    assert_eq!(read, 5);
    assert_eq!(consumer.join().unwrap(), sample());
}

#[test]
fn truncated_input_is_an_error() {
    init_tracing();
    let mut bytes = pack(&Value::long(1));
    bytes.extend_from_slice(&[0x92, 0x01]);
    let (tx, rx) = channel();
    let consumer = thread::spawn(move || rx.iter().count());
    let err = read_stream(bytes.as_slice(), tx).unwrap_err();
    assert!(matches!(err, UnpackError::UnexpectedEof));
    assert_eq!(consumer.join().unwrap(), 1);
}

#[test]
fn dropped_receiver_stops_reading() {
    init_tracing();
    let bytes = [0x01, 0x02, 0x03];
    let (tx, rx) = channel();
    drop(rx);
    assert_eq!(read_stream(&bytes[..], tx).unwrap(), 0);
}

struct Broken;

impl Write for Broken {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("broken pipe"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_error_stops_writing() {
    init_tracing();
    let (tx, rx) = channel();
    let producer = thread::spawn(move || {
        let mut sent = 0;
        for value in sample() {
            if tx.send(value).is_err() {
                break;
            }
            sent += 1;
        }
        sent
    });
    assert!(write_stream(Broken, rx).is_err());
    assert_eq!(producer.join().unwrap(), 1);
}

//! Writing and reading raw ASV records.
//!
//! Run with: RUST_LOG=trace cargo run --example simple

use serde_asv::{record, Decoder, Encoder};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut encoder = Encoder::new(Vec::new());
    encoder.write_record(["id", "city", "note"])?;
    encoder.write_record(&record!["1", "Lisbon", "commas, tabs\tand \"quotes\" need no escaping"])?;
    encoder.write_record(["2", "Oslo", ""])?;
    encoder.flush();
    if let Some(err) = encoder.error() {
        return Err(err.clone().into());
    }

    let bytes = encoder.into_inner();
    println!("Encoded {} bytes: {:?}\n", bytes.len(), String::from_utf8_lossy(&bytes));

    let mut decoder = Decoder::new(&bytes[..]);
    while let Some(record) = decoder.read_record()? {
        println!("@{:>3}  {:?}", decoder.offset(), record);
    }

    Ok(())
}

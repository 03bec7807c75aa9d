//! Streaming Serde structs through an ASV file.
//!
//! Run with: cargo run --example typed_records

use serde::{Deserialize, Serialize};
use serde_asv::{Decoder, Encoder, EncoderOptions};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Trade {
    symbol: String,
    side: Side,
    qty: u32,
    price: f64,
    note: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let trades = vec![
        Trade {
            symbol: "ACME".to_string(),
            side: Side::Buy,
            qty: 100,
            price: 12.25,
            note: None,
        },
        Trade {
            symbol: "INIT".to_string(),
            side: Side::Sell,
            qty: 40,
            price: 7.5,
            note: Some("partial fill".to_string()),
        },
    ];

    let path = std::env::temp_dir().join("trades.asv");

    let options = EncoderOptions::new().with_validation(true);
    let mut encoder = Encoder::with_options(BufWriter::new(File::create(&path)?), options);
    for trade in &trades {
        encoder.serialize(trade)?;
    }
    encoder.flush();
    if let Some(err) = encoder.take_error() {
        return Err(err.into());
    }

    let mut decoder = Decoder::new(BufReader::new(File::open(&path)?));
    let mut trades_back = Vec::new();
    while let Some(trade) = decoder.deserialize::<Trade>()? {
        trades_back.push(trade);
    }

    assert_eq!(trades, trades_back);
    println!("✓ {} trades round-tripped through {}", trades_back.len(), path.display());

    Ok(())
}

use serde::{Deserialize, Serialize};
use serde_asv::{from_record, record, to_record, Decoder, Encoder, Error};

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
enum Status {
    Active,
    Suspended,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
struct Account {
    id: u32,
    owner: String,
    balance: f64,
    status: Status,
    referrer: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Point(i64, i64);

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Meters(f32);

fn accounts() -> Vec<Account> {
    vec![
        Account {
            id: 1,
            owner: "Alice".to_string(),
            balance: 120.5,
            status: Status::Active,
            referrer: None,
        },
        Account {
            id: 2,
            owner: "Bob".to_string(),
            balance: -3.0,
            status: Status::Suspended,
            referrer: Some(1),
        },
    ]
}

#[test]
fn test_struct_to_record() {
    let record = to_record(&accounts()[1]).unwrap();
    assert_eq!(record, record!["2", "Bob", "-3", "Suspended", "1"]);
}

#[test]
fn test_stream_of_structs() {
    let mut encoder = Encoder::new(Vec::new());
    for account in accounts() {
        encoder.serialize(&account).unwrap();
    }
    encoder.flush();
    assert!(encoder.error().is_none());
    let bytes = encoder.into_inner();
    assert_eq!(
        bytes,
        b"1\x1FAlice\x1F120.5\x1FActive\x1F\x1E2\x1FBob\x1F-3\x1FSuspended\x1F1"
    );

    let mut decoder = Decoder::new(&bytes[..]);
    let mut decoded = Vec::new();
    while let Some(account) = decoder.deserialize::<Account>().unwrap() {
        decoded.push(account);
    }
    assert_eq!(decoded, accounts());
}

#[test]
fn test_tuple_struct_and_newtype() {
    let record = to_record(&Point(-1, 4)).unwrap();
    assert_eq!(record, record!["-1", "4"]);
    assert_eq!(from_record::<Point>(&record).unwrap(), Point(-1, 4));

    let record = to_record(&Meters(2.5)).unwrap();
    assert_eq!(record, record!["2.5"]);
    assert_eq!(from_record::<Meters>(&record).unwrap(), Meters(2.5));
}

#[test]
fn test_trailing_field_is_an_error() {
    let mut record = to_record(&accounts()[0]).unwrap();
    record.push_field("extra");
    assert_eq!(record.len(), 6);
    assert!(from_record::<Account>(&record).is_err());
}

#[test]
fn test_unknown_variant() {
    let record = record!["3", "Carol", "0", "Closed", ""];
    assert!(from_record::<Account>(&record).is_err());
}

#[test]
fn test_non_utf8_text_field() {
    let record = record!["4", &b"\xFF"[..], "0", "Active", ""];
    match from_record::<Account>(&record) {
        Err(Error::InvalidField { field, .. }) => assert_eq!(field, 1),
        other => panic!("Expected InvalidField, got {:?}", other),
    }
}

#[test]
fn test_data_carrying_variant_rejected() {
    #[derive(Serialize)]
    enum Shape {
        Circle(f64),
    }

    assert!(matches!(
        to_record(&Shape::Circle(1.0)),
        Err(Error::UnsupportedType(_))
    ));
}

#[test]
fn test_bool_and_char_fields() {
    let record = to_record(&(false, 'λ', 255u8)).unwrap();
    assert_eq!(record, record!["false", "λ", "255"]);
    let back: (bool, char, u8) = from_record(&record).unwrap();
    assert_eq!(back, (false, 'λ', 255));

    assert!(from_record::<(bool, char, u8)>(&record!["no", "x", "1"]).is_err());
    assert!(from_record::<(bool, char, u8)>(&record!["true", "x", "256"]).is_err());
}

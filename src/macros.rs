/// Builds a [`Record`](crate::Record) from field expressions.
///
/// Each field may be anything implementing `AsRef<[u8]>`.
///
/// ```rust
/// use serde_asv::{record, Record};
///
/// assert_eq!(record!["a", "b"], Record::from(["a", "b"]));
/// assert!(record![].is_empty());
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };

    ($($field:expr),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $(
            record.push_field($field);
        )+
        record
    }};
}

#[cfg(test)]
mod tests {
    use crate::Record;

    #[test]
    fn test_record_macro_mixed_fields() {
        let owned = String::from("owned");
        let record = record!["lit", owned, &b"\xFFraw"[..], ""];
        assert_eq!(record.len(), 4);
        assert_eq!(record.get_str(1), Some("owned"));
        assert_eq!(record.get(2), Some(&b"\xFFraw"[..]));
        assert_eq!(record.get(3), Some(&b""[..]));
    }

    #[test]
    fn test_record_macro_empty() {
        assert_eq!(record![], Record::new());
    }
}

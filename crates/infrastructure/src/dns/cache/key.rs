use compact_str::CompactString;
use hickory_proto::rr::{Name, RecordType};

/// Owner name (lower-cased, fully qualified) plus record type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: CompactString,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(name: &Name, record_type: RecordType) -> Self {
        let mut fqdn = name.clone();
        fqdn.set_fqdn(true);

        Self {
            domain: CompactString::from(fqdn.to_lowercase().to_ascii()),
            record_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_key_is_case_insensitive_and_fqdn() {
        let upper = CacheKey::new(&Name::from_str("WWW.Example.COM.").unwrap(), RecordType::A);
        let relative = CacheKey::new(&Name::from_str("www.example.com").unwrap(), RecordType::A);

        assert_eq!(upper, relative);
        assert_eq!(upper.domain, "www.example.com.");
    }

    #[test]
    fn test_key_distinguishes_record_type() {
        let name = Name::from_str("example.com.").unwrap();
        assert_ne!(CacheKey::new(&name, RecordType::A), CacheKey::new(&name, RecordType::NS));
    }
}

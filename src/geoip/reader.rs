//! IPDB database reader.
//!
//! File layout:
//!
//! ```text
//! [u32 BE metadata length][metadata JSON][node table: node_count * 8 bytes][records]
//! ```
//!
//! The node table is a binary trie over 128-bit addresses. Each node holds two
//! big-endian `u32` children (bit 0, bit 1). A child equal to `node_count` means
//! "no data"; a child greater than `node_count` points into the record area.
//! IPv4 addresses live under `::ffff:0:0/96`. A record is a `u16 BE` length
//! followed by tab-separated UTF-8 values, one window of `fields.len()` values
//! per language.

use std::net::IpAddr;

use crate::error_handling::{DatabaseError, LookupError};
use crate::geoip::types::{IpdbMetadata, Location};
use crate::geoip::Locator;

/// In-memory IPDB database, read-only after construction.
#[derive(Debug)]
pub struct IpdbReader {
    metadata: IpdbMetadata,
    data: Vec<u8>,
    v4_offset: usize,
    language_offset: usize,
}

impl IpdbReader {
    /// Parses a complete database image.
    ///
    /// `language` selects the record window (e.g. `"CN"`) and must be listed
    /// in the metadata.
    pub fn from_bytes(mut bytes: Vec<u8>, language: &str) -> Result<Self, DatabaseError> {
        if bytes.len() < 4 {
            return Err(DatabaseError::Truncated("metadata length"));
        }
        let meta_len = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        let data_start = 4usize
            .checked_add(meta_len)
            .filter(|end| *end <= bytes.len())
            .ok_or(DatabaseError::Truncated("metadata"))?;

        let metadata: IpdbMetadata = serde_json::from_slice(&bytes[4..data_start])?;
        let data = bytes.split_off(data_start);

        if data.len() != metadata.total_size {
            return Err(DatabaseError::SizeMismatch {
                expected: metadata.total_size,
                actual: data.len(),
            });
        }
        if metadata.node_count.saturating_mul(8) > data.len() {
            return Err(DatabaseError::Layout(format!(
                "{} nodes do not fit in {} bytes",
                metadata.node_count,
                data.len()
            )));
        }
        let language_offset = *metadata
            .languages
            .get(language)
            .ok_or_else(|| DatabaseError::UnknownLanguage(language.to_string()))?;

        let mut reader = Self {
            metadata,
            data,
            v4_offset: 0,
            language_offset,
        };

        if reader.metadata.supports_ipv4() {
            // Walk ::ffff:0:0/96 once so IPv4 searches can start below it.
            let mut node = 0;
            for i in 0..96 {
                if node >= reader.metadata.node_count {
                    break;
                }
                node = reader.read_node(node, usize::from(i >= 80));
            }
            reader.v4_offset = node;
        }

        Ok(reader)
    }

    /// Metadata block of the loaded file
    pub fn metadata(&self) -> &IpdbMetadata {
        &self.metadata
    }

    /// Returns the raw field values (current language window) for `ip`.
    pub fn find(&self, ip: IpAddr) -> Result<Vec<&str>, LookupError> {
        let node = match ip {
            IpAddr::V4(v4) => {
                if !self.metadata.supports_ipv4() {
                    return Err(LookupError::Ipv4Unsupported);
                }
                self.search(&v4.octets(), 32, self.v4_offset)?
            }
            IpAddr::V6(v6) => {
                if !self.metadata.supports_ipv6() {
                    return Err(LookupError::Ipv6Unsupported);
                }
                self.search(&v6.octets(), 128, 0)?
            }
        };

        let record = self.resolve(node)?;
        let values: Vec<&str> = record.split('\t').collect();
        let width = self.metadata.fields.len();
        let window = self
            .language_offset
            .checked_add(width)
            .and_then(|end| values.get(self.language_offset..end))
            .ok_or(LookupError::CorruptRecord(self.record_offset(node)))?;
        Ok(window.to_vec())
    }

    fn read_node(&self, node: usize, bit: usize) -> usize {
        let off = node * 8 + bit * 4;
        u32::from_be_bytes([
            self.data[off],
            self.data[off + 1],
            self.data[off + 2],
            self.data[off + 3],
        ]) as usize
    }

    fn search(&self, octets: &[u8], bit_count: usize, start: usize) -> Result<usize, LookupError> {
        let node_count = self.metadata.node_count;
        let mut node = start;
        for i in 0..bit_count {
            if node >= node_count {
                break;
            }
            let bit = (octets[i >> 3] >> (7 - (i % 8))) & 1;
            node = self.read_node(node, usize::from(bit));
        }

        if node > node_count {
            Ok(node)
        } else {
            Err(LookupError::NotFound)
        }
    }

    fn record_offset(&self, node: usize) -> usize {
        node - self.metadata.node_count + self.metadata.node_count * 8
    }

    fn resolve(&self, node: usize) -> Result<&str, LookupError> {
        let offset = self.record_offset(node);
        let body_start = offset + 2;
        if body_start > self.data.len() {
            return Err(LookupError::CorruptRecord(offset));
        }
        let size = u16::from_be_bytes([self.data[offset], self.data[offset + 1]]) as usize;
        let body = self
            .data
            .get(body_start..body_start + size)
            .ok_or(LookupError::CorruptRecord(offset))?;
        std::str::from_utf8(body).map_err(|_| LookupError::CorruptRecord(offset))
    }
}

impl Locator for IpdbReader {
    fn locate(&self, ip: IpAddr) -> Result<Location, LookupError> {
        let values = self.find(ip.to_canonical())?;
        Ok(Location::from_fields(&self.metadata.fields, &values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geoip::test_helpers::IpdbWriter;
    use std::net::Ipv4Addr;

    const FIELDS: &[&str] = &["country_name", "region_name", "city_name", "isp_domain"];

    fn sample_reader() -> IpdbReader {
        let mut writer = IpdbWriter::new(FIELDS);
        writer.insert_v4(
            Ipv4Addr::new(1, 2, 3, 0),
            24,
            &["China", "Beijing", "", "China Telecom"],
        );
        writer.insert_v4(
            Ipv4Addr::new(8, 8, 8, 8),
            32,
            &["United States", "", "", "Google"],
        );
        writer.insert_v4(Ipv4Addr::new(10, 0, 0, 0), 8, &["", "", "", ""]);
        IpdbReader::from_bytes(writer.build(), "CN").expect("sample database should parse")
    }

    #[test]
    fn test_find_inside_prefix() {
        let reader = sample_reader();
        let values = reader
            .find("1.2.3.200".parse().unwrap())
            .expect("1.2.3.200 is inside 1.2.3.0/24");
        assert_eq!(values, vec!["China", "Beijing", "", "China Telecom"]);
    }

    #[test]
    fn test_find_host_route() {
        let reader = sample_reader();
        let values = reader.find("8.8.8.8".parse().unwrap()).unwrap();
        assert_eq!(values[0], "United States");
        assert_eq!(values[3], "Google");
        assert_eq!(
            reader.find("8.8.8.9".parse().unwrap()),
            Err(LookupError::NotFound)
        );
    }

    #[test]
    fn test_find_outside_any_prefix() {
        let reader = sample_reader();
        assert_eq!(
            reader.find("1.2.4.1".parse().unwrap()),
            Err(LookupError::NotFound)
        );
        assert_eq!(
            reader.find("200.1.1.1".parse().unwrap()),
            Err(LookupError::NotFound)
        );
    }

    #[test]
    fn test_ipv6_unsupported_in_ipv4_database() {
        let reader = sample_reader();
        assert_eq!(
            reader.find("2001:db8::1".parse().unwrap()),
            Err(LookupError::Ipv6Unsupported)
        );
    }

    #[test]
    fn test_locate_maps_fields() {
        let reader = sample_reader();
        let location = reader.locate("1.2.3.4".parse().unwrap()).unwrap();
        assert_eq!(location.summary(), "China Beijing China Telecom");
    }

    #[test]
    fn test_locate_ipv4_mapped_ipv6_uses_ipv4_tree() {
        let reader = sample_reader();
        let location = reader.locate("::ffff:8.8.8.8".parse().unwrap()).unwrap();
        assert_eq!(location.isp.as_deref(), Some("Google"));
    }

    #[test]
    fn test_locate_empty_record() {
        let reader = sample_reader();
        let location = reader.locate("10.20.30.40".parse().unwrap()).unwrap();
        assert_eq!(location, Location::default());
    }

    #[test]
    fn test_metadata_exposed() {
        let reader = sample_reader();
        assert_eq!(reader.metadata().fields.len(), FIELDS.len());
        assert!(reader.metadata().supports_ipv4());
        assert!(!reader.metadata().supports_ipv6());
    }

    #[test]
    fn test_rejects_truncated_file() {
        let err = IpdbReader::from_bytes(vec![0, 0], "CN").unwrap_err();
        assert!(matches!(err, DatabaseError::Truncated(_)));

        let err = IpdbReader::from_bytes(vec![0, 0, 0, 200, b'{'], "CN").unwrap_err();
        assert!(matches!(err, DatabaseError::Truncated(_)));
    }

    #[test]
    fn test_rejects_invalid_metadata() {
        let mut bytes = 3u32.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"abc");
        let err = IpdbReader::from_bytes(bytes, "CN").unwrap_err();
        assert!(matches!(err, DatabaseError::Metadata(_)));
    }

    #[test]
    fn test_rejects_size_mismatch() {
        let mut bytes = IpdbWriter::new(FIELDS).build();
        bytes.push(0);
        let err = IpdbReader::from_bytes(bytes, "CN").unwrap_err();
        assert!(matches!(err, DatabaseError::SizeMismatch { .. }));
    }

    #[test]
    fn test_rejects_unknown_language() {
        let err = IpdbReader::from_bytes(IpdbWriter::new(FIELDS).build(), "EN").unwrap_err();
        assert!(matches!(err, DatabaseError::UnknownLanguage(ref lang) if lang == "EN"));
    }

    #[test]
    fn test_out_of_range_language_offset_is_corrupt_record() {
        let mut writer = IpdbWriter::new(FIELDS);
        writer.insert_v4(Ipv4Addr::new(1, 2, 3, 0), 24, &["China", "", "", ""]);
        let bytes = writer.build();

        // Rewrite the metadata so CN points past the end of every record
        let meta_len = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        let mut meta: serde_json::Value = serde_json::from_slice(&bytes[4..4 + meta_len]).unwrap();
        meta["languages"]["CN"] = serde_json::json!(usize::MAX);
        let meta = serde_json::to_vec(&meta).unwrap();
        let mut patched = (meta.len() as u32).to_be_bytes().to_vec();
        patched.extend_from_slice(&meta);
        patched.extend_from_slice(&bytes[4 + meta_len..]);

        let reader = IpdbReader::from_bytes(patched, "CN").expect("layout is still valid");
        assert!(matches!(
            reader.find("1.2.3.4".parse().unwrap()),
            Err(LookupError::CorruptRecord(_))
        ));
    }

    #[test]
    fn test_empty_database_finds_nothing() {
        let reader = IpdbReader::from_bytes(IpdbWriter::new(FIELDS).build(), "CN").unwrap();
        assert_eq!(
            reader.find("1.1.1.1".parse().unwrap()),
            Err(LookupError::NotFound)
        );
    }
}

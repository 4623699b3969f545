// Minimal IPDB writer for building fixture databases in tests.
//
// Only IPv4 networks and a single "CN" language are supported, which is all the
// reader tests need.

use std::collections::HashMap;
use std::net::Ipv4Addr;

#[derive(Clone, Copy)]
enum Child {
    Empty,
    Node(usize),
    Record(usize),
}

pub(crate) struct IpdbWriter {
    fields: Vec<String>,
    nodes: Vec<[Child; 2]>,
    records: Vec<u8>,
    offsets: HashMap<String, usize>,
}

impl IpdbWriter {
    pub(crate) fn new(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            nodes: vec![[Child::Empty, Child::Empty]],
            // A record at offset 0 would encode as `node_count`, i.e. "no data".
            records: vec![0, 0],
            offsets: HashMap::new(),
        }
    }

    /// Maps `network/prefix` to `values` (one per field).
    pub(crate) fn insert_v4(&mut self, network: Ipv4Addr, prefix: u8, values: &[&str]) {
        assert_eq!(values.len(), self.fields.len(), "one value per field");
        assert!((1..=32).contains(&prefix), "prefix must be 1..=32");

        let record = self.record(&values.join("\t"));
        let octets = network.octets();
        let total_bits = 96 + prefix as usize;

        let mut node = 0;
        for i in 0..total_bits {
            let bit = if i < 80 {
                0
            } else if i < 96 {
                1
            } else {
                let j = i - 96;
                ((octets[j >> 3] >> (7 - (j % 8))) & 1) as usize
            };

            if i == total_bits - 1 {
                self.nodes[node][bit] = Child::Record(record);
                break;
            }
            node = match self.nodes[node][bit] {
                Child::Node(next) => next,
                Child::Empty => {
                    self.nodes.push([Child::Empty, Child::Empty]);
                    let next = self.nodes.len() - 1;
                    self.nodes[node][bit] = Child::Node(next);
                    next
                }
                Child::Record(_) => panic!("overlapping networks are not supported"),
            };
        }
    }

    fn record(&mut self, body: &str) -> usize {
        if let Some(offset) = self.offsets.get(body) {
            return *offset;
        }
        let offset = self.records.len();
        let len = u16::try_from(body.len()).expect("record too long");
        self.records.extend_from_slice(&len.to_be_bytes());
        self.records.extend_from_slice(body.as_bytes());
        self.offsets.insert(body.to_string(), offset);
        offset
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let node_count = self.nodes.len();
        let mut data = Vec::with_capacity(node_count * 8 + self.records.len());
        for children in &self.nodes {
            for child in children {
                let value = match *child {
                    Child::Empty => node_count,
                    Child::Node(next) => next,
                    Child::Record(offset) => node_count + offset,
                };
                data.extend_from_slice(&(value as u32).to_be_bytes());
            }
        }
        data.extend_from_slice(&self.records);

        let metadata = serde_json::json!({
            "build": 1_700_000_000,
            "ip_version": 1,
            "languages": { "CN": 0 },
            "node_count": node_count,
            "total_size": data.len(),
            "fields": self.fields,
        });
        let metadata = serde_json::to_vec(&metadata).expect("metadata serializes");

        let mut bytes = (metadata.len() as u32).to_be_bytes().to_vec();
        bytes.extend_from_slice(&metadata);
        bytes.extend_from_slice(&data);
        bytes
    }
}

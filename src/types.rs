use crate::pup::*;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
/// Listing output type
pub enum OutputType {
    /// One line per entry
    Text,
    /// JSON document with header and entries
    Json,
}

/// Options for the extract command.
pub struct ExtractConfig {
    /// Only extract entries whose file name contains one of these substrings.
    pub filter: Vec<String>,
    /// Write stored bytes without inflating them.
    pub raw: bool,
}

impl ExtractConfig {
    pub fn matches(&self, file_name: &str) -> bool {
        self.filter.is_empty() || self.filter.iter().any(|f| file_name.contains(f.as_str()))
    }
}

#[derive(Debug, Serialize)]
/// Public view of a header, with enum interpretations resolved.
pub struct HeaderInfo<'a> {
    #[serde(flatten)]
    pub header: &'a Header,
    pub endianness_kind: Endianness,
    pub content_type_kind: ContentType,
    pub product_type_kind: ProductType,
}

impl<'a> From<&'a Header> for HeaderInfo<'a> {
    fn from(header: &'a Header) -> Self {
        Self {
            header,
            endianness_kind: header.endianness_kind(),
            content_type_kind: header.content_type_kind(),
            product_type_kind: header.product_type_kind(),
        }
    }
}

#[derive(Debug, Serialize)]
/// Public view of an entry record, with flags decomposed.
pub struct EntryInfo {
    pub index: usize,
    pub entry_id: u64,
    pub file_name: &'static str,
    pub device_path: &'static str,
    #[serde(flatten)]
    pub record: EntryRecord,
    pub compressed: bool,
    pub blocked: bool,
}

impl EntryInfo {
    pub fn new(index: usize, record: &EntryRecord) -> Self {
        Self {
            index,
            entry_id: record.entry_id(),
            file_name: record.file_name(),
            device_path: record.device_path(),
            record: *record,
            compressed: record.compressed(),
            blocked: record.blocked(),
        }
    }

    /// Name used when writing this entry to disk.
    pub fn output_name(&self) -> String {
        if self.file_name == tables::UNKNOWN {
            format!("{:04}_{:#x}.bin", self.index, self.entry_id)
        } else {
            format!("{:04}_{}", self.index, self.file_name)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PupInfo<'a> {
    pub header: HeaderInfo<'a>,
    pub entries: Vec<EntryInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_info_json() {
        let record = EntryRecord {
            flags: 0x10106C0E,
            offset: 0x100,
            file_size: 0x20,
            memory_size: 0x40,
        };
        let info = EntryInfo::new(1, &record);
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["entry_id"], 0x101);
        assert_eq!(value["file_name"], "eula.xml");
        assert_eq!(value["flags"], 0x10106C0Eu64);
        assert_eq!(value["memory_size"], 0x40);
        assert_eq!(value["compressed"], true);
        assert_eq!(value["blocked"], true);
        assert_eq!(info.output_name(), "0001_eula.xml");
    }

    #[test]
    fn test_unknown_output_name() {
        let record = EntryRecord {
            flags: 0xABC << 20,
            offset: 0,
            file_size: 0,
            memory_size: 0,
        };
        assert_eq!(EntryInfo::new(12, &record).output_name(), "0012_0xabc.bin");
    }

    #[test]
    fn test_extract_filter() {
        let mut config = ExtractConfig {
            filter: Vec::new(),
            raw: false,
        };
        assert!(config.matches("eula.xml"));
        config.filter = vec![String::from(".img"), String::from("eula")];
        assert!(config.matches("eula.xml"));
        assert!(config.matches("system_exfat.img"));
        assert!(!config.matches("emc_ipl.slb"));
    }
}

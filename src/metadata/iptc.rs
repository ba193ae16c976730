//! IPTC IIM reader.
//!
//! IPTC descriptive fields ride inside JPEG APP13 segments as Photoshop
//! image-resource blocks (`8BIM`), resource id 0x0404. Each resource holds a
//! sequence of IIM datasets: a 0x1C tag marker, record and dataset numbers,
//! a big-endian length, and the value bytes.

/// Record 2 dataset numbers for the fields Arion reports.
pub const SUBJECT_REFERENCE: u8 = 12;
pub const KEYWORDS: u8 = 25;
pub const SPECIAL_INSTRUCTIONS: u8 = 40;
pub const CITY: u8 = 90;
pub const PROVINCE_STATE: u8 = 95;
pub const COUNTRY_CODE: u8 = 100;
pub const COUNTRY_NAME: u8 = 101;
pub const COPYRIGHT_NOTICE: u8 = 116;
pub const CAPTION: u8 = 120;

const PHOTOSHOP_HEADER: &[u8] = b"Photoshop 3.0\0";
const RESOURCE_SIGNATURE: &[u8] = b"8BIM";
const IPTC_RESOURCE_ID: u16 = 0x0404;

const MARKER_APP13: u8 = 0xED;
const MARKER_SOS: u8 = 0xDA;
const MARKER_EOI: u8 = 0xD9;

/// A single IIM dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSet {
    pub record: u8,
    pub dataset: u8,
    pub data: Vec<u8>,
}

/// Extract every IIM dataset from the APP13 segments of a JPEG byte stream.
///
/// Tolerant by construction: anything that fails to parse simply yields no
/// datasets. Non-JPEG input returns an empty list.
pub fn datasets(jpeg: &[u8]) -> Vec<DataSet> {
    let mut out = Vec::new();
    for payload in app13_segments(jpeg) {
        for resource in iptc_resources(payload) {
            parse_datasets(resource, &mut out);
        }
    }
    out
}

/// Walk the JPEG marker stream and collect APP13 payloads.
fn app13_segments(jpeg: &[u8]) -> Vec<&[u8]> {
    let mut segments = Vec::new();
    if jpeg.len() < 2 || jpeg[0] != 0xFF || jpeg[1] != 0xD8 {
        return segments;
    }
    let mut pos = 2;
    while pos + 1 < jpeg.len() {
        if jpeg[pos] != 0xFF {
            break;
        }
        // Fill bytes before a marker are legal
        while pos + 1 < jpeg.len() && jpeg[pos + 1] == 0xFF {
            pos += 1;
        }
        if pos + 1 >= jpeg.len() {
            break;
        }
        let marker = jpeg[pos + 1];
        pos += 2;
        match marker {
            MARKER_SOS | MARKER_EOI => break,
            // Standalone markers carry no length field
            0x01 | 0xD0..=0xD7 => continue,
            _ => {}
        }
        if pos + 2 > jpeg.len() {
            break;
        }
        let len = u16::from_be_bytes([jpeg[pos], jpeg[pos + 1]]) as usize;
        if len < 2 || pos + len > jpeg.len() {
            break;
        }
        if marker == MARKER_APP13 {
            segments.push(&jpeg[pos + 2..pos + len]);
        }
        pos += len;
    }
    segments
}

/// Walk the Photoshop resource blocks of one APP13 payload and return the
/// data of every IPTC (0x0404) resource.
fn iptc_resources(payload: &[u8]) -> Vec<&[u8]> {
    let mut resources = Vec::new();
    let Some(mut rest) = payload.strip_prefix(PHOTOSHOP_HEADER) else {
        return resources;
    };
    while rest.len() >= 12 {
        if &rest[..4] != RESOURCE_SIGNATURE {
            break;
        }
        let id = u16::from_be_bytes([rest[4], rest[5]]);
        // Pascal name, padded so name length + size byte is even
        let name_len = rest[6] as usize;
        let mut offset = 7 + name_len;
        if (1 + name_len) % 2 != 0 {
            offset += 1;
        }
        if rest.len() < offset + 4 {
            break;
        }
        let size =
            u32::from_be_bytes([rest[offset], rest[offset + 1], rest[offset + 2], rest[offset + 3]])
                as usize;
        offset += 4;
        if rest.len() < offset + size {
            break;
        }
        if id == IPTC_RESOURCE_ID {
            resources.push(&rest[offset..offset + size]);
        }
        offset += size;
        if size % 2 != 0 {
            offset += 1;
        }
        rest = &rest[offset.min(rest.len())..];
    }
    resources
}

fn parse_datasets(block: &[u8], out: &mut Vec<DataSet>) {
    let mut pos = 0;
    while pos + 5 <= block.len() {
        if block[pos] != 0x1C {
            break;
        }
        let record = block[pos + 1];
        let dataset = block[pos + 2];
        let len = u16::from_be_bytes([block[pos + 3], block[pos + 4]]) as usize;
        // Extended datasets (high bit set) never occur in the record-2 text
        // fields handled here
        if len >= 0x8000 {
            break;
        }
        pos += 5;
        if pos + len > block.len() {
            break;
        }
        out.push(DataSet {
            record,
            dataset,
            data: block[pos..pos + len].to_vec(),
        });
        pos += len;
    }
}

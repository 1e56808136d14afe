//! Deciding how precompiled binaries link.
//!
//! The decision is made from the first bytes of the binary: a Mach-O
//! dynamic library or bundle links dynamically, an `ar` archive statically.
//! Universal binaries are judged by their first slice.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use super::node::Linking;

const MH_MAGIC: u32 = 0xfeed_face;
const MH_MAGIC_64: u32 = 0xfeed_facf;
const MH_CIGAM: u32 = 0xcefa_edfe;
const MH_CIGAM_64: u32 = 0xcffa_edfe;
const FAT_MAGIC: u32 = 0xcafe_babe;
const FAT_MAGIC_64: u32 = 0xcafe_babf;

const MH_DYLIB: u32 = 6;
const MH_BUNDLE: u32 = 8;

const AR_MAGIC: &[u8] = b"!<arch>\n";

/// Reads the linking of a binary.
pub trait BinaryInspector: Send + Sync {
    /// `None` when the binary cannot be read or is not recognised.
    fn linking(&self, binary: &Path) -> Option<Linking>;
}

/// Inspects Mach-O headers on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct MachOInspector;

impl BinaryInspector for MachOInspector {
    fn linking(&self, binary: &Path) -> Option<Linking> {
        let mut file = File::open(binary).ok()?;
        let mut header = [0u8; 32];
        let len = read_up_to(&mut file, &mut header)?;
        let header = &header[..len];

        if let Some(linking) = linking_from_header(header) {
            return Some(linking);
        }

        let offset = fat_first_slice_offset(header)?;
        file.seek(SeekFrom::Start(offset)).ok()?;
        let mut slice = [0u8; 16];
        let len = read_up_to(&mut file, &mut slice)?;
        linking_from_header(&slice[..len])
    }
}

fn read_up_to(file: &mut File, buf: &mut [u8]) -> Option<usize> {
    let mut total = 0;
    while total < buf.len() {
        match file.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(_) => return None,
        }
    }
    Some(total)
}

fn u32_at(bytes: &[u8], offset: usize, big_endian: bool) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(offset..offset + 4)?.try_into().ok()?;
    Some(if big_endian {
        u32::from_be_bytes(raw)
    } else {
        u32::from_le_bytes(raw)
    })
}

/// Linking of a thin Mach-O file or an archive, from its first bytes.
pub fn linking_from_header(bytes: &[u8]) -> Option<Linking> {
    if bytes.starts_with(AR_MAGIC) {
        return Some(Linking::Static);
    }

    let big_endian = match u32_at(bytes, 0, false)? {
        MH_MAGIC | MH_MAGIC_64 => false,
        MH_CIGAM | MH_CIGAM_64 => true,
        _ => return None,
    };
    let filetype = u32_at(bytes, 12, big_endian)?;
    Some(match filetype {
        MH_DYLIB | MH_BUNDLE => Linking::Dynamic,
        _ => Linking::Static,
    })
}

/// File offset of the first slice of a universal binary.
pub fn fat_first_slice_offset(bytes: &[u8]) -> Option<u64> {
    match u32_at(bytes, 0, true)? {
        FAT_MAGIC => u32_at(bytes, 16, true).map(u64::from),
        FAT_MAGIC_64 => {
            let raw: [u8; 8] = bytes.get(16..24)?.try_into().ok()?;
            Some(u64::from_be_bytes(raw))
        }
        _ => None,
    }
}

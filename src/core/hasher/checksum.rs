//! Content checksums over full file contents.
//!
//! Uses xxHash32 (seed 0). Large files are memory-mapped to skip the
//! kernel-to-user copy; small files stream through a buffered digest.

use crate::error::HashError;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use xxhash_rust::xxh32::{xxh32, Xxh32};

/// Minimum file size to use memory-mapped I/O (1MB)
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Read buffer for streamed checksums and comparisons
const CHUNK_SIZE: usize = 64 * 1024;

const SEED: u32 = 0;

/// Compute the 32-bit checksum of a file's full contents.
pub fn checksum_file(path: &Path) -> Result<u32, HashError> {
    let io_error = |source| HashError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let len = file.metadata().map_err(io_error)?.len();

    if len >= MMAP_THRESHOLD {
        // SAFETY: the mapping is only read, and the file handle outlives it.
        // Files modified mid-scan may yield a stale checksum.
        let mmap = unsafe { Mmap::map(&file) }.map_err(io_error)?;
        return Ok(xxh32(&mmap, SEED));
    }

    let mut reader = BufReader::with_capacity(CHUNK_SIZE, file);
    let mut digest = Xxh32::new(SEED);
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let read = reader.read(&mut buffer).map_err(io_error)?;
        if read == 0 {
            break;
        }
        digest.update(&buffer[..read]);
    }

    Ok(digest.digest())
}

/// Checksum an in-memory buffer the same way [`checksum_file`] does.
pub fn checksum_bytes(bytes: &[u8]) -> u32 {
    xxh32(bytes, SEED)
}

/// Compare two files byte for byte.
pub fn files_identical(left: &Path, right: &Path) -> Result<bool, HashError> {
    let compare_error = |source| HashError::Compare {
        path: left.to_path_buf(),
        other: right.to_path_buf(),
        source,
    };

    let left_file = File::open(left).map_err(compare_error)?;
    let right_file = File::open(right).map_err(compare_error)?;

    if left_file.metadata().map_err(compare_error)?.len()
        != right_file.metadata().map_err(compare_error)?.len()
    {
        return Ok(false);
    }

    let mut left_reader = BufReader::with_capacity(CHUNK_SIZE, left_file);
    let mut right_reader = BufReader::with_capacity(CHUNK_SIZE, right_file);
    let mut left_buf = vec![0u8; CHUNK_SIZE];
    let mut right_buf = vec![0u8; CHUNK_SIZE];

    loop {
        let read = read_full(&mut left_reader, &mut left_buf).map_err(compare_error)?;
        let other = read_full(&mut right_reader, &mut right_buf).map_err(compare_error)?;

        if read != other || left_buf[..read] != right_buf[..other] {
            return Ok(false);
        }
        if read == 0 {
            return Ok(true);
        }
    }
}

/// Fill `buf` as far as the reader allows, returning the byte count
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn identical_contents_share_a_checksum() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.png");
        let b = temp_dir.path().join("b.png");
        fs::write(&a, b"same pixels").unwrap();
        fs::write(&b, b"same pixels").unwrap();

        assert_eq!(checksum_file(&a).unwrap(), checksum_file(&b).unwrap());
    }

    #[test]
    fn different_contents_differ() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.png");
        let b = temp_dir.path().join("b.png");
        fs::write(&a, b"first image").unwrap();
        fs::write(&b, b"second image").unwrap();

        assert_ne!(checksum_file(&a).unwrap(), checksum_file(&b).unwrap());
    }

    #[test]
    fn streamed_and_mapped_checksums_agree() {
        let temp_dir = TempDir::new().unwrap();
        let large = temp_dir.path().join("large.jpg");
        let contents: Vec<u8> = (0..(MMAP_THRESHOLD as usize + 4096))
            .map(|i| (i % 251) as u8)
            .collect();
        fs::write(&large, &contents).unwrap();

        assert_eq!(checksum_file(&large).unwrap(), checksum_bytes(&contents));

        // Same data below the threshold goes through the streaming path
        let small = temp_dir.path().join("small.jpg");
        fs::write(&small, &contents[..CHUNK_SIZE * 3 + 7]).unwrap();
        assert_eq!(
            checksum_file(&small).unwrap(),
            checksum_bytes(&contents[..CHUNK_SIZE * 3 + 7])
        );
    }

    #[test]
    fn empty_file_has_a_checksum() {
        let temp_dir = TempDir::new().unwrap();
        let empty = temp_dir.path().join("empty.png");
        fs::write(&empty, b"").unwrap();

        assert_eq!(checksum_file(&empty).unwrap(), checksum_bytes(&[]));
    }

    #[test]
    fn missing_file_reports_path() {
        let error = checksum_file(Path::new("/nonexistent/photo.png")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/photo.png"));
    }

    #[test]
    fn byte_comparison_detects_differences() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.png");
        let b = temp_dir.path().join("b.png");
        let c = temp_dir.path().join("c.png");
        fs::write(&a, b"abcdef").unwrap();
        fs::write(&b, b"abcdef").unwrap();
        fs::write(&c, b"abcdeg").unwrap();

        assert!(files_identical(&a, &b).unwrap());
        assert!(!files_identical(&a, &c).unwrap());
    }
}

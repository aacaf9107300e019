use md5::Md5;
use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileHashes {
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
}

/// Sink that feeds every written chunk to all three digests.
struct DigestFanOut {
    md5: Md5,
    sha1: Sha1,
    sha256: Sha256,
}

impl DigestFanOut {
    fn new() -> Self {
        Self {
            md5: Md5::new(),
            sha1: Sha1::new(),
            sha256: Sha256::new(),
        }
    }

    fn finish(self) -> FileHashes {
        FileHashes {
            md5: format!("{:x}", self.md5.finalize()),
            sha1: format!("{:x}", self.sha1.finalize()),
            sha256: format!("{:x}", self.sha256.finalize()),
        }
    }
}

impl Write for DigestFanOut {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.md5.update(buf);
        self.sha1.update(buf);
        self.sha256.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Any read error discards all three digests.
pub fn hash_reader<R: Read + ?Sized>(reader: &mut R) -> io::Result<FileHashes> {
    let mut sink = DigestFanOut::new();
    let bytes = io::copy(reader, &mut sink)?;
    log::trace!("Hashed {} bytes", bytes);
    Ok(sink.finish())
}

pub fn hash_file(path: &Path) -> io::Result<FileHashes> {
    let mut reader = BufReader::new(File::open(path)?);
    hash_reader(&mut reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::Other, "disk went away"));
            }
            self.served = true;
            buf[0] = b'x';
            Ok(1)
        }
    }

    #[test]
    fn test_empty_input_digests() {
        let hashes = hash_reader(&mut Cursor::new(Vec::new())).unwrap();
        assert_eq!(hashes.md5, "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(hashes.sha1, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(
            hashes.sha256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_known_digests() {
        let hashes = hash_reader(&mut Cursor::new(b"abc".to_vec())).unwrap();
        assert_eq!(hashes.md5, "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(hashes.sha1, "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(
            hashes.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hashing_is_deterministic_across_chunking() {
        let content: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
        let first = hash_reader(&mut Cursor::new(content.clone())).unwrap();
        let second = hash_reader(&mut BufReader::with_capacity(7, Cursor::new(content))).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.md5.len(), 32);
        assert_eq!(first.sha1.len(), 40);
        assert_eq!(first.sha256.len(), 64);
    }

    #[test]
    fn test_read_failure_fails_the_whole_hash() {
        let err = hash_reader(&mut FailingReader { served: false }).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn test_hash_file_matches_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        std::fs::write(&path, b"abc").unwrap();
        assert_eq!(
            hash_file(&path).unwrap(),
            hash_reader(&mut Cursor::new(b"abc".to_vec())).unwrap()
        );
    }
}

//! Reading text and containers from files or readers and writing the results back.
//!
//! Everything is read completely into memory before the codec runs, so a
//! failing or empty input never leaves a partially written output behind.

use crate::errors::CodecError;
use crate::{compress, decompress};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// What to do with input bytes that are not valid UTF-8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFallback {
    /// Read every byte as one Latin-1 character instead. Never fails.
    Latin1,
    /// Fail with [`CodecError::DecodeEncoding`]
    Strict,
}

impl Default for TextFallback {
    fn default() -> Self {
        TextFallback::Latin1
    }
}

/// Sizes of the input consumed and the output produced by one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileReport {
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl FileReport {
    /// Output size relative to the input size
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }
}

/// Interpret `bytes` as UTF-8, retrying once with Latin-1 if `fallback` allows it.
pub fn read_text(bytes: Vec<u8>, fallback: TextFallback) -> Result<String, CodecError> {
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => match fallback {
            TextFallback::Strict => Err(CodecError::DecodeEncoding(err.utf8_error())),
            TextFallback::Latin1 => {
                tracing::warn!(
                    valid_up_to = err.utf8_error().valid_up_to(),
                    "input is not valid UTF-8, reading it as Latin-1"
                );
                Ok(err.into_bytes().into_iter().map(char::from).collect())
            }
        },
    }
}

pub fn read_text_file(path: &Path, fallback: TextFallback) -> Result<String, CodecError> {
    read_text(read_file(path)?, fallback)
}

/// Read all text from `source`, compress it and write the container into `drain`.
pub fn compress_stream<R: Read, W: Write>(
    mut source: R,
    mut drain: W,
    fallback: TextFallback,
) -> Result<FileReport, CodecError> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes)?;
    let input_bytes = bytes.len() as u64;
    let text = read_text(bytes, fallback)?;
    let container = compress(&text)?;
    drain.write_all(&container)?;
    drain.flush()?;
    Ok(FileReport {
        input_bytes,
        output_bytes: container.len() as u64,
    })
}

/// Read a whole container from `source` and write the recovered text as UTF-8 into `drain`.
pub fn decompress_stream<R: Read, W: Write>(
    mut source: R,
    mut drain: W,
) -> Result<FileReport, CodecError> {
    let mut container = Vec::new();
    source.read_to_end(&mut container)?;
    let text = decompress(&container)?;
    drain.write_all(text.as_bytes())?;
    drain.flush()?;
    Ok(FileReport {
        input_bytes: container.len() as u64,
        output_bytes: text.len() as u64,
    })
}

/// Compress the text file at `input` into a container at `output`.
///
/// `output` is only created once compression succeeded.
pub fn compress_file(
    input: &Path,
    output: &Path,
    fallback: TextFallback,
) -> Result<FileReport, CodecError> {
    let bytes = read_file(input)?;
    let input_bytes = bytes.len() as u64;
    let text = read_text(bytes, fallback)?;
    let container = compress(&text)?;
    write_file(output, &container)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        bytes = container.len(),
        "compressed"
    );
    Ok(FileReport {
        input_bytes,
        output_bytes: container.len() as u64,
    })
}

/// Decompress the container at `input` and write the text to `output` as UTF-8.
///
/// `output` is only created once decompression succeeded.
pub fn decompress_file(input: &Path, output: &Path) -> Result<FileReport, CodecError> {
    let container = read_file(input)?;
    let text = decompress(&container)?;
    write_file(output, text.as_bytes())?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        bytes = text.len(),
        "decompressed"
    );
    Ok(FileReport {
        input_bytes: container.len() as u64,
        output_bytes: text.len() as u64,
    })
}

fn read_file(path: &Path) -> Result<Vec<u8>, CodecError> {
    fs::read(path).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), CodecError> {
    let mut file = File::create(path).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let written = file.write_all(data).and_then(|()| file.sync_all());
    drop(file);
    keep_or_discard(path, written)
}

/// Remove the partially written file at `path` if writing it failed.
fn keep_or_discard(path: &Path, written: std::io::Result<()>) -> Result<(), CodecError> {
    let source = match written {
        Ok(()) => return Ok(()),
        Err(source) => source,
    };
    if let Err(err) = fs::remove_file(path) {
        tracing::warn!(path = %path.display(), %err, "failed to remove partial output");
    }
    Err(CodecError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{compress_stream, decompress_stream, read_text, TextFallback};
    use crate::errors::CodecError;

    #[test]
    fn utf8_passes_through() {
        let text = read_text("grüße".as_bytes().to_vec(), TextFallback::Strict).unwrap();
        assert_eq!(text, "grüße");
    }

    #[test]
    fn latin1_fallback() {
        // "café" in Latin-1
        let bytes = vec![b'c', b'a', b'f', 0xE9];
        assert_eq!(read_text(bytes, TextFallback::Latin1).unwrap(), "café");
    }

    #[test]
    fn strict_rejects_invalid_utf8() {
        let bytes = vec![b'c', b'a', b'f', 0xE9];
        assert!(matches!(
            read_text(bytes, TextFallback::Strict),
            Err(CodecError::DecodeEncoding(_))
        ));
    }

    #[test]
    fn stream_roundtrip() {
        let text = "It was the best of times, it was the worst of times";
        let mut container = Vec::new();
        let report =
            compress_stream(text.as_bytes(), &mut container, TextFallback::default()).unwrap();
        assert_eq!(report.input_bytes, text.len() as u64);
        assert_eq!(report.output_bytes, container.len() as u64);

        let mut recovered = Vec::new();
        let report = decompress_stream(container.as_slice(), &mut recovered).unwrap();
        assert_eq!(report.output_bytes, text.len() as u64);
        assert_eq!(recovered, text.as_bytes());
    }

    #[test]
    fn empty_stream_writes_nothing() {
        let mut container = Vec::new();
        let err = compress_stream(&b""[..], &mut container, TextFallback::default()).unwrap_err();
        assert!(err.is_empty_input());
        assert!(container.is_empty());
    }

    #[test]
    fn files_roundtrip() {
        let dir = std::env::temp_dir().join(format!("huffpack-io-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("input.txt");
        let packed = dir.join("input.txt.huff");
        let output = dir.join("output.txt");
        std::fs::write(&input, "she sells sea shells by the sea shore").unwrap();

        assert_eq!(
            super::read_text_file(&input, TextFallback::Strict).unwrap(),
            "she sells sea shells by the sea shore"
        );
        let report = super::compress_file(&input, &packed, TextFallback::Latin1).unwrap();
        assert!(report.ratio() > 0.0);
        super::decompress_file(&packed, &output).unwrap();
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "she sells sea shells by the sea shore"
        );

        let missing = dir.join("does-not-exist.txt");
        assert!(matches!(
            super::compress_file(&missing, &packed, TextFallback::Latin1),
            Err(CodecError::Io { path, .. }) if path == missing
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_write_removes_partial_output() {
        let dir = std::env::temp_dir().join(format!("huffpack-partial-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let output = dir.join("half-written.huff");
        std::fs::write(&output, [0u8; 3]).unwrap();

        let failure = std::io::Error::new(std::io::ErrorKind::Other, "no space left");
        assert!(matches!(
            super::keep_or_discard(&output, Err(failure)),
            Err(CodecError::Io { path, .. }) if path == output
        ));
        assert!(!output.exists());

        std::fs::write(&output, [0u8; 3]).unwrap();
        super::keep_or_discard(&output, Ok(())).unwrap();
        assert!(output.exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_file_leaves_no_output() {
        let dir = std::env::temp_dir().join(format!("huffpack-empty-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("empty.txt");
        let packed = dir.join("empty.txt.huff");
        std::fs::write(&input, "").unwrap();

        let err = super::compress_file(&input, &packed, TextFallback::Latin1).unwrap_err();
        assert!(err.is_empty_input());
        assert!(!packed.exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

//! Binary artifact format for the fitted vectorizer and regressor.
//!
//! All integers and floats are little-endian.
//!
//! Vectorizer: `b"SEOV"`, u16 version, u32 term count, then per term a
//! u32 byte length, the UTF-8 bytes, and an f64 idf.
//!
//! Regressor: `b"SEOR"`, u16 version, u32 coefficient count, f64
//! intercept, then the f64 coefficients.

use super::{LinearRegressor, ModelError, TfIdfVectorizer};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

pub const VECTORIZER_MAGIC: &[u8; 4] = b"SEOV";
pub const REGRESSOR_MAGIC: &[u8; 4] = b"SEOR";
pub const FORMAT_VERSION: u16 = 1;

/// Upper bound on a single term's byte length; anything larger is corrupt.
const MAX_TERM_BYTES: u32 = 1 << 16;

pub fn write_vectorizer(path: &Path, vectorizer: &TfIdfVectorizer) -> Result<(), ModelError> {
    let io_err = |source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    encode_vectorizer(&mut w, vectorizer).map_err(io_err)?;
    w.flush().map_err(io_err)
}

pub fn read_vectorizer(path: &Path) -> Result<TfIdfVectorizer, ModelError> {
    let file = File::open(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_vectorizer(&mut BufReader::new(file), path)
}

pub fn write_regressor(path: &Path, regressor: &LinearRegressor) -> Result<(), ModelError> {
    let io_err = |source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    encode_regressor(&mut w, regressor).map_err(io_err)?;
    w.flush().map_err(io_err)
}

pub fn read_regressor(path: &Path) -> Result<LinearRegressor, ModelError> {
    let file = File::open(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_regressor(&mut BufReader::new(file), path)
}

fn encode_vectorizer<W: Write>(w: &mut W, vectorizer: &TfIdfVectorizer) -> std::io::Result<()> {
    w.write_all(VECTORIZER_MAGIC)?;
    w.write_u16::<LittleEndian>(FORMAT_VERSION)?;
    w.write_u32::<LittleEndian>(vectorizer.vocabulary_size() as u32)?;
    for (term, idf) in vectorizer.terms().iter().zip(vectorizer.idf()) {
        w.write_u32::<LittleEndian>(term.len() as u32)?;
        w.write_all(term.as_bytes())?;
        w.write_f64::<LittleEndian>(*idf)?;
    }
    Ok(())
}

fn encode_regressor<W: Write>(w: &mut W, regressor: &LinearRegressor) -> std::io::Result<()> {
    w.write_all(REGRESSOR_MAGIC)?;
    w.write_u16::<LittleEndian>(FORMAT_VERSION)?;
    w.write_u32::<LittleEndian>(regressor.dimension() as u32)?;
    w.write_f64::<LittleEndian>(regressor.intercept())?;
    for c in regressor.coef() {
        w.write_f64::<LittleEndian>(*c)?;
    }
    Ok(())
}

fn decode_vectorizer<R: Read>(r: &mut R, path: &Path) -> Result<TfIdfVectorizer, ModelError> {
    read_header(r, path, VECTORIZER_MAGIC, "vectorizer")?;
    let corrupt = |reason: String| ModelError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };

    let count = r
        .read_u32::<LittleEndian>()
        .map_err(|e| corrupt(format!("term count: {e}")))?;
    let mut terms = Vec::new();
    let mut idf = Vec::new();
    for i in 0..count {
        let len = r
            .read_u32::<LittleEndian>()
            .map_err(|e| corrupt(format!("term {i} length: {e}")))?;
        if len > MAX_TERM_BYTES {
            return Err(corrupt(format!("term {i} length {len} too large")));
        }
        let mut bytes = vec![0u8; len as usize];
        r.read_exact(&mut bytes)
            .map_err(|e| corrupt(format!("term {i}: {e}")))?;
        let term = String::from_utf8(bytes).map_err(|e| corrupt(format!("term {i}: {e}")))?;
        let weight = r
            .read_f64::<LittleEndian>()
            .map_err(|e| corrupt(format!("idf {i}: {e}")))?;
        terms.push(term);
        idf.push(weight);
    }
    Ok(TfIdfVectorizer::from_parts(terms, idf))
}

fn decode_regressor<R: Read>(r: &mut R, path: &Path) -> Result<LinearRegressor, ModelError> {
    read_header(r, path, REGRESSOR_MAGIC, "regressor")?;
    let corrupt = |reason: String| ModelError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };

    let count = r
        .read_u32::<LittleEndian>()
        .map_err(|e| corrupt(format!("coefficient count: {e}")))?;
    let intercept = r
        .read_f64::<LittleEndian>()
        .map_err(|e| corrupt(format!("intercept: {e}")))?;
    let mut coef = Vec::new();
    for i in 0..count {
        coef.push(
            r.read_f64::<LittleEndian>()
                .map_err(|e| corrupt(format!("coefficient {i}: {e}")))?,
        );
    }
    Ok(LinearRegressor::new(coef, intercept))
}

fn read_header<R: Read>(
    r: &mut R,
    path: &Path,
    magic: &[u8; 4],
    expected: &'static str,
) -> Result<(), ModelError> {
    let mut found = [0u8; 4];
    if r.read_exact(&mut found).is_err() || &found != magic {
        return Err(ModelError::BadMagic {
            path: path.to_path_buf(),
            expected,
        });
    }
    let version = r
        .read_u16::<LittleEndian>()
        .map_err(|e| ModelError::Corrupt {
            path: path.to_path_buf(),
            reason: format!("version: {e}"),
        })?;
    if version != FORMAT_VERSION {
        return Err(ModelError::UnsupportedVersion {
            path: path.to_path_buf(),
            version,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn sample_vectorizer() -> TfIdfVectorizer {
        TfIdfVectorizer::from_parts(
            vec!["café".to_string(), "rust".to_string()],
            vec![1.5, 1.0],
        )
    }

    #[test]
    fn test_vectorizer_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v.bin");
        let v = sample_vectorizer();
        write_vectorizer(&path, &v).unwrap();
        assert_eq!(read_vectorizer(&path).unwrap(), v);
    }

    #[test]
    fn test_regressor_layout() {
        let mut buf = Vec::new();
        encode_regressor(&mut buf, &LinearRegressor::new(vec![2.0], -1.0)).unwrap();
        // magic + version + count + intercept + one coefficient
        assert_eq!(buf.len(), 4 + 2 + 4 + 8 + 8);
        assert_eq!(&buf[..4], b"SEOR");
    }

    #[test]
    fn test_wrong_magic() {
        let mut buf = Vec::new();
        encode_regressor(&mut buf, &LinearRegressor::new(vec![], 0.0)).unwrap();
        let err = decode_vectorizer(&mut Cursor::new(buf), &PathBuf::from("x")).unwrap_err();
        assert!(matches!(err, ModelError::BadMagic { expected: "vectorizer", .. }));
    }

    #[test]
    fn test_unsupported_version() {
        let mut buf = Vec::new();
        buf.extend_from_slice(REGRESSOR_MAGIC);
        buf.write_u16::<LittleEndian>(9).unwrap();
        let err = decode_regressor(&mut Cursor::new(buf), &PathBuf::from("x")).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedVersion { version: 9, .. }));
    }

    #[test]
    fn test_truncated_vectorizer() {
        let mut buf = Vec::new();
        encode_vectorizer(&mut buf, &sample_vectorizer()).unwrap();
        buf.truncate(buf.len() - 3);
        let err = decode_vectorizer(&mut Cursor::new(buf), &PathBuf::from("x")).unwrap_err();
        assert!(matches!(err, ModelError::Corrupt { .. }));
    }
}

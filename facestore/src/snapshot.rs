use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter, Read, Write};

use crate::IdentityId;
use crate::error::StoreError;
use crate::flat::{FlatIndex, Record};
use crate::metric::Metric;

/// Binary format magic and version for the index artifact.
const INDEX_MAGIC: [u8; 4] = [b'F', b'A', b'C', b'E'];
const INDEX_VERSION: u32 = 1;

/// Serialize the flat index to a writer in a compact binary format:
///
/// ```text
/// [4B magic "FACE"] [4B version=1]
/// [4B dim] [1B metric tag]
/// [4B record count]
/// For each record:
///   [4B identity id]
///   [dim x 4B float32 vector]
/// ```
///
/// All multi-byte values are little-endian.
pub(crate) fn save_index(index: &FlatIndex, w: &mut dyn Write) -> Result<(), StoreError> {
    let mut bw = BufWriter::new(w);
    let write_err = |e: std::io::Error| StoreError::Io(e.to_string());

    bw.write_all(&INDEX_MAGIC).map_err(write_err)?;
    bw.write_all(&INDEX_VERSION.to_le_bytes()).map_err(write_err)?;

    bw.write_all(&(index.dim() as u32).to_le_bytes()).map_err(write_err)?;
    bw.write_all(&[index.metric().as_u8()]).map_err(write_err)?;

    bw.write_all(&(index.records().len() as u32).to_le_bytes()).map_err(write_err)?;
    for r in index.records() {
        bw.write_all(&r.identity.to_le_bytes()).map_err(write_err)?;
        for &v in &r.vector {
            bw.write_all(&v.to_le_bytes()).map_err(write_err)?;
        }
    }

    bw.flush().map_err(write_err)?;
    Ok(())
}

/// Deserialize a flat index from a reader.
///
/// The declared dimension and metric must match the store's configuration;
/// a snapshot written under different settings is rejected rather than
/// silently reinterpreted.
pub(crate) fn load_index(
    r: &mut dyn Read,
    want_dim: usize,
    want_metric: Metric,
) -> Result<FlatIndex, StoreError> {
    let mut br = BufReader::new(r);
    let read_err = |e: std::io::Error| StoreError::Io(e.to_string());

    let mut buf4 = [0u8; 4];

    br.read_exact(&mut buf4).map_err(read_err)?;
    if buf4 != INDEX_MAGIC {
        return Err(StoreError::InvalidFormat(format!("invalid magic {buf4:?}")));
    }

    br.read_exact(&mut buf4).map_err(read_err)?;
    let version = u32::from_le_bytes(buf4);
    if version != INDEX_VERSION {
        return Err(StoreError::InvalidFormat(format!(
            "unsupported version {version} (want {INDEX_VERSION})"
        )));
    }

    br.read_exact(&mut buf4).map_err(read_err)?;
    let dim = u32::from_le_bytes(buf4) as usize;
    if dim != want_dim {
        return Err(StoreError::DimensionMismatch {
            got: dim,
            want: want_dim,
        });
    }

    let mut tag = [0u8; 1];
    br.read_exact(&mut tag).map_err(read_err)?;
    let metric = Metric::from_u8(tag[0])
        .ok_or_else(|| StoreError::InvalidFormat(format!("unknown metric tag {}", tag[0])))?;
    if metric != want_metric {
        return Err(StoreError::InvalidFormat(format!(
            "snapshot metric {metric:?} does not match configured {want_metric:?}"
        )));
    }

    br.read_exact(&mut buf4).map_err(read_err)?;
    let count = u32::from_le_bytes(buf4) as usize;

    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        br.read_exact(&mut buf4).map_err(read_err)?;
        let identity = IdentityId::from_le_bytes(buf4);

        let mut vector = vec![0.0f32; dim];
        for v in &mut vector {
            let mut fb = [0u8; 4];
            br.read_exact(&mut fb).map_err(read_err)?;
            *v = f32::from_le_bytes(fb);
        }
        records.push(Record { identity, vector });
    }

    Ok(FlatIndex::from_parts(dim, metric, records))
}

/// Serialize the id→name map as a JSON object (`{"1": "Alice"}`) so the
/// artifact stays hand-inspectable next to the binary index.
pub(crate) fn save_names(
    names: &BTreeMap<IdentityId, String>,
    w: &mut dyn Write,
) -> Result<(), StoreError> {
    serde_json::to_writer_pretty(w, names).map_err(|e| StoreError::Io(e.to_string()))
}

pub(crate) fn load_names(r: &mut dyn Read) -> Result<BTreeMap<IdentityId, String>, StoreError> {
    serde_json::from_reader(r).map_err(|e| StoreError::InvalidFormat(e.to_string()))
}

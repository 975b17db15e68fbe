// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading of the precomputed FAQ artifacts.
//!
//! The offline job writes two files: a 2-D float matrix in NumPy `.npy`
//! format (one row per FAQ entry) and a JSON array of metadata objects in
//! the same order. Both must exist and agree on the row count.

use std::path::Path;

use mesa_core::{ArtifactKind, MesaError};
use ndarray::{Array2, ShapeBuilder};
use npyz::{NpyFile, Order, WriteOptions, WriterBuilder};
use tracing::debug;

use crate::types::{EmbeddingRecord, FaqMetadata};

/// Load the embedding matrix and metadata and pair them row by row.
///
/// Returns the records and the vector dimension. Fails fast if either file
/// is missing, unreadable, or the two disagree on the number of entries.
pub fn load_records(
    embeddings_path: &Path,
    metadata_path: &Path,
) -> Result<(Vec<EmbeddingRecord>, usize), MesaError> {
    let matrix = read_embeddings(embeddings_path)?;
    let metadata = read_metadata(metadata_path)?;

    if matrix.nrows() != metadata.len() {
        return Err(MesaError::CorruptArtifact {
            path: metadata_path.to_path_buf(),
            reason: format!(
                "metadata has {} entries but the embedding matrix has {} rows",
                metadata.len(),
                matrix.nrows()
            ),
        });
    }

    let dimension = matrix.ncols();
    let records = matrix
        .rows()
        .into_iter()
        .zip(metadata)
        .map(|(row, meta)| EmbeddingRecord::from_metadata(row.to_vec(), meta))
        .collect::<Vec<_>>();

    debug!(
        records = records.len(),
        dimension,
        embeddings = %embeddings_path.display(),
        "knowledge artifacts loaded"
    );
    Ok((records, dimension))
}

/// Read a 2-D float matrix from a `.npy` file.
pub fn read_embeddings(path: &Path) -> Result<Array2<f32>, MesaError> {
    let bytes = read_artifact(path, ArtifactKind::Embeddings)?;
    decode_npy(&bytes).map_err(|reason| MesaError::CorruptArtifact {
        path: path.to_path_buf(),
        reason,
    })
}

/// Read the JSON array of FAQ metadata objects.
pub fn read_metadata(path: &Path) -> Result<Vec<FaqMetadata>, MesaError> {
    let bytes = read_artifact(path, ArtifactKind::Metadata)?;
    serde_json::from_slice(&bytes).map_err(|e| MesaError::CorruptArtifact {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn read_artifact(path: &Path, kind: ArtifactKind) -> Result<Vec<u8>, MesaError> {
    if !path.is_file() {
        return Err(MesaError::MissingArtifact {
            kind,
            path: path.to_path_buf(),
        });
    }
    std::fs::read(path).map_err(|e| MesaError::CorruptArtifact {
        path: path.to_path_buf(),
        reason: format!("failed to read {kind}: {e}"),
    })
}

/// Decode an in-memory `.npy` buffer holding a 2-D `f4` or `f8` matrix.
pub fn decode_npy(bytes: &[u8]) -> Result<Array2<f32>, String> {
    let file = NpyFile::new(bytes).map_err(|e| format!("invalid .npy header: {e}"))?;
    let (rows, cols) = match *file.shape() {
        [rows, cols] => (rows as usize, cols as usize),
        ref shape => {
            return Err(format!(
                "expected a 2-D matrix, found {} dimension(s)",
                shape.len()
            ));
        }
    };
    let fortran = file.order() == Order::Fortran;

    let values: Vec<f32> = match file.try_data::<f32>() {
        Ok(reader) => reader.collect::<std::io::Result<Vec<f32>>>(),
        Err(file) => {
            let reader = file.data::<f64>().map_err(|e| e.to_string())?;
            reader
                .map(|value| value.map(|v| v as f32))
                .collect::<std::io::Result<Vec<f32>>>()
        }
    }
    .map_err(|e| format!("failed to read matrix data: {e}"))?;

    Array2::from_shape_vec((rows, cols).set_f(fortran), values).map_err(|e| e.to_string())
}

/// Encode a matrix as a C-ordered `.npy` buffer of `<f4` values.
pub fn encode_npy(matrix: &Array2<f32>) -> std::io::Result<Vec<u8>> {
    let shape = [matrix.nrows() as u64, matrix.ncols() as u64];
    let mut out = Vec::new();
    let mut writer = WriteOptions::<f32>::new()
        .default_dtype()
        .shape(&shape)
        .writer(&mut out)
        .begin_nd()?;
    writer.extend(matrix.iter().copied())?;
    writer.finish()?;
    Ok(out)
}

//! Checksum-gated binary asset uploads.
//!
//! Transferring a file into a remote asset slot is a three-phase protocol:
//! prepare (may decide the content is already there), create (reserves the
//! remote record and returns byte-range transfer operations), and commit
//! (finalizes the record with the content fingerprint so the next run can
//! skip an unchanged file). The driver here is shared by every asset kind;
//! each kind supplies an [`AssetSlot`] bound to its own endpoints.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{ConnectError, Result};
use crate::http::Api;
use crate::resources::{AssetRecord, UploadOperation};

/// How a single upload invocation concluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The remote slot already holds identical content; nothing was sent
    Skipped,
    /// The file was transferred and committed under the given record id
    Uploaded { id: String },
}

/// One remote binary-asset slot, bound to the endpoints of its asset kind.
///
/// Implementations exist for screenshots, previews, review attachments,
/// and the routing coverage file.
#[async_trait]
pub trait AssetSlot: Send + Sync {
    /// The asset kind, for diagnostics
    fn kind(&self) -> &'static str;

    /// Inspect existing remote assets for `file_name`.
    ///
    /// Returns `false` when a remote asset with the same name and checksum
    /// already exists (the upload is skipped). A same-name asset with a
    /// differing checksum is deleted here so the subsequent create does not
    /// leave a stale duplicate.
    async fn prepare(&self, file_name: &str, checksum: &str) -> Result<bool>;

    /// Reserve a remote record, returning its id and transfer operations
    async fn create(&self, file_name: &str, file_size: u64) -> Result<(String, Vec<UploadOperation>)>;

    /// Finalize the record, persisting `checksum` for future comparisons
    async fn commit(&self, id: &str, checksum: &str) -> Result<()>;
}

/// Transfer one local file into one remote asset slot.
///
/// At most one of skip or create+transfer+commit happens per invocation.
/// A failure at any phase aborts without attempting later phases; a partial
/// transfer is left as-is for the remote side to expire.
pub async fn upload_file(api: &Api, path: &Path, slot: &dyn AssetSlot) -> Result<UploadOutcome> {
    let bytes = tokio::fs::read(path).await?;
    let checksum = format!("{:x}", md5::compute(&bytes));
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("asset path has no file name: {}", path.display()),
            )
        })?;

    debug!(kind = slot.kind(), file_name, checksum, "prepared upload");

    if !slot.prepare(file_name, &checksum).await? {
        info!(kind = slot.kind(), file_name, "content unchanged, skipping upload");
        return Ok(UploadOutcome::Skipped);
    }

    let (id, operations) = slot.create(file_name, bytes.len() as u64).await?;
    debug!(kind = slot.kind(), file_name, id, operations = operations.len(), "created remote asset");

    for operation in &operations {
        let end = operation
            .offset
            .checked_add(operation.length)
            .filter(|end| *end <= bytes.len() as u64)
            .ok_or(ConnectError::TransferRange {
                offset: operation.offset,
                length: operation.length,
                size: bytes.len() as u64,
            })?;
        let chunk = bytes[operation.offset as usize..end as usize].to_vec();
        api.transfer(operation, chunk).await?;
    }

    slot.commit(&id, &checksum).await?;
    info!(kind = slot.kind(), file_name, id, "committed upload");

    Ok(UploadOutcome::Uploaded { id })
}

/// The checksum gate's decision for a file name against existing assets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// A same-name asset with identical checksum exists; skip the upload
    Skip,
    /// A same-name asset with a differing checksum exists; delete it first
    Replace(String),
    /// No same-name asset exists
    Absent,
}

/// Compare a local file against the assets already in a slot's scope.
///
/// The first record whose file name matches decides the outcome; a record
/// with no stored checksum counts as changed content.
pub fn gate<'a>(
    existing: impl IntoIterator<Item = &'a AssetRecord>,
    file_name: &str,
    checksum: &str,
) -> Gate {
    for record in existing {
        if record.attributes.file_name.as_deref() != Some(file_name) {
            continue;
        }
        if record.attributes.source_file_checksum.as_deref() == Some(checksum) {
            return Gate::Skip;
        }
        return Gate::Replace(record.id.clone());
    }
    Gate::Absent
}

//! Generic create-or-update matching for keyed collections.
//!
//! Every sync operation faces the same question a dozen times over: given
//! the configured descriptors (keyed by locale, name, or asset type) and
//! the records currently on the catalog service, which remote records
//! should be updated, which descriptors need a record created, and which
//! remote records are simply not ours to manage? [`plan`] answers that
//! question without performing I/O; [`Plan::dispatch`] then schedules one
//! action per decided key on a task group.

use std::collections::{HashMap, HashSet};
use std::future::Future;

use orchard_core::TaskGroup;
use tracing::{debug, warn};

/// A key present both locally and remotely: update the remote record
#[derive(Debug)]
pub struct Matched<'a, R, L> {
    /// The remote record to update
    pub record: &'a R,
    /// The shared natural key
    pub key: &'a str,
    /// The local descriptor holding the desired state
    pub local: &'a L,
}

/// A key present only locally: create a remote record
#[derive(Debug)]
pub struct Missing<'a, L> {
    /// The natural key of the descriptor
    pub key: &'a str,
    /// The local descriptor holding the desired state
    pub local: &'a L,
}

/// The partition of keys produced by [`plan`].
///
/// Every key in the union of local and remote keys lands in exactly one of
/// `matched`, `missing`, or `unmanaged`; local entries without a usable key
/// are counted in `skipped` and never acted on.
#[derive(Debug)]
pub struct Plan<'a, R, L> {
    /// Remote records with a local counterpart, in remote listing order
    pub matched: Vec<Matched<'a, R, L>>,
    /// Local descriptors with no remote counterpart, in local order
    pub missing: Vec<Missing<'a, L>>,
    /// Remote records the configuration does not mention; left untouched
    pub unmanaged: Vec<&'a R>,
    /// Local entries skipped because their key field was empty
    pub skipped: usize,
}

/// Partition remote records and local descriptors by natural key.
///
/// `kind` names the collection in diagnostics. Keys are compared as exact,
/// case-sensitive strings. A local entry with a `None` or empty key is an
/// omission, not a failure: it is logged and excluded from the partition.
pub fn plan<'a, R, L>(
    kind: &str,
    remote: &'a [R],
    remote_key: impl Fn(&'a R) -> Option<&'a str>,
    local: impl IntoIterator<Item = (Option<&'a str>, &'a L)>,
) -> Plan<'a, R, L> {
    let mut entries: Vec<(&'a str, &'a L)> = Vec::new();
    let mut by_key: HashMap<&'a str, &'a L> = HashMap::new();
    let mut skipped = 0;

    for (key, descriptor) in local {
        match key {
            Some(key) if !key.is_empty() => {
                entries.push((key, descriptor));
                by_key.insert(key, descriptor);
            }
            _ => {
                skipped += 1;
                warn!(kind, "descriptor is missing its key field, skipping");
            }
        }
    }

    let mut matched = Vec::new();
    let mut unmanaged = Vec::new();
    let mut found: HashSet<&str> = HashSet::new();

    for record in remote {
        match remote_key(record) {
            Some(key) if by_key.contains_key(key) => {
                debug!(kind, key, "found remote record");
                found.insert(key);
                matched.push(Matched {
                    record,
                    key,
                    local: by_key[key],
                });
            }
            _ => {
                debug!(kind, "remote record not in configuration, leaving untouched");
                unmanaged.push(record);
            }
        }
    }

    let missing = entries
        .into_iter()
        .filter(|(key, _)| !found.contains(key))
        .map(|(key, local)| Missing { key, local })
        .collect();

    Plan {
        matched,
        missing,
        unmanaged,
        skipped,
    }
}

impl<'a, R, L> Plan<'a, R, L> {
    /// Schedule one update per matched key and one create per missing key.
    ///
    /// Actions run concurrently on the group; they are commutative by
    /// construction since no two target the same remote entity. An action
    /// may itself schedule nested work on a clone of the same group.
    pub fn dispatch<E, U, FU, C, FC>(&self, group: &TaskGroup<E>, mut update: U, mut create: C)
    where
        E: Send + 'static,
        U: FnMut(&'a R, &'a str, &'a L) -> FU,
        FU: Future<Output = Result<(), E>> + Send + 'static,
        C: FnMut(&'a str, &'a L) -> FC,
        FC: Future<Output = Result<(), E>> + Send + 'static,
    {
        for entry in &self.matched {
            group.go(update(entry.record, entry.key, entry.local));
        }
        for entry in &self.missing {
            group.go(create(entry.key, entry.local));
        }
    }
}

use std::{fs, path::Path};

use cadence::domain::Snapshot;

/// Writes `snapshot` as pretty JSON, the shape `load_snapshot_from_file` reads.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) {
    let json = serde_json::to_string_pretty(snapshot).expect("serialize snapshot");
    fs::write(path, json).expect("write snapshot file");
}

//! LMDB environment setup.

use std::path::{Path, PathBuf};

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::LmdbError;

/// Name of the commitments database inside the environment.
pub const COMMITMENTS_DB: &str = "commitments";

/// Default map size: 64 MiB is far more than one slot per committer needs.
pub const DEFAULT_MAP_SIZE: usize = 64 * 1024 * 1024;

const MAX_DBS: u32 = 4;

/// Wraps the LMDB environment and its database handles.
pub struct LmdbEnvironment {
    env: Env,
    path: PathBuf,
    pub(crate) commitments_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at `path`, creating the directory
    /// and the commitments database if missing.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        let mut options = EnvOpenOptions::new();
        options.map_size(map_size).max_dbs(MAX_DBS);
        // SAFETY: the environment is opened once per path by this process and
        // the file is not modified by anything that bypasses LMDB.
        let env = unsafe { options.open(path)? };

        let mut wtxn = env.write_txn()?;
        let commitments_db: Database<Bytes, Bytes> =
            env.create_database(&mut wtxn, Some(COMMITMENTS_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env,
            path: path.to_path_buf(),
            commitments_db,
        })
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

//! Flat-file credential store gating access to the weather report.
//!
//! Records live in `users.txt` under the platform user-data directory, one
//! `username,password,email` line per user (email may be empty). The file
//! is read once when the store opens and rewritten in full after every
//! mutation. The in-memory map is authoritative between saves; nothing
//! guards against a second process writing the same file concurrently.

use anyhow::{Result, anyhow};
use directories::ProjectDirs;
use std::{collections::HashMap, fs, io, path::PathBuf};
use thiserror::Error;

/// One stored username/password/optional-email record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

impl Credential {
    fn new(username: String, password: String) -> Self {
        Self { username, password, email: None }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create credential directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write credential file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// In-memory username-to-credential map synchronized to a flat text file.
#[derive(Debug)]
pub struct UserStore {
    users: HashMap<String, Credential>,
    path: PathBuf,
}

impl UserStore {
    /// Open the store backed by `path`, loading whatever is already there.
    ///
    /// A missing or unreadable file is not an error: the store simply
    /// starts empty. Lines that do not have exactly three comma-separated
    /// fields are skipped.
    pub fn open(path: PathBuf) -> Self {
        let mut store = Self { users: HashMap::new(), path };
        store.load();
        store
    }

    /// Open the store at its default platform location.
    pub fn load_default() -> Result<Self> {
        Ok(Self::open(Self::default_file_path()?))
    }

    /// Path to `users.txt` in the platform user-data directory.
    pub fn default_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weathergate", "weathergate")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("users.txt"))
    }

    fn load(&mut self) {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(err) => {
                // First run or unreadable file: start empty.
                if err.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), %err, "could not read credential file, starting empty");
                }
                return;
            }
        };

        for line in contents.lines() {
            let parts: Vec<&str> = line.split(',').collect();
            if parts.len() != 3 {
                continue;
            }

            let email = if parts[2].is_empty() { None } else { Some(parts[2].to_string()) };
            let credential = Credential {
                username: parts[0].to_string(),
                password: parts[1].to_string(),
                email,
            };
            self.users.insert(credential.username.clone(), credential);
        }
    }

    /// Rewrite the whole backing file from the in-memory map.
    ///
    /// A failed write leaves whatever was on disk before untouched; the
    /// error is returned for the caller to report, not retried.
    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| StoreError::CreateDir { path: parent.to_path_buf(), source })?;
        }

        let mut contents = String::new();
        for credential in self.users.values() {
            let email = credential.email.as_deref().unwrap_or("");
            contents.push_str(&format!(
                "{},{},{}\n",
                credential.username, credential.password, email
            ));
        }

        fs::write(&self.path, contents)
            .map_err(|source| StoreError::Write { path: self.path.clone(), source })
    }

    /// Register a user. First registration wins: if the username already
    /// exists the stored password is left alone and the call is a no-op;
    /// the file is still rewritten even on that path.
    pub fn add_user(&mut self, username: &str, password: &str) -> Result<(), StoreError> {
        if !self.users.contains_key(username) {
            self.users.insert(
                username.to_string(),
                Credential::new(username.to_string(), password.to_string()),
            );
        }
        self.save()
    }

    /// Attach an email to an existing user and persist. Unknown usernames
    /// are ignored (the save still runs).
    pub fn set_email(&mut self, username: &str, email: &str) -> Result<(), StoreError> {
        if let Some(credential) = self.users.get_mut(username) {
            credential.email = Some(email.to_string());
        }
        self.save()
    }

    /// True iff the username exists and the stored password matches the
    /// supplied one exactly. No hashing, no normalization.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.users.get(username).is_some_and(|c| c.password == password)
    }

    pub fn get(&self, username: &str) -> Option<&Credential> {
        self.users.get(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::chunk::Chunk;
use crate::digest::Hasher;
use crate::error::{Error, Result};
use crate::metadata::{Observation, Snapshot};
use crate::options::FileOptions;
use crate::{symlink, sys};
use diagnostics::{debug, warn};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Which stream, if any, a handle currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Closed,
    Reading,
    Writing,
}

#[derive(Debug)]
enum Stream {
    Closed,
    Reading(BufReader<File>),
    Writing(File),
}

#[derive(Debug)]
struct CachedDigest {
    hex: String,
    observed: Observation,
}

/// A single file on the host filesystem.
///
/// Metadata is a snapshot: accessors such as [`FileHandle::cursize`] report
/// what the most recent [`FileHandle::restat`] saw and never touch the
/// disk. Two restats taken around some other work can therefore be
/// compared without the work itself changing the answers.
///
/// A handle owns at most one open stream. Reads and writes address the
/// file by offset; [`FileHandle::readln`] reads sequentially from the same
/// input stream. The stream is closed by [`FileHandle::close`],
/// [`FileHandle::remove`], reopening, or dropping the handle.
///
/// If the name ends in the link extension and the file holds a target
/// path, the handle is a portable link: [`FileHandle::path`] stays the
/// link's own name while metadata, reads, writes and digests use the
/// target.
#[derive(Debug)]
pub struct FileHandle {
    path: PathBuf,
    link: Option<PathBuf>,
    options: FileOptions,
    snapshot: Snapshot,
    /// Size and mtime seen by the previous `is_stable` call
    stability: Option<Observation>,
    stream: Stream,
    eof: bool,
    digest: Option<CachedDigest>,
}

impl FileHandle {
    /// Create a handle for `name`, inside `dir` if given, with default options
    pub fn new<P: AsRef<Path>>(dir: Option<&Path>, name: P) -> Result<Self> {
        Self::with_options(dir, name, FileOptions::default())
    }

    /// Create a handle with explicit options. The link (if any) is
    /// resolved and the metadata captured before returning.
    pub fn with_options<P: AsRef<Path>>(
        dir: Option<&Path>,
        name: P,
        options: FileOptions,
    ) -> Result<Self> {
        let name = name.as_ref();
        let path = match dir {
            Some(dir) => dir.join(name),
            None => name.to_path_buf(),
        };
        if path.as_os_str().is_empty() {
            return Err(Error::EmptyPath);
        }

        let mut handle = Self {
            path,
            link: None,
            options,
            snapshot: Snapshot::default(),
            stability: None,
            stream: Stream::Closed,
            eof: false,
            digest: None,
        };

        // A broken link is still a usable handle on the link file itself
        if let Err(e) = handle.resolve_link() {
            let path = handle.path.display().to_string();
            let err = e.to_string();
            warn!("Treating {path} as a plain file: {err}", path: path, err: err.as_str());
        }
        handle.restat();
        Ok(handle)
    }

    /// Independent copy with the same path, link and options, a freshly
    /// captured snapshot and no open stream
    #[must_use]
    pub fn duplicate(&self) -> Self {
        let mut copy = Self {
            path: self.path.clone(),
            link: self.link.clone(),
            options: self.options.clone(),
            snapshot: Snapshot::default(),
            stability: None,
            stream: Stream::Closed,
            eof: false,
            digest: None,
        };
        copy.restat();
        copy
    }

    /// Path as given at construction (the link file itself for links)
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path that metadata and I/O refer to
    #[must_use]
    pub fn target(&self) -> &Path {
        self.link.as_deref().unwrap_or(&self.path)
    }

    #[must_use]
    pub fn link_target(&self) -> Option<&Path> {
        self.link.as_deref()
    }

    #[must_use]
    pub fn is_link(&self) -> bool {
        self.link.is_some()
    }

    #[must_use]
    pub fn options(&self) -> &FileOptions {
        &self.options
    }

    /// The path with `prefix` removed, when `prefix` is a proper leading
    /// part of it; otherwise the whole path
    #[must_use]
    pub fn filename(&self, prefix: Option<&Path>) -> &Path {
        match prefix.and_then(|p| self.path.strip_prefix(p).ok()) {
            Some(rest) if !rest.as_os_str().is_empty() => rest,
            _ => &self.path,
        }
    }

    /// Refresh the metadata snapshot from disk
    pub fn restat(&mut self) {
        self.snapshot = Snapshot::capture(self.target());
        let path = self.target().display().to_string();
        let size = self.snapshot.size;
        let exists = self.snapshot.exists();
        debug!(
            "Restat {path}: exists={exists} size={size}",
            path: path,
            exists: exists,
            size: size
        );
    }

    /// Metadata as of the last restat
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.snapshot.exists()
    }

    #[must_use]
    pub fn modified(&self) -> Option<SystemTime> {
        self.snapshot.modified
    }

    #[must_use]
    pub fn cursize(&self) -> u64 {
        self.snapshot.size
    }

    #[must_use]
    pub fn mode(&self) -> u32 {
        self.snapshot.mode
    }

    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.snapshot.is_directory()
    }

    #[must_use]
    pub fn is_regular(&self) -> bool {
        self.snapshot.is_regular()
    }

    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.snapshot.readable
    }

    #[must_use]
    pub fn is_writeable(&self) -> bool {
        self.snapshot.writeable
    }

    /// True if existence, size or modification time on disk differ from
    /// the snapshot. The snapshot is left untouched.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        Observation::capture(self.target()) != self.snapshot.observation()
    }

    /// True once two successive calls see the same size and modification
    /// time on an existing file.
    ///
    /// The first call on a handle is never stable, and neither is any call
    /// on a missing file. Every call refreshes the snapshot.
    pub fn is_stable(&mut self) -> bool {
        self.restat();
        let observed = self.snapshot.observation();
        let stable = observed.exists && self.stability == Some(observed);
        self.stability = Some(observed);
        stable
    }

    /// Delete the file (the link file, for links). Closes any open
    /// stream first; a missing file is not an error.
    pub fn remove(&mut self) -> Result<()> {
        self.close();
        self.digest = None;
        self.link = None;

        if self.path.is_dir() {
            sys::dir_delete(&self.path)?;
        } else {
            sys::file_delete(&self.path)?;
        }
        let path = self.path.display().to_string();
        debug!("Removed {path}", path: path);
        Ok(())
    }

    /// Open the file (or link target) for reading
    pub fn input(&mut self) -> Result<()> {
        self.close();
        if self.link.is_none() {
            self.resolve_link()?;
        }

        let target = self.target();
        let file = File::open(target).map_err(|e| Error::io(target, e))?;
        let metadata = file.metadata().map_err(|e| Error::io(target, e))?;
        if metadata.is_dir() {
            return Err(Error::is_directory(target));
        }

        let path = target.display().to_string();
        debug!("Opened {path} for reading", path: path);
        self.stream = Stream::Reading(BufReader::new(file));
        Ok(())
    }

    /// Open the file (or link target) for writing at arbitrary offsets.
    ///
    /// For a portable link, writes go to the link's target, never to the
    /// link file; the link itself is left as it was. Missing parent
    /// directories and the file itself are created with the handle's
    /// creation mode. Existing content is kept.
    pub fn output(&mut self) -> Result<()> {
        self.close();
        if self.link.is_none() {
            self.resolve_link()?;
        }

        let mode = self.options.effective_creation_mode();
        let target = self.target();
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            sys::dir_create(parent, mode)?;
        }

        let mut open = OpenOptions::new();
        open.read(true).write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            open.mode(mode.file_mode());
        }
        let file = open.open(target).map_err(|e| Error::io(target, e))?;

        let path = target.display().to_string();
        debug!("Opened {path} for writing", path: path);
        self.stream = Stream::Writing(file);
        Ok(())
    }

    /// Read up to `bytes` bytes starting at `offset`.
    ///
    /// A chunk shorter than requested means the read reached the end of
    /// the file, which [`FileHandle::eof`] then reports. The chunk is
    /// allocated for at most the bytes the file holds past `offset`, so
    /// an oversized `bytes` costs nothing.
    pub fn read(&mut self, bytes: usize, offset: u64) -> Result<Chunk> {
        self.eof = false;
        let target = self.link.as_deref().unwrap_or(&self.path);
        let Stream::Reading(reader) = &mut self.stream else {
            return Err(Error::not_open(target, "reading"));
        };

        reader
            .seek(SeekFrom::Start(offset))
            .map_err(|e| Error::io(target, e))?;

        // The buffer never exceeds what the file holds past `offset`
        let remaining = reader
            .get_ref()
            .metadata()
            .map_err(|e| Error::io(target, e))?
            .len()
            .saturating_sub(offset);
        let size = usize::try_from(remaining).map_or(bytes, |r| r.min(bytes));

        let mut chunk = Chunk::with_capacity(size);
        let buf = chunk.spare();
        let mut filled = 0;
        while filled < buf.len() {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::io(target, e)),
            }
        }
        chunk.set_len(filled);

        self.eof = filled < bytes;
        Ok(chunk)
    }

    /// True if the most recent [`FileHandle::read`] came up short
    #[must_use]
    pub fn eof(&self) -> bool {
        self.eof
    }

    /// Write all of `chunk` starting at `offset`
    pub fn write(&mut self, chunk: &Chunk, offset: u64) -> Result<()> {
        let target = self.link.as_deref().unwrap_or(&self.path);
        let Stream::Writing(file) = &mut self.stream else {
            return Err(Error::not_open(target, "writing"));
        };

        file.seek(SeekFrom::Start(offset))
            .map_err(|e| Error::io(target, e))?;

        let data = chunk.data();
        let mut written = 0;
        while written < data.len() {
            match file.write(&data[written..]) {
                Ok(0) => {
                    return Err(Error::ShortWrite {
                        path: target.to_path_buf(),
                        written,
                        expected: data.len(),
                    });
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::io(target, e)),
            }
        }
        Ok(())
    }

    /// Read the next line from the input stream, without its line
    /// terminator. `Ok(None)` at end of file.
    ///
    /// Lines continue from wherever the stream is positioned, including
    /// after an offset [`FileHandle::read`]. Bytes that are not valid
    /// UTF-8 come back as U+FFFD rather than failing the line.
    pub fn readln(&mut self) -> Result<Option<String>> {
        let target = self.link.as_deref().unwrap_or(&self.path);
        let Stream::Reading(reader) = &mut self.stream else {
            return Err(Error::not_open(target, "reading"));
        };

        let mut raw = Vec::new();
        let n = reader
            .read_until(b'\n', &mut raw)
            .map_err(|e| Error::io(target, e))?;
        if n == 0 {
            return Ok(None);
        }

        if raw.ends_with(b"\n") {
            raw.pop();
            if raw.ends_with(b"\r") {
                raw.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
    }

    /// Close the stream if one is open
    pub fn close(&mut self) {
        let was = self.state();
        self.stream = Stream::Closed;
        if was != StreamState::Closed {
            let path = self.target().display().to_string();
            debug!("Closed {path}", path: path);
        }
    }

    #[must_use]
    pub fn state(&self) -> StreamState {
        match self.stream {
            Stream::Closed => StreamState::Closed,
            Stream::Reading(_) => StreamState::Reading,
            Stream::Writing(_) => StreamState::Writing,
        }
    }

    /// The open OS file, if any
    #[must_use]
    pub fn handle(&self) -> Option<&File> {
        match &self.stream {
            Stream::Closed => None,
            Stream::Reading(reader) => Some(reader.get_ref()),
            Stream::Writing(file) => Some(file),
        }
    }

    /// Hex digest of the whole file content.
    ///
    /// The value is cached and recomputed only when existence, size or
    /// modification time differ from when it was computed. The file is
    /// read through its own descriptor, so an open stream is unaffected.
    pub fn digest(&mut self) -> Result<&str> {
        let observed = Observation::capture(self.target());
        if !observed.exists {
            self.digest = None;
            return Err(Error::not_found(self.target()));
        }

        let cached = match self.digest.take() {
            Some(cached) if cached.observed == observed => cached,
            _ => CachedDigest {
                hex: self.compute_digest()?,
                observed,
            },
        };
        Ok(&self.digest.insert(cached).hex)
    }

    fn compute_digest(&self) -> Result<String> {
        let target = self.target();
        let mut file = File::open(target).map_err(|e| Error::io(target, e))?;
        let mut hasher = Hasher::new(self.options.digest);
        let total = hasher
            .update_reader(&mut file, self.options.digest_buffer_size)
            .map_err(|e| Error::io(target, e))?;

        let path = target.display().to_string();
        debug!(
            "Computed digest of {path} over {total} bytes",
            path: path,
            total: total
        );
        Ok(hasher.finalize_hex())
    }

    /// Follow a portable link if the path names one
    fn resolve_link(&mut self) -> Result<()> {
        if !symlink::is_link_name(&self.path, &self.options.link_extension) {
            return Ok(());
        }
        self.link = symlink::read_target(&self.path)?;
        Ok(())
    }
}

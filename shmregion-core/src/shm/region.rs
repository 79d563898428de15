// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! SharedRegion - named, bounds-checked shared memory channel.
//!
//! Two families of calls:
//! - `create_new` / `connect` / `connect_or_create` return `bool`. OS refusals
//!   come back as `false`, misuse (attaching twice) panics.
//! - `write_raw` / `read_raw` and the typed accessors panic on misuse
//!   (not attached, out of bounds).
//!
//! Every call also has a `try_` form returning [`SharedMemoryError`], for
//! callers that want the reason rather than a bool or a panic.

use std::fmt;

use serde::Serialize;

use crate::config::{self, RegionConfig};
use crate::error::{FaultKind, SharedMemoryError};
use crate::name::RegionName;
use crate::shm::mapping::{Mapping, SyscallFailure};
use crate::shm::TextEncoding;
use crate::state::{Origin, RegionState};

/// A handle to one named, OS-backed block of shared memory.
///
/// Starts `Unattached`. One successful attach call moves it to `Attached`;
/// [`close`](Self::close) (or drop) unmaps and moves it back. A closed region
/// may be attached again.
///
/// # No synchronization
///
/// Nothing orders reads and writes made by different processes. A reader in
/// one process can observe a half-finished write from another. Coordinate
/// access externally (a semaphore, a turn-taking protocol, a flag byte the
/// peers agree on).
///
/// # Capacity is trusted
///
/// `connect` maps as many bytes as the caller asks for. It does not compare
/// that with the size the creator chose. Connecting with a larger capacity
/// than the object's real size is accepted, and touching the bytes past the
/// real end raises `SIGBUS`. Peers must agree on the capacity.
///
/// # Lifetime of the name
///
/// The instance that created the object unlinks its name when it closes
/// (unless [`RegionConfig::unlink_on_close`] is off). Peers that are still
/// attached keep a valid view; new `connect` calls fail from then on.
pub struct SharedRegion {
    config: RegionConfig,
    attachment: Option<Attachment>,
}

struct Attachment {
    name: RegionName,
    origin: Origin,
    mapping: Mapping,
}

/// Snapshot of an attached region.
#[derive(Debug, Clone, Serialize)]
pub struct RegionInfo {
    pub name: String,
    pub os_name: String,
    pub capacity: usize,
    pub origin: Origin,
    pub unlinks_on_close: bool,
    pub text_encoding: TextEncoding,
}

impl SharedRegion {
    /// Unattached region using the process-wide configuration.
    pub fn new() -> Self {
        Self::with_config(config::global().clone())
    }

    /// Unattached region using an explicit configuration.
    pub fn with_config(config: RegionConfig) -> Self {
        Self {
            config,
            attachment: None,
        }
    }

    // =========================================================================
    // Attach
    // =========================================================================

    /// Create a new named object of `capacity` bytes and map it.
    ///
    /// Returns `false` if the OS refuses (name taken, permission, memory) or
    /// the name/capacity is unusable. The region stays `Unattached` then.
    ///
    /// # Panics
    /// If the region is already attached.
    #[track_caller]
    pub fn create_new(&mut self, name: &str, capacity: usize) -> bool {
        let result = self.try_create_new(name, capacity);
        recover(result)
    }

    /// Open an object someone else created and map `capacity` bytes of it.
    ///
    /// Returns `false` if no such object exists or it cannot be mapped.
    ///
    /// # Panics
    /// If the region is already attached.
    #[track_caller]
    pub fn connect(&mut self, name: &str, capacity: usize) -> bool {
        let result = self.try_connect(name, capacity);
        recover(result)
    }

    /// Create the object, or connect to it if creating fails.
    ///
    /// When two processes race on a fresh name, one creates and the other's
    /// exclusive create fails, so it connects. Both end up attached to the
    /// same object. The loser can attach before the winner has sized the
    /// object, so peers must not touch it until the creator signals it is ready.
    ///
    /// # Panics
    /// If the region is already attached.
    #[track_caller]
    pub fn connect_or_create(&mut self, name: &str, capacity: usize) -> bool {
        let result = self.try_connect_or_create(name, capacity);
        recover(result)
    }

    pub fn try_create_new(&mut self, name: &str, capacity: usize) -> Result<(), SharedMemoryError> {
        self.ensure_unattached()?;
        let (name, os_name) = self.prepare(name, capacity)?;

        let mapping = Mapping::create(
            os_name,
            capacity,
            self.config.mode,
            self.config.unlink_on_close,
        )
        .map_err(|failure| attach_error(&name, Origin::Created, failure))?;

        tracing::debug!(name = %name, capacity = capacity, "Created shared memory region");
        self.attachment = Some(Attachment {
            name,
            origin: Origin::Created,
            mapping,
        });
        Ok(())
    }

    pub fn try_connect(&mut self, name: &str, capacity: usize) -> Result<(), SharedMemoryError> {
        self.ensure_unattached()?;
        let (name, os_name) = self.prepare(name, capacity)?;

        let mapping = Mapping::open(os_name, capacity)
            .map_err(|failure| attach_error(&name, Origin::Connected, failure))?;

        tracing::debug!(name = %name, capacity = capacity, "Connected to shared memory region");
        self.attachment = Some(Attachment {
            name,
            origin: Origin::Connected,
            mapping,
        });
        Ok(())
    }

    /// Create-then-connect. Returns which of the two succeeded.
    pub fn try_connect_or_create(
        &mut self,
        name: &str,
        capacity: usize,
    ) -> Result<Origin, SharedMemoryError> {
        match self.try_create_new(name, capacity) {
            Ok(()) => Ok(Origin::Created),
            Err(err) if err.kind() == FaultKind::AttachFailure => {
                tracing::debug!(name = %name, error = %err, "Create failed, connecting instead");
                self.try_connect(name, capacity)?;
                Ok(Origin::Connected)
            }
            Err(err) => Err(err),
        }
    }

    fn ensure_unattached(&self) -> Result<(), SharedMemoryError> {
        match &self.attachment {
            Some(attachment) => Err(SharedMemoryError::AlreadyAttached {
                name: attachment.name.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn prepare(
        &self,
        name: &str,
        capacity: usize,
    ) -> Result<(RegionName, std::ffi::CString), SharedMemoryError> {
        let name = RegionName::new(name)?;
        let os_name = name.os_name(&self.config.name_prefix)?;

        if capacity == 0 {
            return Err(SharedMemoryError::InvalidCapacity {
                capacity,
                reason: "Capacity must be greater than 0".to_string(),
            });
        }
        if capacity > self.config.max_capacity {
            return Err(SharedMemoryError::InvalidCapacity {
                capacity,
                reason: format!("Exceeds maximum {}", self.config.max_capacity),
            });
        }

        Ok((name, os_name))
    }

    // =========================================================================
    // Lifecycle & queries
    // =========================================================================

    /// Unmap and release the handle. Safe to call any number of times.
    pub fn close(&mut self) {
        if let Some(attachment) = self.attachment.take() {
            tracing::debug!(
                name = %attachment.name,
                origin = %attachment.origin,
                "Closing shared memory region"
            );
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn state(&self) -> RegionState {
        if self.is_attached() {
            RegionState::Attached
        } else {
            RegionState::Unattached
        }
    }

    /// Capacity in bytes, `0` when unattached.
    pub fn capacity(&self) -> usize {
        self.attachment
            .as_ref()
            .map_or(0, |attachment| attachment.mapping.len())
    }

    pub fn name(&self) -> Option<&str> {
        self.attachment
            .as_ref()
            .map(|attachment| attachment.name.as_str())
    }

    pub fn origin(&self) -> Option<Origin> {
        self.attachment.as_ref().map(|attachment| attachment.origin)
    }

    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    pub fn text_encoding(&self) -> TextEncoding {
        self.config.text_encoding
    }

    pub fn info(&self) -> Option<RegionInfo> {
        self.attachment.as_ref().map(|attachment| RegionInfo {
            name: attachment.name.to_string(),
            os_name: attachment.mapping.os_name().to_string_lossy().into_owned(),
            capacity: attachment.mapping.len(),
            origin: attachment.origin,
            unlinks_on_close: attachment.origin == Origin::Created && self.config.unlink_on_close,
            text_encoding: self.config.text_encoding,
        })
    }

    // =========================================================================
    // Raw access
    // =========================================================================

    /// Copy all of `data` into the region at `offset`.
    ///
    /// # Panics
    /// If unattached or `offset + data.len()` exceeds the capacity.
    #[track_caller]
    pub fn write_raw(&mut self, data: &[u8], offset: usize) {
        let result = self.try_write_raw(data, offset);
        or_fail_fast(result)
    }

    /// Fill `buf` from the region starting at `offset`.
    ///
    /// # Panics
    /// If unattached or `offset + buf.len()` exceeds the capacity.
    #[track_caller]
    pub fn read_raw(&self, buf: &mut [u8], offset: usize) {
        or_fail_fast(self.try_read_raw(buf, offset))
    }

    pub fn try_write_raw(&mut self, data: &[u8], offset: usize) -> Result<(), SharedMemoryError> {
        let attachment = self
            .attachment
            .as_mut()
            .ok_or(SharedMemoryError::NotAttached { operation: "write" })?;
        check_bounds(offset, data.len(), attachment.mapping.len())?;
        attachment.mapping.copy_in(offset, data);
        Ok(())
    }

    pub fn try_read_raw(&self, buf: &mut [u8], offset: usize) -> Result<(), SharedMemoryError> {
        let attachment = self
            .attachment
            .as_ref()
            .ok_or(SharedMemoryError::NotAttached { operation: "read" })?;
        check_bounds(offset, buf.len(), attachment.mapping.len())?;
        attachment.mapping.copy_out(offset, buf);
        Ok(())
    }

    // =========================================================================
    // Typed access
    //
    // Layout: i32 = 4 bytes little-endian, bool = 1 byte (0/1), byte = 1 byte,
    // text = see TextEncoding.
    // =========================================================================

    #[track_caller]
    pub fn write_i32(&mut self, value: i32, offset: usize) {
        self.write_raw(&value.to_le_bytes(), offset);
    }

    #[track_caller]
    pub fn read_i32(&self, offset: usize) -> i32 {
        let mut buf = [0u8; 4];
        self.read_raw(&mut buf, offset);
        i32::from_le_bytes(buf)
    }

    #[track_caller]
    pub fn write_bool(&mut self, value: bool, offset: usize) {
        self.write_raw(&[u8::from(value)], offset);
    }

    /// Any non-zero byte reads as `true`.
    #[track_caller]
    pub fn read_bool(&self, offset: usize) -> bool {
        self.read_byte(offset) != 0
    }

    #[track_caller]
    pub fn write_byte(&mut self, value: u8, offset: usize) {
        self.write_raw(&[value], offset);
    }

    #[track_caller]
    pub fn read_byte(&self, offset: usize) -> u8 {
        let mut buf = [0u8; 1];
        self.read_raw(&mut buf, offset);
        buf[0]
    }

    /// Write `text` as code units of the region's encoding, no terminator.
    /// Returns the number of code units written.
    #[track_caller]
    pub fn write_text(&mut self, text: &str, offset: usize) -> usize {
        let result = self.try_write_text(text, offset);
        or_fail_fast(result)
    }

    /// Read `units` code units starting at `offset`, stopping early at a NUL.
    #[track_caller]
    pub fn read_text(&self, units: usize, offset: usize) -> String {
        or_fail_fast(self.try_read_text(units, offset))
    }

    pub fn try_write_text(&mut self, text: &str, offset: usize) -> Result<usize, SharedMemoryError> {
        let encoding = self.config.text_encoding;
        let bytes = encoding.encode(text);
        self.try_write_raw(&bytes, offset)?;
        Ok(bytes.len() / encoding.unit_width())
    }

    pub fn try_read_text(&self, units: usize, offset: usize) -> Result<String, SharedMemoryError> {
        let encoding = self.config.text_encoding;
        let capacity = self.capacity();

        if !self.is_attached() {
            return Err(SharedMemoryError::NotAttached { operation: "read" });
        }
        let length = units
            .checked_mul(encoding.unit_width())
            .ok_or(SharedMemoryError::BoundsViolation {
                offset,
                length: usize::MAX,
                capacity,
            })?;
        // Check before allocating the buffer.
        check_bounds(offset, length, capacity)?;

        let mut buf = vec![0u8; length];
        self.try_read_raw(&mut buf, offset)?;
        Ok(encoding.decode(&buf))
    }
}

impl Default for SharedRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRegion")
            .field("name", &self.name())
            .field("state", &self.state())
            .field("capacity", &self.capacity())
            .field("origin", &self.origin())
            .finish()
    }
}

fn check_bounds(offset: usize, length: usize, capacity: usize) -> Result<(), SharedMemoryError> {
    match offset.checked_add(length) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(SharedMemoryError::BoundsViolation {
            offset,
            length,
            capacity,
        }),
    }
}

fn attach_error(name: &RegionName, origin: Origin, failure: SyscallFailure) -> SharedMemoryError {
    let name = name.to_string();
    let reason = if failure.is_already_exists() {
        "Shared memory already exists".to_string()
    } else {
        failure.to_string()
    };
    match (failure.syscall, origin) {
        ("mmap", _) => SharedMemoryError::MapFailed { name, reason },
        (_, Origin::Created) => SharedMemoryError::CreateFailed { name, reason },
        (_, Origin::Connected) => SharedMemoryError::OpenFailed { name, reason },
    }
}

/// OS failures become `false`; misuse panics.
#[track_caller]
fn recover<T>(result: Result<T, SharedMemoryError>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) if err.is_programmer_error() => fail_fast(err),
        Err(err) => {
            tracing::debug!(error = %err, "Shared memory attach failed");
            false
        }
    }
}

#[track_caller]
fn or_fail_fast<T>(result: Result<T, SharedMemoryError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => fail_fast(err),
    }
}

#[track_caller]
fn fail_fast(err: SharedMemoryError) -> ! {
    panic!("{}", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn unique_name(tag: &str) -> String {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        format!(
            "shmr-{}-{}-{}",
            tag,
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        )
    }

    fn region() -> SharedRegion {
        SharedRegion::with_config(RegionConfig::default())
    }

    #[test]
    fn test_new_region_is_unattached() {
        let region = region();
        assert!(!region.is_attached());
        assert_eq!(region.state(), RegionState::Unattached);
        assert_eq!(region.capacity(), 0);
        assert_eq!(region.name(), None);
        assert!(region.info().is_none());
    }

    #[test]
    fn test_create_then_connect() {
        let name = unique_name("sym");
        let mut creator = region();
        let mut peer = region();

        assert!(creator.create_new(&name, 100));
        assert_eq!(creator.state(), RegionState::Attached);
        assert_eq!(creator.capacity(), 100);
        assert_eq!(creator.origin(), Some(Origin::Created));

        assert!(peer.connect(&name, 100));
        assert!(peer.is_attached());
        assert_eq!(peer.origin(), Some(Origin::Connected));
    }

    #[test]
    fn test_create_existing_name_fails() {
        let name = unique_name("dup");
        let mut first = region();
        let mut second = region();

        assert!(first.create_new(&name, 100));
        assert!(!second.create_new(&name, 100));
        assert!(!second.is_attached());

        let err = second.try_create_new(&name, 100).unwrap_err();
        assert!(matches!(err, SharedMemoryError::CreateFailed { .. }));
    }

    #[test]
    fn test_connect_without_creator_fails() {
        let mut region = region();
        assert!(!region.connect(&unique_name("never"), 100));
        assert!(!region.is_attached());
        assert_eq!(region.capacity(), 0);

        let err = region.try_connect(&unique_name("never"), 100).unwrap_err();
        assert_eq!(err.kind(), FaultKind::AttachFailure);
        assert!(matches!(err, SharedMemoryError::OpenFailed { .. }));
    }

    #[test]
    fn test_connect_or_create_new_then_existing() {
        let name = unique_name("coc");
        let mut first = region();
        let mut second = region();

        assert!(first.connect_or_create(&name, 100));
        assert_eq!(first.origin(), Some(Origin::Created));

        // Create fails on the existing object, so this takes the fallback path.
        assert!(second.connect_or_create(&name, 100));
        assert_eq!(second.origin(), Some(Origin::Connected));

        first.write_i32(7, 0);
        assert_eq!(second.read_i32(0), 7);
    }

    #[test]
    fn test_typed_round_trips() {
        let name = unique_name("typed");
        let mut writer = region();
        let mut reader = region();
        assert!(writer.create_new(&name, 100));
        assert!(reader.connect(&name, 100));

        writer.write_i32(10132, 0);
        assert_eq!(reader.read_i32(0), 10132);

        writer.write_i32(-5, 20);
        assert_eq!(reader.read_i32(20), -5);

        writer.write_byte(10, 0);
        assert_eq!(reader.read_byte(0), 10);

        writer.write_bool(true, 0);
        assert!(reader.read_bool(0));
        writer.write_bool(false, 0);
        assert!(!reader.read_bool(0));

        assert_eq!(writer.write_text("hello world", 0), 11);
        assert_eq!(reader.read_text(11, 0), "hello world");
    }

    #[test]
    fn test_text_layout_is_utf16le_by_default() {
        let name = unique_name("utf16");
        let mut region = region();
        assert!(region.create_new(&name, 32));
        assert_eq!(region.text_encoding(), TextEncoding::Utf16Le);

        region.write_text("ab", 4);
        let mut raw = [0u8; 4];
        region.read_raw(&mut raw, 4);
        assert_eq!(raw, [b'a', 0, b'b', 0]);

        // Asking for more units than were written stops at the zero fill.
        assert_eq!(region.read_text(10, 4), "ab");
    }

    #[test]
    fn test_utf8_text_encoding() {
        let config = RegionConfig {
            text_encoding: TextEncoding::Utf8,
            ..RegionConfig::default()
        };
        let mut region = SharedRegion::with_config(config);
        assert!(region.create_new(&unique_name("utf8"), 16));

        assert_eq!(region.write_text("hello", 0), 5);
        let mut raw = [0u8; 5];
        region.read_raw(&mut raw, 0);
        assert_eq!(&raw, b"hello");
        assert_eq!(region.read_text(5, 0), "hello");
    }

    #[test]
    #[should_panic(expected = "offset 60 + length 50 > capacity 100")]
    fn test_write_out_of_bounds_panics() {
        let mut region = region();
        assert!(region.create_new(&unique_name("oob"), 100));
        region.write_raw(&[0xAB; 50], 60);
    }

    #[test]
    fn test_out_of_bounds_does_not_touch_memory() {
        let mut region = region();
        assert!(region.create_new(&unique_name("oobmem"), 100));
        region.write_raw(&[0x11; 40], 60);

        let err = region.try_write_raw(&[0xAB; 50], 60).unwrap_err();
        assert_eq!(err.kind(), FaultKind::BoundsViolation);

        let mut buf = [0u8; 40];
        region.read_raw(&mut buf, 60);
        assert_eq!(buf, [0x11; 40]);
    }

    #[test]
    fn test_bounds_edges() {
        let mut region = region();
        assert!(region.create_new(&unique_name("edge"), 100));

        // Exactly filling the region is fine, one more byte is not.
        region.write_raw(&[1; 100], 0);
        region.write_raw(&[2; 4], 96);
        assert!(region.try_write_raw(&[3; 5], 96).is_err());
        assert!(region.try_read_raw(&mut [0u8; 1], 100).is_err());
        region.read_raw(&mut [0u8; 0], 100);

        // Offsets near usize::MAX must not wrap.
        assert!(region.try_write_raw(&[0; 2], usize::MAX).is_err());
        assert!(region.try_read_text(usize::MAX, 0).is_err());
    }

    #[test]
    #[should_panic(expected = "Exceeded shared memory size")]
    fn test_read_i32_past_end_panics() {
        let mut region = region();
        assert!(region.create_new(&unique_name("i32end"), 10));
        region.read_i32(8);
    }

    #[test]
    #[should_panic(expected = "not attached")]
    fn test_write_unattached_panics() {
        region().write_i32(1, 0);
    }

    #[test]
    #[should_panic(expected = "not attached")]
    fn test_read_unattached_panics() {
        region().read_bool(0);
    }

    #[test]
    fn test_unattached_access_is_state_fault() {
        let mut region = region();
        let err = region.try_write_raw(&[1], 0).unwrap_err();
        assert_eq!(err.kind(), FaultKind::InvalidState);
        let err = region.try_read_text(1, 0).unwrap_err();
        assert_eq!(err.kind(), FaultKind::InvalidState);
    }

    #[test]
    #[should_panic(expected = "already attached")]
    fn test_double_create_panics() {
        let mut region = region();
        assert!(region.create_new(&unique_name("dbl"), 100));
        region.create_new(&unique_name("dbl"), 100);
    }

    #[test]
    #[should_panic(expected = "already attached")]
    fn test_connect_while_attached_panics() {
        let name = unique_name("dblc");
        let mut region = region();
        assert!(region.create_new(&name, 100));
        region.connect(&name, 100);
    }

    #[test]
    fn test_double_attach_keeps_first_mapping() {
        let first = unique_name("keep");
        let second = unique_name("keep");
        let mut region = region();
        assert!(region.create_new(&first, 100));

        let err = region.try_connect_or_create(&second, 50).unwrap_err();
        assert!(matches!(err, SharedMemoryError::AlreadyAttached { .. }));
        assert_eq!(region.name(), Some(first.as_str()));
        assert_eq!(region.capacity(), 100);

        // No object was created for the rejected name.
        assert!(!SharedRegion::with_config(RegionConfig::default()).connect(&second, 50));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut never = region();
        never.close();
        never.close();
        assert!(!never.is_attached());

        let mut region = region();
        assert!(region.create_new(&unique_name("close"), 100));
        region.close();
        region.close();
        assert!(!region.is_attached());
        assert_eq!(region.capacity(), 0);
    }

    #[test]
    fn test_creator_close_unlinks_name() {
        let name = unique_name("unl");
        let mut creator = region();
        let mut peer = region();
        assert!(creator.create_new(&name, 64));
        assert!(peer.connect(&name, 64));

        creator.write_i32(99, 0);
        creator.close();

        // Existing peer keeps its view, but the name is gone.
        assert_eq!(peer.read_i32(0), 99);
        assert!(!region().connect(&name, 64));
    }

    #[test]
    fn test_peer_close_does_not_unlink() {
        let name = unique_name("peer");
        let mut creator = region();
        let mut peer = region();
        assert!(creator.create_new(&name, 64));
        assert!(peer.connect(&name, 64));
        peer.close();

        assert!(region().connect(&name, 64));
    }

    #[test]
    fn test_drop_releases_region() {
        let name = unique_name("drop");
        {
            let mut scoped = region();
            assert!(scoped.create_new(&name, 64));
        }
        assert!(!region().connect(&name, 64));
        // The name can be created again.
        assert!(region().create_new(&name, 64));
    }

    #[test]
    fn test_reattach_after_close() {
        let mut region = region();
        assert!(region.create_new(&unique_name("re"), 64));
        region.close();
        assert!(region.create_new(&unique_name("re"), 32));
        assert_eq!(region.capacity(), 32);
    }

    #[test]
    fn test_invalid_name_or_capacity_returns_false() {
        let mut region = region();
        assert!(!region.create_new("bad/name", 100));
        assert!(!region.create_new("", 100));
        assert!(!region.create_new(&unique_name("zero"), 0));
        assert!(!region.connect_or_create(&unique_name("zero"), 0));
        assert!(!region.is_attached());

        let err = region.try_create_new(&unique_name("zero"), 0).unwrap_err();
        assert!(matches!(err, SharedMemoryError::InvalidCapacity { .. }));
        let err = region.try_connect("a/b", 10).unwrap_err();
        assert!(matches!(err, SharedMemoryError::InvalidName(_)));
    }

    #[test]
    fn test_max_capacity_from_config() {
        let config = RegionConfig {
            max_capacity: 1024,
            ..RegionConfig::default()
        };
        let mut region = SharedRegion::with_config(config);
        assert!(!region.create_new(&unique_name("max"), 1025));
        assert!(region.create_new(&unique_name("max"), 1024));
    }

    #[test]
    fn test_name_prefix_separates_namespaces() {
        let name = unique_name("pfx");
        let prefixed = RegionConfig {
            name_prefix: "p.".to_string(),
            ..RegionConfig::default()
        };

        let mut creator = SharedRegion::with_config(prefixed.clone());
        assert!(creator.create_new(&name, 64));

        assert!(!region().connect(&name, 64));
        assert!(SharedRegion::with_config(prefixed).connect(&name, 64));

        let info = creator.info().unwrap();
        assert_eq!(info.name, name);
        assert_eq!(info.os_name, format!("/p.{}", name));
    }

    #[test]
    fn test_unlink_on_close_disabled() {
        let name = unique_name("keepn");
        let config = RegionConfig {
            unlink_on_close: false,
            ..RegionConfig::default()
        };
        let mut creator = SharedRegion::with_config(config);
        assert!(creator.create_new(&name, 64));
        assert!(!creator.info().unwrap().unlinks_on_close);
        creator.close();

        // Still there after the creator closed. Remove it by hand.
        let mut peer = region();
        assert!(peer.connect(&name, 64));
        peer.close();
        let os_name = std::ffi::CString::new(format!("/{}", name)).unwrap();
        // SAFETY: valid CString
        assert_eq!(unsafe { libc::shm_unlink(os_name.as_ptr()) }, 0);
    }

    #[test]
    fn test_info_snapshot() {
        let name = unique_name("info");
        let mut region = region();
        assert!(region.create_new(&name, 128));

        let info = region.info().unwrap();
        assert_eq!(info.capacity, 128);
        assert_eq!(info.origin, Origin::Created);
        assert!(info.unlinks_on_close);
        assert_eq!(info.text_encoding, TextEncoding::Utf16Le);
        assert!(format!("{:?}", region).contains("Attached"));
    }
}

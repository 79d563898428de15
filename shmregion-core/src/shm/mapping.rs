// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Mapping - POSIX shared memory object + mmap view.
//!
//! Owns one `shm_open` descriptor and one `MAP_SHARED` view. Dropping it
//! unmaps, closes and (for the creator, if asked) unlinks. Partially acquired
//! resources are released on every failure path.

use std::ffi::{CStr, CString};
use std::fmt;
use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
use std::ptr::NonNull;

/// A failed system call during attach.
#[derive(Debug)]
pub(crate) struct SyscallFailure {
    pub syscall: &'static str,
    pub source: io::Error,
}

impl SyscallFailure {
    fn last(syscall: &'static str) -> Self {
        Self {
            syscall,
            source: io::Error::last_os_error(),
        }
    }

    /// True if the object name was already taken.
    pub fn is_already_exists(&self) -> bool {
        self.source.raw_os_error() == Some(libc::EEXIST)
    }
}

impl fmt::Display for SyscallFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.syscall, self.source)
    }
}

/// A mapped shared memory object.
pub(crate) struct Mapping {
    /// OS object name, as passed to `shm_open`.
    os_name: CString,
    ptr: NonNull<u8>,
    len: usize,
    /// Kept open for the life of the mapping.
    _fd: OwnedFd,
    unlink_on_drop: bool,
}

// SAFETY: Mapping exclusively owns its view. Writes go through &mut self.
unsafe impl Send for Mapping {}

// SAFETY: &self only permits copying bytes out of the view. Cross-process
// races are the caller's concern and cannot be prevented here.
unsafe impl Sync for Mapping {}

impl Mapping {
    /// Create a new object exclusively, size it to `len` bytes and map it.
    pub fn create(
        os_name: CString,
        len: usize,
        mode: u32,
        unlink_on_drop: bool,
    ) -> Result<Self, SyscallFailure> {
        // SAFETY: os_name is a valid CString, flags are valid POSIX flags
        let raw = unsafe {
            libc::shm_open(
                os_name.as_ptr(),
                libc::O_CREAT | libc::O_EXCL | libc::O_RDWR,
                mode as libc::c_uint,
            )
        };
        if raw < 0 {
            return Err(SyscallFailure::last("shm_open"));
        }
        // SAFETY: raw is a freshly opened descriptor owned by nobody else
        let fd = unsafe { OwnedFd::from_raw_fd(raw) };

        // New objects are zero-filled by ftruncate.
        // SAFETY: fd is a valid file descriptor
        let result = unsafe { libc::ftruncate(fd.as_raw_fd(), len as libc::off_t) };
        if result < 0 {
            let failure = SyscallFailure::last("ftruncate");
            drop(fd);
            unlink(&os_name);
            return Err(failure);
        }

        match map(&fd, len) {
            Ok(ptr) => Ok(Self {
                os_name,
                ptr,
                len,
                _fd: fd,
                unlink_on_drop,
            }),
            Err(failure) => {
                drop(fd);
                unlink(&os_name);
                Err(failure)
            }
        }
    }

    /// Open an existing object and map `len` bytes of it.
    ///
    /// `len` is not checked against the object's real size.
    pub fn open(os_name: CString, len: usize) -> Result<Self, SyscallFailure> {
        // SAFETY: os_name is a valid CString
        let raw = unsafe { libc::shm_open(os_name.as_ptr(), libc::O_RDWR, 0 as libc::c_uint) };
        if raw < 0 {
            return Err(SyscallFailure::last("shm_open"));
        }
        // SAFETY: raw is a freshly opened descriptor owned by nobody else
        let fd = unsafe { OwnedFd::from_raw_fd(raw) };

        let ptr = map(&fd, len)?;

        Ok(Self {
            os_name,
            ptr,
            len,
            _fd: fd,
            unlink_on_drop: false,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn os_name(&self) -> &CStr {
        &self.os_name
    }

    /// Copy `data` into the view at `offset`.
    ///
    /// # Panics
    /// If the range does not fit in the view.
    pub fn copy_in(&mut self, offset: usize, data: &[u8]) {
        assert!(self.fits(offset, data.len()), "copy_in out of range");
        // SAFETY: range checked above; data cannot overlap a view we own
        unsafe {
            std::ptr::copy_nonoverlapping(data.as_ptr(), self.ptr.as_ptr().add(offset), data.len());
        }
    }

    /// Copy bytes out of the view at `offset` into `buf`.
    ///
    /// # Panics
    /// If the range does not fit in the view.
    pub fn copy_out(&self, offset: usize, buf: &mut [u8]) {
        assert!(self.fits(offset, buf.len()), "copy_out out of range");
        // SAFETY: range checked above; buf cannot overlap a view we own
        unsafe {
            std::ptr::copy_nonoverlapping(self.ptr.as_ptr().add(offset), buf.as_mut_ptr(), buf.len());
        }
    }

    fn fits(&self, offset: usize, length: usize) -> bool {
        offset
            .checked_add(length)
            .is_some_and(|end| end <= self.len)
    }
}

impl Drop for Mapping {
    fn drop(&mut self) {
        // SAFETY: ptr and len were set by a successful mmap
        let result = unsafe { libc::munmap(self.ptr.as_ptr() as *mut libc::c_void, self.len) };
        if result < 0 {
            tracing::error!(
                name = ?self.os_name,
                error = %io::Error::last_os_error(),
                "Failed to unmap shared memory"
            );
        }

        // The descriptor closes when _fd drops.

        if self.unlink_on_drop {
            unlink(&self.os_name);
            tracing::debug!(name = ?self.os_name, "Unlinked shared memory object");
        }
    }
}

fn map(fd: &OwnedFd, len: usize) -> Result<NonNull<u8>, SyscallFailure> {
    // SAFETY: fd is valid, len is non-zero (checked by the caller), offset 0 is valid
    let ptr = unsafe {
        libc::mmap(
            std::ptr::null_mut(),
            len,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_SHARED,
            fd.as_raw_fd(),
            0,
        )
    };

    if ptr == libc::MAP_FAILED {
        return Err(SyscallFailure::last("mmap"));
    }

    NonNull::new(ptr as *mut u8).ok_or_else(|| SyscallFailure {
        syscall: "mmap",
        source: io::Error::other("mmap returned a null mapping"),
    })
}

fn unlink(os_name: &CString) {
    // SAFETY: os_name is a valid CString
    if unsafe { libc::shm_unlink(os_name.as_ptr()) } < 0 {
        tracing::warn!(
            name = ?os_name,
            error = %io::Error::last_os_error(),
            "Failed to unlink shared memory object"
        );
    }
}

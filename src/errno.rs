//! OS error codes reported by lock operations.
//!
//! Open and lock failures carry the raw error number returned by the OS. This
//! module maps it onto a closed table of POSIX error codes, each with its
//! symbolic name (`EAGAIN`) and a human-readable description. Numbers outside
//! the table, and I/O errors that carry no OS code at all, map to
//! [`ErrorCode::Unknown`]; the mapping itself never fails.

use std::fmt;
use std::io;

macro_rules! error_codes {
    ($($variant:ident => $name:ident, $desc:literal;)*) => {
        /// A POSIX error code from the fixed lookup table.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorCode {
            $(
                #[doc = $desc]
                $variant,
            )*
            /// A code outside the table, or no OS code at all.
            Unknown(Option<i32>),
        }

        impl ErrorCode {
            /// Every known code in table order.
            pub const KNOWN: &'static [ErrorCode] = &[$(ErrorCode::$variant),*];

            /// Map a raw OS error number onto the table.
            #[cfg(unix)]
            pub fn from_raw(raw: i32) -> Self {
                match raw {
                    $(libc::$name => ErrorCode::$variant,)*
                    other => ErrorCode::Unknown(Some(other)),
                }
            }

            /// Map a raw OS error number onto the table.
            ///
            /// The table holds POSIX numbers only, so on other platforms every
            /// code is reported as unknown.
            #[cfg(not(unix))]
            pub fn from_raw(raw: i32) -> Self {
                ErrorCode::Unknown(Some(raw))
            }

            /// The raw OS error number, if this platform defines one.
            #[cfg(unix)]
            pub fn raw(&self) -> Option<i32> {
                match self {
                    $(ErrorCode::$variant => Some(libc::$name),)*
                    ErrorCode::Unknown(raw) => *raw,
                }
            }

            /// The raw OS error number, if this platform defines one.
            #[cfg(not(unix))]
            pub fn raw(&self) -> Option<i32> {
                match self {
                    ErrorCode::Unknown(raw) => *raw,
                    _ => None,
                }
            }

            /// Symbolic name, e.g. `EAGAIN`.
            pub fn name(&self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => stringify!($name),)*
                    ErrorCode::Unknown(_) => "Unknown",
                }
            }

            /// Human-readable description, e.g. `Resource temporarily unavailable`.
            pub fn description(&self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $desc,)*
                    ErrorCode::Unknown(_) => "Unknown error",
                }
            }
        }
    };
}

error_codes! {
    NotPermitted => EPERM, "Operation not permitted";
    NotFound => ENOENT, "No such file or directory";
    NoSuchProcess => ESRCH, "No such process";
    Interrupted => EINTR, "Interrupted system call";
    Io => EIO, "Input/output error";
    NoSuchDeviceOrAddress => ENXIO, "No such device or address";
    ArgumentListTooLong => E2BIG, "Argument list too long";
    ExecFormat => ENOEXEC, "Exec format error";
    BadDescriptor => EBADF, "Bad file descriptor";
    NoChildProcesses => ECHILD, "No child processes";
    WouldBlock => EAGAIN, "Resource temporarily unavailable";
    OutOfMemory => ENOMEM, "Cannot allocate memory";
    PermissionDenied => EACCES, "Permission denied";
    BadAddress => EFAULT, "Bad address";
    Busy => EBUSY, "Device or resource busy";
    AlreadyExists => EEXIST, "File exists";
    CrossDeviceLink => EXDEV, "Invalid cross-device link";
    NoSuchDevice => ENODEV, "No such device";
    NotADirectory => ENOTDIR, "Not a directory";
    IsADirectory => EISDIR, "Is a directory";
    InvalidArgument => EINVAL, "Invalid argument";
    SystemFileLimit => ENFILE, "Too many open files in system";
    ProcessFileLimit => EMFILE, "Too many open files";
    NotATerminal => ENOTTY, "Inappropriate ioctl for device";
    TextFileBusy => ETXTBSY, "Text file busy";
    FileTooLarge => EFBIG, "File too large";
    NoSpace => ENOSPC, "No space left on device";
    IllegalSeek => ESPIPE, "Illegal seek";
    ReadOnlyFilesystem => EROFS, "Read-only file system";
    TooManyLinks => EMLINK, "Too many links";
    BrokenPipe => EPIPE, "Broken pipe";
    Deadlock => EDEADLK, "Resource deadlock avoided";
    NameTooLong => ENAMETOOLONG, "File name too long";
    NoLocks => ENOLCK, "No locks available";
    NotImplemented => ENOSYS, "Function not implemented";
    SymlinkLoop => ELOOP, "Too many levels of symbolic links";
    NotSupported => EOPNOTSUPP, "Operation not supported";
    QuotaExceeded => EDQUOT, "Disk quota exceeded";
    StaleHandle => ESTALE, "Stale file handle";
}

impl ErrorCode {
    /// Whether this code names a recognised entry of the table.
    pub fn is_known(&self) -> bool {
        !matches!(self, ErrorCode::Unknown(_))
    }
}

impl From<&io::Error> for ErrorCode {
    fn from(err: &io::Error) -> Self {
        match err.raw_os_error() {
            Some(raw) => ErrorCode::from_raw(raw),
            None => ErrorCode::Unknown(None),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Unknown(Some(raw)) => write!(f, "Unknown error {}", raw),
            ErrorCode::Unknown(None) => write!(f, "Unknown error"),
            known => write!(f, "{} ({})", known.description(), known.name()),
        }
    }
}

//! Host, user and group facts. Every lookup is best effort: a failure
//! yields an empty name or a zero id.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub host_name: String,
    pub user_id: u32,
    pub user_name: String,
    pub group_id: u32,
    pub group_name: String,
}

impl Identity {
    pub fn current() -> Self {
        let user_id = sys::user_id();
        let group_id = sys::group_id();
        Self {
            host_name: sys::host_name(),
            user_id,
            user_name: sys::user_name(user_id),
            group_id,
            group_name: sys::group_name(group_id),
        }
    }
}

#[cfg(unix)]
mod sys {
    use std::ffi::CStr;
    use std::ptr;

    use libc::c_char;

    const INITIAL_BUF: usize = 1024;
    const MAX_BUF: usize = 1 << 20;

    pub fn host_name() -> String {
        let mut buf = vec![0u8; 256];
        // SAFETY: the buffer is valid for `buf.len()` bytes.
        let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast::<c_char>(), buf.len()) };
        if rc != 0 {
            return String::new();
        }
        let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        String::from_utf8_lossy(&buf[..end]).into_owned()
    }

    pub fn user_id() -> u32 {
        // SAFETY: getuid cannot fail.
        unsafe { libc::getuid() }
    }

    pub fn group_id() -> u32 {
        // SAFETY: getgid cannot fail.
        unsafe { libc::getgid() }
    }

    pub fn user_name(uid: u32) -> String {
        let mut size = INITIAL_BUF;
        while size <= MAX_BUF {
            let mut buf = vec![0 as c_char; size];
            // SAFETY: passwd is plain old data; zeroed is a valid value.
            let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
            let mut result: *mut libc::passwd = ptr::null_mut();
            // SAFETY: all pointers are valid for the duration of the call and
            // `buf` outlives every read of `pwd`.
            let rc = unsafe { libc::getpwuid_r(uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut result) };
            if rc == libc::ERANGE {
                size *= 2;
                continue;
            }
            if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
                return String::new();
            }
            // SAFETY: pw_name points into `buf` and is NUL-terminated.
            return unsafe { CStr::from_ptr(pwd.pw_name) }.to_string_lossy().into_owned();
        }
        String::new()
    }

    pub fn group_name(gid: u32) -> String {
        let mut size = INITIAL_BUF;
        while size <= MAX_BUF {
            let mut buf = vec![0 as c_char; size];
            // SAFETY: group is plain old data; zeroed is a valid value.
            let mut grp: libc::group = unsafe { std::mem::zeroed() };
            let mut result: *mut libc::group = ptr::null_mut();
            // SAFETY: as in `user_name`.
            let rc = unsafe { libc::getgrgid_r(gid, &mut grp, buf.as_mut_ptr(), buf.len(), &mut result) };
            if rc == libc::ERANGE {
                size *= 2;
                continue;
            }
            if rc != 0 || result.is_null() || grp.gr_name.is_null() {
                return String::new();
            }
            // SAFETY: gr_name points into `buf` and is NUL-terminated.
            return unsafe { CStr::from_ptr(grp.gr_name) }.to_string_lossy().into_owned();
        }
        String::new()
    }
}

#[cfg(not(unix))]
mod sys {
    use std::env;

    pub fn host_name() -> String {
        env::var("COMPUTERNAME").unwrap_or_default()
    }

    pub fn user_id() -> u32 {
        0
    }

    pub fn group_id() -> u32 {
        0
    }

    pub fn user_name(_uid: u32) -> String {
        env::var("USERNAME").unwrap_or_default()
    }

    pub fn group_name(_gid: u32) -> String {
        String::new()
    }
}

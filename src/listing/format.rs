use std::time::{SystemTime, UNIX_EPOCH};

use humansize::{BINARY, DECIMAL, format_size};
use time::OffsetDateTime;
use time::macros::format_description;

use super::classify::FileStat;

/// Shown in the permission column for entries that could not be stat'ed.
pub const UNKNOWN_PERMISSIONS: &str = "???!!!???";

const EPOCH_HTTP_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// `ls -l` style mode string, e.g. `drwxr-xr-x`.
pub fn permissions_string(stat: Option<&FileStat>) -> String {
    let Some(stat) = stat else {
        return UNKNOWN_PERMISSIONS.to_string();
    };

    let mut out = String::with_capacity(10);
    out.push(if stat.is_dir { 'd' } else { '-' });
    for shift in [6u32, 3, 0] {
        let bits = (stat.mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

/// Size column text. Directories and unknown entries get an empty cell.
pub fn size_string(stat: Option<&FileStat>, human_readable: bool, si: bool) -> String {
    match stat {
        Some(stat) if !stat.is_dir => {
            if human_readable {
                format_size(stat.size, if si { DECIMAL } else { BINARY })
            } else {
                stat.size.to_string()
            }
        }
        _ => String::new(),
    }
}

/// Entity tag built from inode, size and modification time.
pub fn etag(stat: &FileStat, weak: bool) -> String {
    let mtime = stat
        .modified
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let prefix = if weak { "W/" } else { "" };
    format!("{prefix}\"{}-{}-{mtime}\"", stat.inode, stat.size)
}

/// IMF-fixdate as used by `Last-Modified`.
pub fn http_date(time: Option<SystemTime>) -> String {
    let Some(time) = time else {
        return EPOCH_HTTP_DATE.to_string();
    };

    OffsetDateTime::from(time)
        .format(format_description!(
            "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
        ))
        .unwrap_or_else(|_| EPOCH_HTTP_DATE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn stat(is_dir: bool, mode: u32, size: u64) -> FileStat {
        FileStat {
            is_dir,
            size,
            modified: Some(UNIX_EPOCH + Duration::from_millis(1_700_000_000_123)),
            mode,
            inode: 42,
        }
    }

    #[test]
    fn test_permissions_string() {
        assert_eq!(
            permissions_string(Some(&stat(true, 0o40755, 0))),
            "drwxr-xr-x"
        );
        assert_eq!(
            permissions_string(Some(&stat(false, 0o100640, 0))),
            "-rw-r-----"
        );
        assert_eq!(permissions_string(Some(&stat(false, 0o777, 0))), "-rwxrwxrwx");
        assert_eq!(permissions_string(None), "???!!!???");
    }

    #[test]
    fn test_size_string_raw() {
        assert_eq!(size_string(Some(&stat(false, 0o644, 1536)), false, false), "1536");
    }

    #[test]
    fn test_size_string_human_units() {
        let binary = size_string(Some(&stat(false, 0o644, 1536)), true, false);
        assert!(binary.contains("KiB"), "{binary}");

        let decimal = size_string(Some(&stat(false, 0o644, 1500)), true, true);
        assert!(decimal.contains("kB"), "{decimal}");
    }

    #[test]
    fn test_size_string_empty_for_directories_and_unknown() {
        assert_eq!(size_string(Some(&stat(true, 0o755, 4096)), true, false), "");
        assert_eq!(size_string(None, true, false), "");
    }

    #[test]
    fn test_etag() {
        let s = stat(true, 0o755, 4096);
        assert_eq!(etag(&s, true), "W/\"42-4096-1700000000123\"");
        assert_eq!(etag(&s, false), "\"42-4096-1700000000123\"");
    }

    #[test]
    fn test_http_date() {
        let t = UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert_eq!(http_date(Some(t)), "Sun, 06 Nov 1994 08:49:37 GMT");
        assert_eq!(http_date(None), EPOCH_HTTP_DATE);
    }
}

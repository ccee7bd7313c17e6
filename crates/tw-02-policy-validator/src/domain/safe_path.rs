//! Refusal list for target paths.

/// Prefixes that must never be handed to an eraser.
const UNSAFE_PREFIXES: &[&str] = &[
    "/",
    "/bin",
    "/sbin",
    "/usr",
    "/etc",
    "/var",
    "/boot",
    r"C:\",
    r"C:\Windows",
    r"C:\System32",
];

/// `true` when `path` may be targeted.
///
/// Paths with a `..` segment are refused outright. Device nodes under
/// `/dev/` are allowed; anything else starting with a system root is
/// refused. Windows prefixes compare case-insensitively.
pub fn is_safe_path(path: &str) -> bool {
    if path.split(['/', '\\']).any(|segment| segment == "..") {
        return false;
    }

    if path.starts_with("/dev/") {
        return true;
    }

    !UNSAFE_PREFIXES.iter().any(|prefix| {
        path.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

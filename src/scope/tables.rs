//! Fixed scope tables
//!
//! The default crawl boundary is expressed as data so the policy can be tested
//! and extended without touching control flow.

/// URL schemes the crawler can fetch
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Domain suffixes that bound the crawl (each suffix and its subdomains)
pub const ALLOWED_DOMAINS: &[&str] = &[
    "ics.uci.edu",
    "cs.uci.edu",
    "informatics.uci.edu",
    "stat.uci.edu",
];

/// Path suffixes that are never worth fetching as HTML
///
/// Matched against the lowercased path with `ends_with`, so entries carry
/// their leading dot. `.tar.gz` is covered by `.gz`.
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    // Stylesheets, scripts and assets
    ".css", ".js", ".ico", ".jar", ".swf", ".apk", ".war",
    // Images
    ".bmp", ".gif", ".jpg", ".jpeg", ".png", ".tif", ".tiff", ".psd",
    // Audio
    ".mid", ".mp2", ".mp3", ".wav", ".ogg", ".aac", ".flac", ".wma", ".ram", ".rm",
    // Video
    ".mp4", ".avi", ".mov", ".mpg", ".mpeg", ".m4v", ".mkv", ".ogv", ".wmv", ".flv", ".webm",
    ".smil",
    // Documents
    ".pdf", ".ps", ".eps", ".tex", ".txt", ".rtf", ".epub", ".doc", ".docx", ".xls", ".xlsx",
    ".ppt", ".pptx", ".odc", ".thmx", ".mso",
    // Datasets
    ".names", ".data", ".dat", ".arff", ".csv", ".cnf",
    // Archives and disk images
    ".zip", ".rar", ".7z", ".tar", ".gz", ".tgz", ".bz2", ".dmg", ".iso",
    // Executables and binaries
    ".exe", ".msi", ".bin", ".dll", ".sha1",
];

/// Which part of the URL a trap pattern is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapTarget {
    Path,
    Query,
}

/// A URL shape known to lead into infinite or low-value crawl paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapPattern {
    /// Lowercase substring that identifies the trap
    pub needle: &'static str,
    /// URL component the needle is searched in
    pub target: TrapTarget,
}

/// Known crawl traps: deep PDF indexes and login forms
pub const TRAP_PATTERNS: &[TrapPattern] = &[
    TrapPattern {
        needle: "/files/pdf/",
        target: TrapTarget::Path,
    },
    TrapPattern {
        needle: "login.php",
        target: TrapTarget::Path,
    },
    TrapPattern {
        needle: "/login/",
        target: TrapTarget::Path,
    },
    TrapPattern {
        needle: "action=login",
        target: TrapTarget::Query,
    },
];

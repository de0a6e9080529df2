// Path selection for the access gate.
//
// Two lists apply, in order: the route matcher picks which requests reach the
// gate at all, then the gate exempts API, asset and file paths itself. The
// matcher deliberately still selects `/api` paths.

const API_PREFIX: &str = "/api";
const RPC_PREFIX: &str = "/trpc";
const ASSET_PREFIX: &str = "/_next";

/// Whether the gate runs for `path`.
///
/// Always selects `/`, `/api*` and `/trpc*`. Otherwise skips anything under
/// `_next` and anything ending in a file extension.
pub fn matches(path: &str) -> bool {
    if path == "/" || path.starts_with(API_PREFIX) || path.starts_with(RPC_PREFIX) {
        return true;
    }

    let rest = path.strip_prefix('/').unwrap_or(path);
    !(rest.starts_with("_next") || has_file_extension(rest))
}

/// Paths the gate forwards without looking at the session.
pub fn is_exempt(path: &str) -> bool {
    path.starts_with(API_PREFIX) || path.starts_with(ASSET_PREFIX) || path.contains('.')
}

// At least one character, a dot, then one or more word characters to the end.
fn has_file_extension(rest: &str) -> bool {
    match rest.rfind('.') {
        Some(dot) if dot > 0 => {
            let ext = &rest[dot + 1..];
            !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matcher_selects_pages_and_api() {
        for path in ["/", "/editor/123", "/templates", "/api/auth/check-access", "/trpc/docs.list", "/login"] {
            assert!(matches(path), "expected {} to be selected", path);
        }
    }

    #[test]
    fn test_matcher_skips_static_files_and_next_internals() {
        for path in ["/favicon.ico", "/logo.png", "/_next/static/chunk.js", "/_next/image", "/fonts/inter.woff2"] {
            assert!(!matches(path), "expected {} to be skipped", path);
        }
    }

    #[test]
    fn test_matcher_keeps_dotted_segments_without_extension() {
        // trailing dot has no extension
        assert!(matches("/notes/draft."));
        // extension must be word characters only
        assert!(matches("/notes/v1.2-beta"));
    }

    #[test]
    fn test_exemptions() {
        assert!(is_exempt("/api/documents"));
        assert!(is_exempt("/_next/data/build/page.json"));
        assert!(is_exempt("/notes/v1.2-beta"));
        assert!(!is_exempt("/"));
        assert!(!is_exempt("/editor/42"));
        assert!(!is_exempt("/trpc/docs"));
    }
}

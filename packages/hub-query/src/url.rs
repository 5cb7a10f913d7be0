//! Raw-content URL derivation
//!
//! A version's web URL points at a browsable repository page; the raw URL
//! serves the file content itself:
//!
//! ```text
//! https://github.com/org/repo/tree/main/task/x.yaml
//! https://raw.githubusercontent.com/org/repo/main/task/x.yaml
//! ```

/// Textual substitutions, tried in order at each position
const REPLACEMENTS: [(&str, &str); 2] = [("github.com", "raw.githubusercontent.com"), ("/tree/", "/")];

/// Derive the raw-content URL from a web URL
///
/// Single left-to-right pass; replaced text is not scanned again. No URL
/// validation: input without either pattern comes back unchanged.
pub fn raw_url(web_url: &str) -> String {
    let mut out = String::with_capacity(web_url.len() + 16);
    let mut rest = web_url;

    'scan: while let Some(ch) = rest.chars().next() {
        for (from, to) in REPLACEMENTS {
            if let Some(after) = rest.strip_prefix(from) {
                out.push_str(to);
                rest = after;
                continue 'scan;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}

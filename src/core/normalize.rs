/// Canonicalize a free-text field into a comparable token
///
/// Lower-cases, trims and collapses every run of whitespace into a single space.
#[inline]
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a delimited cell (`;` or `,`) into normalized tokens
///
/// Empty pieces are dropped and repeated tokens keep only their first occurrence,
/// so the output is stable under re-serialization and re-normalization.
pub fn normalize_list(raw: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();

    for piece in raw.split([';', ',']) {
        let token = normalize_text(piece);
        if token.is_empty() || tokens.contains(&token) {
            continue;
        }
        tokens.push(token);
    }

    tokens
}

//! Tokenization for netlist lines and unit-suffixed numeric values.

use crate::error::{Result, SimError};

/// Split a netlist line into whitespace-separated tokens, dropping a
/// trailing `#`-to-end-of-line comment. Blank/comment-only lines yield an
/// empty token list.
pub fn tokenize_line(line: &str) -> Vec<&str> {
    let code = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };
    code.split_whitespace().collect()
}

/// Multiplicative scale for each recognized unit suffix, longest match
/// first so `meg` is checked before a bare `m`.
const SUFFIXES: &[(&str, f64)] = &[
    ("meg", 1e6),
    ("f", 1e-15),
    ("p", 1e-12),
    ("n", 1e-9),
    ("u", 1e-6),
    ("m", 1e-3),
    ("k", 1e3),
    ("g", 1e9),
    ("t", 1e12),
];

/// Parse a numeric value, applying a case-insensitive unit suffix
/// (`f p n u m k meg g t`) if one is present.
pub fn parse_value(text: &str, line: usize) -> Result<f64> {
    if let Ok(v) = text.parse::<f64>() {
        return Ok(v);
    }

    let lower = text.to_ascii_lowercase();
    for &(suffix, scale) in SUFFIXES {
        if let Some(prefix) = lower.strip_suffix(suffix) {
            if prefix.is_empty() {
                continue;
            }
            let numeric = &text[..prefix.len()];
            return numeric
                .parse::<f64>()
                .map(|v| v * scale)
                .map_err(|_| SimError::netlist(line, format!("invalid numeric value '{text}'")));
        }
    }

    // No recognized suffix matched; the trailing alphabetic run (if any)
    // is the offending suffix.
    let suffix_start = text.rfind(|c: char| !c.is_ascii_alphabetic()).map(|i| i + 1).unwrap_or(0);
    if suffix_start < text.len() {
        Err(SimError::UnknownUnitSuffix {
            line,
            suffix: text[suffix_start..].to_string(),
        })
    } else {
        Err(SimError::netlist(line, format!("invalid numeric value '{text}'")))
    }
}

/// Parse a node id token (a non-negative integer).
pub fn parse_node_id(text: &str, line: usize) -> Result<usize> {
    text.parse::<usize>()
        .map_err(|_| SimError::netlist(line, format!("invalid node id '{text}'")))
}

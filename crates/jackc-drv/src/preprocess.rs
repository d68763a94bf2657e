//! Strips comments from raw Jack source before it reaches the lexer.
//!
//! The original pipeline (`jack_analyzer.py`) owned this step ahead of
//! tokenization rather than folding it into the lexer; kept as a separate
//! pass here for the same reason — `jackc-lex::Lexer` never needs to know
//! about `//`, `/* */`, or `/** */`.

/// Strips `//` line comments and `/* */`/`/** */` block comments, replacing
/// each with a single space so adjacent tokens on either side don't fuse
/// (e.g. `a/**/b` must not become the identifier `ab`).
pub fn preprocess(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = String::with_capacity(source.len());
    let mut i = 0;
    let mut in_string = false;

    while i < bytes.len() {
        if in_string {
            let c = bytes[i];
            out.push(c as char);
            if c == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match (bytes[i], bytes.get(i + 1)) {
            (b'"', _) => {
                in_string = true;
                out.push('"');
                i += 1;
            }
            (b'/', Some(b'/')) => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            (b'/', Some(b'*')) => {
                out.push(' ');
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    if bytes[i] == b'\n' {
                        out.push('\n');
                    }
                    i += 1;
                }
                i += 2; // consume closing */
            }
            (c, _) => {
                out.push(c as char);
                i += 1;
            }
        }
    }
    out
}

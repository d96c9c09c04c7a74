use super::report::Verdict;

/// Decide OK/WA by byte equality, optionally normalizing whitespace first.
/// Pure and deterministic; never yields any other verdict.
pub fn verdict(actual: &[u8], expected: &[u8], normalize: bool) -> Verdict {
    let equal = if normalize {
        normalize_whitespace(actual) == normalize_whitespace(expected)
    } else {
        actual == expected
    };
    if equal {
        Verdict::Ok
    } else {
        Verdict::Wa
    }
}

/// CRLF -> LF, then strip leading/trailing ASCII whitespace.
fn normalize_whitespace(buf: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(buf.len());
    let mut i = 0;
    while i < buf.len() {
        if buf[i] == b'\r' && buf.get(i + 1) == Some(&b'\n') {
            out.push(b'\n');
            i += 2;
        } else {
            out.push(buf[i]);
            i += 1;
        }
    }
    out.trim_ascii().to_vec()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identical_bytes_are_ok() {
        assert_eq!(verdict(b"42\n", b"42\n", false), Verdict::Ok);
        assert_eq!(verdict(b"42\n", b"42\n", true), Verdict::Ok);
    }

    #[test]
    fn mismatch_is_wa() {
        assert_eq!(verdict(b"42\n", b"43\n", false), Verdict::Wa);
        assert_eq!(verdict(b"42\n", b"43\n", true), Verdict::Wa);
    }

    #[test]
    fn trailing_newline_needs_normalization() {
        assert_eq!(verdict(b"42", b"42\n", false), Verdict::Wa);
        assert_eq!(verdict(b"42", b"42\n", true), Verdict::Ok);
    }

    #[test]
    fn crlf_needs_normalization() {
        assert_eq!(verdict(b"a\r\nb\r\n", b"a\nb\n", false), Verdict::Wa);
        assert_eq!(verdict(b"a\r\nb\r\n", b"a\nb\n", true), Verdict::Ok);
    }

    #[test]
    fn interior_whitespace_is_never_touched() {
        assert_eq!(verdict(b"a b\n", b"a  b\n", true), Verdict::Wa);
        assert_eq!(verdict(b"a\nb\n", b"a\n\nb\n", true), Verdict::Wa);
    }

    #[test]
    fn lone_carriage_return_is_preserved() {
        assert_eq!(verdict(b"a\rb", b"a\nb", true), Verdict::Wa);
        assert_eq!(verdict(b"a\rb", b"a\rb", true), Verdict::Ok);
    }

    #[test]
    fn empty_buffers() {
        assert_eq!(verdict(b"", b"", false), Verdict::Ok);
        assert_eq!(verdict(b"\n", b"", true), Verdict::Ok);
        assert_eq!(verdict(b"\n", b"", false), Verdict::Wa);
    }
}

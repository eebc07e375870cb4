//! Keyfile and password generation. Outside the container format proper,
//! but part of the crate's public surface since callers need a way to
//! produce the material this format consumes.

use std::io::{self, Write};

use rand::Rng;

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const NUMBER: &[u8] = b"1234567890";
const SYMBOL: &[u8] = b"-=_+!@#$^&()?<>";

/// Writes `length` cryptographically random bytes to `sink`, generating
/// at most 1 MiB at a time to bound memory use for large keyfiles.
pub fn generate_keyfile(length: usize, sink: &mut dyn Write) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut remaining = length;
    while remaining > 0 {
        let size = remaining.min(1 << 20);
        let mut buf = vec![0u8; size];
        rng.fill(buf.as_mut_slice());
        sink.write_all(&buf)?;
        remaining -= size;
    }
    Ok(())
}

/// Draws `length` characters uniformly at random from the union of the
/// requested character classes. If none are requested, falls back to
/// lowercase letters plus digits rather than returning an empty string —
/// the reference implementation never calls this with every class
/// disabled, but this crate doesn't assume callers share that invariant.
pub fn generate_password(length: usize, upper: bool, lower: bool, number: bool, symbol: bool) -> String {
    let mut chars = Vec::new();
    if upper {
        chars.extend_from_slice(UPPER);
    }
    if lower {
        chars.extend_from_slice(LOWER);
    }
    if number {
        chars.extend_from_slice(NUMBER);
    }
    if symbol {
        chars.extend_from_slice(SYMBOL);
    }
    if chars.is_empty() {
        chars.extend_from_slice(LOWER);
        chars.extend_from_slice(NUMBER);
    }

    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| chars[rng.gen_range(0..chars.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyfile_has_the_requested_length() {
        for size in [0usize, 1, 10, (1 << 20) + 5] {
            let mut out = Vec::new();
            generate_keyfile(size, &mut out).unwrap();
            assert_eq!(out.len(), size);
        }
    }

    #[test]
    fn two_generated_keyfiles_are_not_equal() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        generate_keyfile(32, &mut a).unwrap();
        generate_keyfile(32, &mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn password_has_the_requested_length_and_charset() {
        let pw = generate_password(64, true, true, true, true);
        assert_eq!(pw.chars().count(), 64);
        assert!(pw
            .bytes()
            .all(|b| UPPER.contains(&b) || LOWER.contains(&b) || NUMBER.contains(&b) || SYMBOL.contains(&b)));
    }

    #[test]
    fn password_with_no_class_selected_falls_back_instead_of_panicking() {
        let pw = generate_password(16, false, false, false, false);
        assert_eq!(pw.len(), 16);
        assert!(pw.bytes().all(|b| LOWER.contains(&b) || NUMBER.contains(&b)));
    }

    #[test]
    fn two_generated_passwords_are_not_equal() {
        let a = generate_password(16, true, true, true, true);
        let b = generate_password(16, true, true, true, true);
        assert_ne!(a, b);
    }
}

//! Content fingerprints for derived filenames.
//!
//! djb2 over the reversed input, rendered in lowercase base-36. Short,
//! stable, and filesystem-safe; not cryptographic, and collisions are
//! tolerated rather than guaranteed absent.

const SEED: u32 = 5381;

/// Hashes a string character by character.
///
/// Identical content always yields an identical fingerprint, so derived
/// filenames are a pure function of the content they carry.
pub fn hash_str(value: &str) -> String {
	let mut hash = SEED;
	for ch in value.chars().rev() {
		hash = hash.wrapping_mul(33) ^ (ch as u32);
	}
	to_base36(hash)
}

/// Hashes a raw byte sequence.
pub fn hash_bytes(value: &[u8]) -> String {
	let mut hash = SEED;
	for &byte in value.iter().rev() {
		hash = hash.wrapping_mul(33) ^ u32::from(byte);
	}
	to_base36(hash)
}

fn to_base36(mut value: u32) -> String {
	const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

	if value == 0 {
		return "0".to_string();
	}

	let mut digits = Vec::new();
	while value > 0 {
		digits.push(DIGITS[(value % 36) as usize]);
		value /= 36;
	}
	digits.reverse();
	digits.into_iter().map(char::from).collect()
}

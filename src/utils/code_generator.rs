//! Deterministic short code generation.
//!
//! Codes are the 32-bit FNV-1a hash of the original URL rendered as eight
//! lowercase hex digits, so the same URL always maps to the same code. A
//! 32-bit space collides long before it fills up; collisions are detected by
//! the mapping service and resolved with [`CodeGenerator::candidate`] using
//! a non-zero attempt number, which appends four more hex digits.

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Produces short code candidates for a URL.
pub trait CodeGenerator: Send + Sync {
    /// Returns the code candidate for `original_url`.
    ///
    /// Attempt `0` is the base code. Later attempts are only requested after
    /// the previous candidate turned out to belong to a different URL.
    fn candidate(&self, original_url: &str, attempt: u32) -> String;
}

/// FNV-1a based generator compatible with existing stored codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FnvCodeGenerator;

impl CodeGenerator for FnvCodeGenerator {
    fn candidate(&self, original_url: &str, attempt: u32) -> String {
        let base = generate_code(original_url);
        if attempt == 0 {
            return base;
        }

        let salted = format!("{}#{}", attempt, original_url);
        format!("{}{:04x}", base, fnv1a_32(salted.as_bytes()) & 0xffff)
    }
}

/// 32-bit FNV-1a over raw bytes.
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Base short code for a URL: eight lowercase hex digits.
///
/// # Examples
///
/// ```
/// use redis_shortener::utils::code_generator::generate_code;
///
/// assert_eq!(generate_code("https://www.github.com"), "d0409d29");
/// ```
pub fn generate_code(original_url: &str) -> String {
    format!("{:08x}", fnv1a_32(original_url.as_bytes()))
}

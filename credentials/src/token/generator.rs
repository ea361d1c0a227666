use rand::rngs::OsRng;
use rand::RngCore;

/// Token size in bytes before hex encoding (192-bit)
const TOKEN_BYTES: usize = 24;

/// Opaque access token generator.
///
/// Tokens carry no claims; they are bearer secrets whose validity is decided
/// by the session store that issued them.
pub struct TokenGenerator;

impl TokenGenerator {
    /// Create a new token generator instance.
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh access token.
    ///
    /// Draws 24 bytes from the operating system CSPRNG and hex-encodes them,
    /// yielding a 48-character lowercase string.
    ///
    /// # Returns
    /// The access token
    pub fn generate(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// AES-GCM Test Vectors for Interoperability
// Based on the McGrew & Viega GCM specification test cases

use serde::{Deserialize, Serialize};

const VECTOR_FILE: &str = include_str!("gcm_vectors.json");

/// Test vector structure for AES-GCM operations, hex encoded as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AesGcmTestVector {
    pub name: String,
    pub key: String,
    pub nonce: String,
    pub aad: String,
    pub plaintext: String,
    pub ciphertext: String,
    pub tag: String,
}

/// Decoded form of [`AesGcmTestVector`]
#[derive(Debug, Clone)]
pub struct DecodedVector {
    pub name: String,
    pub key: Vec<u8>,
    pub nonce: Vec<u8>,
    pub aad: Vec<u8>,
    pub plaintext: Vec<u8>,
    pub ciphertext: Vec<u8>,
    pub tag: Vec<u8>,
}

impl AesGcmTestVector {
    pub fn decode(&self) -> DecodedVector {
        let field = |value: &str, what: &str| {
            hex::decode(value)
                .unwrap_or_else(|e| panic!("{}: bad hex in {}: {}", self.name, what, e))
        };
        DecodedVector {
            name: self.name.clone(),
            key: field(&self.key, "key"),
            nonce: field(&self.nonce, "nonce"),
            aad: field(&self.aad, "aad"),
            plaintext: field(&self.plaintext, "plaintext"),
            ciphertext: field(&self.ciphertext, "ciphertext"),
            tag: field(&self.tag, "tag"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VectorFile {
    standard: Vec<AesGcmTestVector>,
    edge_cases: Vec<AesGcmTestVector>,
}

fn load() -> VectorFile {
    serde_json::from_str(VECTOR_FILE).expect("Failed to parse AES-GCM test vectors")
}

/// Published test cases 1-18 (AES-128, AES-192, AES-256)
pub fn standard_test_vectors() -> Vec<DecodedVector> {
    load().standard.iter().map(AesGcmTestVector::decode).collect()
}

/// Nonce lengths other than 12 bytes and unaligned message sizes
pub fn edge_case_test_vectors() -> Vec<DecodedVector> {
    load().edge_cases.iter().map(AesGcmTestVector::decode).collect()
}

/// Every vector in the file
pub fn all_test_vectors() -> Vec<DecodedVector> {
    let mut vectors = standard_test_vectors();
    vectors.extend(edge_case_test_vectors());
    vectors
}

/// Chunk sizes used to replay vectors through the streaming API
pub fn streaming_chunk_sizes() -> &'static [usize] {
    &[1, 7, 15, 16, 17, 64]
}

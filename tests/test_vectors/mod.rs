// Test vectors module for interoperability testing
// Published AES-GCM vectors plus edge cases for nonce lengths and block
// boundaries, stored as JSON beside this file

pub mod aes_gcm;

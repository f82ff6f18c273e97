use super::*;

fn from_hex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}

#[test]
fn test_aes128_fips197_vector() {
    // FIPS-197 Appendix C.1
    let key = from_hex("000102030405060708090a0b0c0d0e0f");
    let cipher = AesBlockCipher::new(&key).unwrap();

    let mut block: Block = from_hex("00112233445566778899aabbccddeeff").try_into().unwrap();
    cipher.encrypt_block(&mut block);

    assert_eq!(hex::encode(block), "69c4e0d86a7b0430d8cdb78070b4c55a");
}

#[test]
fn test_aes192_fips197_vector() {
    // FIPS-197 Appendix C.2
    let key = from_hex("000102030405060708090a0b0c0d0e0f1011121314151617");
    let cipher = AesBlockCipher::new(&key).unwrap();

    let mut block: Block = from_hex("00112233445566778899aabbccddeeff").try_into().unwrap();
    cipher.encrypt_block(&mut block);

    assert_eq!(hex::encode(block), "dda97ca4864cdfe06eaf70a0ec0d7191");
}

#[test]
fn test_aes256_fips197_vector() {
    // FIPS-197 Appendix C.3
    let key = from_hex("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");
    let cipher = AesBlockCipher::new(&key).unwrap();

    let mut block: Block = from_hex("00112233445566778899aabbccddeeff").try_into().unwrap();
    cipher.encrypt_block(&mut block);

    assert_eq!(hex::encode(block), "8ea2b7ca516745bfeafc49904b496089");
}

#[test]
fn test_key_size_detection() {
    assert_eq!(AesBlockCipher::new(&[0u8; 16]).unwrap().key_size(), KeySize::Aes128);
    assert_eq!(AesBlockCipher::new(&[0u8; 24]).unwrap().key_size(), KeySize::Aes192);
    assert_eq!(AesBlockCipher::new(&[0u8; 32]).unwrap().key_size(), KeySize::Aes256);
    assert_eq!(KeySize::Aes192.to_string(), "AES-192");
}

#[test]
fn test_invalid_key_lengths_rejected() {
    for len in [0usize, 1, 15, 17, 23, 25, 31, 33, 64] {
        let result = AesBlockCipher::new(&vec![0u8; len]);
        match result {
            Err(crate::error::GcmError::InvalidKeyLength { actual, .. }) => assert_eq!(actual, len),
            other => panic!("expected InvalidKeyLength for {} bytes, got {:?}", len, other),
        }
    }
}

#[test]
fn test_debug_redacts_schedule() {
    let cipher = AesBlockCipher::new(&[0x42; 32]).unwrap();
    let rendered = format!("{:?}", cipher);
    assert!(rendered.contains("REDACTED"));
    assert!(rendered.contains("Aes256"));
}

#[test]
fn test_fixed_size_constructors_match_slice_constructor() {
    let key: [u8; 24] = from_hex("000102030405060708090a0b0c0d0e0f1011121314151617")
        .try_into()
        .unwrap();
    let cipher = AesBlockCipher::new_192(&key);
    assert_eq!(cipher.key_size(), KeySize::Aes192);

    let mut block: Block = from_hex("00112233445566778899aabbccddeeff").try_into().unwrap();
    cipher.encrypt_block(&mut block);
    assert_eq!(hex::encode(block), "dda97ca4864cdfe06eaf70a0ec0d7191");

    assert_eq!(AesBlockCipher::new_128(&[0u8; 16]).key_size(), KeySize::Aes128);
    assert_eq!(AesBlockCipher::new_256(&[0u8; 32]).key_size(), KeySize::Aes256);
}

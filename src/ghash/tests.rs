use super::*;

// H = E_K(0^128) for the all-zero AES-128 key
const H_ZERO_KEY: &str = "66e94bd4ef8a2c3b884cfa59ca342b2e";

fn subkey(s: &str) -> [u8; GHASH_KEY_SIZE] {
    hex::decode(s).unwrap().try_into().unwrap()
}

#[test]
fn test_empty_input_digest_is_zero() {
    // Only the all-zero length block is absorbed: (0 ^ 0) * H = 0
    let acc = GHashAccumulator::new(&subkey(H_ZERO_KEY));
    assert_eq!(acc.digest(), [0u8; GHASH_DIGEST_SIZE]);
}

#[test]
fn test_single_ciphertext_block() {
    // McGrew & Viega test case 2: GHASH(H, {}, C)
    let mut acc = GHashAccumulator::new(&subkey(H_ZERO_KEY));
    acc.set_authdata(&[]);
    acc.add(&hex::decode("0388dace60b6a392f328c2b971b2fe78").unwrap());

    assert_eq!(hex::encode(acc.digest()), "f38cbb1ad69223dcc3457ae5b6b0f885");
}

#[test]
fn test_split_adds_match_single_add() {
    let data: Vec<u8> = (0..100u8).collect();
    let aad = b"header bytes";

    let mut whole = GHashAccumulator::new(&subkey(H_ZERO_KEY));
    whole.set_authdata(aad).add(&data);

    for split in [1usize, 7, 15, 16, 17, 33, 99] {
        let mut parts = GHashAccumulator::new(&subkey(H_ZERO_KEY));
        parts.set_authdata(aad);
        for chunk in data.chunks(split) {
            parts.add(chunk);
        }
        assert_eq!(parts.digest(), whole.digest(), "split size {}", split);
        assert_eq!(parts.data_len(), 100);
    }
}

#[test]
fn test_aad_and_data_are_padded_separately() {
    // Moving a byte from the AAD to the data changes the padding and the
    // length block, so the digests must differ.
    let mut a = GHashAccumulator::new(&subkey(H_ZERO_KEY));
    a.set_authdata(b"abc").add(b"def");

    let mut b = GHashAccumulator::new(&subkey(H_ZERO_KEY));
    b.set_authdata(b"ab").add(b"cdef");

    assert_ne!(a.digest(), b.digest());
}

#[test]
fn test_set_authdata_resets_state() {
    let mut acc = GHashAccumulator::new(&subkey(H_ZERO_KEY));
    acc.set_authdata(b"first").add(b"some ciphertext");

    acc.set_authdata(b"second");
    assert_eq!(acc.data_len(), 0);
    assert_eq!(acc.aad_len(), 6);

    let mut fresh = GHashAccumulator::new(&subkey(H_ZERO_KEY));
    fresh.set_authdata(b"second");
    assert_eq!(acc.digest(), fresh.digest());
}

#[test]
fn test_digest_is_repeatable() {
    let mut acc = GHashAccumulator::new(&subkey(H_ZERO_KEY));
    acc.set_authdata(b"aad").add(b"0123456789");
    let first = acc.digest();
    assert_eq!(acc.digest(), first);

    // Adding more data afterwards still works
    acc.add(b"more");
    assert_ne!(acc.digest(), first);
}

#[test]
fn test_set_key_changes_digest() {
    let mut acc = GHashAccumulator::new(&subkey(H_ZERO_KEY));
    acc.set_authdata(b"aad").add(b"data");
    let before = acc.digest();

    acc.set_key(&[0x11; GHASH_KEY_SIZE]);
    acc.set_authdata(b"aad").add(b"data");
    assert_ne!(acc.digest(), before);
}

#[test]
fn test_set_key_then_reset_uses_new_key() {
    let mut acc = GHashAccumulator::new(&subkey(H_ZERO_KEY));
    acc.set_key(&[0x11; GHASH_KEY_SIZE]);
    acc.set_authdata(b"aad").add(b"data");

    let mut fresh = GHashAccumulator::new(&[0x11; GHASH_KEY_SIZE]);
    fresh.set_authdata(b"aad").add(b"data");
    assert_eq!(acc.digest(), fresh.digest());
}

#[test]
fn test_clone_of_used_accumulator_resets_cleanly() {
    let mut template = GHashAccumulator::new(&subkey(H_ZERO_KEY));
    template.set_authdata(b"old").add(b"stale data");

    let mut copy = template.clone();
    copy.set_authdata(b"new").add(b"payload");

    let mut fresh = GHashAccumulator::new(&subkey(H_ZERO_KEY));
    fresh.set_authdata(b"new").add(b"payload");
    assert_eq!(copy.digest(), fresh.digest());

    // The original is untouched by work on the copy
    assert_eq!(template.aad_len(), 3);
    assert_eq!(template.data_len(), 10);
}

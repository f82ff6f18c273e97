#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use qasa_gcm::gcm::{self, Gcm, MessageParams};

#[derive(Arbitrary, Debug)]
struct GcmFuzzInput {
    plaintext: Vec<u8>,
    key: Vec<u8>,
    nonce: Vec<u8>,
    associated_data: Option<Vec<u8>>,
    ciphertext: Vec<u8>,
    chunk_size: Option<usize>,
}

fuzz_target!(|input: GcmFuzzInput| {
    // Arbitrary key and nonce lengths must fail cleanly, never panic
    let aad = input.associated_data.as_deref();
    let _ = gcm::decrypt(&input.ciphertext, aad, &input.key, &input.nonce);

    let key = match input.key.len() {
        16 | 24 | 32 => input.key.clone(),
        _ => vec![0x5a; 32],
    };
    let nonce = if input.nonce.is_empty() {
        vec![0u8; 12]
    } else {
        input.nonce.clone()
    };

    let Ok(gcm) = Gcm::new(&key) else {
        return;
    };
    let Ok(params) = MessageParams::from_parts(&nonce, aad.unwrap_or(&[])) else {
        return;
    };

    // One-shot round trip
    let sealed = gcm.seal(&params, &input.plaintext);
    let opened = gcm.open(&params, &sealed).expect("round trip must authenticate");
    assert_eq!(opened, input.plaintext);

    // Streaming in chunks must reproduce the one-shot output
    if let Some(chunk_size) = input.chunk_size.filter(|&size| size > 0 && size < 1_000_000) {
        let mut encryptor = gcm.begin_encrypt(&params);
        let mut ciphertext = Vec::with_capacity(input.plaintext.len());
        for chunk in input.plaintext.chunks(chunk_size) {
            ciphertext.extend(encryptor.update(chunk));
        }
        let tag = encryptor.authtag();
        assert_eq!(&ciphertext[..], &sealed[..input.plaintext.len()]);
        assert_eq!(&tag.as_bytes()[..], &sealed[input.plaintext.len()..]);

        let mut decryptor = gcm.begin_decrypt(&params);
        for chunk in ciphertext.chunks(chunk_size) {
            decryptor.update(chunk);
        }
        assert!(decryptor.verify(&tag));
    }

    // Fuzzed ciphertext under a valid key only ever fails authentication
    let _ = gcm.open(&params, &input.ciphertext);
});

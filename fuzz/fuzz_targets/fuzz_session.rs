#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use qasa_gcm::gcm::{GcmSession, SessionState};
use qasa_gcm::GcmError;

#[derive(Arbitrary, Debug)]
enum Call {
    SetKey(Vec<u8>),
    AddAuthdata(Vec<u8>),
    SetNonce(Vec<u8>),
    SetAuthtag(Vec<u8>),
    Encrypt,
    Decrypt,
    Update(Vec<u8>),
    Authtag,
    Good,
    Clear,
}

fuzz_target!(|calls: Vec<Call>| {
    let mut session = GcmSession::new();

    for call in calls {
        let before = session.state();
        let result: Result<(), GcmError> = match call {
            Call::SetKey(key) => session.set_key(&key).map(|_| ()),
            Call::AddAuthdata(aad) => session.add_authdata(&aad).map(|_| ()),
            Call::SetNonce(nonce) => session.set_nonce(&nonce).map(|_| ()),
            Call::SetAuthtag(tag) => session.set_authtag(&tag).map(|_| ()),
            Call::Encrypt => session.encrypt().map(|_| ()),
            Call::Decrypt => session.decrypt().map(|_| ()),
            Call::Update(data) => session
                .update(&data)
                .map(|out| assert_eq!(out.len(), data.len())),
            Call::Authtag => session.authtag().map(|_| ()),
            Call::Good => session.good().map(|_| ()),
            Call::Clear => {
                session.clear();
                assert_eq!(session.state(), SessionState::Init);
                Ok(())
            }
        };

        // A rejected call never moves the state machine
        if result.is_err() {
            assert_eq!(session.state(), before);
        }
    }
});

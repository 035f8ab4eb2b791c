use num_bigint::BigUint;
use realmauth_core::codec::{fixed_bytes_32, hex64};
use realmauth_core::srp::*;
use realmauth_core::types::*;

// Frozen reference values for username "TESTUSER", password "PASSWORD1",
// salt = 00 01 02 .. 1F, b = 0x11 * 32, a = 0x22 * 32.
const FIXED_SALT: [u8; SALT_LENGTH] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E,
    0x0F, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x1B, 0x1C, 0x1D,
    0x1E, 0x1F,
];
const FIXED_B: [u8; 32] = [0x11; 32];
const FIXED_A: [u8; 32] = [0x22; 32];

const REF_VERIFIER_HEX: &str =
    "6958B71430A8158D3CD6AE47E5DD0C882E4E3BFCB31C1C152E321467B822E3E8";
const REF_A_HEX: &str = "53E43F4D820D82C6C0FD95758D88E0BD00F8E47A63EEDE4298458DF75DEFE088";
const REF_B_HEX: &str = "156443D8F2412A390CB77682C4811B0C2A8DC17B3B097FCA7F754960494A4497";
const REF_KEY_HEX: &str = "E24496448A471457CC1A83CFEADDC939E4F74883";
const REF_M1_HEX: &str = "4E5A89824DA481E8BA28F902F85802715C9A4CC9";
const REF_M2_HEX: &str = "3CCE8B7F0B507CFBCD8646BF563EABF03F8DF8FE";

const REF_PLAIN_B_HEX: &str =
    "753C4BB7FDECE3A48F3B7E4C8DFCE66CB7A8223160F34739F69493BE9F9D6C04";
const REF_PLAIN_KEY_HEX: &str = "43AC63C1508BD45F80C6CA0A13756F5402B1AEE7";
const REF_PLAIN_M1_HEX: &str = "53AE50545454D3FED38E8F166177DD3397B341F7";

fn ref_verifier() -> [u8; VERIFIER_LENGTH] {
    compute_verifier(&AZEROTH_GROUP, "TESTUSER", "PASSWORD1", &FIXED_SALT).unwrap()
}

#[test]
fn verifier_matches_known_vector() {
    assert_eq!(hex::encode_upper(ref_verifier()), REF_VERIFIER_HEX);
}

#[test]
fn verifier_is_deterministic() {
    assert_eq!(ref_verifier(), ref_verifier());
}

#[test]
fn verifier_is_case_insensitive_in_credentials() {
    let upper = ref_verifier();
    let mixed =
        compute_verifier(&AZEROTH_GROUP, "TestUser", "password1", &FIXED_SALT).unwrap();
    assert_eq!(upper, mixed);
}

#[test]
fn verifier_is_always_32_bytes() {
    // A spread of inputs, including ones whose g^x mod N is unlikely to use
    // the full width. The fixed-width invariant must hold regardless.
    let cases = [
        ("A", ""),
        ("BOB", "x"),
        ("CHARLIE", "hunter2"),
        ("ÜMLAUT", "pässwörd"),
        ("VERYLONGUSERNAMEXXXXXXXXXXXXXXXX", "correct horse battery staple"),
    ];
    for (user, pass) in cases {
        for salt_byte in [0x00u8, 0x5A, 0xFF] {
            let salt = [salt_byte; SALT_LENGTH];
            let v = compute_verifier(&AZEROTH_GROUP, user, pass, &salt).unwrap();
            assert_eq!(v.len(), VERIFIER_LENGTH);
        }
    }
}

#[test]
fn legacy_hash_matches_identity_hash() {
    let digest = identity_hash("TESTUSER", "PASSWORD1");
    assert_eq!(legacy_hash("TESTUSER", "PASSWORD1"), hex::encode_upper(digest));
    assert_eq!(
        legacy_hash("testuser", "password1"),
        legacy_hash("TESTUSER", "PASSWORD1")
    );
}

#[test]
fn legacy_hash_known_vector() {
    assert_eq!(
        legacy_hash("alice", "Secret123!"),
        "B9A1ADBAA0AD26FFD61DD77B90F465CEE5C83CEB"
    );
}

#[test]
fn vbulletin_hash_known_vectors() {
    // MD5("Secret123!mysalt") and MD5("Secret123!").
    assert_eq!(
        vbulletin_hash("Secret123!", "mysalt", true),
        "5C8E01A5048C4FFF6B29A989E213ADEF"
    );
    assert_eq!(
        vbulletin_hash("Secret123!", "", false),
        "dbd4cd26d06af1db97df0d0aaa46ad59"
    );
}

#[test]
fn password_only_hash_respects_case_flag() {
    let upper = password_only_hash("Secret123!", true);
    let lower = password_only_hash("Secret123!", false);
    assert_eq!(upper, lower.to_uppercase());
    assert_eq!(upper.len(), PROOF_HEX_LENGTH);
}

#[test]
fn classic_ephemeral_matches_known_vector() {
    let b_pub = server_ephemeral(
        &AZEROTH_GROUP,
        &ref_verifier(),
        &FIXED_B,
        EphemeralScheme::Classic,
    );
    assert_eq!(hex64(&b_pub).unwrap(), REF_B_HEX);
}

#[test]
fn plain_ephemeral_matches_known_vector() {
    let b_pub = server_ephemeral(
        &AZEROTH_GROUP,
        &ref_verifier(),
        &FIXED_B,
        EphemeralScheme::PlainModPow,
    );
    assert_eq!(hex64(&b_pub).unwrap(), REF_PLAIN_B_HEX);
}

#[test]
fn server_side_exchange_matches_known_vector() {
    let group = &*AZEROTH_GROUP;
    let a = BigUint::from_bytes_be(&FIXED_A);
    let a_pub = group.g.modpow(&a, &group.n);
    let a_hex = hex64(&a_pub).unwrap();
    assert_eq!(a_hex, REF_A_HEX);

    let u = compute_u(&a_hex, REF_B_HEX);
    let v = BigUint::from_bytes_be(&ref_verifier());
    let b = BigUint::from_bytes_be(&FIXED_B);
    let s = compute_shared_secret(group, &a_pub, &v, &u, &b);
    let key = session_key_hex(&s).unwrap();
    assert_eq!(key, REF_KEY_HEX);

    let m1 = compute_m1(&a_hex, REF_B_HEX, &key);
    assert_eq!(m1, REF_M1_HEX);
    let m2 = compute_m2(&a_hex, &m1, &key);
    assert_eq!(m2, REF_M2_HEX);
}

#[test]
fn client_and_server_secrets_agree_classic() {
    let group = &*AZEROTH_GROUP;
    let verifier = ref_verifier();
    let x = compute_x(&FIXED_SALT, &identity_hash("TESTUSER", "PASSWORD1"));
    let a = BigUint::from_bytes_be(&FIXED_A);
    let b = BigUint::from_bytes_be(&FIXED_B);
    let a_pub = group.g.modpow(&a, &group.n);
    let b_pub = server_ephemeral(group, &verifier, &FIXED_B, EphemeralScheme::Classic);

    let a_hex = hex64(&a_pub).unwrap();
    let b_hex = hex64(&b_pub).unwrap();
    let u = compute_u(&a_hex, &b_hex);

    let v = BigUint::from_bytes_be(&verifier);
    let server = compute_shared_secret(group, &a_pub, &v, &u, &b);
    let client = client_shared_secret(group, &b_pub, &x, &a, &u, EphemeralScheme::Classic);
    assert_eq!(server, client);
}

#[test]
fn client_and_server_secrets_agree_plain() {
    let group = &*AZEROTH_GROUP;
    let verifier = ref_verifier();
    let x = compute_x(&FIXED_SALT, &identity_hash("TESTUSER", "PASSWORD1"));
    let a = BigUint::from_bytes_be(&FIXED_A);
    let b = BigUint::from_bytes_be(&FIXED_B);
    let a_pub = group.g.modpow(&a, &group.n);
    let b_pub = server_ephemeral(group, &verifier, &FIXED_B, EphemeralScheme::PlainModPow);

    let a_hex = hex64(&a_pub).unwrap();
    let b_hex = hex64(&b_pub).unwrap();
    let u = compute_u(&a_hex, &b_hex);

    let v = BigUint::from_bytes_be(&verifier);
    let server = compute_shared_secret(group, &a_pub, &v, &u, &b);
    let client = client_shared_secret(group, &b_pub, &x, &a, &u, EphemeralScheme::PlainModPow);
    assert_eq!(server, client);

    let key = session_key_hex(&server).unwrap();
    assert_eq!(key, REF_PLAIN_KEY_HEX);
    assert_eq!(compute_m1(&a_hex, &b_hex, &key), REF_PLAIN_M1_HEX);
}

#[test]
fn wrong_password_changes_the_proof() {
    let group = &*AZEROTH_GROUP;
    let verifier = ref_verifier();
    let a = BigUint::from_bytes_be(&FIXED_A);
    let b = BigUint::from_bytes_be(&FIXED_B);
    let a_pub = group.g.modpow(&a, &group.n);
    let b_pub = server_ephemeral(group, &verifier, &FIXED_B, EphemeralScheme::Classic);

    let a_hex = hex64(&a_pub).unwrap();
    let b_hex = hex64(&b_pub).unwrap();
    let u = compute_u(&a_hex, &b_hex);

    // Client derives x from the wrong password.
    let x = compute_x(&FIXED_SALT, &identity_hash("TESTUSER", "PASSWORD2"));
    let client = client_shared_secret(group, &b_pub, &x, &a, &u, EphemeralScheme::Classic);
    let client_key = session_key_hex(&client).unwrap();
    assert_ne!(compute_m1(&a_hex, &b_hex, &client_key), REF_M1_HEX);
}

#[test]
fn constant_time_eq_handles_lengths() {
    assert!(constant_time_eq(b"abc", b"abc"));
    assert!(!constant_time_eq(b"abc", b"abd"));
    assert!(!constant_time_eq(b"abc", b"abcd"));
    assert!(constant_time_eq(b"", b""));
}

#[test]
fn group_constants_are_consistent() {
    let group = &*AZEROTH_GROUP;
    assert_eq!(hex64(&group.n).unwrap(), N_HEX);
    assert_eq!(group.g, BigUint::from(7u32));
    assert_eq!(group.k, BigUint::from(3u32));
    let bytes = fixed_bytes_32(&group.n).unwrap();
    assert_eq!(hex::encode_upper(bytes), N_HEX);
}

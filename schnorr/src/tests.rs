use super::*;
use curve::{Affine, BaseField, Goldilocks, Group, RandomField, ScalarField};
use rand::SeedableRng;
use rand::rngs::StdRng;

const PRIVATE_KEY_HEX: &str =
    "825ed9fde4a049e5eb4a0a31dd3cc53ac657e4e0171f44ae1224ad301f8e51af5c4bbcafa28e1b55";
const PUBLIC_KEY_HEX: &str =
    "99f3473027655c41eebb21afd06b516b438b42ad70c27ac8208cdb56b60be7d5c9ddfb05e3cf9518";
const NONCE_HEX: &str =
    "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcd3f";
const MESSAGE_HEX: &str =
    "bbbffb8afdda7a8de428a56f2a2217670c35bb7ed7eebbb47d5b1b8727bd1d2ea4f2fa459cd03861";

fn message(values: &[u64]) -> BaseField {
    let elements: Vec<Goldilocks> = values.iter().map(|&v| Goldilocks::new(v)).collect();
    hash_to_quintic_extension(&elements)
}

#[test]
fn test_sign_verify() {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let pk = sk.verifying_key();
    let msg = message(&[1, 2, 3]);

    let sig = sk.sign(&mut rng, &msg).expect("sign");
    let ok = pk.verify(&msg, &sig).expect("verify");
    assert!(ok);
}

#[test]
fn test_verify_rejects_wrong_message() {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let pk = sk.verifying_key();
    let sig = sk.sign(&mut rng, &message(&[10, 11, 12])).expect("sign");

    let ok = pk.verify(&message(&[10, 11, 13]), &sig).expect("verify");
    assert!(!ok);
}

#[test]
fn test_verify_rejects_wrong_key() {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let msg = message(&[21, 22, 23]);
    let sig = sk.sign(&mut rng, &msg).expect("sign");

    let wrong_pk = SigningKey::random(&mut rng).verifying_key();

    let ok = wrong_pk.verify(&msg, &sig).expect("verify");
    assert!(!ok);
}

#[test]
fn test_commitment_identity() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..3 {
        let sk = SigningKey::random(&mut rng);
        let nonce = ScalarField::random(&mut rng);
        let msg = BaseField::random(&mut rng);

        let sig = sk.sign_with_nonce(&msg, &nonce).expect("sign");
        let r = Affine::generator().scalar_mul(&nonce).encode();
        let pk = sk.verifying_key().point();
        let recomputed = Affine::generator().scalar_mul(&sig.s) + pk.scalar_mul(&sig.e);
        assert_eq!(recomputed.encode(), r);
    }
}

#[test]
fn test_golden_signature() {
    let sk = SigningKey::from_hex(PRIVATE_KEY_HEX).expect("key");
    assert_eq!(sk.verifying_key().to_hex(), PUBLIC_KEY_HEX);

    let nonce = ScalarField::from_bytes_le(&hex::decode(NONCE_HEX).unwrap()).unwrap();
    let msg = BaseField::from_bytes_le(&hex::decode(MESSAGE_HEX).unwrap()).unwrap();
    let sig = sk.sign_with_nonce(&msg, &nonce).expect("sign");

    assert_eq!(
        hex::encode(sig.s.to_bytes_le()),
        "8743ff1bc8f0177b9a6b7f05f2000468a0723fc1a5c62daeba4e523f73f5d7250ccd8362f6773712"
    );
    assert_eq!(
        hex::encode(sig.e.to_bytes_le()),
        "e4dd5889e9f1f2937537c30879ea8dac54dc41bcadd92391689445bc33aa04b87693ed18db49807c"
    );
    assert!(sk.verifying_key().verify(&msg, &sig).unwrap());
}

#[test]
fn test_zero_nonce_rejected() {
    let sk = SigningKey::from_hex(PRIVATE_KEY_HEX).expect("key");
    let result = sk.sign_with_nonce(&message(&[1]), &ScalarField::ZERO);
    assert_eq!(result, Err(SchnorrError::InvalidPoint));
}

#[test]
fn test_key_parsing() {
    let prefixed = SigningKey::from_hex(&format!("0x{PRIVATE_KEY_HEX}")).unwrap();
    assert_eq!(prefixed, SigningKey::from_hex(PRIVATE_KEY_HEX).unwrap());
    assert_eq!(hex::encode(prefixed.to_bytes()), PRIVATE_KEY_HEX);

    assert_eq!(
        SigningKey::from_hex(&PRIVATE_KEY_HEX[..78]),
        Err(SchnorrError::InvalidKeyLength { expected: 40, actual: 39 })
    );
    assert!(matches!(
        SigningKey::from_hex("zz"),
        Err(SchnorrError::InvalidHex(_))
    ));
    assert_eq!(format!("{:?}", prefixed), "SigningKey(..)");
}

#[test]
fn test_verifying_key_round_trip() {
    let pk = SigningKey::from_hex(PRIVATE_KEY_HEX).unwrap().verifying_key();
    let parsed = VerifyingKey::from_bytes(&pk.to_bytes()).unwrap();
    assert_eq!(parsed, pk);
    assert_eq!(pk.to_prefixed_hex(), format!("0x{PUBLIC_KEY_HEX}"));

    assert_eq!(
        VerifyingKey::from_bytes(&[0u8; 40]),
        Err(SchnorrError::InvalidPoint)
    );
}

#[test]
fn test_signature_wire_format() {
    let mut rng = StdRng::seed_from_u64(3);
    let sk = SigningKey::random(&mut rng);
    let sig = sk.sign(&mut rng, &message(&[5])).unwrap();

    let bytes = sig.to_bytes();
    assert_eq!(bytes.len(), SIG_SIZE);
    assert_eq!(&bytes[..40], &sig.s.to_bytes_le()[..]);
    assert_eq!(&bytes[40..], &sig.e.to_bytes_le()[..]);
    assert_eq!(Signature::from_bytes(&bytes).unwrap(), sig);
    assert_eq!(sig.to_hex().len(), 160);

    assert_eq!(
        Signature::from_bytes(&bytes[..79]),
        Err(SchnorrError::InvalidSignatureLength { expected: 80, actual: 79 })
    );
}

#[test]
fn test_serde_round_trip() {
    let mut rng = StdRng::seed_from_u64(9);
    let sk = SigningKey::random(&mut rng);
    let vk = VerifyingKey::from(&sk);
    let msg = message(&[8, 6, 7, 5, 3, 0, 9]);
    let sig = sk.sign(&mut rng, &msg).unwrap();

    let sk2: SigningKey = bincode::deserialize(&bincode::serialize(&sk).unwrap()).unwrap();
    let vk2: VerifyingKey = bincode::deserialize(&bincode::serialize(&vk).unwrap()).unwrap();
    let sig2: Signature = bincode::deserialize(&bincode::serialize(&sig).unwrap()).unwrap();

    assert_eq!(sk2, sk);
    assert_eq!(vk2, vk);
    assert!(vk2.verify(&msg, &sig2).unwrap());
}

#[test]
fn test_deserialize_rejects_invalid_verifying_key() {
    let off_curve = (1..40u64)
        .map(|c| BaseField::from_u64_array([c, 1, 0, 0, 0]))
        .find(|w| Affine::decode(w).is_err())
        .unwrap();
    let bytes = bincode::serialize(&off_curve).unwrap();
    assert!(bincode::deserialize::<VerifyingKey>(&bytes).is_err());
    assert!(bincode::deserialize::<Affine>(&bytes).is_err());

    let identity = bincode::serialize(&BaseField::ZERO).unwrap();
    assert!(bincode::deserialize::<VerifyingKey>(&identity).is_err());

    let pk = SigningKey::from_hex(PRIVATE_KEY_HEX).unwrap().verifying_key();
    let encoded = bincode::serialize(&pk).unwrap();
    assert_eq!(encoded, bincode::serialize(&pk.encoded()).unwrap());
    assert_eq!(
        VerifyingKey::try_from(off_curve),
        Err(SchnorrError::Curve(curve::CurveError::InvalidEncoding))
    );
}

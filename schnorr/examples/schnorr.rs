use curve::Goldilocks;
use rand::SeedableRng;
use rand::rngs::StdRng;
use schnorr::{Signature, SigningKey, VerifyingKey, hash_to_quintic_extension};

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let vk = VerifyingKey::from(&sk);

    let sk_bytes = bincode::serialize(&sk).expect("serialize sk");
    let vk_bytes = bincode::serialize(&vk).expect("serialize vk");

    let msg_bytes = b"hello schnorr";
    let msg_field: Vec<Goldilocks> = msg_bytes
        .iter()
        .map(|&b| Goldilocks::from_u32(b as u32))
        .collect();
    let msg = hash_to_quintic_extension(&msg_field);

    let sig = sk.sign(&mut rng, &msg).expect("sign");
    let sig_wire = sig.to_bytes();

    let sk2: SigningKey = bincode::deserialize(&sk_bytes).expect("deserialize sk");
    let vk2: VerifyingKey = bincode::deserialize(&vk_bytes).expect("deserialize vk");
    let sig2 = Signature::from_bytes(&sig_wire).expect("decode sig");

    let ok = vk2.verify(&msg, &sig2).expect("verify");
    assert!(ok);
    assert_eq!(sk2.verifying_key(), vk);

    println!("public key: {}", vk.to_prefixed_hex());
    println!("signature:  {}", sig.to_hex());
}

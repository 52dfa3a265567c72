//! End-to-end tests of the key exchange: known-answer vectors, equivalence
//! of the fast and simple walks, strategy independence, and exchange
//! symmetry for random secrets.
//!
//! The expected values were produced by an independent big-integer model
//! of the same parameter set, cross-checked against naive curve arithmetic
//! and Vélu's formulas.

use rand::RngCore;

use sidh_core::constants::{P503_ALICE_STRATEGY, P503_BOB_STRATEGY, P503_PARAMS};
use sidh_core::sidh::{
    keygen, keygen_simple, shared_secret, shared_secret_simple, Party, PublicKey,
    PUBLIC_KEY_BYTES, SECRET_KEY_BYTES,
};

// Scenario 1: generic fixed secrets.
const ALICE_SECRET: &str = "50a7294e6d8c1b0fa3572ed9c8416f0b7e9d2c5ae3f8d1046b7a8c95e1c3f202";
const BOB_SECRET: &str = "c3529be7406d1a08f3c9257b4e8d19a6f0c3752d4be891a3f6c0482de5791b00";

const ALICE_PUBLIC: [&str; 3] = [
    "bdabc0488c24263587c47cc0b2ee118b76351ff001360cd570d6e6c9a3e879f943e88312a986fd1c087cf93592fea69ed328504ae67df2e5faee9542464416b3871505f8478387ad67404a64186f75c8e7b10f2d195f9f0349efbda2c4147ea1d2f5a19df8534673c72abc2a1e30b75f3470dc4b23b2332a12324811c13f",
    "a196dd7d8be3e7fbad7e1082168aec322402912d986265a1da7dbccd6ba6503780e117e231d5d463e804bb29fed703146498bb8338cdd98ce5b7471ca9191e478abd4d6dfa7afd5719f3f6237c80ac51d02ae55f6115fb80953e5d87941e5fea7053620e0a0538e7dbac70cd33d4004de6b5463353492cc5b5047fef0e21",
    "977d9e00721e88ff1e73b504baeb7661afd1992e0ecaab5e90d0232a2d290c4389e1db54e6634b37cdc201f9bf9d2b007a00b6726274bb0a91ee7e1f60e4178a8995b5121d04d19567e91401916fb5771bbcaf6fabbb417e7902e1312cebc569a77c91fbae540cc9ef21bb9ffb4a556d412bd70b7fc61e481cc65f547710",
];

const BOB_PUBLIC: [&str; 3] = [
    "82118d0d3e221a4475cbf76500da2aff41910f7b5f41d978568bbf76e40776a774b164066bc8f5070ddd23583bf2663e54a5525b3bf415b510e0b0b2d6053e5a10cb091cfc9a16f6c362837530cfa56c88107b1b9860c3beec8d2fa158cef1baa22978228a089246ce5f9c124cfca92e9688b0306ca150de833eca66b619",
    "b6c991edb39e40d088791118f0860b0597b42c07ce5a495cdb16f4233b36282f1e1dbfde22f9985cbd56c48714bafdf65c19bd6ef1a4c7105a8846de8e6f214f32fee251fc03776cecc8942d28bfc800980f463e2c2e1eccb38b88cd6a8f3c2dfe7248f07a144041ff898b377fd51fcb5fe328f62e562502977b0f0c7612",
    "4a11a0dd671d5bb36bd3ce1fb181522c00b976ebcd05a814f06cb8fcd41f645958c095151a0a253bfab3a15ce6356b4ba419e257dfb8d6c705f9f0f3017f332253939fea18c3fe4e3788c6126d0e8cc5db1b4a3013f78a634ef8115a2a14b9af959a4c4d4d65c63fe496eec267db3efd2a884fc1043d955429ee36d0da03",
];

const SHARED_J: &str = "0e30e6b688517c3c5f6dc6a6d4727ce9c89e816dfdbcdd068be70a92a4a94dda378153ce1baf343817ded324568f040cc02cf95dd3c5be9334b307a304f317f583e8191af7faa2c22324516bc574c298c3cd52b4b402f4bd2398ecec6cfe5cc15e4cc642c80a3786928c6a96ebd0c9f7ae592066387c786692ad3890522a";

// Scenario 2: the minimal scalars a = 2, b = 1.
const ALICE_PUBLIC_MIN: [&str; 3] = [
    "9e1b4a3e8a6889a858297a8e6e613107458a799038f5f096019fda298aaa40f498155effb995c9335dafd4f01bd664e52cb527c490bf3edf180d5d0f9cdc23011c61ebb207d4d3de2c3d0a61911d2b8d75c180fba69aaf83aeb2acf02f4242d0d91f6a8825ea14c87b77dd7c2b03b257bfd3578c83234c20eaaf0808a521",
    "3fa82795531426b05b46804ab553c5465163b1693905beff3e8fb5126c4104dbb1969b3a48969dc1d9fd7bb3864807e02089d351b753bd9e3f9dc9bf9f7533d159e47b0e0605f5731f2a5d10b354a3784f77bfa656b002b6bdf09edc3a833550f68964e573bf640cfac241b867edbf99b245445371b74140249cfaca551b",
    "9e39a52d0521aa201c58ae2e5fc8a0edfbd85e22b514010aae06affc3d1d2b73c4dba8c79cdbefbb55b8b5aeaa10b895dd8025253417ca00e8ab37833bd909eacc22e8ac56588df6b15076cb404d324f3082ba2d3389ef246ac789a877dcc164dd63d8b4bf64e5167e3a09966da8e45e917beb8474ee50439da846218912",
];

const BOB_PUBLIC_MIN: [&str; 3] = [
    "763f2694558984dd6aeee6f77853bf6fa81296efea29e6772319bcc8db4ec1278fb4e7ebbf0527e8fd8d7c9f04dc036d589fb5613c8e5d2495be89898f220f90d1d1984eafb8e0f08123467ccd598ad6fa1fd1a29f2c9d5ac67b6000aa5f851733baf65eb243692d4e3038344aa84c9a813efbcb01d56861efe60b5ec533",
    "89c0d96baa767b229511190887ac409057ed691015d61988dce6433724b13e8411332a361a56e12ab1ef01dcc31a98ae7705c2788138e83b895ff7b765443190d1d1984eafb8e0f08123467ccd598ad6fa1fd1a29f2c9d5ac67b6000aa5f851733baf65eb243692d4e3038344aa84c9a813efbcb01d56861efe60b5ec533",
    "0000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000008bb38822bd46d45b0d5b2e9cc0bc84b4526602bac36a49575ac6344ca2c6d202229a1e9717002335f7d09a087968985e8912d1cfb2cf5fc9d8041e57d9f23e",
];

const SHARED_J_MIN: &str = "b797f0d68b986a16f2795613532c70b1ed75c79a028d67ca839a488942d4af633d1ae421d3151ca49cf6193bcb8ffb800fc0111edcea95804bd749635e4209fe407a31754d41db7a57dc9bcd4841461a856296c5c76b001a56846933a60868a2e7c2357bd31b943e59e802adf8f69752e9a2cbbc9cf2b7887c5f3a01363d";

fn secret(hexstr: &str) -> [u8; SECRET_KEY_BYTES] {
    let v = hex::decode(hexstr).unwrap();
    let mut bytes = [0u8; SECRET_KEY_BYTES];
    bytes.copy_from_slice(&v);
    bytes
}

fn public_key(components: &[&str; 3]) -> PublicKey {
    let mut bytes = [0u8; PUBLIC_KEY_BYTES];
    for (i, component) in components.iter().enumerate() {
        let v = hex::decode(component).unwrap();
        bytes[126 * i..126 * (i + 1)].copy_from_slice(&v);
    }
    PublicKey::from_bytes(&bytes).unwrap()
}

#[test]
fn known_answer_exchange() {
    let (ska, skb) = (secret(ALICE_SECRET), secret(BOB_SECRET));

    let pka = keygen(Party::Alice, &ska, &P503_PARAMS, &P503_ALICE_STRATEGY).unwrap();
    assert_eq!(pka, public_key(&ALICE_PUBLIC));

    let pkb = keygen(Party::Bob, &skb, &P503_PARAMS, &P503_BOB_STRATEGY).unwrap();
    assert_eq!(pkb, public_key(&BOB_PUBLIC));

    let ja = shared_secret(Party::Alice, &ska, &pkb, &P503_PARAMS, &P503_ALICE_STRATEGY).unwrap();
    let jb = shared_secret(Party::Bob, &skb, &pka, &P503_PARAMS, &P503_BOB_STRATEGY).unwrap();
    assert_eq!(ja, jb);
    assert_eq!(hex::encode(ja.to_bytes()), SHARED_J);
}

#[test]
fn known_answer_exchange_minimal_scalars() {
    // Alice's smallest even scalar and Bob's scalar 1 still produce full
    // walks and a nonsingular public key.
    let mut ska = [0u8; SECRET_KEY_BYTES];
    ska[0] = 2;
    let mut skb = [0u8; SECRET_KEY_BYTES];
    skb[0] = 1;

    let pka = keygen(Party::Alice, &ska, &P503_PARAMS, &P503_ALICE_STRATEGY).unwrap();
    assert_eq!(pka, public_key(&ALICE_PUBLIC_MIN));

    let pkb = keygen(Party::Bob, &skb, &P503_PARAMS, &P503_BOB_STRATEGY).unwrap();
    assert_eq!(pkb, public_key(&BOB_PUBLIC_MIN));

    let ja = shared_secret(Party::Alice, &ska, &pkb, &P503_PARAMS, &P503_ALICE_STRATEGY).unwrap();
    let jb = shared_secret(Party::Bob, &skb, &pka, &P503_PARAMS, &P503_BOB_STRATEGY).unwrap();
    assert_eq!(ja, jb);
    assert_eq!(hex::encode(ja.to_bytes()), SHARED_J_MIN);
}

#[test]
fn simple_walk_matches_fast_walk() {
    let (ska, skb) = (secret(ALICE_SECRET), secret(BOB_SECRET));

    let pka = keygen(Party::Alice, &ska, &P503_PARAMS, &P503_ALICE_STRATEGY).unwrap();
    let pkb = keygen(Party::Bob, &skb, &P503_PARAMS, &P503_BOB_STRATEGY).unwrap();
    assert_eq!(keygen_simple(Party::Alice, &ska, &P503_PARAMS).unwrap(), pka);
    assert_eq!(keygen_simple(Party::Bob, &skb, &P503_PARAMS).unwrap(), pkb);

    let ja = shared_secret(Party::Alice, &ska, &pkb, &P503_PARAMS, &P503_ALICE_STRATEGY).unwrap();
    let jb = shared_secret(Party::Bob, &skb, &pka, &P503_PARAMS, &P503_BOB_STRATEGY).unwrap();
    assert_eq!(
        shared_secret_simple(Party::Alice, &ska, &pkb, &P503_PARAMS).unwrap(),
        ja
    );
    assert_eq!(
        shared_secret_simple(Party::Bob, &skb, &pka, &P503_PARAMS).unwrap(),
        jb
    );
}

#[test]
fn all_ones_strategy_matches_optimal() {
    // splits[s] = 1 everywhere is the degenerate strategy that parks every
    // intermediate; the key must not depend on the traversal order.
    let (ska, skb) = (secret(ALICE_SECRET), secret(BOB_SECRET));
    let ones_a = [1usize; 123];
    let ones_b = [1usize; 158];

    assert_eq!(
        keygen(Party::Alice, &ska, &P503_PARAMS, &ones_a).unwrap(),
        keygen(Party::Alice, &ska, &P503_PARAMS, &P503_ALICE_STRATEGY).unwrap()
    );
    assert_eq!(
        keygen(Party::Bob, &skb, &P503_PARAMS, &ones_b).unwrap(),
        keygen(Party::Bob, &skb, &P503_PARAMS, &P503_BOB_STRATEGY).unwrap()
    );
}

#[test]
fn random_secrets_agree_on_the_shared_secret() {
    let mut rng = rand::thread_rng();
    for _ in 0..3 {
        let mut ska = [0u8; SECRET_KEY_BYTES];
        rng.fill_bytes(&mut ska);
        ska[31] &= 0x03; // below 2^250
        ska[0] |= 2; // nonzero after the low bit is cleared

        let mut skb = [0u8; SECRET_KEY_BYTES];
        rng.fill_bytes(&mut skb);
        skb[31] &= 0x0F; // below 3^159, whose top byte is 0x10
        skb[0] |= 1;

        let pka = keygen(Party::Alice, &ska, &P503_PARAMS, &P503_ALICE_STRATEGY).unwrap();
        let pkb = keygen(Party::Bob, &skb, &P503_PARAMS, &P503_BOB_STRATEGY).unwrap();
        let ja =
            shared_secret(Party::Alice, &ska, &pkb, &P503_PARAMS, &P503_ALICE_STRATEGY).unwrap();
        let jb = shared_secret(Party::Bob, &skb, &pka, &P503_PARAMS, &P503_BOB_STRATEGY).unwrap();
        assert_eq!(ja, jb);
    }
}

#[test]
fn public_key_survives_serialization() {
    let ska = secret(ALICE_SECRET);
    let pka = keygen(Party::Alice, &ska, &P503_PARAMS, &P503_ALICE_STRATEGY).unwrap();
    let bytes = pka.to_bytes();
    assert_eq!(PublicKey::from_bytes(&bytes).unwrap(), pka);
}

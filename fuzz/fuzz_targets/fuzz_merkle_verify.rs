#![no_main]

use libfuzzer_sys::fuzz_target;

use cohort_crypto::{hash_address, verify_proof, MerkleTree};
use cohort_types::{Address, Digest};

// Build a tree from arbitrary addresses, then verify both honest proofs and
// an arbitrary forged proof. Honest proofs must always verify; nothing may panic.
fuzz_target!(|input: (Vec<[u8; 20]>, [u8; 20], Vec<[u8; 32]>)| {
    let (members, probe, forged) = input;
    let members: Vec<Address> = members.into_iter().take(256).map(Address::new).collect();
    let probe = Address::new(probe);
    let forged: Vec<Digest> = forged.into_iter().take(64).map(Digest::new).collect();

    let tree = MerkleTree::from_addresses(&members);
    let root = tree.root();

    for member in &members {
        let proof = tree.proof_for_address(member).unwrap();
        assert!(verify_proof(&root, &hash_address(member), &proof));
    }

    let _ = verify_proof(&root, &hash_address(&probe), &forged);
});

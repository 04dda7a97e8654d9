//! Basalt Basic Example
//!
//! Minimal usage: one-shot Argon2id, then the pooled variant.

fn main() {
    let password = b"correct horse battery staple";
    let salt = b"0123456789abcdef";

    // One-shot: 1 pass over 64 MiB with 4 lanes, 32-byte key.
    let key = basalt::id_key(password, salt, 1, 64 * 1024, 4, 32);
    println!("One-shot: {}", hex::encode(&key));

    // Pooled: same parameters, matrix reused across derivations.
    let pool = basalt::IdKeyPool::new(1, 64 * 1024, 4);
    let pooled = pool.derive(password, salt, &[], &[], 32);
    assert_eq!(key, pooled);
    println!("Pooled:   {}", hex::encode(&pooled));
}

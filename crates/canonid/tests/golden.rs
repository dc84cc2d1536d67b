//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation must produce identical:
//! - canonical text
//! - sha256 digest (hex)
//! - identifier (`prefix_` + first 32 hex)

use canonid::{
    canonicalize, digest, identifier, CanonicalConfig, EncodingError, Error, GeneratorConfig,
    IdGenerator, Identifier, IdentifierError, Mapping, PrefixError, Sequence, Sha256Hasher, Value,
};
use serde::Serialize;

/// A single golden test vector.
#[derive(Debug, Serialize)]
pub struct GoldenVector {
    pub name: String,
    pub description: String,

    // Inputs
    pub prefix: String,
    pub input_json: String,

    // Derived outputs
    pub canonical: String,
    pub sha256: String,
    pub identifier: String,
}

fn generate_vector(name: &str, description: &str, prefix: &str, input_json: &str) -> GoldenVector {
    let value = Value::parse_json(input_json).unwrap();
    GoldenVector {
        name: name.to_string(),
        description: description.to_string(),
        prefix: prefix.to_string(),
        input_json: input_json.to_string(),
        canonical: canonicalize(&value).unwrap(),
        sha256: digest(&value).unwrap().to_hex(),
        identifier: identifier(prefix, &value).unwrap().to_string(),
    }
}

/// (name, description, prefix, input, canonical, sha256, identifier)
type Pinned = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const PINNED: &[Pinned] = &[
    (
        "plain_string",
        "Agent name used directly as identifier material",
        "cred",
        r#""alice""#,
        r#""alice""#,
        "0a50500b2a3435fe7472877eb22d48d47a228e946b0b991ab7402a8d00f6b32d",
        "cred_0a50500b2a3435fe7472877eb22d48d4",
    ),
    (
        "agent_name_with_dash",
        "Agent identifier material containing a dash",
        "agent",
        r#""agent-007""#,
        r#""agent-007""#,
        "fe05694ba37e28c8d75b9e30f85a545b478483cd0a5d76c6da1a29d2f1d63c32",
        "agent_fe05694ba37e28c8d75b9e30f85a545b",
    ),
    (
        "two_keys_reversed",
        "Object keys given out of order",
        "rec",
        r#"{"b": 2, "a": 1}"#,
        r#"{"a":1,"b":2}"#,
        "43258cff783fe7036d8a43033f830adfc60ec037382473548ac742b888292777",
        "rec_43258cff783fe7036d8a43033f830adf",
    ),
    (
        "array_order_kept",
        "Array order is significant",
        "list",
        "[1, 2, 3]",
        "[1,2,3]",
        "a615eeaee21de5179de080de8c3052c8da901138406ba71c38c032845f7d54f4",
        "list_a615eeaee21de5179de080de8c3052c8",
    ),
    (
        "null",
        "Null literal",
        "n",
        "null",
        "null",
        "74234e98afe7498fb5daf1f36ac2d78acc339464f950703b8c019892f982b90b",
        "n_74234e98afe7498fb5daf1f36ac2d78a",
    ),
    (
        "empty_object",
        "Empty object",
        "obj",
        "{ }",
        "{}",
        "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a",
        "obj_44136fa355b3678a1146ad16f7e8649e",
    ),
    (
        "audit_entry",
        "Realistic audit-log entry with a float and nested array",
        "audit",
        r#"{"seq": 42, "actor": "alice", "action": "credential.issue", "tags": ["audit", "seal"], "amount": 12.5}"#,
        r#"{"action":"credential.issue","actor":"alice","amount":12.5,"seq":42,"tags":["audit","seal"]}"#,
        "f4b06e61d960c475561c9177a062f60ca067358d5a8686726a7e884e1ad9ecff",
        "audit_f4b06e61d960c475561c9177a062f60c",
    ),
    (
        "code_point_key_order",
        "Uppercase before lowercase, non-ASCII last",
        "keys",
        r#"{"z": 5, "é": 4, "b": 1, "a": 3, "B": 2}"#,
        r#"{"B":2,"a":3,"b":1,"z":5,"é":4}"#,
        "123d2af5e8f69e16135eedc5f12d546ac7fa1ea74f1449376ea4cfe14c7dae50",
        "keys_123d2af5e8f69e16135eedc5f12d546a",
    ),
    (
        "number_forms",
        "Shortest round-trip floats, exponent thresholds, negative zero",
        "num",
        "[0.1, 1e21, 1.5e-7, -0.0, 100]",
        "[0.1,1e+21,1.5e-7,0,100]",
        "708ce62c384ae21748216b39c3936b780103a44dafa4b67c4984770b30bfd47f",
        "num_708ce62c384ae21748216b39c3936b78",
    ),
    (
        "string_escapes",
        "Short escapes, quote, backslash, and a \\u control escape",
        "esc",
        r#""line\nbreak\t\"quoted\" \\ \u0001""#,
        r#""line\nbreak\t\"quoted\" \\ \u0001""#,
        "2bbdb9b19598e6481c5d5b5292b98bcb6b4472c964415fa9ebb74bb5e9b36144",
        "esc_2bbdb9b19598e6481c5d5b5292b98bcb",
    ),
    (
        "unicode_raw",
        "Non-ASCII characters emitted as raw UTF-8",
        "text",
        r#""héllo ✓ 😀""#,
        r#""héllo ✓ 😀""#,
        "8915200086f20c01297fd89616f5861b70f5727cd32dfcc34677b86b8bcba5fa",
        "text_8915200086f20c01297fd89616f5861b",
    ),
    (
        "credential",
        "Credential record with nested claims",
        "cred",
        r#"{"issuer": "seal-hub", "holder": "alice", "claims": {"role": "auditor", "level": 3}}"#,
        r#"{"claims":{"level":3,"role":"auditor"},"holder":"alice","issuer":"seal-hub"}"#,
        "ee574069e7ae7e468a82c97da774e7e3a6483e2d4e31ee3cf6ae3c4330d0e309",
        "cred_ee574069e7ae7e468a82c97da774e7e3",
    ),
];

/// Generate all pinned golden vectors.
pub fn generate_all_vectors() -> Vec<GoldenVector> {
    PINNED
        .iter()
        .map(|(name, description, prefix, input, ..)| {
            generate_vector(name, description, prefix, input)
        })
        .collect()
}

#[test]
fn test_golden_vectors_match_pinned_outputs() {
    let vectors = generate_all_vectors();
    assert_eq!(vectors.len(), PINNED.len());

    for (v, (name, _, _, _, canonical, sha256, id)) in vectors.iter().zip(PINNED) {
        assert_eq!(v.canonical, *canonical, "canonical mismatch for {}", name);
        assert_eq!(v.sha256, *sha256, "sha256 mismatch for {}", name);
        assert_eq!(v.identifier, *id, "identifier mismatch for {}", name);
    }
}

#[test]
fn test_vectors_deterministic() {
    let v1 = generate_all_vectors();
    let v2 = generate_all_vectors();

    for (a, b) in v1.iter().zip(v2.iter()) {
        assert_eq!(a.canonical, b.canonical, "canonical mismatch for {}", a.name);
        assert_eq!(a.sha256, b.sha256, "sha256 mismatch for {}", a.name);
        assert_eq!(a.identifier, b.identifier, "identifier mismatch for {}", a.name);
    }
}

#[test]
fn test_pinned_identifiers_parse() {
    for v in generate_all_vectors() {
        let id: Identifier = v.identifier.parse().unwrap();
        assert_eq!(id.prefix(), v.prefix);
        assert_eq!(id.digest_hex(), &v.sha256[..32]);
        let value = Value::parse_json(&v.input_json).unwrap();
        assert!(id.matches(&value).unwrap(), "re-derive failed for {}", v.name);
    }
}

#[test]
fn test_builder_values_match_parsed_json() {
    // Same record built by hand, in a different key order.
    let claims = Mapping::new();
    claims.insert("level", Value::from(3)).unwrap();
    claims.insert("role", Value::from("auditor")).unwrap();
    let record = Value::object([
        ("holder", Value::from("alice")),
        ("claims", Value::Object(claims)),
        ("issuer", Value::from("seal-hub")),
    ]);

    assert_eq!(
        identifier("cred", &record).unwrap().as_str(),
        "cred_ee574069e7ae7e468a82c97da774e7e3"
    );
}

#[test]
fn test_frozen_value_keeps_identifier() {
    let record = Value::parse_json(r#"{"seq": 1, "prev": null, "entry": {"op": "grant", "actor": "alice"}}"#)
        .unwrap();
    let before = identifier("log", &record).unwrap();
    let record = canonid::freeze(record);
    assert_eq!(identifier("log", &record).unwrap(), before);
    assert_eq!(
        before.digest_hex(),
        "f0ceadc2529f55d830d4babb8b45b6ef"
    );
}

#[test]
fn test_halfway_float_vector() {
    // Exact values sitting between two shortest digit strings; the even one wins.
    let value = Value::array([1658206780088562.25f64, -1453137081473036.25f64]);
    assert_eq!(
        canonicalize(&value).unwrap(),
        "[1658206780088562.2,-1453137081473036.2]"
    );
    assert_eq!(
        digest(&value).unwrap().to_hex(),
        "3c3a6aa205a2efd6c871b1a60489fc5722c0fbd9ff2465df3b86c08a95a9f388"
    );
    assert_eq!(
        identifier("num", &value).unwrap().as_str(),
        "num_3c3a6aa205a2efd6c871b1a60489fc57"
    );
}

#[test]
fn print_golden_vectors_json() {
    #[derive(Serialize)]
    struct VectorFile {
        version: String,
        description: String,
        algorithm: String,
        id_hex_len: usize,
        vectors: Vec<GoldenVector>,
    }

    let file = VectorFile {
        version: "0.1.0".to_string(),
        description: "Golden test vectors for canonid. Every implementation must produce identical outputs.".to_string(),
        algorithm: "sha256".to_string(),
        id_hex_len: canonid::ID_HEX_LEN,
        vectors: generate_all_vectors(),
    };

    let json = serde_json::to_string_pretty(&file).unwrap();
    println!("{}", json);
}

// =============================================================================
// REJECTION TEST VECTORS
// These test that invalid inputs are properly rejected.
// =============================================================================

#[test]
fn test_reject_cycle() {
    let seq = Sequence::new();
    seq.push(Value::from(1)).unwrap();
    seq.push(Value::Array(seq.clone())).unwrap();
    let value = Value::Array(seq);

    assert_eq!(canonicalize(&value), Err(EncodingError::Cycle));
    assert!(
        matches!(digest(&value), Err(Error::Encoding(EncodingError::Cycle))),
        "must reject cyclic value"
    );
    assert!(matches!(
        identifier("loop", &value),
        Err(Error::Encoding(EncodingError::Cycle))
    ));
}

#[test]
fn test_reject_indirect_cycle() {
    let a = Mapping::new();
    let b = Mapping::new();
    a.insert("b", Value::Object(b.clone())).unwrap();
    b.insert("a", Value::Object(a.clone())).unwrap();

    assert_eq!(
        canonicalize(&Value::Object(a)),
        Err(EncodingError::Cycle),
        "must reject cycle through two mappings"
    );
}

#[test]
fn test_shared_substructure_is_not_a_cycle() {
    let shared = Value::array(["x"]);
    let value = Value::object([("left", shared.clone()), ("right", shared)]);
    assert_eq!(
        canonicalize(&value).unwrap(),
        r#"{"left":["x"],"right":["x"]}"#
    );
}

#[test]
fn test_reject_non_finite_numbers() {
    for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let value = Value::object([("x", n)]);
        assert!(
            matches!(
                digest(&value),
                Err(Error::Encoding(EncodingError::NonFiniteNumber(_)))
            ),
            "must reject {}",
            n
        );
    }
}

#[test]
fn test_reject_bad_prefixes() {
    let value = Value::from("alice");
    let cases: &[(&str, PrefixError)] = &[
        ("", PrefixError::Empty),
        ("Cred", PrefixError::InvalidStart('C')),
        ("9lives", PrefixError::InvalidStart('9')),
        ("cred_v2", PrefixError::InvalidChar { ch: '_', position: 4 }),
        ("cred.v2", PrefixError::InvalidChar { ch: '.', position: 4 }),
    ];
    for (prefix, expected) in cases {
        assert_eq!(
            identifier(prefix, &value),
            Err(Error::Prefix(expected.clone())),
            "prefix {:?}",
            prefix
        );
    }
    assert!(matches!(
        identifier(&"p".repeat(33), &value),
        Err(Error::Prefix(PrefixError::TooLong { len: 33, max: 32 }))
    ));
}

#[test]
fn test_reject_malformed_identifiers() {
    assert_eq!(
        "cred".parse::<Identifier>(),
        Err(IdentifierError::MissingSeparator)
    );
    assert!(matches!(
        "cred_xyz".parse::<Identifier>(),
        Err(IdentifierError::InvalidDigest(_))
    ));
    // Full 64-char digest is not an identifier.
    assert!(matches!(
        "cred_0a50500b2a3435fe7472877eb22d48d47a228e946b0b991ab7402a8d00f6b32d".parse::<Identifier>(),
        Err(IdentifierError::InvalidDigest(_))
    ));
}

#[test]
fn test_reject_depth_over_limit() {
    let mut value = Value::from(0);
    for _ in 0..5 {
        value = Value::array([value]);
    }
    let gen = IdGenerator::with_config(
        Sha256Hasher,
        GeneratorConfig {
            canonical: CanonicalConfig { max_depth: 4 },
        },
    );
    assert_eq!(
        gen.digest(&value),
        Err(Error::Encoding(EncodingError::DepthExceeded(4)))
    );
    assert!(IdGenerator::new().digest(&value).is_ok());
}

#[test]
fn test_rejection_is_logged() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();

    let seq = Sequence::new();
    seq.push(Value::Array(seq.clone())).unwrap();
    assert!(identifier("loop", &Value::Array(seq)).is_err());
    assert!(identifier("ok", &Value::Null).is_ok());
}

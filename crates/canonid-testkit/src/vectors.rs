//! Golden test vectors for deterministic verification.
//!
//! These vectors ensure that canonical encoding and SHA-256 digests produce
//! identical results across all implementations. Inputs are JSON text with
//! arbitrary whitespace and key order; outputs are pinned byte-for-byte.

use anyhow::{ensure, Context};

use canonid::{digest, Value};
use canonid_core::canonicalize;

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Input as JSON text.
    pub input_json: &'static str,
    /// Expected canonical form.
    pub expected_canonical: &'static str,
    /// Expected SHA-256 of the canonical form (hex).
    pub expected_sha256: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "reversed keys",
            input_json: r#"{ "b" : 2, "a" : 1 }"#,
            expected_canonical: r#"{"a":1,"b":2}"#,
            expected_sha256: "43258cff783fe7036d8a43033f830adfc60ec037382473548ac742b888292777",
        },
        GoldenVector {
            name: "array order preserved",
            input_json: "[1, 2, 3]",
            expected_canonical: "[1,2,3]",
            expected_sha256: "a615eeaee21de5179de080de8c3052c8da901138406ba71c38c032845f7d54f4",
        },
        GoldenVector {
            name: "empty string",
            input_json: r#""""#,
            expected_canonical: r#""""#,
            expected_sha256: "12ae32cb1ec02d01eda3581b127c1fee3b0dc53572ed6baf239721a03d82e126",
        },
        GoldenVector {
            name: "true",
            input_json: "true",
            expected_canonical: "true",
            expected_sha256: "b5bea41b6c623f7c09f1bf24dcae58ebab3c0cdd90ad966bc43a45b44867e12b",
        },
        GoldenVector {
            name: "empty array",
            input_json: "[ ]",
            expected_canonical: "[]",
            expected_sha256: "4f53cda18c2baa0c0354bb5f9a3ecbe5ed12ab4d8e11ba873c2f11161202b945",
        },
        GoldenVector {
            name: "deep nesting",
            input_json: r#"{"nested": {"deep": {"deeper": [1, [2, [3]]]}}}"#,
            expected_canonical: r#"{"nested":{"deep":{"deeper":[1,[2,[3]]]}}}"#,
            expected_sha256: "2b77932d283c73a67a737a0e4df6e864fa3b9359cab0f59e235c1291c519904c",
        },
        GoldenVector {
            name: "log entry with null link",
            input_json: r#"{"seq": 1, "prev": null, "entry": {"op": "grant", "actor": "alice"}}"#,
            expected_canonical: r#"{"entry":{"actor":"alice","op":"grant"},"prev":null,"seq":1}"#,
            expected_sha256: "f0ceadc2529f55d830d4babb8b45b6ef0e7dcbbff19f64b4bf2e690cbc9fd8b8",
        },
        GoldenVector {
            name: "integer extremes",
            input_json: "[-1, -9223372036854775808, 18446744073709551615]",
            expected_canonical: "[-1,-9223372036854775808,18446744073709551615]",
            expected_sha256: "9ab0016cef1a42942980501829f46c0f5d417595e8a83594d60e718fcbcba67d",
        },
        GoldenVector {
            name: "float notation thresholds",
            input_json: "[1e-7, 0.000001, 1e21, 1e20, -1.5]",
            expected_canonical: "[1e-7,0.000001,1e+21,100000000000000000000,-1.5]",
            expected_sha256: "edad14818ac22eaf2169daf3f22e9dc3d3ebc3631b7f6d47a15da0bf86592da9",
        },
        GoldenVector {
            name: "empty and control keys",
            input_json: r#"{"a": "x", "\u001F": "unit separator", "": "empty key"}"#,
            expected_canonical: r#"{"":"empty key","\u001f":"unit separator","a":"x"}"#,
            expected_sha256: "030daa4bec3261fa56b620eb15d20181232814d6691aa1e8bc5865519bf0fe09",
        },
    ]
}

/// Check one vector against the current implementation.
pub fn verify_vector(vector: &GoldenVector) -> anyhow::Result<()> {
    let value = Value::parse_json(vector.input_json)
        .with_context(|| format!("parsing input of {:?}", vector.name))?;
    let canonical = canonicalize(&value)?;
    ensure!(
        canonical == vector.expected_canonical,
        "{}: canonical form {} != {}",
        vector.name,
        canonical,
        vector.expected_canonical
    );

    // The canonical form is itself valid JSON.
    serde_json::from_str::<serde_json::Value>(&canonical)
        .with_context(|| format!("{}: canonical form is not JSON", vector.name))?;

    let hex = digest(&value)?.to_hex();
    ensure!(
        hex == vector.expected_sha256,
        "{}: sha256 {} != {}",
        vector.name,
        hex,
        vector.expected_sha256
    );
    Ok(())
}

/// Verify all golden vectors.
///
/// Returns `(name, passed, detail)` per vector. Call this to verify your
/// implementation matches the reference.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| match verify_vector(v) {
            Ok(()) => (v.name.to_string(), true, v.expected_sha256.to_string()),
            Err(e) => (v.name.to_string(), false, format!("{:#}", e)),
        })
        .collect()
}

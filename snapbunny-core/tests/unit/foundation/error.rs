use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SnapError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SnapError::decode("x").to_string().contains("decode error:"));
    assert!(SnapError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SnapError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

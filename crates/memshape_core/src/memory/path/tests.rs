use crate::memory::{FieldPath, MemoryError, PathStep};

#[test]
fn parses_fields_and_indices() {
	let path = FieldPath::parse("header.items[2].x").expect("path parses");
	assert_eq!(
		path.steps,
		vec![
			PathStep::Field("header".to_owned()),
			PathStep::Field("items".to_owned()),
			PathStep::Index(2),
			PathStep::Field("x".to_owned()),
		]
	);
	assert_eq!(path.to_string(), "header.items[2].x");
}

#[test]
fn accepts_leading_index_for_array_roots() {
	let path = FieldPath::parse("[3].name").expect("path parses");
	assert_eq!(path.steps, vec![PathStep::Index(3), PathStep::Field("name".to_owned())]);
	assert_eq!(path.to_string(), "[3].name");
}

#[test]
fn rejects_malformed_paths() {
	for input in ["", "a.", ".a", "a..b", "a[", "a[x]", "a[1", "a-b"] {
		let err = FieldPath::parse(input).expect_err("malformed path should fail");
		assert!(matches!(err, MemoryError::InvalidFieldPath { .. }), "unexpected error for {input:?}: {err}");
	}
}

use crate::cmd::test_support::{fixture, run_memshape, run_memshape_json};

#[test]
fn layout_json_reports_padded_field_table() {
	let shape = fixture("node.json");
	let json = run_memshape_json(&["layout", &shape, "--json"]);

	assert_eq!(json["root"], "Node");
	assert_eq!(json["size"], 48);
	assert_eq!(json["align"], 8);

	let fields = json["fields"].as_array().expect("field table");
	let offsets: Vec<u64> = fields.iter().map(|row| row["offset"].as_u64().expect("offset")).collect();
	assert_eq!(offsets, [0, 8, 16, 32, 40]);
	assert_eq!(fields[2]["type"], "Header");
	assert_eq!(fields[2]["size"], 16);
	assert_eq!(fields[3]["type"], "*Node");
}

#[test]
fn layout_follows_machine_overrides() {
	let shape = fixture("node.json");
	let json = run_memshape_json(&["layout", &shape, "--machine", "x86", "--json"]);

	// int and pointers shrink to 4 bytes; f64 keeps 8-byte alignment.
	assert_eq!(json["size"], 40);
	let fields = json["fields"].as_array().expect("field table");
	let offsets: Vec<u64> = fields.iter().map(|row| row["offset"].as_u64().expect("offset")).collect();
	assert_eq!(offsets, [0, 8, 16, 32, 36]);
}

#[test]
fn layout_field_path_reports_nested_offset() {
	let shape = fixture("node.json");
	let json = run_memshape_json(&["layout", &shape, "--field", "header.name[3]", "--json"]);

	let field = &json["field"];
	assert_eq!(field["name"], "header.name[3]");
	assert_eq!(field["offset"], 16 + 7 + 3);
	assert_eq!(field["type"], "char");
}

#[test]
fn layout_rejects_unknown_kind() {
	let shape = fixture("bogus.json");
	let output = run_memshape(&["layout", &shape]);

	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("unsupported shape kind: u128"), "stderr: {stderr}");
}

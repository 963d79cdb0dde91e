use crate::cmd::test_support::{fixture, run_memshape, run_memshape_json};

#[test]
fn decode_json_reads_consecutive_instances() {
	let capture = fixture("node.bin");
	let shape = fixture("node.json");
	let json = run_memshape_json(&["decode", &capture, &shape, "--pool", "2=heap", "--count", "2", "--json"]);

	assert_eq!(json["root"], "Node");
	assert_eq!(json["start"], "0x00000000");
	assert_eq!(json["end"], "0x00000060");
	assert_eq!(json["count"], 2);

	let first = &json["values"][0];
	assert_eq!(first["type"], "Node");
	assert_eq!(first["fields"]["id"], -7);
	assert_eq!(first["fields"]["value"], 1.5);
	assert_eq!(first["fields"]["header"]["fields"]["magic"], 0x4d45_4d53_u64);
	assert_eq!(first["fields"]["header"]["fields"]["name"][0], u64::from(b'f'));
	assert_eq!(first["fields"]["next"], "0:0x0000000000001000");
	assert_eq!(first["fields"]["buffer"], "2:0x0000000000002000");

	let second = &json["values"][1];
	assert_eq!(second["fields"]["id"], 42);
	assert_eq!(second["fields"]["header"]["fields"]["version"], 4);
	assert_eq!(second["fields"]["next"], "0:0x0000000000000000");
}

#[test]
fn decode_offset_and_field_select_one_value() {
	let capture = fixture("node.bin");
	let shape = fixture("node.json");
	let json = run_memshape_json(&["decode", &capture, &shape, "--pool", "2=heap", "--offset", "0x30", "--field", "value", "--json"]);

	assert_eq!(json["start"], "0x00000030");
	assert_eq!(json["end"], "0x00000060");
	assert_eq!(json["field"], "value");
	assert_eq!(json["values"][0], -0.25);
}

#[test]
fn decode_without_pool_registration_fails() {
	let capture = fixture("node.bin");
	let shape = fixture("node.json");
	let output = run_memshape(&["decode", &capture, &shape]);

	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("error: unknown pool 2"), "stderr: {stderr}");
}

#[test]
fn decode_past_end_reports_eof() {
	let capture = fixture("node.bin");
	let shape = fixture("node.json");
	let output = run_memshape(&["decode", &capture, &shape, "--pool", "2=heap", "--count", "3"]);

	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("unexpected eof at offset 96"), "stderr: {stderr}");
}

#[test]
fn string_overrun_is_lenient_unless_strict() {
	let capture = fixture("label.bin");
	let shape = fixture("label.json");

	let json = run_memshape_json(&["decode", &capture, &shape, "--json"]);
	assert_eq!(json["values"][0]["fields"]["len"], 5);
	assert_eq!(json["values"][0]["fields"]["text"], "hello");
	assert_eq!(json["end"], "0x0000000a");

	let output = run_memshape(&["decode", &capture, &shape, "--strict"]);
	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("layout mismatch in Label"), "stderr: {stderr}");
}

#[test]
fn decode_text_output_prints_value_tree() {
	let capture = fixture("node.bin");
	let shape = fixture("node.json");
	let output = run_memshape(&["decode", &capture, &shape, "--pool", "2=heap", "--machine", "x86_64"]);

	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("machine: ptr=8 int=8 size=8 little"), "stdout: {stdout}");
	assert!(stdout.contains("value[0]:"), "stdout: {stdout}");
	assert!(stdout.contains("  Node {"), "stdout: {stdout}");
	assert!(stdout.contains("    buffer = 2:0x0000000000002000"), "stdout: {stdout}");
}

use memshape_testkit::Encoder;

use crate::memory::{Decoder, Endianness, ErrorKind, MachineDescriptor, MemoryError};

fn le64() -> MachineDescriptor {
	MachineDescriptor::lp64_le()
}

#[test]
fn reads_primitives_in_target_byte_order() {
	let mut enc = Encoder::big();
	enc.u16(0x0102).u32(0x0304_0506).i64(-2);
	let bytes = enc.into_bytes();

	let machine = le64().with_byte_order(Endianness::Big);
	let mut decoder = Decoder::new(&bytes, machine);
	assert_eq!(decoder.read_u16().expect("u16"), 0x0102);
	decoder.align(4).expect("align to u32");
	assert_eq!(decoder.read_u32().expect("u32"), 0x0304_0506);
	assert_eq!(decoder.read_i64().expect("i64"), -2);
	assert_eq!(decoder.remaining(), 0);
}

#[test]
fn read_past_end_is_reported_before_consuming() {
	let bytes = [1_u8, 2, 3];
	let mut decoder = Decoder::new(&bytes, le64());
	decoder.skip(1).expect("skip one");

	let err = decoder.read_u32().expect_err("short read");
	assert!(matches!(err, MemoryError::UnexpectedEof { at: 1, need: 4, rem: 2 }));
	assert!(err.is_data_error());
	assert_eq!(decoder.pos(), 1, "failed read must not advance");
}

#[test]
fn align_pads_without_interpreting_and_checks_bounds() {
	let bytes = [0xff_u8; 6];
	let mut decoder = Decoder::new(&bytes, le64());
	decoder.skip(1).expect("skip");
	decoder.align(4).expect("align within bounds");
	assert_eq!(decoder.pos(), 4);
	decoder.align(4).expect("already aligned");
	assert_eq!(decoder.pos(), 4);

	let err = decoder.align(8).expect_err("align past end");
	assert_eq!(err.kind(), ErrorKind::MalformedInput);
	assert_eq!(decoder.pos(), 4);
}

#[test]
fn machine_width_reads_sign_extend() {
	let mut enc = Encoder::little();
	enc.i16(-3).u32(0xffff_ffff).u32(7).u8(b'z');
	let bytes = enc.into_bytes();

	let machine = MachineDescriptor::new(4, 2, 4, Endianness::Little).expect("machine");
	let mut decoder = Decoder::new(&bytes, machine);
	assert_eq!(decoder.read_native_int().expect("native int"), -3);
	decoder.align(4).expect("align");
	assert_eq!(decoder.read_ptr().expect("pointer"), 0xffff_ffff);
	assert_eq!(decoder.read_size().expect("size"), 7);
	assert_eq!(decoder.read_char().expect("char"), b'z');
}

#[test]
fn width_outside_supported_set_is_rejected() {
	let bytes = [0_u8; 8];
	let mut decoder = Decoder::new(&bytes, le64());
	let err = decoder.read_uint(3).expect_err("3-byte read");
	assert!(matches!(err, MemoryError::UnsupportedWidth { width: 3 }));
}

#[test]
fn strings_are_nul_terminated() {
	let mut enc = Encoder::little();
	enc.cstr("hello").cstr("");
	let bytes = enc.into_bytes();

	let mut decoder = Decoder::new(&bytes, le64());
	assert_eq!(decoder.read_string().expect("first string"), "hello");
	assert_eq!(decoder.pos(), 6);
	assert_eq!(decoder.read_string().expect("empty string"), "");
	assert_eq!(decoder.remaining(), 0);
}

#[test]
fn unterminated_string_is_a_data_error() {
	let bytes = *b"abc";
	let mut decoder = Decoder::new(&bytes, le64());
	let err = decoder.read_string().expect_err("no terminator");
	assert!(matches!(err, MemoryError::UnterminatedString { at: 0, rem: 3 }));
	assert!(err.is_data_error());
	assert_eq!(decoder.pos(), 0);
}

#[test]
fn start_offset_may_equal_length_but_not_exceed_it() {
	let bytes = [0_u8; 4];
	let decoder = Decoder::at(&bytes, 4, le64()).expect("offset at end is valid");
	assert_eq!(decoder.remaining(), 0);

	let err = Decoder::at(&bytes, 5, le64()).expect_err("offset past end");
	assert!(matches!(err, MemoryError::InvalidStartOffset { offset: 5, len: 4 }));
}

#[test]
fn booleans_treat_any_nonzero_byte_as_true() {
	let bytes = [0_u8, 1, 0x80];
	let mut decoder = Decoder::new(&bytes, le64());
	assert!(!decoder.read_bool().expect("false"));
	assert!(decoder.read_bool().expect("one"));
	assert!(decoder.read_bool().expect("high bit"));
}

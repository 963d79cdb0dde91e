use crate::memory::{Endianness, FieldPath, MachineDescriptor, MemoryError, PoolId, ValueShape, align_of, layout_of, offset_of, size_of, struct_layout};

fn lp64() -> MachineDescriptor {
	MachineDescriptor::lp64_le()
}

fn ilp32() -> MachineDescriptor {
	MachineDescriptor::ilp32_le()
}

#[test]
fn byte_then_int_pads_to_eight() {
	let shape = ValueShape::structure("S", [("a", ValueShape::Int8), ("b", ValueShape::Int32)]);
	assert_eq!(size_of(&shape, &lp64()), 8);
	assert_eq!(align_of(&shape, &lp64()), 4);
}

#[test]
fn pointer_then_byte_gets_tail_padding() {
	let shape = ValueShape::structure("S", [("p", ValueShape::pointer(ValueShape::Uint8)), ("c", ValueShape::Int8)]);
	assert_eq!(size_of(&shape, &lp64()), 16);
	assert_eq!(size_of(&shape, &ilp32()), 8);

	let ValueShape::Struct(item) = &shape else {
		panic!("expected struct shape");
	};
	let placed = struct_layout(item, &lp64());
	assert_eq!(placed.fields[1].offset, 8);
	assert_eq!(placed.tail_padding(), 7);
}

#[test]
fn capability_tags_take_machine_widths() {
	let machine = MachineDescriptor::new(8, 4, 2, Endianness::Little).expect("machine");
	assert_eq!(size_of(&ValueShape::NativeInt, &machine), 4);
	assert_eq!(size_of(&ValueShape::NativeUint, &machine), 4);
	assert_eq!(size_of(&ValueShape::NativeSize, &machine), 2);
	assert_eq!(size_of(&ValueShape::Char, &machine), 1);
	assert_eq!(size_of(&ValueShape::pointer_in(PoolId(3), ValueShape::Float64), &machine), 8);
}

#[test]
fn arrays_have_no_inter_element_padding() {
	let elem = ValueShape::structure("E", [("x", ValueShape::Int32), ("y", ValueShape::Int8)]);
	let shape = ValueShape::array(elem, 3);
	let layout = layout_of(&shape, &lp64());
	assert_eq!(layout.size, 24);
	assert_eq!(layout.align, 4);
}

#[test]
fn empty_struct_has_unit_alignment_and_zero_size() {
	let shape = ValueShape::structure("Empty", Vec::<(&str, ValueShape)>::new());
	let layout = layout_of(&shape, &lp64());
	assert_eq!(layout.size, 0);
	assert_eq!(layout.align, 1);
}

#[test]
fn nested_struct_alignment_propagates() {
	let inner = ValueShape::structure("Inner", [("v", ValueShape::Float64)]);
	let outer = ValueShape::structure("Outer", [("tag", ValueShape::Uint8), ("inner", inner), ("tail", ValueShape::Uint16)]);
	assert_eq!(align_of(&outer, &lp64()), 8);
	assert_eq!(size_of(&outer, &lp64()), 24);
}

#[test]
fn strings_contribute_no_static_bytes() {
	let shape = ValueShape::structure("Named", [("id", ValueShape::Uint32), ("name", ValueShape::String)]);
	let layout = layout_of(&shape, &lp64());
	assert_eq!(layout.size, 4);
	assert_eq!(layout.align, 4);
}

#[test]
fn offset_of_walks_fields_and_indices() {
	let point = ValueShape::structure("Point", [("x", ValueShape::Int16), ("y", ValueShape::Int32)]);
	let shape = ValueShape::structure(
		"Poly",
		[
			("count", ValueShape::Uint8),
			("points", ValueShape::array(point, 4)),
			("next", ValueShape::pointer(ValueShape::Uint8)),
		],
	);

	let path = FieldPath::parse("points[2].y").expect("path parses");
	let (offset, found) = offset_of(&shape, &path, &lp64()).expect("field resolves");
	assert_eq!(offset, 4 + 2 * 8 + 4);
	assert_eq!(found, &ValueShape::Int32);

	let next = FieldPath::parse("next").expect("path parses");
	let (offset, _) = offset_of(&shape, &next, &lp64()).expect("pointer field resolves");
	assert_eq!(offset, 40);
}

#[test]
fn offset_of_rejects_missing_fields_and_out_of_range_indices() {
	let shape = ValueShape::structure("S", [("a", ValueShape::array(ValueShape::Uint8, 2))]);
	for input in ["b", "a[2]", "a[0].x"] {
		let path = FieldPath::parse(input).expect("path parses");
		let err = offset_of(&shape, &path, &lp64()).expect_err("lookup should fail");
		assert!(matches!(err, MemoryError::FieldNotFound { .. }), "unexpected error for {input}: {err}");
	}
}

#[test]
fn overflowing_sizes_stay_multiples_of_alignment() {
	let huge = ValueShape::array(ValueShape::Uint32, usize::MAX / 2);
	let layout = layout_of(&huge, &lp64());
	assert_eq!(layout.align, 4);
	assert_eq!(layout.size % layout.align, 0);
	assert!(layout.size > usize::MAX - 4);

	let holder = ValueShape::structure("Holder", [("tag", ValueShape::Uint8), ("items", huge), ("tail", ValueShape::Uint64)]);
	let layout = layout_of(&holder, &lp64());
	assert_eq!(layout.align, 8);
	assert_eq!(layout.size % layout.align, 0);
}

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, MemoryError>;

/// Errors produced while describing, laying out, and decoding captured memory.
#[derive(Debug, Error)]
pub enum MemoryError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Not enough bytes remained for a requested read, skip, or alignment.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// A NUL-terminated string ran into the end of the buffer.
	#[error("unterminated string at offset {at}, remaining {rem}")]
	UnterminatedString {
		/// Byte offset where the string starts.
		at: usize,
		/// Bytes scanned without finding a terminator.
		rem: usize,
	},
	/// Decoder was asked to start past the end of its buffer.
	#[error("start offset {offset} is past buffer end {len}")]
	InvalidStartOffset {
		/// Requested start offset.
		offset: usize,
		/// Buffer length.
		len: usize,
	},
	/// Struct fields consumed more bytes than the struct's static size.
	#[error("layout mismatch in {type_name}: consumed {consumed} bytes, static size {size}")]
	LayoutMismatch {
		/// Struct type name being decoded.
		type_name: String,
		/// Bytes consumed by the fields.
		consumed: usize,
		/// Static tail-padded size.
		size: usize,
	},
	/// Decoded value does not fit the destination type.
	#[error("value {value} does not fit in {target}")]
	ValueOutOfRange {
		/// Rendered decoded value.
		value: String,
		/// Destination type label.
		target: &'static str,
	},
	/// Shape description named a kind the engine does not know.
	#[error("unsupported shape kind: {kind}")]
	UnsupportedShape {
		/// Offending kind label.
		kind: String,
	},
	/// A width outside the supported 1/2/4/8 set reached a width-driven read.
	#[error("unsupported integer width {width}")]
	UnsupportedWidth {
		/// Requested width in bytes.
		width: usize,
	},
	/// Destination cannot hold the decoded value kind.
	#[error("binding error: expected {expected}, got {got}")]
	Binding {
		/// Value kind the destination accepts.
		expected: &'static str,
		/// Value kind that was decoded.
		got: String,
	},
	/// Pointer shape references a pool absent from the registry.
	#[error("unknown pool {pool}")]
	UnknownPool {
		/// Unregistered pool identifier.
		pool: u32,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Requested array length exceeded configured limit.
	#[error("decode array too large: count={count}, max={max}")]
	ArrayTooLarge {
		/// Requested array length.
		count: usize,
		/// Maximum permitted array length.
		max: usize,
	},
	/// Caller cancelled a multi-instance decode between instances.
	#[error("decode cancelled after {completed} instances")]
	Cancelled {
		/// Number of instances fully decoded before cancellation.
		completed: usize,
	},
	/// Machine descriptor widths violate the power-of-two 1..=8 rule, or a preset is unknown.
	#[error("invalid machine: {reason}")]
	InvalidMachine {
		/// Human-readable reason.
		reason: String,
	},
	/// Shape description file is malformed.
	#[error("invalid shape description: {reason}")]
	InvalidShapeSpec {
		/// Human-readable reason.
		reason: String,
	},
	/// Path expression syntax is invalid.
	#[error("invalid field path: {path}")]
	InvalidFieldPath {
		/// Original user-provided path string.
		path: String,
	},
	/// Path expression does not name a field or element of the shape.
	#[error("field not found: {path}")]
	FieldNotFound {
		/// Original user-provided path string.
		path: String,
	},
	/// Numeric literal could not be parsed.
	#[error("invalid number: {value}")]
	InvalidNumber {
		/// User-provided literal.
		value: String,
	},
	/// Pool registration argument is malformed.
	#[error("invalid pool spec: {value} (expected <id>=<name>)")]
	InvalidPoolSpec {
		/// User-provided pool argument.
		value: String,
	},
}

/// Coarse classification of [`MemoryError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Truncated or corrupt capture data; recoverable at the call boundary.
	MalformedInput,
	/// Shape kind or width the engine cannot decode.
	UnsupportedShape,
	/// Shape and destination (or pool registry) were paired inconsistently.
	Binding,
	/// Configured safety limit or cancellation.
	Limit,
	/// Bad user configuration or arguments.
	Config,
	/// Filesystem failure.
	Io,
}

impl MemoryError {
	/// Classify this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::UnexpectedEof { .. }
			| Self::UnterminatedString { .. }
			| Self::InvalidStartOffset { .. }
			| Self::LayoutMismatch { .. }
			| Self::ValueOutOfRange { .. } => ErrorKind::MalformedInput,
			Self::UnsupportedShape { .. } | Self::UnsupportedWidth { .. } => ErrorKind::UnsupportedShape,
			Self::Binding { .. } | Self::UnknownPool { .. } => ErrorKind::Binding,
			Self::DepthExceeded { .. } | Self::ArrayTooLarge { .. } | Self::Cancelled { .. } => ErrorKind::Limit,
			Self::InvalidMachine { .. }
			| Self::InvalidShapeSpec { .. }
			| Self::InvalidFieldPath { .. }
			| Self::FieldNotFound { .. }
			| Self::InvalidNumber { .. }
			| Self::InvalidPoolSpec { .. } => ErrorKind::Config,
			Self::Io(_) => ErrorKind::Io,
		}
	}

	/// Whether this error was caused by the capture bytes rather than by the caller.
	pub fn is_data_error(&self) -> bool {
		self.kind() == ErrorKind::MalformedInput
	}
}

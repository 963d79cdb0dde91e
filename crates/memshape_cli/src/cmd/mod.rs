/// Capture decode command.
pub mod decode;
/// Static layout command.
pub mod layout;
/// Machine preset listing command.
pub mod machines;
/// Value tree printing.
pub mod print;
#[cfg(test)]
pub(crate) mod test_support;
/// Shared argument parsing helpers.
pub mod util;

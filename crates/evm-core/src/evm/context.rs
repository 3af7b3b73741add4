//! # Execution Context
//!
//! Immutable code bytes plus the program counter consumed by PUSH handlers.

/// Code and program counter of one execution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    code: Vec<u8>,
    pc: usize,
}

impl ExecutionContext {
    /// Creates a context positioned at the first byte of `code`.
    #[must_use]
    pub fn new(code: Vec<u8>) -> Self {
        Self {
            code,
            pc: 0,
        }
    }

    /// Contract bytecode.
    #[must_use]
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// Program counter.
    #[must_use]
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Moves the program counter. Used by the embedding dispatch loop.
    pub fn set_pc(&mut self, pc: usize) {
        self.pc = pc;
    }

    /// Immediate operand of `size` bytes following the opcode at `pc`.
    ///
    /// Returns `None` if the code ends before the operand does.
    #[must_use]
    pub fn immediate(&self, size: usize) -> Option<&[u8]> {
        let start = self.pc.checked_add(1)?;
        let end = start.checked_add(size)?;
        self.code.get(start..end)
    }

    /// Advances the program counter by `count` bytes.
    pub(crate) fn advance(&mut self, count: usize) {
        self.pc += count;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate() {
        let ctx = ExecutionContext::new(vec![0x61, 0xAB, 0xCD]);
        assert_eq!(ctx.immediate(1), Some(&[0xAB][..]));
        assert_eq!(ctx.immediate(2), Some(&[0xAB, 0xCD][..]));
        assert_eq!(ctx.immediate(3), None);
    }

    #[test]
    fn test_immediate_after_pc_moves() {
        let mut ctx = ExecutionContext::new(vec![0x60, 0x01, 0x60, 0x02]);
        ctx.advance(2);
        assert_eq!(ctx.pc(), 2);
        assert_eq!(ctx.immediate(1), Some(&[0x02][..]));

        ctx.set_pc(usize::MAX);
        assert_eq!(ctx.immediate(1), None);
    }

    #[test]
    fn test_empty_code() {
        let ctx = ExecutionContext::new(Vec::new());
        assert!(ctx.code().is_empty());
        assert_eq!(ctx.immediate(1), None);
    }
}

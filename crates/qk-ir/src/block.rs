//! Body regions.

use alloc::vec::Vec;

use crate::inst::Inst;

/// The single-block body region of a kernel.
///
/// Kernels are built as straight-line code: one block whose parameters are
/// the function parameters and whose last instruction is the terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// Instructions in this block.
    pub insts: Vec<Inst>,
}

impl Block {
    /// Create a new empty block.
    pub fn new() -> Self {
        Self { insts: Vec::new() }
    }

    /// Create a block holding only a `return`.
    pub fn with_return() -> Self {
        Self {
            insts: alloc::vec![Inst::Return],
        }
    }

    /// Add an instruction to the end of this block.
    pub fn push_inst(&mut self, inst: Inst) {
        self.insts.push(inst);
    }

    /// Insert an instruction just before the terminator, or at the end if
    /// there is none yet.
    pub fn insert_before_terminator(&mut self, inst: Inst) {
        match self.insts.last() {
            Some(last) if last.is_terminator() => {
                let at = self.insts.len() - 1;
                self.insts.insert(at, inst);
            }
            _ => self.insts.push(inst),
        }
    }

    /// The terminating instruction, if the block has one.
    pub fn terminator(&self) -> Option<&Inst> {
        self.insts.last().filter(|inst| inst.is_terminator())
    }

    /// Get the number of instructions in this block.
    pub fn inst_count(&self) -> usize {
        self.insts.len()
    }
}

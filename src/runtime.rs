use std::fmt;
use std::io::{stdout, Write};

use crate::channel::{ByteSource, Terminal};
use crate::error::RunError;
use crate::memory::{Memory, MEMORY_MAX};

/// Fixed cell holding the low byte of the saved return address.
const RET_LO: u16 = 0xFFFE;
/// Fixed cell holding the high byte of the saved return address.
const RET_HI: u16 = 0xFFFF;

type Handler = fn(&mut RunState) -> Result<(), RunError>;

/// Represents complete machine state during a run.
///
/// Owns the full address space and both I/O channels. One instance runs one
/// program; inspect the registers, flags and memory after [`start`] returns.
///
/// [`start`]: RunState::start
pub struct RunState {
    /// 64KB of system memory, code and data alike
    mem: Memory,
    /// Program counter
    pc: u16,
    /// Accumulator
    a: u8,
    /// General-purpose registers
    b: u8,
    c: u8,
    /// Condition flags, derived from the accumulator
    sign: bool,
    zero: bool,
    /// Set by `HLT`; never cleared
    halted: bool,
    /// Set when the program counter overruns memory; never cleared
    faulted: bool,
    /// Byte source consumed by `IN`
    input: Box<dyn ByteSource>,
    /// Byte sink written by `OUT`
    output: Box<dyn Write>,
}

/// Immutable copy of the architectural registers, carried by fault errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub pc: u16,
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub sign: bool,
    pub zero: bool,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PC 0x{:04x}  A 0x{:02x}  B 0x{:02x}  C 0x{:02x}  S {}  Z {}",
            self.pc, self.a, self.b, self.c, self.sign as u8, self.zero as u8,
        )
    }
}

impl RunState {
    /// Fresh machine wired to the terminal: `IN` reads stdin, `OUT` writes
    /// stdout.
    pub fn new() -> Self {
        Self::with_channels(Box::new(Terminal), Box::new(stdout()))
    }

    /// Fresh machine with caller-supplied I/O channels.
    pub fn with_channels(input: Box<dyn ByteSource>, output: Box<dyn Write>) -> Self {
        Self {
            mem: Memory::new(),
            pc: 0,
            a: 0,
            b: 0,
            c: 0,
            sign: false,
            zero: false,
            halted: false,
            faulted: false,
            input,
            output,
        }
    }

    /// Copy a binary image into memory starting at `base`.
    ///
    /// The caller must ensure the image fits within the address space.
    pub fn load(&mut self, base: u16, image: &[u8]) {
        self.mem.load(base, image);
    }

    /// Run the fetch-decode-execute loop to completion.
    ///
    /// Returns normally once `HLT` executes. Returns [`RunError::Fault`] if
    /// the program counter is incremented past the top of memory, and
    /// [`RunError::UnknownOpcode`] if a fetched byte has no handler.
    ///
    /// A faulted machine stays faulted: calling `start` again reports the
    /// same fault without fetching another byte.
    pub fn start(&mut self) -> Result<(), RunError> {
        while !self.halted && !self.faulted {
            let opcode = self.mem.read(self.pc);
            let handler = Self::decode(opcode).ok_or(RunError::UnknownOpcode {
                opcode,
                pc: self.pc,
            })?;
            handler(self)?;
        }
        if self.faulted {
            return Err(RunError::Fault {
                state: self.snapshot(),
            });
        }
        Ok(())
    }

    // Fixed opcode table. 8080/8085-compatible encodings; any byte not
    // listed here terminates the run as an unknown opcode.
    fn decode(opcode: u8) -> Option<Handler> {
        let handler: Handler = match opcode {
            // Control
            0x00 => Self::nop,
            0x76 => Self::hlt,

            // Data movement
            0x78 => Self::mov_a_b,
            0x79 => Self::mov_a_c,
            0x47 => Self::mov_b_a,
            0x41 => Self::mov_b_c,
            0x4f => Self::mov_c_a,
            0x48 => Self::mov_c_b,
            0x3e => Self::mvi_a,
            0x06 => Self::mvi_b,
            0x0e => Self::mvi_c,

            // Arithmetic
            0x80 => Self::add_b,
            0x81 => Self::add_c,
            0x90 => Self::sub_b,
            0x91 => Self::sub_c,
            0x3c => Self::inr_a,
            0x04 => Self::inr_b,
            0x0c => Self::inr_c,
            0x3d => Self::dcr_a,
            0x05 => Self::dcr_b,
            0x0d => Self::dcr_c,

            // Logic
            0xa0 => Self::ana_b,
            0xa1 => Self::ana_c,
            0xe6 => Self::ani,
            0xb0 => Self::ora_b,
            0xb1 => Self::ora_c,
            0xf6 => Self::ori,
            0xa8 => Self::xra_b,
            0xa9 => Self::xra_c,
            0xee => Self::xri,
            0x2f => Self::cma,
            0x17 => Self::ral,
            0x1f => Self::rar,

            // Branching
            0xc3 => Self::jmp,
            0xca => Self::jz,
            0xc2 => Self::jnz,
            0xfa => Self::jm,
            0xcd => Self::call,
            0xc9 => Self::ret,

            // Direct memory access
            0x3a => Self::lda,
            0x32 => Self::sta,

            // I/O
            0xdb => Self::in_a,
            0xd3 => Self::out,

            _ => return None,
        };
        Some(handler)
    }

    /// Move the program counter forward one byte.
    ///
    /// Incrementing past the top of memory is a fault: the instruction is
    /// abandoned mid-decode and the error carries the state at that moment.
    #[inline]
    fn advance(&mut self) -> Result<(), RunError> {
        if self.pc as usize >= MEMORY_MAX {
            self.faulted = true;
            return Err(RunError::Fault {
                state: self.snapshot(),
            });
        }
        self.pc += 1;
        Ok(())
    }

    /// Recompute condition flags from the accumulator.
    #[inline]
    fn set_flags(&mut self) {
        if self.a == 0 {
            self.sign = false;
            self.zero = true;
        } else {
            self.sign = self.a & 0x80 != 0;
            self.zero = false;
        }
    }

    /// Assemble the 16-bit little-endian address whose low byte sits at
    /// `pc`. Leaves `pc` on the high operand byte; the caller advances
    /// past it (or jumps) as its length rule requires.
    #[inline]
    fn fetch_addr(&mut self) -> Result<u16, RunError> {
        let lsb = self.mem.read(self.pc) as u16;
        self.advance()?;
        let msb = (self.mem.read(self.pc) as u16) << 8;
        Ok(msb | lsb)
    }

    // Instructions

    fn nop(&mut self) -> Result<(), RunError> {
        self.advance()
    }

    fn hlt(&mut self) -> Result<(), RunError> {
        self.halted = true;
        Ok(())
    }

    fn mov_a_b(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a = self.b;
        self.set_flags();
        Ok(())
    }

    fn mov_a_c(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a = self.c;
        self.set_flags();
        Ok(())
    }

    fn mov_b_a(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.b = self.a;
        Ok(())
    }

    fn mov_b_c(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.b = self.c;
        Ok(())
    }

    fn mov_c_a(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.c = self.a;
        Ok(())
    }

    fn mov_c_b(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.c = self.b;
        Ok(())
    }

    fn mvi_a(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a = self.mem.read(self.pc);
        self.advance()?;
        self.set_flags();
        Ok(())
    }

    fn mvi_b(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.b = self.mem.read(self.pc);
        self.advance()?;
        Ok(())
    }

    fn mvi_c(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.c = self.mem.read(self.pc);
        self.advance()?;
        Ok(())
    }

    fn add_b(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a = self.a.wrapping_add(self.b);
        self.set_flags();
        Ok(())
    }

    fn add_c(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a = self.a.wrapping_add(self.c);
        self.set_flags();
        Ok(())
    }

    fn sub_b(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a = self.a.wrapping_sub(self.b);
        self.set_flags();
        Ok(())
    }

    fn sub_c(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a = self.a.wrapping_sub(self.c);
        self.set_flags();
        Ok(())
    }

    fn inr_a(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a = self.a.wrapping_add(1);
        self.set_flags();
        Ok(())
    }

    // INR B/C route the named register through the accumulator and never
    // write the result back. This mirrors the reference machine exactly;
    // the incremented value is observable only in A and the flags.
    fn inr_b(&mut self) -> Result<(), RunError> {
        self.a = self.b;
        self.inr_a()
    }

    fn inr_c(&mut self) -> Result<(), RunError> {
        self.a = self.c;
        self.inr_a()
    }

    fn dcr_a(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a = self.a.wrapping_sub(1);
        self.set_flags();
        Ok(())
    }

    fn dcr_b(&mut self) -> Result<(), RunError> {
        self.a = self.b;
        self.dcr_a()
    }

    fn dcr_c(&mut self) -> Result<(), RunError> {
        self.a = self.c;
        self.dcr_a()
    }

    fn ana_b(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a &= self.b;
        self.set_flags();
        Ok(())
    }

    fn ana_c(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a &= self.c;
        self.set_flags();
        Ok(())
    }

    fn ani(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a &= self.mem.read(self.pc);
        self.advance()?;
        self.set_flags();
        Ok(())
    }

    fn ora_b(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a |= self.b;
        self.set_flags();
        Ok(())
    }

    fn ora_c(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a |= self.c;
        self.set_flags();
        Ok(())
    }

    fn ori(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a |= self.mem.read(self.pc);
        self.advance()?;
        self.set_flags();
        Ok(())
    }

    fn xra_b(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a ^= self.b;
        self.set_flags();
        Ok(())
    }

    fn xra_c(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a ^= self.c;
        self.set_flags();
        Ok(())
    }

    fn xri(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a ^= self.mem.read(self.pc);
        self.advance()?;
        self.set_flags();
        Ok(())
    }

    // Two's-complement negation, not a bitwise complement. The reference
    // machine negates here and programs depend on it.
    fn cma(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a = self.a.wrapping_neg();
        self.set_flags();
        Ok(())
    }

    // RAL/RAR are accepted opcodes with no register effect on the
    // reference machine. They consume their byte and nothing else.
    fn ral(&mut self) -> Result<(), RunError> {
        self.advance()
    }

    fn rar(&mut self) -> Result<(), RunError> {
        self.advance()
    }

    fn jmp(&mut self) -> Result<(), RunError> {
        self.advance()?;
        let target = self.fetch_addr()?;
        self.pc = target;
        Ok(())
    }

    fn jz(&mut self) -> Result<(), RunError> {
        self.advance()?;
        let target = self.fetch_addr()?;
        if self.zero {
            self.pc = target;
        } else {
            self.advance()?;
        }
        Ok(())
    }

    fn jnz(&mut self) -> Result<(), RunError> {
        self.advance()?;
        let target = self.fetch_addr()?;
        if !self.zero {
            self.pc = target;
        } else {
            self.advance()?;
        }
        Ok(())
    }

    fn jm(&mut self) -> Result<(), RunError> {
        self.advance()?;
        let target = self.fetch_addr()?;
        if self.sign {
            self.pc = target;
        } else {
            self.advance()?;
        }
        Ok(())
    }

    // One-level pseudo-stack: the return address lives in two fixed cells,
    // so a nested CALL overwrites the previous save.
    fn call(&mut self) -> Result<(), RunError> {
        self.advance()?;
        let target = self.fetch_addr()?;
        self.advance()?;
        let [ret_lo, ret_hi] = self.pc.to_le_bytes();
        self.mem.write(RET_LO, ret_lo);
        self.mem.write(RET_HI, ret_hi);
        self.pc = target;
        Ok(())
    }

    fn ret(&mut self) -> Result<(), RunError> {
        let lsb = self.mem.read(RET_LO) as u16;
        let msb = (self.mem.read(RET_HI) as u16) << 8;
        self.pc = msb | lsb;
        Ok(())
    }

    fn lda(&mut self) -> Result<(), RunError> {
        self.advance()?;
        let addr = self.fetch_addr()?;
        self.advance()?;
        self.a = self.mem.read(addr);
        Ok(())
    }

    fn sta(&mut self) -> Result<(), RunError> {
        self.advance()?;
        let addr = self.fetch_addr()?;
        self.advance()?;
        self.mem.write(addr, self.a);
        Ok(())
    }

    fn in_a(&mut self) -> Result<(), RunError> {
        self.advance()?;
        self.a = self.input.read_byte();
        Ok(())
    }

    // OUT carries a port operand byte which the reference machine ignores;
    // it still has to be consumed.
    fn out(&mut self) -> Result<(), RunError> {
        self.advance()?;
        write!(self.output, "{}", self.a).expect("output channel failed");
        self.output.flush().expect("output channel failed");
        self.advance()?;
        Ok(())
    }

    /// Copy of the architectural registers for diagnostics.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pc: self.pc,
            a: self.a,
            b: self.b,
            c: self.c,
            sign: self.sign,
            zero: self.zero,
        }
    }

    // Post-run accessors

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    pub fn c(&self) -> u8 {
        self.c
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn sign(&self) -> bool {
        self.sign
    }

    pub fn zero(&self) -> bool {
        self.zero
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn faulted(&self) -> bool {
        self.faulted
    }

    pub fn mem(&self, addr: u16) -> u8 {
        self.mem.read(addr)
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    use super::*;
    use crate::channel::ByteQueue;

    /// Output sink which stays readable after the machine takes ownership.
    #[derive(Clone, Default)]
    struct SharedSink(Rc<RefCell<Vec<u8>>>);

    impl io::Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn run(image: &[u8]) -> RunState {
        let mut state = RunState::new();
        state.load(0x0000, image);
        state.start().expect("program should halt cleanly");
        state
    }

    #[test]
    fn flags_track_accumulator() {
        // MVI A 0x00; HLT
        let state = run(&[0x3e, 0x00, 0x76]);
        assert!(state.zero());
        assert!(!state.sign());

        // MVI A 0x80; HLT
        let state = run(&[0x3e, 0x80, 0x76]);
        assert!(!state.zero());
        assert!(state.sign());

        // MVI A 0x7f; HLT
        let state = run(&[0x3e, 0x7f, 0x76]);
        assert!(!state.zero());
        assert!(!state.sign());
    }

    #[test]
    fn moves_into_a_set_flags_but_moves_out_do_not() {
        // MVI B 0x80; MOV A,B; HLT
        let state = run(&[0x06, 0x80, 0x78, 0x76]);
        assert_eq!(state.a(), 0x80);
        assert!(state.sign());

        // MVI A 0x80; MOV B,A; MVI A 0x01; HLT
        // MOV B,A must not touch the flags set by the final MVI A.
        let state = run(&[0x3e, 0x80, 0x47, 0x3e, 0x01, 0x76]);
        assert_eq!(state.b(), 0x80);
        assert!(!state.sign());
        assert!(!state.zero());
    }

    #[test]
    fn arithmetic_wraps_to_eight_bits() {
        // MVI A 0xf0; MVI B 0x20; ADD B; HLT
        let state = run(&[0x3e, 0xf0, 0x06, 0x20, 0x80, 0x76]);
        assert_eq!(state.a(), 0x10);
        assert!(!state.sign());
        assert!(!state.zero());

        // MVI A 0x01; MVI B 0x02; SUB B; HLT
        let state = run(&[0x3e, 0x01, 0x06, 0x02, 0x90, 0x76]);
        assert_eq!(state.a(), 0xff);
        assert!(state.sign());
    }

    #[test]
    fn sub_to_zero_sets_zero_flag() {
        // MVI A 0x42; MVI C 0x42; SUB C; HLT
        let state = run(&[0x3e, 0x42, 0x0e, 0x42, 0x91, 0x76]);
        assert_eq!(state.a(), 0x00);
        assert!(state.zero());
        assert!(!state.sign());
    }

    #[test]
    fn dcr_a_wraps_below_zero() {
        // DCR A; HLT
        let state = run(&[0x3d, 0x76]);
        assert_eq!(state.a(), 0xff);
        assert!(state.sign());
        assert!(!state.zero());
    }

    #[test]
    fn inr_b_increments_through_a_without_writeback() {
        // MVI B 0x10; INR B; HLT
        let state = run(&[0x06, 0x10, 0x04, 0x76]);
        assert_eq!(state.b(), 0x10, "B must keep its old value");
        assert_eq!(state.a(), 0x11, "result lands in A only");
        assert!(!state.zero());
    }

    #[test]
    fn dcr_c_decrements_through_a_without_writeback() {
        // MVI C 0x01; DCR C; HLT
        let state = run(&[0x0e, 0x01, 0x0d, 0x76]);
        assert_eq!(state.c(), 0x01);
        assert_eq!(state.a(), 0x00);
        assert!(state.zero());
    }

    #[test]
    fn logic_immediates() {
        // MVI A 0b1100_1100; ANI 0b1010_1010; HLT
        let state = run(&[0x3e, 0xcc, 0xe6, 0xaa, 0x76]);
        assert_eq!(state.a(), 0x88);
        assert!(state.sign());

        // MVI A 0x0f; ORI 0xf0; HLT
        let state = run(&[0x3e, 0x0f, 0xf6, 0xf0, 0x76]);
        assert_eq!(state.a(), 0xff);

        // MVI A 0xff; XRI 0xff; HLT
        let state = run(&[0x3e, 0xff, 0xee, 0xff, 0x76]);
        assert_eq!(state.a(), 0x00);
        assert!(state.zero());
    }

    #[test]
    fn cma_negates_rather_than_inverting() {
        // MVI A 0x05; CMA; HLT
        let state = run(&[0x3e, 0x05, 0x2f, 0x76]);
        assert_eq!(state.a(), 0xfb, "two's complement of 5, not !5");
        assert!(state.sign());
    }

    #[test]
    fn rotate_opcodes_are_accepted_no_ops() {
        // MVI A 0x81; RAL; RAR; HLT
        let state = run(&[0x3e, 0x81, 0x17, 0x1f, 0x76]);
        assert_eq!(state.a(), 0x81);
        assert_eq!(state.pc(), 0x0004);
    }

    #[test]
    fn unknown_opcode_reports_byte_and_address() {
        let mut state = RunState::new();
        state.load(0x0000, &[0x00, 0xfd]);
        let err = state.start().unwrap_err();
        assert_eq!(
            err,
            RunError::UnknownOpcode {
                opcode: 0xfd,
                pc: 0x0001,
            }
        );
    }

    #[test]
    fn operand_fetch_at_top_of_memory_faults() {
        // MVI A sits at 0xffff; fetching its operand must fault rather
        // than read out of bounds.
        let mut state = RunState::new();
        state.load(0xffff, &[0x3e]);
        state.load(0x0000, &[0xc3, 0xff, 0xff]); // JMP 0xffff
        let err = state.start().unwrap_err();
        match err {
            RunError::Fault { state: snap } => {
                assert_eq!(snap.pc, 0xffff);
                assert_eq!(snap.a, 0x00, "operand was never consumed");
            }
            other => panic!("expected fault, got {:?}", other),
        }
        assert!(state.faulted());
        assert!(!state.halted());
    }

    #[test]
    fn faulted_machine_does_not_resume() {
        let mut state = RunState::new();
        // MVI A at 0xfffe reads its operand (0x76) and then faults on the
        // final advance, leaving pc parked on a byte that decodes as HLT.
        state.load(0x0000, &[0xc3, 0xfe, 0xff]); // JMP 0xfffe
        state.load(0xfffe, &[0x3e, 0x76]);

        let first = state.start().unwrap_err();
        assert!(matches!(first, RunError::Fault { .. }));
        let pc_after_fault = state.pc();

        // A second start must report the same fault, not fetch the stale
        // operand byte as an opcode.
        let second = state.start().unwrap_err();
        assert_eq!(
            second,
            RunError::Fault {
                state: state.snapshot(),
            }
        );
        assert_eq!(state.pc(), pc_after_fault, "no further fetches occurred");
        assert!(!state.halted(), "the 0x76 operand was never executed");
        assert!(state.faulted());
    }

    #[test]
    fn nop_slide_off_the_end_faults() {
        // All-zero memory is a NOP slide into the top of memory.
        let mut state = RunState::new();
        let err = state.start().unwrap_err();
        assert!(matches!(err, RunError::Fault { .. }));
        assert_eq!(state.pc(), 0xffff);
    }

    #[test]
    fn nested_calls_collide_on_the_single_save_slot() {
        let mut state = RunState::new();
        // 0x0000: CALL 0x0010   saves 0x0003
        // 0x0003: MVI A 0x01    only reached if the outer return survived
        // 0x0005: HLT
        state.load(0x0000, &[0xcd, 0x10, 0x00, 0x3e, 0x01, 0x76]);
        // 0x0010: CALL 0x0020   overwrites the slot with 0x0013
        // 0x0013: HLT
        state.load(0x0010, &[0xcd, 0x20, 0x00, 0x76]);
        // 0x0020: RET           lands on 0x0013, not back in the caller
        state.load(0x0020, &[0xc9]);

        state.start().expect("program should halt cleanly");
        assert_eq!(state.pc(), 0x0013, "outer return address was clobbered");
        assert_eq!(state.a(), 0x00, "the code after the outer CALL never ran");
        assert_eq!(state.mem(0xfffe), 0x13);
        assert_eq!(state.mem(0xffff), 0x00);
    }

    #[test]
    fn in_reads_one_byte_from_the_input_channel() {
        let mut state = RunState::with_channels(
            Box::new(ByteQueue::new(&[0x5a])),
            Box::new(io::sink()),
        );
        // IN; HLT
        state.load(0x0000, &[0xdb, 0x76]);
        state.start().expect("program should halt cleanly");
        assert_eq!(state.a(), 0x5a);
        // IN is a single-byte instruction.
        assert_eq!(state.pc(), 0x0001);
    }

    #[test]
    fn out_writes_decimal_text_and_consumes_port_byte() {
        let sink = SharedSink::default();
        let mut state =
            RunState::with_channels(Box::new(ByteQueue::new(&[])), Box::new(sink.clone()));
        // MVI A 0x45; OUT 0x00; HLT
        state.load(0x0000, &[0x3e, 0x45, 0xd3, 0x00, 0x76]);
        state.start().expect("program should halt cleanly");
        assert_eq!(sink.0.borrow().as_slice(), b"69");
        assert_eq!(state.pc(), 0x0004);
    }

    #[test]
    fn halt_stops_the_machine_in_place() {
        // HLT; INR A (must never run)
        let state = run(&[0x76, 0x3c]);
        assert!(state.halted());
        assert_eq!(state.pc(), 0x0000, "HLT performs no advancement");
        assert_eq!(state.a(), 0x00);
    }
}

//! Simulator: the single owned context every driver operation goes through.
//!
//! Holds the CPU (registers, memory, both caches), the configuration it was
//! built from, and the numeral base of the current program. It coordinates:
//! 1. **Assembly:** Installs a fresh memory image and invalidates both caches.
//! 2. **Execution:** Reset, single steps, and guarded runs.
//! 3. **Inspection:** Cache views, statistics, and serializable snapshots.

use tracing::debug;

use crate::asm::{self, AssemblyReport, SourceFile};
use crate::common::Base;
use crate::config::Config;
use crate::core::units::cache::{CacheKind, CacheStats};
use crate::core::{Cpu, ExecState};
use crate::core::cpu::execution::RunReport;
use crate::sim::snapshot::Snapshot;
use crate::stats::SimStats;

/// Top-level simulator context.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Architectural and cache state.
    pub cpu: Cpu,
    config: Config,
    base: Base,
}

impl Simulator {
    /// Creates a simulator with zeroed memory, using the configured default base.
    pub fn new(config: &Config) -> Self {
        Self {
            cpu: Cpu::new(config),
            config: config.clone(),
            base: config.general.base,
        }
    }

    /// Assembles `lines` into a fresh memory image.
    ///
    /// The previous memory contents are discarded and both caches are
    /// invalidated, so no block from the old image can be served. Registers
    /// and execution state are left alone; call [`Simulator::reset`] to start
    /// from address 0.
    pub fn assemble<S: AsRef<str>>(&mut self, lines: &[S], base: Base) -> AssemblyReport {
        let assembly = asm::assemble(lines, base);
        self.cpu.memory = assembly.memory;
        self.cpu.icache.invalidate();
        self.cpu.dcache.invalidate();
        self.base = base;
        assembly.report
    }

    /// Assembles a parsed program file with its own base, then resets.
    pub fn load_program(&mut self, source: &SourceFile) -> AssemblyReport {
        let report = self.assemble(&source.lines, source.base);
        self.reset();
        report
    }

    /// Zeroes AC/PC/VAC, invalidates both caches and returns to RUNNING.
    pub fn reset(&mut self) {
        debug!("reset");
        self.cpu.reset();
    }

    /// Executes a single instruction.
    pub fn step(&mut self) -> ExecState {
        self.cpu.step()
    }

    /// Runs until the machine stops or the configured loop guard trips.
    pub fn run(&mut self) -> RunReport {
        self.cpu.run(self.config.execution.loop_guard)
    }

    /// Returns the hit/miss counters, valid flag, tag and block of one cache.
    pub fn cache_stats(&self, which: CacheKind) -> CacheStats {
        match which {
            CacheKind::Instruction => self.cpu.icache.stats(),
            CacheKind::Data => self.cpu.dcache.stats(),
        }
    }

    /// Rewrites `lines` from the current base into `new` and adopts `new`.
    ///
    /// The memory image is unchanged; re-assembling the returned lines in the
    /// new base yields the same image as before.
    pub fn convert_base<S: AsRef<str>>(&mut self, lines: &[S], new: Base) -> Vec<String> {
        let converted = asm::convert_base(lines, self.base, new);
        self.base = new;
        converted
    }

    /// Writes one memory cell directly, as a driver presetting data would.
    ///
    /// Any resident cache copy of the cell is updated so later reads observe
    /// the new value. The cell's classification tag is left alone.
    pub fn poke(&mut self, addr: u8, value: u8) {
        self.cpu.memory.write(addr, value);
        self.cpu.icache.snoop(addr, value);
        self.cpu.dcache.snoop(addr, value);
    }

    /// Numeral base of the current program.
    pub const fn base(&self) -> Base {
        self.base
    }

    /// Configuration the simulator was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Current execution state.
    pub const fn state(&self) -> ExecState {
        self.cpu.state
    }

    /// Execution statistics with the current cache counters filled in.
    pub fn stats(&self) -> SimStats {
        let mut stats = self.cpu.stats.clone();
        stats.icache_hits = self.cpu.icache.hits();
        stats.icache_misses = self.cpu.icache.misses();
        stats.dcache_hits = self.cpu.dcache.hits();
        stats.dcache_misses = self.cpu.dcache.misses();
        stats
    }

    /// Captures registers, flags, caches and memory.
    pub fn snapshot(&self) -> Snapshot {
        let regs = &self.cpu.regs;
        Snapshot {
            ac: regs.ac(),
            pc: regs.pc,
            vac: regs.vac,
            zero: regs.zero(),
            negative: regs.negative(),
            state: self.cpu.state,
            base: self.base,
            icache: self.cache_stats(CacheKind::Instruction),
            dcache: self.cache_stats(CacheKind::Data),
            memory: self.cpu.memory.clone(),
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

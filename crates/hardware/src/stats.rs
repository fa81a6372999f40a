//! Simulation statistics collection and reporting.
//!
//! This module tracks execution metrics for the simulator. It provides:
//! 1. **Instruction count:** Total executed instructions.
//! 2. **Instruction mix:** Counts by group (load, store, ALU, branch, vector, system).
//! 3. **Control flow:** Taken jumps and engine faults.
//! 4. **Cache behavior:** Hit/miss counts for the instruction and data caches.

use std::time::Instant;

use serde::Serialize;

use crate::isa::instruction::{Group, Mnemonic};

/// Simulation statistics structure tracking all execution metrics.
#[derive(Debug, Clone, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Number of instructions executed (HLT included).
    pub instructions_retired: u64,

    /// Count of LDA instructions.
    pub inst_load: u64,
    /// Count of STA instructions.
    pub inst_store: u64,
    /// Count of scalar ALU instructions (ADD, OR, AND, NOT).
    pub inst_alu: u64,
    /// Count of jump instructions, taken or not.
    pub inst_branch: u64,
    /// Count of vector-unit instructions.
    pub inst_vector: u64,
    /// Count of NOP and HLT.
    pub inst_system: u64,

    /// Jumps that changed the program counter.
    pub branches_taken: u64,
    /// Engine faults raised.
    pub faults: u64,

    /// Instruction cache hit count.
    pub icache_hits: u64,
    /// Instruction cache miss count.
    pub icache_misses: u64,
    /// Data cache hit count.
    pub dcache_hits: u64,
    /// Data cache miss count.
    pub dcache_misses: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            instructions_retired: 0,
            inst_load: 0,
            inst_store: 0,
            inst_alu: 0,
            inst_branch: 0,
            inst_vector: 0,
            inst_system: 0,
            branches_taken: 0,
            faults: 0,
            icache_hits: 0,
            icache_misses: 0,
            dcache_hits: 0,
            dcache_misses: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"memory"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "memory"];

impl SimStats {
    /// Counts one executed instruction.
    pub const fn record(&mut self, mnemonic: Mnemonic) {
        self.instructions_retired += 1;
        let counter = match mnemonic.group() {
            Group::Load => &mut self.inst_load,
            Group::Store => &mut self.inst_store,
            Group::Alu => &mut self.inst_alu,
            Group::Branch => &mut self.inst_branch,
            Group::Vector => &mut self.inst_vector,
            Group::System => &mut self.inst_system,
        };
        *counter += 1;
    }

    /// Renders the requested sections as text.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. An
    /// empty slice renders every section.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64| (n as f64 / instr) * 100.0;
        let mut out = String::new();

        if want("summary") {
            let seconds = self.start_time.elapsed().as_secs_f64();
            out.push_str("\n==========================================================\n");
            out.push_str("NEANDERWEB-V SIMULATION STATISTICS\n");
            out.push_str("==========================================================\n");
            out.push_str(&format!("host_seconds             {seconds:.4} s\n"));
            out.push_str(&format!("sim_insts                {}\n", self.instructions_retired));
            out.push_str(&format!("branches.taken           {}\n", self.branches_taken));
            out.push_str(&format!("faults                   {}\n", self.faults));
            out.push_str("----------------------------------------------------------\n");
        }
        if want("instruction_mix") {
            out.push_str("INSTRUCTION MIX\n");
            for (name, n) in [
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.alu", self.inst_alu),
                ("op.branch", self.inst_branch),
                ("op.vector", self.inst_vector),
                ("op.system", self.inst_system),
            ] {
                out.push_str(&format!("  {name:<21}{n} ({:.2}%)\n", pct(n)));
            }
            out.push_str("----------------------------------------------------------\n");
        }
        if want("memory") {
            out.push_str("MEMORY HIERARCHY\n");
            for (name, hits, misses) in [
                ("icache", self.icache_hits, self.icache_misses),
                ("dcache", self.dcache_hits, self.dcache_misses),
            ] {
                let total = hits + misses;
                let rate = if total > 0 {
                    100.0 * hits as f64 / total as f64
                } else {
                    0.0
                };
                out.push_str(&format!(
                    "  {name:<8} accesses: {total:<8} hits: {hits:<8} misses: {misses:<8} rate: {rate:.2}%\n"
                ));
            }
            out.push_str("==========================================================\n");
        }
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints every section to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

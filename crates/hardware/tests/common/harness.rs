use neander_core::Simulator;
use neander_core::common::Base;
use neander_core::config::Config;
use neander_core::core::cpu::execution::RunReport;
use neander_core::core::{Cpu, ExecState};
use tracing_subscriber::EnvFilter;

pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        Self {
            sim: Simulator::new(config),
        }
    }

    /// Convenience accessor for the CPU.
    pub fn cpu(&self) -> &Cpu {
        &self.sim.cpu
    }

    /// Assemble newline-separated decimal source and reset.
    pub fn load(self, source: &str) -> Self {
        self.load_in(source, Base::Dec)
    }

    /// Assemble newline-separated source in `base` and reset.
    pub fn load_in(mut self, source: &str, base: Base) -> Self {
        let lines: Vec<&str> = source.lines().collect();
        let _ = self.sim.assemble(&lines, base);
        self.sim.reset();
        self
    }

    /// Preset a memory cell after assembly.
    pub fn poke(mut self, addr: u8, value: u8) -> Self {
        self.sim.poke(addr, value);
        self
    }

    pub fn run(&mut self) -> RunReport {
        self.sim.run()
    }

    pub fn step(&mut self) -> ExecState {
        self.sim.step()
    }

    /// Step `n` times, returning the last state.
    pub fn step_n(&mut self, n: usize) -> ExecState {
        let mut state = self.sim.state();
        for _ in 0..n {
            state = self.sim.step();
        }
        state
    }

    pub fn ac(&self) -> u8 {
        self.sim.cpu.regs.ac()
    }

    pub fn pc(&self) -> u16 {
        self.sim.cpu.regs.pc
    }

    pub fn vac(&self) -> [u8; 4] {
        self.sim.cpu.regs.vac
    }

    pub fn mem(&self, addr: u8) -> u8 {
        self.sim.cpu.memory.read(addr)
    }
}

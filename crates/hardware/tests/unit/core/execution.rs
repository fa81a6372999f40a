//! # CPU Execution Tests
//!
//! Opcode semantics, control flow, faults, and run-mode termination, driven
//! through the shared `TestContext`.

use neander_core::common::Fault;
use neander_core::config::Config;
use neander_core::core::ExecState;
use neander_core::core::cpu::execution::RunOutcome;
use neander_core::core::units::cache::CacheKind;
use neander_core::isa::{Category, Mnemonic};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::TestContext;

#[test]
fn load_then_halt_reads_through_cold_data_cache() {
    let mut ctx = TestContext::new().load("LDA 10\nHLT").poke(10, 5);

    let report = ctx.run();
    assert_eq!(report.outcome, RunOutcome::Halted);
    assert_eq!(report.steps, 2);
    assert_eq!(ctx.ac(), 5);
    assert_eq!(ctx.sim.state(), ExecState::Halted);

    let dcache = ctx.sim.cache_stats(CacheKind::Data);
    assert_eq!((dcache.hits, dcache.misses), (0, 1));
    assert_eq!(dcache.tag, Some(0));
}

#[test]
fn vector_program_step_by_step() {
    let src = "VLD 11\nLDA 15\nVEADD\nVNOT\nVST 20\nHLT\n\n\n1\n2\n3\n4\n10";
    let mut ctx = TestContext::new().load(src);

    assert_eq!(ctx.step(), ExecState::Running);
    assert_eq!(ctx.vac(), [1, 2, 3, 4]);
    let _ = ctx.step();
    assert_eq!(ctx.ac(), 10);
    let _ = ctx.step();
    assert_eq!(ctx.vac(), [11, 12, 13, 14]);
    let _ = ctx.step();
    assert_eq!(ctx.vac(), [244, 243, 242, 241]);
    let _ = ctx.step();
    assert_eq!(
        [ctx.mem(20), ctx.mem(21), ctx.mem(22), ctx.mem(23)],
        [244, 243, 242, 241]
    );
    assert_eq!(ctx.step(), ExecState::Halted);
    assert_eq!(ctx.pc(), 8);
}

#[test]
fn jump_to_self_trips_the_loop_guard() {
    let mut ctx = TestContext::new().load("JMP 0");

    let report = ctx.run();
    assert_eq!(report.outcome, RunOutcome::LoopGuardTripped);
    assert_eq!(report.steps, 10_000);
    assert_eq!(ctx.sim.state(), ExecState::Running);
    assert_eq!(ctx.pc(), 0);
}

#[test]
fn loop_guard_comes_from_config() {
    let mut config = Config::default();
    config.execution.loop_guard = 7;
    let mut ctx = TestContext::with_config(&config).load("JMP 0");
    assert_eq!(ctx.run().steps, 7);
}

#[test]
fn store_over_code_is_visible_to_later_load() {
    let src = "LDA 10\nSTA 0\nLDA 0\nHLT\n\n\n\n77";
    let mut ctx = TestContext::new().load(src);
    assert_eq!(ctx.cpu().memory.class(0), Some(Category::Operand));

    assert_eq!(ctx.run().outcome, RunOutcome::Halted);
    assert_eq!(ctx.mem(0), 77);
    assert_eq!(ctx.ac(), 77);
    assert_eq!(ctx.cpu().memory.class(0), None);
}

#[test]
fn store_into_cached_code_is_fetched() {
    // Cell 5 starts as NOP; the store turns it into HLT while the block is resident.
    let src = "LDA 20\nSTA 5\nNOP\nNOP\nJMP 0";
    let mut ctx = TestContext::new().load(src).poke(20, 240);

    let report = ctx.run();
    assert_eq!(report.outcome, RunOutcome::Halted);
    assert_eq!(ctx.pc(), 5);
}

#[test]
fn empty_memory_runs_off_the_end() {
    let mut ctx = TestContext::new().load("");

    let report = ctx.run();
    assert_eq!(
        report.outcome,
        RunOutcome::Faulted {
            fault: Fault::PcOutOfBounds { pc: 256 }
        }
    );
    assert_eq!(report.steps, 256);
}

#[test]
fn invalid_opcode_faults_without_executing() {
    let mut ctx = TestContext::new().load("1");

    let report = ctx.run();
    assert_eq!(
        report.outcome,
        RunOutcome::Faulted {
            fault: Fault::InvalidOpcode { opcode: 1, pc: 0 }
        }
    );
    assert_eq!(report.steps, 0);
    assert_eq!(ctx.pc(), 0);
    assert_eq!(
        Fault::InvalidOpcode { opcode: 1, pc: 0 }.to_string(),
        "Invalid opcode 1 at address 0"
    );
}

#[test]
fn operand_instruction_in_last_cell_reads_operand_zero() {
    let mut ctx = TestContext::new().poke(255, 32).poke(0, 9);
    ctx.sim.cpu.regs.pc = 255;

    assert_eq!(ctx.step(), ExecState::Running);
    assert_eq!(ctx.ac(), 9);
    assert_eq!(ctx.pc(), 257);
    assert_eq!(
        ctx.step(),
        ExecState::Faulted {
            fault: Fault::PcOutOfBounds { pc: 257 }
        }
    );
}

#[test]
fn terminal_state_is_sticky_until_reset() {
    let mut ctx = TestContext::new().load("HLT");
    assert_eq!(ctx.step(), ExecState::Halted);
    assert_eq!(ctx.step(), ExecState::Halted);
    assert_eq!(ctx.pc(), 0);

    let report = ctx.run();
    assert_eq!((report.outcome, report.steps), (RunOutcome::Halted, 0));

    ctx.sim.reset();
    assert_eq!(ctx.sim.state(), ExecState::Running);
}

#[rstest]
#[case("ADD", 200, 100, 44)]
#[case("OR", 0b1010_0000, 0b0000_0101, 0b1010_0101)]
#[case("AND", 0b1111_0000, 0b0011_1100, 0b0011_0000)]
#[case("LDA", 1, 2, 2)]
fn alu_with_memory_operand(
    #[case] op: &str,
    #[case] ac: u8,
    #[case] operand: u8,
    #[case] expected: u8,
) {
    let src = format!("LDA 10\n{op} 11\nHLT");
    let mut ctx = TestContext::new().load(&src).poke(10, ac).poke(11, operand);
    let _ = ctx.run();
    assert_eq!(ctx.ac(), expected);
}

#[test]
fn not_complements_ac() {
    let mut ctx = TestContext::new().load("LDA 10\nNOT\nHLT").poke(10, 0x0F);
    let _ = ctx.run();
    assert_eq!(ctx.ac(), 0xF0);
    assert!(ctx.cpu().regs.negative());
}

/// Layout: LDA 0-1, J? 2-3, HLT 4, NOT 5, HLT 6, data at 10.
#[rstest]
#[case("JN", 200, true)]
#[case("JN", 5, false)]
#[case("JZ", 0, true)]
#[case("JZ", 1, false)]
fn conditional_jumps(#[case] op: &str, #[case] value: u8, #[case] taken: bool) {
    let src = format!("LDA 10\n{op} 5\nHLT\nNOT\nHLT");
    let mut ctx = TestContext::new().load(&src).poke(10, value);

    assert_eq!(ctx.run().outcome, RunOutcome::Halted);
    if taken {
        assert_eq!(ctx.pc(), 6);
        assert_eq!(ctx.ac(), !value);
    } else {
        assert_eq!(ctx.pc(), 4);
        assert_eq!(ctx.ac(), value);
    }
}

#[test]
fn vector_lanes_past_memory_are_skipped() {
    let mut ctx = TestContext::new()
        .load("VLD 20\nVLD 254\nVST 253\nHLT")
        .poke(20, 1)
        .poke(21, 2)
        .poke(22, 3)
        .poke(23, 4)
        .poke(253, 50)
        .poke(254, 7)
        .poke(255, 8);

    let _ = ctx.step_n(2);
    assert_eq!(ctx.vac(), [7, 8, 3, 4]);
    assert_eq!(ctx.step_n(2), ExecState::Halted);
    assert_eq!([ctx.mem(253), ctx.mem(254), ctx.mem(255)], [7, 8, 3]);
    assert_eq!(ctx.mem(0), 241);
}

#[rstest]
#[case("VADD", [250, 1, 2, 3], [10, 10, 10, 10], [4, 11, 12, 13])]
#[case("VOR", [0x0F, 0, 1, 2], [0xF0, 1, 1, 1], [0xFF, 1, 1, 3])]
#[case("VAND", [0x0F, 3, 6, 255], [0xFC, 1, 2, 128], [0x0C, 1, 2, 128])]
fn lanewise_vector_ops(
    #[case] op: &str,
    #[case] a: [u8; 4],
    #[case] b: [u8; 4],
    #[case] expected: [u8; 4],
) {
    let src = format!("VLD 20\n{op} 30\nHLT");
    let mut ctx = TestContext::new().load(&src);
    for lane in 0..4u8 {
        ctx = ctx
            .poke(20 + lane, a[usize::from(lane)])
            .poke(30 + lane, b[usize::from(lane)]);
    }
    let _ = ctx.run();
    assert_eq!(ctx.vac(), expected);
}

#[test]
fn trace_log_records_executed_instructions() {
    let mut config = Config::default();
    config.general.trace_instructions = true;
    let mut ctx = TestContext::with_config(&config).load("LDA 10\nNOT\nHLT");
    let _ = ctx.run();

    let log: Vec<(u8, Mnemonic, Option<u8>)> = ctx
        .cpu()
        .trace_log
        .iter()
        .map(|e| (e.pc, e.mnemonic, e.operand))
        .collect();
    assert_eq!(
        log,
        vec![
            (0, Mnemonic::Lda, Some(10)),
            (2, Mnemonic::Not, None),
            (3, Mnemonic::Hlt, None),
        ]
    );
}

#[test]
fn trace_log_is_off_by_default() {
    let mut ctx = TestContext::new().load("HLT");
    let _ = ctx.run();
    assert!(ctx.cpu().trace_log.is_empty());
}

proptest! {
    #[test]
    fn flags_track_ac_after_alu_steps(
        ops in prop::collection::vec(prop::sample::select(vec!["LDA", "ADD", "OR", "AND", "NOT"]), 1..12),
        data in any::<u8>(),
    ) {
        let lines: Vec<String> = ops
            .iter()
            .map(|op| if *op == "NOT" { op.to_string() } else { format!("{op} 250") })
            .collect();
        let mut ctx = TestContext::new().load(&lines.join("\n")).poke(250, data);

        let mut expected: u8 = 0;
        for op in &ops {
            let _ = ctx.step();
            expected = match *op {
                "LDA" => data,
                "ADD" => expected.wrapping_add(data),
                "OR" => expected | data,
                "AND" => expected & data,
                _ => !expected,
            };
            let regs = &ctx.cpu().regs;
            prop_assert_eq!(regs.ac(), expected);
            prop_assert_eq!(regs.zero(), expected == 0);
            prop_assert_eq!(regs.negative(), expected & 0x80 != 0);
        }
    }
}

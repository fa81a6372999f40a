//! # Memory Tests

use neander_core::isa::Category;
use neander_core::memory::Memory;

#[test]
fn new_memory_is_zeroed_and_untagged() {
    let memory = Memory::new();
    assert!(memory.cells().iter().all(|&c| c == 0));
    assert!(memory.classes().iter().all(Option::is_none));
}

#[test]
fn tags_are_independent_of_values() {
    let mut memory = Memory::new();
    memory.write(3, 240);
    memory.set_class(3, Category::Simple);
    memory.write(3, 7);
    assert_eq!(memory[3], 7);
    assert_eq!(memory.class(3), Some(Category::Simple));

    memory.clear_class(3);
    assert_eq!(memory.class(3), None);
}

#[test]
fn get_is_bounded() {
    let mut memory = Memory::new();
    memory.write(255, 9);
    assert_eq!(memory.get(255), Some(9));
    assert_eq!(memory.get(256), None);
}

#[test]
fn clear_resets_cells_and_tags() {
    let mut memory = Memory::new();
    memory.write(0, 1);
    memory.set_class(0, Category::Vector);
    memory.clear();
    assert_eq!(memory, Memory::new());
}

use crate::{instructions::properties, Revision};
use once_cell::sync::OnceCell;

#[derive(Clone, Copy, Debug)]
pub struct InstructionTableEntry {
    pub gas_cost: u16,
    pub stack_height_required: u8,
    pub can_overflow_stack: bool,
}

pub type InstructionTable = [Option<InstructionTableEntry>; 256];
pub type InstructionTables = [InstructionTable; Revision::len()];

static INSTRUCTION_TABLES: OnceCell<InstructionTables> = OnceCell::new();

pub fn get_baseline_instruction_table(revision: Revision) -> &'static InstructionTable {
    &INSTRUCTION_TABLES.get_or_init(|| {
        let mut table: InstructionTables = [[None; 256]; Revision::len()];

        for revision in Revision::iter() {
            for (opcode, &cost) in properties::gas_costs(revision).iter().enumerate() {
                if let Some(cost) = cost {
                    let props = properties::PROPERTIES[opcode].unwrap();

                    // Any instruction can increase stack height by at most 1,
                    // so overflow can only happen when the stack is already at
                    // its limit.
                    assert!(props.stack_height_change <= 1);

                    table[revision as usize][opcode] = Some(InstructionTableEntry {
                        gas_cost: cost,
                        stack_height_required: props.stack_height_required,
                        can_overflow_stack: props.stack_height_change > 0,
                    });
                }
            }
        }
        table
    })[revision as usize]
}

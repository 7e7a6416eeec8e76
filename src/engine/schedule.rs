use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::{Course, Pace, Period};

/// Timetable collision for one course within a (term, period) slice:
/// which blocks collide and with which other courses. Advisory only,
/// never blocks a mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockConflict {
    pub blocks: Vec<u8>,
    pub with: Vec<String>,
}

/// Detect shared timetable blocks among the given courses for one
/// period.
///
/// A half-pace course occupies only the block paired with this period
/// (blocks are listed per period); a full-pace course occupies all its
/// blocks in every period it runs. A shared block is flagged only when
/// at least one contributor is full-pace: two half-pace courses can
/// share a block.
pub fn find_schedule_conflicts(courses: &[Course], period: Period) -> HashMap<String, BlockConflict> {
    let mut by_block: BTreeMap<u8, Vec<(&Course, bool)>> = BTreeMap::new();

    for course in courses {
        let Some(position) = course.periods.iter().position(|p| *p == period) else {
            continue;
        };
        match course.pace {
            Pace::Half => {
                if let Some(block) = course.blocks.get(position) {
                    by_block.entry(*block).or_default().push((course, true));
                }
            }
            Pace::Full => {
                for block in &course.blocks {
                    by_block.entry(*block).or_default().push((course, false));
                }
            }
        }
    }

    let mut conflicts: HashMap<String, BlockConflict> = HashMap::new();
    for (block, entries) in by_block {
        if entries.len() < 2 || entries.iter().all(|(_, half_pace)| *half_pace) {
            continue;
        }
        for (course, _) in &entries {
            let info = conflicts.entry(course.code.clone()).or_default();
            if !info.blocks.contains(&block) {
                info.blocks.push(block);
            }
            for (other, _) in &entries {
                if other.code != course.code && !info.with.contains(&other.code) {
                    info.with.push(other.code.clone());
                }
            }
        }
    }

    conflicts
}

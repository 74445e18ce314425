use crate::slot::SlotTime;

/// Iterator over candidate slot start times: begins at `start` and steps by
/// `step_minutes` while the candidate is strictly before `end`.
#[derive(Debug, Clone)]
pub struct SlotGrid {
    next: Option<SlotTime>,
    end: SlotTime,
    step_minutes: u16,
}

/// Candidate grid over the half-open window `[start, end)`.
///
/// A zero step yields an empty grid rather than looping forever.
pub fn slots(start: SlotTime, end: SlotTime, step_minutes: u16) -> SlotGrid {
    SlotGrid {
        next: (step_minutes > 0).then_some(start),
        end,
        step_minutes,
    }
}

impl Iterator for SlotGrid {
    type Item = SlotTime;

    fn next(&mut self) -> Option<SlotTime> {
        let current = self.next.filter(|t| *t < self.end)?;
        self.next = current.checked_add_minutes(self.step_minutes);
        Some(current)
    }
}

/// True when the half-open intervals `[a, a+a_minutes)` and
/// `[b, b+b_minutes)` intersect. End times past midnight are clamped by
/// plain u32 arithmetic, so a slot running to exactly 24:00 still compares.
pub fn overlaps(a: SlotTime, a_minutes: u16, b: SlotTime, b_minutes: u16) -> bool {
    let a_start = a.minutes_from_midnight() as u32;
    let a_end = a_start + a_minutes as u32;
    let b_start = b.minutes_from_midnight() as u32;
    let b_end = b_start + b_minutes as u32;
    a_start < b_end && b_start < a_end
}

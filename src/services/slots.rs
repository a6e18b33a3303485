use crate::errors::SlotErrorKind;
use crate::models::{TimeOfDay, TimeSlot};

pub const MAX_SLOT_MINUTES: u16 = 60;

pub const DEFAULT_FIRST_START: u16 = 9 * 60;

pub fn validate_slot(slots: &[TimeSlot], i: usize) -> Option<SlotErrorKind> {
    let slot = slots.get(i)?;
    if slot.end <= slot.start {
        Some(SlotErrorKind::InvalidInterval)
    } else if slot.duration_minutes() > i32::from(MAX_SLOT_MINUTES) {
        Some(SlotErrorKind::SlotTooLong)
    } else {
        None
    }
}

/// Validates every slot, returning one entry per input slot.
///
/// Every pair is compared, so the result does not depend on input order.
/// Per-slot errors win over `Overlap`, and slots with an inverted interval
/// are left out of the overlap check.
pub fn validate_all(slots: &[TimeSlot]) -> Vec<Option<SlotErrorKind>> {
    let mut issues: Vec<Option<SlotErrorKind>> =
        (0..slots.len()).map(|i| validate_slot(slots, i)).collect();

    for i in 0..slots.len() {
        if issues[i] == Some(SlotErrorKind::InvalidInterval) {
            continue;
        }
        for j in (i + 1)..slots.len() {
            if issues[j] == Some(SlotErrorKind::InvalidInterval) {
                continue;
            }
            if slots[i].overlaps(&slots[j]) {
                issues[i].get_or_insert(SlotErrorKind::Overlap);
                issues[j].get_or_insert(SlotErrorKind::Overlap);
            }
        }
    }

    issues
}

pub fn insert_adjacent(slots: &[TimeSlot]) -> TimeSlot {
    let start = slots
        .iter()
        .map(|s| u32::from(s.end.minutes()) + 1)
        .max()
        .unwrap_or(u32::from(DEFAULT_FIRST_START));
    let start = TimeOfDay::clamped(start);
    let end = TimeOfDay::clamped(u32::from(start.minutes()) + u32::from(MAX_SLOT_MINUTES));
    TimeSlot::new(start, end)
}

fn capped_end(start: TimeOfDay, end: TimeOfDay) -> TimeOfDay {
    let cap = TimeOfDay::clamped(u32::from(start.minutes()) + u32::from(MAX_SLOT_MINUTES));
    end.min(cap)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotEditor {
    slots: Vec<TimeSlot>,
    issues: Vec<Option<SlotErrorKind>>,
}

impl SlotEditor {
    pub fn new(slots: Vec<TimeSlot>) -> Self {
        let mut editor = Self {
            slots,
            issues: Vec::new(),
        };
        editor.resort(0);
        editor
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn issues(&self) -> &[Option<SlotErrorKind>] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.issues.iter().all(Option::is_none)
    }

    pub fn first_issue(&self) -> Option<(usize, SlotErrorKind)> {
        self.issues
            .iter()
            .enumerate()
            .find_map(|(i, issue)| issue.map(|kind| (i, kind)))
    }

    pub fn push_adjacent(&mut self) -> usize {
        let slot = insert_adjacent(&self.slots);
        self.push(slot)
    }

    pub fn push(&mut self, slot: TimeSlot) -> usize {
        self.slots.push(slot);
        self.resort(self.slots.len() - 1)
    }

    pub fn set_start(&mut self, index: usize, start: TimeOfDay) -> Option<usize> {
        let slot = self.slots.get_mut(index)?;
        slot.start = start;
        slot.end = capped_end(slot.start, slot.end);
        Some(self.resort(index))
    }

    pub fn set_end(&mut self, index: usize, end: TimeOfDay) -> Option<usize> {
        let slot = self.slots.get_mut(index)?;
        slot.end = capped_end(slot.start, end);
        Some(self.resort(index))
    }

    pub fn remove(&mut self, index: usize) -> Option<TimeSlot> {
        if index >= self.slots.len() {
            return None;
        }
        let removed = self.slots.remove(index);
        self.issues = validate_all(&self.slots);
        Some(removed)
    }

    pub fn into_slots(self) -> Vec<TimeSlot> {
        self.slots
    }

    fn resort(&mut self, tracked: usize) -> usize {
        let mut tagged: Vec<(usize, TimeSlot)> = self.slots.drain(..).enumerate().collect();
        tagged.sort_by_key(|(_, s)| s.start);
        let position = tagged
            .iter()
            .position(|(i, _)| *i == tracked)
            .unwrap_or(0);
        self.slots = tagged.into_iter().map(|(_, s)| s).collect();
        self.issues = validate_all(&self.slots);
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LAST_MINUTE;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot::new(t(start), t(end))
    }

    #[test]
    fn test_validate_slot_kinds() {
        let slots = vec![
            slot("09:00", "10:00"),
            slot("10:00", "10:00"),
            slot("11:00", "10:30"),
            slot("12:00", "13:01"),
        ];
        assert_eq!(validate_slot(&slots, 0), None);
        assert_eq!(validate_slot(&slots, 1), Some(SlotErrorKind::InvalidInterval));
        assert_eq!(validate_slot(&slots, 2), Some(SlotErrorKind::InvalidInterval));
        assert_eq!(validate_slot(&slots, 3), Some(SlotErrorKind::SlotTooLong));
        assert_eq!(validate_slot(&slots, 9), None);
    }

    #[test]
    fn test_overlap_flags_both_slots() {
        // Saturday rule 09:00-10:00, then 09:30-10:15 is added
        let slots = vec![slot("09:00", "10:00"), slot("09:30", "10:15")];
        let issues = validate_all(&slots);
        assert_eq!(
            issues,
            vec![Some(SlotErrorKind::Overlap), Some(SlotErrorKind::Overlap)]
        );
    }

    #[test]
    fn test_overlap_checked_beyond_neighbours() {
        // 0 and 2 overlap although 1 sits between them in the list
        let slots = vec![
            slot("09:00", "09:50"),
            slot("13:00", "14:00"),
            slot("09:40", "10:10"),
        ];
        let issues = validate_all(&slots);
        assert_eq!(issues[0], Some(SlotErrorKind::Overlap));
        assert_eq!(issues[1], None);
        assert_eq!(issues[2], Some(SlotErrorKind::Overlap));
    }

    #[test]
    fn test_overlap_symmetric_for_every_ordering() {
        let base = vec![
            slot("09:00", "10:00"),
            slot("09:59", "10:30"),
            slot("11:00", "11:45"),
            slot("11:30", "12:00"),
        ];
        let orders = [
            [0, 1, 2, 3],
            [3, 2, 1, 0],
            [1, 3, 0, 2],
            [2, 0, 3, 1],
            [3, 0, 2, 1],
        ];
        for order in orders {
            let slots: Vec<TimeSlot> = order.iter().map(|&i| base[i].clone()).collect();
            let issues = validate_all(&slots);
            for i in 0..slots.len() {
                for j in 0..slots.len() {
                    if i != j && slots[i].overlaps(&slots[j]) {
                        assert!(issues[i].is_some() && issues[j].is_some());
                    }
                }
            }
            assert!(issues.iter().all(|issue| *issue == Some(SlotErrorKind::Overlap)));
        }
    }

    #[test]
    fn test_touching_slots_do_not_overlap() {
        let slots = vec![slot("09:00", "10:00"), slot("10:00", "11:00")];
        assert_eq!(validate_all(&slots), vec![None, None]);
    }

    #[test]
    fn test_insert_adjacent_defaults_to_nine() {
        let proposed = insert_adjacent(&[]);
        assert_eq!(proposed.start, t("09:00"));
        assert_eq!(proposed.end, t("10:00"));
    }

    #[test]
    fn test_insert_adjacent_follows_latest_end() {
        let slots = vec![slot("14:00", "14:30"), slot("09:00", "10:00")];
        let proposed = insert_adjacent(&slots);
        assert_eq!(proposed.start, t("14:31"));
        assert_eq!(proposed.end, t("15:31"));
    }

    #[test]
    fn test_insert_adjacent_clamps_to_end_of_day() {
        let slots = vec![slot("22:30", "23:30")];
        let proposed = insert_adjacent(&slots);
        assert_eq!(proposed.start, t("23:31"));
        assert_eq!(proposed.end.minutes(), LAST_MINUTE);
    }

    #[test]
    fn test_set_start_clamps_end() {
        let mut editor = SlotEditor::new(vec![slot("09:00", "10:00")]);
        let idx = editor.set_start(0, t("08:00")).unwrap();
        assert_eq!(editor.slots()[idx].start, t("08:00"));
        assert_eq!(editor.slots()[idx].end, t("09:00"));
        assert!(editor.is_valid());
    }

    #[test]
    fn test_set_end_clamps_to_one_hour() {
        let mut editor = SlotEditor::new(vec![slot("09:00", "10:00")]);
        editor.set_end(0, t("11:30")).unwrap();
        assert_eq!(editor.slots()[0].end, t("10:00"));
        assert_eq!(editor.slots()[0].duration_minutes(), 60);
    }

    #[test]
    fn test_cap_holds_after_any_edit() {
        let mut editor = SlotEditor::new(Vec::new());
        for _ in 0..4 {
            editor.push_adjacent();
        }
        let edits = ["06:10", "23:00", "12:00", "00:00", "15:45"];
        for (n, edit) in edits.iter().enumerate() {
            let idx = n % editor.len();
            let idx = editor.set_start(idx, t(edit)).unwrap();
            editor.set_end(idx, t("23:59")).unwrap();
            for s in editor.slots() {
                assert!(s.duration_minutes() <= i32::from(MAX_SLOT_MINUTES));
            }
        }
    }

    #[test]
    fn test_edit_resorts_and_tracks_index() {
        let mut editor = SlotEditor::new(vec![slot("09:00", "10:00"), slot("11:00", "12:00")]);
        let idx = editor.set_start(1, t("07:00")).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(editor.slots()[0].start, t("07:00"));
        assert_eq!(editor.slots()[1].start, t("09:00"));
    }

    #[test]
    fn test_edit_revalidates_immediately() {
        let mut editor = SlotEditor::new(vec![slot("09:00", "10:00")]);
        let idx = editor.push(slot("09:30", "10:15"));
        assert_eq!(idx, 1);
        assert_eq!(editor.first_issue(), Some((0, SlotErrorKind::Overlap)));

        editor.set_start(1, t("10:01")).unwrap();
        assert!(editor.is_valid());
    }

    #[test]
    fn test_remove_clears_overlap() {
        let mut editor = SlotEditor::new(vec![slot("09:00", "10:00"), slot("09:30", "10:15")]);
        assert!(!editor.is_valid());
        editor.remove(1).unwrap();
        assert!(editor.is_valid());
        assert!(editor.remove(5).is_none());
    }
}

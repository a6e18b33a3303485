use std::collections::BTreeMap;

use crate::errors::ScheduleError;
use crate::models::{AvailabilityRuleSet, WeekdayRule, Weekday};
use crate::services::slots::SlotEditor;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityDraft {
    rules: BTreeMap<Weekday, SlotEditor>,
}

impl AvailabilityDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rule_set(set: &AvailabilityRuleSet) -> Result<Self, ScheduleError> {
        let mut rules = BTreeMap::new();
        for rule in &set.weekday_rules {
            if rules
                .insert(rule.weekday, SlotEditor::new(rule.slots.clone()))
                .is_some()
            {
                return Err(ScheduleError::DuplicateWeekday(rule.weekday));
            }
        }
        Ok(Self { rules })
    }

    pub fn selected(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.rules.keys().copied()
    }

    pub fn is_selected(&self, weekday: Weekday) -> bool {
        self.rules.contains_key(&weekday)
    }

    pub fn add_weekday(&mut self, weekday: Weekday) -> Result<&mut SlotEditor, ScheduleError> {
        if self.rules.contains_key(&weekday) {
            return Err(ScheduleError::DuplicateWeekday(weekday));
        }
        Ok(self.rules.entry(weekday).or_default())
    }

    /// Selecting a weekday that is already selected removes it, along with
    /// its slots. Returns whether the weekday is selected afterwards.
    pub fn toggle_weekday(&mut self, weekday: Weekday) -> bool {
        if self.rules.remove(&weekday).is_some() {
            false
        } else {
            self.rules.insert(weekday, SlotEditor::default());
            true
        }
    }

    pub fn slots(&self, weekday: Weekday) -> Option<&SlotEditor> {
        self.rules.get(&weekday)
    }

    pub fn slots_mut(&mut self, weekday: Weekday) -> Option<&mut SlotEditor> {
        self.rules.get_mut(&weekday)
    }

    pub fn problems(&self) -> Vec<ScheduleError> {
        if self.rules.is_empty() {
            return vec![ScheduleError::EmptyWeekdaySet];
        }

        let mut problems = Vec::new();
        for (weekday, editor) in &self.rules {
            if editor.is_empty() {
                problems.push(ScheduleError::EmptySlotSet(*weekday));
                continue;
            }
            for (index, issue) in editor.issues().iter().enumerate() {
                if let Some(kind) = issue {
                    problems.push(ScheduleError::Slot {
                        weekday: *weekday,
                        index,
                        kind: *kind,
                    });
                }
            }
        }
        problems
    }

    pub fn publish(&self) -> Result<AvailabilityRuleSet, ScheduleError> {
        if let Some(problem) = self.problems().into_iter().next() {
            return Err(problem);
        }

        let weekday_rules = self
            .rules
            .iter()
            .map(|(weekday, editor)| WeekdayRule {
                weekday: *weekday,
                slots: editor.slots().to_vec(),
            })
            .collect();
        Ok(AvailabilityRuleSet { weekday_rules })
    }
}
